// Hanfe CLI
// Wires device, layout, toggle config and emitter into the engine

use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::sync::atomic::Ordering;

use clap::Parser;

use hanfe_core::{
    available_layouts, detect_keyboard_device, load_layout, load_toggle_config, open_device,
    unicode_hex_keycodes, ConfigError, DeviceError, EmitterError, EngineError, FallbackEmitter,
    HanfeEngine, ToggleConfig,
};

/// Hangul IME interceptor for Linux evdev
#[derive(Parser, Debug)]
#[command(name = "hanfe")]
#[command(about = "Grabs a keyboard and re-emits composed Hangul through uinput")]
#[command(version)]
struct Args {
    /// Path to the evdev keyboard device (auto-detected when omitted)
    #[arg(long, value_name = "PATH")]
    device: Option<PathBuf>,

    /// Keyboard layout
    #[arg(long, value_name = "NAME", default_value = "dubeolsik")]
    layout: String,

    /// Path to toggle.ini (default: ./toggle.ini when present)
    #[arg(long, value_name = "PATH")]
    toggle_config: Option<PathBuf>,

    /// TTY to mirror composed text into
    #[arg(long, value_name = "PATH")]
    tty: Option<PathBuf>,

    /// List available layouts and exit
    #[arg(long)]
    list_layouts: bool,
}

#[derive(Debug, thiserror::Error)]
enum AppError {
    #[error("{0}")]
    Config(#[from] ConfigError),

    #[error("{0}")]
    Device(#[from] DeviceError),

    #[error("{0}")]
    Emitter(#[from] EmitterError),

    #[error("{0}")]
    Engine(#[from] EngineError),
}

fn resolve_toggle_config(args: &Args) -> Result<ToggleConfig, ConfigError> {
    if let Some(path) = &args.toggle_config {
        return load_toggle_config(path);
    }
    let default_path = Path::new("toggle.ini");
    if default_path.exists() {
        return load_toggle_config(default_path);
    }
    Ok(ToggleConfig::default())
}

fn run(args: &Args) -> Result<(), AppError> {
    let layout = load_layout(&args.layout)?;
    let toggle = resolve_toggle_config(args)?;

    let device_path = match &args.device {
        Some(path) => path.clone(),
        None => {
            let detected = detect_keyboard_device()?;
            log::info!(
                "auto-detected keyboard device: {} [{}]",
                detected.path.display(),
                detected.name
            );
            detected.path
        }
    };

    let mut device = open_device(&device_path)?;
    let emitter = FallbackEmitter::new(unicode_hex_keycodes(), args.tty.as_deref())?;

    let mut engine = HanfeEngine::new(layout, toggle, Box::new(emitter));

    let running = engine.running_flag();
    std::thread::spawn(move || {
        use signal_hook::consts::{SIGINT, SIGTERM};
        use signal_hook::iterator::Signals;
        if let Ok(mut signals) = Signals::new([SIGINT, SIGTERM]) {
            if signals.forever().next().is_some() {
                log::info!("received signal, shutting down");
                running.store(false, Ordering::SeqCst);
            }
        }
    });

    log::info!(
        "hanfe running: device={} layout={} tty={}",
        device_path.display(),
        args.layout,
        args.tty
            .as_deref()
            .map(|p| p.display().to_string())
            .unwrap_or_else(|| "none".to_string()),
    );

    engine.run(&mut device)?;
    Ok(())
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let args = Args::parse();

    if args.list_layouts {
        for name in available_layouts() {
            println!("{name}");
        }
        return ExitCode::SUCCESS;
    }

    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(AppError::Config(err)) => {
            eprintln!("Configuration error: {err}");
            ExitCode::from(2)
        }
        Err(err) => {
            eprintln!("Error: {err}");
            ExitCode::FAILURE
        }
    }
}
