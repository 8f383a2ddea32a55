// Hanfe Device Discovery
// Finds keyboard-like evdev nodes under /dev/input

use std::collections::BTreeSet;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use evdev::{Device, EventType, Key};

use crate::key::codes;
use crate::output::FallbackEmitter;

/// Device errors; these map to exit code 1 in the binary.
#[derive(Debug, thiserror::Error)]
pub enum DeviceError {
    #[error("failed to open device '{path}': {source}")]
    Open {
        path: String,
        #[source]
        source: io::Error,
    },

    #[error("permission denied while probing input devices; run as root or adjust udev permissions")]
    PermissionDenied,

    #[error("no evdev devices found under /dev/input")]
    NoDevices,

    #[error("no keyboard-like device found")]
    NoKeyboard,
}

/// A keyboard candidate found during discovery.
#[derive(Debug, Clone)]
pub struct DetectedDevice {
    pub path: PathBuf,
    pub name: String,
}

/// Open an evdev device node for grabbing.
pub fn open_device(path: &Path) -> Result<Device, DeviceError> {
    Device::open(path).map_err(|source| DeviceError::Open {
        path: path.display().to_string(),
        source,
    })
}

/// List keyboard-like devices, stable symlinks first.
///
/// Probes `/dev/input/by-id` and `/dev/input/by-path` entries whose names
/// mention a keyboard, then falls back to the raw `event*` nodes. A node
/// qualifies when it advertises `EV_KEY` with the letter, space, enter and
/// shift keys present.
pub fn list_keyboard_devices() -> Result<Vec<DetectedDevice>, DeviceError> {
    let candidates = gather_candidate_paths();
    if candidates.is_empty() {
        return Err(DeviceError::NoDevices);
    }

    let mut devices = Vec::new();
    let mut permission_denied = false;

    for path in candidates {
        let device = match Device::open(&path) {
            Ok(device) => device,
            Err(err) => {
                if err.kind() == io::ErrorKind::PermissionDenied {
                    permission_denied = true;
                }
                log::debug!("skipping {}: {}", path.display(), err);
                continue;
            }
        };
        if !is_keyboard(&device) {
            continue;
        }
        let name = device.name().unwrap_or("unknown").to_string();
        devices.push(DetectedDevice { path, name });
    }

    if devices.is_empty() {
        if permission_denied {
            return Err(DeviceError::PermissionDenied);
        }
        return Err(DeviceError::NoKeyboard);
    }
    Ok(devices)
}

/// First keyboard found by [`list_keyboard_devices`].
pub fn detect_keyboard_device() -> Result<DetectedDevice, DeviceError> {
    let mut devices = list_keyboard_devices()?;
    Ok(devices.remove(0))
}

fn is_keyboard(device: &Device) -> bool {
    if !device.supported_events().contains(EventType::KEY) {
        return false;
    }
    // Our own virtual device would feed events back into the grab.
    if device.name().unwrap_or("").contains(FallbackEmitter::DEVICE_NAME) {
        return false;
    }
    let Some(keys) = device.supported_keys() else {
        return false;
    };
    const REQUIRED: [u16; 5] = [
        codes::KEY_A,
        codes::KEY_Z,
        codes::KEY_SPACE,
        codes::KEY_ENTER,
        codes::KEY_LEFTSHIFT,
    ];
    REQUIRED.iter().all(|&code| keys.contains(Key::new(code)))
}

fn gather_candidate_paths() -> Vec<PathBuf> {
    let mut seen = BTreeSet::new();
    let mut candidates = Vec::new();

    let mut push = |paths: Vec<PathBuf>| {
        for path in paths {
            if seen.insert(path.clone()) {
                candidates.push(path);
            }
        }
    };

    push(keyboard_symlinks(Path::new("/dev/input/by-id")));
    push(keyboard_symlinks(Path::new("/dev/input/by-path")));
    push(event_nodes(Path::new("/dev/input")));

    candidates
}

fn keyboard_symlinks(dir: &Path) -> Vec<PathBuf> {
    sorted_entries(dir, |name| {
        let lower = name.to_lowercase();
        lower.contains("kbd") || lower.contains("keyboard")
    })
}

fn event_nodes(dir: &Path) -> Vec<PathBuf> {
    sorted_entries(dir, |name| name.starts_with("event"))
}

fn sorted_entries(dir: &Path, matches: impl Fn(&str) -> bool) -> Vec<PathBuf> {
    let Ok(entries) = fs::read_dir(dir) else {
        return Vec::new();
    };
    let mut paths: Vec<PathBuf> = entries
        .filter_map(|entry| entry.ok())
        .filter(|entry| {
            entry
                .file_name()
                .to_str()
                .map(&matches)
                .unwrap_or(false)
        })
        .map(|entry| entry.path())
        .collect();
    paths.sort();
    paths
}
