// Hanfe Core Library
// Hangul composition, layouts and the evdev interception engine

pub mod compose;
pub mod config;
pub mod engine;
pub mod input;
pub mod key;
pub mod layout;
pub mod modifier;
pub mod output;

pub use compose::{Composer, CompositionResult, JamoRole};
pub use config::{load_toggle_config, parse_toggle_config, ConfigError, ToggleConfig};
pub use engine::{EngineError, HanfeEngine, InputMode};
pub use input::{detect_keyboard_device, list_keyboard_devices, open_device, DetectedDevice, DeviceError};
pub use layout::{
    available_layouts, load_layout, unicode_hex_keycodes, Layout, LayoutEntry, LayoutSymbol,
    SymbolKind,
};
pub use output::{Emitter, EmitterError, FallbackEmitter};
