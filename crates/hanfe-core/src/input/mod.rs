// Hanfe Input Layer
// Keyboard device discovery and opening

mod device;

pub use device::{
    detect_keyboard_device, list_keyboard_devices, open_device, DetectedDevice, DeviceError,
};
