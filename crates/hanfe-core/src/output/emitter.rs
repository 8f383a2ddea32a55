// Hanfe Fallback Emitter
// Virtual keyboard device plus Ctrl+Shift+U Unicode synthesis

use std::collections::HashMap;
use std::path::Path;

use evdev::uinput::{VirtualDevice, VirtualDeviceBuilder};
use evdev::{AttributeSet, BusType, EventType, InputEvent, InputId, Key};

use super::tty::TtyMirror;
use crate::key::codes;

/// Errors from the output layer; fatal for the engine.
#[derive(Debug, thiserror::Error)]
pub enum EmitterError {
    #[error("failed to create virtual device: {0}")]
    DeviceCreation(String),

    #[error("failed to write event: {0}")]
    Write(String),

    #[error("no keycode for hex digit '{0}'")]
    UnsupportedHexDigit(char),

    #[error("TTY error: {0}")]
    Tty(#[source] std::io::Error),
}

/// The operations the engine needs from its output device.
///
/// The production implementation drives uinput; tests substitute a
/// recording fake.
pub trait Emitter {
    /// Re-emit a source event verbatim.
    fn forward_event(&mut self, event: &InputEvent) -> Result<(), EmitterError>;

    /// Press or release one key.
    fn send_key_state(&mut self, code: u16, pressed: bool) -> Result<(), EmitterError>;

    fn tap_key(&mut self, code: u16) -> Result<(), EmitterError> {
        self.send_key_state(code, true)?;
        self.send_key_state(code, false)
    }

    /// Erase the last `count` characters from the consumer.
    fn send_backspace(&mut self, count: usize) -> Result<(), EmitterError>;

    /// Type arbitrary UTF-8 text.
    fn send_text(&mut self, text: &str) -> Result<(), EmitterError>;
}

/// uinput-backed emitter with an optional TTY mirror.
pub struct FallbackEmitter {
    device: VirtualDevice,
    hex_keys: HashMap<char, u16>,
    tty: Option<TtyMirror>,
}

impl FallbackEmitter {
    /// Device name downstream consumers (and our own discovery) see.
    pub const DEVICE_NAME: &'static str = "hanfe-fallback";

    /// Create the virtual keyboard and optionally attach a TTY mirror.
    ///
    /// `hex_keys` is the digit→keycode table the layout supplies for the
    /// Ctrl+Shift+U protocol.
    pub fn new(
        hex_keys: HashMap<char, u16>,
        tty_path: Option<&Path>,
    ) -> Result<Self, EmitterError> {
        let mut keys = AttributeSet::<Key>::new();
        for code in 0..=codes::KEY_MAX {
            keys.insert(Key::new(code));
        }

        let device = VirtualDeviceBuilder::new()
            .map_err(|e| EmitterError::DeviceCreation(e.to_string()))?
            .name(Self::DEVICE_NAME)
            .input_id(InputId::new(BusType::BUS_USB, 0x1, 0x1, 1))
            .with_keys(&keys)
            .map_err(|e| EmitterError::DeviceCreation(e.to_string()))?
            .build()
            .map_err(|e| EmitterError::DeviceCreation(e.to_string()))?;

        let tty = match tty_path {
            Some(path) => Some(TtyMirror::open(path)?),
            None => None,
        };

        Ok(Self {
            device,
            hex_keys,
            tty,
        })
    }

    /// One event followed by a SYN_REPORT; the kernel delivers nothing
    /// until the sync arrives.
    fn emit(&mut self, event: InputEvent) -> Result<(), EmitterError> {
        let syn = InputEvent::new(EventType::SYNCHRONIZATION, 0, 0);
        self.device
            .emit(&[event, syn])
            .map_err(|e| EmitterError::Write(e.to_string()))
    }

    /// Type one code point through the Ctrl+Shift+U hex-entry protocol.
    ///
    /// With a TTY attached the hex digits are skipped: the TTY carries the
    /// real UTF-8 and typed digits would corrupt the mirrored text.
    fn type_unicode(&mut self, ch: char) -> Result<(), EmitterError> {
        self.send_key_state(codes::KEY_LEFTCTRL, true)?;
        self.send_key_state(codes::KEY_LEFTSHIFT, true)?;
        self.tap_key(codes::KEY_U)?;
        self.send_key_state(codes::KEY_LEFTSHIFT, false)?;
        self.send_key_state(codes::KEY_LEFTCTRL, false)?;

        if let Some(tty) = &mut self.tty {
            let mut buf = [0u8; 4];
            tty.inject(ch.encode_utf8(&mut buf))?;
            return Ok(());
        }

        let hex = format!("{:x}", ch as u32);
        for digit in hex.chars() {
            let code = self
                .hex_keys
                .get(&digit)
                .copied()
                .ok_or(EmitterError::UnsupportedHexDigit(digit))?;
            self.tap_key(code)?;
        }

        // IBus terminates hex entry on Ctrl+Shift+Enter.
        self.send_key_state(codes::KEY_LEFTCTRL, true)?;
        self.send_key_state(codes::KEY_LEFTSHIFT, true)?;
        self.tap_key(codes::KEY_ENTER)?;
        self.send_key_state(codes::KEY_LEFTSHIFT, false)?;
        self.send_key_state(codes::KEY_LEFTCTRL, false)?;
        Ok(())
    }
}

impl Emitter for FallbackEmitter {
    fn forward_event(&mut self, event: &InputEvent) -> Result<(), EmitterError> {
        self.emit(InputEvent::new(
            event.event_type(),
            event.code(),
            event.value(),
        ))
    }

    fn send_key_state(&mut self, code: u16, pressed: bool) -> Result<(), EmitterError> {
        self.emit(InputEvent::new(
            EventType::KEY,
            code,
            if pressed { 1 } else { 0 },
        ))
    }

    fn send_backspace(&mut self, count: usize) -> Result<(), EmitterError> {
        for _ in 0..count {
            self.tap_key(codes::KEY_BACKSPACE)?;
            if let Some(tty) = &mut self.tty {
                tty.inject("\u{8}")?;
            }
        }
        Ok(())
    }

    fn send_text(&mut self, text: &str) -> Result<(), EmitterError> {
        for ch in text.chars() {
            self.type_unicode(ch)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::unicode_hex_keycodes;

    #[test]
    fn test_virtual_device_creation() {
        // Needs /dev/uinput access; tolerate failure in sandboxes.
        match FallbackEmitter::new(unicode_hex_keycodes(), None) {
            Ok(mut emitter) => {
                emitter.send_text("한").unwrap();
                emitter.send_backspace(1).unwrap();
            }
            Err(EmitterError::DeviceCreation(_)) => {}
            Err(err) => panic!("unexpected error: {err}"),
        }
    }
}
