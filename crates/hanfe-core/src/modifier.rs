// Hanfe Modifier Classes
// Static keycode groups used by the engine's modifier arbitration

use crate::key::codes::*;

/// Left and right Shift.
pub const SHIFT_KEYS: [u16; 2] = [KEY_LEFTSHIFT, KEY_RIGHTSHIFT];

/// All eight modifier keycodes tracked by the engine.
pub const MODIFIER_KEYS: [u16; 8] = [
    KEY_LEFTSHIFT,
    KEY_RIGHTSHIFT,
    KEY_LEFTCTRL,
    KEY_RIGHTCTRL,
    KEY_LEFTALT,
    KEY_RIGHTALT,
    KEY_LEFTMETA,
    KEY_RIGHTMETA,
];

/// Modifiers that are forwarded to the virtual device even in Hangul mode.
///
/// Shift participates in layout lookup and is withheld while composing;
/// Ctrl/Alt/Meta always pass through so shortcuts keep working.
pub const ALWAYS_FORWARD_KEYS: [u16; 6] = [
    KEY_LEFTCTRL,
    KEY_RIGHTCTRL,
    KEY_LEFTALT,
    KEY_RIGHTALT,
    KEY_LEFTMETA,
    KEY_RIGHTMETA,
];

const fn contains(set: &[u16], code: u16) -> bool {
    let mut i = 0;
    while i < set.len() {
        if set[i] == code {
            return true;
        }
        i += 1;
    }
    false
}

#[inline]
pub const fn is_modifier_code(code: u16) -> bool {
    contains(&MODIFIER_KEYS, code)
}

#[inline]
pub const fn is_always_forward_code(code: u16) -> bool {
    contains(&ALWAYS_FORWARD_KEYS, code)
}

#[inline]
pub const fn is_shift_code(code: u16) -> bool {
    contains(&SHIFT_KEYS, code)
}
