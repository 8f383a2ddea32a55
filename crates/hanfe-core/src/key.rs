// Hanfe Key Codes
// Keycode constants from linux/input-event-codes.h plus name lookup tables

use std::collections::HashMap;
use std::sync::LazyLock;

/// Keycode constants for the keys hanfe works with.
///
/// Values are the stable kernel ABI from `linux/input-event-codes.h`.
pub mod codes {
    pub const KEY_ESC: u16 = 1;
    pub const KEY_1: u16 = 2;
    pub const KEY_2: u16 = 3;
    pub const KEY_3: u16 = 4;
    pub const KEY_4: u16 = 5;
    pub const KEY_5: u16 = 6;
    pub const KEY_6: u16 = 7;
    pub const KEY_7: u16 = 8;
    pub const KEY_8: u16 = 9;
    pub const KEY_9: u16 = 10;
    pub const KEY_0: u16 = 11;
    pub const KEY_MINUS: u16 = 12;
    pub const KEY_EQUAL: u16 = 13;
    pub const KEY_BACKSPACE: u16 = 14;
    pub const KEY_TAB: u16 = 15;
    pub const KEY_Q: u16 = 16;
    pub const KEY_W: u16 = 17;
    pub const KEY_E: u16 = 18;
    pub const KEY_R: u16 = 19;
    pub const KEY_T: u16 = 20;
    pub const KEY_Y: u16 = 21;
    pub const KEY_U: u16 = 22;
    pub const KEY_I: u16 = 23;
    pub const KEY_O: u16 = 24;
    pub const KEY_P: u16 = 25;
    pub const KEY_LEFTBRACE: u16 = 26;
    pub const KEY_RIGHTBRACE: u16 = 27;
    pub const KEY_ENTER: u16 = 28;
    pub const KEY_LEFTCTRL: u16 = 29;
    pub const KEY_A: u16 = 30;
    pub const KEY_S: u16 = 31;
    pub const KEY_D: u16 = 32;
    pub const KEY_F: u16 = 33;
    pub const KEY_G: u16 = 34;
    pub const KEY_H: u16 = 35;
    pub const KEY_J: u16 = 36;
    pub const KEY_K: u16 = 37;
    pub const KEY_L: u16 = 38;
    pub const KEY_SEMICOLON: u16 = 39;
    pub const KEY_APOSTROPHE: u16 = 40;
    pub const KEY_GRAVE: u16 = 41;
    pub const KEY_LEFTSHIFT: u16 = 42;
    pub const KEY_BACKSLASH: u16 = 43;
    pub const KEY_Z: u16 = 44;
    pub const KEY_X: u16 = 45;
    pub const KEY_C: u16 = 46;
    pub const KEY_V: u16 = 47;
    pub const KEY_B: u16 = 48;
    pub const KEY_N: u16 = 49;
    pub const KEY_M: u16 = 50;
    pub const KEY_COMMA: u16 = 51;
    pub const KEY_DOT: u16 = 52;
    pub const KEY_SLASH: u16 = 53;
    pub const KEY_RIGHTSHIFT: u16 = 54;
    pub const KEY_LEFTALT: u16 = 56;
    pub const KEY_SPACE: u16 = 57;
    pub const KEY_CAPSLOCK: u16 = 58;
    pub const KEY_F1: u16 = 59;
    pub const KEY_F2: u16 = 60;
    pub const KEY_F3: u16 = 61;
    pub const KEY_F4: u16 = 62;
    pub const KEY_F5: u16 = 63;
    pub const KEY_F6: u16 = 64;
    pub const KEY_F7: u16 = 65;
    pub const KEY_F8: u16 = 66;
    pub const KEY_F9: u16 = 67;
    pub const KEY_F10: u16 = 68;
    pub const KEY_F11: u16 = 87;
    pub const KEY_F12: u16 = 88;
    pub const KEY_RIGHTCTRL: u16 = 97;
    pub const KEY_RIGHTALT: u16 = 100;
    pub const KEY_HANGEUL: u16 = 122;
    pub const KEY_HANJA: u16 = 123;
    pub const KEY_LEFTMETA: u16 = 125;
    pub const KEY_RIGHTMETA: u16 = 126;
    pub const KEY_MAX: u16 = 0x2ff;
}

static NAME_TO_CODE: LazyLock<HashMap<String, u16>> = LazyLock::new(|| {
    use crate::key::codes::*;
    let mut map = HashMap::new();
    for (offset, ch) in (b'A'..=b'Z').enumerate() {
        map.insert(format!("KEY_{}", ch as char), KEY_A_TO_Z[offset]);
    }
    for (offset, ch) in (b'0'..=b'9').enumerate() {
        map.insert(format!("KEY_{}", ch as char), KEY_DIGITS[offset]);
    }
    let named: &[(&str, u16)] = &[
        ("KEY_MINUS", KEY_MINUS),
        ("KEY_EQUAL", KEY_EQUAL),
        ("KEY_LEFTBRACE", KEY_LEFTBRACE),
        ("KEY_RIGHTBRACE", KEY_RIGHTBRACE),
        ("KEY_BACKSLASH", KEY_BACKSLASH),
        ("KEY_SEMICOLON", KEY_SEMICOLON),
        ("KEY_APOSTROPHE", KEY_APOSTROPHE),
        ("KEY_GRAVE", KEY_GRAVE),
        ("KEY_COMMA", KEY_COMMA),
        ("KEY_DOT", KEY_DOT),
        ("KEY_SLASH", KEY_SLASH),
        ("KEY_SPACE", KEY_SPACE),
        ("KEY_TAB", KEY_TAB),
        ("KEY_ENTER", KEY_ENTER),
        ("KEY_ESC", KEY_ESC),
        ("KEY_BACKSPACE", KEY_BACKSPACE),
        ("KEY_LEFTSHIFT", KEY_LEFTSHIFT),
        ("KEY_RIGHTSHIFT", KEY_RIGHTSHIFT),
        ("KEY_LEFTCTRL", KEY_LEFTCTRL),
        ("KEY_RIGHTCTRL", KEY_RIGHTCTRL),
        ("KEY_LEFTALT", KEY_LEFTALT),
        ("KEY_RIGHTALT", KEY_RIGHTALT),
        ("KEY_LEFTMETA", KEY_LEFTMETA),
        ("KEY_RIGHTMETA", KEY_RIGHTMETA),
        ("KEY_HANGUL", KEY_HANGEUL),
        ("KEY_HANGEUL", KEY_HANGEUL),
        ("KEY_HANJA", KEY_HANJA),
        ("KEY_CAPSLOCK", KEY_CAPSLOCK),
        ("KEY_F1", KEY_F1),
        ("KEY_F2", KEY_F2),
        ("KEY_F3", KEY_F3),
        ("KEY_F4", KEY_F4),
        ("KEY_F5", KEY_F5),
        ("KEY_F6", KEY_F6),
        ("KEY_F7", KEY_F7),
        ("KEY_F8", KEY_F8),
        ("KEY_F9", KEY_F9),
        ("KEY_F10", KEY_F10),
        ("KEY_F11", KEY_F11),
        ("KEY_F12", KEY_F12),
    ];
    for (name, code) in named {
        map.insert((*name).to_string(), *code);
    }
    map
});

// Letter and digit rows are not contiguous in keycode space, so spell them out.
const KEY_A_TO_Z: [u16; 26] = [
    30, 48, 46, 32, 18, 33, 34, 35, 23, 36, 37, 38, 50, // A..M
    49, 24, 25, 16, 19, 31, 20, 22, 47, 17, 45, 21, 44, // N..Z
];
const KEY_DIGITS: [u16; 10] = [11, 2, 3, 4, 5, 6, 7, 8, 9, 10];

/// Look up a keycode by its canonical `KEY_*` name (case-insensitive).
pub fn key_from_name(name: &str) -> Option<u16> {
    NAME_TO_CODE.get(&name.to_uppercase()).copied()
}

/// Canonical name for a keycode, for diagnostics.
pub fn key_name(code: u16) -> String {
    NAME_TO_CODE
        .iter()
        .filter(|(_, c)| **c == code)
        .map(|(name, _)| name.as_str())
        .max_by_key(|name| name.len())
        .map(str::to_string)
        .unwrap_or_else(|| format!("KEY_{}", code))
}
