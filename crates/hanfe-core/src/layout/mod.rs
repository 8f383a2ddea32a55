// Hanfe Keyboard Layouts
// Keycode → layout-symbol mapping with built-in dubeolsik / sebeolsik-390

mod dubeolsik;
mod sebeolsik;

use std::collections::HashMap;

use crate::compose::JamoRole;
use crate::config::ConfigError;
use crate::key::codes;

/// What a key produces at one shift level.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SymbolKind {
    /// A jamo for the composer, with its positional role.
    Jamo { jamo: char, role: JamoRole },
    /// Literal text typed as-is.
    Text(String),
    /// Forward the raw event to the virtual device.
    Passthrough,
}

/// A layout symbol plus its commit discipline.
///
/// `commit_before` asks the engine to commit any pending preedit before the
/// symbol itself is processed. Text and passthrough symbols default to true,
/// jamo to false.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LayoutSymbol {
    pub kind: SymbolKind,
    pub commit_before: bool,
}

impl LayoutSymbol {
    pub fn jamo(jamo: char) -> Self {
        Self::jamo_with_role(jamo, JamoRole::Auto)
    }

    pub fn jamo_with_role(jamo: char, role: JamoRole) -> Self {
        Self {
            kind: SymbolKind::Jamo { jamo, role },
            commit_before: false,
        }
    }

    pub fn text(value: &str) -> Self {
        Self {
            kind: SymbolKind::Text(value.to_string()),
            commit_before: true,
        }
    }

    pub fn passthrough() -> Self {
        Self {
            kind: SymbolKind::Passthrough,
            commit_before: true,
        }
    }
}

/// The unshifted and shifted symbols for one keycode.
#[derive(Debug, Clone, Default)]
pub struct LayoutEntry {
    pub normal: Option<LayoutSymbol>,
    pub shifted: Option<LayoutSymbol>,
}

/// A named keycode → symbol mapping.
#[derive(Debug, Clone)]
pub struct Layout {
    name: String,
    mapping: HashMap<u16, LayoutEntry>,
}

impl Layout {
    pub(crate) fn new(name: &str, mapping: HashMap<u16, LayoutEntry>) -> Self {
        Self {
            name: name.to_string(),
            mapping,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Look up the symbol for a keycode at the current shift level.
    ///
    /// Prefers the variant matching the shift state and falls back to the
    /// other; `None` means the key is unmapped and should pass through.
    pub fn translate(&self, keycode: u16, shift_active: bool) -> Option<&LayoutSymbol> {
        let entry = self.mapping.get(&keycode)?;
        if shift_active {
            entry.shifted.as_ref().or(entry.normal.as_ref())
        } else {
            entry.normal.as_ref().or(entry.shifted.as_ref())
        }
    }
}

/// Builder used by the per-layout modules.
pub(crate) struct LayoutBuilder {
    mapping: HashMap<u16, LayoutEntry>,
}

impl LayoutBuilder {
    pub(crate) fn new() -> Self {
        Self {
            mapping: HashMap::new(),
        }
    }

    pub(crate) fn set(
        &mut self,
        keycode: u16,
        normal: LayoutSymbol,
        shifted: Option<LayoutSymbol>,
    ) {
        self.mapping.insert(keycode, LayoutEntry {
            normal: Some(normal),
            shifted,
        });
    }

    pub(crate) fn passthrough(&mut self, keycode: u16) {
        self.set(keycode, LayoutSymbol::passthrough(), None);
    }

    pub(crate) fn build(self, name: &str) -> Layout {
        Layout::new(name, self.mapping)
    }
}

/// Names of the built-in layouts, sorted.
pub fn available_layouts() -> Vec<&'static str> {
    vec!["dubeolsik", "sebeolsik-390"]
}

/// Instantiate a built-in layout by name.
pub fn load_layout(name: &str) -> Result<Layout, ConfigError> {
    match name {
        "dubeolsik" => Ok(dubeolsik::build()),
        "sebeolsik-390" => Ok(sebeolsik::build()),
        _ => Err(ConfigError::UnknownLayout(name.to_string())),
    }
}

/// Hex digit → keycode table for the Ctrl+Shift+U entry protocol.
pub fn unicode_hex_keycodes() -> HashMap<char, u16> {
    use crate::key::codes::*;
    HashMap::from([
        ('0', KEY_0),
        ('1', KEY_1),
        ('2', KEY_2),
        ('3', KEY_3),
        ('4', KEY_4),
        ('5', KEY_5),
        ('6', KEY_6),
        ('7', KEY_7),
        ('8', KEY_8),
        ('9', KEY_9),
        ('a', KEY_A),
        ('b', KEY_B),
        ('c', KEY_C),
        ('d', KEY_D),
        ('e', KEY_E),
        ('f', KEY_F),
    ])
}
