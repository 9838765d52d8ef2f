// src/keys.rs

use bitflags::bitflags;
use serde::{Deserialize, Serialize};

bitflags! {
    /// Represents a keyboard modifier.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
    pub struct Modifiers: u8 {
        const SHIFT = 1 << 0;
        const CONTROL = 1 << 1;
        const ALT = 1 << 2;
    }
}

/// A decoded keypress as delivered by the console frontend.
///
/// Only the keys this editor reacts to get their own variant; everything the
/// decoder cannot classify arrives as `Unknown` and is ignored upstream.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum KeySymbol {
    Char(char),

    Left,
    Right,
    Up,
    Down,

    Enter,
    Backspace,
    Tab,
    Escape,

    #[default]
    Unknown,
}

/// A key symbol plus the modifiers active when it was pressed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct KeyEvent {
    pub symbol: KeySymbol,
    pub modifiers: Modifiers,
}

impl KeyEvent {
    pub fn plain(symbol: KeySymbol) -> Self {
        KeyEvent {
            symbol,
            modifiers: Modifiers::empty(),
        }
    }

    pub fn with_modifiers(symbol: KeySymbol, modifiers: Modifiers) -> Self {
        KeyEvent { symbol, modifiers }
    }
}
