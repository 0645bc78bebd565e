//! Platform-specific configuration

use crossterm::event::{KeyEvent, KeyModifiers};

/// Platform-appropriate modifier for builder shortcuts
/// - macOS: SUPER (Cmd key)
/// - Linux/Windows: CONTROL (Ctrl key)
#[cfg(target_os = "macos")]
pub const COMMAND_MODIFIER: KeyModifiers = KeyModifiers::SUPER;

#[cfg(not(target_os = "macos"))]
pub const COMMAND_MODIFIER: KeyModifiers = KeyModifiers::CONTROL;

/// Shortcut prefix shown in hints
/// - macOS: "Cmd+"
/// - Linux/Windows: "^"
#[cfg(target_os = "macos")]
pub const SHORTCUT_PREFIX: &str = "Cmd+";

#[cfg(not(target_os = "macos"))]
pub const SHORTCUT_PREFIX: &str = "^";

/// Ctrl works everywhere; Cmd is accepted too where the terminal forwards it
pub fn is_command(key: &KeyEvent) -> bool {
    key.modifiers
        .intersects(KeyModifiers::CONTROL | COMMAND_MODIFIER)
}
