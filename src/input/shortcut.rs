use serde::Deserialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub enum ShortcutKey {
    ArrowLeft,
    ArrowRight,
    Escape,
    Tab,
    Enter,
    Character(char),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(default)]
pub struct ShortcutModifiers {
    pub ctrl: bool,
    pub shift: bool,
}

impl ShortcutModifiers {
    pub const fn new(ctrl: bool, shift: bool) -> Self {
        Self { ctrl, shift }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct InputContext {
    pub open: bool,
    pub keyboard_enabled: bool,
    pub text_input_active: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShortcutAction {
    Prev,
    Next,
    Close,
    FocusForward,
    FocusBackward,
}

fn resolve_focus_shortcut(key: ShortcutKey, modifiers: ShortcutModifiers) -> Option<ShortcutAction> {
    match (key, modifiers.ctrl, modifiers.shift) {
        (ShortcutKey::Tab, false, false) => Some(ShortcutAction::FocusForward),
        (ShortcutKey::Tab, false, true) => Some(ShortcutAction::FocusBackward),
        _ => None,
    }
}

fn resolve_navigation_shortcut(
    key: ShortcutKey,
    modifiers: ShortcutModifiers,
    context: InputContext,
) -> Option<ShortcutAction> {
    match (key, modifiers.ctrl) {
        (ShortcutKey::Escape, _) => Some(ShortcutAction::Close),
        // Arrow keys move the caret inside text inputs.
        _ if context.text_input_active => None,
        (ShortcutKey::ArrowLeft, false) => Some(ShortcutAction::Prev),
        (ShortcutKey::ArrowRight, false) => Some(ShortcutAction::Next),
        _ => None,
    }
}

/// Maps a key press to a lightbox action. The focus trap works even with
/// keyboard navigation disabled.
pub fn resolve_shortcut(
    key: ShortcutKey,
    modifiers: ShortcutModifiers,
    context: InputContext,
) -> Option<ShortcutAction> {
    if !context.open {
        return None;
    }

    if let Some(action) = resolve_focus_shortcut(key, modifiers) {
        return Some(action);
    }

    if context.keyboard_enabled {
        return resolve_navigation_shortcut(key, modifiers, context);
    }

    None
}
