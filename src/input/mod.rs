mod focus;
mod shortcut;

pub use focus::{focus_after_transition, Control, ControlSet, ControlState, FocusTrap};
pub use shortcut::{resolve_shortcut, InputContext, ShortcutAction, ShortcutKey, ShortcutModifiers};

/// Direction of travel through a group.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Next,
    Prev,
}
