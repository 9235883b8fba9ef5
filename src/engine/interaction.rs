use super::Lightbox;
use crate::error::LightboxResult;
use crate::gesture::{self, GestureCommand, GestureContext, PointerEvent};
use crate::input::{
    focus_after_transition, resolve_shortcut, Control, InputContext, ShortcutAction, ShortcutKey,
    ShortcutModifiers,
};

/// Where a click landed inside the overlay.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClickTarget {
    Control(Control),
    /// Outside the displayed content.
    Backdrop,
    Content,
}

impl Lightbox {
    /// Feeds one pointer event through the gesture interpreter and applies the
    /// resulting command. Ignored while closed.
    pub fn handle_pointer(&mut self, event: PointerEvent) -> LightboxResult<Option<GestureCommand>> {
        if !self.is_open() {
            return Ok(None);
        }

        let (drag, command) = gesture::reduce(self.drag, event, self.gesture_context());
        self.drag = drag;
        match command {
            Some(GestureCommand::Offset(offset)) => self.drag_offset = offset,
            Some(GestureCommand::SnapBack) => self.drag_offset = 0.0,
            Some(GestureCommand::Navigate(direction)) => {
                self.drag_offset = 0.0;
                self.navigate(direction)?;
            }
            Some(GestureCommand::Dismiss) => {
                self.drag_offset = 0.0;
                self.close()?;
            }
            None => {}
        }
        Ok(command)
    }

    pub fn handle_key(
        &mut self,
        key: ShortcutKey,
        modifiers: ShortcutModifiers,
        text_input_active: bool,
    ) -> LightboxResult<Option<ShortcutAction>> {
        let context = InputContext {
            open: self.is_open(),
            keyboard_enabled: self.config.keyboard_enabled,
            text_input_active,
        };
        let Some(action) = resolve_shortcut(key, modifiers, context) else {
            return Ok(None);
        };

        tracing::debug!(?key, ?action, "shortcut");
        match action {
            ShortcutAction::Prev => self.prev()?,
            ShortcutAction::Next => self.next()?,
            ShortcutAction::Close => self.close()?,
            ShortcutAction::FocusForward => self.cycle_focus(false),
            ShortcutAction::FocusBackward => self.cycle_focus(true),
        }
        Ok(Some(action))
    }

    /// Hidden or disabled controls ignore clicks; the backdrop closes only
    /// when `docClose` is set.
    pub fn click(&mut self, target: ClickTarget) -> LightboxResult<()> {
        if !self.is_open() {
            return Ok(());
        }
        match target {
            ClickTarget::Control(control) if self.controls.is_focusable(control) => match control {
                Control::Prev => self.prev(),
                Control::Next => self.next(),
                Control::Close => self.close(),
            },
            ClickTarget::Backdrop if self.config.doc_close => self.close(),
            _ => Ok(()),
        }
    }

    /// Focus escaped the overlay; pull it back to the preferred control.
    pub fn focus_escaped(&mut self) {
        if !self.is_open() {
            return;
        }
        self.focused_control = focus_after_transition(&self.controls, None);
        if let Some(control) = self.focused_control {
            self.document.focus_control(control);
        }
    }

    fn cycle_focus(&mut self, backwards: bool) {
        if let Some(control) = self.focus_trap.cycle(self.focused_control, backwards) {
            self.focused_control = Some(control);
            self.document.focus_control(control);
        }
    }

    fn gesture_context(&self) -> GestureContext {
        GestureContext {
            enabled: self.config.draggable && self.current_group().is_some_and(|group| group.len() > 1),
            threshold: self.config.drag_threshold(),
            vertical_dismiss: self.config.vertical_dismiss_enabled,
        }
    }
}
