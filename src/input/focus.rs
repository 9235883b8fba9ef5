use super::Direction;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Control {
    Prev,
    Next,
    Close,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ControlState {
    pub visible: bool,
    pub enabled: bool,
}

impl ControlState {
    pub const fn focusable(self) -> bool {
        self.visible && self.enabled
    }
}

/// Prev/next/close buttons as they stand after a transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ControlSet {
    pub prev: ControlState,
    pub next: ControlState,
    pub close: ControlState,
}

impl ControlSet {
    pub fn compute(index: usize, len: usize, nav_visible: bool, close_visible: bool) -> Self {
        let nav_visible = nav_visible && len > 1;
        Self {
            prev: ControlState {
                visible: nav_visible,
                enabled: index > 0,
            },
            next: ControlState {
                visible: nav_visible,
                enabled: index + 1 < len,
            },
            close: ControlState {
                visible: close_visible,
                enabled: true,
            },
        }
    }

    pub fn state(&self, control: Control) -> ControlState {
        match control {
            Control::Prev => self.prev,
            Control::Next => self.next,
            Control::Close => self.close,
        }
    }

    pub fn is_focusable(&self, control: Control) -> bool {
        self.state(control).focusable()
    }

    /// Focusable controls in tab order.
    pub fn focusable(&self) -> Vec<Control> {
        [Control::Prev, Control::Next, Control::Close]
            .into_iter()
            .filter(|control| self.is_focusable(*control))
            .collect()
    }

    pub fn trap(&self) -> FocusTrap {
        FocusTrap {
            order: self.focusable(),
        }
    }
}

/// Keeps Tab focus cycling inside the overlay.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FocusTrap {
    order: Vec<Control>,
}

impl FocusTrap {
    pub fn first(&self) -> Option<Control> {
        self.order.first().copied()
    }

    pub fn last(&self) -> Option<Control> {
        self.order.last().copied()
    }

    /// Next control for Tab (or Shift+Tab when `backwards`), wrapping at the ends.
    /// Focus outside the trap lands on the first (or last) control.
    pub fn cycle(&self, current: Option<Control>, backwards: bool) -> Option<Control> {
        let len = self.order.len();
        let position = current.and_then(|control| self.order.iter().position(|c| *c == control));
        match (position, backwards) {
            (None, false) => self.first(),
            (None, true) => self.last(),
            (Some(position), false) => self.order.get((position + 1) % len).copied(),
            (Some(position), true) => self.order.get((position + len - 1) % len).copied(),
        }
    }
}

/// Control that should hold focus once a transition completes. `None`
/// direction means the lightbox was just opened.
pub fn focus_after_transition(controls: &ControlSet, direction: Option<Direction>) -> Option<Control> {
    let (preferred, fallback) = match direction {
        Some(Direction::Prev) => (Control::Prev, Control::Next),
        Some(Direction::Next) | None => (Control::Next, Control::Prev),
    };
    [preferred, fallback, Control::Close]
        .into_iter()
        .find(|control| controls.is_focusable(*control))
}
