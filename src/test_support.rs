use std::cell::{Cell, RefCell};
use std::collections::{HashMap, HashSet};
use std::rc::Rc;

use crate::geometry::Viewport;
use crate::host::{DocumentHost, ElementId, HtmlFragment, InputBindings, MediaHost, PlayerCommand};
use crate::input::Control;

#[derive(Debug, Clone, PartialEq)]
pub(crate) enum HostCall {
    BeginFetch(String),
    AbortFetch(String),
    Player(String, PlayerCommand),
    FocusElement(ElementId),
    FocusControl(Control),
    Bindings(Option<InputBindings>),
    ScrollLocked(bool),
}

#[derive(Debug, Default)]
pub(crate) struct FakeHost {
    viewport: Cell<Viewport>,
    touch: Cell<bool>,
    fragments: RefCell<HashMap<String, HtmlFragment>>,
    completed: RefCell<HashSet<String>>,
    positions: RefCell<HashMap<String, f64>>,
    focused: Cell<Option<ElementId>>,
    calls: RefCell<Vec<HostCall>>,
}

impl FakeHost {
    pub(crate) fn new() -> Rc<Self> {
        Rc::new(Self::default())
    }

    pub(crate) fn set_viewport(&self, viewport: Viewport) {
        self.viewport.set(viewport);
    }

    pub(crate) fn set_touch(&self, touch: bool) {
        self.touch.set(touch);
    }

    pub(crate) fn add_fragment(&self, selector: &str, fragment: HtmlFragment) {
        self.fragments
            .borrow_mut()
            .insert(selector.to_string(), fragment);
    }

    pub(crate) fn complete_fetch(&self, url: &str) {
        self.completed.borrow_mut().insert(url.to_string());
    }

    pub(crate) fn set_position(&self, source: &str, position: f64) {
        self.positions
            .borrow_mut()
            .insert(source.to_string(), position);
    }

    pub(crate) fn set_focused(&self, element: Option<ElementId>) {
        self.focused.set(element);
    }

    pub(crate) fn calls(&self) -> Vec<HostCall> {
        self.calls.borrow().clone()
    }

    pub(crate) fn clear_calls(&self) {
        self.calls.borrow_mut().clear();
    }

    pub(crate) fn fetches(&self) -> Vec<String> {
        self.calls
            .borrow()
            .iter()
            .filter_map(|call| match call {
                HostCall::BeginFetch(url) => Some(url.clone()),
                _ => None,
            })
            .collect()
    }

    pub(crate) fn last_focused_control(&self) -> Option<Control> {
        self.calls.borrow().iter().rev().find_map(|call| match call {
            HostCall::FocusControl(control) => Some(*control),
            _ => None,
        })
    }

    fn record(&self, call: HostCall) {
        self.calls.borrow_mut().push(call);
    }
}

impl MediaHost for FakeHost {
    fn viewport(&self) -> Viewport {
        self.viewport.get()
    }

    fn resolve_fragment(&self, selector: &str) -> Option<HtmlFragment> {
        self.fragments.borrow().get(selector).cloned()
    }

    fn begin_fetch(&self, url: &str) {
        self.record(HostCall::BeginFetch(url.to_string()));
    }

    fn is_fetch_complete(&self, url: &str) -> bool {
        self.completed.borrow().contains(url)
    }

    fn abort_fetch(&self, url: &str) {
        self.record(HostCall::AbortFetch(url.to_string()));
    }

    fn player_command(&self, source: &str, command: PlayerCommand) {
        self.record(HostCall::Player(source.to_string(), command));
    }

    fn playback_position(&self, source: &str) -> Option<f64> {
        self.positions.borrow().get(source).copied()
    }
}

impl DocumentHost for FakeHost {
    fn is_touch_device(&self) -> bool {
        self.touch.get()
    }

    fn focused_element(&self) -> Option<ElementId> {
        self.focused.get()
    }

    fn focus_element(&self, element: ElementId) {
        self.focused.set(Some(element));
        self.record(HostCall::FocusElement(element));
    }

    fn focus_control(&self, control: Control) {
        self.record(HostCall::FocusControl(control));
    }

    fn set_input_bindings(&self, bindings: Option<InputBindings>) {
        self.record(HostCall::Bindings(bindings));
    }

    fn set_scroll_locked(&self, locked: bool) {
        self.record(HostCall::ScrollLocked(locked));
    }
}
