//! Platform seams the engine and the media handlers talk through.
//!
//! Everything the engine needs from the surrounding document (fetching,
//! fragment lookup, embedded players, focus, input wiring) goes through these
//! traits so the core stays free of any rendering toolkit.

use std::cell::{Cell, RefCell};
use std::collections::HashMap;

use serde::Deserialize;

use crate::geometry::Viewport;
use crate::input::Control;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ElementId(pub u64);

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HtmlFragment {
    pub markup: String,
    #[serde(default)]
    pub video_source: Option<String>,
}

impl HtmlFragment {
    pub fn new(markup: impl Into<String>) -> Self {
        Self {
            markup: markup.into(),
            video_source: None,
        }
    }

    pub fn with_video(mut self, source: impl Into<String>) -> Self {
        self.video_source = Some(source.into());
        self
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PlayerCommand {
    Play,
    Pause,
    SeekTo(f64),
}

/// Input listeners the engine asks the host to install while open.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct InputBindings {
    pub keyboard: bool,
    pub pointer: bool,
    pub backdrop_click: bool,
    pub focus_trap: bool,
}

pub trait MediaHost {
    fn viewport(&self) -> Viewport;
    fn resolve_fragment(&self, selector: &str) -> Option<HtmlFragment>;
    /// Fire-and-forget; completion is reported through `is_fetch_complete`.
    fn begin_fetch(&self, url: &str);
    fn is_fetch_complete(&self, url: &str) -> bool;
    fn abort_fetch(&self, url: &str);
    fn player_command(&self, source: &str, command: PlayerCommand);
    fn playback_position(&self, source: &str) -> Option<f64>;
}

pub trait DocumentHost {
    fn is_touch_device(&self) -> bool;
    fn focused_element(&self) -> Option<ElementId>;
    fn focus_element(&self, element: ElementId);
    fn focus_control(&self, control: Control);
    /// `None` removes every binding previously installed.
    fn set_input_bindings(&self, bindings: Option<InputBindings>);
    fn set_scroll_locked(&self, locked: bool);
}

/// Host without a document: fetches complete immediately and fragments come
/// from a preloaded table. Used by the replay binary.
#[derive(Debug, Default)]
pub struct HeadlessHost {
    viewport: Viewport,
    fragments: HashMap<String, HtmlFragment>,
    focused: Cell<Option<ElementId>>,
    focused_control: Cell<Option<Control>>,
    fetched: RefCell<Vec<String>>,
}

impl HeadlessHost {
    pub fn new(viewport: Viewport) -> Self {
        Self {
            viewport,
            ..Self::default()
        }
    }

    pub fn with_fragment(mut self, selector: impl Into<String>, fragment: HtmlFragment) -> Self {
        self.fragments.insert(selector.into(), fragment);
        self
    }

    pub fn focused_control(&self) -> Option<Control> {
        self.focused_control.get()
    }

    pub fn fetched(&self) -> Vec<String> {
        self.fetched.borrow().clone()
    }
}

impl MediaHost for HeadlessHost {
    fn viewport(&self) -> Viewport {
        self.viewport
    }

    fn resolve_fragment(&self, selector: &str) -> Option<HtmlFragment> {
        self.fragments.get(selector).cloned()
    }

    fn begin_fetch(&self, url: &str) {
        self.fetched.borrow_mut().push(url.to_string());
    }

    fn is_fetch_complete(&self, _url: &str) -> bool {
        true
    }

    fn abort_fetch(&self, _url: &str) {}

    fn player_command(&self, _source: &str, _command: PlayerCommand) {}

    fn playback_position(&self, _source: &str) -> Option<f64> {
        None
    }
}

impl DocumentHost for HeadlessHost {
    fn is_touch_device(&self) -> bool {
        false
    }

    fn focused_element(&self) -> Option<ElementId> {
        self.focused.get()
    }

    fn focus_element(&self, element: ElementId) {
        self.focused.set(Some(element));
        self.focused_control.set(None);
    }

    fn focus_control(&self, control: Control) {
        self.focused_control.set(Some(control));
    }

    fn set_input_bindings(&self, _bindings: Option<InputBindings>) {}

    fn set_scroll_locked(&self, _locked: bool) {}
}
