//! The lightbox itself: owns every group, drives slide lifecycles on
//! navigation and keeps controls, focus and input bindings in step.

mod interaction;

use std::rc::Rc;

pub use interaction::ClickTarget;

use crate::config::{LightboxConfig, NavVisibility};
use crate::error::LightboxResult;
use crate::gesture::DragState;
use crate::group::{GroupError, GroupManager, DEFAULT_GROUP};
use crate::host::{DocumentHost, ElementId, InputBindings, MediaHost};
use crate::input::{focus_after_transition, Control, ControlSet, Direction, FocusTrap};
use crate::media::{HandlerRegistry, MediaSettings, SourceRef};
use crate::slide::{Group, Slide};
use crate::state::{Activity, EngineState, NavEvent, StateError, StateMachine};

pub struct Lightbox {
    config: LightboxConfig,
    document: Rc<dyn DocumentHost>,
    groups: GroupManager,
    machine: StateMachine,
    drag: DragState,
    drag_offset: f64,
    focus_origin: Option<ElementId>,
    controls: ControlSet,
    focus_trap: FocusTrap,
    focused_control: Option<Control>,
}

impl Lightbox {
    /// Lightbox with the built-in handlers, all talking to one host.
    pub fn new<H>(config: LightboxConfig, host: Rc<H>) -> Self
    where
        H: MediaHost + DocumentHost + 'static,
    {
        let media: Rc<dyn MediaHost> = host.clone();
        let registry = HandlerRegistry::with_builtin(media, &MediaSettings::from_config(&config));
        Self::with_registry(config, registry, host)
    }

    pub fn with_registry(
        config: LightboxConfig,
        registry: HandlerRegistry,
        document: Rc<dyn DocumentHost>,
    ) -> Self {
        Self {
            config,
            document,
            groups: GroupManager::new(registry),
            machine: StateMachine::new(),
            drag: DragState::Idle,
            drag_offset: 0.0,
            focus_origin: None,
            controls: ControlSet::default(),
            focus_trap: FocusTrap::default(),
            focused_control: None,
        }
    }

    pub fn config(&self) -> &LightboxConfig {
        &self.config
    }

    pub fn groups(&self) -> &GroupManager {
        &self.groups
    }

    /// Custom handlers only affect triggers registered after they are added.
    pub fn registry_mut(&mut self) -> &mut HandlerRegistry {
        self.groups.registry_mut()
    }

    pub fn machine(&self) -> &StateMachine {
        &self.machine
    }

    pub fn state(&self) -> EngineState {
        self.machine.state()
    }

    pub fn is_open(&self) -> bool {
        self.machine.state().is_open()
    }

    /// Registers a trigger into `group` (the default group when `None`).
    /// While open on that group the new slide is navigable immediately.
    pub fn add_trigger(&mut self, source: SourceRef, group: Option<&str>) -> LightboxResult<usize> {
        let group_name = group.unwrap_or(DEFAULT_GROUP);
        let index = self
            .groups
            .add_slide(group_name, source)
            .inspect_err(|err| {
                tracing::warn!(group = group_name, %err, "rejected trigger registration");
            })?;
        tracing::debug!(group = group_name, index, "registered trigger");

        if self.is_open() && group_name == self.groups.active_group_name() {
            let group = self.groups.resolve_group_mut(group_name)?;
            if group.current_index().map(|current| current + 1) == Some(index) {
                group.with_slide(Some(index), Slide::preload);
            }
            self.refresh_controls();
        }
        Ok(index)
    }

    /// Registers each trigger in order. One failure does not stop the rest.
    pub fn add_triggers<I>(&mut self, sources: I, group: Option<&str>) -> Vec<LightboxResult<usize>>
    where
        I: IntoIterator<Item = SourceRef>,
    {
        sources
            .into_iter()
            .map(|source| self.add_trigger(source, group))
            .collect()
    }

    /// Unregisters a trigger from every group that holds it. Removing the
    /// displayed slide moves to its next neighbour (or the previous one at the
    /// end) first, and closes the lightbox when it was the only slide.
    pub fn remove_trigger(&mut self, source: &SourceRef) -> LightboxResult<()> {
        let locations = self.groups.locations(source)?;
        let active = self.groups.active_group_name().to_string();
        let displayed = locations
            .iter()
            .find(|(group_name, _)| *group_name == active)
            .map(|(_, index)| *index)
            .filter(|_| self.is_open());

        if let Some(index) = displayed.filter(|index| self.current_index() == Some(*index)) {
            let len = self.position().map_or(0, |(_, len)| len);
            if len <= 1 {
                self.close()?;
            } else if index + 1 < len {
                self.step(Direction::Next, false)?;
            } else {
                self.step(Direction::Prev, false)?;
            }
        }

        for (group_name, index) in &locations {
            self.groups.remove_slide(group_name, source)?;
            tracing::debug!(group = %group_name, index, "removed trigger");
        }

        if displayed.is_some() && self.is_open() {
            let group = self.active_group_mut()?;
            let current = group.current_index();
            group.with_slide(current.and_then(|i| i.checked_sub(1)), Slide::preload);
            group.with_slide(current.map(|i| i + 1), Slide::preload);
            self.refresh_controls();
            if !self
                .focused_control
                .is_some_and(|control| self.controls.is_focusable(control))
            {
                self.apply_focus(None);
            }
        }
        Ok(())
    }

    /// Opens `group` (the active group when `None`) at `index` (0 when `None`).
    /// While already open this switches slide or group in place.
    pub fn open(&mut self, index: Option<usize>, group: Option<&str>) -> LightboxResult<()> {
        let group_name = group.map_or_else(|| self.groups.active_group_name().to_string(), str::to_string);
        let index = index.unwrap_or(0);
        let len = self.groups.resolve_group(&group_name)?.len();
        if len == 0 {
            return Err(GroupError::EmptyGroup(group_name).into());
        }
        if index >= len {
            return Err(GroupError::IndexOutOfRange {
                group: group_name,
                index,
                len,
            }
            .into());
        }

        let was_open = self.is_open();
        if was_open
            && group_name == self.groups.active_group_name()
            && self.current_index() == Some(index)
        {
            let err = StateError::AlreadyOpen {
                group: group_name,
                index,
            };
            tracing::warn!(%err, "rejected open");
            return Err(err.into());
        }

        self.run_transition(NavEvent::Open, |engine| {
            if was_open {
                let previous = engine.active_group_mut()?;
                let current = previous.current_index();
                previous.with_slide(current, Slide::deactivate);
            } else {
                engine.focus_origin = engine.document.focused_element();
            }

            engine.groups.set_active(&group_name)?;
            let group = engine.active_group_mut()?;
            group.set_current_index(index);
            engine.reset_drag();

            if !was_open {
                engine.document.set_input_bindings(Some(engine.input_bindings()));
                if engine.config.hide_scrollbar_while_open {
                    engine.document.set_scroll_locked(true);
                }
            }

            let group = engine.active_group_mut()?;
            group.with_slide(Some(index), Slide::activate);
            group.with_slide(index.checked_sub(1), Slide::preload);
            group.with_slide(Some(index + 1), Slide::preload);
            Ok(())
        })?;

        tracing::info!(group = %group_name, index, "lightbox opened");
        self.refresh_controls();
        self.apply_focus(None);
        Ok(())
    }

    /// Closes the overlay, unloading every slide and rewinding opened groups
    /// to their first slide.
    pub fn close(&mut self) -> LightboxResult<()> {
        self.machine.transition(NavEvent::Close)?;
        self.document.set_input_bindings(None);

        if let Ok(group) = self.active_group_mut() {
            let current = group.current_index();
            group.with_slide(current, |slide| {
                slide.deactivate();
                slide.dispose();
            });
        }
        for group in self.groups.groups_mut() {
            group.slides_mut().for_each(Slide::dispose);
            group.rewind();
        }

        if let Some(element) = self.focus_origin.take() {
            self.document.focus_element(element);
        }
        if self.config.hide_scrollbar_while_open {
            self.document.set_scroll_locked(false);
        }
        self.reset_drag();
        self.controls = ControlSet::default();
        self.focus_trap = FocusTrap::default();
        self.focused_control = None;

        tracing::info!(group = self.groups.active_group_name(), "lightbox closed");
        Ok(())
    }

    pub fn next(&mut self) -> LightboxResult<()> {
        self.navigate(Direction::Next)
    }

    pub fn prev(&mut self) -> LightboxResult<()> {
        self.navigate(Direction::Prev)
    }

    /// Makes `name` the group that `open(None, None)` targets. Closed only.
    pub fn select_group(&mut self, name: &str) -> LightboxResult<()> {
        self.machine.ensure(NavEvent::SelectGroup)?;
        self.groups.set_active(name)?;
        self.machine.transition(NavEvent::SelectGroup)?;
        tracing::debug!(group = name, "selected group");
        Ok(())
    }

    /// Closes if open, releases every slide and forgets every group.
    pub fn destroy(&mut self) -> LightboxResult<()> {
        if self.is_open() {
            self.close()?;
        }
        self.groups.clear();
        self.machine.reset();
        self.focus_origin = None;
        tracing::info!("lightbox destroyed");
        Ok(())
    }

    pub fn current_group(&self) -> Option<&Group> {
        self.groups.active_group()
    }

    /// Index of the displayed slide; `None` while closed.
    pub fn current_index(&self) -> Option<usize> {
        if !self.is_open() {
            return None;
        }
        self.current_group().and_then(Group::current_index)
    }

    /// The displayed slide; `None` while closed.
    pub fn current_slide(&self) -> Option<&Slide> {
        if !self.is_open() {
            return None;
        }
        self.current_group().and_then(Group::current_slide)
    }

    /// "i/n" for the displayed slide.
    pub fn counter(&self) -> Option<String> {
        self.position()
            .map(|(index, len)| format!("{}/{}", index + 1, len))
    }

    pub fn counter_visible(&self) -> bool {
        self.config.counter_enabled && self.position().is_some_and(|(_, len)| len > 1)
    }

    pub fn controls(&self) -> ControlSet {
        self.controls
    }

    pub fn focus_trap(&self) -> &FocusTrap {
        &self.focus_trap
    }

    pub fn focused_control(&self) -> Option<Control> {
        self.focused_control
    }

    pub fn drag_state(&self) -> DragState {
        self.drag
    }

    /// Horizontal offset of the slide track while a drag is in progress.
    pub fn drag_offset_px(&self) -> f64 {
        self.drag_offset
    }

    /// Track translation that puts the displayed slide in view.
    pub fn track_offset_percent(&self) -> f64 {
        self.position()
            .map_or(0.0, |(index, _)| -(index as f64) * 100.0)
    }

    fn position(&self) -> Option<(usize, usize)> {
        let index = self.current_index()?;
        let len = self.current_group()?.len();
        Some((index, len))
    }

    fn active_group_mut(&mut self) -> LightboxResult<&mut Group> {
        let name = self.groups.active_group_name().to_string();
        Ok(self.groups.resolve_group_mut(&name)?)
    }

    /// Runs `effects` inside a single-flight transition. The machine settles
    /// even when an effect fails.
    fn run_transition<F>(&mut self, event: NavEvent, effects: F) -> LightboxResult<()>
    where
        F: FnOnce(&mut Self) -> LightboxResult<()>,
    {
        self.machine.transition(event)?;
        let outcome = effects(self);
        self.machine.transition(NavEvent::Settle)?;
        debug_assert_eq!(self.machine.state(), EngineState::Open(Activity::Idle));
        outcome
    }

    pub(crate) fn navigate(&mut self, direction: Direction) -> LightboxResult<()> {
        self.step(direction, true)
    }

    /// Moves one slide in `direction`. With `release` the slide two positions
    /// behind the new one is disposed; without it every slide stays warm.
    fn step(&mut self, direction: Direction, release: bool) -> LightboxResult<()> {
        let event = match direction {
            Direction::Next => NavEvent::Next,
            Direction::Prev => NavEvent::Prev,
        };
        self.machine.ensure(event)?;

        let Some((index, len)) = self.position() else {
            return Ok(());
        };
        let target = match direction {
            Direction::Next if index + 1 < len => index + 1,
            Direction::Prev if index > 0 => index - 1,
            _ => {
                tracing::debug!(?direction, index, len, "already at group boundary");
                return Ok(());
            }
        };

        self.run_transition(event, |engine| {
            engine.reset_drag();
            let group = engine.active_group_mut()?;
            group.with_slide(Some(index), Slide::deactivate);
            group.set_current_index(target);
            group.with_slide(Some(target), Slide::activate);

            let (behind, warm) = match direction {
                Direction::Next => (target.checked_sub(2), Some(target + 1)),
                Direction::Prev => (Some(target + 2), target.checked_sub(1)),
            };
            if release {
                group.with_slide(behind, Slide::dispose);
            }
            group.with_slide(warm, Slide::preload);
            Ok(())
        })?;

        tracing::debug!(?direction, from = index, to = target, "navigated");
        self.refresh_controls();
        self.apply_focus(Some(direction));
        Ok(())
    }

    fn nav_visible(&self) -> bool {
        match self.config.nav_visibility {
            NavVisibility::Always => true,
            NavVisibility::Never => false,
            NavVisibility::Auto => !self.document.is_touch_device(),
        }
    }

    fn refresh_controls(&mut self) {
        self.controls = match self.position() {
            Some((index, len)) => {
                ControlSet::compute(index, len, self.nav_visible(), self.config.close_enabled)
            }
            None => ControlSet::default(),
        };
        self.focus_trap = self.controls.trap();
    }

    fn apply_focus(&mut self, direction: Option<Direction>) {
        self.focused_control = focus_after_transition(&self.controls, direction);
        if let Some(control) = self.focused_control {
            self.document.focus_control(control);
        }
    }

    fn input_bindings(&self) -> InputBindings {
        InputBindings {
            keyboard: self.config.keyboard_enabled,
            pointer: self.config.draggable,
            backdrop_click: self.config.doc_close,
            focus_trap: true,
        }
    }

    fn reset_drag(&mut self) {
        self.drag = DragState::Idle;
        self.drag_offset = 0.0;
    }
}

impl Drop for Lightbox {
    fn drop(&mut self) {
        if let Err(err) = self.destroy() {
            tracing::warn!(%err, "failed to tear down lightbox");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::LightboxError;
    use crate::host::HtmlFragment;
    use crate::media::{MediaError, MediaKind, Trigger};
    use crate::slide::MediaState;
    use crate::test_support::{FakeHost, HostCall};

    fn image(href: &str) -> SourceRef {
        Trigger::link(href).into_source()
    }

    fn lightbox_with(host: &Rc<FakeHost>, config: LightboxConfig, hrefs: &[&str]) -> (Lightbox, Vec<SourceRef>) {
        let mut lightbox = Lightbox::new(config, host.clone());
        let sources = hrefs.iter().map(|href| image(href)).collect::<Vec<_>>();
        for source in &sources {
            lightbox.add_trigger(source.clone(), None).expect("image trigger");
        }
        (lightbox, sources)
    }

    fn lightbox(host: &Rc<FakeHost>, hrefs: &[&str]) -> (Lightbox, Vec<SourceRef>) {
        lightbox_with(host, LightboxConfig::default(), hrefs)
    }

    fn states(lightbox: &Lightbox) -> Vec<MediaState> {
        lightbox
            .current_group()
            .map(Group::media_states)
            .unwrap_or_default()
    }

    fn loaded_count(lightbox: &Lightbox) -> usize {
        states(lightbox)
            .into_iter()
            .filter(|state| *state == MediaState::Loaded)
            .count()
    }

    #[test]
    fn open_loads_target_and_preloads_neighbours() {
        let host = FakeHost::new();
        let (mut lightbox, _) = lightbox(&host, &["a.png", "b.png", "c.png"]);

        lightbox.open(Some(1), None).expect("open");

        assert_eq!(lightbox.state(), EngineState::Open(Activity::Idle));
        assert_eq!(
            states(&lightbox),
            vec![MediaState::Preloaded, MediaState::Loaded, MediaState::Preloaded]
        );
        assert_eq!(lightbox.counter().as_deref(), Some("2/3"));
        assert_eq!(lightbox.track_offset_percent(), -100.0);
    }

    #[test]
    fn next_moves_window_and_releases_slide_two_behind() {
        let host = FakeHost::new();
        let (mut lightbox, sources) = lightbox(&host, &["a.png", "b.png", "c.png"]);
        lightbox.open(Some(1), None).expect("open");

        lightbox.next().expect("next");

        assert_eq!(lightbox.current_index(), Some(2));
        assert_eq!(lightbox.counter().as_deref(), Some("3/3"));
        assert_eq!(
            states(&lightbox),
            vec![MediaState::Unloaded, MediaState::Left, MediaState::Loaded]
        );
        assert_eq!(lightbox.current_slide().map(Slide::source), Some(&sources[2]));
    }

    #[test]
    fn navigation_at_boundaries_is_a_no_op() {
        let host = FakeHost::new();
        let (mut lightbox, _) = lightbox(&host, &["a.png", "b.png"]);
        lightbox.open(None, None).expect("open");
        let history = lightbox.machine().history().count();

        lightbox.prev().expect("prev at first slide");
        assert_eq!(lightbox.current_index(), Some(0));

        lightbox.next().expect("next");
        lightbox.next().expect("next at last slide");
        assert_eq!(lightbox.current_index(), Some(1));
        assert_eq!(lightbox.machine().history().count(), history + 2);
    }

    #[test]
    fn navigation_while_closed_is_rejected() {
        let host = FakeHost::new();
        let (mut lightbox, _) = lightbox(&host, &["a.png", "b.png"]);

        assert!(matches!(
            lightbox.next(),
            Err(LightboxError::State(StateError::InvalidStateTransition { .. }))
        ));
        assert!(matches!(
            lightbox.close(),
            Err(LightboxError::State(StateError::AlreadyClosed))
        ));
        assert_eq!(lightbox.state(), EngineState::Closed);
    }

    #[test]
    fn at_most_one_slide_is_loaded_through_any_sequence() {
        let host = FakeHost::new();
        let (mut lightbox, _) = lightbox(&host, &["a.png", "b.png", "c.png", "d.png", "e.png"]);
        lightbox.open(Some(2), None).expect("open");

        for step in ["n", "n", "n", "p", "p", "p", "p", "p", "n"] {
            match step {
                "n" => lightbox.next().expect("next"),
                _ => lightbox.prev().expect("prev"),
            }
            assert_eq!(loaded_count(&lightbox), 1);
            assert_eq!(lightbox.state(), EngineState::Open(Activity::Idle));
        }
        lightbox.open(Some(4), None).expect("jump");
        assert_eq!(loaded_count(&lightbox), 1);
    }

    #[test]
    fn reopening_the_displayed_slide_is_rejected() {
        let host = FakeHost::new();
        let (mut lightbox, _) = lightbox(&host, &["a.png", "b.png"]);
        lightbox.open(Some(1), None).expect("open");

        let err = lightbox.open(Some(1), None).expect_err("already showing");
        assert!(matches!(
            err,
            LightboxError::State(StateError::AlreadyOpen { index: 1, .. })
        ));
        assert_eq!(lightbox.current_index(), Some(1));

        lightbox.open(Some(0), None).expect("switch slide in place");
        assert_eq!(lightbox.current_index(), Some(0));
        assert_eq!(states(&lightbox), vec![MediaState::Loaded, MediaState::Left]);
    }

    #[test]
    fn open_validates_group_and_index_before_changing_state() {
        let host = FakeHost::new();
        let (mut lightbox, _) = lightbox(&host, &["a.png"]);

        assert!(matches!(
            lightbox.open(None, Some("missing")),
            Err(LightboxError::Group(GroupError::UnknownGroup(_)))
        ));
        assert!(matches!(
            lightbox.open(Some(5), None),
            Err(LightboxError::Group(GroupError::IndexOutOfRange { index: 5, len: 1, .. }))
        ));
        assert_eq!(lightbox.state(), EngineState::Closed);
        assert!(host.calls().is_empty());
    }

    #[test]
    fn open_then_close_restores_closed_state_and_focus() {
        let host = FakeHost::new();
        host.set_focused(Some(ElementId(7)));
        let (mut lightbox, _) = lightbox(&host, &["a.png", "b.png", "c.png"]);

        lightbox.open(Some(2), None).expect("open");
        lightbox.close().expect("close");

        assert_eq!(lightbox.state(), EngineState::Closed);
        assert_eq!(lightbox.current_group().and_then(Group::current_index), Some(0));
        assert!(lightbox.current_slide().is_none());
        assert!(states(&lightbox)
            .iter()
            .all(|state| *state == MediaState::Unloaded));

        let calls = host.calls();
        assert_eq!(
            calls.iter().filter(|call| matches!(call, HostCall::ScrollLocked(_))).collect::<Vec<_>>(),
            vec![&HostCall::ScrollLocked(true), &HostCall::ScrollLocked(false)]
        );
        assert!(calls.contains(&HostCall::Bindings(None)));
        assert_eq!(calls.last(), Some(&HostCall::ScrollLocked(false)));
        assert!(calls.contains(&HostCall::FocusElement(ElementId(7))));
    }

    #[test]
    fn open_installs_bindings_from_config() {
        let host = FakeHost::new();
        let config = LightboxConfig {
            keyboard_enabled: false,
            doc_close: false,
            hide_scrollbar_while_open: false,
            ..LightboxConfig::default()
        };
        let (mut lightbox, _) = lightbox_with(&host, config, &["a.png"]);
        lightbox.open(None, None).expect("open");

        let calls = host.calls();
        assert!(calls.contains(&HostCall::Bindings(Some(InputBindings {
            keyboard: false,
            pointer: true,
            backdrop_click: false,
            focus_trap: true,
        }))));
        assert!(!calls.iter().any(|call| matches!(call, HostCall::ScrollLocked(_))));
    }

    #[test]
    fn select_group_is_rejected_while_open() {
        let host = FakeHost::new();
        let mut lightbox = Lightbox::new(LightboxConfig::default(), host.clone());
        lightbox.add_trigger(image("a.png"), Some("g1")).expect("add");
        lightbox.add_trigger(image("b.png"), Some("g2")).expect("add");

        lightbox.select_group("g1").expect("closed");
        lightbox.open(None, None).expect("open g1");
        assert!(matches!(
            lightbox.select_group("g2"),
            Err(LightboxError::State(StateError::EngineOpen))
        ));
        assert_eq!(lightbox.groups().active_group_name(), "g1");

        lightbox.close().expect("close");
        lightbox.select_group("g2").expect("closed again");
        assert_eq!(lightbox.groups().active_group_name(), "g2");
        assert!(matches!(
            lightbox.select_group("nope"),
            Err(LightboxError::Group(GroupError::UnknownGroup(_)))
        ));
    }

    #[test]
    fn open_on_another_group_while_open_keeps_the_old_group_state() {
        let host = FakeHost::new();
        let mut lightbox = Lightbox::new(LightboxConfig::default(), host.clone());
        for href in ["a.png", "b.png"] {
            lightbox.add_trigger(image(href), Some("g1")).expect("add");
        }
        lightbox.add_trigger(image("z.png"), Some("g2")).expect("add");

        lightbox.open(Some(1), Some("g1")).expect("open g1");
        lightbox.open(None, Some("g2")).expect("switch to g2");

        assert_eq!(lightbox.groups().active_group_name(), "g2");
        let g1 = lightbox.groups().resolve_group("g1").expect("g1");
        assert_eq!(g1.current_index(), Some(1));
        assert_eq!(g1.media_states(), vec![MediaState::Preloaded, MediaState::Left]);
        assert_eq!(states(&lightbox), vec![MediaState::Loaded]);

        lightbox.close().expect("close");
        let g1 = lightbox.groups().resolve_group("g1").expect("g1");
        assert_eq!(g1.current_index(), Some(0));
        assert!(g1.media_states().iter().all(|state| *state == MediaState::Unloaded));
    }

    #[test]
    fn duplicate_and_unsupported_triggers_are_reported_per_item() {
        let host = FakeHost::new();
        let mut lightbox = Lightbox::new(LightboxConfig::default(), host.clone());
        let x = image("x.png");

        let results = lightbox.add_triggers([x.clone(), image("notes.txt"), x, image("y.gif")], Some("g1"));

        assert_eq!(results.len(), 4);
        assert_eq!(results[0].as_ref().ok(), Some(&0));
        assert!(matches!(
            results[1].as_ref().map_err(LightboxError::media),
            Err(Some(MediaError::Unsupported { .. }))
        ));
        assert!(matches!(
            results[2],
            Err(LightboxError::Group(GroupError::DuplicateSlide { .. }))
        ));
        assert_eq!(results[3].as_ref().ok(), Some(&1));
        assert_eq!(lightbox.groups().resolve_group("g1").map(Group::len).ok(), Some(2));
    }

    #[test]
    fn trigger_added_while_open_is_navigable_without_reopening() {
        let host = FakeHost::new();
        let (mut lightbox, _) = lightbox(&host, &["a.png", "b.png"]);
        lightbox.open(Some(1), None).expect("open");
        assert!(!lightbox.controls().next.enabled);

        let c = image("c.png");
        lightbox.add_trigger(c.clone(), None).expect("live add");

        assert_eq!(lightbox.counter().as_deref(), Some("2/3"));
        assert!(lightbox.controls().next.enabled);
        assert_eq!(states(&lightbox)[2], MediaState::Preloaded);

        lightbox.next().expect("next");
        assert_eq!(lightbox.current_slide().map(Slide::source), Some(&c));
    }

    #[test]
    fn removing_the_displayed_slide_moves_to_a_neighbour() {
        let host = FakeHost::new();
        let (mut lightbox, sources) = lightbox(&host, &["a.png", "b.png", "c.png"]);
        lightbox.open(Some(1), None).expect("open");

        lightbox.remove_trigger(&sources[1]).expect("remove b");
        assert_eq!(lightbox.current_slide().map(Slide::source), Some(&sources[2]));
        assert_eq!(lightbox.counter().as_deref(), Some("2/2"));
        assert_eq!(states(&lightbox), vec![MediaState::Preloaded, MediaState::Loaded]);

        lightbox.remove_trigger(&sources[2]).expect("remove c");
        assert_eq!(lightbox.current_slide().map(Slide::source), Some(&sources[0]));
        assert_eq!(lightbox.counter().as_deref(), Some("1/1"));
        assert!(!lightbox.counter_visible());

        lightbox.remove_trigger(&sources[0]).expect("remove a");
        assert_eq!(lightbox.state(), EngineState::Closed);
        assert!(matches!(
            lightbox.open(None, None),
            Err(LightboxError::Group(GroupError::EmptyGroup(_)))
        ));
    }

    #[test]
    fn removing_the_displayed_slide_keeps_its_neighbours_warm() {
        let host = FakeHost::new();
        host.add_fragment("#clip", HtmlFragment::new("<video></video>").with_video("v.mp4"));
        let config = LightboxConfig {
            autoplay_video: true,
            ..LightboxConfig::default()
        };
        let mut lightbox = Lightbox::new(config, host.clone());
        let clip = Trigger::link("#")
            .with_attribute("data-type", "html")
            .with_attribute("data-target", "#clip")
            .into_source();
        let (b, c) = (image("b.png"), image("c.png"));
        for source in [&clip, &b, &c] {
            lightbox.add_trigger(source.clone(), None).expect("add");
        }
        lightbox.open(None, None).expect("open");
        host.set_position("v.mp4", 42.0);
        lightbox.next().expect("next");
        host.clear_calls();

        lightbox.remove_trigger(&b).expect("remove b");

        assert_eq!(lightbox.current_slide().map(Slide::source), Some(&c));
        assert_eq!(states(&lightbox), vec![MediaState::Left, MediaState::Loaded]);
        assert!(!host
            .calls()
            .iter()
            .any(|call| matches!(call, HostCall::AbortFetch(_))));
        let video = lightbox
            .current_group()
            .and_then(|group| group.slide(0))
            .and_then(|slide| slide.container().html())
            .and_then(|html| html.video.clone())
            .expect("clip keeps its video");
        assert!(video.fetch_started);
        assert_eq!(video.resume_at, Some(42.0));
    }

    #[test]
    fn removing_a_shared_trigger_drops_it_from_every_group() {
        let host = FakeHost::new();
        let mut lightbox = Lightbox::new(LightboxConfig::default(), host.clone());
        let shared = image("x.png");
        lightbox.add_trigger(image("a.png"), Some("g1")).expect("add");
        lightbox.add_trigger(shared.clone(), Some("g1")).expect("add");
        lightbox.add_trigger(shared.clone(), Some("g2")).expect("add");
        lightbox.add_trigger(image("b.png"), Some("g2")).expect("add");
        lightbox.open(Some(0), Some("g2")).expect("open g2 on the shared slide");

        lightbox.remove_trigger(&shared).expect("remove");

        for name in ["g1", "g2"] {
            let group = lightbox.groups().resolve_group(name).expect("group");
            assert!(!group.contains(&shared), "{name} still holds x.png");
            assert_eq!(group.len(), 1);
        }
        assert_eq!(lightbox.current_slide().map(|slide| slide.source().href.as_str()), Some("b.png"));
        assert!(matches!(
            lightbox.remove_trigger(&shared),
            Err(LightboxError::Group(GroupError::SourceNotFound { .. }))
        ));
    }

    #[test]
    fn removing_an_unknown_trigger_reports_not_found() {
        let host = FakeHost::new();
        let (mut lightbox, _) = lightbox(&host, &["a.png"]);
        assert!(matches!(
            lightbox.remove_trigger(&image("a.png")),
            Err(LightboxError::Group(GroupError::SourceNotFound { .. }))
        ));
    }

    #[test]
    fn focus_follows_navigation_and_falls_back_at_the_end() {
        let host = FakeHost::new();
        let (mut lightbox, _) = lightbox(&host, &["a.png", "b.png", "c.png"]);

        lightbox.open(None, None).expect("open");
        assert_eq!(host.last_focused_control(), Some(Control::Next));

        lightbox.next().expect("next");
        lightbox.next().expect("next");
        assert_eq!(lightbox.focused_control(), Some(Control::Prev));
        assert_eq!(host.last_focused_control(), Some(Control::Prev));

        lightbox.prev().expect("prev");
        assert_eq!(lightbox.focused_control(), Some(Control::Prev));
    }

    #[test]
    fn touch_hosts_hide_navigation_in_auto_mode() {
        let host = FakeHost::new();
        host.set_touch(true);
        let (mut lightbox, _) = lightbox(&host, &["a.png", "b.png"]);
        lightbox.open(None, None).expect("open");

        assert!(!lightbox.controls().next.visible);
        assert_eq!(lightbox.focused_control(), Some(Control::Close));
        assert_eq!(lightbox.focus_trap().first(), Some(Control::Close));
    }

    #[test]
    fn destroy_closes_and_forgets_everything() {
        let host = FakeHost::new();
        let (mut lightbox, _) = lightbox(&host, &["a.png", "b.png"]);
        lightbox.open(None, None).expect("open");

        lightbox.destroy().expect("destroy");

        assert_eq!(lightbox.state(), EngineState::Closed);
        assert!(lightbox.groups().group_names().is_empty());
        assert_eq!(lightbox.machine().history().count(), 0);
        assert!(lightbox.current_group().is_none());
    }

    #[test]
    fn dropping_an_open_lightbox_releases_bindings() {
        let host = FakeHost::new();
        {
            let (mut lightbox, _) = lightbox(&host, &["a.png"]);
            lightbox.open(None, None).expect("open");
            host.clear_calls();
        }
        assert!(host.calls().contains(&HostCall::Bindings(None)));
    }

    #[test]
    fn custom_handler_applies_to_later_registrations() {
        use crate::media::{MediaHandler, MediaResult, SlideContainer};

        struct Noop;

        impl MediaHandler for Noop {
            fn kind(&self) -> MediaKind {
                MediaKind::Custom("noop")
            }
            fn detect(&self, trigger: &Trigger) -> bool {
                trigger.data_type() == Some("noop")
            }
            fn initialize(&self, _trigger: &Trigger, _container: &mut SlideContainer) -> MediaResult<()> {
                Ok(())
            }
            fn preload(&self, _container: &mut SlideContainer) {}
            fn activate(&self, _container: &mut SlideContainer) {}
            fn deactivate(&self, _container: &mut SlideContainer) {}
            fn dispose(&self, _container: &mut SlideContainer) {}
        }

        let host = FakeHost::new();
        let mut lightbox = Lightbox::new(LightboxConfig::default(), host.clone());
        let noop = Trigger::link("#").with_attribute("data-type", "noop").into_source();
        assert!(lightbox.add_trigger(noop.clone(), None).is_err());

        lightbox.registry_mut().register(Rc::new(Noop));
        lightbox.add_trigger(noop, None).expect("custom kind");
        assert_eq!(
            lightbox.current_group().and_then(|group| group.slide(0)).map(Slide::kind),
            Some(MediaKind::Custom("noop"))
        );
    }

    #[test]
    fn custom_handlers_keep_their_own_render_handle() {
        use crate::media::{MediaHandler, MediaResult, RenderHandle, SlideContainer};

        #[derive(Debug, Default, PartialEq)]
        struct Viewer {
            page: u32,
            shown: u32,
            released: bool,
        }

        struct PdfViewer;

        impl MediaHandler for PdfViewer {
            fn kind(&self) -> MediaKind {
                MediaKind::Custom("pdf")
            }
            fn detect(&self, trigger: &Trigger) -> bool {
                trigger.href.ends_with(".pdf")
            }
            fn initialize(&self, _trigger: &Trigger, container: &mut SlideContainer) -> MediaResult<()> {
                container.set_handle(RenderHandle::Custom(Box::new(Viewer {
                    page: 1,
                    ..Viewer::default()
                })));
                Ok(())
            }
            fn preload(&self, _container: &mut SlideContainer) {}
            fn activate(&self, container: &mut SlideContainer) {
                if let Some(viewer) = container.custom_mut::<Viewer>() {
                    viewer.shown += 1;
                    viewer.released = false;
                }
            }
            fn deactivate(&self, _container: &mut SlideContainer) {}
            fn dispose(&self, container: &mut SlideContainer) {
                if let Some(viewer) = container.custom_mut::<Viewer>() {
                    viewer.page = 1;
                    viewer.released = true;
                }
            }
        }

        fn viewer(lightbox: &Lightbox, index: usize) -> Option<&Viewer> {
            lightbox
                .groups()
                .resolve_group(DEFAULT_GROUP)
                .ok()
                .and_then(|group| group.slide(index))
                .and_then(|slide| slide.container().custom::<Viewer>())
        }

        let host = FakeHost::new();
        let mut lightbox = Lightbox::new(LightboxConfig::default(), host.clone());
        lightbox.registry_mut().prepend(Rc::new(PdfViewer));
        lightbox.add_trigger(image("manual.pdf"), None).expect("pdf");
        lightbox.add_trigger(image("cover.png"), None).expect("png");
        assert_eq!(
            viewer(&lightbox, 0),
            Some(&Viewer {
                page: 1,
                shown: 0,
                released: false
            })
        );
        assert!(lightbox
            .current_group()
            .and_then(|group| group.slide(1))
            .and_then(|slide| slide.container().custom::<Viewer>())
            .is_none());

        lightbox.open(None, None).expect("open");
        assert_eq!(viewer(&lightbox, 0).map(|viewer| viewer.shown), Some(1));

        lightbox.close().expect("close");
        assert_eq!(
            viewer(&lightbox, 0),
            Some(&Viewer {
                page: 1,
                shown: 1,
                released: true
            })
        );
    }
}
