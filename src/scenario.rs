//! Scripted sessions replayed against a headless host.
//!
//! A scenario registers triggers, then runs a list of steps and reports the
//! engine state after each one. Failing steps are reported, not fatal.

use std::collections::BTreeMap;
use std::io;
use std::path::{Path, PathBuf};
use std::rc::Rc;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

use crate::config::LightboxConfig;
use crate::engine::{ClickTarget, Lightbox};
use crate::error::LightboxResult;
use crate::geometry::{Point, Viewport};
use crate::gesture::{PointerEvent, PointerTarget};
use crate::host::{HeadlessHost, HtmlFragment};
use crate::input::{Control, ShortcutKey, ShortcutModifiers};
use crate::media::{SourceRef, Trigger};

pub type ScenarioResult<T> = std::result::Result<T, ScenarioError>;

#[derive(Debug, Error)]
pub enum ScenarioError {
    #[error("failed to read scenario file {path}")]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("failed to parse scenario")]
    Parse(#[from] serde_json::Error),
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Scenario {
    #[serde(default)]
    pub options: Option<Value>,
    #[serde(default)]
    pub viewport: Viewport,
    #[serde(default)]
    pub fragments: BTreeMap<String, HtmlFragment>,
    #[serde(default)]
    pub triggers: Vec<TriggerEntry>,
    #[serde(default)]
    pub steps: Vec<Step>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct TriggerEntry {
    #[serde(flatten)]
    pub trigger: Trigger,
    #[serde(default)]
    pub group: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "action", rename_all = "camelCase")]
pub enum Step {
    Open {
        #[serde(default)]
        index: Option<usize>,
        #[serde(default)]
        group: Option<String>,
    },
    Close,
    Next,
    Prev,
    SelectGroup {
        group: String,
    },
    Add {
        #[serde(flatten)]
        entry: TriggerEntry,
    },
    Remove {
        href: String,
    },
    Key {
        key: ShortcutKey,
        #[serde(default)]
        modifiers: ShortcutModifiers,
    },
    /// Horizontal then vertical swipe distance in pixels.
    Swipe {
        dx: f64,
        #[serde(default)]
        dy: f64,
    },
    Click {
        target: ClickName,
    },
    Destroy,
}

/// Click targets a scenario can name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ClickName {
    Prev,
    Next,
    Close,
    Backdrop,
    Content,
}

impl From<ClickName> for ClickTarget {
    fn from(name: ClickName) -> Self {
        match name {
            ClickName::Prev => Self::Control(Control::Prev),
            ClickName::Next => Self::Control(Control::Next),
            ClickName::Close => Self::Control(Control::Close),
            ClickName::Backdrop => Self::Backdrop,
            ClickName::Content => Self::Content,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RegistrationReport {
    pub href: String,
    pub group: Option<String>,
    pub index: Option<usize>,
    pub error: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StepReport {
    pub step: String,
    pub error: Option<String>,
    pub state: String,
    pub group: Option<String>,
    pub counter: Option<String>,
    pub current: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Replay {
    pub registrations: Vec<RegistrationReport>,
    pub steps: Vec<StepReport>,
    pub fetched: Vec<String>,
}

impl Scenario {
    pub fn from_json_str(raw: &str) -> ScenarioResult<Self> {
        Ok(serde_json::from_str(raw)?)
    }

    pub fn load(path: &Path) -> ScenarioResult<Self> {
        let raw = std::fs::read_to_string(path).map_err(|source| ScenarioError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json_str(&raw)
    }

    /// Runs the scenario on a fresh headless host. `base` is overlaid with the
    /// scenario's own options.
    pub fn replay(&self, base: &LightboxConfig) -> LightboxResult<Replay> {
        let config = match &self.options {
            Some(options) => base.overlay(options)?,
            None => base.clone(),
        };
        let host = Rc::new(
            self.fragments
                .iter()
                .fold(HeadlessHost::new(self.viewport), |host, (selector, fragment)| {
                    host.with_fragment(selector.clone(), fragment.clone())
                }),
        );
        let mut lightbox = Lightbox::new(config, host.clone());
        let mut registered = Vec::new();

        let registrations = self
            .triggers
            .iter()
            .map(|entry| register(&mut lightbox, &mut registered, &entry.trigger, entry.group.as_deref()))
            .collect();

        let steps = self
            .steps
            .iter()
            .map(|step| {
                let outcome = apply(&mut lightbox, &mut registered, step);
                report(&lightbox, step, outcome.err().map(|err| err.to_string()))
            })
            .collect();

        lightbox.destroy()?;
        Ok(Replay {
            registrations,
            steps,
            fetched: host.fetched(),
        })
    }
}

fn register(
    lightbox: &mut Lightbox,
    registered: &mut Vec<SourceRef>,
    trigger: &Trigger,
    group: Option<&str>,
) -> RegistrationReport {
    let source = trigger.clone().into_source();
    let outcome = lightbox.add_trigger(source.clone(), group);
    if outcome.is_ok() {
        registered.push(source);
    }
    RegistrationReport {
        href: trigger.href.clone(),
        group: group.map(str::to_string),
        index: outcome.as_ref().ok().copied(),
        error: outcome.err().map(|err| err.to_string()),
    }
}

fn apply(lightbox: &mut Lightbox, registered: &mut Vec<SourceRef>, step: &Step) -> LightboxResult<()> {
    match step {
        Step::Open { index, group } => lightbox.open(*index, group.as_deref()),
        Step::Close => lightbox.close(),
        Step::Next => lightbox.next(),
        Step::Prev => lightbox.prev(),
        Step::SelectGroup { group } => lightbox.select_group(group),
        Step::Add { entry } => {
            let source = entry.trigger.clone().into_source();
            lightbox.add_trigger(source.clone(), entry.group.as_deref())?;
            registered.push(source);
            Ok(())
        }
        Step::Remove { href } => {
            let Some(position) = registered.iter().position(|source| source.href == *href) else {
                // never registered; the engine reports it as not found
                return lightbox.remove_trigger(&Trigger::link(href.clone()).into_source());
            };
            let source = registered.remove(position);
            lightbox.remove_trigger(&source)
        }
        Step::Key { key, modifiers } => lightbox.handle_key(*key, *modifiers, false).map(|_| ()),
        Step::Swipe { dx, dy } => {
            let origin = Point::default();
            let end = Point::new(*dx, *dy);
            for event in [
                PointerEvent::Down {
                    position: origin,
                    target: PointerTarget::Surface,
                },
                PointerEvent::Move { position: end },
                PointerEvent::Up { position: end },
            ] {
                lightbox.handle_pointer(event)?;
            }
            Ok(())
        }
        Step::Click { target } => lightbox.click((*target).into()),
        Step::Destroy => {
            registered.clear();
            lightbox.destroy()
        }
    }
}

fn report(lightbox: &Lightbox, step: &Step, error: Option<String>) -> StepReport {
    StepReport {
        step: format!("{step:?}"),
        error,
        state: lightbox.machine().to_string(),
        group: lightbox.current_group().map(|group| group.name().to_string()),
        counter: lightbox.counter(),
        current: lightbox.current_slide().map(|slide| slide.source().href.clone()),
    }
}
