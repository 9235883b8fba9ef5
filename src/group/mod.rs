//! Named galleries and the slides registered into them.

use std::collections::BTreeMap;

use thiserror::Error;

use crate::media::{HandlerRegistry, MediaError, SourceRef};
use crate::slide::{Group, Slide};

pub const DEFAULT_GROUP: &str = "default";

pub type GroupResult<T> = std::result::Result<T, GroupError>;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GroupError {
    #[error("trigger {href} is already registered in group {group}")]
    DuplicateSlide { group: String, href: String },
    #[error("trigger {href} is not registered in group {group}")]
    SlideNotFound { group: String, href: String },
    #[error("trigger {href} is not registered in any group")]
    SourceNotFound { href: String },
    #[error("unknown group: {0}")]
    UnknownGroup(String),
    #[error("group {group} has no slide at index {index} (len {len})")]
    IndexOutOfRange {
        group: String,
        index: usize,
        len: usize,
    },
    #[error("group {0} has no slides")]
    EmptyGroup(String),
    #[error(transparent)]
    Media(#[from] MediaError),
}

#[derive(Debug)]
pub struct GroupManager {
    registry: HandlerRegistry,
    groups: BTreeMap<String, Group>,
    active: String,
    next_sequence: usize,
}

impl GroupManager {
    pub fn new(registry: HandlerRegistry) -> Self {
        Self {
            registry,
            groups: BTreeMap::new(),
            active: DEFAULT_GROUP.to_string(),
            next_sequence: 0,
        }
    }

    pub fn registry_mut(&mut self) -> &mut HandlerRegistry {
        &mut self.registry
    }

    /// Creates an empty group when absent. The first group created while the
    /// active name points at nothing becomes active.
    pub fn register_group(&mut self, name: &str) -> &mut Group {
        if !self.groups.contains_key(&self.active) {
            self.active = name.to_string();
        }
        self.groups
            .entry(name.to_string())
            .or_insert_with(|| Group::new(name))
    }

    /// Registers a trigger and returns its index. A failed registration leaves
    /// every group untouched, including not creating `group_name`.
    pub fn add_slide(&mut self, group_name: &str, source: SourceRef) -> GroupResult<usize> {
        if self
            .groups
            .get(group_name)
            .is_some_and(|group| group.contains(&source))
        {
            return Err(GroupError::DuplicateSlide {
                group: group_name.to_string(),
                href: source.href.clone(),
            });
        }

        let handler = self.registry.detect(source.trigger())?;
        let slide = Slide::create(source, handler, self.next_sequence)?;
        self.next_sequence += 1;

        let group = self.register_group(group_name);
        group.push(slide);
        Ok(group.len() - 1)
    }

    /// Detaches and disposes a slide, keeping the group's current index on the
    /// same slide where possible.
    pub fn remove_slide(&mut self, group_name: &str, source: &SourceRef) -> GroupResult<Slide> {
        let group = self.resolve_group_mut(group_name)?;
        let index = group
            .position_of(source)
            .ok_or_else(|| GroupError::SlideNotFound {
                group: group_name.to_string(),
                href: source.href.clone(),
            })?;

        let mut slide = group.remove(index);
        slide.dispose();

        if let Some(current) = group.current_index() {
            let adjusted = if current > index {
                current - 1
            } else {
                current.min(group.len().saturating_sub(1))
            };
            group.set_current_index(adjusted);
        }
        Ok(slide)
    }

    pub fn resolve_group(&self, name: &str) -> GroupResult<&Group> {
        self.groups
            .get(name)
            .ok_or_else(|| GroupError::UnknownGroup(name.to_string()))
    }

    pub(crate) fn resolve_group_mut(&mut self, name: &str) -> GroupResult<&mut Group> {
        self.groups
            .get_mut(name)
            .ok_or_else(|| GroupError::UnknownGroup(name.to_string()))
    }

    /// Every group holding `source`, in group-name order, with its index there.
    pub fn locations(&self, source: &SourceRef) -> GroupResult<Vec<(String, usize)>> {
        let found = self
            .groups
            .values()
            .filter_map(|group| {
                group
                    .position_of(source)
                    .map(|index| (group.name().to_string(), index))
            })
            .collect::<Vec<_>>();
        if found.is_empty() {
            return Err(GroupError::SourceNotFound {
                href: source.href.clone(),
            });
        }
        Ok(found)
    }

    pub fn active_group_name(&self) -> &str {
        &self.active
    }

    pub fn active_group(&self) -> Option<&Group> {
        self.groups.get(&self.active)
    }

    pub fn set_active(&mut self, name: &str) -> GroupResult<()> {
        self.resolve_group(name)?;
        self.active = name.to_string();
        Ok(())
    }

    pub(crate) fn groups_mut(&mut self) -> impl Iterator<Item = &mut Group> {
        self.groups.values_mut()
    }

    pub fn group_names(&self) -> Vec<String> {
        self.groups.keys().cloned().collect()
    }

    /// Disposes every slide and forgets every group.
    pub fn clear(&mut self) {
        for group in self.groups_mut() {
            group.slides_mut().for_each(Slide::dispose);
        }
        self.groups.clear();
        self.active = DEFAULT_GROUP.to_string();
    }
}
