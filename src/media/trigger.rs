use std::collections::BTreeMap;
use std::ops::Deref;
use std::rc::Rc;

use serde::Deserialize;

/// Descriptor of a thumbnail link that opens a slide.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Trigger {
    pub href: String,
    pub attributes: BTreeMap<String, String>,
    /// Attributes of the `<img>` nested inside the link, if any.
    pub thumbnail: Option<BTreeMap<String, String>>,
}

impl Trigger {
    pub fn link(href: impl Into<String>) -> Self {
        Self {
            href: href.into(),
            ..Self::default()
        }
    }

    pub fn with_attribute(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.insert(name.into(), value.into());
        self
    }

    pub fn with_thumbnail_attribute(
        mut self,
        name: impl Into<String>,
        value: impl Into<String>,
    ) -> Self {
        self.thumbnail
            .get_or_insert_with(BTreeMap::new)
            .insert(name.into(), value.into());
        self
    }

    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes.get(name).map(String::as_str)
    }

    pub fn thumbnail_attribute(&self, name: &str) -> Option<&str> {
        self.thumbnail
            .as_ref()
            .and_then(|attributes| attributes.get(name))
            .map(String::as_str)
    }

    pub fn data_type(&self) -> Option<&str> {
        self.attribute("data-type")
    }

    pub fn into_source(self) -> SourceRef {
        SourceRef::new(self)
    }
}

/// Shared handle to a trigger. Equality is identity, not field equality.
#[derive(Debug, Clone)]
pub struct SourceRef(Rc<Trigger>);

impl SourceRef {
    pub fn new(trigger: Trigger) -> Self {
        Self(Rc::new(trigger))
    }

    pub fn trigger(&self) -> &Trigger {
        &self.0
    }
}

impl PartialEq for SourceRef {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}

impl Eq for SourceRef {}

impl Deref for SourceRef {
    type Target = Trigger;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

/// Host part of a URL, without scheme, port or query.
pub fn extract_hostname(url: &str) -> &str {
    let host_and_rest = if url.contains("//") {
        url.split('/').nth(2).unwrap_or_default()
    } else {
        url.split('/').next().unwrap_or_default()
    };
    let without_port = host_and_rest.split(':').next().unwrap_or_default();
    without_port.split('?').next().unwrap_or_default()
}
