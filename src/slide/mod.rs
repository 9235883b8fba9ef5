mod store;

use std::fmt;
use std::rc::Rc;

pub use store::Group;

use crate::media::{MediaHandler, MediaKind, MediaResult, SlideContainer, SourceRef};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MediaState {
    #[default]
    Unloaded,
    Preloaded,
    /// The current slide; at most one per group.
    Loaded,
    /// Was current, resources kept for a quick return.
    Left,
}

/// One navigable media item. Its handler is chosen once at registration.
pub struct Slide {
    source: SourceRef,
    handler: Rc<dyn MediaHandler>,
    container: SlideContainer,
    media_state: MediaState,
}

impl Slide {
    pub(crate) fn create(
        source: SourceRef,
        handler: Rc<dyn MediaHandler>,
        sequence: usize,
    ) -> MediaResult<Self> {
        let mut container = SlideContainer::new(sequence);
        handler.initialize(source.trigger(), &mut container)?;
        Ok(Self {
            source,
            handler,
            container,
            media_state: MediaState::Unloaded,
        })
    }

    pub fn source(&self) -> &SourceRef {
        &self.source
    }

    pub fn kind(&self) -> MediaKind {
        self.handler.kind()
    }

    pub fn media_state(&self) -> MediaState {
        self.media_state
    }

    pub fn container(&self) -> &SlideContainer {
        &self.container
    }

    pub(crate) fn preload(&mut self) {
        if self.media_state == MediaState::Loaded {
            return;
        }
        self.handler.preload(&mut self.container);
        if self.media_state == MediaState::Unloaded {
            self.media_state = MediaState::Preloaded;
        }
    }

    pub(crate) fn activate(&mut self) {
        self.handler.activate(&mut self.container);
        self.media_state = MediaState::Loaded;
    }

    pub(crate) fn deactivate(&mut self) {
        if self.media_state != MediaState::Loaded {
            return;
        }
        self.handler.deactivate(&mut self.container);
        self.media_state = MediaState::Left;
    }

    /// Releases handler resources. The slide stays registered and can be reloaded.
    pub(crate) fn dispose(&mut self) {
        if self.media_state == MediaState::Unloaded {
            return;
        }
        self.deactivate();
        self.handler.dispose(&mut self.container);
        self.media_state = MediaState::Unloaded;
    }
}

impl fmt::Debug for Slide {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Slide")
            .field("href", &self.source.href)
            .field("kind", &self.kind())
            .field("media_state", &self.media_state)
            .finish_non_exhaustive()
    }
}
