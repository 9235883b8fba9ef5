use std::any::Any;

use crate::geometry::FrameSize;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Caption {
    pub id: String,
    pub text: String,
    pub visible: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ImagePresentation {
    /// Source waiting to be fetched; moved into `source` on load.
    pub deferred_source: Option<String>,
    pub source: Option<String>,
    pub alt: String,
    pub visible: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FramePresentation {
    pub deferred_source: String,
    pub source: Option<String>,
    pub size: FrameSize,
    pub allow_autoplay: bool,
    pub visible: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct EmbeddedVideo {
    pub source: String,
    pub fetch_started: bool,
    pub playing: bool,
    pub resume_at: Option<f64>,
}

impl EmbeddedVideo {
    pub fn new(source: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            fetch_started: false,
            playing: false,
            resume_at: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct HtmlPresentation {
    pub markup: String,
    pub visible: bool,
    pub video: Option<EmbeddedVideo>,
}

/// Resource a handler builds inside a slide container.
#[derive(Debug)]
pub enum RenderHandle {
    Image(ImagePresentation),
    Frame(FramePresentation),
    Html(HtmlPresentation),
    Custom(Box<dyn Any>),
}

/// Per-slide container handed to every handler hook.
#[derive(Debug, Default)]
pub struct SlideContainer {
    sequence: usize,
    handle: Option<RenderHandle>,
    caption: Option<Caption>,
}

impl SlideContainer {
    pub fn new(sequence: usize) -> Self {
        Self {
            sequence,
            handle: None,
            caption: None,
        }
    }

    /// Registration order across the whole engine, used for stable element ids.
    pub fn sequence(&self) -> usize {
        self.sequence
    }

    pub fn is_empty(&self) -> bool {
        self.handle.is_none()
    }

    pub fn set_handle(&mut self, handle: RenderHandle) {
        self.handle = Some(handle);
    }

    pub fn handle(&self) -> Option<&RenderHandle> {
        self.handle.as_ref()
    }

    pub fn set_caption(&mut self, caption: Caption) {
        self.caption = Some(caption);
    }

    pub fn caption(&self) -> Option<&Caption> {
        self.caption.as_ref()
    }

    pub fn set_caption_visible(&mut self, visible: bool) {
        if let Some(caption) = self.caption.as_mut() {
            caption.visible = visible;
        }
    }

    pub fn image(&self) -> Option<&ImagePresentation> {
        match self.handle.as_ref() {
            Some(RenderHandle::Image(image)) => Some(image),
            _ => None,
        }
    }

    pub(crate) fn image_mut(&mut self) -> Option<&mut ImagePresentation> {
        match self.handle.as_mut() {
            Some(RenderHandle::Image(image)) => Some(image),
            _ => None,
        }
    }

    pub fn frame(&self) -> Option<&FramePresentation> {
        match self.handle.as_ref() {
            Some(RenderHandle::Frame(frame)) => Some(frame),
            _ => None,
        }
    }

    pub(crate) fn frame_mut(&mut self) -> Option<&mut FramePresentation> {
        match self.handle.as_mut() {
            Some(RenderHandle::Frame(frame)) => Some(frame),
            _ => None,
        }
    }

    pub fn html(&self) -> Option<&HtmlPresentation> {
        match self.handle.as_ref() {
            Some(RenderHandle::Html(html)) => Some(html),
            _ => None,
        }
    }

    pub(crate) fn html_mut(&mut self) -> Option<&mut HtmlPresentation> {
        match self.handle.as_mut() {
            Some(RenderHandle::Html(html)) => Some(html),
            _ => None,
        }
    }

    pub fn custom<T: Any>(&self) -> Option<&T> {
        match self.handle.as_ref() {
            Some(RenderHandle::Custom(value)) => value.downcast_ref::<T>(),
            _ => None,
        }
    }

    pub fn custom_mut<T: Any>(&mut self) -> Option<&mut T> {
        match self.handle.as_mut() {
            Some(RenderHandle::Custom(value)) => value.downcast_mut::<T>(),
            _ => None,
        }
    }
}
