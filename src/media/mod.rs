//! Media kinds, their handlers, and the registry that picks one per slide.

mod container;
mod frame;
mod html;
mod image;
mod registry;
mod trigger;

use thiserror::Error;

pub use container::{
    Caption, EmbeddedVideo, FramePresentation, HtmlPresentation, ImagePresentation, RenderHandle,
    SlideContainer,
};
pub use frame::{IframeHandler, YoutubeHandler};
pub use html::HtmlHandler;
pub use image::ImageHandler;
pub use registry::{HandlerRegistry, MediaSettings};
pub use trigger::{extract_hostname, SourceRef, Trigger};

use crate::config::CaptionSource;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MediaKind {
    Image,
    Youtube,
    Iframe,
    Html,
    Custom(&'static str),
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MediaError {
    #[error("no media handler supports trigger {href}")]
    Unsupported { href: String },
    #[error("cannot resolve {kind:?} content for {href}: {reason}")]
    ResourceResolution {
        kind: MediaKind,
        href: String,
        reason: String,
    },
}

pub type MediaResult<T> = std::result::Result<T, MediaError>;

/// Lifecycle hooks for one media kind.
///
/// The engine calls these at fixed points: `initialize` once at registration,
/// `preload` for neighbours, `activate`/`deactivate` as the current slide
/// changes, and `dispose` when the slide leaves the working set. Every hook
/// except `detect` receives the slide's container and must return promptly;
/// any fetch it starts is fire-and-forget through the host.
pub trait MediaHandler {
    fn kind(&self) -> MediaKind;

    /// Pure predicate; first registered handler that returns true wins.
    fn detect(&self, trigger: &Trigger) -> bool;

    /// Builds the inert presentation. Must not fetch or play.
    fn initialize(&self, trigger: &Trigger, container: &mut SlideContainer) -> MediaResult<()>;

    fn preload(&self, container: &mut SlideContainer);

    fn activate(&self, container: &mut SlideContainer);

    /// Pauses playback but keeps whatever has been loaded.
    fn deactivate(&self, container: &mut SlideContainer);

    fn dispose(&self, container: &mut SlideContainer);
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CaptionSettings {
    pub source: CaptionSource,
    pub attribute: String,
}
