use std::fmt;
use std::rc::Rc;

use super::{
    CaptionSettings, HtmlHandler, IframeHandler, ImageHandler, MediaError, MediaHandler, MediaKind,
    MediaResult, Trigger, YoutubeHandler,
};
use crate::config::LightboxConfig;
use crate::host::MediaHost;

/// Handler-facing subset of the lightbox options.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct MediaSettings {
    pub captions: Option<CaptionSettings>,
    pub autoplay_video: bool,
}

impl MediaSettings {
    pub fn from_config(config: &LightboxConfig) -> Self {
        Self {
            captions: config.captions.then(|| CaptionSettings {
                source: config.captions_selector,
                attribute: config.caption_attribute.clone(),
            }),
            autoplay_video: config.autoplay_video,
        }
    }
}

/// Ordered handler list; detection is first-match.
#[derive(Clone, Default)]
pub struct HandlerRegistry {
    handlers: Vec<Rc<dyn MediaHandler>>,
}

impl HandlerRegistry {
    pub fn empty() -> Self {
        Self::default()
    }

    /// Built-in handlers in detection order: image, youtube, iframe, html.
    pub fn with_builtin(host: Rc<dyn MediaHost>, settings: &MediaSettings) -> Self {
        let mut registry = Self::empty();
        registry.register(Rc::new(ImageHandler::new(
            Rc::clone(&host),
            settings.captions.clone(),
        )));
        registry.register(Rc::new(YoutubeHandler::new(
            Rc::clone(&host),
            settings.autoplay_video,
        )));
        registry.register(Rc::new(IframeHandler::new(Rc::clone(&host))));
        registry.register(Rc::new(HtmlHandler::new(host, settings.autoplay_video)));
        registry
    }

    pub fn register(&mut self, handler: Rc<dyn MediaHandler>) {
        self.handlers.push(handler);
    }

    /// Registers ahead of every existing handler so it wins detection ties.
    pub fn prepend(&mut self, handler: Rc<dyn MediaHandler>) {
        self.handlers.insert(0, handler);
    }

    pub fn kinds(&self) -> Vec<MediaKind> {
        self.handlers.iter().map(|handler| handler.kind()).collect()
    }

    pub fn detect(&self, trigger: &Trigger) -> MediaResult<Rc<dyn MediaHandler>> {
        self.handlers
            .iter()
            .find(|handler| handler.detect(trigger))
            .cloned()
            .ok_or_else(|| MediaError::Unsupported {
                href: trigger.href.clone(),
            })
    }
}

impl fmt::Debug for HandlerRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HandlerRegistry")
            .field("kinds", &self.kinds())
            .finish()
    }
}
