use std::rc::Rc;

use super::{
    EmbeddedVideo, HtmlPresentation, MediaError, MediaHandler, MediaKind, MediaResult,
    RenderHandle, SlideContainer, Trigger,
};
use crate::host::{MediaHost, PlayerCommand};

const TARGET_ATTRIBUTE: &str = "data-target";

/// Inline fragment copied from elsewhere in the document, optionally holding a video.
pub struct HtmlHandler {
    host: Rc<dyn MediaHost>,
    autoplay: bool,
}

impl HtmlHandler {
    pub fn new(host: Rc<dyn MediaHost>, autoplay: bool) -> Self {
        Self { host, autoplay }
    }

    fn resolution_error(trigger: &Trigger, reason: String) -> MediaError {
        MediaError::ResourceResolution {
            kind: MediaKind::Html,
            href: trigger.href.clone(),
            reason,
        }
    }
}

impl MediaHandler for HtmlHandler {
    fn kind(&self) -> MediaKind {
        MediaKind::Html
    }

    fn detect(&self, trigger: &Trigger) -> bool {
        trigger.data_type() == Some("html")
    }

    fn initialize(&self, trigger: &Trigger, container: &mut SlideContainer) -> MediaResult<()> {
        let selector = trigger
            .attribute(TARGET_ATTRIBUTE)
            .filter(|selector| !selector.is_empty())
            .ok_or_else(|| {
                Self::resolution_error(trigger, format!("missing {TARGET_ATTRIBUTE} attribute"))
            })?;
        let fragment = self.host.resolve_fragment(selector).ok_or_else(|| {
            Self::resolution_error(trigger, format!("target {selector} not found"))
        })?;

        container.set_handle(RenderHandle::Html(HtmlPresentation {
            markup: fragment.markup,
            visible: false,
            video: fragment.video_source.map(EmbeddedVideo::new),
        }));
        Ok(())
    }

    fn preload(&self, _container: &mut SlideContainer) {}

    fn activate(&self, container: &mut SlideContainer) {
        let Some(html) = container.html_mut() else {
            return;
        };
        if html.visible {
            return;
        }
        html.visible = true;

        if let Some(video) = html.video.as_mut() {
            if !video.fetch_started {
                self.host.begin_fetch(&video.source);
                video.fetch_started = true;
            }
            if let Some(position) = video.resume_at {
                self.host
                    .player_command(&video.source, PlayerCommand::SeekTo(position));
            }
            if self.autoplay {
                self.host.player_command(&video.source, PlayerCommand::Play);
                video.playing = true;
            }
        }
        container.set_caption_visible(true);
    }

    fn deactivate(&self, container: &mut SlideContainer) {
        let Some(html) = container.html_mut() else {
            return;
        };
        if !html.visible {
            return;
        }
        html.visible = false;

        if let Some(video) = html.video.as_mut() {
            if video.playing {
                self.host.player_command(&video.source, PlayerCommand::Pause);
                video.playing = false;
            }
            video.resume_at = self.host.playback_position(&video.source);
        }
    }

    fn dispose(&self, container: &mut SlideContainer) {
        let Some(html) = container.html_mut() else {
            return;
        };
        html.visible = false;

        if let Some(video) = html.video.as_mut() {
            if video.playing {
                self.host.player_command(&video.source, PlayerCommand::Pause);
            }
            if video.fetch_started && !self.host.is_fetch_complete(&video.source) {
                tracing::debug!(source = %video.source, "aborting partial video download");
                self.host.abort_fetch(&video.source);
            }
            *video = EmbeddedVideo::new(std::mem::take(&mut video.source));
        }
        container.set_caption_visible(false);
    }
}
