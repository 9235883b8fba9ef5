use std::rc::Rc;

use super::{
    extract_hostname, FramePresentation, MediaHandler, MediaKind, MediaResult, RenderHandle,
    SlideContainer, Trigger,
};
use crate::geometry::FrameSize;
use crate::host::{MediaHost, PlayerCommand};

const DEFAULT_FRAME_WIDTH: u32 = 1280;
const DEFAULT_FRAME_HEIGHT: u32 = 720;
const YOUTUBE_HOST: &str = "www.youtube.com";

fn frame_size(trigger: &Trigger, host: &dyn MediaHost) -> FrameSize {
    let dimension = |name: &str, fallback: u32| {
        trigger
            .attribute(name)
            .and_then(|value| value.trim().parse::<u32>().ok())
            .unwrap_or(fallback)
    };
    FrameSize::new(
        dimension("data-width", DEFAULT_FRAME_WIDTH),
        dimension("data-height", DEFAULT_FRAME_HEIGHT),
    )
    .capped_to(host.viewport())
}

/// Embed URL with the JS player API enabled so playback can be paused remotely.
fn youtube_player_source(href: &str, autoplay: bool) -> String {
    let mut source = href.to_string();
    if !source.contains('?') {
        source.push_str("?param=false");
    }
    source.push_str("&enablejsapi=1");
    if autoplay {
        source.push_str("&autoplay=1");
    }
    source
}

fn inert_frame(source: String, size: FrameSize, allow_autoplay: bool) -> RenderHandle {
    RenderHandle::Frame(FramePresentation {
        deferred_source: source,
        source: None,
        size,
        allow_autoplay,
        visible: false,
    })
}

/// Attaches the live source. Returns false when the frame was already visible.
fn show_frame(frame: &mut FramePresentation) -> bool {
    if frame.visible {
        return false;
    }
    frame.visible = true;
    if frame.source.is_none() {
        frame.source = Some(frame.deferred_source.clone());
    }
    true
}

fn unload_frame(frame: &mut FramePresentation) {
    frame.source = None;
    frame.visible = false;
}

pub struct YoutubeHandler {
    host: Rc<dyn MediaHost>,
    autoplay: bool,
}

impl YoutubeHandler {
    pub fn new(host: Rc<dyn MediaHost>, autoplay: bool) -> Self {
        Self { host, autoplay }
    }
}

impl MediaHandler for YoutubeHandler {
    fn kind(&self) -> MediaKind {
        MediaKind::Youtube
    }

    fn detect(&self, trigger: &Trigger) -> bool {
        extract_hostname(&trigger.href) == YOUTUBE_HOST
    }

    fn initialize(&self, trigger: &Trigger, container: &mut SlideContainer) -> MediaResult<()> {
        let size = frame_size(trigger, self.host.as_ref());
        let source = youtube_player_source(&trigger.href, self.autoplay);
        container.set_handle(inert_frame(source, size, true));
        Ok(())
    }

    fn preload(&self, _container: &mut SlideContainer) {}

    fn activate(&self, container: &mut SlideContainer) {
        let Some(frame) = container.frame_mut() else {
            return;
        };
        let resumed = frame.source.is_some();
        if show_frame(frame) && resumed && self.autoplay {
            if let Some(source) = frame.source.as_deref() {
                self.host.player_command(source, PlayerCommand::Play);
            }
        }
        container.set_caption_visible(true);
    }

    fn deactivate(&self, container: &mut SlideContainer) {
        let Some(frame) = container.frame_mut() else {
            return;
        };
        if !frame.visible {
            return;
        }
        frame.visible = false;
        if let Some(source) = frame.source.as_deref() {
            self.host.player_command(source, PlayerCommand::Pause);
        }
    }

    fn dispose(&self, container: &mut SlideContainer) {
        if let Some(frame) = container.frame_mut() {
            unload_frame(frame);
        }
        container.set_caption_visible(false);
    }
}

pub struct IframeHandler {
    host: Rc<dyn MediaHost>,
}

impl IframeHandler {
    pub fn new(host: Rc<dyn MediaHost>) -> Self {
        Self { host }
    }
}

impl MediaHandler for IframeHandler {
    fn kind(&self) -> MediaKind {
        MediaKind::Iframe
    }

    fn detect(&self, trigger: &Trigger) -> bool {
        trigger.data_type() == Some("iframe")
    }

    fn initialize(&self, trigger: &Trigger, container: &mut SlideContainer) -> MediaResult<()> {
        let size = frame_size(trigger, self.host.as_ref());
        container.set_handle(inert_frame(trigger.href.clone(), size, false));
        Ok(())
    }

    fn preload(&self, _container: &mut SlideContainer) {}

    fn activate(&self, container: &mut SlideContainer) {
        if let Some(frame) = container.frame_mut() {
            show_frame(frame);
        }
        container.set_caption_visible(true);
    }

    fn deactivate(&self, container: &mut SlideContainer) {
        if let Some(frame) = container.frame_mut() {
            frame.visible = false;
        }
    }

    fn dispose(&self, container: &mut SlideContainer) {
        if let Some(frame) = container.frame_mut() {
            unload_frame(frame);
        }
        container.set_caption_visible(false);
    }
}
