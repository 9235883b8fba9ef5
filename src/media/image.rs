use std::rc::Rc;

use super::{
    Caption, CaptionSettings, ImagePresentation, MediaHandler, MediaKind, MediaResult,
    RenderHandle, SlideContainer, Trigger,
};
use crate::config::CaptionSource;
use crate::host::MediaHost;

const IMAGE_EXTENSIONS: [&str; 9] = ["png", "jpg", "tiff", "tif", "gif", "bmp", "webp", "svg", "ico"];

pub struct ImageHandler {
    host: Rc<dyn MediaHost>,
    captions: Option<CaptionSettings>,
}

impl ImageHandler {
    pub fn new(host: Rc<dyn MediaHost>, captions: Option<CaptionSettings>) -> Self {
        Self { host, captions }
    }

    fn caption_for(&self, trigger: &Trigger, sequence: usize) -> Option<Caption> {
        let settings = self.captions.as_ref()?;
        let text = match settings.source {
            CaptionSource::Trigger => trigger.attribute(&settings.attribute),
            CaptionSource::ThumbnailImage => trigger.thumbnail_attribute(&settings.attribute),
        }
        .filter(|text| !text.is_empty())?;

        Some(Caption {
            id: format!("lightbox-figcaption-{sequence}"),
            text: text.to_string(),
            visible: false,
        })
    }

    /// Starts the fetch once; later calls are no-ops.
    fn load(&self, image: &mut ImagePresentation) {
        if let Some(url) = image.deferred_source.take() {
            self.host.begin_fetch(&url);
            image.source = Some(url);
        }
    }
}

fn is_image_href(href: &str) -> bool {
    href.rsplit_once('.').is_some_and(|(_, extension)| {
        IMAGE_EXTENSIONS
            .iter()
            .any(|known| extension.eq_ignore_ascii_case(known))
    })
}

impl MediaHandler for ImageHandler {
    fn kind(&self) -> MediaKind {
        MediaKind::Image
    }

    fn detect(&self, trigger: &Trigger) -> bool {
        is_image_href(&trigger.href)
    }

    fn initialize(&self, trigger: &Trigger, container: &mut SlideContainer) -> MediaResult<()> {
        let alt = trigger
            .thumbnail_attribute("alt")
            .unwrap_or_default()
            .to_string();
        if let Some(caption) = self.caption_for(trigger, container.sequence()) {
            container.set_caption(caption);
        }
        container.set_handle(RenderHandle::Image(ImagePresentation {
            deferred_source: Some(trigger.href.clone()),
            source: None,
            alt,
            visible: false,
        }));
        Ok(())
    }

    fn preload(&self, container: &mut SlideContainer) {
        if let Some(image) = container.image_mut() {
            self.load(image);
        }
    }

    fn activate(&self, container: &mut SlideContainer) {
        if let Some(image) = container.image_mut() {
            self.load(image);
            image.visible = true;
        }
        container.set_caption_visible(true);
    }

    fn deactivate(&self, _container: &mut SlideContainer) {}

    fn dispose(&self, container: &mut SlideContainer) {
        if let Some(image) = container.image_mut() {
            if let Some(url) = image.source.take() {
                image.deferred_source = Some(url);
            }
            image.visible = false;
        }
        container.set_caption_visible(false);
    }
}
