use super::{MediaState, Slide};
use crate::media::SourceRef;

/// Named gallery: ordered slides plus the selected index.
#[derive(Debug)]
pub struct Group {
    name: String,
    slides: Vec<Slide>,
    current_index: Option<usize>,
}

impl Group {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            slides: Vec::new(),
            current_index: None,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn len(&self) -> usize {
        self.slides.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slides.is_empty()
    }

    pub fn slide(&self, index: usize) -> Option<&Slide> {
        self.slides.get(index)
    }

    pub(crate) fn slides_mut(&mut self) -> impl Iterator<Item = &mut Slide> {
        self.slides.iter_mut()
    }

    /// `None` until the group has been opened at least once.
    pub fn current_index(&self) -> Option<usize> {
        self.current_index
    }

    pub(crate) fn set_current_index(&mut self, index: usize) {
        self.current_index = Some(index);
    }

    /// Back to the first slide, for groups that have been opened before.
    pub(crate) fn rewind(&mut self) {
        if self.current_index.is_some() {
            self.current_index = Some(0);
        }
    }

    pub fn current_slide(&self) -> Option<&Slide> {
        self.current_index.and_then(|index| self.slides.get(index))
    }

    pub fn position_of(&self, source: &SourceRef) -> Option<usize> {
        self.slides.iter().position(|slide| slide.source() == source)
    }

    pub fn contains(&self, source: &SourceRef) -> bool {
        self.position_of(source).is_some()
    }

    pub fn sources(&self) -> Vec<SourceRef> {
        self.slides.iter().map(|slide| slide.source().clone()).collect()
    }

    pub fn media_states(&self) -> Vec<MediaState> {
        self.slides.iter().map(Slide::media_state).collect()
    }

    /// Runs `f` on the slide at `index` when it exists; out-of-range is ignored.
    pub(crate) fn with_slide(&mut self, index: Option<usize>, f: impl FnOnce(&mut Slide)) {
        if let Some(slide) = index.and_then(|index| self.slides.get_mut(index)) {
            f(slide);
        }
    }

    pub(crate) fn push(&mut self, slide: Slide) {
        self.slides.push(slide);
    }

    pub(crate) fn remove(&mut self, index: usize) -> Slide {
        self.slides.remove(index)
    }
}
