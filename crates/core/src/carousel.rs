//! Image carousel state.
//!
//! Product cards cycle their images by rotating the sequence so that a
//! different image is first. The detail page keeps the order and tracks a
//! selected index instead, since a thumbnail click names the image directly.

/// A rotating sequence of image URLs. The first element is on display.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Carousel {
    images: Vec<String>,
}

impl Carousel {
    #[must_use]
    pub const fn new(images: Vec<String>) -> Self {
        Self { images }
    }

    /// The image on display.
    #[must_use]
    pub fn current(&self) -> Option<&str> {
        self.images.first().map(String::as_str)
    }

    /// Whether there is anything to rotate through.
    #[must_use]
    pub fn can_rotate(&self) -> bool {
        self.images.len() > 1
    }

    /// Move the first image to the back.
    #[must_use]
    pub fn next(mut self) -> Self {
        if !self.images.is_empty() {
            self.images.rotate_left(1);
        }
        self
    }

    /// Move the last image to the front.
    #[must_use]
    pub fn previous(mut self) -> Self {
        if !self.images.is_empty() {
            self.images.rotate_right(1);
        }
        self
    }

    #[must_use]
    pub fn images(&self) -> &[String] {
        &self.images
    }
}

/// The detail-page gallery: all images plus the one shown large.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Gallery {
    images: Vec<String>,
    selected: usize,
}

impl Gallery {
    /// Gallery showing the first image.
    #[must_use]
    pub const fn new(images: Vec<String>) -> Self {
        Self {
            images,
            selected: 0,
        }
    }

    /// Show the image at `index`; out-of-range indices show the first image.
    #[must_use]
    pub fn select(mut self, index: usize) -> Self {
        self.selected = if index < self.images.len() { index } else { 0 };
        self
    }

    #[must_use]
    pub const fn selected(&self) -> usize {
        self.selected
    }

    /// URL of the image shown large.
    #[must_use]
    pub fn main_image(&self) -> Option<&str> {
        self.images.get(self.selected).map(String::as_str)
    }

    /// Thumbnails are only worth showing when there is a choice.
    #[must_use]
    pub fn has_thumbnails(&self) -> bool {
        self.images.len() > 1
    }

    #[must_use]
    pub fn images(&self) -> &[String] {
        &self.images
    }
}
