use crate::listing::DEFAULT_MEDIA_URL;

/// Cursor over a listing's photos. Navigation wraps at both ends.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Gallery {
    images: Vec<String>,
    current: usize,
}

impl Gallery {
    /// An empty image list falls back to the default image.
    pub fn new(images: Vec<String>) -> Self {
        let images = if images.is_empty() {
            vec![DEFAULT_MEDIA_URL.to_string()]
        } else {
            images
        };
        Self { images, current: 0 }
    }

    pub fn current(&self) -> &str {
        &self.images[self.current]
    }

    pub fn next(&mut self) -> &str {
        self.current = (self.current + 1) % self.images.len();
        self.current()
    }

    pub fn prev(&mut self) -> &str {
        self.current = (self.current + self.images.len() - 1) % self.images.len();
        self.current()
    }

    /// 1-based index of the current image and the image count.
    pub fn position(&self) -> (usize, usize) {
        (self.current + 1, self.images.len())
    }
}
