//! The drawing surface a tree is rendered into.

/// A mounted container with a fixed width and wholly-owned content.
///
/// Every draw replaces the content; nothing is diffed or appended.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Surface {
    width: f64,
    content: String,
}

impl Surface {
    pub fn new(width: f64) -> Self {
        Self {
            width,
            content: String::new(),
        }
    }

    pub fn width(&self) -> f64 {
        self.width
    }

    /// Resize the container. Existing content is kept until the next draw.
    pub fn set_width(&mut self, width: f64) {
        self.width = width;
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    pub fn is_empty(&self) -> bool {
        self.content.is_empty()
    }

    /// Remove everything drawn so far.
    pub fn clear(&mut self) {
        self.content.clear();
    }

    /// Clear and hand out the buffer for a fresh draw.
    pub(crate) fn begin_draw(&mut self) -> &mut String {
        self.content.clear();
        &mut self.content
    }
}
