//! Vertical scroll state for one page.
//!
//! The offset is kept in content space: a control whose cached top is `t`
//! appears on screen at `t - offset`. The offset never leaves
//! `[0, max(0, content - viewport)]`; settings menus snap rather than
//! fling, so there is no inertia here.
//!
//! An open dropdown can *extend* the content temporarily so its tail can be
//! scrolled into view; the extension is dropped when the dropdown closes.

/// Scroll offset plus the sizes needed to clamp it.
#[derive(Debug)]
pub struct ScrollView {
    offset: f32,
    viewport_h: f32,
    content_h: f32,
    extension: f32,
    reserved_bottom: f32,
}

impl ScrollView {
    pub fn new(viewport_h: f32) -> Self {
        Self {
            offset: 0.0,
            viewport_h: viewport_h.max(0.0),
            content_h: 0.0,
            extension: 0.0,
            reserved_bottom: 0.0,
        }
    }

    /// Back to the top, extension dropped. Used when the page is resized or
    /// rebuilt.
    pub fn reset(&mut self) {
        self.offset = 0.0;
        self.extension = 0.0;
    }

    pub fn set_viewport_height(&mut self, h: f32) {
        self.viewport_h = h.max(0.0);
        self.clamp();
    }

    pub fn set_content_height(&mut self, h: f32) {
        self.content_h = h.max(0.0);
        self.clamp();
    }

    /// Height of a fixed strip (the tooltip bar) at the bottom of the
    /// viewport that auto-scroll must keep clear of.
    pub fn set_reserved_bottom(&mut self, h: f32) {
        self.reserved_bottom = h.max(0.0);
    }

    pub fn offset(&self) -> f32 {
        self.offset
    }

    pub fn viewport_height(&self) -> f32 {
        self.viewport_h
    }

    pub fn content_height(&self) -> f32 {
        self.content_h + self.extension
    }

    pub fn max_offset(&self) -> f32 {
        (self.content_h + self.extension - self.viewport_h).max(0.0)
    }

    pub fn scrollable(&self) -> bool {
        self.max_offset() > 0.0
    }

    pub fn set_offset(&mut self, off: f32) {
        self.offset = off.clamp(0.0, self.max_offset());
    }

    pub fn scroll_by(&mut self, dy: f32) {
        self.set_offset(self.offset + dy);
    }

    /// Grow the content so that `bottom` (content space) becomes reachable.
    /// No-op when the content already covers it.
    pub fn extend_to(&mut self, bottom: f32) {
        self.extension = (bottom - self.content_h).max(self.extension).max(0.0);
    }

    pub fn clear_extension(&mut self) {
        self.extension = 0.0;
        self.clamp();
    }

    /// Auto-scroll: bring `[top, bottom]` (content space) into the visible
    /// band, with `pad` extra pixels revealed past the target edge. The
    /// bottom edge accounts for the reserved strip.
    pub fn ensure_visible(&mut self, top: f32, bottom: f32, pad: f32) {
        let visible_h = (self.viewport_h - self.reserved_bottom).max(0.0);
        if top - pad < self.offset {
            self.set_offset(top - pad);
        } else if bottom + pad > self.offset + visible_h {
            self.set_offset(bottom + pad - visible_h);
        }
    }

    fn clamp(&mut self) {
        self.offset = self.offset.clamp(0.0, self.max_offset());
    }
}
