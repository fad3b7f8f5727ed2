//! # Draw-list boundary
//!
//! The menu never talks to the GPU directly. Controls and pages append
//! commands to a [`DrawList`]; the plugin's renderer walks the list once per
//! frame, switching its uniform binding when it sees [`DrawCmd::SetSpace`]
//! and updating the hardware scissor on [`DrawCmd::Scissor`].
//!
//! Two coordinate spaces exist:
//!
//! - [`DrawSpace::Scrolled`] — page content space; the renderer applies the
//!   page's scroll translation uniform before rasterizing.
//! - [`DrawSpace::Window`] — full-window space; used by fixed controls
//!   (scrollbar, tooltip strip) and by the overlay pass.
//!
//! Text commands carry the string and size; glyph shaping and mesh
//! generation happen in the renderer. `text_width_estimate` mirrors the
//! advance heuristic the layout side uses so hit padding and drawn text
//! agree closely enough for row-sized boxes.

use smallvec::SmallVec;

use crate::{Color, Rect};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DrawSpace {
    /// Content space, translated by the page scroll offset.
    Scrolled,
    /// Window space, unaffected by scrolling.
    Window,
}

#[derive(Clone, Debug)]
pub enum DrawCmd {
    /// Switch the coordinate-space uniform for subsequent commands.
    SetSpace(DrawSpace),
    /// Replace the scissor rectangle (window coordinates). `None` restores
    /// the full surface.
    Scissor(Option<Rect>),
    Rect {
        rect: Rect,
        color: Color,
    },
    Border {
        rect: Rect,
        color: Color,
        width: f32,
    },
    Line {
        from: (f32, f32),
        to: (f32, f32),
        color: Color,
        width: f32,
    },
    Text {
        pos: (f32, f32),
        text: String,
        color: Color,
        size: f32,
    },
}

/// Rough advance-width estimate used for centering and right-alignment.
/// The renderer's shaped output stays within a few px of this for the
/// short strings menus draw.
pub fn text_width_estimate(text: &str, size: f32) -> f32 {
    text.chars().count() as f32 * size * 0.6
}

/// Retained command list for one frame (or one pass of one frame).
#[derive(Default)]
pub struct DrawList {
    cmds: Vec<DrawCmd>,
    scissors: SmallVec<[Option<Rect>; 4]>,
}

impl DrawList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn clear(&mut self) {
        self.cmds.clear();
        self.scissors.clear();
    }

    pub fn commands(&self) -> &[DrawCmd] {
        &self.cmds
    }

    pub fn set_space(&mut self, space: DrawSpace) {
        self.cmds.push(DrawCmd::SetSpace(space));
    }

    /// Pushes a scissor rect; restore with `pop_scissor`. Nested scissors do
    /// not intersect automatically — the menu only ever nests the page clip
    /// inside the full surface.
    pub fn push_scissor(&mut self, rect: Rect) {
        self.scissors.push(Some(rect));
        self.cmds.push(DrawCmd::Scissor(Some(rect)));
    }

    pub fn pop_scissor(&mut self) {
        self.scissors.pop();
        let restored = self.scissors.last().copied().flatten();
        self.cmds.push(DrawCmd::Scissor(restored));
    }

    /// Drops any pending scissor and restores the full surface. The overlay
    /// pass starts with this.
    pub fn reset_scissor(&mut self) {
        self.scissors.clear();
        self.cmds.push(DrawCmd::Scissor(None));
    }

    pub fn rect(&mut self, rect: Rect, color: Color) {
        if color.3 == 0 {
            return;
        }
        self.cmds.push(DrawCmd::Rect { rect, color });
    }

    pub fn border(&mut self, rect: Rect, color: Color, width: f32) {
        if color.3 == 0 {
            return;
        }
        self.cmds.push(DrawCmd::Border { rect, color, width });
    }

    pub fn line(&mut self, from: (f32, f32), to: (f32, f32), color: Color, width: f32) {
        self.cmds.push(DrawCmd::Line {
            from,
            to,
            color,
            width,
        });
    }

    pub fn text(&mut self, pos: (f32, f32), text: impl Into<String>, color: Color, size: f32) {
        let text = text.into();
        if text.is_empty() {
            return;
        }
        self.cmds.push(DrawCmd::Text {
            pos,
            text,
            color,
            size,
        });
    }

    /// Text centered horizontally in `rect`, baseline-centered vertically.
    pub fn text_centered(&mut self, rect: Rect, text: impl Into<String>, color: Color, size: f32) {
        let text = text.into();
        let w = text_width_estimate(&text, size);
        let x = rect.x + (rect.w - w).max(0.0) * 0.5;
        let y = rect.y + (rect.h - size).max(0.0) * 0.5;
        self.text((x, y), text, color, size);
    }
}

/// Implemented by the plugin's renderer. Walks the command list once per
/// pass; `SetSpace` selects the scrolled/fixed translation uniform and
/// `Scissor` maps to the hardware scissor rect.
pub trait RenderBackend {
    fn submit(&mut self, list: &DrawList);
}
