//! The control contract.
//!
//! Every interactive element on a page implements [`Control`]. The set is
//! closed: the engine branches on [`ControlKind`] for the type-specific
//! input paths (slider adjustment, key-binding capture, tile editing), so a
//! new control kind means touching the dispatch switch, by design.
//!
//! All coordinates a control sees are in its own bounds space: content-local
//! for scrolling controls, window-local for fixed ones. The page translates
//! the mouse before forwarding.

use vitrine_core::{DrawList, PadButton, Rect, Vec2, VirtualKey};

use crate::popup::Popup;
use crate::scroll::ScrollView;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ControlKind {
    Checkbox,
    ComboBox,
    Slider,
    Ruler,
    TextBox,
    KeyBind,
    Tile,
    Button,
    Scrollbar,
}

impl ControlKind {
    /// Kinds whose open state draws a dropdown above the page and therefore
    /// needs the overlay pass.
    pub fn opens_dropdown(self) -> bool {
        matches!(self, ControlKind::ComboBox)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ControlStatus {
    Regular,
    Hover,
    Disabled,
}

/// Page-level services available to a control while it handles input.
pub struct PageCtx<'a> {
    pub scroll: &'a mut ScrollView,
    pub page_rect: Rect,
    pub(crate) rebuild: &'a mut bool,
    pub(crate) pending_popup: &'a mut Option<Popup>,
}

impl PageCtx<'_> {
    /// Ask the host to rebuild the whole page (e.g. a language or theme
    /// change). The rebuild happens after the current dispatch returns, so
    /// no half-rebuilt registry is ever observable.
    pub fn request_rebuild(&mut self) {
        *self.rebuild = true;
    }

    /// Stage a modal popup. The page installs it once the current dispatch
    /// returns, closing any open control first.
    pub fn open_popup(&mut self, popup: Popup) {
        *self.pending_popup = Some(popup);
    }
}

/// Read-only context for the draw passes.
pub struct DrawCtx<'a> {
    pub scroll: &'a ScrollView,
    pub page_rect: Rect,
    pub status: ControlStatus,
}

/// Capability set of a page control.
///
/// `click` returns whether the control is open *after* the call; `mouse_up`
/// returns whether it is now closed. `close` must be idempotent.
pub trait Control {
    fn kind(&self) -> ControlKind;

    /// Cached-bounds source; content-local (or window-local when registered
    /// fixed). The registry snapshots this at registration time.
    fn bounds(&self) -> Rect;

    fn enabled(&self) -> bool {
        true
    }

    fn is_hover(&self, x: f32, y: f32) -> bool {
        self.bounds().contains(Vec2::new(x, y))
    }

    fn status(&self, x: f32, y: f32) -> ControlStatus {
        if !self.enabled() {
            ControlStatus::Disabled
        } else if self.is_hover(x, y) {
            ControlStatus::Hover
        } else {
            ControlStatus::Regular
        }
    }

    /// Bounds while open, including any dropdown area. The page uses this
    /// for the stay-open / click-elsewhere decision.
    fn open_bounds(&self) -> Rect {
        self.bounds()
    }

    fn is_open(&self) -> bool {
        false
    }

    fn click(&mut self, ctx: &mut PageCtx, x: f32, y: f32) -> bool;

    fn mouse_move(&mut self, _ctx: &mut PageCtx, _x: f32, _y: f32) {}

    /// Returns true when the interaction completed and the control should be
    /// released (a slider drag ending). Controls that stay open across the
    /// press (dropdowns, text editing, capture) keep the default.
    fn mouse_up(&mut self, _ctx: &mut PageCtx, _x: f32, _y: f32) -> bool {
        false
    }

    fn close(&mut self) {}

    /// Printable character while open (text editing).
    fn key_char(&mut self, _c: char) {}

    /// Virtual key while open; returns whether the control is still open.
    fn vkey(&mut self, _ctx: &mut PageCtx, _key: VirtualKey) -> bool {
        false
    }

    /// Increment/decrement for value controls (slider, ruler).
    fn adjust(&mut self, _ctx: &mut PageCtx, _delta: i32) {}

    /// Delete semantics: unbind a key-binding, remove a tile.
    fn clear_value(&mut self, _ctx: &mut PageCtx) {}

    /// Edit semantics (tiles).
    fn edit(&mut self, _ctx: &mut PageCtx) {}

    /// Pad button while a key-binding control is capturing; returns whether
    /// the control is still open.
    fn capture_pad(&mut self, _ctx: &mut PageCtx, _button: PadButton) -> bool {
        false
    }

    fn draw(&self, list: &mut DrawList, ctx: &DrawCtx);

    fn draw_label(&self, _list: &mut DrawList, _ctx: &DrawCtx) {}

    /// Overlay pass (window space); only called on the open control.
    fn draw_foreground(&self, _list: &mut DrawList, _ctx: &DrawCtx) {}

    fn draw_foreground_label(&self, _list: &mut DrawList, _ctx: &DrawCtx) {}
}
