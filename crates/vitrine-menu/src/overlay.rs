//! Overlay pass coordination.
//!
//! Open dropdowns and popups draw above all page content and may spill past
//! the page's scroll clip, so they render in a second pass: window space,
//! full-surface scissor. The page evaluates [`OverlayPass::needed`] once per
//! frame (it is the return value of `draw_backgrounds`) and the renderer
//! calls the foreground draw entry points only when it was true.

use vitrine_core::{DrawList, DrawSpace};

use crate::control::ControlKind;

pub struct OverlayPass;

impl OverlayPass {
    /// True when this frame needs the second pass: a dropdown-capable
    /// control is open, or a popup is up.
    pub fn needed(open: Option<(ControlKind, bool)>, popup_open: bool) -> bool {
        popup_open
            || matches!(open, Some((kind, is_open)) if kind.opens_dropdown() && is_open)
    }

    /// Prologue both foreground passes share: full-window coordinates,
    /// scissor cleared to the whole surface.
    pub fn begin(list: &mut DrawList) {
        list.set_space(DrawSpace::Window);
        list.reset_scissor();
    }
}
