use vitrine_core::{DrawList, Rect, dp_to_px, theme};

use crate::control::{Control, ControlKind, DrawCtx, PageCtx};
use crate::scroll::ScrollView;

const MIN_THUMB_DP: f32 = 24.0;

/// The page's scrollbar. Registered as the fixed suffix entry of every
/// registry, so the fixed-suffix hit scan finds it regardless of scroll.
/// All offset state lives in the page's [`ScrollView`]; this control only
/// maps pointer positions to offsets and draws the track/thumb.
pub struct Scrollbar {
    track: Rect,
}

impl Scrollbar {
    pub fn new(track: Rect) -> Self {
        Self { track }
    }

    pub fn set_track(&mut self, track: Rect) {
        self.track = track;
    }

    fn thumb_h(&self, scroll: &ScrollView) -> f32 {
        let content = scroll.content_height().max(1.0);
        let ratio = (scroll.viewport_height() / content).clamp(0.0, 1.0);
        (self.track.h * ratio).clamp(dp_to_px(MIN_THUMB_DP).min(self.track.h), self.track.h)
    }

    pub fn thumb_rect(&self, scroll: &ScrollView) -> Rect {
        let thumb_h = self.thumb_h(scroll);
        let denom = scroll.max_offset().max(1.0);
        let tpos = (scroll.offset() / denom).clamp(0.0, 1.0);
        let max_pos = (self.track.h - thumb_h).max(0.0);
        Rect {
            x: self.track.x,
            y: self.track.y + tpos * max_pos,
            w: self.track.w,
            h: thumb_h,
        }
    }

    /// Offset that centers the thumb on pointer `y`.
    fn offset_for(&self, scroll: &ScrollView, y: f32) -> f32 {
        let thumb_h = self.thumb_h(scroll);
        let max_pos = (self.track.h - thumb_h).max(0.0);
        let pos = ((y - self.track.y) - thumb_h * 0.5).clamp(0.0, max_pos);
        let t = if max_pos > 0.0 { pos / max_pos } else { 0.0 };
        t * scroll.max_offset()
    }
}

impl Control for Scrollbar {
    fn kind(&self) -> ControlKind {
        ControlKind::Scrollbar
    }

    fn bounds(&self) -> Rect {
        self.track
    }

    fn click(&mut self, ctx: &mut PageCtx, _x: f32, y: f32) -> bool {
        let off = self.offset_for(ctx.scroll, y);
        ctx.scroll.set_offset(off);
        false
    }

    fn mouse_move(&mut self, ctx: &mut PageCtx, _x: f32, y: f32) {
        let off = self.offset_for(ctx.scroll, y);
        ctx.scroll.set_offset(off);
    }

    fn draw(&self, list: &mut DrawList, ctx: &DrawCtx) {
        if !ctx.scroll.scrollable() {
            return;
        }
        let th = theme();
        list.rect(self.track, th.scrollbar_track);
        list.rect(self.thumb_rect(ctx.scroll), th.scrollbar_thumb);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scrolled_view() -> ScrollView {
        let mut sv = ScrollView::new(100.0);
        sv.set_content_height(300.0);
        sv
    }

    #[test]
    fn thumb_tracks_offset() {
        let sb = Scrollbar::new(Rect::new(390.0, 0.0, 10.0, 100.0));
        let mut sv = scrolled_view();
        assert_eq!(sb.thumb_rect(&sv).y, 0.0);
        sv.set_offset(200.0); // max
        let t = sb.thumb_rect(&sv);
        assert!((t.bottom() - 100.0).abs() < 0.01);
    }

    #[test]
    fn drag_maps_back_to_offset_extremes() {
        let sb = Scrollbar::new(Rect::new(390.0, 0.0, 10.0, 100.0));
        let sv = scrolled_view();
        assert_eq!(sb.offset_for(&sv, -50.0), 0.0);
        assert_eq!(sb.offset_for(&sv, 500.0), 200.0);
    }
}
