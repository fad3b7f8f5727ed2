use vitrine_core::{DrawList, Rect, Vec2, VirtualKey, dp_to_px, theme};

use crate::binding::{Binding, EnabledIf};
use crate::control::{Control, ControlKind, DrawCtx, PageCtx};
use crate::controls::{ROW_FONT_DP, label_color, label_pos, value_rect};

const OPTION_H_DP: f32 = 22.0;
const DROPDOWN_PAD_DP: f32 = 4.0;

/// Option selector with a dropdown. While open it owns input: the dropdown
/// participates in the stay-open bounds, and the page's scrollable content
/// is extended so a dropdown near the bottom can be scrolled into view.
///
/// The dropdown itself renders in the overlay pass (window space), above
/// every other row and outside the page's scroll clip.
pub struct ComboBox {
    rect: Rect,
    label: String,
    options: Vec<String>,
    selected: Binding<usize>,
    open: bool,
    hover_option: Option<usize>,
    enabled_if: Option<EnabledIf>,
}

impl ComboBox {
    pub fn new(
        rect: Rect,
        label: impl Into<String>,
        options: Vec<String>,
        selected: Binding<usize>,
    ) -> Self {
        Self {
            rect,
            label: label.into(),
            options,
            selected,
            open: false,
            hover_option: None,
            enabled_if: None,
        }
    }

    pub fn enabled_if(mut self, f: impl Fn() -> bool + 'static) -> Self {
        self.enabled_if = Some(std::rc::Rc::new(f));
        self
    }

    pub fn selected_index(&self) -> usize {
        self.selected.get().min(self.options.len().saturating_sub(1))
    }

    fn option_h(&self) -> f32 {
        dp_to_px(OPTION_H_DP)
    }

    /// Dropdown rect in content space, anchored under the value column.
    fn dropdown_rect(&self) -> Rect {
        let v = value_rect(self.rect);
        Rect {
            x: v.x,
            y: self.rect.bottom() + dp_to_px(2.0),
            w: v.w,
            h: self.options.len() as f32 * self.option_h() + 2.0 * dp_to_px(DROPDOWN_PAD_DP),
        }
    }

    fn option_at(&self, x: f32, y: f32) -> Option<usize> {
        let dd = self.dropdown_rect();
        if !dd.contains(Vec2::new(x, y)) {
            return None;
        }
        let idx = ((y - dd.y - dp_to_px(DROPDOWN_PAD_DP)) / self.option_h()).floor();
        if idx < 0.0 {
            return None;
        }
        let idx = idx as usize;
        (idx < self.options.len()).then_some(idx)
    }

    fn retract(&mut self, ctx: &mut PageCtx) {
        self.open = false;
        self.hover_option = None;
        ctx.scroll.clear_extension();
    }
}

impl Control for ComboBox {
    fn kind(&self) -> ControlKind {
        ControlKind::ComboBox
    }

    fn bounds(&self) -> Rect {
        self.rect
    }

    fn enabled(&self) -> bool {
        self.enabled_if.as_ref().map(|f| f()).unwrap_or(true)
    }

    fn is_open(&self) -> bool {
        self.open
    }

    fn open_bounds(&self) -> Rect {
        if !self.open {
            return self.rect;
        }
        let dd = self.dropdown_rect();
        Rect {
            x: self.rect.x.min(dd.x),
            y: self.rect.y,
            w: (dd.right().max(self.rect.right())) - self.rect.x.min(dd.x),
            h: dd.bottom() - self.rect.y,
        }
    }

    fn click(&mut self, ctx: &mut PageCtx, x: f32, y: f32) -> bool {
        if !self.open {
            self.open = true;
            self.hover_option = Some(self.selected_index());
            ctx.scroll
                .extend_to(self.dropdown_rect().bottom() + dp_to_px(8.0));
            return true;
        }
        if let Some(idx) = self.option_at(x, y) {
            self.selected.set(idx);
        }
        self.retract(ctx);
        false
    }

    fn mouse_move(&mut self, _ctx: &mut PageCtx, x: f32, y: f32) {
        if self.open
            && let Some(idx) = self.option_at(x, y)
        {
            self.hover_option = Some(idx);
        }
    }

    fn vkey(&mut self, ctx: &mut PageCtx, key: VirtualKey) -> bool {
        if !self.open {
            return false;
        }
        match key {
            VirtualKey::Up => {
                let cur = self.hover_option.unwrap_or(self.selected_index());
                self.hover_option = Some(cur.saturating_sub(1));
                true
            }
            VirtualKey::Down => {
                let cur = self.hover_option.unwrap_or(self.selected_index());
                self.hover_option = Some((cur + 1).min(self.options.len().saturating_sub(1)));
                true
            }
            VirtualKey::Enter => {
                if let Some(idx) = self.hover_option {
                    self.selected.set(idx);
                }
                self.retract(ctx);
                false
            }
            VirtualKey::Escape | VirtualKey::Tab => {
                self.retract(ctx);
                false
            }
            _ => true,
        }
    }

    fn close(&mut self) {
        // the page clears the scroll extension on this path
        self.open = false;
        self.hover_option = None;
    }

    fn draw(&self, list: &mut DrawList, ctx: &DrawCtx) {
        let th = theme();
        let v = value_rect(self.rect);
        list.rect(v, crate::controls::body_color(ctx.status));
        list.border(
            v,
            if self.open { th.accent } else { th.outline },
            dp_to_px(1.0),
        );
        // disclosure arrow
        let ax = v.right() - dp_to_px(12.0);
        let ay = v.y + v.h * 0.5;
        let s = dp_to_px(3.0);
        list.line((ax - s, ay - s), (ax, ay + s), th.value, dp_to_px(1.0));
        list.line((ax, ay + s), (ax + s, ay - s), th.value, dp_to_px(1.0));
    }

    fn draw_label(&self, list: &mut DrawList, ctx: &DrawCtx) {
        let th = theme();
        let font = dp_to_px(ROW_FONT_DP);
        list.text(
            label_pos(self.rect),
            self.label.clone(),
            label_color(ctx.status),
            font,
        );
        let v = value_rect(self.rect);
        if let Some(text) = self.options.get(self.selected_index()) {
            list.text(
                (v.x + dp_to_px(6.0), v.y + (v.h - font).max(0.0) * 0.5),
                text.clone(),
                th.value,
                font,
            );
        }
    }

    fn draw_foreground(&self, list: &mut DrawList, ctx: &DrawCtx) {
        if !self.open {
            return;
        }
        let th = theme();
        let dd = self.dropdown_rect().offset(0.0, -ctx.scroll.offset());
        list.rect(dd, th.overlay_bg);
        list.border(dd, th.overlay_border, dp_to_px(1.0));
        if let Some(h) = self.hover_option {
            let r = self.option_row(dd, h);
            list.rect(r, th.row_highlight);
        }
        let sel = self.selected_index();
        if self.hover_option != Some(sel) {
            let r = self.option_row(dd, sel);
            list.rect(r, th.accent.with_alpha(48));
        }
    }

    fn draw_foreground_label(&self, list: &mut DrawList, ctx: &DrawCtx) {
        if !self.open {
            return;
        }
        let th = theme();
        let font = dp_to_px(ROW_FONT_DP);
        let dd = self.dropdown_rect().offset(0.0, -ctx.scroll.offset());
        for (i, text) in self.options.iter().enumerate() {
            let r = self.option_row(dd, i);
            list.text(
                (r.x + dp_to_px(6.0), r.y + (r.h - font).max(0.0) * 0.5),
                text.clone(),
                if i == self.selected_index() {
                    th.label
                } else {
                    th.value
                },
                font,
            );
        }
    }
}

impl ComboBox {
    fn option_row(&self, dropdown: Rect, i: usize) -> Rect {
        Rect {
            x: dropdown.x + dp_to_px(2.0),
            y: dropdown.y + dp_to_px(DROPDOWN_PAD_DP) + i as f32 * self.option_h(),
            w: dropdown.w - 2.0 * dp_to_px(2.0),
            h: self.option_h(),
        }
    }
}
