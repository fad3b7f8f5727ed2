use vitrine_core::{DrawList, Rect, dp_to_px, theme};

use crate::binding::{Binding, EnabledIf};
use crate::control::{Control, ControlKind, DrawCtx, PageCtx};
use crate::controls::{ROW_FONT_DP, label_color, label_pos, value_rect};

/// Discrete stepped selector drawn as a row of tick marks (internal
/// resolution scale, anisotropic filtering levels and the like). A click
/// picks the nearest tick immediately; arrows step by one.
pub struct Ruler {
    rect: Rect,
    label: String,
    value: Binding<i32>,
    min: i32,
    max: i32,
    enabled_if: Option<EnabledIf>,
}

impl Ruler {
    pub fn new(
        rect: Rect,
        label: impl Into<String>,
        value: Binding<i32>,
        range: (i32, i32),
    ) -> Self {
        Self {
            rect,
            label: label.into(),
            value,
            min: range.0,
            max: range.1.max(range.0),
            enabled_if: None,
        }
    }

    pub fn enabled_if(mut self, f: impl Fn() -> bool + 'static) -> Self {
        self.enabled_if = Some(std::rc::Rc::new(f));
        self
    }

    pub fn value(&self) -> i32 {
        self.value.get()
    }

    fn ticks(&self) -> i32 {
        self.max - self.min + 1
    }

    fn tick_x(&self, i: i32) -> f32 {
        let v = value_rect(self.rect);
        if self.ticks() <= 1 {
            return v.x + v.w * 0.5;
        }
        v.x + v.w * (i as f32 / (self.ticks() - 1) as f32)
    }

    fn nearest_tick(&self, x: f32) -> i32 {
        let mut best = 0;
        let mut best_d = f32::INFINITY;
        for i in 0..self.ticks() {
            let d = (self.tick_x(i) - x).abs();
            if d < best_d {
                best_d = d;
                best = i;
            }
        }
        best
    }
}

impl Control for Ruler {
    fn kind(&self) -> ControlKind {
        ControlKind::Ruler
    }

    fn bounds(&self) -> Rect {
        self.rect
    }

    fn enabled(&self) -> bool {
        self.enabled_if.as_ref().map(|f| f()).unwrap_or(true)
    }

    fn click(&mut self, _ctx: &mut PageCtx, x: f32, _y: f32) -> bool {
        self.value.set(self.min + self.nearest_tick(x));
        false
    }

    fn adjust(&mut self, _ctx: &mut PageCtx, delta: i32) {
        let v = (self.value.get() + delta).clamp(self.min, self.max);
        self.value.set(v);
    }

    fn draw(&self, list: &mut DrawList, ctx: &DrawCtx) {
        let th = theme();
        let v = value_rect(self.rect);
        let base_y = v.y + v.h * 0.65;
        list.line(
            (v.x, base_y),
            (v.right(), base_y),
            th.outline,
            dp_to_px(1.0),
        );
        let cur = self.value.get() - self.min;
        for i in 0..self.ticks() {
            let x = self.tick_x(i);
            let selected = i == cur;
            let h = if selected {
                dp_to_px(10.0)
            } else {
                dp_to_px(6.0)
            };
            let color = if selected {
                th.accent
            } else {
                crate::controls::body_color(ctx.status)
            };
            list.line(
                (x, base_y - h),
                (x, base_y),
                color,
                dp_to_px(if selected { 3.0 } else { 1.0 }),
            );
        }
    }

    fn draw_label(&self, list: &mut DrawList, ctx: &DrawCtx) {
        list.text(
            label_pos(self.rect),
            self.label.clone(),
            label_color(ctx.status),
            dp_to_px(ROW_FONT_DP),
        );
    }
}
