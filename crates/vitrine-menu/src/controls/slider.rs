use vitrine_core::{DrawList, Rect, dp_to_px, text_width_estimate, theme};

use crate::binding::{Binding, EnabledIf};
use crate::control::{Control, ControlKind, DrawCtx, PageCtx};
use crate::controls::{ROW_FONT_DP, label_color, label_pos, value_rect};

const KNOB_DP: f32 = 10.0;
const TRACK_H_DP: f32 = 4.0;

/// Continuous integer slider. "Open" means a drag is in progress: the click
/// grabs the knob, moves track it, and mouse-up releases ownership.
pub struct Slider {
    rect: Rect,
    label: String,
    value: Binding<i32>,
    min: i32,
    max: i32,
    step: i32,
    /// Rendered after the number ("%", "px"); hit-testing keeps this
    /// clickable through the registration's right padding.
    suffix: String,
    dragging: bool,
    enabled_if: Option<EnabledIf>,
}

impl Slider {
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
            step: 1,
            suffix: String::new(),
            dragging: false,
            enabled_if: None,
        }
    }

    pub fn step(mut self, step: i32) -> Self {
        self.step = step.max(1);
        self
    }

    pub fn suffix(mut self, suffix: impl Into<String>) -> Self {
        self.suffix = suffix.into();
        self
    }

    pub fn enabled_if(mut self, f: impl Fn() -> bool + 'static) -> Self {
        self.enabled_if = Some(std::rc::Rc::new(f));
        self
    }

    pub fn value(&self) -> i32 {
        self.value.get()
    }

    fn track(&self) -> Rect {
        let v = value_rect(self.rect);
        let text_w = dp_to_px(36.0); // room for the value readout
        Rect {
            x: v.x,
            y: v.y + (v.h - dp_to_px(TRACK_H_DP)) * 0.5,
            w: (v.w - text_w).max(dp_to_px(20.0)),
            h: dp_to_px(TRACK_H_DP),
        }
    }

    fn snap(&self, v: i32) -> i32 {
        let stepped = ((v - self.min) as f32 / self.step as f32).round() as i32 * self.step;
        (self.min + stepped).clamp(self.min, self.max)
    }

    fn set_from_x(&mut self, x: f32) {
        let t = self.track();
        let frac = ((x - t.x) / t.w).clamp(0.0, 1.0);
        let raw = self.min + (frac * (self.max - self.min) as f32).round() as i32;
        self.value.set(self.snap(raw));
    }
}

impl Control for Slider {
    fn kind(&self) -> ControlKind {
        ControlKind::Slider
    }

    fn bounds(&self) -> Rect {
        self.rect
    }

    fn enabled(&self) -> bool {
        self.enabled_if.as_ref().map(|f| f()).unwrap_or(true)
    }

    fn is_open(&self) -> bool {
        self.dragging
    }

    fn click(&mut self, _ctx: &mut PageCtx, x: f32, _y: f32) -> bool {
        self.dragging = true;
        self.set_from_x(x);
        true
    }

    fn mouse_move(&mut self, _ctx: &mut PageCtx, x: f32, _y: f32) {
        if self.dragging {
            self.set_from_x(x);
        }
    }

    fn mouse_up(&mut self, _ctx: &mut PageCtx, x: f32, _y: f32) -> bool {
        if self.dragging {
            self.set_from_x(x);
            self.dragging = false;
        }
        true
    }

    fn close(&mut self) {
        self.dragging = false;
    }

    fn adjust(&mut self, _ctx: &mut PageCtx, delta: i32) {
        let v = self.value.get() + delta * self.step;
        self.value.set(self.snap(v));
    }

    fn draw(&self, list: &mut DrawList, ctx: &DrawCtx) {
        let th = theme();
        let t = self.track();
        list.rect(t, th.control_bg);
        let frac = if self.max > self.min {
            (self.value.get() - self.min) as f32 / (self.max - self.min) as f32
        } else {
            0.0
        };
        let fill = Rect {
            w: t.w * frac.clamp(0.0, 1.0),
            ..t
        };
        list.rect(fill, th.accent);
        let knob = dp_to_px(KNOB_DP);
        let kx = t.x + t.w * frac.clamp(0.0, 1.0) - knob * 0.5;
        let krect = Rect {
            x: kx,
            y: t.y + t.h * 0.5 - knob * 0.5,
            w: knob,
            h: knob,
        };
        list.rect(krect, crate::controls::body_color(ctx.status));
        list.border(krect, th.outline, dp_to_px(1.0));
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
        let readout = format!("{}{}", self.value.get(), self.suffix);
        let w = text_width_estimate(&readout, font);
        list.text(
            (
                self.rect.right() - w - dp_to_px(4.0),
                self.rect.y + (self.rect.h - font).max(0.0) * 0.5,
            ),
            readout,
            th.value,
            font,
        );
    }
}
