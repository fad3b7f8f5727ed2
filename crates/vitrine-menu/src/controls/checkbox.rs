use vitrine_core::{DrawList, Rect, dp_to_px, theme};

use crate::binding::{Binding, EnabledIf};
use crate::control::{Control, ControlKind, DrawCtx, PageCtx};
use crate::controls::{ROW_FONT_DP, label_color, label_pos};

const BOX_DP: f32 = 16.0;

/// Boolean toggle. Never holds input ownership: a click flips the bound
/// value and the row stays closed.
pub struct Checkbox {
    rect: Rect,
    label: String,
    value: Binding<bool>,
    enabled_if: Option<EnabledIf>,
}

impl Checkbox {
    pub fn new(rect: Rect, label: impl Into<String>, value: Binding<bool>) -> Self {
        Self {
            rect,
            label: label.into(),
            value,
            enabled_if: None,
        }
    }

    pub fn enabled_if(mut self, f: impl Fn() -> bool + 'static) -> Self {
        self.enabled_if = Some(std::rc::Rc::new(f));
        self
    }

    pub fn checked(&self) -> bool {
        self.value.get()
    }

    fn box_rect(&self) -> Rect {
        let side = dp_to_px(BOX_DP);
        Rect {
            x: self.rect.right() - side - dp_to_px(6.0),
            y: self.rect.y + (self.rect.h - side) * 0.5,
            w: side,
            h: side,
        }
    }
}

impl Control for Checkbox {
    fn kind(&self) -> ControlKind {
        ControlKind::Checkbox
    }

    fn bounds(&self) -> Rect {
        self.rect
    }

    fn enabled(&self) -> bool {
        self.enabled_if.as_ref().map(|f| f()).unwrap_or(true)
    }

    fn click(&mut self, _ctx: &mut PageCtx, _x: f32, _y: f32) -> bool {
        self.value.update(|v| *v = !*v);
        false
    }

    fn draw(&self, list: &mut DrawList, ctx: &DrawCtx) {
        let th = theme();
        let b = self.box_rect();
        list.rect(b, crate::controls::body_color(ctx.status));
        list.border(b, th.outline, dp_to_px(1.0));
        if self.value.get() {
            let inner = b.inflate(-dp_to_px(4.0), -dp_to_px(4.0));
            list.rect(inner, th.accent);
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
