use std::rc::Rc;

use vitrine_core::{DrawList, Rect, dp_to_px, theme};

use crate::binding::EnabledIf;
use crate::control::{Control, ControlKind, DrawCtx, PageCtx};
use crate::controls::{ROW_FONT_DP, label_color};

/// Plain push button (Apply, Reset defaults, Open folder). Fires its
/// callback on click and never keeps input ownership.
pub struct Button {
    rect: Rect,
    label: String,
    on_click: Rc<dyn Fn()>,
    enabled_if: Option<EnabledIf>,
}

impl Button {
    pub fn new(rect: Rect, label: impl Into<String>, on_click: impl Fn() + 'static) -> Self {
        Self {
            rect,
            label: label.into(),
            on_click: Rc::new(on_click),
            enabled_if: None,
        }
    }

    pub fn enabled_if(mut self, f: impl Fn() -> bool + 'static) -> Self {
        self.enabled_if = Some(std::rc::Rc::new(f));
        self
    }
}

impl Control for Button {
    fn kind(&self) -> ControlKind {
        ControlKind::Button
    }

    fn bounds(&self) -> Rect {
        self.rect
    }

    fn enabled(&self) -> bool {
        self.enabled_if.as_ref().map(|f| f()).unwrap_or(true)
    }

    fn click(&mut self, _ctx: &mut PageCtx, _x: f32, _y: f32) -> bool {
        (self.on_click)();
        false
    }

    fn draw(&self, list: &mut DrawList, ctx: &DrawCtx) {
        let th = theme();
        list.rect(self.rect, crate::controls::body_color(ctx.status));
        list.border(self.rect, th.outline, dp_to_px(1.0));
    }

    fn draw_label(&self, list: &mut DrawList, ctx: &DrawCtx) {
        list.text_centered(
            self.rect,
            self.label.clone(),
            label_color(ctx.status),
            dp_to_px(ROW_FONT_DP),
        );
    }
}
