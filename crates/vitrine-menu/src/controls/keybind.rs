use vitrine_core::{BoundInput, DrawList, PadButton, Rect, VirtualKey, dp_to_px, theme};

use crate::binding::{Binding, EnabledIf};
use crate::control::{Control, ControlKind, DrawCtx, PageCtx};
use crate::controls::{ROW_FONT_DP, label_color, label_pos, value_rect};

/// Hotkey editor. Clicking arms capture mode ("open"); the very next
/// keyboard key or pad button becomes the bound value, Escape cancels.
/// Delete clears the binding while the row is merely selected.
pub struct KeyBind {
    rect: Rect,
    label: String,
    value: Binding<Option<BoundInput>>,
    capturing: bool,
    enabled_if: Option<EnabledIf>,
}

impl KeyBind {
    pub fn new(
        rect: Rect,
        label: impl Into<String>,
        value: Binding<Option<BoundInput>>,
    ) -> Self {
        Self {
            rect,
            label: label.into(),
            value,
            capturing: false,
            enabled_if: None,
        }
    }

    pub fn enabled_if(mut self, f: impl Fn() -> bool + 'static) -> Self {
        self.enabled_if = Some(std::rc::Rc::new(f));
        self
    }

    pub fn is_capturing(&self) -> bool {
        self.capturing
    }

    pub fn bound(&self) -> Option<BoundInput> {
        self.value.get()
    }
}

impl Control for KeyBind {
    fn kind(&self) -> ControlKind {
        ControlKind::KeyBind
    }

    fn bounds(&self) -> Rect {
        self.rect
    }

    fn enabled(&self) -> bool {
        self.enabled_if.as_ref().map(|f| f()).unwrap_or(true)
    }

    fn is_open(&self) -> bool {
        self.capturing
    }

    fn click(&mut self, _ctx: &mut PageCtx, _x: f32, _y: f32) -> bool {
        self.capturing = true;
        true
    }

    fn vkey(&mut self, _ctx: &mut PageCtx, key: VirtualKey) -> bool {
        if !self.capturing {
            return false;
        }
        if key != VirtualKey::Escape {
            self.value.set(Some(BoundInput::Key(key)));
        }
        self.capturing = false;
        false
    }

    fn capture_pad(&mut self, _ctx: &mut PageCtx, button: PadButton) -> bool {
        if !self.capturing {
            return false;
        }
        self.value.set(Some(BoundInput::Pad(button)));
        self.capturing = false;
        false
    }

    fn clear_value(&mut self, _ctx: &mut PageCtx) {
        self.value.set(None);
    }

    fn close(&mut self) {
        self.capturing = false;
    }

    fn draw(&self, list: &mut DrawList, ctx: &DrawCtx) {
        let th = theme();
        let v = value_rect(self.rect);
        let bg = if self.capturing {
            th.capture_bg
        } else {
            crate::controls::body_color(ctx.status)
        };
        list.rect(v, bg);
        list.border(
            v,
            if self.capturing { th.accent } else { th.outline },
            dp_to_px(1.0),
        );
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
        let text = if self.capturing {
            "Press a key...".to_string()
        } else {
            match self.value.get() {
                Some(b) => b.to_string(),
                None => "Unbound".to_string(),
            }
        };
        list.text(
            (v.x + dp_to_px(6.0), v.y + (v.h - font).max(0.0) * 0.5),
            text,
            th.value,
            font,
        );
    }
}
