//! Modal popup dialog (message or confirm).
//!
//! A popup owns input while present: the page forwards clicks and virtual
//! keys here and drops the popup once it reports closed. Drawing happens in
//! the overlay pass, full-window space.

use std::rc::Rc;

use vitrine_core::{DrawList, Rect, Vec2, dp_to_px, text_width_estimate, theme};

const POPUP_W_DP: f32 = 320.0;
const POPUP_H_DP: f32 = 120.0;
const BUTTON_W_DP: f32 = 88.0;
const BUTTON_H_DP: f32 = 28.0;
const FONT_DP: f32 = 14.0;

pub struct Popup {
    title: String,
    message: String,
    buttons: Vec<String>,
    focused: usize,
    rect: Rect,
    on_choose: Option<Rc<dyn Fn(usize)>>,
}

impl Popup {
    /// Single-button message box.
    pub fn message(title: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            message: message.into(),
            buttons: vec!["OK".to_string()],
            focused: 0,
            rect: Rect::default(),
            on_choose: None,
        }
    }

    /// Confirm dialog; the callback receives the chosen button index.
    pub fn confirm(
        title: impl Into<String>,
        message: impl Into<String>,
        buttons: Vec<String>,
        on_choose: impl Fn(usize) + 'static,
    ) -> Self {
        Self {
            title: title.into(),
            message: message.into(),
            buttons,
            focused: 0,
            rect: Rect::default(),
            on_choose: Some(Rc::new(on_choose)),
        }
    }

    /// Centers the dialog in the page. Called when the page installs it.
    pub fn layout(&mut self, page_rect: Rect) {
        let w = dp_to_px(POPUP_W_DP).min(page_rect.w);
        let h = dp_to_px(POPUP_H_DP).min(page_rect.h);
        self.rect = Rect {
            x: page_rect.x + (page_rect.w - w) * 0.5,
            y: page_rect.y + (page_rect.h - h) * 0.5,
            w,
            h,
        };
    }

    pub fn rect(&self) -> Rect {
        self.rect
    }

    fn button_rect(&self, i: usize) -> Rect {
        let bw = dp_to_px(BUTTON_W_DP);
        let bh = dp_to_px(BUTTON_H_DP);
        let gap = dp_to_px(12.0);
        let n = self.buttons.len() as f32;
        let total = n * bw + (n - 1.0) * gap;
        let x0 = self.rect.x + (self.rect.w - total) * 0.5;
        Rect {
            x: x0 + i as f32 * (bw + gap),
            y: self.rect.bottom() - bh - dp_to_px(12.0),
            w: bw,
            h: bh,
        }
    }

    fn choose(&mut self, i: usize) {
        if let Some(cb) = &self.on_choose {
            cb(i);
        }
    }

    /// Returns false once the popup is done and should be dropped.
    pub fn click(&mut self, x: f32, y: f32) -> bool {
        let p = Vec2::new(x, y);
        for i in 0..self.buttons.len() {
            if self.button_rect(i).contains(p) {
                self.choose(i);
                return false;
            }
        }
        // clicks inside the body are swallowed; clicks outside cancel
        self.rect.contains(p)
    }

    pub fn mouse_move(&mut self, x: f32, y: f32) {
        let p = Vec2::new(x, y);
        for i in 0..self.buttons.len() {
            if self.button_rect(i).contains(p) {
                self.focused = i;
            }
        }
    }

    /// Keyboard handling; same closed-means-drop contract as `click`.
    pub fn vkey(&mut self, key: vitrine_core::VirtualKey) -> bool {
        use vitrine_core::VirtualKey;
        match key {
            VirtualKey::Left => {
                self.focused = self.focused.saturating_sub(1);
                true
            }
            VirtualKey::Right => {
                self.focused = (self.focused + 1).min(self.buttons.len() - 1);
                true
            }
            VirtualKey::Enter => {
                let i = self.focused;
                self.choose(i);
                false
            }
            VirtualKey::Escape => false,
            _ => true,
        }
    }

    pub fn draw(&self, list: &mut DrawList) {
        let th = theme();
        list.rect(self.rect, th.overlay_bg);
        list.border(self.rect, th.overlay_border, dp_to_px(1.0));
        for i in 0..self.buttons.len() {
            let r = self.button_rect(i);
            let bg = if i == self.focused {
                th.control_bg_hover
            } else {
                th.control_bg
            };
            list.rect(r, bg);
            list.border(r, th.outline, dp_to_px(1.0));
        }
    }

    pub fn draw_labels(&self, list: &mut DrawList) {
        let th = theme();
        let font = dp_to_px(FONT_DP);
        let title_w = text_width_estimate(&self.title, font);
        list.text(
            (
                self.rect.x + (self.rect.w - title_w) * 0.5,
                self.rect.y + dp_to_px(10.0),
            ),
            self.title.clone(),
            th.label,
            font,
        );
        let msg_w = text_width_estimate(&self.message, font);
        list.text(
            (
                self.rect.x + (self.rect.w - msg_w) * 0.5,
                self.rect.y + dp_to_px(34.0),
            ),
            self.message.clone(),
            th.value,
            font,
        );
        for (i, label) in self.buttons.iter().enumerate() {
            list.text_centered(self.button_rect(i), label.clone(), th.label, font);
        }
    }
}
