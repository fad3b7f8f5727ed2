use unicode_segmentation::UnicodeSegmentation;
use vitrine_core::{DrawList, Rect, VirtualKey, dp_to_px, text_width_estimate, theme};
use web_time::{Duration, Instant};

use crate::binding::{Binding, EnabledIf};
use crate::control::{Control, ControlKind, DrawCtx, PageCtx};
use crate::controls::{ROW_FONT_DP, label_color, label_pos, value_rect};

const BLINK: Duration = Duration::from_millis(500);

/// Single-line text entry (resolution overrides, file name patterns).
/// "Open" means edit mode: printable characters insert at the caret, and
/// Enter/Tab/Escape commit and release input ownership.
///
/// The caret moves over extended grapheme clusters, never through them.
pub struct TextBox {
    rect: Rect,
    label: String,
    text: Binding<String>,
    editing: bool,
    caret: usize, // byte offset, always a grapheme boundary
    blink_start: Instant,
    max_len: Option<usize>,
    enabled_if: Option<EnabledIf>,
}

fn prev_grapheme_boundary(text: &str, byte: usize) -> usize {
    let mut last = 0usize;
    for (i, _) in text.grapheme_indices(true) {
        if i >= byte {
            break;
        }
        last = i;
    }
    last
}

fn next_grapheme_boundary(text: &str, byte: usize) -> usize {
    for (i, _) in text.grapheme_indices(true) {
        if i > byte {
            return i;
        }
    }
    text.len()
}

impl TextBox {
    pub fn new(rect: Rect, label: impl Into<String>, text: Binding<String>) -> Self {
        Self {
            rect,
            label: label.into(),
            text,
            editing: false,
            caret: 0,
            blink_start: Instant::now(),
            max_len: None,
            enabled_if: None,
        }
    }

    /// Limit in grapheme clusters, not bytes.
    pub fn max_len(mut self, n: usize) -> Self {
        self.max_len = Some(n);
        self
    }

    pub fn enabled_if(mut self, f: impl Fn() -> bool + 'static) -> Self {
        self.enabled_if = Some(std::rc::Rc::new(f));
        self
    }

    pub fn is_editing(&self) -> bool {
        self.editing
    }

    pub fn caret(&self) -> usize {
        self.caret
    }

    fn field(&self) -> Rect {
        value_rect(self.rect).inflate(-dp_to_px(1.0), -dp_to_px(3.0))
    }

    fn reset_blink(&mut self) {
        self.blink_start = Instant::now();
    }

    fn caret_visible(&self) -> bool {
        ((Instant::now() - self.blink_start).as_millis() / BLINK.as_millis()) % 2 == 0
    }

    /// Nearest grapheme boundary for a click at `x`, using the same advance
    /// estimate the draw path uses.
    fn caret_for_x(&self, x: f32) -> usize {
        let font = dp_to_px(ROW_FONT_DP);
        let origin = self.field().x + dp_to_px(4.0);
        let text = self.text.get();
        let mut best = 0usize;
        let mut best_d = f32::INFINITY;
        let mut advance = 0.0f32;
        for (i, g) in text
            .grapheme_indices(true)
            .chain(std::iter::once((text.len(), "")))
        {
            let d = (origin + advance - x).abs();
            if d < best_d {
                best_d = d;
                best = i;
            }
            advance += text_width_estimate(g, font);
        }
        best
    }
}

impl Control for TextBox {
    fn kind(&self) -> ControlKind {
        ControlKind::TextBox
    }

    fn bounds(&self) -> Rect {
        self.rect
    }

    fn enabled(&self) -> bool {
        self.enabled_if.as_ref().map(|f| f()).unwrap_or(true)
    }

    fn is_open(&self) -> bool {
        self.editing
    }

    fn click(&mut self, _ctx: &mut PageCtx, x: f32, _y: f32) -> bool {
        if !self.editing {
            self.editing = true;
            self.caret = self.text.get().len();
        } else {
            self.caret = self.caret_for_x(x);
        }
        self.reset_blink();
        true
    }

    fn key_char(&mut self, c: char) {
        if !self.editing || c.is_control() {
            return;
        }
        if let Some(limit) = self.max_len
            && self.text.get().graphemes(true).count() >= limit
        {
            return;
        }
        let caret = self.caret;
        self.text.update(|t| t.insert(caret.min(t.len()), c));
        self.caret = (caret + c.len_utf8()).min(self.text.get().len());
        self.reset_blink();
    }

    fn vkey(&mut self, _ctx: &mut PageCtx, key: VirtualKey) -> bool {
        if !self.editing {
            return false;
        }
        let text = self.text.get();
        match key {
            VirtualKey::Left => {
                self.caret = prev_grapheme_boundary(&text, self.caret);
            }
            VirtualKey::Right => {
                self.caret = next_grapheme_boundary(&text, self.caret);
            }
            VirtualKey::Home => self.caret = 0,
            VirtualKey::End => self.caret = text.len(),
            VirtualKey::Backspace => {
                if self.caret > 0 {
                    let prev = prev_grapheme_boundary(&text, self.caret);
                    let caret = self.caret;
                    self.text.update(|t| {
                        t.replace_range(prev..caret, "");
                    });
                    self.caret = prev;
                }
            }
            VirtualKey::Delete => {
                if self.caret < text.len() {
                    let next = next_grapheme_boundary(&text, self.caret);
                    let caret = self.caret;
                    self.text.update(|t| {
                        t.replace_range(caret..next, "");
                    });
                }
            }
            VirtualKey::Enter | VirtualKey::Tab | VirtualKey::Escape => {
                self.editing = false;
                return false;
            }
            _ => {}
        }
        self.reset_blink();
        true
    }

    fn close(&mut self) {
        self.editing = false;
    }

    fn draw(&self, list: &mut DrawList, ctx: &DrawCtx) {
        let th = theme();
        let f = self.field();
        list.rect(f, crate::controls::body_color(ctx.status));
        list.border(
            f,
            if self.editing { th.accent } else { th.outline },
            dp_to_px(1.0),
        );
        if self.editing && self.caret_visible() {
            let font = dp_to_px(ROW_FONT_DP);
            let text = self.text.get();
            let prefix = &text[..self.caret.min(text.len())];
            let cx = f.x + dp_to_px(4.0) + text_width_estimate(prefix, font);
            list.line(
                (cx, f.y + dp_to_px(3.0)),
                (cx, f.bottom() - dp_to_px(3.0)),
                th.label,
                dp_to_px(1.0),
            );
        }
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
        let f = self.field();
        list.text(
            (f.x + dp_to_px(4.0), f.y + (f.h - font).max(0.0) * 0.5),
            self.text.get(),
            th.value,
            font,
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::control::PageCtx;
    use crate::popup::Popup;
    use crate::scroll::ScrollView;

    fn ctx_parts() -> (ScrollView, bool, Option<Popup>) {
        (ScrollView::new(200.0), false, None)
    }

    fn edit_box(initial: &str) -> TextBox {
        let mut tb = TextBox::new(
            Rect::new(0.0, 0.0, 200.0, 24.0),
            "Name",
            Binding::new(initial.to_string()),
        );
        let (mut sv, mut rb, mut pp) = ctx_parts();
        let mut ctx = PageCtx {
            scroll: &mut sv,
            page_rect: Rect::new(0.0, 0.0, 400.0, 300.0),
            rebuild: &mut rb,
            pending_popup: &mut pp,
        };
        assert!(tb.click(&mut ctx, 10.0, 10.0));
        tb
    }

    #[test]
    fn insert_and_commit() {
        let mut tb = edit_box("");
        tb.key_char('h');
        tb.key_char('i');
        assert_eq!(tb.text.get(), "hi");

        let (mut sv, mut rb, mut pp) = ctx_parts();
        let mut ctx = PageCtx {
            scroll: &mut sv,
            page_rect: Rect::default(),
            rebuild: &mut rb,
            pending_popup: &mut pp,
        };
        assert!(!tb.vkey(&mut ctx, VirtualKey::Enter));
        assert!(!tb.is_editing());
    }

    #[test]
    fn caret_moves_over_grapheme_clusters() {
        // thumbs-up + skin tone is one cluster
        let mut tb = edit_box("A\u{1F44D}\u{1F3FD}B");
        let (mut sv, mut rb, mut pp) = ctx_parts();
        let mut ctx = PageCtx {
            scroll: &mut sv,
            page_rect: Rect::default(),
            rebuild: &mut rb,
            pending_popup: &mut pp,
        };
        assert!(tb.vkey(&mut ctx, VirtualKey::Left)); // before B
        assert!(tb.vkey(&mut ctx, VirtualKey::Left)); // before the cluster
        assert_eq!(tb.caret(), "A".len());
        assert!(tb.vkey(&mut ctx, VirtualKey::Delete)); // removes the whole cluster
        assert_eq!(tb.text.get(), "AB");
    }

    #[test]
    fn backspace_removes_previous_cluster() {
        let mut tb = edit_box("A\u{1F44D}\u{1F3FD}");
        let (mut sv, mut rb, mut pp) = ctx_parts();
        let mut ctx = PageCtx {
            scroll: &mut sv,
            page_rect: Rect::default(),
            rebuild: &mut rb,
            pending_popup: &mut pp,
        };
        assert!(tb.vkey(&mut ctx, VirtualKey::Backspace));
        assert_eq!(tb.text.get(), "A");
        assert_eq!(tb.caret(), 1);
    }

    #[test]
    fn max_len_counts_graphemes() {
        let mut tb = edit_box("");
        tb.max_len = Some(2);
        tb.key_char('a');
        tb.key_char('b');
        tb.key_char('c');
        assert_eq!(tb.text.get(), "ab");
    }
}
