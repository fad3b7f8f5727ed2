use std::rc::Rc;

use vitrine_core::{DrawList, Rect, dp_to_px, theme};

use crate::binding::EnabledIf;
use crate::control::{Control, ControlKind, DrawCtx, PageCtx};
use crate::controls::ROW_FONT_DP;
use crate::popup::Popup;

/// Card-style entry in a grouped list (memory cards, shader presets, cheat
/// files). Activating a tile edits it; Delete removes it, optionally behind
/// a confirm popup staged through the dispatch context.
pub struct Tile {
    rect: Rect,
    title: String,
    subtitle: String,
    on_edit: Option<Rc<dyn Fn()>>,
    on_remove: Option<Rc<dyn Fn()>>,
    confirm_remove: bool,
    enabled_if: Option<EnabledIf>,
}

impl Tile {
    pub fn new(rect: Rect, title: impl Into<String>, subtitle: impl Into<String>) -> Self {
        Self {
            rect,
            title: title.into(),
            subtitle: subtitle.into(),
            on_edit: None,
            on_remove: None,
            confirm_remove: false,
            enabled_if: None,
        }
    }

    pub fn on_edit(mut self, f: impl Fn() + 'static) -> Self {
        self.on_edit = Some(Rc::new(f));
        self
    }

    pub fn on_remove(mut self, f: impl Fn() + 'static) -> Self {
        self.on_remove = Some(Rc::new(f));
        self
    }

    /// Route removal through a confirm dialog instead of firing directly.
    pub fn confirm_remove(mut self) -> Self {
        self.confirm_remove = true;
        self
    }

    pub fn enabled_if(mut self, f: impl Fn() -> bool + 'static) -> Self {
        self.enabled_if = Some(std::rc::Rc::new(f));
        self
    }
}

impl Control for Tile {
    fn kind(&self) -> ControlKind {
        ControlKind::Tile
    }

    fn bounds(&self) -> Rect {
        self.rect
    }

    fn enabled(&self) -> bool {
        self.enabled_if.as_ref().map(|f| f()).unwrap_or(true)
    }

    fn click(&mut self, ctx: &mut PageCtx, _x: f32, _y: f32) -> bool {
        self.edit(ctx);
        false
    }

    fn edit(&mut self, _ctx: &mut PageCtx) {
        if let Some(f) = &self.on_edit {
            f();
        }
    }

    fn clear_value(&mut self, ctx: &mut PageCtx) {
        let Some(remove) = self.on_remove.clone() else {
            return;
        };
        if self.confirm_remove {
            ctx.open_popup(Popup::confirm(
                "Remove",
                format!("Remove \"{}\"?", self.title),
                vec!["Remove".to_string(), "Cancel".to_string()],
                move |choice| {
                    if choice == 0 {
                        remove();
                    }
                },
            ));
        } else {
            remove();
        }
    }

    fn draw(&self, list: &mut DrawList, ctx: &DrawCtx) {
        let th = theme();
        list.rect(self.rect, crate::controls::body_color(ctx.status));
        list.border(self.rect, th.outline, dp_to_px(1.0));
    }

    fn draw_label(&self, list: &mut DrawList, ctx: &DrawCtx) {
        let th = theme();
        let font = dp_to_px(ROW_FONT_DP);
        let small = dp_to_px(ROW_FONT_DP - 3.0);
        list.text(
            (self.rect.x + dp_to_px(8.0), self.rect.y + dp_to_px(6.0)),
            self.title.clone(),
            crate::controls::label_color(ctx.status),
            font,
        );
        list.text(
            (
                self.rect.x + dp_to_px(8.0),
                self.rect.y + dp_to_px(6.0) + font + dp_to_px(2.0),
            ),
            self.subtitle.clone(),
            th.value,
            small,
        );
    }
}
