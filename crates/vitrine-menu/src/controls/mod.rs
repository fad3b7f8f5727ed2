//! The fixed control set.
//!
//! Each control is a small retained struct implementing [`crate::Control`].
//! Rows follow the settings-page convention: label text on the left of the
//! control's rect, the interactive widget in the right-hand value column.

pub mod button;
pub mod checkbox;
pub mod combobox;
pub mod keybind;
pub mod ruler;
pub mod scrollbar;
pub mod slider;
pub mod textbox;
pub mod tile;

pub use button::Button;
pub use checkbox::Checkbox;
pub use combobox::ComboBox;
pub use keybind::KeyBind;
pub use ruler::Ruler;
pub use scrollbar::Scrollbar;
pub use slider::Slider;
pub use textbox::TextBox;
pub use tile::Tile;

use vitrine_core::{Color, Rect, dp_to_px, theme};

use crate::control::ControlStatus;

/// Row font size, dp.
pub(crate) const ROW_FONT_DP: f32 = 14.0;
/// Inner padding of a row, dp.
pub(crate) const ROW_PAD_DP: f32 = 6.0;

/// The widget portion of a row rect (right-hand value column).
pub(crate) fn value_rect(rect: Rect) -> Rect {
    let w = rect.w * 0.4;
    Rect {
        x: rect.right() - w,
        y: rect.y,
        w,
        h: rect.h,
    }
}

pub(crate) fn label_color(status: ControlStatus) -> Color {
    let th = theme();
    match status {
        ControlStatus::Disabled => th.disabled,
        _ => th.label,
    }
}

pub(crate) fn body_color(status: ControlStatus) -> Color {
    let th = theme();
    match status {
        ControlStatus::Hover => th.control_bg_hover,
        _ => th.control_bg,
    }
}

/// Label baseline position inside a row.
pub(crate) fn label_pos(rect: Rect) -> (f32, f32) {
    let font = dp_to_px(ROW_FONT_DP);
    (
        rect.x + dp_to_px(ROW_PAD_DP),
        rect.y + (rect.h - font).max(0.0) * 0.5,
    )
}
