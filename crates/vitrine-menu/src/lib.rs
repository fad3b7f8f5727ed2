//! # Vitrine menu
//!
//! Retained-mode settings pages for the in-emulator overlay. A [`Page`]
//! owns a set of controls, hit-tests mouse/keyboard/gamepad input against
//! its sorted registry, keeps at most one control "open" at a time, and
//! coordinates the overlay pass for dropdowns and popups.
//!
//! Building a page:
//!
//! ```rust
//! use vitrine_core::Rect;
//! use vitrine_menu::{Binding, Checkbox, ComboBox, Page};
//!
//! let mut page = Page::new(Rect::new(0.0, 0.0, 480.0, 320.0));
//!
//! let vsync = page.add(Checkbox::new(
//!     Rect::new(10.0, 10.0, 440.0, 24.0),
//!     "VSync",
//!     Binding::new(true),
//! ));
//! let filter = page.add(ComboBox::new(
//!     Rect::new(10.0, 40.0, 440.0, 24.0),
//!     "Texture filter",
//!     vec!["Nearest".into(), "Bilinear".into()],
//!     Binding::new(0),
//! ));
//!
//! page.register_controls(vec![
//!     page.registration(vsync).tooltip("Sync to the host display"),
//!     page.registration(filter),
//! ]);
//! ```
//!
//! Per frame, the host renderer calls `draw_backgrounds` (which returns
//! whether the overlay passes are needed), `draw_labels`, and conditionally
//! `draw_foregrounds` / `draw_foreground_labels`, feeding each resulting
//! draw list to its `RenderBackend`.

pub mod binding;
pub mod control;
pub mod controls;
pub mod overlay;
pub mod page;
pub mod popup;
pub mod registry;
pub mod scroll;

mod tests;

pub use binding::{Binding, EnabledIf};
pub use control::{Control, ControlKind, ControlStatus, DrawCtx, PageCtx};
pub use controls::{
    Button, Checkbox, ComboBox, KeyBind, Ruler, Scrollbar, Slider, TextBox, Tile,
};
pub use overlay::OverlayPass;
pub use page::Page;
pub use popup::Popup;
pub use registry::{ControlKey, ControlRegistration, ControlRegistry};
pub use scroll::ScrollView;
