//! # Vitrine core
//!
//! Shared vocabulary for the settings-menu toolkit: geometry, colors, the
//! raw input types the host feeds into pages, thread-local theme/density
//! locals, and the draw-list boundary the plugin renderer consumes.
//!
//! Nothing in this crate touches the GPU or the window system; the page
//! engine in `vitrine-menu` builds on these types, and the host implements
//! [`RenderBackend`] on its side of the fence.

pub mod color;
pub mod draw;
pub mod geometry;
pub mod input;
pub mod theme;


pub use color::*;
pub use draw::*;
pub use geometry::*;
pub use input::*;
pub use theme::*;
