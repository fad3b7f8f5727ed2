//! # Theming and locals
//!
//! Vitrine uses thread-local "composition locals" for global UI parameters:
//!
//! - `Theme` — colors for page chrome, controls, tooltip strip, overlays.
//! - `Density` — dp→px scale factor, driven by the emulator window size.
//!
//! Override either for a scope with `with_theme` / `with_density`:
//!
//! ```rust
//! use vitrine_core::*;
//!
//! let light = Theme {
//!     page_background: Color::from_hex("#F5F5F5"),
//!     label: Color::from_hex("#222222"),
//!     ..Theme::default()
//! };
//!
//! with_theme(light, || {
//!     // all pages drawn here see the light theme
//! });
//! ```
//!
//! Controls read from `theme()` and should avoid hard-coding colors.

use std::any::{Any, TypeId};
use std::cell::RefCell;
use std::collections::HashMap;

use crate::Color;

thread_local! {
    static LOCALS_STACK: RefCell<Vec<HashMap<TypeId, Box<dyn Any>>>> = RefCell::new(Vec::new());
}

/// density-independent pixels (dp)
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Dp(pub f32);

impl Dp {
    pub fn to_px(self) -> f32 {
        self.0 * density().scale
    }
}

/// Convenience: convert a raw dp scalar into px using current Density.
pub fn dp_to_px(dp: f32) -> f32 {
    Dp(dp).to_px()
}

fn with_locals_frame<R>(f: impl FnOnce() -> R) -> R {
    // Frame guard, pops on unwind too
    struct Guard;
    impl Drop for Guard {
        fn drop(&mut self) {
            LOCALS_STACK.with(|st| {
                st.borrow_mut().pop();
            });
        }
    }
    LOCALS_STACK.with(|st| st.borrow_mut().push(HashMap::new()));
    let _guard = Guard;
    f()
}

fn set_local_boxed(t: TypeId, v: Box<dyn Any>) {
    LOCALS_STACK.with(|st| {
        if let Some(top) = st.borrow_mut().last_mut() {
            top.insert(t, v);
        } else {
            let mut m = HashMap::new();
            m.insert(t, v);
            st.borrow_mut().push(m);
        }
    });
}

fn get_local<T: Copy + Default + 'static>() -> T {
    LOCALS_STACK.with(|st| {
        for frame in st.borrow().iter().rev() {
            if let Some(v) = frame.get(&TypeId::of::<T>())
                && let Some(t) = v.downcast_ref::<T>()
            {
                return *t;
            }
        }
        T::default()
    })
}

/// Color theme for the settings menu. Semantic slots, not a full material
/// scheme; localization/theme data packs populate these from outside.
#[derive(Clone, Copy, Debug)]
pub struct Theme {
    /// Page background behind the rows.
    pub page_background: Color,
    /// Row highlight following the hovered/selected control.
    pub row_highlight: Color,
    /// Label text.
    pub label: Color,
    /// Value text (the right-hand column).
    pub value: Color,
    /// Disabled text.
    pub disabled: Color,

    /// Control body fill.
    pub control_bg: Color,
    /// Control body fill on hover.
    pub control_bg_hover: Color,
    /// Low-emphasis outline/border color.
    pub outline: Color,
    /// Accent fill (check marks, slider fill, selected option).
    pub accent: Color,

    /// Dropdown/popup surface.
    pub overlay_bg: Color,
    /// Border of overlay surfaces.
    pub overlay_border: Color,

    /// Tooltip strip background (fixed bottom bar).
    pub tooltip_bg: Color,
    /// Tooltip strip text.
    pub tooltip_text: Color,

    /// Scrollbar track background (low emphasis).
    pub scrollbar_track: Color,
    /// Scrollbar thumb (higher emphasis).
    pub scrollbar_thumb: Color,

    /// Key-binding control while capturing input.
    pub capture_bg: Color,
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            page_background: Color::from_hex("#101418"),
            row_highlight: Color(0x3A, 0x6E, 0xA5, 96),
            label: Color::from_hex("#DDDDDD"),
            value: Color::from_hex("#AFC8E0"),
            disabled: Color::from_hex("#666666"),
            control_bg: Color::from_hex("#1E242B"),
            control_bg_hover: Color::from_hex("#2A333D"),
            outline: Color::from_hex("#555555"),
            accent: Color::from_hex("#4C9BE0"),
            overlay_bg: Color::from_hex("#161B21"),
            overlay_border: Color::from_hex("#4C9BE0"),
            tooltip_bg: Color(0x00, 0x00, 0x00, 200),
            tooltip_text: Color::from_hex("#C8C8C8"),
            scrollbar_track: Color(0xDD, 0xDD, 0xDD, 32),
            scrollbar_thumb: Color(0xDD, 0xDD, 0xDD, 140),
            capture_bg: Color::from_hex("#5A3A1E"),
        }
    }
}

#[derive(Clone, Copy, Debug)]
pub struct Density {
    pub scale: f32, // dp→px multiplier
}

impl Default for Density {
    fn default() -> Self {
        Self { scale: 1.0 }
    }
}

pub fn with_theme<R>(theme: Theme, f: impl FnOnce() -> R) -> R {
    with_locals_frame(|| {
        set_local_boxed(TypeId::of::<Theme>(), Box::new(theme));
        f()
    })
}

pub fn with_density<R>(density: Density, f: impl FnOnce() -> R) -> R {
    with_locals_frame(|| {
        set_local_boxed(TypeId::of::<Density>(), Box::new(density));
        f()
    })
}

pub fn theme() -> Theme {
    get_local::<Theme>()
}

pub fn density() -> Density {
    get_local::<Density>()
}
