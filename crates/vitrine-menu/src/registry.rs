//! Control registry: ordered bounding-box records for one page.
//!
//! Entries are sorted by ascending top, then left, with all fixed entries
//! (scrollbar, anything pinned to the window) forming the suffix. Hit-tests
//! scan the fixed suffix backward first — fixed controls draw on top — then
//! binary-search the scrolling prefix in content space.

use std::cmp::Ordering;

use slotmap::new_key_type;
use vitrine_core::Rect;

new_key_type! {
    /// Stable handle into a page's control arena. A rebuild replaces the
    /// arena, so keys held across it simply stop resolving; nothing dangles.
    pub struct ControlKey;
}

/// One hit-testable record. Bounds are cached at registration time, in
/// content-local coordinates (window-local when `fixed`); a control that
/// moves or resizes requires re-registration.
#[derive(Clone, Debug)]
pub struct ControlRegistration {
    pub key: ControlKey,
    pub top: f32,
    pub bottom: f32,
    pub left: f32,
    pub right: f32,
    pub fixed: bool,
    pub tooltip: Option<String>,
    /// Extra hit-test slack past the right edge; labels rendered after a
    /// value (unit suffixes) stay clickable through this.
    pub right_pad: f32,
}

impl ControlRegistration {
    pub fn from_bounds(key: ControlKey, rect: Rect) -> Self {
        Self {
            key,
            top: rect.y,
            bottom: rect.bottom(),
            left: rect.x,
            right: rect.right(),
            fixed: false,
            tooltip: None,
            right_pad: 0.0,
        }
    }

    pub fn fixed(mut self) -> Self {
        self.fixed = true;
        self
    }

    pub fn tooltip(mut self, text: impl Into<String>) -> Self {
        self.tooltip = Some(text.into());
        self
    }

    pub fn right_pad(mut self, pad: f32) -> Self {
        self.right_pad = pad;
        self
    }

    pub fn contains(&self, x: f32, y: f32) -> bool {
        y >= self.top && y <= self.bottom && x >= self.left && x <= self.right + self.right_pad
    }

    /// Orders this entry against a point: `Less` when the entry lies before
    /// it (above, or left of it on the same row), `Greater` when after,
    /// `Equal` on a hit. Drives the binary search.
    fn cmp_point(&self, x: f32, y: f32) -> Ordering {
        if self.bottom < y {
            Ordering::Less
        } else if self.top > y {
            Ordering::Greater
        } else if self.right + self.right_pad < x {
            Ordering::Less
        } else if self.left > x {
            Ordering::Greater
        } else {
            Ordering::Equal
        }
    }

    fn sort_key(&self) -> (f32, f32) {
        (self.top, self.left)
    }
}

/// The page's ordered registration collection.
#[derive(Default)]
pub struct ControlRegistry {
    entries: Vec<ControlRegistration>,
    fixed_start: usize,
}

impl ControlRegistry {
    /// Replaces the whole collection. The ordering invariant (row-major
    /// prefix, fixed suffix) is asserted in debug builds; release builds
    /// repair a violated order with a stable sort and log it, since a
    /// mis-sorted registry would quietly break the binary search.
    pub fn replace(&mut self, mut entries: Vec<ControlRegistration>) {
        debug_assert!(
            Self::is_ordered(&entries),
            "control registrations out of order (row-major prefix + fixed suffix required)"
        );
        if !Self::is_ordered(&entries) {
            log::warn!(
                "repairing mis-ordered control registry ({} entries)",
                entries.len()
            );
            entries.sort_by(|a, b| {
                a.fixed.cmp(&b.fixed).then_with(|| {
                    a.sort_key()
                        .partial_cmp(&b.sort_key())
                        .unwrap_or(Ordering::Equal)
                })
            });
        }
        self.fixed_start = entries
            .iter()
            .position(|e| e.fixed)
            .unwrap_or(entries.len());
        self.entries = entries;
    }

    pub fn clear(&mut self) {
        self.entries.clear();
        self.fixed_start = 0;
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Number of non-fixed (scrolling) entries; they occupy `0..prefix`.
    pub fn scrolled_len(&self) -> usize {
        self.fixed_start
    }

    pub fn get(&self, index: usize) -> Option<&ControlRegistration> {
        self.entries.get(index)
    }

    pub fn entries(&self) -> &[ControlRegistration] {
        &self.entries
    }

    /// Hit-test a window-space point. `scroll` is the page's current scroll
    /// offset; the point is translated into content space for the scrolling
    /// prefix, and used as-is for the fixed suffix.
    pub fn find_at(&self, x: f32, y: f32, scroll: f32) -> Option<usize> {
        // Fixed suffix, backward: topmost drawn wins.
        for i in (self.fixed_start..self.entries.len()).rev() {
            if self.entries[i].contains(x, y) {
                return Some(i);
            }
        }
        if self.fixed_start == 0 {
            return None;
        }

        let cy = y + scroll;
        let prefix = &self.entries[..self.fixed_start];
        prefix
            .binary_search_by(|e| e.cmp_point(x, cy))
            .ok()
            .map(|i| {
                // binary_search lands on *a* hit; with non-overlapping
                // entries that is the hit
                debug_assert!(prefix[i].contains(x, cy));
                i
            })
    }

    fn is_ordered(entries: &[ControlRegistration]) -> bool {
        let mut seen_fixed = false;
        let mut prev: Option<(f32, f32)> = None;
        for e in entries {
            if e.fixed {
                seen_fixed = true;
                continue;
            }
            if seen_fixed {
                return false; // fixed entries must be the suffix
            }
            let key = e.sort_key();
            if let Some(p) = prev
                && key < p
            {
                return false;
            }
            prev = Some(key);
        }
        true
    }
}
