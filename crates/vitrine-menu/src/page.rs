//! The page interaction engine.
//!
//! A [`Page`] owns the controls of one settings page (arena), their ordered
//! hit-test registry, the scroll viewport, and the interaction state: which
//! row is hovered/selected, which single control currently owns input (is
//! "open"), and whether a modal popup is up. Raw input from the host comes
//! in through `mouse_*`, `key_down`, `vkey_down` and `pad_button_down`; the
//! renderer pulls four draw passes per frame and asks whether an overlay
//! pass is needed.
//!
//! Exactly one of {open control, popup} can own input at a time. Every
//! branch that releases the open control clears the handle before any
//! further dispatch, and the handle is re-validated against the arena after
//! operations that may have requested a page rebuild — a stale key simply
//! stops resolving.

use slotmap::SlotMap;
use vitrine_core::{
    DrawList, DrawSpace, PadButton, Rect, Vec2, VirtualKey, dp_to_px, text_width_estimate, theme,
};

use crate::control::{Control, ControlKind, ControlStatus, DrawCtx, PageCtx};
use crate::controls::Scrollbar;
use crate::overlay::OverlayPass;
use crate::popup::Popup;
use crate::registry::{ControlKey, ControlRegistration, ControlRegistry};
use crate::scroll::ScrollView;

/// Padding revealed past a control when auto-scrolling it into view.
const AUTO_SCROLL_PAD_DP: f32 = 10.0;
/// Wheel scroll per notch.
const WHEEL_STEP_DP: f32 = 32.0;
/// Height of the fixed tooltip strip at the page bottom.
const TOOLTIP_BAR_DP: f32 = 24.0;
/// Row-highlight horizontal snap, label column vs. value column.
const SNAP_WIDE_DP: f32 = 12.0;
const SNAP_NARROW_DP: f32 = 4.0;
/// Row-highlight vertical padding.
const ROW_HL_PAD_DP: f32 = 2.0;
/// Extra content below the last row.
const CONTENT_PAD_DP: f32 = 8.0;

const SCROLLBAR_W_DP: f32 = 8.0;
const SCROLLBAR_MARGIN_DP: f32 = 2.0;

pub struct Page {
    rect: Rect,
    controls: SlotMap<ControlKey, Box<dyn Control>>,
    registry: ControlRegistry,
    scroll: ScrollView,
    scrollbar_key: ControlKey,

    active: Option<usize>,
    open_key: Option<ControlKey>,
    open_fixed: bool,
    popup: Option<Popup>,
    pending_popup: Option<Popup>,

    mouse_down: bool,
    drag_scrollbar: bool,
    controller_hints: bool,

    highlight: Option<Rect>,
    tooltip: String,
    tooltip_bar_h: f32,
    frame_mouse: (f32, f32),
    rebuild_needed: bool,
}

impl Page {
    pub fn new(rect: Rect) -> Self {
        let mut controls: SlotMap<ControlKey, Box<dyn Control>> = SlotMap::with_key();
        let scrollbar_key = controls.insert(Box::new(Scrollbar::new(Self::scrollbar_track(rect))));
        let mut scroll = ScrollView::new(rect.h);
        let tooltip_bar_h = dp_to_px(TOOLTIP_BAR_DP);
        scroll.set_reserved_bottom(tooltip_bar_h);
        Self {
            rect,
            controls,
            registry: ControlRegistry::default(),
            scroll,
            scrollbar_key,
            active: None,
            open_key: None,
            open_fixed: false,
            popup: None,
            pending_popup: None,
            mouse_down: false,
            drag_scrollbar: false,
            controller_hints: false,
            highlight: None,
            tooltip: String::new(),
            tooltip_bar_h,
            frame_mouse: (-1.0, -1.0),
            rebuild_needed: false,
        }
    }

    fn scrollbar_track(rect: Rect) -> Rect {
        let w = dp_to_px(SCROLLBAR_W_DP);
        let m = dp_to_px(SCROLLBAR_MARGIN_DP);
        Rect {
            x: rect.right() - m - w,
            y: rect.y + m,
            w,
            h: (rect.h - 2.0 * m).max(0.0),
        }
    }

    /// Layout changed: scroll and all interaction state reset, cached
    /// registrations are invalid, and the host must rebuild its controls.
    pub fn set_rect(&mut self, rect: Rect) {
        self.rect = rect;
        self.scroll.reset();
        self.scroll.set_viewport_height(rect.h);
        let track = Self::scrollbar_track(rect);
        if let Some(sb) = self.controls.get_mut(self.scrollbar_key) {
            *sb = Box::new(Scrollbar::new(track));
        }
        self.registry.clear();
        self.open_key = None;
        self.popup = None;
        self.drag_scrollbar = false;
        self.mouse_down = false;
        self.clear_hover();
    }

    pub fn rect(&self) -> Rect {
        self.rect
    }

    /// Height of the fixed tooltip strip; 0 disables it.
    pub fn set_tooltip_bar_height(&mut self, h: f32) {
        self.tooltip_bar_h = h.max(0.0);
        self.scroll.set_reserved_bottom(self.tooltip_bar_h);
    }

    // ---- building ---------------------------------------------------------

    pub fn add(&mut self, control: impl Control + 'static) -> ControlKey {
        self.controls.insert(Box::new(control))
    }

    pub fn control(&self, key: ControlKey) -> Option<&dyn Control> {
        self.controls.get(key).map(|b| b.as_ref())
    }

    /// Registration snapshot of a control's current bounds; decorate with
    /// `.tooltip(..)`, `.right_pad(..)`, `.fixed()` before registering.
    pub fn registration(&self, key: ControlKey) -> ControlRegistration {
        let bounds = self
            .controls
            .get(key)
            .map(|c| c.bounds())
            .unwrap_or_default();
        ControlRegistration::from_bounds(key, bounds)
    }

    /// (Re)populates the registry after a build. The scrollbar registration
    /// is appended automatically as the trailing fixed entry; content height
    /// is recomputed from the deepest scrolling row; open/active state
    /// resets so no stale index survives the swap.
    pub fn register_controls(&mut self, mut regs: Vec<ControlRegistration>) {
        let content = regs
            .iter()
            .filter(|r| !r.fixed)
            .map(|r| r.bottom)
            .fold(0.0f32, f32::max)
            + dp_to_px(CONTENT_PAD_DP);
        regs.push(self.registration(self.scrollbar_key).fixed());

        self.close_open();
        self.registry.replace(regs);
        self.scroll.clear_extension();
        self.scroll.set_content_height(content);
        self.clear_hover();
        log::debug!(
            "page registry rebuilt: {} entries, content {:.0}px",
            self.registry.len(),
            content
        );
    }

    /// Drops the registry and the control arena (registry first: it only
    /// holds keys, but the order mirrors the ownership contract). The
    /// scrollbar is recreated since it lives in the same arena.
    pub fn clear_controls(&mut self) {
        self.registry.clear();
        self.open_key = None;
        self.clear_hover();
        self.controls.clear();
        let track = Self::scrollbar_track(self.rect);
        self.scrollbar_key = self.controls.insert(Box::new(Scrollbar::new(track)));
    }

    /// True once per requested rebuild; the host rebuilds the page's
    /// controls when it sees it.
    pub fn take_rebuild_request(&mut self) -> bool {
        std::mem::take(&mut self.rebuild_needed)
    }

    /// Installs a modal popup, closing any open control first.
    pub fn open_popup(&mut self, popup: Popup) {
        self.pending_popup = Some(popup);
        self.commit_pending();
    }

    // ---- state queries ----------------------------------------------------

    pub fn active_index(&self) -> Option<usize> {
        self.active
    }

    pub fn open_control(&self) -> Option<ControlKey> {
        self.open_key
    }

    pub fn popup_open(&self) -> bool {
        self.popup.is_some()
    }

    pub fn scroll_offset(&self) -> f32 {
        self.scroll.offset()
    }

    pub fn scroll_view(&self) -> &ScrollView {
        &self.scroll
    }

    pub fn tooltip(&self) -> &str {
        &self.tooltip
    }

    pub fn highlight(&self) -> Option<Rect> {
        self.highlight
    }

    /// True when the last input came from a controller; drives which hint
    /// icons (keyboard keys vs. pad buttons) the host renders.
    pub fn controller_hints(&self) -> bool {
        self.controller_hints
    }

    pub fn is_mouse_down(&self) -> bool {
        self.mouse_down
    }

    pub fn needs_overlay(&self) -> bool {
        let open = self
            .open_key
            .and_then(|k| self.controls.get(k))
            .map(|c| (c.kind(), c.is_open()));
        OverlayPass::needed(open, self.popup.is_some())
    }

    // ---- pointer input ----------------------------------------------------

    pub fn mouse_down(&mut self, x: f32, y: f32) {
        self.controller_hints = false;
        self.mouse_down = true;

        if self.scrollbar_hit(x, y) {
            self.clear_hover();
            self.drag_scrollbar = true;
            self.with_ctrl(self.scrollbar_key, |c, ctx| {
                c.click(ctx, x, y);
            });
            return;
        }

        if let Some(p) = self.popup.as_mut() {
            if !p.click(x, y) {
                self.popup = None;
            }
            return;
        }

        self.validate_open();
        if let Some(key) = self.open_key {
            let (cx, cy) = self.to_control_space(x, y, self.open_fixed);
            let inside = self
                .controls
                .get(key)
                .map(|c| c.open_bounds().contains(Vec2::new(cx, cy)))
                .unwrap_or(false);
            if inside {
                let still_open = self
                    .with_ctrl(key, |c, ctx| c.click(ctx, cx, cy))
                    .unwrap_or(false);
                if !still_open {
                    self.open_key = None;
                }
            } else {
                // click-elsewhere: close, consume the click. Hover is only
                // re-run when the content did not shrink underneath the
                // cursor (a combo retracting its dropdown moves the rows).
                let was_combo =
                    self.controls.get(key).map(|c| c.kind()) == Some(ControlKind::ComboBox);
                self.close_open();
                if !was_combo {
                    self.update_hover(x, y);
                }
            }
            self.commit_pending();
            self.check_invariants();
            return;
        }

        if let Some(idx) = self.registry.find_at(x, y, self.scroll.offset()) {
            let (key, fixed) = match self.registry.get(idx) {
                Some(r) => (r.key, r.fixed),
                None => return,
            };
            let enabled = self
                .controls
                .get(key)
                .map(|c| c.enabled())
                .unwrap_or(false);
            if enabled {
                let (cx, cy) = self.to_control_space(x, y, fixed);
                let now_open = self
                    .with_ctrl(key, |c, ctx| c.click(ctx, cx, cy))
                    .unwrap_or(false);
                // the handler may have requested a rebuild; never keep a
                // key the arena no longer resolves
                if now_open && self.controls.contains_key(key) {
                    self.open_key = Some(key);
                    self.open_fixed = fixed;
                }
            }
        }
        self.commit_pending();
        self.check_invariants();
    }

    pub fn mouse_move(&mut self, x: f32, y: f32) {
        if self.drag_scrollbar {
            self.clear_hover();
            self.with_ctrl(self.scrollbar_key, |c, ctx| c.mouse_move(ctx, x, y));
            return;
        }
        if let Some(p) = self.popup.as_mut() {
            p.mouse_move(x, y);
            return;
        }
        self.validate_open();
        if let Some(key) = self.open_key {
            let (cx, cy) = self.to_control_space(x, y, self.open_fixed);
            let inside = self
                .controls
                .get(key)
                .map(|c| c.open_bounds().contains(Vec2::new(cx, cy)))
                .unwrap_or(false);
            if inside {
                self.with_ctrl(key, |c, ctx| c.mouse_move(ctx, cx, cy));
            }
            return;
        }
        self.update_hover(x, y);
    }

    pub fn mouse_up(&mut self, x: f32, y: f32) {
        self.mouse_down = false;
        if self.drag_scrollbar {
            self.drag_scrollbar = false;
            self.with_ctrl(self.scrollbar_key, |c, ctx| {
                c.mouse_up(ctx, x, y);
            });
            return;
        }
        self.validate_open();
        if let Some(key) = self.open_key {
            let (cx, cy) = self.to_control_space(x, y, self.open_fixed);
            let now_closed = self
                .with_ctrl(key, |c, ctx| c.mouse_up(ctx, cx, cy))
                .unwrap_or(true);
            if now_closed {
                self.close_open();
            }
            self.check_invariants();
        }
        // no drag, nothing open: a stray mouse-up is a no-op
    }

    pub fn mouse_scroll(&mut self, x: f32, y: f32, delta: f32) {
        if self.popup.is_some() {
            return;
        }
        self.scroll.scroll_by(-delta * dp_to_px(WHEEL_STEP_DP));
        if self.open_key.is_none() {
            // content moved under the cursor
            self.update_hover(x, y);
        }
    }

    // ---- keyboard / pad input ---------------------------------------------

    /// Printable character; only routed to an open text-editing control.
    pub fn key_down(&mut self, c: char) {
        self.controller_hints = false;
        self.validate_open();
        if let Some(key) = self.open_key
            && self.controls.get(key).map(|k| k.kind()) == Some(ControlKind::TextBox)
            && let Some(ctrl) = self.controls.get_mut(key)
        {
            ctrl.key_char(c);
        }
    }

    /// Returns whether the key was consumed; the host closes the menu on an
    /// unhandled Escape.
    pub fn vkey_down(&mut self, key: VirtualKey) -> bool {
        self.controller_hints = false;
        self.dispatch_vkey(key)
    }

    pub fn pad_button_down(&mut self, button: PadButton) {
        self.controller_hints = true;
        self.validate_open();
        // while a key-binding control is capturing, the next pad button is
        // its value, not navigation
        if let Some(key) = self.open_key
            && self.controls.get(key).map(|c| c.kind()) == Some(ControlKind::KeyBind)
        {
            let still = self
                .with_ctrl(key, |c, ctx| c.capture_pad(ctx, button))
                .unwrap_or(false);
            if !still {
                self.open_key = None;
                if let Some(c) = self.controls.get_mut(key) {
                    c.close();
                }
            }
            self.check_invariants();
            return;
        }
        if let Some(vk) = button.to_vkey() {
            self.dispatch_vkey(vk);
        }
    }

    fn dispatch_vkey(&mut self, key: VirtualKey) -> bool {
        if let Some(p) = self.popup.as_mut() {
            if !p.vkey(key) {
                self.popup = None;
            }
            return true;
        }

        self.validate_open();
        if let Some(okey) = self.open_key {
            let still = self
                .with_ctrl(okey, |c, ctx| c.vkey(ctx, key))
                .unwrap_or(false);
            if !still {
                self.open_key = None;
                if let Some(c) = self.controls.get_mut(okey) {
                    c.close();
                }
            }
            self.commit_pending();
            self.check_invariants();
            return true;
        }

        let handled = match key {
            VirtualKey::Up => {
                self.select_line(-1);
                true
            }
            VirtualKey::Down => {
                self.select_line(1);
                true
            }
            VirtualKey::Left => self.adjust_or_move(-1),
            VirtualKey::Right => self.adjust_or_move(1),
            VirtualKey::Enter => self.activate_active(),
            VirtualKey::Delete => self.delete_on_active(),
            VirtualKey::Space => self.edit_active(),
            _ => false,
        };
        self.commit_pending();
        self.check_invariants();
        handled
    }

    // ---- navigation -------------------------------------------------------

    /// Keyboard selection to the nearest enabled row above/below, preferring
    /// horizontal alignment among that row's candidates, with auto-scroll.
    fn select_line(&mut self, dir: i32) {
        let prefix = self.registry.scrolled_len();
        if prefix == 0 {
            return;
        }
        let best = match self.active.filter(|&i| i < prefix) {
            Some(cur) => self.find_line_neighbor(cur, dir),
            None => {
                // entering from the edge the motion comes from
                if dir > 0 {
                    (0..prefix).find(|&i| self.reg_enabled(i))
                } else {
                    (0..prefix).rev().find(|&i| self.reg_enabled(i))
                }
            }
        };
        if let Some(i) = best {
            self.activate_index(i);
        }
    }

    fn find_line_neighbor(&self, cur: usize, dir: i32) -> Option<usize> {
        let prefix = self.registry.scrolled_len() as isize;
        let cur_reg = self.registry.get(cur)?;
        let cur_top = cur_reg.top;
        let cur_cx = (cur_reg.left + cur_reg.right) * 0.5;

        let step = dir.signum() as isize;
        let mut i = cur as isize + step;
        // skip the remainder of the current row
        while i >= 0 && i < prefix && self.registry.get(i as usize)?.top == cur_top {
            i += step;
        }
        // nearest row containing an enabled control; best horizontal fit
        let mut target_top: Option<f32> = None;
        let mut best: Option<(f32, usize)> = None;
        while i >= 0 && i < prefix {
            let reg = self.registry.get(i as usize)?;
            if let Some(t) = target_top
                && reg.top != t
            {
                break;
            }
            if self.reg_enabled(i as usize) {
                if target_top.is_none() {
                    target_top = Some(reg.top);
                }
                let dx = ((reg.left + reg.right) * 0.5 - cur_cx).abs();
                if best.map(|(d, _)| dx < d).unwrap_or(true) {
                    best = Some((dx, i as usize));
                }
            }
            i += step;
        }
        best.map(|(_, i)| i)
    }

    /// Selection within the current row; falls back to line entry when
    /// nothing is selected yet.
    fn select_in_line(&mut self, dir: i32) {
        let prefix = self.registry.scrolled_len() as isize;
        let Some(cur) = self.active.filter(|&i| (i as isize) < prefix) else {
            self.select_line(dir);
            return;
        };
        let cur_top = match self.registry.get(cur) {
            Some(r) => r.top,
            None => return,
        };
        let step = dir.signum() as isize;
        let mut i = cur as isize + step;
        while i >= 0 && i < prefix {
            let Some(reg) = self.registry.get(i as usize) else {
                return;
            };
            if reg.top != cur_top {
                break;
            }
            if self.reg_enabled(i as usize) {
                self.activate_index(i as usize);
                return;
            }
            i += step;
        }
    }

    fn adjust_or_move(&mut self, dir: i32) -> bool {
        if let Some(key) = self.active_key()
            && matches!(
                self.controls.get(key).map(|c| c.kind()),
                Some(ControlKind::Slider | ControlKind::Ruler)
            )
        {
            self.with_ctrl(key, |c, ctx| c.adjust(ctx, dir));
            return true;
        }
        self.select_in_line(dir);
        true
    }

    fn activate_active(&mut self) -> bool {
        let Some(i) = self.active else {
            return false;
        };
        let (key, fixed, cx, cy) = match self.registry.get(i) {
            Some(r) => (
                r.key,
                r.fixed,
                (r.left + r.right) * 0.5,
                (r.top + r.bottom) * 0.5,
            ),
            None => return false,
        };
        let Some(kind) = self.controls.get(key).map(|c| c.kind()) else {
            return false;
        };
        if !self.controls.get(key).map(|c| c.enabled()).unwrap_or(false) {
            return false;
        }
        match kind {
            ControlKind::Slider | ControlKind::Ruler => {
                self.with_ctrl(key, |c, ctx| c.adjust(ctx, 1));
            }
            _ => {
                let now_open = self
                    .with_ctrl(key, |c, ctx| c.click(ctx, cx, cy))
                    .unwrap_or(false);
                if now_open && self.controls.contains_key(key) {
                    self.open_key = Some(key);
                    self.open_fixed = fixed;
                }
            }
        }
        true
    }

    fn delete_on_active(&mut self) -> bool {
        let Some(key) = self.active_key() else {
            return false;
        };
        match self.controls.get(key).map(|c| c.kind()) {
            Some(ControlKind::KeyBind | ControlKind::Tile) => {
                self.with_ctrl(key, |c, ctx| c.clear_value(ctx));
                true
            }
            _ => false,
        }
    }

    fn edit_active(&mut self) -> bool {
        let Some(key) = self.active_key() else {
            return false;
        };
        match self.controls.get(key).map(|c| c.kind()) {
            Some(ControlKind::Tile) => {
                self.with_ctrl(key, |c, ctx| c.edit(ctx));
                true
            }
            _ => false,
        }
    }

    fn active_key(&self) -> Option<ControlKey> {
        self.active
            .and_then(|i| self.registry.get(i))
            .map(|r| r.key)
    }

    // ---- hover / selection bookkeeping ------------------------------------

    fn update_hover(&mut self, x: f32, y: f32) {
        match self.registry.find_at(x, y, self.scroll.offset()) {
            Some(i) if self.reg_enabled(i) => self.set_active(i),
            _ => self.clear_hover(),
        }
    }

    fn set_active(&mut self, i: usize) {
        let Some(reg) = self.registry.get(i) else {
            return;
        };
        self.active = Some(i);
        self.tooltip = reg.tooltip.clone().unwrap_or_default();
        if reg.fixed {
            self.highlight = None;
            return;
        }
        // wider snap when the control sits in the label column
        let snap = if reg.left < self.rect.x + self.rect.w * 0.5 {
            dp_to_px(SNAP_WIDE_DP)
        } else {
            dp_to_px(SNAP_NARROW_DP)
        };
        let pad_y = dp_to_px(ROW_HL_PAD_DP);
        self.highlight = Some(Rect {
            x: reg.left - snap,
            y: reg.top - pad_y,
            w: reg.right + reg.right_pad - reg.left + 2.0 * snap,
            h: reg.bottom - reg.top + 2.0 * pad_y,
        });
    }

    fn clear_hover(&mut self) {
        self.active = None;
        self.highlight = None;
        self.tooltip.clear();
    }

    fn activate_index(&mut self, i: usize) {
        self.set_active(i);
        if let Some(reg) = self.registry.get(i)
            && !reg.fixed
        {
            self.scroll
                .ensure_visible(reg.top, reg.bottom, dp_to_px(AUTO_SCROLL_PAD_DP));
        }
    }

    fn reg_enabled(&self, i: usize) -> bool {
        self.registry
            .get(i)
            .and_then(|r| self.controls.get(r.key))
            .map(|c| c.enabled())
            .unwrap_or(false)
    }

    // ---- open-control plumbing --------------------------------------------

    fn validate_open(&mut self) {
        if let Some(key) = self.open_key
            && !self.controls.contains_key(key)
        {
            self.open_key = None;
        }
    }

    /// Releases the open control: handle cleared first, then `close()`, then
    /// the content extension a combo dropdown may have added.
    fn close_open(&mut self) {
        if let Some(key) = self.open_key.take() {
            let kind = self.controls.get(key).map(|c| c.kind());
            if let Some(c) = self.controls.get_mut(key) {
                c.close();
            }
            if kind == Some(ControlKind::ComboBox) {
                self.scroll.clear_extension();
            }
        }
    }

    fn commit_pending(&mut self) {
        if let Some(mut p) = self.pending_popup.take() {
            self.close_open();
            self.clear_hover();
            p.layout(self.rect);
            self.popup = Some(p);
        }
    }

    fn check_invariants(&mut self) {
        debug_assert!(
            self.open_key.is_none() || self.popup.is_none(),
            "open control and popup active at once"
        );
        if self.open_key.is_some() && self.popup.is_some() {
            log::warn!("page had an open control and a popup at once; closing both");
            self.close_open();
            self.popup = None;
        }
        if let Some(i) = self.active
            && !self.reg_enabled(i)
        {
            self.clear_hover();
        }
    }

    fn with_ctrl<R>(
        &mut self,
        key: ControlKey,
        f: impl FnOnce(&mut Box<dyn Control>, &mut PageCtx) -> R,
    ) -> Option<R> {
        let ctrl = self.controls.get_mut(key)?;
        let mut ctx = PageCtx {
            scroll: &mut self.scroll,
            page_rect: self.rect,
            rebuild: &mut self.rebuild_needed,
            pending_popup: &mut self.pending_popup,
        };
        Some(f(ctrl, &mut ctx))
    }

    fn scrollbar_hit(&self, x: f32, y: f32) -> bool {
        self.scroll.scrollable()
            && self
                .controls
                .get(self.scrollbar_key)
                .map(|c| c.bounds().contains(Vec2::new(x, y)))
                .unwrap_or(false)
    }

    /// Window point to control space: fixed controls live in window space,
    /// scrolling ones in content space.
    fn to_control_space(&self, x: f32, y: f32, fixed: bool) -> (f32, f32) {
        if fixed {
            (x, y)
        } else {
            (x, y + self.scroll.offset())
        }
    }

    // ---- drawing ----------------------------------------------------------

    fn page_clip(&self) -> Rect {
        Rect {
            h: (self.rect.h - self.tooltip_bar_h).max(0.0),
            ..self.rect
        }
    }

    fn tooltip_bar(&self) -> Rect {
        Rect {
            x: self.rect.x,
            y: self.rect.bottom() - self.tooltip_bar_h,
            w: self.rect.w,
            h: self.tooltip_bar_h,
        }
    }

    fn status_at(&self, reg: &ControlRegistration, mx: f32, my: f32) -> ControlStatus {
        let (cx, cy) = self.to_control_space(mx, my, reg.fixed);
        self.controls
            .get(reg.key)
            .map(|c| c.status(cx, cy))
            .unwrap_or(ControlStatus::Regular)
    }

    /// First pass: page chrome and control bodies. Returns whether the
    /// renderer must run the overlay (foreground) passes this frame.
    pub fn draw_backgrounds(&mut self, list: &mut DrawList, mx: f32, my: f32) -> bool {
        self.frame_mouse = (mx, my);
        let th = theme();

        list.set_space(DrawSpace::Window);
        list.rect(self.rect, th.page_background);

        list.set_space(DrawSpace::Scrolled);
        list.push_scissor(self.page_clip());
        if let Some(hl) = self.highlight {
            list.rect(hl, th.row_highlight);
        }
        let prefix = self.registry.scrolled_len();
        for reg in &self.registry.entries()[..prefix] {
            if let Some(ctrl) = self.controls.get(reg.key) {
                let ctx = DrawCtx {
                    scroll: &self.scroll,
                    page_rect: self.rect,
                    status: self.status_at(reg, mx, my),
                };
                ctrl.draw(list, &ctx);
            }
        }
        list.pop_scissor();

        list.set_space(DrawSpace::Window);
        for reg in &self.registry.entries()[prefix..] {
            if let Some(ctrl) = self.controls.get(reg.key) {
                let ctx = DrawCtx {
                    scroll: &self.scroll,
                    page_rect: self.rect,
                    status: self.status_at(reg, mx, my),
                };
                ctrl.draw(list, &ctx);
            }
        }
        if self.tooltip_bar_h > 0.0 {
            list.rect(self.tooltip_bar(), th.tooltip_bg);
        }

        self.needs_overlay()
    }

    /// Second pass: text. Runs after all background geometry so glyph
    /// batches are not interleaved with colored quads.
    pub fn draw_labels(&self, list: &mut DrawList) {
        let (mx, my) = self.frame_mouse;
        let th = theme();

        list.set_space(DrawSpace::Scrolled);
        list.push_scissor(self.page_clip());
        let prefix = self.registry.scrolled_len();
        for reg in &self.registry.entries()[..prefix] {
            if let Some(ctrl) = self.controls.get(reg.key) {
                let ctx = DrawCtx {
                    scroll: &self.scroll,
                    page_rect: self.rect,
                    status: self.status_at(reg, mx, my),
                };
                ctrl.draw_label(list, &ctx);
            }
        }
        list.pop_scissor();

        list.set_space(DrawSpace::Window);
        for reg in &self.registry.entries()[prefix..] {
            if let Some(ctrl) = self.controls.get(reg.key) {
                let ctx = DrawCtx {
                    scroll: &self.scroll,
                    page_rect: self.rect,
                    status: self.status_at(reg, mx, my),
                };
                ctrl.draw_label(list, &ctx);
            }
        }
        if self.tooltip_bar_h > 0.0 && !self.tooltip.is_empty() {
            let bar = self.tooltip_bar();
            let font = dp_to_px(12.0);
            let w = text_width_estimate(&self.tooltip, font);
            list.text(
                (
                    bar.x + (bar.w - w).max(0.0) * 0.5,
                    bar.y + (bar.h - font).max(0.0) * 0.5,
                ),
                self.tooltip.clone(),
                th.tooltip_text,
                font,
            );
        }
    }

    /// Overlay pass, geometry: open dropdown or popup. Only called when
    /// `draw_backgrounds` returned true.
    pub fn draw_foregrounds(&self, list: &mut DrawList) {
        if !self.needs_overlay() {
            return;
        }
        OverlayPass::begin(list);
        if let Some(p) = &self.popup {
            p.draw(list);
            return;
        }
        if let Some(key) = self.open_key
            && let Some(ctrl) = self.controls.get(key)
        {
            let ctx = DrawCtx {
                scroll: &self.scroll,
                page_rect: self.rect,
                status: ControlStatus::Regular,
            };
            ctrl.draw_foreground(list, &ctx);
        }
    }

    /// Overlay pass, text.
    pub fn draw_foreground_labels(&self, list: &mut DrawList) {
        if !self.needs_overlay() {
            return;
        }
        OverlayPass::begin(list);
        if let Some(p) = &self.popup {
            p.draw_labels(list);
            return;
        }
        if let Some(key) = self.open_key
            && let Some(ctrl) = self.controls.get(key)
        {
            let ctx = DrawCtx {
                scroll: &self.scroll,
                page_rect: self.rect,
                status: ControlStatus::Regular,
            };
            ctrl.draw_foreground_label(list, &ctx);
        }
    }
}
