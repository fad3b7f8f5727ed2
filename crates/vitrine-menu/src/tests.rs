#[cfg(test)]
mod tests {
    use std::cell::Cell;
    use std::rc::Rc;

    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};
    use slotmap::SlotMap;
    use vitrine_core::{BoundInput, DrawList, PadButton, Rect, VirtualKey};

    use crate::binding::Binding;
    use crate::control::{Control, ControlKind, DrawCtx, PageCtx};
    use crate::controls::{Checkbox, ComboBox, KeyBind, Slider, Tile};
    use crate::page::Page;
    use crate::popup::Popup;
    use crate::registry::{ControlKey, ControlRegistration, ControlRegistry};

    fn row(x: f32, y: f32, w: f32, h: f32) -> Rect {
        Rect::new(x, y, w, h)
    }

    // ---- registry: randomized linear-scan equivalence ----------------------

    fn reference_scan(
        entries: &[ControlRegistration],
        fixed_start: usize,
        x: f32,
        y: f32,
        scroll: f32,
    ) -> Option<usize> {
        for i in (fixed_start..entries.len()).rev() {
            if entries[i].contains(x, y) {
                return Some(i);
            }
        }
        (0..fixed_start).find(|&i| entries[i].contains(x, y + scroll))
    }

    #[test]
    fn hit_test_matches_linear_scan_on_random_layouts() {
        let mut rng = StdRng::seed_from_u64(0x9E37);
        let mut arena: SlotMap<ControlKey, ()> = SlotMap::with_key();

        for _ in 0..12 {
            let mut entries = Vec::new();
            let mut y = rng.random_range(0.0..40.0f32);
            for _ in 0..rng.random_range(5..20usize) {
                let h = rng.random_range(16.0..32.0f32);
                if rng.random_range(0..10) < 4 {
                    // side-by-side pair on one row
                    let split = rng.random_range(120.0..220.0f32);
                    entries.push(ControlRegistration::from_bounds(
                        arena.insert(()),
                        row(10.0, y, split - 20.0, h),
                    ));
                    entries.push(ControlRegistration::from_bounds(
                        arena.insert(()),
                        row(split, y, 360.0 - split, h),
                    ));
                } else {
                    entries.push(ControlRegistration::from_bounds(
                        arena.insert(()),
                        row(10.0, y, 350.0, h),
                    ));
                }
                y += h + rng.random_range(2.0..20.0f32);
            }
            for i in 0..rng.random_range(0..3usize) {
                // fixed suffix off to the right, clear of the rows
                entries.push(
                    ControlRegistration::from_bounds(
                        arena.insert(()),
                        row(380.0 + 15.0 * i as f32, 0.0, 12.0, 280.0),
                    )
                    .fixed(),
                );
            }

            let fixed_start = entries.iter().position(|e| e.fixed).unwrap_or(entries.len());
            let mut reg = ControlRegistry::default();
            reg.replace(entries.clone());

            for _ in 0..250 {
                let x = rng.random_range(-20.0..430.0f32);
                let my = rng.random_range(-50.0..500.0f32);
                let scroll = rng.random_range(0.0..y);
                assert_eq!(
                    reg.find_at(x, my, scroll),
                    reference_scan(&entries, fixed_start, x, my, scroll),
                    "layout mismatch at ({x},{my}) scroll {scroll}"
                );
            }
        }
    }

    // ---- page scaffolding --------------------------------------------------

    fn checkbox_page(rows: &[(Rect, bool)]) -> (Page, Vec<ControlKey>) {
        let mut page = Page::new(Rect::new(0.0, 0.0, 300.0, 140.0));
        page.set_tooltip_bar_height(0.0);
        let keys: Vec<ControlKey> = rows
            .iter()
            .map(|&(rect, enabled)| {
                let cb = Checkbox::new(rect, "Row", Binding::new(false));
                if enabled {
                    page.add(cb)
                } else {
                    page.add(cb.enabled_if(|| false))
                }
            })
            .collect();
        let regs = keys.iter().map(|&k| page.registration(k)).collect();
        page.register_controls(regs);
        (page, keys)
    }

    // ---- §8 scenario: hover, arrow-down, auto-scroll -----------------------

    #[test]
    fn arrow_down_selects_next_row_and_auto_scrolls() {
        // visible band is 140 tall; row B's bottom (145) plus the 10px
        // reveal padding lands the offset at exactly 15
        let (mut page, _) = checkbox_page(&[
            (row(10.0, 100.0, 200.0, 20.0), true),
            (row(10.0, 130.0, 200.0, 15.0), true),
            (row(10.0, 200.0, 200.0, 20.0), true),
        ]);

        page.mouse_move(50.0, 115.0);
        assert_eq!(page.active_index(), Some(0));
        assert!(page.highlight().is_some());

        assert!(page.vkey_down(VirtualKey::Down));
        assert_eq!(page.active_index(), Some(1));
        assert_eq!(page.scroll_offset(), 15.0);

        // back up: row A is still inside the band, so the offset holds
        assert!(page.vkey_down(VirtualKey::Up));
        assert_eq!(page.active_index(), Some(0));
        assert_eq!(page.scroll_offset(), 15.0);
    }

    #[test]
    fn navigation_never_lands_on_a_disabled_control() {
        let (mut page, _) = checkbox_page(&[
            (row(10.0, 10.0, 200.0, 20.0), true),
            (row(10.0, 40.0, 200.0, 20.0), false),
            (row(10.0, 70.0, 90.0, 20.0), false),
            (row(110.0, 70.0, 90.0, 20.0), true),
            (row(10.0, 100.0, 200.0, 20.0), true),
        ]);
        let disabled = [1usize, 2];

        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..60 {
            let key = match rng.random_range(0..4) {
                0 => VirtualKey::Up,
                1 => VirtualKey::Down,
                2 => VirtualKey::Left,
                _ => VirtualKey::Right,
            };
            page.vkey_down(key);
            if let Some(i) = page.active_index() {
                assert!(!disabled.contains(&i), "selection landed on disabled row {i}");
            }
        }
    }

    #[test]
    fn hover_skips_disabled_rows() {
        let (mut page, _) = checkbox_page(&[
            (row(10.0, 10.0, 200.0, 20.0), true),
            (row(10.0, 40.0, 200.0, 20.0), false),
        ]);
        page.mouse_move(50.0, 50.0);
        assert_eq!(page.active_index(), None);
        page.mouse_move(50.0, 20.0);
        assert_eq!(page.active_index(), Some(0));
    }

    #[test]
    fn hover_swaps_tooltip_text() {
        let mut page = Page::new(Rect::new(0.0, 0.0, 300.0, 200.0));
        let a = page.add(Checkbox::new(row(10.0, 10.0, 200.0, 20.0), "A", Binding::new(false)));
        let b = page.add(Checkbox::new(row(10.0, 40.0, 200.0, 20.0), "B", Binding::new(false)));
        page.register_controls(vec![
            page.registration(a).tooltip("First row"),
            page.registration(b),
        ]);

        page.mouse_move(50.0, 20.0);
        assert_eq!(page.tooltip(), "First row");
        // a hovered control without a tooltip blanks the strip
        page.mouse_move(50.0, 50.0);
        assert_eq!(page.tooltip(), "");
    }

    // ---- §8 scenario: combo open / click-elsewhere -------------------------

    fn combo_page() -> (Page, ControlKey, ControlKey, Binding<bool>) {
        let mut page = Page::new(Rect::new(0.0, 0.0, 300.0, 260.0));
        page.set_tooltip_bar_height(0.0);
        let checked = Binding::new(false);
        let cb = page.add(Checkbox::new(
            row(10.0, 100.0, 200.0, 20.0),
            "Beneath",
            checked.clone(),
        ));
        let combo = page.add(ComboBox::new(
            row(10.0, 200.0, 200.0, 24.0),
            "Filter",
            vec!["Nearest".into(), "Bilinear".into(), "Trilinear".into()],
            Binding::new(0),
        ));
        page.register_controls(vec![page.registration(cb), page.registration(combo)]);
        (page, combo, cb, checked)
    }

    #[test]
    fn combo_opens_on_click_and_closes_elsewhere_without_click_through() {
        let (mut page, combo, _cb, checked) = combo_page();

        page.mouse_down(50.0, 210.0);
        page.mouse_up(50.0, 210.0);
        assert_eq!(page.open_control(), Some(combo));
        assert!(page.needs_overlay());

        // click on the checkbox's row: closes the combo, consumed, the
        // checkbox underneath must not toggle in the same event
        page.mouse_down(50.0, 110.0);
        assert_eq!(page.open_control(), None);
        assert!(!page.needs_overlay());
        assert!(!checked.get());

        // the next click does reach it
        page.mouse_down(50.0, 110.0);
        assert!(checked.get());
    }

    #[test]
    fn combo_dropdown_is_keyboard_selectable() {
        let mut page = Page::new(Rect::new(0.0, 0.0, 300.0, 260.0));
        let selected = Binding::new(0usize);
        let combo = page.add(ComboBox::new(
            row(10.0, 40.0, 200.0, 24.0),
            "Filter",
            vec!["Nearest".into(), "Bilinear".into(), "Trilinear".into()],
            selected.clone(),
        ));
        page.register_controls(vec![page.registration(combo)]);

        page.mouse_move(50.0, 50.0);
        assert!(page.vkey_down(VirtualKey::Enter));
        assert_eq!(page.open_control(), Some(combo));
        assert_eq!(page.control(combo).map(|c| c.kind()), Some(ControlKind::ComboBox));

        assert!(page.vkey_down(VirtualKey::Down));
        assert!(page.vkey_down(VirtualKey::Down));
        assert!(page.vkey_down(VirtualKey::Enter));
        assert_eq!(page.open_control(), None);
        assert_eq!(selected.get(), 2);

        // dropdown retracted: the stay-open bounds shrink back to the row
        assert_eq!(page.control(combo).map(|c| c.open_bounds().h), Some(24.0));
    }

    #[test]
    fn combo_extends_scrollable_content_while_open() {
        let (mut page, _, _, _) = combo_page();
        let base_max = page.scroll_view().max_offset();

        page.mouse_down(50.0, 210.0);
        assert!(page.scroll_view().max_offset() > base_max);

        // Escape retracts the dropdown and the extension with it
        page.vkey_down(VirtualKey::Escape);
        assert_eq!(page.open_control(), None);
        assert_eq!(page.scroll_view().max_offset(), base_max);
    }

    // ---- §8 scenario: fixed scrollbar under scroll -------------------------

    #[test]
    fn scrollbar_is_hit_regardless_of_scroll_offset() {
        let mut page = Page::new(Rect::new(0.0, 0.0, 400.0, 150.0));
        page.set_tooltip_bar_height(0.0);
        let checked = Binding::new(false);
        let near = page.add(Checkbox::new(row(10.0, 10.0, 200.0, 20.0), "Near", Binding::new(false)));
        let far = page.add(Checkbox::new(row(10.0, 400.0, 200.0, 20.0), "Far", checked.clone()));
        page.register_controls(vec![page.registration(near), page.registration(far)]);
        assert!(page.scroll_view().scrollable());

        // the far row sits at content y=400; a click where it will later
        // appear misses while the page is still at the top
        page.mouse_down(50.0, 130.0);
        assert!(!checked.get());
        assert_eq!(page.active_index(), None);

        page.mouse_scroll(200.0, 75.0, -100.0);
        let max = page.scroll_view().max_offset();
        assert_eq!(page.scroll_offset(), max);

        // the fixed scrollbar track is found by the suffix scan at any offset
        page.mouse_down(394.0, 20.0);
        assert!(page.is_mouse_down());
        assert!(page.scroll_offset() < max);
        page.mouse_move(394.0, 148.0);
        assert_eq!(page.scroll_offset(), max);
        page.mouse_up(394.0, 148.0);

        // with scroll applied the far row is clickable at its window position
        page.mouse_down(50.0, 400.0 - max);
        assert!(checked.get());
    }

    #[test]
    fn wheel_scroll_stays_clamped() {
        let mut page = Page::new(Rect::new(0.0, 0.0, 400.0, 150.0));
        page.set_tooltip_bar_height(0.0);
        let keys: Vec<ControlKey> = (0..16)
            .map(|i| {
                page.add(Checkbox::new(
                    row(10.0, 10.0 + 30.0 * i as f32, 200.0, 20.0),
                    "Row",
                    Binding::new(false),
                ))
            })
            .collect();
        let regs = keys.iter().map(|&k| page.registration(k)).collect();
        page.register_controls(regs);
        let max = page.scroll_view().max_offset();

        page.mouse_scroll(200.0, 75.0, -1000.0);
        assert_eq!(page.scroll_offset(), max);
        page.mouse_scroll(200.0, 75.0, 1000.0);
        assert_eq!(page.scroll_offset(), 0.0);
    }

    // ---- open/popup exclusivity and idempotence ----------------------------

    #[test]
    fn popup_displaces_the_open_control() {
        let (mut page, combo, _, _) = combo_page();
        page.mouse_down(50.0, 210.0);
        assert_eq!(page.open_control(), Some(combo));

        page.open_popup(Popup::message("Saved", "Settings written"));
        assert_eq!(page.open_control(), None);
        assert!(page.popup_open());
        assert!(page.needs_overlay());

        // body clicks are swallowed, outside clicks dismiss
        page.mouse_down(150.0, 130.0);
        assert!(page.popup_open());
        page.mouse_down(2.0, 2.0);
        assert!(!page.popup_open());
        assert!(!page.needs_overlay());
    }

    #[test]
    fn tile_delete_routes_through_confirm_popup() {
        let removed = Rc::new(Cell::new(false));
        let flag = removed.clone();
        let mut page = Page::new(Rect::new(0.0, 0.0, 400.0, 300.0));
        let tile = page.add(
            Tile::new(row(10.0, 10.0, 380.0, 48.0), "Memory card A", "128 KiB")
                .on_remove(move || flag.set(true))
                .confirm_remove(),
        );
        page.register_controls(vec![page.registration(tile)]);

        page.mouse_move(50.0, 30.0);
        assert!(page.vkey_down(VirtualKey::Delete));
        assert!(page.popup_open());
        assert!(!removed.get());

        // Enter confirms the focused "Remove" button
        assert!(page.vkey_down(VirtualKey::Enter));
        assert!(!page.popup_open());
        assert!(removed.get());
    }

    #[test]
    fn stray_mouse_up_is_a_noop() {
        let (mut page, _) = checkbox_page(&[(row(10.0, 10.0, 200.0, 20.0), true)]);
        page.mouse_up(50.0, 20.0);
        assert_eq!(page.open_control(), None);
        assert_eq!(page.active_index(), None);
        assert_eq!(page.scroll_offset(), 0.0);
    }

    #[test]
    fn escape_when_idle_is_unhandled() {
        let (mut page, _) = checkbox_page(&[(row(10.0, 10.0, 200.0, 20.0), true)]);
        assert!(!page.vkey_down(VirtualKey::Escape));
    }

    #[test]
    fn closing_an_already_closed_combo_changes_nothing() {
        let (mut page, combo, _, _) = combo_page();
        page.mouse_down(50.0, 210.0);
        page.vkey_down(VirtualKey::Escape);
        assert_eq!(page.open_control(), None);

        // repeated dismissals stay no-ops
        page.vkey_down(VirtualKey::Escape);
        page.mouse_up(50.0, 210.0);
        assert_eq!(page.open_control(), None);
        assert!(page.control(combo).is_some());
    }

    // ---- keyboard activation paths -----------------------------------------

    #[test]
    fn enter_toggles_the_active_checkbox() {
        let mut page = Page::new(Rect::new(0.0, 0.0, 300.0, 200.0));
        let value = Binding::new(false);
        let cb = page.add(Checkbox::new(row(10.0, 10.0, 200.0, 20.0), "VSync", value.clone()));
        page.register_controls(vec![page.registration(cb)]);

        page.vkey_down(VirtualKey::Down);
        assert_eq!(page.active_index(), Some(0));
        assert!(page.vkey_down(VirtualKey::Enter));
        assert!(value.get());
        assert_eq!(page.open_control(), None);
    }

    #[test]
    fn arrows_adjust_the_active_slider_instead_of_navigating() {
        let mut page = Page::new(Rect::new(0.0, 0.0, 300.0, 200.0));
        let value = Binding::new(5);
        let a = page.add(Slider::new(
            row(10.0, 10.0, 280.0, 24.0),
            "Brightness",
            value.clone(),
            (0, 10),
        ));
        let b = page.add(Checkbox::new(row(10.0, 44.0, 280.0, 20.0), "Other", Binding::new(false)));
        page.register_controls(vec![page.registration(a), page.registration(b)]);

        page.mouse_move(50.0, 20.0);
        assert!(page.vkey_down(VirtualKey::Right));
        assert!(page.vkey_down(VirtualKey::Right));
        assert!(page.vkey_down(VirtualKey::Left));
        assert_eq!(value.get(), 6);
        // Enter steps once more rather than opening anything
        assert!(page.vkey_down(VirtualKey::Enter));
        assert_eq!(value.get(), 7);
        assert_eq!(page.open_control(), None);
        assert_eq!(page.active_index(), Some(0));
    }

    // ---- key-binding capture ----------------------------------------------

    fn keybind_page() -> (Page, ControlKey, Binding<Option<BoundInput>>) {
        let mut page = Page::new(Rect::new(0.0, 0.0, 300.0, 200.0));
        let value = Binding::new(None);
        let kb = page.add(KeyBind::new(
            row(10.0, 10.0, 280.0, 24.0),
            "Screenshot",
            value.clone(),
        ));
        page.register_controls(vec![page.registration(kb)]);
        (page, kb, value)
    }

    #[test]
    fn keybind_captures_the_next_pad_button() {
        let (mut page, kb, value) = keybind_page();
        page.mouse_down(50.0, 20.0);
        assert_eq!(page.open_control(), Some(kb));

        // X has no navigation meaning; while capturing it becomes the value
        page.pad_button_down(PadButton::X);
        assert_eq!(value.get(), Some(BoundInput::Pad(PadButton::X)));
        assert_eq!(page.open_control(), None);
        assert!(page.controller_hints());
    }

    #[test]
    fn keybind_captures_nav_buttons_too_while_open() {
        let (mut page, _, value) = keybind_page();
        page.mouse_down(50.0, 20.0);
        // Y maps to Delete when idle, but an armed capture takes it verbatim
        page.pad_button_down(PadButton::Y);
        assert_eq!(value.get(), Some(BoundInput::Pad(PadButton::Y)));
    }

    #[test]
    fn keybind_captures_keys_and_escape_cancels() {
        let (mut page, _, value) = keybind_page();
        page.mouse_down(50.0, 20.0);
        assert!(page.vkey_down(VirtualKey::F(5)));
        assert_eq!(value.get(), Some(BoundInput::Key(VirtualKey::F(5))));
        assert_eq!(page.open_control(), None);

        page.mouse_down(50.0, 20.0);
        assert!(page.vkey_down(VirtualKey::Escape));
        assert_eq!(value.get(), Some(BoundInput::Key(VirtualKey::F(5))));
        assert_eq!(page.open_control(), None);

        // Delete on the merely-selected row clears the binding
        page.mouse_move(50.0, 20.0);
        assert!(page.vkey_down(VirtualKey::Delete));
        assert_eq!(value.get(), None);
    }

    #[test]
    fn pad_navigation_mirrors_the_keyboard() {
        let (mut page, _) = checkbox_page(&[
            (row(10.0, 10.0, 200.0, 20.0), true),
            (row(10.0, 40.0, 200.0, 20.0), true),
        ]);
        page.pad_button_down(PadButton::DpadDown);
        assert_eq!(page.active_index(), Some(0));
        assert!(page.controller_hints());
        page.pad_button_down(PadButton::DpadDown);
        assert_eq!(page.active_index(), Some(1));
        // a mouse press flips the hints back to keyboard glyphs
        page.mouse_down(50.0, 45.0);
        assert!(!page.controller_hints());
    }

    // ---- rebuild plumbing --------------------------------------------------

    struct LanguageButton {
        rect: Rect,
    }

    impl Control for LanguageButton {
        fn kind(&self) -> ControlKind {
            ControlKind::Button
        }

        fn bounds(&self) -> Rect {
            self.rect
        }

        fn click(&mut self, ctx: &mut PageCtx, _x: f32, _y: f32) -> bool {
            ctx.request_rebuild();
            false
        }

        fn draw(&self, _list: &mut DrawList, _ctx: &DrawCtx) {}
    }

    #[test]
    fn rebuild_request_surfaces_once_and_stale_keys_miss() {
        let mut page = Page::new(Rect::new(0.0, 0.0, 300.0, 200.0));
        let btn = page.add(LanguageButton {
            rect: row(10.0, 10.0, 200.0, 24.0),
        });
        page.register_controls(vec![page.registration(btn)]);

        page.mouse_down(50.0, 20.0);
        assert!(page.take_rebuild_request());
        assert!(!page.take_rebuild_request());

        // host rebuild: the arena is replaced wholesale and the old key
        // stops resolving
        page.clear_controls();
        let fresh = page.add(Checkbox::new(row(10.0, 10.0, 200.0, 20.0), "New", Binding::new(false)));
        page.register_controls(vec![page.registration(fresh)]);
        assert!(page.control(btn).is_none());
        assert!(page.control(fresh).is_some());
        assert_eq!(page.open_control(), None);
    }

    #[test]
    fn resize_resets_scroll_and_interaction_state() {
        let (mut page, combo, _, _) = combo_page();
        page.mouse_down(50.0, 210.0);
        assert_eq!(page.open_control(), Some(combo));

        page.set_rect(Rect::new(0.0, 0.0, 320.0, 240.0));
        assert_eq!(page.open_control(), None);
        assert_eq!(page.scroll_offset(), 0.0);
        assert_eq!(page.active_index(), None);
        assert!(!page.popup_open());
    }

    // ---- draw pass sanity --------------------------------------------------

    #[test]
    fn draw_backgrounds_reports_overlay_need() {
        let (mut page, _, _, _) = combo_page();
        let mut list = DrawList::new();
        assert!(!page.draw_backgrounds(&mut list, 0.0, 0.0));
        assert!(!list.commands().is_empty());

        page.mouse_down(50.0, 210.0);
        list.clear();
        assert!(page.draw_backgrounds(&mut list, 50.0, 210.0));

        let mut fg = DrawList::new();
        page.draw_foregrounds(&mut fg);
        assert!(!fg.commands().is_empty());
    }

    #[test]
    fn open_control_keeps_receiving_moves_inside_its_bounds() {
        let mut page = Page::new(Rect::new(0.0, 0.0, 300.0, 200.0));
        let value = Binding::new(0);
        let s = page.add(Slider::new(
            row(10.0, 10.0, 280.0, 24.0),
            "Volume",
            value.clone(),
            (0, 100),
        ));
        page.register_controls(vec![page.registration(s)]);

        // click grabs the knob, drag tracks, mouse-up releases ownership
        page.mouse_down(200.0, 20.0);
        assert_eq!(page.open_control(), Some(s));
        let before = value.get();
        page.mouse_move(240.0, 20.0);
        assert!(value.get() >= before);
        page.mouse_up(240.0, 20.0);
        assert_eq!(page.open_control(), None);
    }

    #[test]
    fn typed_characters_only_reach_an_open_textbox() {
        let mut page = Page::new(Rect::new(0.0, 0.0, 300.0, 200.0));
        let text = Binding::new(String::new());
        let tb = page.add(crate::controls::TextBox::new(
            row(10.0, 10.0, 280.0, 24.0),
            "Pattern",
            text.clone(),
        ));
        page.register_controls(vec![page.registration(tb)]);

        // not editing yet: characters are dropped
        page.key_down('x');
        assert_eq!(text.get(), "");

        page.mouse_down(200.0, 20.0);
        assert_eq!(page.open_control(), Some(tb));
        page.key_down('6');
        page.key_down('4');
        page.key_down('0');
        assert_eq!(text.get(), "640");

        assert!(page.vkey_down(VirtualKey::Enter));
        assert_eq!(page.open_control(), None);
        page.key_down('!');
        assert_eq!(text.get(), "640");
    }
}
