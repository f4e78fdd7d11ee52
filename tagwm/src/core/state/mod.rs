use std::collections::HashMap;
use std::time::Instant;

use super::{Autostart, Client, Config, Monitor, Rect, RulesEngine, Tag, WindowId};
use crate::effect::Effect;
use crate::platform::{PointerOp, ProcessLineage};
use tagwm_ipc::{BarInfo, SizeHints, WindowAttributes};

mod clients;
mod focus;
mod layout;
mod monitors;
mod tags;

use clients::*;
use focus::*;
use layout::*;
use monitors::*;
use tags::*;

pub struct State {
    pub clients: HashMap<WindowId, Client>,
    pub monitors: Vec<Monitor>,
    pub selected_monitor: usize,
    pub config: Config,
    pub rules_engine: RulesEngine,
    pub autostart: Autostart,
    pub status_text: String,
    /// Cleared by the quit action; the main loop exits once it is false
    pub running: bool,
}

impl State {
    /// Monitors are created by the first `update_screens` call.
    pub fn new(config: Config, rules_engine: RulesEngine, autostart: Autostart) -> Self {
        Self {
            clients: HashMap::new(),
            monitors: Vec::new(),
            selected_monitor: 0,
            config,
            rules_engine,
            autostart,
            status_text: format!("tagwm-{}", env!("CARGO_PKG_VERSION")),
            running: true,
        }
    }

    pub fn selected(&self) -> Option<&Monitor> {
        self.monitors.get(self.selected_monitor)
    }

    pub fn focused(&self) -> Option<WindowId> {
        self.selected().and_then(|m| m.selected)
    }

    pub fn visible_tags(&self) -> Tag {
        self.selected()
            .map(|m| m.visible_tags())
            .unwrap_or_default()
    }

    pub fn tag_mask(&self) -> Tag {
        self.config.tag_mask()
    }

    pub fn is_visible(&self, client: &Client) -> bool {
        self.monitors
            .get(client.monitor)
            .is_some_and(|m| client.tags.intersects(m.visible_tags()))
    }

    pub fn layout_symbol(&self) -> &str {
        self.selected()
            .map(|m| m.layout_symbol.as_str())
            .unwrap_or_default()
    }

    pub fn bar_info(&self, mon: usize) -> Option<BarInfo> {
        let monitor = self.monitors.get(mon)?;
        let mut occupied = 0;
        let mut urgent = 0;
        for id in &monitor.clients {
            if let Some(client) = self.clients.get(id) {
                occupied |= client.tags.mask();
                if client.is_urgent {
                    urgent |= client.tags.mask();
                }
            }
        }
        let title = monitor
            .selected
            .and_then(|id| self.clients.get(&id))
            .map(|c| c.title.clone())
            .unwrap_or_default();

        Some(BarInfo {
            monitor: mon,
            tag_names: self.config.tags.clone(),
            occupied_tags: occupied,
            selected_tags: monitor.visible_tags().mask(),
            urgent_tags: urgent,
            layout_symbol: monitor.layout_symbol.clone(),
            title,
            status_text: self.status_text.clone(),
            is_selected_monitor: mon == self.selected_monitor,
            show_bar: monitor.show_bar,
        })
    }

    pub fn bars(&self) -> Vec<BarInfo> {
        (0..self.monitors.len())
            .filter_map(|mon| self.bar_info(mon))
            .collect()
    }

    pub fn set_status_text(&mut self, text: &str) {
        self.status_text = text.to_string();
    }

    pub fn quit(&mut self) {
        tracing::info!("Quit requested");
        self.running = false;
    }

    pub fn expire_autostart(&mut self, now: Instant) -> usize {
        self.autostart.expire(now)
    }

    // Client registry

    pub fn manage<L: ProcessLineage + ?Sized>(
        &mut self,
        window: WindowId,
        attrs: &WindowAttributes,
        lineage: &L,
    ) -> Vec<Effect> {
        manage(self, window, attrs, lineage)
    }

    pub fn unmanage(&mut self, window: WindowId) -> Vec<Effect> {
        unmanage(self, window)
    }

    pub fn configure_request(&mut self, window: WindowId, rect: Rect) -> Vec<Effect> {
        configure_request(self, window, rect)
    }

    pub fn update_title(&mut self, window: WindowId, title: &str) -> Vec<Effect> {
        update_title(self, window, title)
    }

    pub fn update_hints(&mut self, window: WindowId, hints: SizeHints) -> Vec<Effect> {
        update_hints(self, window, hints)
    }

    pub fn set_urgent(&mut self, window: WindowId, urgent: bool) -> Vec<Effect> {
        set_urgent(self, window, urgent)
    }

    pub fn set_fullscreen(&mut self, window: WindowId, fullscreen: bool) -> Vec<Effect> {
        set_fullscreen(self, window, fullscreen)
    }

    pub fn enter(&mut self, window: WindowId) -> Vec<Effect> {
        enter(self, window)
    }

    pub fn move_client(&mut self, window: WindowId, rect: Rect) -> Vec<Effect> {
        move_client(self, window, rect)
    }

    // Tags

    pub fn view(&mut self, mask: u32) -> Vec<Effect> {
        view(self, mask)
    }

    pub fn toggle_view(&mut self, mask: u32) -> Vec<Effect> {
        toggle_view(self, mask)
    }

    pub fn tag_focused(&mut self, mask: u32) -> Vec<Effect> {
        let Some(sel) = self.focused() else {
            return vec![];
        };
        set_client_tags(self, sel, mask, true)
    }

    pub fn toggle_focused_tags(&mut self, mask: u32) -> Vec<Effect> {
        let Some(sel) = self.focused() else {
            return vec![];
        };
        toggle_client_tags(self, sel, mask)
    }

    // Focus and stacking

    pub fn focus_stack(&mut self, delta: i32) -> Vec<Effect> {
        focus_stack(self, delta)
    }

    pub fn zoom(&mut self) -> Vec<Effect> {
        zoom(self)
    }

    pub fn toggle_floating(&mut self) -> Vec<Effect> {
        toggle_floating(self)
    }

    pub fn toggle_fullscreen(&mut self) -> Vec<Effect> {
        toggle_fullscreen(self)
    }

    pub fn kill_client(&self) -> Vec<Effect> {
        kill_client(self)
    }

    pub fn restack(&self) -> Vec<Effect> {
        restack(self, self.selected_monitor)
    }

    pub fn begin_pointer(&self, op: PointerOp) -> Vec<Effect> {
        begin_pointer(self, op)
    }

    // Monitors

    pub fn focus_monitor(&mut self, delta: i32) -> Vec<Effect> {
        focus_monitor(self, delta)
    }

    pub fn tag_monitor(&mut self, delta: i32) -> Vec<Effect> {
        tag_monitor(self, delta)
    }

    pub fn update_screens(&mut self, screens: &[Rect]) -> Vec<Effect> {
        update_screens(self, screens)
    }

    pub fn toggle_bar(&mut self) -> Vec<Effect> {
        toggle_bar(self)
    }

    // Layout

    pub fn set_layout(&mut self, layout: Option<usize>) -> Vec<Effect> {
        set_layout(self, layout)
    }

    pub fn set_mfact(&mut self, f: f32) -> Vec<Effect> {
        set_mfact(self, f)
    }

    pub fn inc_nmaster(&mut self, delta: i32) -> Vec<Effect> {
        inc_nmaster(self, delta)
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;
    use crate::core::{AutostartEntry, Rule};
    use crate::platform::mock::{MockLineage, MockSpawner};

    fn rules() -> RulesEngine {
        RulesEngine::new(vec![
            Rule::class("Surf").with_instance("surf").floating(),
            Rule::class("firefox").with_tags(1 << 6),
            Rule::class("Chromium").with_tags(1 << 6).on_monitor(2),
            Rule::class("Code").with_tags(1 << 7).on_monitor(1),
            Rule::class("Gimp").on_monitor(1),
        ])
    }

    /// One 1000x820 screen; the bar leaves a 1000x800 window area at y=20.
    fn setup_state() -> State {
        let mut state = State::new(Config::default(), rules(), Autostart::default());
        state.update_screens(&[Rect::new(0, 0, 1000, 820)]);
        state
    }

    fn setup_dual_monitor_state() -> State {
        let mut state = State::new(Config::default(), rules(), Autostart::default());
        state.update_screens(&[Rect::new(0, 0, 1000, 820), Rect::new(1000, 0, 1000, 820)]);
        state
    }

    fn attrs(class: &str) -> WindowAttributes {
        WindowAttributes {
            class: Some(class.to_string()),
            instance: Some(class.to_lowercase()),
            title: format!("{} window", class),
            x: 100,
            y: 100,
            width: 400,
            height: 300,
            ..Default::default()
        }
    }

    fn map(state: &mut State, window: WindowId, class: &str) -> Vec<Effect> {
        state.manage(window, &attrs(class), &MockLineage::new())
    }

    fn rect_of(state: &State, window: WindowId) -> Rect {
        state.clients[&window].rect
    }

    #[test]
    fn test_update_screens_creates_monitors() {
        let state = setup_dual_monitor_state();
        assert_eq!(state.monitors.len(), 2);
        assert_eq!(state.monitors[1].area, Rect::new(1000, 20, 1000, 800));
        assert_eq!(state.selected_monitor, 0);
        assert_eq!(state.visible_tags(), Tag::new(1));
    }

    #[test]
    fn test_manage_focuses_and_tiles_single_client() {
        let mut state = setup_state();
        let effects = map(&mut state, 1, "st");

        assert_eq!(state.focused(), Some(1));
        assert_eq!(state.clients[&1].tags, Tag::new(1));
        // Full window area minus a 1px border on each side
        assert_eq!(rect_of(&state, 1), Rect::new(0, 20, 998, 798));
        assert!(effects.contains(&Effect::Focus { window: Some(1) }));
        assert!(effects.contains(&Effect::Configure {
            window: 1,
            rect: Rect::new(0, 20, 998, 798),
            border_width: 1,
        }));
    }

    #[test]
    fn test_new_client_becomes_master() {
        let mut state = setup_state();
        map(&mut state, 1, "st");
        map(&mut state, 2, "st");

        assert_eq!(state.monitors[0].clients, vec![2, 1]);
        assert_eq!(state.focused(), Some(2));
        assert_eq!(rect_of(&state, 2), Rect::new(0, 20, 828, 798));
        assert_eq!(rect_of(&state, 1), Rect::new(830, 20, 168, 798));
    }

    #[test]
    fn test_manage_ignores_tracked_window() {
        let mut state = setup_state();
        map(&mut state, 1, "st");
        assert!(map(&mut state, 1, "st").is_empty());
        assert_eq!(state.monitors[0].clients.len(), 1);
    }

    #[test]
    fn test_manage_unfocuses_previous_client() {
        let mut state = setup_state();
        map(&mut state, 1, "st");
        let effects = map(&mut state, 2, "st");
        assert!(effects.contains(&Effect::SetBorder {
            window: 1,
            color: "#444444".to_string(),
        }));
        assert!(effects.contains(&Effect::SetBorder {
            window: 2,
            color: "#005577".to_string(),
        }));
    }

    #[test]
    fn test_rule_places_client_on_hidden_tag() {
        let mut state = setup_state();
        map(&mut state, 1, "st");
        let effects = map(&mut state, 2, "firefox");

        let firefox = &state.clients[&2];
        assert_eq!(firefox.tags, Tag::new(7));
        assert!(!firefox.is_floating);
        assert_eq!(firefox.monitor, 0);
        // Focus stays on the visible client
        assert_eq!(state.focused(), Some(1));
        assert!(effects.contains(&Effect::Hide {
            window: 2,
            rect: firefox.rect,
        }));
        assert_eq!(rect_of(&state, 1), Rect::new(0, 20, 998, 798));
    }

    #[test]
    fn test_rule_monitor_out_of_range_uses_selected() {
        let mut state = setup_dual_monitor_state();
        map(&mut state, 1, "Chromium");
        assert_eq!(state.clients[&1].monitor, 0);

        map(&mut state, 2, "Code");
        assert_eq!(state.clients[&2].monitor, 1);
        assert_eq!(state.clients[&2].tags, Tag::new(8));
        assert!(state.monitors[1].clients.contains(&2));
    }

    #[test]
    fn test_floating_rule() {
        let mut state = setup_state();
        map(&mut state, 1, "Surf");
        let client = &state.clients[&1];
        assert!(client.is_floating);
        assert_eq!(client.tags, Tag::new(1));
        // Floating clients keep their own geometry
        assert_eq!(client.rect, Rect::new(100, 100, 400, 300));
    }

    #[test]
    fn test_manage_clamps_geometry_into_area() {
        let mut state = setup_state();
        let attrs = WindowAttributes {
            class: Some("Surf".to_string()),
            instance: Some("surf".to_string()),
            x: 900,
            y: 0,
            width: 400,
            height: 300,
            ..Default::default()
        };
        state.manage(1, &attrs, &MockLineage::new());
        assert_eq!(rect_of(&state, 1), Rect::new(598, 20, 400, 300));
    }

    #[test]
    fn test_transient_inherits_parent_placement() {
        let mut state = setup_state();
        map(&mut state, 1, "Code");
        state.view(1 << 7);

        let dialog = WindowAttributes {
            class: Some("Dialog".to_string()),
            transient_for: Some(1),
            width: 200,
            height: 100,
            ..Default::default()
        };
        state.view(1);
        state.manage(2, &dialog, &MockLineage::new());

        let client = &state.clients[&2];
        assert_eq!(client.tags, Tag::new(8));
        assert!(client.is_floating);
    }

    #[test]
    fn test_fixed_size_client_floats() {
        let mut state = setup_state();
        let attrs = WindowAttributes {
            hints: SizeHints {
                min_width: 300,
                min_height: 200,
                max_width: 300,
                max_height: 200,
                ..Default::default()
            },
            width: 300,
            height: 200,
            ..Default::default()
        };
        state.manage(1, &attrs, &MockLineage::new());
        assert!(state.clients[&1].is_fixed);
        assert!(state.clients[&1].is_floating);
    }

    #[test]
    fn test_autostart_claim_overrides_rules_once() {
        let mut state = State::new(
            Config::default(),
            rules(),
            Autostart::new(
                vec![AutostartEntry::new(["firefox"], 1 << 1, 0)],
                Duration::from_secs(30),
            ),
        );
        state.update_screens(&[Rect::new(0, 0, 1000, 820)]);
        state.autostart.start(&MockSpawner::new(100), Instant::now());

        let lineage = MockLineage::new();
        let mut first = attrs("firefox");
        first.pid = Some(100);
        state.manage(1, &first, &lineage);
        assert_eq!(state.clients[&1].tags, Tag::new(2));

        // Second window of the same program falls back to the rule
        state.manage(2, &first, &lineage);
        assert_eq!(state.clients[&2].tags, Tag::new(7));
        assert!(state.autostart.is_exhausted());
    }

    #[test]
    fn test_unrelated_window_ignores_autostart() {
        let mut state = State::new(
            Config::default(),
            rules(),
            Autostart::new(
                vec![AutostartEntry::new(["st"], 1 << 2, 0)],
                Duration::from_secs(30),
            ),
        );
        state.update_screens(&[Rect::new(0, 0, 1000, 820)]);
        state.autostart.start(&MockSpawner::new(100), Instant::now());

        let mut other = attrs("XTerm");
        other.pid = Some(4242);
        state.manage(1, &other, &MockLineage::new());
        assert_eq!(state.clients[&1].tags, Tag::new(1));
        assert!(!state.autostart.is_exhausted());
    }

    #[test]
    fn test_unmanage_focuses_most_recent_visible() {
        let mut state = setup_state();
        map(&mut state, 1, "st");
        map(&mut state, 2, "st");
        map(&mut state, 3, "st");
        focus(&mut state, Some(1));
        assert_eq!(state.monitors[0].stack, vec![1, 3, 2]);

        state.unmanage(1);
        assert_eq!(state.focused(), Some(3));
        assert!(!state.clients.contains_key(&1));
        assert_eq!(state.monitors[0].clients, vec![3, 2]);
    }

    #[test]
    fn test_unmanage_last_client_clears_focus() {
        let mut state = setup_state();
        map(&mut state, 1, "st");
        let effects = state.unmanage(1);
        assert_eq!(state.focused(), None);
        assert!(effects.contains(&Effect::Focus { window: None }));
        assert!(state.unmanage(1).is_empty());
    }

    #[test]
    fn test_view_and_swap_back() {
        let mut state = setup_state();
        map(&mut state, 1, "st");

        let effects = state.view(1 << 1);
        assert_eq!(state.visible_tags(), Tag::new(2));
        assert_eq!(state.focused(), None);
        assert!(effects.contains(&Effect::Hide {
            window: 1,
            rect: rect_of(&state, 1),
        }));

        state.view(0);
        assert_eq!(state.visible_tags(), Tag::new(1));
        assert_eq!(state.focused(), Some(1));

        state.view(0);
        assert_eq!(state.visible_tags(), Tag::new(2));
    }

    #[test]
    fn test_view_same_tags_is_noop() {
        let mut state = setup_state();
        assert!(state.view(1).is_empty());
        assert_eq!(state.monitors[0].sel_tags, 0);
    }

    #[test]
    fn test_view_all_tags() {
        let mut state = setup_state();
        map(&mut state, 1, "st");
        map(&mut state, 2, "firefox");
        state.view(!0);
        assert_eq!(state.visible_tags().mask(), 0x1ff);
        assert_eq!(state.monitors[0].clients.len(), 2);
        assert_eq!(visible_clients(&state, 0).len(), 2);
    }

    #[test]
    fn test_tag_mask_never_zero() {
        let mut state = setup_state();
        map(&mut state, 1, "st");

        // Toggling the only tag off is refused
        assert!(state.toggle_focused_tags(1).is_empty());
        assert_eq!(state.clients[&1].tags, Tag::new(1));

        // Masks outside the tag range are refused
        assert!(state.tag_focused(1 << 20).is_empty());
        assert!(set_client_tags(&mut state, 1, 0, false).is_empty());
        assert_eq!(state.clients[&1].tags, Tag::new(1));

        // The view can't become empty either
        assert!(state.toggle_view(1).is_empty());
        assert_eq!(state.visible_tags(), Tag::new(1));
    }

    #[test]
    fn test_tag_focused_moves_client_off_view() {
        let mut state = setup_state();
        map(&mut state, 1, "st");
        map(&mut state, 2, "st");

        state.tag_focused(1 << 3);
        assert_eq!(state.clients[&2].tags, Tag::new(4));
        assert_eq!(state.focused(), Some(1));
        assert_eq!(rect_of(&state, 1), Rect::new(0, 20, 998, 798));
    }

    #[test]
    fn test_set_client_tags_union() {
        let mut state = setup_state();
        map(&mut state, 1, "st");
        set_client_tags(&mut state, 1, 1 << 2, false);
        assert_eq!(state.clients[&1].tags.mask(), 0b101);
        set_client_tags(&mut state, 1, 1 << 4, true);
        assert_eq!(state.clients[&1].tags.mask(), 1 << 4);
    }

    #[test]
    fn test_toggle_view_shows_both_tags() {
        let mut state = setup_state();
        map(&mut state, 1, "st");
        map(&mut state, 2, "firefox");

        state.toggle_view(1 << 6);
        assert_eq!(state.visible_tags().mask(), 0b100_0001);
        assert_eq!(tiled_clients(&state, 0), vec![2, 1]);

        state.toggle_focused_tags(1 << 6);
        assert_eq!(state.clients[&1].tags.mask(), 0b100_0001);
    }

    #[test]
    fn test_focus_stack_wraps() {
        let mut state = setup_state();
        // Attach inserts at the head, so map in reverse to get [A, B, C]
        map(&mut state, 3, "st");
        map(&mut state, 2, "st");
        map(&mut state, 1, "st");
        assert_eq!(state.monitors[0].clients, vec![1, 2, 3]);
        assert_eq!(state.focused(), Some(1));

        state.focus_stack(1);
        assert_eq!(state.focused(), Some(2));

        focus(&mut state, Some(3));
        state.focus_stack(1);
        assert_eq!(state.focused(), Some(1));

        state.focus_stack(-1);
        assert_eq!(state.focused(), Some(3));
    }

    #[test]
    fn test_focus_stack_skips_hidden_clients() {
        let mut state = setup_state();
        map(&mut state, 3, "st");
        map(&mut state, 2, "firefox");
        map(&mut state, 1, "st");

        state.focus_stack(1);
        assert_eq!(state.focused(), Some(3));
    }

    #[test]
    fn test_focus_clears_urgency() {
        let mut state = setup_state();
        map(&mut state, 1, "st");
        map(&mut state, 2, "st");

        state.set_urgent(1, true);
        assert!(state.clients[&1].is_urgent);
        assert_eq!(state.bar_info(0).map(|b| b.urgent_tags), Some(1));

        // The focused client never becomes urgent
        state.set_urgent(2, true);
        assert!(!state.clients[&2].is_urgent);

        focus(&mut state, Some(1));
        assert!(!state.clients[&1].is_urgent);
    }

    #[test]
    fn test_zoom_swaps_master() {
        let mut state = setup_state();
        map(&mut state, 1, "st");
        map(&mut state, 2, "st");
        assert_eq!(state.monitors[0].clients, vec![2, 1]);

        // Selected is master: the next tiled client takes its place
        state.zoom();
        assert_eq!(state.monitors[0].clients, vec![1, 2]);
        assert_eq!(state.focused(), Some(1));
        assert_eq!(rect_of(&state, 1).x, 0);

        focus(&mut state, Some(2));
        state.zoom();
        assert_eq!(state.monitors[0].clients, vec![2, 1]);
    }

    #[test]
    fn test_zoom_single_client_is_noop() {
        let mut state = setup_state();
        map(&mut state, 1, "st");
        assert!(state.zoom().is_empty());
    }

    #[test]
    fn test_toggle_floating_removes_from_tiling() {
        let mut state = setup_state();
        map(&mut state, 1, "st");
        map(&mut state, 2, "st");

        state.toggle_floating();
        assert!(state.clients[&2].is_floating);
        assert_eq!(rect_of(&state, 1), Rect::new(0, 20, 998, 798));
        // Keeps its last tiled geometry
        assert_eq!(rect_of(&state, 2), Rect::new(0, 20, 828, 798));

        state.toggle_floating();
        assert!(!state.clients[&2].is_floating);
        assert_eq!(rect_of(&state, 2), Rect::new(0, 20, 828, 798));
    }

    #[test]
    fn test_monocle_layout_and_symbol() {
        let mut state = setup_state();
        map(&mut state, 1, "st");
        map(&mut state, 2, "st");

        state.set_layout(Some(2));
        assert_eq!(state.layout_symbol(), "[2]");
        assert_eq!(rect_of(&state, 1), Rect::new(0, 20, 998, 798));
        assert_eq!(rect_of(&state, 2), Rect::new(0, 20, 998, 798));

        // No argument swaps back to the previous layout
        state.set_layout(None);
        assert_eq!(state.layout_symbol(), "=[]");
        assert_eq!(rect_of(&state, 1), Rect::new(830, 20, 168, 798));

        state.set_layout(None);
        assert_eq!(state.monitors[0].layout_index(), 2);
    }

    #[test]
    fn test_set_layout_rejects_unknown_index() {
        let mut state = setup_state();
        assert!(state.set_layout(Some(7)).is_empty());
        assert_eq!(state.monitors[0].layout_index(), 0);
    }

    #[test]
    fn test_floating_layout_keeps_geometry() {
        let mut state = setup_state();
        map(&mut state, 1, "st");
        let before = rect_of(&state, 1);
        state.set_layout(Some(1));
        assert_eq!(state.layout_symbol(), "><>");
        assert_eq!(rect_of(&state, 1), before);
        // mfact is meaningless without tiling
        assert!(state.set_mfact(0.05).is_empty());
    }

    #[test]
    fn test_set_mfact_relative_and_absolute() {
        let mut state = setup_state();
        map(&mut state, 1, "st");
        map(&mut state, 2, "st");

        state.set_mfact(-0.33);
        assert!((state.monitors[0].mfact - 0.5).abs() < 1e-6);
        assert_eq!(rect_of(&state, 2), Rect::new(0, 20, 498, 798));

        state.set_mfact(1.25);
        assert!((state.monitors[0].mfact - 0.25).abs() < 1e-6);

        state.set_mfact(0.9);
        assert_eq!(state.monitors[0].mfact, 0.95);
        state.set_mfact(-2.0);
        assert_eq!(state.monitors[0].mfact, 0.05);
    }

    #[test]
    fn test_inc_nmaster_floors_at_zero() {
        let mut state = setup_state();
        map(&mut state, 1, "st");
        map(&mut state, 2, "st");

        state.inc_nmaster(1);
        assert_eq!(state.monitors[0].nmaster, 2);
        assert_eq!(rect_of(&state, 1), Rect::new(0, 420, 998, 398));

        state.inc_nmaster(-5);
        assert_eq!(state.monitors[0].nmaster, 0);
        assert!(state.inc_nmaster(-1).is_empty());
    }

    #[test]
    fn test_fullscreen_round_trip() {
        let mut state = setup_state();
        map(&mut state, 1, "st");
        map(&mut state, 2, "st");
        let tiled = rect_of(&state, 2);

        state.toggle_fullscreen();
        let client = &state.clients[&2];
        assert!(client.is_fullscreen);
        assert_eq!(client.border_width, 0);
        assert_eq!(client.rect, Rect::new(0, 0, 1000, 820));
        // The other client takes the whole area
        assert_eq!(rect_of(&state, 1), Rect::new(0, 20, 998, 798));

        // Locked while fullscreen
        assert!(state.focus_stack(1).is_empty());
        assert_eq!(state.focused(), Some(2));

        state.toggle_fullscreen();
        let client = &state.clients[&2];
        assert!(!client.is_fullscreen);
        assert!(!client.is_floating);
        assert_eq!(client.border_width, 1);
        assert_eq!(client.rect, tiled);
    }

    #[test]
    fn test_kill_client() {
        let mut state = setup_state();
        assert!(state.kill_client().is_empty());
        map(&mut state, 1, "st");
        assert_eq!(state.kill_client(), vec![Effect::Close { window: 1 }]);
        // Closing is the host's job; the client stays until unmapped
        assert!(state.clients.contains_key(&1));
    }

    fn last_restack(effects: &[Effect]) -> Option<Vec<WindowId>> {
        effects.iter().rev().find_map(|e| match e {
            Effect::Restack { windows } => Some(windows.clone()),
            _ => None,
        })
    }

    #[test]
    fn test_monocle_focus_stack_brings_client_to_front() {
        let mut state = setup_state();
        map(&mut state, 1, "st");
        map(&mut state, 2, "st");
        state.set_layout(Some(2));

        let effects = state.focus_stack(1);
        assert_eq!(state.focused(), Some(1));
        assert_eq!(last_restack(&effects), Some(vec![1, 2]));

        let effects = state.focus_stack(1);
        assert_eq!(state.focused(), Some(2));
        assert_eq!(last_restack(&effects), Some(vec![2, 1]));
    }

    #[test]
    fn test_zoom_restacks_new_master_on_top() {
        let mut state = setup_state();
        map(&mut state, 1, "st");
        map(&mut state, 2, "st");
        focus(&mut state, Some(1));

        let effects = state.zoom();
        assert_eq!(state.monitors[0].clients.first(), Some(&1));
        assert_eq!(last_restack(&effects), Some(vec![1, 2]));
    }

    #[test]
    fn test_floating_clients_stack_above_tiled() {
        let mut state = setup_state();
        map(&mut state, 1, "st");
        map(&mut state, 2, "st");
        state.toggle_floating();
        assert!(state.clients[&2].is_floating);

        focus(&mut state, Some(1));
        assert_eq!(
            state.restack(),
            vec![Effect::Restack {
                windows: vec![2, 1]
            }]
        );
    }

    #[test]
    fn test_floating_layout_only_raises_selection() {
        let mut state = setup_state();
        map(&mut state, 1, "st");
        map(&mut state, 2, "st");
        state.set_layout(Some(1));
        assert_eq!(state.restack(), vec![Effect::Raise { window: 2 }]);
    }

    #[test]
    fn test_restack_skips_hidden_clients() {
        let mut state = setup_state();
        map(&mut state, 1, "st");
        map(&mut state, 2, "firefox");
        map(&mut state, 3, "st");
        assert_eq!(
            state.restack(),
            vec![Effect::Restack {
                windows: vec![3, 1]
            }]
        );
    }

    #[test]
    fn test_begin_pointer() {
        let mut state = setup_state();
        map(&mut state, 1, "st");
        let effects = state.begin_pointer(PointerOp::Move);
        assert_eq!(
            effects,
            vec![
                Effect::Raise { window: 1 },
                Effect::BeginPointer {
                    window: 1,
                    op: PointerOp::Move
                }
            ]
        );
    }

    #[test]
    fn test_move_client_small_drag_stays_tiled() {
        let mut state = setup_state();
        map(&mut state, 1, "st");
        assert!(state.move_client(1, Rect::new(10, 30, 998, 798)).is_empty());
        assert!(!state.clients[&1].is_floating);
    }

    #[test]
    fn test_move_client_far_drag_floats() {
        let mut state = setup_state();
        map(&mut state, 1, "st");
        map(&mut state, 2, "st");

        state.move_client(2, Rect::new(300, 300, 200, 100));
        let client = &state.clients[&2];
        assert!(client.is_floating);
        assert_eq!(client.rect, Rect::new(300, 300, 200, 100));
        assert_eq!(rect_of(&state, 1), Rect::new(0, 20, 998, 798));
    }

    #[test]
    fn test_move_client_snaps_to_area_edge() {
        let mut state = setup_state();
        map(&mut state, 1, "Surf");
        state.move_client(1, Rect::new(10, 300, 400, 300));
        assert_eq!(rect_of(&state, 1).x, 0);

        // 1000 - (580 + 402) = 18 < 32
        state.move_client(1, Rect::new(580, 300, 400, 300));
        assert_eq!(rect_of(&state, 1).x, 598);
    }

    #[test]
    fn test_move_client_with_oversized_geometry() {
        let mut state = setup_state();
        map(&mut state, 1, "Surf");

        state.move_client(1, Rect::new(i32::MAX - 10, 300, u32::MAX, u32::MAX));
        let client = &state.clients[&1];
        assert_eq!(client.monitor, 0);
        assert_eq!(client.rect.x, i32::MAX - 10);
        assert_eq!(client.rect.width, i32::MAX as u32 - 2);
    }

    #[test]
    fn test_move_client_across_monitors() {
        let mut state = setup_dual_monitor_state();
        map(&mut state, 1, "Surf");
        state.move_client(1, Rect::new(1300, 300, 400, 300));

        assert_eq!(state.clients[&1].monitor, 1);
        assert_eq!(state.selected_monitor, 1);
        assert_eq!(state.focused(), Some(1));
    }

    #[test]
    fn test_configure_request() {
        let mut state = setup_state();
        map(&mut state, 1, "st");
        map(&mut state, 2, "Surf");

        // Tiled clients are told their current geometry
        let effects = state.configure_request(1, Rect::new(5, 5, 50, 50));
        assert_eq!(
            effects,
            vec![Effect::Configure {
                window: 1,
                rect: Rect::new(0, 20, 998, 798),
                border_width: 1,
            }]
        );

        let effects = state.configure_request(2, Rect::new(50, 60, 320, 240));
        assert_eq!(rect_of(&state, 2), Rect::new(50, 60, 320, 240));
        assert_eq!(effects.len(), 1);

        assert!(state.configure_request(99, Rect::new(0, 0, 10, 10)).is_empty());
    }

    #[test]
    fn test_update_hints_fixed_client_floats() {
        let mut state = setup_state();
        map(&mut state, 1, "st");
        let fixed = SizeHints {
            min_width: 300,
            min_height: 200,
            max_width: 300,
            max_height: 200,
            ..Default::default()
        };
        state.update_hints(1, fixed);
        assert!(state.clients[&1].is_floating);
    }

    #[test]
    fn test_resize_hints_apply_to_tiled_clients() {
        let mut state = setup_state();
        let terminal = WindowAttributes {
            class: Some("st".to_string()),
            hints: SizeHints {
                base_width: 2,
                base_height: 2,
                inc_width: 10,
                inc_height: 20,
                ..Default::default()
            },
            ..Default::default()
        };
        state.manage(1, &terminal, &MockLineage::new());
        let rect = rect_of(&state, 1);
        assert_eq!((rect.width - 2) % 10, 0);
        assert_eq!((rect.height - 2) % 20, 0);
        assert_eq!(rect, Rect::new(0, 20, 992, 782));
    }

    #[test]
    fn test_enter_focuses_client() {
        let mut state = setup_state();
        map(&mut state, 1, "st");
        map(&mut state, 2, "st");
        state.enter(1);
        assert_eq!(state.focused(), Some(1));
        assert!(state.enter(1).is_empty());
    }

    #[test]
    fn test_enter_other_monitor_selects_it() {
        let mut state = setup_dual_monitor_state();
        map(&mut state, 1, "st");
        map(&mut state, 2, "Gimp");
        assert_eq!(state.clients[&2].monitor, 1);
        assert_eq!(state.selected_monitor, 0);

        state.enter(2);
        assert_eq!(state.selected_monitor, 1);
        assert_eq!(state.focused(), Some(2));
    }

    #[test]
    fn test_focus_monitor_wraps() {
        let mut state = setup_dual_monitor_state();
        map(&mut state, 1, "st");

        state.focus_monitor(1);
        assert_eq!(state.selected_monitor, 1);
        assert_eq!(state.focused(), None);

        state.focus_monitor(1);
        assert_eq!(state.selected_monitor, 0);
        assert_eq!(state.focused(), Some(1));

        state.focus_monitor(-1);
        assert_eq!(state.selected_monitor, 1);
    }

    #[test]
    fn test_focus_monitor_single_is_noop() {
        let mut state = setup_state();
        assert!(state.focus_monitor(1).is_empty());
        assert!(state.tag_monitor(1).is_empty());
    }

    #[test]
    fn test_tag_monitor_takes_target_view() {
        let mut state = setup_dual_monitor_state();
        state.focus_monitor(1);
        state.view(1 << 4);
        state.focus_monitor(-1);
        map(&mut state, 1, "st");

        state.tag_monitor(1);
        let client = &state.clients[&1];
        assert_eq!(client.monitor, 1);
        assert_eq!(client.tags, Tag::new(5));
        assert!(state.monitors[0].clients.is_empty());
        assert_eq!(state.monitors[1].clients, vec![1]);
        assert_eq!(state.selected_monitor, 0);
        assert_eq!(state.focused(), None);
        assert_eq!(rect_of(&state, 1), Rect::new(1000, 20, 998, 798));
    }

    #[test]
    fn test_removed_monitor_moves_clients_to_first() {
        let mut state = setup_dual_monitor_state();
        map(&mut state, 1, "st");
        map(&mut state, 2, "Code");
        state.focus_monitor(1);

        state.update_screens(&[Rect::new(0, 0, 1000, 820)]);
        assert_eq!(state.monitors.len(), 1);
        assert_eq!(state.selected_monitor, 0);
        let client = &state.clients[&2];
        assert_eq!(client.monitor, 0);
        assert_eq!(client.tags, Tag::new(8));
        assert!(state.monitors[0].clients.contains(&2));
        assert!(state.update_screens(&[]).is_empty());
    }

    #[test]
    fn test_toggle_bar_changes_area() {
        let mut state = setup_state();
        map(&mut state, 1, "st");
        state.toggle_bar();
        assert!(!state.monitors[0].show_bar);
        assert_eq!(rect_of(&state, 1), Rect::new(0, 0, 998, 818));
        state.toggle_bar();
        assert_eq!(rect_of(&state, 1), Rect::new(0, 20, 998, 798));
    }

    #[test]
    fn test_arrange_is_idempotent() {
        let mut state = setup_state();
        map(&mut state, 1, "st");
        map(&mut state, 2, "st");
        map(&mut state, 3, "firefox");

        let first = arrange(&mut state, 0);
        let rects: Vec<Rect> = [1, 2, 3].iter().map(|id| rect_of(&state, *id)).collect();
        let second = arrange(&mut state, 0);
        let again: Vec<Rect> = [1, 2, 3].iter().map(|id| rect_of(&state, *id)).collect();
        assert_eq!(first, second);
        assert_eq!(rects, again);
    }

    #[test]
    fn test_bar_info() {
        let mut state = setup_state();
        map(&mut state, 1, "st");
        map(&mut state, 2, "firefox");
        state.set_status_text("vol 40%");

        let bar = state.bar_info(0).unwrap();
        assert_eq!(bar.tag_names.len(), 9);
        assert_eq!(bar.occupied_tags, 1 | 1 << 6);
        assert_eq!(bar.selected_tags, 1);
        assert_eq!(bar.layout_symbol, "=[]");
        assert_eq!(bar.title, "st window");
        assert_eq!(bar.status_text, "vol 40%");
        assert!(bar.is_selected_monitor);
        assert!(state.bar_info(5).is_none());
    }

    #[test]
    fn test_quit_clears_running() {
        let mut state = setup_state();
        assert!(state.running);
        state.quit();
        assert!(!state.running);
    }
}
