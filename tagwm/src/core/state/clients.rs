use std::time::Instant;

use super::focus::{focus, unfocus};
use super::layout::{arrange, is_floating_layout, resize};
use super::monitors::{rect_to_monitor, send_to_monitor};
use super::State;
use crate::core::{hints, Client, Rect, Tag, WindowId};
use crate::effect::Effect;
use crate::platform::ProcessLineage;
use tagwm_ipc::{SizeHints, WindowAttributes};

/// Start tracking a newly mapped window.
///
/// Placement comes from, in order: the startup program that spawned it, the
/// window it is transient for, then the rule table.
pub fn manage<L: ProcessLineage + ?Sized>(
    state: &mut State,
    window: WindowId,
    attrs: &WindowAttributes,
    lineage: &L,
) -> Vec<Effect> {
    if state.clients.contains_key(&window) {
        return vec![];
    }
    if state.monitors.is_empty() {
        tracing::warn!("No monitors, ignoring window {}", window);
        return vec![];
    }

    let mut client = Client::from_attributes(
        window,
        attrs,
        state.selected_monitor,
        state.config.border_px,
    );
    let parent = attrs
        .transient_for
        .and_then(|parent| state.clients.get(&parent))
        .map(|parent| (parent.monitor, parent.tags));
    let classification = state.rules_engine.classify(
        attrs.class.as_deref(),
        attrs.instance.as_deref(),
        &attrs.title,
    );

    if let Some(claim) = state.autostart.claim(attrs.pid, lineage, Instant::now()) {
        client.monitor = state.resolve_monitor(claim.monitor);
        client.tags = state.resolve_tags(claim.tags, client.monitor);
        client.is_floating = classification.is_floating;
    } else if let Some((monitor, tags)) = parent {
        client.monitor = monitor;
        client.tags = tags;
        client.is_floating = true;
    } else {
        client.monitor = state.resolve_monitor(classification.monitor);
        client.tags = state.resolve_tags(classification.tags, client.monitor);
        client.is_floating = classification.is_floating;
    }
    client.is_floating |= client.is_fixed;

    let mon = client.monitor;
    let previous = state.focused();
    let Some(monitor) = state.monitors.get_mut(mon) else {
        return vec![];
    };
    clamp_into(&mut client, monitor.area);

    tracing::info!(
        "Manage {}: class={:?} title={:?} monitor={} tags={} floating={}",
        window,
        client.class,
        client.title,
        mon,
        client.tags.mask(),
        client.is_floating
    );

    monitor.attach(window);
    monitor.attach_stack(window);
    monitor.selected = Some(window);
    let is_floating = client.is_floating;
    state.clients.insert(window, client);

    let mut effects = Vec::new();
    if mon == state.selected_monitor {
        if let Some(prev) = previous {
            effects.extend(unfocus(state, prev));
        }
    }
    if attrs.is_fullscreen {
        effects.extend(super::focus::set_fullscreen(state, window, true));
    }
    if is_floating {
        effects.push(Effect::Raise { window });
    }
    effects.extend(arrange(state, mon));
    effects.extend(focus(state, None));
    effects
}

/// Keep a new client's outer rectangle inside the window area.
fn clamp_into(client: &mut Client, area: Rect) {
    let outer_width = client.outer_width() as i32;
    let outer_height = client.outer_height() as i32;
    if client.rect.x + outer_width > area.right() {
        client.rect.x = area.right() - outer_width;
    }
    if client.rect.y + outer_height > area.bottom() {
        client.rect.y = area.bottom() - outer_height;
    }
    client.rect.x = client.rect.x.max(area.x);
    client.rect.y = client.rect.y.max(area.y);
}

pub fn unmanage(state: &mut State, window: WindowId) -> Vec<Effect> {
    let Some(client) = state.clients.remove(&window) else {
        return vec![];
    };
    let mon = client.monitor;
    tracing::info!("Unmanage {}: {:?}", window, client.title);

    let was_selected = state
        .monitors
        .get(mon)
        .is_some_and(|m| m.selected == Some(window));
    if let Some(monitor) = state.monitors.get_mut(mon) {
        monitor.detach(window);
        monitor.detach_stack(window);
    }
    if was_selected {
        let next = super::focus::first_visible_in_stack(state, mon);
        if let Some(monitor) = state.monitors.get_mut(mon) {
            monitor.selected = next;
        }
    }

    let mut effects = focus(state, None);
    effects.extend(arrange(state, mon));
    effects
}

/// Floating clients get the geometry they ask for; tiled ones are told
/// their current geometry.
pub fn configure_request(state: &mut State, window: WindowId, rect: Rect) -> Vec<Effect> {
    let Some(client) = state.clients.get(&window) else {
        return vec![];
    };
    let mon = client.monitor;
    if client.is_fullscreen || !(client.is_floating || is_floating_layout(state, mon)) {
        return vec![Effect::Configure {
            window,
            rect: client.rect,
            border_width: client.border_width,
        }];
    }

    let Some(screen) = state.monitors.get(mon).map(|m| m.screen) else {
        return vec![];
    };
    let visible = state.is_visible(client);
    let Some(client) = state.clients.get_mut(&window) else {
        return vec![];
    };

    client.rect = Rect::new(rect.x, rect.y, rect.width.max(1), rect.height.max(1));
    if client.rect.x + client.outer_width() as i32 > screen.right() {
        client.rect.x = screen.x + (screen.width as i32 / 2 - client.outer_width() as i32 / 2);
    }
    if client.rect.y + client.outer_height() as i32 > screen.bottom() {
        client.rect.y = screen.y + (screen.height as i32 / 2 - client.outer_height() as i32 / 2);
    }

    if !visible {
        return vec![];
    }
    vec![Effect::Configure {
        window,
        rect: client.rect,
        border_width: client.border_width,
    }]
}

pub fn update_title(state: &mut State, window: WindowId, title: &str) -> Vec<Effect> {
    if let Some(client) = state.clients.get_mut(&window) {
        client.title = title.to_string();
    }
    vec![]
}

/// New hints that fix the size make a tiled client float.
pub fn update_hints(state: &mut State, window: WindowId, size_hints: SizeHints) -> Vec<Effect> {
    let Some(client) = state.clients.get_mut(&window) else {
        return vec![];
    };
    client.hints = size_hints;
    client.is_fixed = hints::is_fixed(&size_hints);
    if !client.is_fixed || client.is_floating {
        return vec![];
    }

    tracing::info!("Window {} became fixed-size, floating it", window);
    client.is_floating = true;
    let mon = client.monitor;
    arrange(state, mon)
}

/// Focus follows the pointer into a client.
pub fn enter(state: &mut State, window: WindowId) -> Vec<Effect> {
    let Some(mon) = state.clients.get(&window).map(|c| c.monitor) else {
        return vec![];
    };

    let mut effects = Vec::new();
    if mon != state.selected_monitor {
        if let Some(prev) = state.focused() {
            effects.extend(unfocus(state, prev));
        }
        state.selected_monitor = mon;
    } else if state.focused() == Some(window) {
        return vec![];
    }
    effects.extend(focus(state, Some(window)));
    effects
}

/// Final geometry of an interactive move or resize. A tiled client dragged
/// further than the snap distance starts floating; edges within the snap
/// distance of the window area stick to it.
pub fn move_client(state: &mut State, window: WindowId, rect: Rect) -> Vec<Effect> {
    let snap = state.config.snap;
    let Some(client) = state.clients.get(&window) else {
        return vec![];
    };
    if client.is_fullscreen {
        return vec![];
    }
    let mon = client.monitor;
    let Some(area) = state.monitors.get(mon).map(|m| m.area) else {
        return vec![];
    };
    let floating_layout = is_floating_layout(state, mon);

    let displaced = rect.x.abs_diff(client.rect.x) > snap
        || rect.y.abs_diff(client.rect.y) > snap
        || rect.width.abs_diff(client.rect.width) > snap
        || rect.height.abs_diff(client.rect.height) > snap;
    let becomes_floating = !client.is_floating && !floating_layout;
    if becomes_floating && !displaced {
        return vec![];
    }

    let border = client.border_width;
    let outer_width = outer_extent(rect.width, border);
    let outer_height = outer_extent(rect.height, border);
    let mut x = rect.x;
    let mut y = rect.y;
    if area.x.abs_diff(x) < snap {
        x = area.x;
    } else if area.right().abs_diff(x.saturating_add(outer_width)) < snap {
        x = area.right().saturating_sub(outer_width);
    }
    if area.y.abs_diff(y) < snap {
        y = area.y;
    } else if area.bottom().abs_diff(y.saturating_add(outer_height)) < snap {
        y = area.bottom().saturating_sub(outer_height);
    }

    if becomes_floating {
        tracing::info!("Window {} dragged out of the layout", window);
        if let Some(client) = state.clients.get_mut(&window) {
            client.is_floating = true;
        }
    }

    let outer = Rect::new(x, y, outer_width as u32, outer_height as u32);
    let mut effects: Vec<Effect> = resize(state, window, outer).into_iter().collect();

    let target = rect_to_monitor(state, &outer);
    if target != mon {
        effects.extend(send_to_monitor(state, window, target));
        state.selected_monitor = target;
        effects.extend(focus(state, None));
    }
    effects.extend(arrange(state, mon));
    effects
}

/// Size including both borders, capped so it stays a valid coordinate offset.
fn outer_extent(size: u32, border: u32) -> i32 {
    let extent = size.saturating_add(border.saturating_mul(2));
    i32::try_from(extent).unwrap_or(i32::MAX)
}

impl State {
    /// A rule or startup monitor index that names no monitor means the selected one.
    pub(super) fn resolve_monitor(&self, monitor: i32) -> usize {
        usize::try_from(monitor)
            .ok()
            .filter(|&index| index < self.monitors.len())
            .unwrap_or(self.selected_monitor)
    }

    /// No valid tag means the target monitor's current view.
    pub(super) fn resolve_tags(&self, mask: u32, monitor: usize) -> Tag {
        let tags = Tag::from_mask(mask).intersection(self.tag_mask());
        if !tags.is_empty() {
            return tags;
        }
        self.monitors
            .get(monitor)
            .map(|m| m.visible_tags())
            .unwrap_or(Tag::new(1))
    }
}
