use super::focus::{focus, unfocus};
use super::layout::{arrange, arrange_all};
use super::State;
use crate::core::{Monitor, Rect, WindowId};
use crate::effect::Effect;

fn monitor_in_direction(state: &State, delta: i32) -> usize {
    let count = state.monitors.len().max(1) as i64;
    (state.selected_monitor as i64 + delta as i64).rem_euclid(count) as usize
}

/// Monitor with the largest overlap, the selected one if nothing overlaps.
pub fn rect_to_monitor(state: &State, rect: &Rect) -> usize {
    let mut best = state.selected_monitor;
    let mut best_area = 0;
    for monitor in &state.monitors {
        let area = monitor.area.intersect_area(rect);
        if area > best_area {
            best_area = area;
            best = monitor.index;
        }
    }
    best
}

pub fn focus_monitor(state: &mut State, delta: i32) -> Vec<Effect> {
    if state.monitors.len() <= 1 {
        return vec![];
    }
    let target = monitor_in_direction(state, delta);
    if target == state.selected_monitor {
        return vec![];
    }

    let mut effects = state
        .focused()
        .map(|prev| unfocus(state, prev))
        .unwrap_or_default();
    tracing::info!("Focus monitor: {} -> {}", state.selected_monitor, target);
    state.selected_monitor = target;
    effects.extend(focus(state, None));
    effects
}

pub fn tag_monitor(state: &mut State, delta: i32) -> Vec<Effect> {
    let Some(sel) = state.focused() else {
        return vec![];
    };
    if state.monitors.len() <= 1 {
        return vec![];
    }
    let target = monitor_in_direction(state, delta);
    send_to_monitor(state, sel, target)
}

/// Move a client to another monitor, where it takes that monitor's current view.
pub fn send_to_monitor(state: &mut State, window: WindowId, target: usize) -> Vec<Effect> {
    let Some(tags) = state.monitors.get(target).map(|m| m.visible_tags()) else {
        return vec![];
    };
    let Some(source) = state.clients.get(&window).map(|c| c.monitor) else {
        return vec![];
    };
    if source == target {
        return vec![];
    }

    let mut effects = unfocus(state, window);
    if let Some(monitor) = state.monitors.get_mut(source) {
        monitor.detach(window);
        monitor.detach_stack(window);
    }
    if let Some(client) = state.clients.get_mut(&window) {
        client.monitor = target;
        client.tags = tags;
    }
    if let Some(monitor) = state.monitors.get_mut(target) {
        monitor.attach(window);
        monitor.attach_stack(window);
    }
    tracing::info!(
        "Send window {} to monitor {} -> {} (tags {})",
        window,
        source,
        target,
        tags.mask()
    );

    effects.extend(focus(state, None));
    effects.extend(arrange(state, source));
    effects.extend(arrange(state, target));
    effects
}

/// Reconcile the monitor set with the host's screens. Clients of removed
/// monitors move to the first monitor and keep their tags.
pub fn update_screens(state: &mut State, screens: &[Rect]) -> Vec<Effect> {
    if screens.is_empty() {
        tracing::warn!("Ignoring empty screen list");
        return vec![];
    }
    let bar_height = state.config.bar_height;

    for (index, screen) in screens.iter().enumerate() {
        match state.monitors.get_mut(index) {
            Some(monitor) => {
                if monitor.screen != *screen {
                    tracing::info!(
                        "Monitor {} resized: {:?} -> {:?}",
                        index,
                        monitor.screen,
                        screen
                    );
                    monitor.screen = *screen;
                    monitor.update_bar_position(bar_height);
                }
            }
            None => {
                tracing::info!("Monitor {} added: {:?}", index, screen);
                state
                    .monitors
                    .push(Monitor::new(index, *screen, &state.config));
            }
        }
    }

    while state.monitors.len() > screens.len() {
        let Some(removed) = state.monitors.pop() else {
            break;
        };
        tracing::info!(
            "Monitor {} removed, moving {} clients to monitor 0",
            removed.index,
            removed.clients.len()
        );
        for &id in &removed.clients {
            if let Some(client) = state.clients.get_mut(&id) {
                client.monitor = 0;
            }
        }
        if let Some(first) = state.monitors.first_mut() {
            for &id in removed.clients.iter().rev() {
                first.attach(id);
            }
            for &id in removed.stack.iter().rev() {
                first.attach_stack(id);
            }
        }
    }
    if state.selected_monitor >= state.monitors.len() {
        state.selected_monitor = 0;
    }

    let mut effects = arrange_all(state);
    effects.extend(focus(state, None));
    effects
}

pub fn toggle_bar(state: &mut State) -> Vec<Effect> {
    let bar_height = state.config.bar_height;
    let mon = state.selected_monitor;
    let Some(monitor) = state.monitors.get_mut(mon) else {
        return vec![];
    };
    monitor.show_bar = !monitor.show_bar;
    monitor.update_bar_position(bar_height);
    tracing::info!("Bar on monitor {}: {}", mon, monitor.show_bar);
    arrange(state, mon)
}
