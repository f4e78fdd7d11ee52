use super::layout::{arrange, is_floating_layout, resize, tiled_clients, visible_clients};
use super::State;
use crate::core::{Scheme, WindowId};
use crate::effect::Effect;
use crate::platform::PointerOp;

/// Most recently focused visible client of a monitor.
pub fn first_visible_in_stack(state: &State, mon: usize) -> Option<WindowId> {
    state.monitors.get(mon)?.stack.iter().copied().find(|id| {
        state
            .clients
            .get(id)
            .is_some_and(|c| state.is_visible(c))
    })
}

pub fn unfocus(state: &State, window: WindowId) -> Vec<Effect> {
    if !state.clients.contains_key(&window) {
        return vec![];
    }
    vec![Effect::SetBorder {
        window,
        color: state.config.scheme(Scheme::Normal).border.clone(),
    }]
}

/// Focus a visible client, or the most recent visible client of the selected monitor.
pub fn focus(state: &mut State, window: Option<WindowId>) -> Vec<Effect> {
    let target = window
        .filter(|id| {
            state
                .clients
                .get(id)
                .is_some_and(|c| state.is_visible(c))
        })
        .or_else(|| first_visible_in_stack(state, state.selected_monitor));

    let previous = state.focused();
    let mut effects = Vec::new();
    if let Some(prev) = previous.filter(|&prev| Some(prev) != target) {
        effects.extend(unfocus(state, prev));
    }

    let Some(id) = target else {
        if let Some(monitor) = state.monitors.get_mut(state.selected_monitor) {
            monitor.selected = None;
        }
        effects.push(Effect::Focus { window: None });
        return effects;
    };
    let Some(client) = state.clients.get_mut(&id) else {
        return effects;
    };

    client.is_urgent = false;
    let mon = client.monitor;
    if mon != state.selected_monitor {
        tracing::info!("Focus monitor: {} -> {}", state.selected_monitor, mon);
        state.selected_monitor = mon;
    }
    if let Some(monitor) = state.monitors.get_mut(mon) {
        monitor.detach_stack(id);
        monitor.attach_stack(id);
        monitor.selected = Some(id);
    }
    if previous != Some(id) {
        tracing::info!("Focus: {:?} -> {}", previous, id);
    }

    effects.push(Effect::SetBorder {
        window: id,
        color: state.config.scheme(Scheme::Selected).border.clone(),
    });
    effects.push(Effect::Focus { window: Some(id) });
    effects
}

pub fn focus_stack(state: &mut State, delta: i32) -> Vec<Effect> {
    let Some(sel) = state.focused() else {
        return vec![];
    };
    let Some(client) = state.clients.get(&sel) else {
        return vec![];
    };
    if delta == 0 || (client.is_fullscreen && state.config.lock_fullscreen) {
        return vec![];
    }

    let mon = state.selected_monitor;
    let visible = visible_clients(state, mon);
    let Some(pos) = visible.iter().position(|&id| id == sel) else {
        return vec![];
    };
    let next = (pos as i64 + delta as i64).rem_euclid(visible.len() as i64) as usize;

    let mut effects = focus(state, Some(visible[next]));
    effects.extend(arrange(state, mon));
    effects
}

/// Swap the selected client with the master, or the master with the next tiled client.
pub fn zoom(state: &mut State) -> Vec<Effect> {
    let mon = state.selected_monitor;
    let Some(sel) = state.focused() else {
        return vec![];
    };
    if is_floating_layout(state, mon) || state.clients.get(&sel).map_or(true, |c| c.is_floating) {
        return vec![];
    }

    let tiled = tiled_clients(state, mon);
    let target = if tiled.first() == Some(&sel) {
        let Some(&next) = tiled.get(1) else {
            return vec![];
        };
        next
    } else {
        sel
    };

    if let Some(monitor) = state.monitors.get_mut(mon) {
        monitor.detach(target);
        monitor.attach(target);
    }
    tracing::info!("Zoom: {} is now master on monitor {}", target, mon);
    let mut effects = focus(state, Some(target));
    effects.extend(arrange(state, mon));
    effects
}

pub fn toggle_floating(state: &mut State) -> Vec<Effect> {
    let Some(sel) = state.focused() else {
        return vec![];
    };
    let Some(client) = state.clients.get_mut(&sel) else {
        return vec![];
    };
    if client.is_fullscreen {
        return vec![];
    }

    client.is_floating = !client.is_floating || client.is_fixed;
    tracing::info!("Toggle floating for {}: {}", sel, client.is_floating);
    let mon = client.monitor;
    let outer = client.outer_rect();
    let floating = client.is_floating;

    let mut effects = Vec::new();
    if floating {
        effects.extend(resize(state, sel, outer));
    }
    effects.extend(arrange(state, mon));
    effects
}

pub fn set_fullscreen(state: &mut State, window: WindowId, fullscreen: bool) -> Vec<Effect> {
    let Some(client) = state.clients.get(&window) else {
        return vec![];
    };
    if client.is_fullscreen == fullscreen {
        return vec![];
    }
    let mon = client.monitor;
    let Some(screen) = state.monitors.get(mon).map(|m| m.screen) else {
        return vec![];
    };
    let Some(client) = state.clients.get_mut(&window) else {
        return vec![];
    };

    if fullscreen {
        client.old_floating = client.is_floating;
        client.old_border_width = client.border_width;
        client.saved_rect = Some(client.rect);
        client.is_fullscreen = true;
        client.is_floating = true;
        client.border_width = 0;
        client.rect = screen;
    } else {
        client.is_fullscreen = false;
        client.is_floating = client.old_floating;
        client.border_width = client.old_border_width;
        if let Some(rect) = client.saved_rect.take() {
            client.rect = rect;
        }
    }
    tracing::info!("Fullscreen for {}: {}", window, fullscreen);

    let mut effects = arrange(state, mon);
    if fullscreen {
        effects.push(Effect::Raise { window });
    }
    effects
}

pub fn toggle_fullscreen(state: &mut State) -> Vec<Effect> {
    let Some(sel) = state.focused() else {
        return vec![];
    };
    let Some(fullscreen) = state.clients.get(&sel).map(|c| c.is_fullscreen) else {
        return vec![];
    };
    set_fullscreen(state, sel, !fullscreen)
}

pub fn kill_client(state: &State) -> Vec<Effect> {
    let Some(sel) = state.focused() else {
        return vec![];
    };
    tracing::info!("Close {}", sel);
    vec![Effect::Close { window: sel }]
}

/// The focused client never becomes urgent.
pub fn set_urgent(state: &mut State, window: WindowId, urgent: bool) -> Vec<Effect> {
    let focused = state.focused();
    let Some(client) = state.clients.get_mut(&window) else {
        return vec![];
    };
    let urgent = urgent && focused != Some(window);
    if client.is_urgent != urgent {
        tracing::info!("Urgency for {}: {}", window, urgent);
        client.is_urgent = urgent;
    }
    vec![]
}

pub fn begin_pointer(state: &State, op: PointerOp) -> Vec<Effect> {
    let Some(sel) = state.focused() else {
        return vec![];
    };
    if state.clients.get(&sel).map_or(true, |c| c.is_fullscreen) {
        return vec![];
    }
    vec![
        Effect::Raise { window: sel },
        Effect::BeginPointer { window: sel, op },
    ]
}
