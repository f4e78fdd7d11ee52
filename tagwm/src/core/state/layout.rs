use super::State;
use crate::core::{hints, Rect, WindowId};
use crate::effect::Effect;
use crate::layout::{clamp_mfact, LayoutKind};

pub fn layout_kind(state: &State, mon: usize) -> Option<LayoutKind> {
    let monitor = state.monitors.get(mon)?;
    state
        .config
        .layout(monitor.layout_index())
        .map(|layout| layout.kind)
}

pub fn is_floating_layout(state: &State, mon: usize) -> bool {
    layout_kind(state, mon).map_or(true, LayoutKind::is_floating)
}

/// Visible clients of a monitor in layout order.
pub fn visible_clients(state: &State, mon: usize) -> Vec<WindowId> {
    let Some(monitor) = state.monitors.get(mon) else {
        return vec![];
    };
    monitor
        .clients
        .iter()
        .copied()
        .filter(|id| state.clients.get(id).is_some_and(|c| state.is_visible(c)))
        .collect()
}

pub fn tiled_clients(state: &State, mon: usize) -> Vec<WindowId> {
    let Some(monitor) = state.monitors.get(mon) else {
        return vec![];
    };
    monitor
        .clients
        .iter()
        .copied()
        .filter(|id| {
            state
                .clients
                .get(id)
                .is_some_and(|c| c.is_tiled() && state.is_visible(c))
        })
        .collect()
}

pub fn arrange(state: &mut State, mon: usize) -> Vec<Effect> {
    let mut effects = show_hide(state, mon);
    effects.extend(arrange_monitor(state, mon));
    effects.extend(restack(state, mon));
    effects
}

pub fn arrange_all(state: &mut State) -> Vec<Effect> {
    let mut effects = Vec::new();
    for mon in 0..state.monitors.len() {
        effects.extend(arrange(state, mon));
    }
    effects
}

/// Place visible clients the layout does not manage and move hidden ones out of sight.
fn show_hide(state: &State, mon: usize) -> Vec<Effect> {
    let floating_layout = is_floating_layout(state, mon);
    let Some(monitor) = state.monitors.get(mon) else {
        return vec![];
    };

    let mut effects = Vec::new();
    for id in &monitor.stack {
        let Some(client) = state.clients.get(id) else {
            continue;
        };
        if state.is_visible(client) {
            if floating_layout || !client.is_tiled() {
                effects.push(Effect::Configure {
                    window: *id,
                    rect: client.rect,
                    border_width: client.border_width,
                });
            }
        } else {
            effects.push(Effect::Hide {
                window: *id,
                rect: client.rect,
            });
        }
    }
    effects
}

fn arrange_monitor(state: &mut State, mon: usize) -> Vec<Effect> {
    let Some(monitor) = state.monitors.get(mon) else {
        return vec![];
    };
    let Some(layout) = state.config.layout(monitor.layout_index()).cloned() else {
        return vec![];
    };

    let tiled = tiled_clients(state, mon);
    let geometries = layout
        .kind
        .arrange(&tiled, monitor.nmaster, monitor.mfact, monitor.area);

    let symbol = match layout.kind {
        LayoutKind::Monocle => match visible_clients(state, mon).len() {
            0 => layout.symbol,
            n => format!("[{}]", n),
        },
        _ => layout.symbol,
    };
    if let Some(monitor) = state.monitors.get_mut(mon) {
        monitor.layout_symbol = symbol;
    }

    geometries
        .into_iter()
        .filter_map(|geometry| resize(state, geometry.id, geometry.rect))
        .collect()
}

/// Floating layouts only raise the selection. Otherwise floating and
/// fullscreen clients go above tiled ones, each group in focus order.
pub fn restack(state: &State, mon: usize) -> Vec<Effect> {
    let Some(monitor) = state.monitors.get(mon) else {
        return vec![];
    };
    let Some(sel) = monitor.selected else {
        return vec![];
    };
    if is_floating_layout(state, mon) {
        return vec![Effect::Raise { window: sel }];
    }

    let (mut windows, tiled): (Vec<WindowId>, Vec<WindowId>) = monitor
        .stack
        .iter()
        .copied()
        .filter(|id| state.clients.get(id).is_some_and(|c| state.is_visible(c)))
        .partition(|id| state.clients.get(id).is_some_and(|c| !c.is_tiled()));
    windows.extend(tiled);
    vec![Effect::Restack { windows }]
}

/// Fit a client into an outer rectangle, border included.
pub fn resize(state: &mut State, id: WindowId, outer: Rect) -> Option<Effect> {
    let client = state.clients.get(&id)?;
    let use_hints =
        state.config.resize_hints || client.is_floating || is_floating_layout(state, client.monitor);

    let client = state.clients.get_mut(&id)?;
    let border = client.border_width;
    let mut width = outer.width.saturating_sub(2 * border).max(1);
    let mut height = outer.height.saturating_sub(2 * border).max(1);
    if use_hints {
        (width, height) = hints::apply(&client.hints, width, height);
    }

    client.rect = Rect::new(outer.x, outer.y, width, height);
    tracing::debug!(
        "Resize {}: ({}, {}) {}x{}",
        id,
        outer.x,
        outer.y,
        width,
        height
    );
    Some(Effect::Configure {
        window: id,
        rect: client.rect,
        border_width: border,
    })
}

/// `None` swaps to the previous layout.
pub fn set_layout(state: &mut State, layout: Option<usize>) -> Vec<Effect> {
    if let Some(index) = layout {
        if state.config.layout(index).is_none() {
            tracing::warn!("Unknown layout index: {}", index);
            return vec![];
        }
    }
    let mon = state.selected_monitor;
    let Some(monitor) = state.monitors.get_mut(mon) else {
        return vec![];
    };

    let previous = monitor.layout_index();
    if layout != Some(previous) {
        monitor.sel_layout ^= 1;
    }
    if let Some(index) = layout {
        monitor.layouts[monitor.sel_layout] = index;
    }
    tracing::info!(
        "Set layout on monitor {}: {} -> {}",
        mon,
        previous,
        monitor.layout_index()
    );
    arrange(state, mon)
}

/// Values below 1.0 adjust the current factor, larger values set `f - 1.0`.
pub fn set_mfact(state: &mut State, f: f32) -> Vec<Effect> {
    let mon = state.selected_monitor;
    if is_floating_layout(state, mon) {
        return vec![];
    }
    let Some(monitor) = state.monitors.get_mut(mon) else {
        return vec![];
    };

    let target = if f < 1.0 { monitor.mfact + f } else { f - 1.0 };
    let mfact = clamp_mfact(target);
    if mfact == monitor.mfact {
        return vec![];
    }
    tracing::info!("Set mfact on monitor {}: {:.2} -> {:.2}", mon, monitor.mfact, mfact);
    monitor.mfact = mfact;
    arrange(state, mon)
}

pub fn inc_nmaster(state: &mut State, delta: i32) -> Vec<Effect> {
    let mon = state.selected_monitor;
    let Some(monitor) = state.monitors.get_mut(mon) else {
        return vec![];
    };
    let nmaster = (monitor.nmaster as i64 + delta as i64).max(0) as u32;
    if nmaster == monitor.nmaster {
        return vec![];
    }
    tracing::info!("Set nmaster on monitor {}: {} -> {}", mon, monitor.nmaster, nmaster);
    monitor.nmaster = nmaster;
    arrange(state, mon)
}
