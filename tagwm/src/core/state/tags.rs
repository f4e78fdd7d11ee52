use super::focus::focus;
use super::layout::arrange;
use super::State;
use crate::core::{Tag, WindowId};
use crate::effect::Effect;

/// Show exactly `mask` on the selected monitor. A mask with no valid tag
/// swaps back to the previous view.
pub fn view(state: &mut State, mask: u32) -> Vec<Effect> {
    let tags = Tag::from_mask(mask).intersection(state.tag_mask());
    let mon = state.selected_monitor;
    let Some(monitor) = state.monitors.get_mut(mon) else {
        return vec![];
    };
    let current = monitor.visible_tags();
    if tags == current {
        return vec![];
    }

    monitor.sel_tags ^= 1;
    if !tags.is_empty() {
        monitor.tagset[monitor.sel_tags] = tags;
    }
    tracing::info!(
        "View tags on monitor {}: {} -> {}",
        mon,
        current.mask(),
        monitor.visible_tags().mask()
    );

    let mut effects = focus(state, None);
    effects.extend(arrange(state, mon));
    effects
}

pub fn toggle_view(state: &mut State, mask: u32) -> Vec<Effect> {
    let tags = Tag::from_mask(mask).intersection(state.tag_mask());
    let mon = state.selected_monitor;
    let Some(monitor) = state.monitors.get_mut(mon) else {
        return vec![];
    };
    let current = monitor.visible_tags();
    let new_visible = current.toggle(tags);
    if new_visible.is_empty() || new_visible == current {
        return vec![];
    }

    tracing::info!(
        "Toggle tags on monitor {}: {} -> {}",
        mon,
        current.mask(),
        new_visible.mask()
    );
    monitor.tagset[monitor.sel_tags] = new_visible;

    let mut effects = focus(state, None);
    effects.extend(arrange(state, mon));
    effects
}

/// Replace (`exclusive`) or extend a client's tags.
pub fn set_client_tags(
    state: &mut State,
    window: WindowId,
    mask: u32,
    exclusive: bool,
) -> Vec<Effect> {
    let tags = Tag::from_mask(mask).intersection(state.tag_mask());
    if tags.is_empty() {
        return vec![];
    }
    let Some(client) = state.clients.get_mut(&window) else {
        return vec![];
    };

    let new_tags = if exclusive {
        tags
    } else {
        client.tags.union(tags)
    };
    if new_tags == client.tags {
        return vec![];
    }
    tracing::info!(
        "Move window {} to tags: {} -> {}",
        window,
        client.tags.mask(),
        new_tags.mask()
    );
    client.tags = new_tags;
    let mon = client.monitor;

    let mut effects = focus(state, None);
    effects.extend(arrange(state, mon));
    effects
}

pub fn toggle_client_tags(state: &mut State, window: WindowId, mask: u32) -> Vec<Effect> {
    let tags = Tag::from_mask(mask).intersection(state.tag_mask());
    let Some(client) = state.clients.get_mut(&window) else {
        return vec![];
    };
    let new_tags = client.tags.toggle(tags);
    if new_tags.is_empty() || new_tags == client.tags {
        return vec![];
    }

    tracing::info!(
        "Toggle window {} tags: {} -> {}",
        window,
        client.tags.mask(),
        new_tags.mask()
    );
    client.tags = new_tags;
    let mon = client.monitor;

    let mut effects = focus(state, None);
    effects.extend(arrange(state, mon));
    effects
}
