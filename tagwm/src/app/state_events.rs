use std::cell::RefCell;
use std::collections::HashMap;

use crate::core::{Client, State};
use crate::event_emitter::EventEmitter;
use crate::platform::StatusBar;
use tagwm_ipc::BarInfo;

/// Window properties tracked for change detection
#[derive(Clone, PartialEq)]
pub struct WindowProperties {
    tags: u32,
    monitor: usize,
    title: String,
    is_floating: bool,
    is_fullscreen: bool,
    is_urgent: bool,
}

impl WindowProperties {
    fn of(client: &Client) -> Self {
        Self {
            tags: client.tags.mask(),
            monitor: client.monitor,
            title: client.title.clone(),
            is_floating: client.is_floating,
            is_fullscreen: client.is_fullscreen,
            is_urgent: client.is_urgent,
        }
    }
}

/// State captured before command execution for event comparison
pub struct PreEventState {
    /// Per monitor: (visible_tags, layout symbol)
    pub monitors: Vec<(u32, String)>,
    pub windows: HashMap<u32, WindowProperties>,
    pub focused: Option<u32>,
    pub selected_monitor: usize,
    pub bars: Vec<BarInfo>,
}

pub fn capture_event_state(state: &RefCell<State>) -> PreEventState {
    let state = state.borrow();
    let monitors = state
        .monitors
        .iter()
        .map(|m| (m.visible_tags().mask(), m.layout_symbol.clone()))
        .collect();

    let windows = state
        .clients
        .iter()
        .map(|(id, c)| (*id, WindowProperties::of(c)))
        .collect();

    PreEventState {
        monitors,
        windows,
        focused: state.focused(),
        selected_monitor: state.selected_monitor,
        bars: state.bars(),
    }
}

/// Emit events for everything that changed and redraw the bars whose contents differ.
pub fn emit_state_change_events(
    event_emitter: &EventEmitter,
    bar: &dyn StatusBar,
    state: &RefCell<State>,
    pre: &PreEventState,
) {
    let state = state.borrow();
    let focused = state.focused();

    if focused != pre.focused {
        event_emitter.emit_window_focused(focused);
    }

    if state.selected_monitor != pre.selected_monitor {
        event_emitter.emit_monitor_focused(state.selected_monitor);
    }

    for (index, monitor) in state.monitors.iter().enumerate() {
        let Some((pre_tags, pre_layout)) = pre.monitors.get(index) else {
            continue;
        };
        let current_tags = monitor.visible_tags().mask();
        if current_tags != *pre_tags {
            event_emitter.emit_tags_changed(index, current_tags, *pre_tags);
        }
        if monitor.layout_symbol != *pre_layout {
            event_emitter.emit_layout_changed(index, &monitor.layout_symbol);
        }
    }

    let mut removed: Vec<u32> = pre
        .windows
        .keys()
        .filter(|id| !state.clients.contains_key(id))
        .copied()
        .collect();
    removed.sort_unstable();
    for window_id in removed {
        event_emitter.emit_window_destroyed(window_id);
    }

    let mut ids: Vec<u32> = state.clients.keys().copied().collect();
    ids.sort_unstable();
    for id in ids {
        let Some(client) = state.clients.get(&id) else {
            continue;
        };
        match pre.windows.get(&id) {
            None => event_emitter.emit_window_created(client, focused),
            Some(pre_props) if *pre_props != WindowProperties::of(client) => {
                event_emitter.emit_window_updated(client, focused)
            }
            Some(_) => {}
        }
    }

    for info in state.bars() {
        if pre.bars.get(info.monitor) != Some(&info) {
            bar.draw(&info);
            event_emitter.emit_bar(&info);
        }
    }
}
