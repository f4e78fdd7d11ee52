use crate::core::{Client, Monitor, State};
use std::sync::mpsc as std_mpsc;
use tagwm_ipc::{BarInfo, MonitorInfo, StateEvent, WindowInfo};

/// Sends state change events from the main thread to the tokio thread.
pub struct EventEmitter {
    tx: std_mpsc::Sender<StateEvent>,
}

impl EventEmitter {
    pub fn new(tx: std_mpsc::Sender<StateEvent>) -> Self {
        Self { tx }
    }

    fn emit(&self, event: StateEvent) {
        if let Err(e) = self.tx.send(event) {
            tracing::debug!("Failed to emit event (no receivers?): {}", e);
        }
    }

    pub fn emit_window_created(&self, client: &Client, focused: Option<u32>) {
        self.emit(StateEvent::WindowCreated {
            window: window_to_info(client, focused),
        });
    }

    pub fn emit_window_destroyed(&self, window_id: u32) {
        self.emit(StateEvent::WindowDestroyed { window_id });
    }

    pub fn emit_window_updated(&self, client: &Client, focused: Option<u32>) {
        self.emit(StateEvent::WindowUpdated {
            window: window_to_info(client, focused),
        });
    }

    pub fn emit_window_focused(&self, window_id: Option<u32>) {
        self.emit(StateEvent::WindowFocused { window_id });
    }

    pub fn emit_monitor_focused(&self, monitor: usize) {
        self.emit(StateEvent::MonitorFocused { monitor });
    }

    pub fn emit_tags_changed(&self, monitor: usize, visible_tags: u32, previous_tags: u32) {
        self.emit(StateEvent::TagsChanged {
            monitor,
            visible_tags,
            previous_tags,
        });
    }

    pub fn emit_layout_changed(&self, monitor: usize, layout: &str) {
        self.emit(StateEvent::LayoutChanged {
            monitor,
            layout: layout.to_string(),
        });
    }

    pub fn emit_bar(&self, bar: &BarInfo) {
        self.emit(StateEvent::Bar { bar: bar.clone() });
    }

    pub fn emit_status_refresh(&self) {
        self.emit(StateEvent::StatusRefresh);
    }
}

/// Snapshot of the current state for new subscribers.
pub fn create_snapshot(state: &State) -> StateEvent {
    StateEvent::Snapshot {
        windows: window_infos(state),
        monitors: monitor_infos(state),
        focused_window_id: state.focused(),
        focused_monitor: state.selected_monitor,
    }
}

/// Managed windows ordered by id.
pub fn window_infos(state: &State) -> Vec<WindowInfo> {
    let focused = state.focused();
    let mut windows: Vec<WindowInfo> = state
        .clients
        .values()
        .map(|c| window_to_info(c, focused))
        .collect();
    windows.sort_by_key(|w| w.id);
    windows
}

pub fn monitor_infos(state: &State) -> Vec<MonitorInfo> {
    state
        .monitors
        .iter()
        .map(|m| monitor_to_info(m, state.selected_monitor))
        .collect()
}

pub fn window_to_info(client: &Client, focused: Option<u32>) -> WindowInfo {
    WindowInfo {
        id: client.id,
        pid: client.pid,
        title: client.title.clone(),
        class: client.class.clone(),
        instance: client.instance.clone(),
        tags: client.tags.mask(),
        monitor: client.monitor,
        x: client.rect.x,
        y: client.rect.y,
        width: client.rect.width,
        height: client.rect.height,
        is_focused: focused == Some(client.id),
        is_floating: client.is_floating,
        is_fullscreen: client.is_fullscreen,
        is_urgent: client.is_urgent,
    }
}

pub fn monitor_to_info(monitor: &Monitor, selected_monitor: usize) -> MonitorInfo {
    MonitorInfo {
        index: monitor.index,
        x: monitor.screen.x,
        y: monitor.screen.y,
        width: monitor.screen.width,
        height: monitor.screen.height,
        visible_tags: monitor.visible_tags().mask(),
        layout: monitor.layout_symbol.clone(),
        mfact: monitor.mfact,
        nmaster: monitor.nmaster,
        show_bar: monitor.show_bar,
        client_count: monitor.clients.len(),
        is_focused: monitor.index == selected_monitor,
    }
}
