use serde::{Deserialize, Serialize};

use crate::{MonitorInfo, WindowInfo};

/// Event filter for subscribing to specific event types
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EventFilter {
    /// Window events (created, destroyed, updated)
    #[serde(default)]
    pub window: bool,
    /// Focus events (window focused, monitor focused)
    #[serde(default)]
    pub focus: bool,
    /// Tag view changes
    #[serde(default)]
    pub tags: bool,
    /// Layout changes
    #[serde(default)]
    pub layout: bool,
    /// Bar contents and status refresh requests
    #[serde(default)]
    pub bar: bool,
}

impl EventFilter {
    pub fn all() -> Self {
        Self {
            window: true,
            focus: true,
            tags: true,
            layout: true,
            bar: true,
        }
    }

    pub fn matches(&self, event: &StateEvent) -> bool {
        match event {
            StateEvent::WindowCreated { .. }
            | StateEvent::WindowDestroyed { .. }
            | StateEvent::WindowUpdated { .. } => self.window,
            StateEvent::WindowFocused { .. } | StateEvent::MonitorFocused { .. } => self.focus,
            StateEvent::TagsChanged { .. } => self.tags,
            StateEvent::LayoutChanged { .. } => self.layout,
            StateEvent::Bar { .. } | StateEvent::StatusRefresh => self.bar,
            StateEvent::Snapshot { .. } => true,
        }
    }

    pub fn any(&self) -> bool {
        self.window || self.focus || self.tags || self.layout || self.bar
    }
}

/// Request to subscribe to state events
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SubscribeRequest {
    /// Whether to send a snapshot on connection
    #[serde(default)]
    pub snapshot: bool,
    /// Event filter (if not set or all false, subscribes to all events)
    #[serde(default)]
    pub filter: EventFilter,
}

impl SubscribeRequest {
    pub fn with_snapshot() -> Self {
        Self {
            snapshot: true,
            filter: EventFilter::default(),
        }
    }

    pub fn effective_filter(&self) -> EventFilter {
        if self.filter.any() {
            self.filter.clone()
        } else {
            EventFilter::all()
        }
    }
}

/// Everything a bar needs to render one monitor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BarInfo {
    pub monitor: usize,
    pub tag_names: Vec<String>,
    pub occupied_tags: u32,
    pub selected_tags: u32,
    pub urgent_tags: u32,
    pub layout_symbol: String,
    pub title: String,
    pub status_text: String,
    pub is_selected_monitor: bool,
    pub show_bar: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum StateEvent {
    WindowCreated {
        window: WindowInfo,
    },
    WindowDestroyed {
        window_id: u32,
    },
    WindowUpdated {
        window: WindowInfo,
    },

    WindowFocused {
        window_id: Option<u32>,
    },
    MonitorFocused {
        monitor: usize,
    },

    TagsChanged {
        monitor: usize,
        visible_tags: u32,
        previous_tags: u32,
    },
    LayoutChanged {
        monitor: usize,
        layout: String,
    },

    Bar {
        bar: BarInfo,
    },
    /// A spawned command changed something the status text reports.
    StatusRefresh,

    Snapshot {
        windows: Vec<WindowInfo>,
        monitors: Vec<MonitorInfo>,
        focused_window_id: Option<u32>,
        focused_monitor: usize,
    },
}
