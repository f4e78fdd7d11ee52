use serde::{Deserialize, Serialize};

use crate::{Action, Arg, HostEvent};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Command {
    // Run a bindable action against the selected monitor/client
    Dispatch {
        action: Action,
        #[serde(default)]
        arg: Arg,
    },

    // Inject a host notification (headless host)
    Host { event: HostEvent },

    // Queries
    ListWindows,
    ListMonitors,
    GetState,
    ListBindings,
    AutostartStatus,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Response {
    Ok,
    Error { message: String },
    Windows { windows: Vec<WindowInfo> },
    Monitors { monitors: Vec<MonitorInfo> },
    State { state: StateInfo },
    Bindings { bindings: Vec<BindingInfo> },
    Autostart { entries: Vec<AutostartInfo> },
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BindingInfo {
    pub trigger: String,
    pub action: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WindowInfo {
    pub id: u32,
    pub pid: Option<u32>,
    pub title: String,
    pub class: Option<String>,
    pub instance: Option<String>,
    pub tags: u32,
    pub monitor: usize,
    pub x: i32,
    pub y: i32,
    pub width: u32,
    pub height: u32,
    pub is_focused: bool,
    pub is_floating: bool,
    pub is_fullscreen: bool,
    pub is_urgent: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonitorInfo {
    pub index: usize,
    pub x: i32,
    pub y: i32,
    pub width: u32,
    pub height: u32,
    pub visible_tags: u32,
    pub layout: String,
    pub mfact: f32,
    pub nmaster: u32,
    pub show_bar: bool,
    pub client_count: usize,
    pub is_focused: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StateInfo {
    pub visible_tags: u32,
    pub focused_window_id: Option<u32>,
    pub focused_monitor: usize,
    pub window_count: usize,
    pub layout: String,
    pub status_text: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AutostartInfo {
    pub command: String,
    pub pid: Option<u32>,
    pub tags: u32,
    pub monitor: i32,
    pub status: String,
}
