use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Behaviour a binding (or an IPC client) can invoke.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Action {
    View,
    ToggleView,
    Tag,
    ToggleTag,
    FocusStack,
    IncNmaster,
    SetMfact,
    SetLayout,
    Zoom,
    ToggleFloating,
    ToggleFullscreen,
    KillClient,
    FocusMon,
    TagMon,
    Spawn,
    ToggleBar,
    MoveMouse,
    ResizeMouse,
    Quit,
}

impl Action {
    pub const ALL: [Action; 19] = [
        Action::View,
        Action::ToggleView,
        Action::Tag,
        Action::ToggleTag,
        Action::FocusStack,
        Action::IncNmaster,
        Action::SetMfact,
        Action::SetLayout,
        Action::Zoom,
        Action::ToggleFloating,
        Action::ToggleFullscreen,
        Action::KillClient,
        Action::FocusMon,
        Action::TagMon,
        Action::Spawn,
        Action::ToggleBar,
        Action::MoveMouse,
        Action::ResizeMouse,
        Action::Quit,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Action::View => "view",
            Action::ToggleView => "toggle_view",
            Action::Tag => "tag",
            Action::ToggleTag => "toggle_tag",
            Action::FocusStack => "focus_stack",
            Action::IncNmaster => "inc_nmaster",
            Action::SetMfact => "set_mfact",
            Action::SetLayout => "set_layout",
            Action::Zoom => "zoom",
            Action::ToggleFloating => "toggle_floating",
            Action::ToggleFullscreen => "toggle_fullscreen",
            Action::KillClient => "kill_client",
            Action::FocusMon => "focus_mon",
            Action::TagMon => "tag_mon",
            Action::Spawn => "spawn",
            Action::ToggleBar => "toggle_bar",
            Action::MoveMouse => "move_mouse",
            Action::ResizeMouse => "resize_mouse",
            Action::Quit => "quit",
        }
    }

    /// Tag actions take the clicked tag as their argument when bound on the tag bar.
    pub fn takes_tag_mask(self) -> bool {
        matches!(
            self,
            Action::View | Action::ToggleView | Action::Tag | Action::ToggleTag
        )
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Action {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.to_lowercase().replace('-', "_");
        Action::ALL
            .into_iter()
            .find(|a| a.name() == normalized)
            .ok_or_else(|| format!("Unknown action: {}", s))
    }
}

/// Command line for a spawned process.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpawnCommand {
    pub argv: Vec<String>,
    /// Ask the status bar to refresh once the process has been started.
    #[serde(default)]
    pub notify_status: bool,
}

impl SpawnCommand {
    pub fn new<I, S>(argv: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            argv: argv.into_iter().map(Into::into).collect(),
            notify_status: false,
        }
    }

    pub fn with_status_notify(mut self) -> Self {
        self.notify_status = true;
        self
    }

    pub fn shell(cmd: &str) -> Self {
        Self::new(["/bin/sh", "-c", cmd])
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "snake_case")]
pub enum Arg {
    #[default]
    None,
    Int(i32),
    Float(f32),
    Mask(u32),
    Layout(usize),
    Spawn(SpawnCommand),
}

impl fmt::Display for Arg {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Arg::None => Ok(()),
            Arg::Int(i) => write!(f, "{:+}", i),
            Arg::Float(v) => write!(f, "{:+.2}", v),
            Arg::Mask(m) => write!(f, "{:#x}", m),
            Arg::Layout(idx) => write!(f, "layout {}", idx),
            Arg::Spawn(cmd) => write!(f, "{}", cmd.argv.join(" ")),
        }
    }
}

/// Where on screen a pointer button was pressed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ClickContext {
    TagBar,
    LayoutSymbol,
    StatusText,
    WindowTitle,
    ClientWindow,
    RootWindow,
}

impl FromStr for ClickContext {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().replace('-', "_").as_str() {
            "tag_bar" | "tagbar" => Ok(ClickContext::TagBar),
            "layout_symbol" | "ltsymbol" => Ok(ClickContext::LayoutSymbol),
            "status_text" | "statustext" => Ok(ClickContext::StatusText),
            "window_title" | "wintitle" => Ok(ClickContext::WindowTitle),
            "client_window" | "clientwin" => Ok(ClickContext::ClientWindow),
            "root_window" | "rootwin" => Ok(ClickContext::RootWindow),
            _ => Err(format!("Unknown click context: {}", s)),
        }
    }
}
