use serde::{Deserialize, Serialize};

use crate::ClickContext;

/// ICCCM-style size hints as reported by a client. Zero means "not set".
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SizeHints {
    pub base_width: u32,
    pub base_height: u32,
    pub min_width: u32,
    pub min_height: u32,
    pub max_width: u32,
    pub max_height: u32,
    pub inc_width: u32,
    pub inc_height: u32,
    /// Minimum height/width ratio
    pub min_aspect: f32,
    /// Maximum width/height ratio
    pub max_aspect: f32,
}

/// Properties of a window at map time.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct WindowAttributes {
    pub class: Option<String>,
    pub instance: Option<String>,
    pub title: String,
    pub pid: Option<u32>,
    pub x: i32,
    pub y: i32,
    pub width: u32,
    pub height: u32,
    pub transient_for: Option<u32>,
    pub hints: SizeHints,
    pub is_fullscreen: bool,
    pub is_urgent: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScreenGeometry {
    pub x: i32,
    pub y: i32,
    pub width: u32,
    pub height: u32,
}

/// Notifications delivered by the host windowing/input layer.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum HostEvent {
    Map {
        window: u32,
        attrs: WindowAttributes,
    },
    Unmap {
        window: u32,
    },
    ConfigureRequest {
        window: u32,
        x: i32,
        y: i32,
        width: u32,
        height: u32,
    },
    /// Final geometry after an interactive pointer move or resize.
    PointerMoved {
        window: u32,
        x: i32,
        y: i32,
        width: u32,
        height: u32,
    },
    Enter {
        window: u32,
    },
    TitleChanged {
        window: u32,
        title: String,
    },
    UrgencyChanged {
        window: u32,
        urgent: bool,
    },
    HintsChanged {
        window: u32,
        hints: SizeHints,
    },
    FullscreenRequest {
        window: u32,
        fullscreen: bool,
    },
    Key {
        modifiers: u32,
        keysym: u32,
    },
    Button {
        modifiers: u32,
        button: u32,
        click: ClickContext,
        #[serde(default)]
        window: Option<u32>,
        /// Tag index under the pointer for tag bar clicks
        #[serde(default)]
        tag: Option<u32>,
    },
    Screens {
        screens: Vec<ScreenGeometry>,
    },
    StatusText {
        text: String,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_map_event_with_partial_attrs() {
        let json = r#"{"type":"map","window":7,"attrs":{"class":"firefox","pid":42}}"#;
        let event: HostEvent = serde_json::from_str(json).unwrap();
        match event {
            HostEvent::Map { window, attrs } => {
                assert_eq!(window, 7);
                assert_eq!(attrs.class.as_deref(), Some("firefox"));
                assert_eq!(attrs.instance, None);
                assert_eq!(attrs.pid, Some(42));
                assert_eq!(attrs.hints, SizeHints::default());
            }
            _ => panic!("Wrong variant"),
        }
    }

    #[test]
    fn test_button_event_optional_fields() {
        let json = r#"{"type":"button","modifiers":0,"button":1,"click":"tag_bar","tag":3}"#;
        let event: HostEvent = serde_json::from_str(json).unwrap();
        match event {
            HostEvent::Button {
                click, window, tag, ..
            } => {
                assert_eq!(click, ClickContext::TagBar);
                assert_eq!(window, None);
                assert_eq!(tag, Some(3));
            }
            _ => panic!("Wrong variant"),
        }
    }
}
