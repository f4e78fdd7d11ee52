use crate::core::{Rect, WindowId};
use crate::platform::PointerOp;

use tagwm_ipc::{Response, SpawnCommand};

/// Host requests produced by state mutations.
#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    Configure {
        window: WindowId,
        rect: Rect,
        border_width: u32,
    },
    Hide {
        window: WindowId,
        rect: Rect,
    },
    Raise {
        window: WindowId,
    },
    /// Topmost first.
    Restack {
        windows: Vec<WindowId>,
    },
    SetBorder {
        window: WindowId,
        color: String,
    },
    Focus {
        window: Option<WindowId>,
    },
    Close {
        window: WindowId,
    },
    BeginPointer {
        window: WindowId,
        op: PointerOp,
    },
    Spawn {
        command: SpawnCommand,
    },
    StatusRefresh,
}

pub struct CommandResult {
    pub response: Response,
    pub effects: Vec<Effect>,
}

impl CommandResult {
    pub fn ok() -> Self {
        Self {
            response: Response::Ok,
            effects: vec![],
        }
    }

    pub fn ok_with_effects(effects: Vec<Effect>) -> Self {
        Self {
            response: Response::Ok,
            effects,
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            response: Response::Error {
                message: message.into(),
            },
            effects: vec![],
        }
    }

    pub fn with_response(response: Response) -> Self {
        Self {
            response,
            effects: vec![],
        }
    }
}
