use crate::core::{Rect, WindowId};
use tagwm_ipc::BarInfo;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerOp {
    Move,
    Resize,
}

/// Requests the engine makes of the host windowing layer.
/// This abstraction allows mocking in tests.
pub trait WindowManipulator {
    /// Place a window. `rect` excludes the border.
    fn configure(&self, window: WindowId, rect: &Rect, border_width: u32);
    /// Move a window out of sight without unmapping it.
    fn hide(&self, window: WindowId, rect: &Rect);
    fn raise(&self, window: WindowId);
    /// Reorder windows, topmost first.
    fn restack(&self, windows: &[WindowId]);
    fn set_border_color(&self, window: WindowId, color: &str);
    fn set_focus(&self, window: Option<WindowId>);
    fn close(&self, window: WindowId);
    /// Start an interactive pointer grab. The host reports the result as a pointer-moved event.
    fn begin_pointer(&self, window: WindowId, op: PointerOp);
}

pub trait ProcessSpawner {
    fn spawn(&self, argv: &[String]) -> Result<u32, String>;
}

pub trait ProcessLineage {
    /// Whether `pid` was (transitively) forked by `ancestor`.
    fn is_descendant(&self, pid: u32, ancestor: u32) -> bool;
}

pub trait StatusBar {
    fn draw(&self, bar: &BarInfo);
    /// A spawned command changed something the status text reports.
    fn status_changed(&self);
}

/// Everything the engine talks to outside its own state.
#[derive(Clone, Copy)]
pub struct Host<'a> {
    pub manipulator: &'a dyn WindowManipulator,
    pub spawner: &'a dyn ProcessSpawner,
    pub lineage: &'a dyn ProcessLineage,
    pub bar: &'a dyn StatusBar,
}

/// Host without a display connection. Every request is logged; window
/// notifications arrive as injected host events over IPC.
#[derive(Debug, Default)]
pub struct HeadlessHost;

impl WindowManipulator for HeadlessHost {
    fn configure(&self, window: WindowId, rect: &Rect, border_width: u32) {
        tracing::debug!(
            "configure {}: ({}, {}) {}x{} border {}",
            window,
            rect.x,
            rect.y,
            rect.width,
            rect.height,
            border_width
        );
    }

    fn hide(&self, window: WindowId, rect: &Rect) {
        tracing::debug!("hide {} (was at {}, {})", window, rect.x, rect.y);
    }

    fn raise(&self, window: WindowId) {
        tracing::debug!("raise {}", window);
    }

    fn restack(&self, windows: &[WindowId]) {
        tracing::debug!("restack {:?}", windows);
    }

    fn set_border_color(&self, window: WindowId, color: &str) {
        tracing::debug!("border {} -> {}", window, color);
    }

    fn set_focus(&self, window: Option<WindowId>) {
        tracing::debug!("input focus -> {:?}", window);
    }

    fn close(&self, window: WindowId) {
        tracing::info!("close {}", window);
    }

    fn begin_pointer(&self, window: WindowId, op: PointerOp) {
        tracing::info!("pointer {:?} on {}", op, window);
    }
}

/// Status bar that writes bar contents to the log.
#[derive(Debug, Default)]
pub struct LogBar;

impl StatusBar for LogBar {
    fn draw(&self, bar: &BarInfo) {
        if !bar.show_bar {
            return;
        }
        tracing::debug!(
            "bar {}: selected={:#x} occupied={:#x} urgent={:#x} {} | {} | {}",
            bar.monitor,
            bar.selected_tags,
            bar.occupied_tags,
            bar.urgent_tags,
            bar.layout_symbol,
            bar.title,
            bar.status_text
        );
    }

    fn status_changed(&self) {
        tracing::debug!("status refresh requested");
    }
}
