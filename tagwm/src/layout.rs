use serde::{Deserialize, Serialize};

use crate::core::{Rect, WindowId};

pub const MFACT_MIN: f32 = 0.05;
pub const MFACT_MAX: f32 = 0.95;

pub fn clamp_mfact(mfact: f32) -> f32 {
    mfact.clamp(MFACT_MIN, MFACT_MAX)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LayoutKind {
    Tile,
    Monocle,
    Floating,
}

/// Entry of the layout table: the symbol shown in the bar and the arrangement it selects.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LayoutDef {
    pub symbol: String,
    pub kind: LayoutKind,
}

impl LayoutDef {
    pub fn new(symbol: &str, kind: LayoutKind) -> Self {
        Self {
            symbol: symbol.to_string(),
            kind,
        }
    }
}

/// Outer rectangle (border included) assigned to one client.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Geometry {
    pub id: WindowId,
    pub rect: Rect,
}

impl LayoutKind {
    /// Floating leaves every client where it is.
    pub fn is_floating(self) -> bool {
        matches!(self, LayoutKind::Floating)
    }

    pub fn arrange(
        self,
        windows: &[WindowId],
        nmaster: u32,
        mfact: f32,
        area: Rect,
    ) -> Vec<Geometry> {
        match self {
            LayoutKind::Tile => tile(windows, nmaster, mfact, area),
            LayoutKind::Monocle => monocle(windows, area),
            LayoutKind::Floating => vec![],
        }
    }
}

fn tile(windows: &[WindowId], nmaster: u32, mfact: f32, area: Rect) -> Vec<Geometry> {
    if windows.is_empty() {
        return vec![];
    }

    let window_count = windows.len() as u32;
    let main_count = nmaster.min(window_count);
    let stack_count = window_count - main_count;

    let main_width = if stack_count == 0 {
        area.width
    } else if main_count == 0 {
        0
    } else {
        (area.width as f64 * clamp_mfact(mfact) as f64).round() as u32
    };
    let stack_width = area.width.saturating_sub(main_width);

    let mut geometries = Vec::with_capacity(windows.len());
    let (main, stack) = windows.split_at(main_count as usize);
    column(&mut geometries, main, area.x, area, main_width);
    column(&mut geometries, stack, area.x + main_width as i32, area, stack_width);
    geometries
}

/// Stack windows vertically in one column; the last window takes the rounding remainder.
fn column(out: &mut Vec<Geometry>, windows: &[WindowId], x: i32, area: Rect, width: u32) {
    if windows.is_empty() {
        return;
    }
    let count = windows.len() as u32;
    let window_height = area.height / count;

    for (i, &id) in windows.iter().enumerate() {
        let y = i as u32 * window_height;
        let height = if i as u32 == count - 1 {
            area.height - y
        } else {
            window_height
        };
        out.push(Geometry {
            id,
            rect: Rect::new(x, area.y + y as i32, width, height),
        });
    }
}

fn monocle(windows: &[WindowId], area: Rect) -> Vec<Geometry> {
    windows
        .iter()
        .map(|&id| Geometry { id, rect: area })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn area() -> Rect {
        Rect::new(0, 0, 1000, 800)
    }

    #[test]
    fn test_tile_single_window_full_width() {
        let result = LayoutKind::Tile.arrange(&[1], 1, 0.83, area());
        assert_eq!(result.len(), 1);
        assert_eq!(result[0].rect, Rect::new(0, 0, 1000, 800));
    }

    #[test]
    fn test_tile_two_windows_master_ratio() {
        let result = LayoutKind::Tile.arrange(&[1, 2], 1, 0.83, area());
        assert_eq!(result.len(), 2);
        assert_eq!(result[0].id, 1);
        assert_eq!(result[0].rect, Rect::new(0, 0, 830, 800));
        assert_eq!(result[1].id, 2);
        assert_eq!(result[1].rect, Rect::new(830, 0, 170, 800));
    }

    #[test]
    fn test_tile_stack_splits_height_with_remainder() {
        let result = LayoutKind::Tile.arrange(&[1, 2, 3, 4], 1, 0.5, Rect::new(0, 20, 1000, 700));
        assert_eq!(result.len(), 4);
        assert_eq!(result[1].rect, Rect::new(500, 20, 500, 233));
        assert_eq!(result[2].rect, Rect::new(500, 253, 500, 233));
        // 700 - 2 * 233 = 234
        assert_eq!(result[3].rect, Rect::new(500, 486, 500, 234));
    }

    #[test]
    fn test_tile_multiple_masters() {
        let result = LayoutKind::Tile.arrange(&[1, 2, 3], 2, 0.6, area());
        assert_eq!(result[0].rect, Rect::new(0, 0, 600, 400));
        assert_eq!(result[1].rect, Rect::new(0, 400, 600, 400));
        assert_eq!(result[2].rect, Rect::new(600, 0, 400, 800));
    }

    #[test]
    fn test_tile_fewer_windows_than_masters_uses_full_width() {
        let result = LayoutKind::Tile.arrange(&[1, 2], 3, 0.6, area());
        assert_eq!(result[0].rect, Rect::new(0, 0, 1000, 400));
        assert_eq!(result[1].rect, Rect::new(0, 400, 1000, 400));
    }

    #[test]
    fn test_tile_zero_masters() {
        let result = LayoutKind::Tile.arrange(&[1, 2], 0, 0.6, area());
        assert_eq!(result[0].rect, Rect::new(0, 0, 1000, 400));
        assert_eq!(result[1].rect, Rect::new(0, 400, 1000, 400));
    }

    #[test]
    fn test_tile_respects_area_offset() {
        let result = LayoutKind::Tile.arrange(&[1, 2], 1, 0.5, Rect::new(1920, 20, 1000, 800));
        assert_eq!(result[0].rect, Rect::new(1920, 20, 500, 800));
        assert_eq!(result[1].rect, Rect::new(2420, 20, 500, 800));
    }

    #[test]
    fn test_monocle_full_area() {
        let result = LayoutKind::Monocle.arrange(&[1, 2, 3], 1, 0.83, area());
        assert_eq!(result.len(), 3);
        for geometry in &result {
            assert_eq!(geometry.rect, area());
        }
    }

    #[test]
    fn test_floating_arranges_nothing() {
        assert!(LayoutKind::Floating.arrange(&[1, 2], 1, 0.5, area()).is_empty());
        assert!(LayoutKind::Floating.is_floating());
    }

    #[test]
    fn test_empty_input() {
        assert!(LayoutKind::Tile.arrange(&[], 1, 0.5, area()).is_empty());
        assert!(LayoutKind::Monocle.arrange(&[], 1, 0.5, area()).is_empty());
    }

    #[test]
    fn test_arrange_is_deterministic() {
        let windows = [5, 3, 9, 1];
        let first = LayoutKind::Tile.arrange(&windows, 2, 0.55, area());
        let second = LayoutKind::Tile.arrange(&windows, 2, 0.55, area());
        assert_eq!(first, second);
    }

    #[test]
    fn test_clamp_mfact() {
        assert_eq!(clamp_mfact(0.0), MFACT_MIN);
        assert_eq!(clamp_mfact(1.5), MFACT_MAX);
        assert_eq!(clamp_mfact(0.5), 0.5);
    }
}
