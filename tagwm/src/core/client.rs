use super::{hints, Tag};
use tagwm_ipc::{ScreenGeometry, SizeHints, WindowAttributes};

pub type WindowId = u32;

#[derive(Debug, Clone)]
pub struct Client {
    pub id: WindowId,
    pub pid: Option<u32>,
    pub monitor: usize,
    pub tags: Tag,
    pub title: String,
    pub class: Option<String>,
    pub instance: Option<String>,
    /// Position of the outer corner, size without the border
    pub rect: Rect,
    pub border_width: u32,
    pub hints: SizeHints,
    pub is_floating: bool,
    pub is_fullscreen: bool,
    pub is_urgent: bool,
    pub is_fixed: bool,
    /// Geometry and floating state to restore when leaving fullscreen
    pub saved_rect: Option<Rect>,
    pub old_floating: bool,
    pub old_border_width: u32,
}

impl Client {
    pub fn from_attributes(
        id: WindowId,
        attrs: &WindowAttributes,
        monitor: usize,
        border_width: u32,
    ) -> Self {
        Self {
            id,
            pid: attrs.pid,
            monitor,
            tags: Tag::default(),
            title: attrs.title.clone(),
            class: attrs.class.clone(),
            instance: attrs.instance.clone(),
            rect: Rect {
                x: attrs.x,
                y: attrs.y,
                width: attrs.width.max(1),
                height: attrs.height.max(1),
            },
            border_width,
            hints: attrs.hints,
            is_floating: false,
            is_fullscreen: false,
            is_urgent: attrs.is_urgent,
            is_fixed: hints::is_fixed(&attrs.hints),
            saved_rect: None,
            old_floating: false,
            old_border_width: border_width,
        }
    }

    pub fn is_tiled(&self) -> bool {
        !self.is_floating && !self.is_fullscreen
    }

    pub fn outer_width(&self) -> u32 {
        self.rect.width + 2 * self.border_width
    }

    pub fn outer_height(&self) -> u32 {
        self.rect.height + 2 * self.border_width
    }

    /// Rectangle including the border on all sides.
    pub fn outer_rect(&self) -> Rect {
        Rect {
            x: self.rect.x,
            y: self.rect.y,
            width: self.outer_width(),
            height: self.outer_height(),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Rect {
    pub x: i32,
    pub y: i32,
    pub width: u32,
    pub height: u32,
}

impl Rect {
    pub fn new(x: i32, y: i32, width: u32, height: u32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn from_screen(screen: &ScreenGeometry) -> Self {
        Self::new(screen.x, screen.y, screen.width, screen.height)
    }

    pub fn right(&self) -> i32 {
        self.x.saturating_add_unsigned(self.width)
    }

    pub fn bottom(&self) -> i32 {
        self.y.saturating_add_unsigned(self.height)
    }

    /// Area of the overlap between two rectangles.
    pub fn intersect_area(&self, other: &Rect) -> u64 {
        let w = self.right().min(other.right()).saturating_sub(self.x.max(other.x)).max(0);
        let h = self.bottom().min(other.bottom()).saturating_sub(self.y.max(other.y)).max(0);
        w as u64 * h as u64
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_attributes() {
        let attrs = WindowAttributes {
            class: Some("firefox".to_string()),
            title: "Mozilla Firefox".to_string(),
            pid: Some(1234),
            x: 10,
            y: 20,
            width: 800,
            height: 600,
            ..Default::default()
        };
        let client = Client::from_attributes(5, &attrs, 1, 2);

        assert_eq!(client.id, 5);
        assert_eq!(client.monitor, 1);
        assert_eq!(client.pid, Some(1234));
        assert_eq!(client.rect, Rect::new(10, 20, 800, 600));
        assert_eq!(client.outer_width(), 804);
        assert!(client.is_tiled());
        assert!(!client.is_fixed);
    }

    #[test]
    fn test_zero_sized_attributes_are_clamped() {
        let client = Client::from_attributes(1, &WindowAttributes::default(), 0, 1);
        assert_eq!(client.rect.width, 1);
        assert_eq!(client.rect.height, 1);
    }

    #[test]
    fn test_fixed_hints_mark_client_fixed() {
        let attrs = WindowAttributes {
            hints: SizeHints {
                min_width: 300,
                min_height: 200,
                max_width: 300,
                max_height: 200,
                ..Default::default()
            },
            ..Default::default()
        };
        assert!(Client::from_attributes(1, &attrs, 0, 1).is_fixed);
    }

    #[test]
    fn test_intersect_area() {
        let a = Rect::new(0, 0, 100, 100);
        let b = Rect::new(50, 50, 100, 100);
        let c = Rect::new(200, 0, 10, 10);

        assert_eq!(a.intersect_area(&b), 2500);
        assert_eq!(a.intersect_area(&c), 0);
    }
}
