use serde::Deserialize;

use super::Tag;
use crate::layout::{LayoutDef, LayoutKind};

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ColorScheme {
    pub fg: String,
    pub bg: String,
    pub border: String,
}

impl ColorScheme {
    pub fn new(fg: &str, bg: &str, border: &str) -> Self {
        Self {
            fg: fg.to_string(),
            bg: bg.to_string(),
            border: border.to_string(),
        }
    }
}

/// Which colour scheme a client border is drawn with.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Scheme {
    Normal,
    Selected,
}

/// Engine settings. Loaded once at startup and never mutated afterwards.
#[derive(Debug, Clone)]
pub struct Config {
    pub border_px: u32,
    /// Pointer moves closer than this to an edge snap to it
    pub snap: u32,
    pub show_bar: bool,
    pub top_bar: bool,
    pub bar_height: u32,
    pub fonts: Vec<String>,
    pub normal: ColorScheme,
    pub selected: ColorScheme,
    pub tags: Vec<String>,
    pub layouts: Vec<LayoutDef>,
    pub mfact: f32,
    pub nmaster: u32,
    pub resize_hints: bool,
    /// Refuse focus changes while the selected client is fullscreen
    pub lock_fullscreen: bool,
}

impl Config {
    pub fn tag_mask(&self) -> Tag {
        Tag::all(self.tags.len())
    }

    pub fn scheme(&self, scheme: Scheme) -> &ColorScheme {
        match scheme {
            Scheme::Normal => &self.normal,
            Scheme::Selected => &self.selected,
        }
    }

    pub fn layout(&self, index: usize) -> Option<&LayoutDef> {
        self.layouts.get(index)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            border_px: 1,
            snap: 32,
            show_bar: true,
            top_bar: true,
            bar_height: 20,
            fonts: vec!["NotoSansCJK-Regular:pixelsize=15:antialias=true:autohint=true".to_string()],
            normal: ColorScheme::new("#bbbbbb", "#222222", "#444444"),
            selected: ColorScheme::new("#eeeeee", "#005577", "#005577"),
            tags: (1..=9).map(|n| n.to_string()).collect(),
            layouts: vec![
                LayoutDef::new("=[]", LayoutKind::Tile),
                LayoutDef::new("><>", LayoutKind::Floating),
                LayoutDef::new("[M]", LayoutKind::Monocle),
            ],
            mfact: 0.83,
            nmaster: 1,
            resize_hints: true,
            lock_fullscreen: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_tag_mask() {
        let config = Config::default();
        assert_eq!(config.tags.len(), 9);
        assert_eq!(config.tag_mask().mask(), 0x1ff);
    }

    #[test]
    fn test_default_layout_table() {
        let config = Config::default();
        assert_eq!(config.layout(0).map(|l| l.kind), Some(LayoutKind::Tile));
        assert_eq!(config.layout(2).map(|l| l.symbol.as_str()), Some("[M]"));
        assert!(config.layout(3).is_none());
    }
}
