use super::{Config, Rect, Tag, WindowId};

#[derive(Debug, Clone)]
pub struct Monitor {
    pub index: usize,
    pub screen: Rect,
    /// Screen minus the bar
    pub area: Rect,
    pub bar_y: i32,
    /// Current and previous view; `sel_tags` indexes the current one
    pub tagset: [Tag; 2],
    pub sel_tags: usize,
    /// Current and previous layout table index
    pub layouts: [usize; 2],
    pub sel_layout: usize,
    pub layout_symbol: String,
    pub mfact: f32,
    pub nmaster: u32,
    /// Layout order, head is the master position
    pub clients: Vec<WindowId>,
    /// Focus history, most recent first
    pub stack: Vec<WindowId>,
    pub selected: Option<WindowId>,
    pub show_bar: bool,
    pub top_bar: bool,
}

impl Monitor {
    pub fn new(index: usize, screen: Rect, config: &Config) -> Self {
        let layout_count = config.layouts.len().max(1);
        let mut monitor = Self {
            index,
            screen,
            area: screen,
            bar_y: 0,
            tagset: [Tag::new(1); 2],
            sel_tags: 0,
            layouts: [0, 1 % layout_count],
            sel_layout: 0,
            layout_symbol: config
                .layouts
                .first()
                .map(|l| l.symbol.clone())
                .unwrap_or_default(),
            mfact: config.mfact,
            nmaster: config.nmaster,
            clients: Vec::new(),
            stack: Vec::new(),
            selected: None,
            show_bar: config.show_bar,
            top_bar: config.top_bar,
        };
        monitor.update_bar_position(config.bar_height);
        monitor
    }

    pub fn visible_tags(&self) -> Tag {
        self.tagset[self.sel_tags]
    }

    pub fn layout_index(&self) -> usize {
        self.layouts[self.sel_layout]
    }

    /// Recompute the window area after a screen or bar visibility change.
    pub fn update_bar_position(&mut self, bar_height: u32) {
        self.area = self.screen;
        if self.show_bar && bar_height < self.screen.height {
            self.area.height -= bar_height;
            if self.top_bar {
                self.bar_y = self.screen.y;
                self.area.y = self.screen.y + bar_height as i32;
            } else {
                self.bar_y = self.area.bottom();
            }
        } else {
            self.bar_y = -(bar_height as i32);
        }
    }

    pub fn attach(&mut self, id: WindowId) {
        self.clients.insert(0, id);
    }

    pub fn attach_stack(&mut self, id: WindowId) {
        self.stack.insert(0, id);
    }

    pub fn detach(&mut self, id: WindowId) {
        self.clients.retain(|&c| c != id);
    }

    pub fn detach_stack(&mut self, id: WindowId) {
        self.stack.retain(|&c| c != id);
        if self.selected == Some(id) {
            self.selected = None;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_monitor_defaults() {
        let config = Config::default();
        let mon = Monitor::new(0, Rect::new(0, 0, 1920, 1080), &config);

        assert_eq!(mon.visible_tags(), Tag::new(1));
        assert_eq!(mon.layout_index(), 0);
        assert_eq!(mon.layouts[1], 1);
        assert_eq!(mon.layout_symbol, "=[]");
        assert_eq!(mon.mfact, 0.83);
        assert_eq!(mon.area, Rect::new(0, 20, 1920, 1060));
        assert_eq!(mon.bar_y, 0);
    }

    #[test]
    fn test_bottom_bar_and_hidden_bar() {
        let config = Config {
            top_bar: false,
            ..Default::default()
        };
        let mut mon = Monitor::new(0, Rect::new(0, 0, 1000, 800), &config);
        assert_eq!(mon.area, Rect::new(0, 0, 1000, 780));
        assert_eq!(mon.bar_y, 780);

        mon.show_bar = false;
        mon.update_bar_position(config.bar_height);
        assert_eq!(mon.area, Rect::new(0, 0, 1000, 800));
        assert!(mon.bar_y < 0);
    }

    #[test]
    fn test_attach_inserts_at_head() {
        let mut mon = Monitor::new(0, Rect::new(0, 0, 100, 100), &Config::default());
        mon.attach(1);
        mon.attach(2);
        mon.attach_stack(1);
        mon.attach_stack(2);
        assert_eq!(mon.clients, vec![2, 1]);
        assert_eq!(mon.stack, vec![2, 1]);

        mon.selected = Some(2);
        mon.detach(2);
        mon.detach_stack(2);
        assert_eq!(mon.clients, vec![1]);
        assert_eq!(mon.stack, vec![1]);
        assert_eq!(mon.selected, None);
    }
}
