#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NavItem {
    pub label: &'static str,
    pub path: &'static str,
    pub glyph: &'static str,
}

pub const NAV_ITEMS: [NavItem; 5] = [
    NavItem {
        label: "Dashboard",
        path: "/",
        glyph: "▦",
    },
    NavItem {
        label: "Resources",
        path: "/resources",
        glyph: "≡",
    },
    NavItem {
        label: "Upload",
        path: "/upload",
        glyph: "↑",
    },
    NavItem {
        label: "Collections",
        path: "/collections",
        glyph: "▣",
    },
    NavItem {
        label: "Settings",
        path: "/settings",
        glyph: "⚙",
    },
];

pub fn label_for_path(path: &str) -> Option<&'static str> {
    NAV_ITEMS
        .iter()
        .find(|item| item.path == path)
        .map(|item| item.label)
}

/// Sidebar state: which page is active and whether the sidebar is expanded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sidebar {
    pub open: bool,
    active: usize,
}

impl Sidebar {
    pub fn new(open: bool) -> Self {
        Sidebar { open, active: 0 }
    }

    pub fn toggle(&mut self) {
        self.open = !self.open;
    }

    pub fn active(&self) -> &'static NavItem {
        &NAV_ITEMS[self.active]
    }

    pub fn active_index(&self) -> usize {
        self.active
    }

    /// Activates the item registered for `path`. Unknown paths are ignored.
    pub fn navigate(&mut self, path: &str) -> bool {
        match NAV_ITEMS.iter().position(|item| item.path == path) {
            Some(idx) => {
                self.active = idx;
                true
            }
            None => false,
        }
    }

    pub fn next(&mut self) {
        self.active = (self.active + 1) % NAV_ITEMS.len();
    }

    pub fn previous(&mut self) {
        self.active = (self.active + NAV_ITEMS.len() - 1) % NAV_ITEMS.len();
    }
}
