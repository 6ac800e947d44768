use crate::controller::SwitchTicket;
use crate::navigation::{label_for_path, NavItem};

#[derive(PartialEq, Eq, Debug, Clone, Copy)]
pub enum AppMode {
    Normal,
    Searching,
    FilterMenu,
    ActionMenu,
}

/// Per-resource actions offered from the card menu.
#[derive(PartialEq, Eq, Debug, Clone, Copy)]
pub enum ResourceAction {
    Download,
    Share,
    Delete,
}

impl ResourceAction {
    pub const ALL: [ResourceAction; 3] = [
        ResourceAction::Download,
        ResourceAction::Share,
        ResourceAction::Delete,
    ];

    pub fn label(self) -> &'static str {
        match self {
            ResourceAction::Download => "Download",
            ResourceAction::Share => "Share",
            ResourceAction::Delete => "Delete",
        }
    }
}

#[derive(PartialEq, Eq, Debug, Clone, Copy)]
pub enum Page {
    Dashboard,
    Resources,
    /// A sidebar page without content yet, identified by its path.
    Placeholder(&'static str),
}

impl Page {
    pub(super) fn for_nav_item(item: &'static NavItem) -> Self {
        match item.path {
            "/" => Page::Dashboard,
            "/resources" => Page::Resources,
            path => Page::Placeholder(path),
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            Page::Dashboard => "Dashboard",
            Page::Resources => "Resources",
            Page::Placeholder(path) => label_for_path(path).unwrap_or(path),
        }
    }
}

/// Completions scheduled on the app's timer queue.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerEvent {
    SubsetReady(SwitchTicket),
    DashboardRefreshed(u64),
}
