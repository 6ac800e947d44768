use crate::notify::{Notification, Notifier};
use crate::resource::{Category, Collection};
use tracing::{debug, info};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StatCard {
    pub name: &'static str,
    pub value: &'static str,
    pub category: Option<Category>,
}

pub const STATS: [StatCard; 4] = [
    StatCard {
        name: "Total Resources",
        value: "128",
        category: None,
    },
    StatCard {
        name: "Documents",
        value: "64",
        category: Some(Category::Document),
    },
    StatCard {
        name: "Images",
        value: "43",
        category: Some(Category::Image),
    },
    StatCard {
        name: "Videos",
        value: "21",
        category: Some(Category::Video),
    },
];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActivityEntry {
    pub message: &'static str,
    pub age: String,
}

pub fn recent_activity() -> Vec<ActivityEntry> {
    [
        "Image uploaded: product-photo.jpg",
        "Document updated: Q1 Report.pdf",
        "Video shared: intro-video.mp4",
    ]
    .into_iter()
    .enumerate()
    .map(|(i, message)| ActivityEntry {
        message,
        age: format!("{} hour ago", i + 1),
    })
    .collect()
}

/// Bars for the content-type chart, one per category present in `collection`.
pub fn distribution(collection: &Collection) -> Vec<(&'static str, u64)> {
    collection
        .category_counts()
        .into_iter()
        .filter(|(_, count)| *count > 0)
        .map(|(category, count)| (category.menu_label(), count as u64))
        .collect()
}

/// Refresh state of the dashboard page. A refresh is simulated: it stays
/// pending until the matching token is finished.
#[derive(Debug, Default)]
pub struct Dashboard {
    pending: Option<u64>,
    generation: u64,
}

impl Dashboard {
    pub fn is_refreshing(&self) -> bool {
        self.pending.is_some()
    }

    pub fn start_refresh(&mut self) -> u64 {
        self.generation += 1;
        self.pending = Some(self.generation);
        info!(generation = self.generation, "dashboard refresh started");
        self.generation
    }

    /// Completes the refresh identified by `token` and notifies. Returns false
    /// for a token superseded by a later refresh.
    pub fn finish_refresh(&mut self, token: u64, notifier: &mut dyn Notifier) -> bool {
        if self.pending != Some(token) {
            debug!(token, "ignoring stale dashboard refresh");
            return false;
        }
        self.pending = None;
        notifier.notify(Notification::new(
            "Dashboard refreshed",
            "Your content statistics are up to date.",
        ));
        true
    }
}
