//! View-state controller for the resource library.
//!
//! Owns the filter state and the canonical collection, and runs the subset
//! switching state machine:
//!
//! `Idle(S) --switch_subset(T)--> Loading(T) --complete_switch--> Idle(T)`
//!
//! Every switch hands out a [`SwitchTicket`] carrying a generation number.
//! Only the ticket with the latest generation may complete or fail the
//! transition, so a timer that fires after a newer switch is a no-op.

use crate::error::SourceError;
use crate::filter::{filter_resources, CategorySet, FilterState, Subset, SubsetRules, ViewMode};
use crate::resource::{Category, Collection, Resource};
use tracing::{debug, info, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SwitchTicket {
    pub generation: u64,
    pub target: Subset,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Idle,
    Loading { target: Subset, generation: u64 },
}

/// What the library body should show right now.
#[derive(Debug, PartialEq, Eq)]
pub enum LibraryView<'a> {
    Loading { target: Subset },
    Empty { subset: Subset },
    Ready { subset: Subset, resources: Vec<&'a Resource> },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Completion {
    Applied(Subset),
    Stale,
}

#[derive(Debug)]
pub struct ViewController {
    collection: Collection,
    rules: SubsetRules,
    state: FilterState,
    phase: Phase,
    generation: u64,
}

impl ViewController {
    pub fn new(collection: Collection, rules: SubsetRules) -> Self {
        ViewController {
            collection,
            rules,
            state: FilterState::default(),
            phase: Phase::Idle,
            generation: 0,
        }
    }

    /// Replaces the initial filter state without a loading phase.
    pub fn with_state(mut self, state: FilterState) -> Self {
        self.state = state;
        self
    }

    pub fn state(&self) -> &FilterState {
        &self.state
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn is_loading(&self) -> bool {
        matches!(self.phase, Phase::Loading { .. })
    }

    pub fn collection(&self) -> &Collection {
        &self.collection
    }

    pub fn set_search_text(&mut self, text: impl Into<String>) {
        self.state.search = text.into();
    }

    pub fn toggle_category(&mut self, category: Category, enabled: bool) {
        self.state.categories.set(category, enabled);
        debug!(%category, enabled, "category filter changed");
    }

    pub fn set_categories(&mut self, categories: CategorySet) {
        self.state.categories = categories;
    }

    pub fn set_view_mode(&mut self, mode: ViewMode) {
        self.state.view = mode;
    }

    /// Starts a transition to `target`. Supersedes any pending transition.
    pub fn switch_subset(&mut self, target: Subset) -> SwitchTicket {
        self.generation += 1;
        if let Phase::Loading { target: previous, .. } = self.phase {
            debug!(from = %previous, to = %target, "pending subset switch superseded");
        }
        self.phase = Phase::Loading {
            target,
            generation: self.generation,
        };
        info!(to = %target, generation = self.generation, "switching subset");
        SwitchTicket {
            generation: self.generation,
            target,
        }
    }

    /// True while `ticket` is the transition still in flight.
    pub fn is_pending(&self, ticket: SwitchTicket) -> bool {
        matches!(
            self.phase,
            Phase::Loading { generation, .. } if generation == ticket.generation
        )
    }

    pub fn complete_switch(&mut self, ticket: SwitchTicket) -> Completion {
        if !self.is_pending(ticket) {
            debug!(
                target_subset = %ticket.target,
                generation = ticket.generation,
                "ignoring stale subset completion"
            );
            return Completion::Stale;
        }
        self.state.subset = ticket.target;
        self.phase = Phase::Idle;
        info!(subset = %ticket.target, "subset ready");
        Completion::Applied(ticket.target)
    }

    /// Abandons the transition for `ticket`, keeping the previously shown
    /// subset and collection.
    pub fn fail_switch(&mut self, ticket: SwitchTicket) -> Completion {
        if !self.is_pending(ticket) {
            return Completion::Stale;
        }
        self.phase = Phase::Idle;
        warn!(
            target_subset = %ticket.target,
            kept = %self.state.subset,
            "subset switch failed"
        );
        Completion::Applied(self.state.subset)
    }

    pub fn replace_collection(&mut self, resources: Vec<Resource>) -> Result<(), SourceError> {
        self.collection = Collection::new(resources)?;
        Ok(())
    }

    /// Filtered resources of the active subset, ignoring the loading phase.
    pub fn filtered(&self) -> Vec<&Resource> {
        filter_resources(
            self.collection.as_slice(),
            &self.rules,
            self.state.subset,
            &self.state.search,
            &self.state.categories,
        )
    }

    pub fn view(&self) -> LibraryView<'_> {
        if let Phase::Loading { target, .. } = self.phase {
            return LibraryView::Loading { target };
        }
        let resources = self.filtered();
        if resources.is_empty() {
            LibraryView::Empty {
                subset: self.state.subset,
            }
        } else {
            LibraryView::Ready {
                subset: self.state.subset,
                resources,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resource::mock_resources;

    fn controller() -> ViewController {
        ViewController::new(
            Collection::new(mock_resources()).unwrap(),
            SubsetRules::default(),
        )
    }

    #[test]
    fn initial_state_shows_everything() {
        let c = controller();
        assert_eq!(c.state().subset, Subset::All);
        assert_eq!(c.state().view, ViewMode::Grid);
        assert!(c.state().search.is_empty());
        match c.view() {
            LibraryView::Ready { subset, resources } => {
                assert_eq!(subset, Subset::All);
                assert_eq!(resources.len(), 8);
            }
            other => panic!("unexpected view {:?}", other),
        }
    }

    #[test]
    fn loading_hides_the_previous_list() {
        let mut c = controller();
        let ticket = c.switch_subset(Subset::Recent);
        assert_eq!(c.view(), LibraryView::Loading { target: Subset::Recent });
        assert_eq!(c.state().subset, Subset::All);
        assert_eq!(c.complete_switch(ticket), Completion::Applied(Subset::Recent));
        assert!(matches!(c.view(), LibraryView::Ready { subset: Subset::Recent, .. }));
    }

    #[test]
    fn superseded_ticket_cannot_revert_state() {
        let mut c = controller();
        let recent = c.switch_subset(Subset::Recent);
        let favorites = c.switch_subset(Subset::Favorites);

        assert_eq!(c.complete_switch(recent), Completion::Stale);
        assert_eq!(c.view(), LibraryView::Loading { target: Subset::Favorites });

        assert_eq!(c.complete_switch(favorites), Completion::Applied(Subset::Favorites));
        assert_eq!(c.complete_switch(recent), Completion::Stale);
        assert_eq!(c.state().subset, Subset::Favorites);
        assert_eq!(c.phase(), Phase::Idle);
    }

    #[test]
    fn empty_result_is_distinct_from_loading() {
        let mut c = controller();
        c.set_search_text("no such file");
        assert_eq!(c.view(), LibraryView::Empty { subset: Subset::All });
    }

    #[test]
    fn toggle_category_is_idempotent() {
        let mut c = controller();
        c.toggle_category(Category::Video, true);
        assert_eq!(c.state().categories, CategorySet::all());
        c.toggle_category(Category::Video, false);
        c.toggle_category(Category::Video, false);
        assert!(!c.state().categories.contains(Category::Video));
        assert!(c.filtered().iter().all(|r| r.category != Category::Video));
    }

    #[test]
    fn view_mode_does_not_affect_selection() {
        let mut c = controller();
        let before: Vec<String> = c.filtered().iter().map(|r| r.id.clone()).collect();
        c.set_view_mode(ViewMode::List);
        let after: Vec<String> = c.filtered().iter().map(|r| r.id.clone()).collect();
        assert_eq!(before, after);
        assert_eq!(c.state().view, ViewMode::List);
    }

    #[test]
    fn failed_switch_keeps_last_known_good() {
        let mut c = controller();
        let ticket = c.switch_subset(Subset::Shared);
        assert_eq!(c.fail_switch(ticket), Completion::Applied(Subset::All));
        assert!(matches!(
            c.view(),
            LibraryView::Ready { subset: Subset::All, ref resources } if resources.len() == 8
        ));
    }

    #[test]
    fn replace_collection_rejects_duplicates_and_keeps_old() {
        let mut c = controller();
        let dup = vec![
            Resource::new("a", "one", Category::Other, "1 KB", "now"),
            Resource::new("a", "two", Category::Other, "1 KB", "now"),
        ];
        assert!(c.replace_collection(dup).is_err());
        assert_eq!(c.collection().len(), 8);
    }
}
