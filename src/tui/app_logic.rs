use super::app_state::{AppMode, Page, ResourceAction, TimerEvent};
use crate::config::Config;
use crate::controller::{LibraryView, SwitchTicket, ViewController};
use crate::dashboard::Dashboard;
use crate::filter::{Subset, ViewMode};
use crate::navigation::Sidebar;
use crate::notify::{Notification, Notifier, ToastQueue};
use crate::resource::{Category, Resource};
use crate::source::ResourceSource;
use crate::timers::TimerQueue;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use std::time::{Duration, Instant};
use tracing::{debug, warn};

fn byte_index(s: &str, char_pos: usize) -> usize {
    s.char_indices().nth(char_pos).map_or(s.len(), |(i, _)| i)
}

pub struct TuiApp {
    pub(super) controller: ViewController,
    pub(super) source: Box<dyn ResourceSource>,
    pub(super) dashboard: Dashboard,
    pub(super) sidebar: Sidebar,
    pub(super) toasts: ToastQueue,
    pub(super) timers: TimerQueue<TimerEvent>,
    pub(super) mode: AppMode,
    pub(super) search_cursor_pos: usize,
    pub(super) filter_menu_idx: usize,
    pub(super) action_menu_idx: usize,
    pub(super) selected: usize,
    // In rows: one resource per row in list view, `grid_columns` per row in grid view.
    pub(super) scroll_offset: usize,
    pub(super) viewport_rows: usize,
    pub(super) grid_columns: usize,
    pub(super) quit: bool,
    loading_delay: Duration,
    refresh_delay: Duration,
}

impl TuiApp {
    pub fn new(controller: ViewController, source: Box<dyn ResourceSource>, config: &Config) -> Self {
        TuiApp {
            search_cursor_pos: controller.state().search.chars().count(),
            controller,
            source,
            dashboard: Dashboard::default(),
            sidebar: Sidebar::new(config.sidebar_open),
            toasts: ToastQueue::new(config.toast_ttl()),
            timers: TimerQueue::new(),
            mode: AppMode::Normal,
            filter_menu_idx: 0,
            action_menu_idx: 0,
            selected: 0,
            scroll_offset: 0,
            viewport_rows: 0, // Updated by ui_renderer
            grid_columns: usize::from(config.grid_columns.max(1)),
            quit: false,
            loading_delay: config.loading_delay(),
            refresh_delay: config.refresh_delay(),
        }
    }

    pub fn controller(&self) -> &ViewController {
        &self.controller
    }

    pub fn toasts(&self) -> &ToastQueue {
        &self.toasts
    }

    pub fn should_quit(&self) -> bool {
        self.quit
    }

    pub fn page(&self) -> Page {
        Page::for_nav_item(self.sidebar.active())
    }

    pub fn selected_resource(&self) -> Option<&Resource> {
        match self.controller.view() {
            LibraryView::Ready { resources, .. } => resources.get(self.selected).copied(),
            _ => None,
        }
    }

    pub(super) fn visible_count(&self) -> usize {
        match self.controller.view() {
            LibraryView::Ready { resources, .. } => resources.len(),
            _ => 0,
        }
    }

    pub(super) fn items_per_row(&self) -> usize {
        match self.controller.state().view {
            ViewMode::Grid => self.grid_columns,
            ViewMode::List => 1,
        }
    }

    pub(super) fn next_timer_due(&self) -> Option<Instant> {
        self.timers.next_due()
    }

    /// Runs every timer due at `now` and drops expired toasts.
    pub fn on_tick(&mut self, now: Instant) {
        for event in self.timers.drain_due(now) {
            match event {
                TimerEvent::SubsetReady(ticket) => self.finish_subset_switch(ticket),
                TimerEvent::DashboardRefreshed(token) => {
                    self.dashboard.finish_refresh(token, &mut self.toasts);
                }
            }
        }
        self.toasts.prune(now);
    }

    pub(super) fn switch_subset(&mut self, target: Subset, now: Instant) {
        let ticket = self.controller.switch_subset(target);
        self.timers
            .schedule(now, self.loading_delay, TimerEvent::SubsetReady(ticket));
        self.selected = 0;
        self.scroll_offset = 0;
    }

    fn finish_subset_switch(&mut self, ticket: SwitchTicket) {
        if !self.controller.is_pending(ticket) {
            debug!(generation = ticket.generation, "dropping superseded subset timer");
            return;
        }
        let reloaded = self
            .source
            .load()
            .and_then(|resources| self.controller.replace_collection(resources));
        match reloaded {
            Ok(()) => {
                self.controller.complete_switch(ticket);
            }
            Err(err) => {
                warn!(error = %err, from = %self.source.describe(), "resource reload failed");
                self.controller.fail_switch(ticket);
                self.toasts
                    .notify(Notification::new("Failed to load resources", err.to_string()));
            }
        }
        self.selected = 0;
        self.scroll_offset = 0;
    }

    pub(super) fn refresh_dashboard(&mut self, now: Instant) {
        let token = self.dashboard.start_refresh();
        self.timers
            .schedule(now, self.refresh_delay, TimerEvent::DashboardRefreshed(token));
    }

    pub(super) fn add_resource(&mut self) {
        self.toasts.notify(Notification::new(
            "Add resource",
            "Connect a data source to enable uploads.",
        ));
    }

    pub(super) fn open_selected_resource(&mut self) {
        let notification = match self.selected_resource() {
            Some(resource) => Notification::new(
                "Resource selected",
                format!(
                    "{} · {} · updated {}",
                    resource.name, resource.size_label, resource.updated_label
                ),
            ),
            None => return,
        };
        self.toasts.notify(notification);
    }

    fn run_resource_action(&mut self, action: ResourceAction) {
        let notification = match self.selected_resource() {
            Some(resource) => Notification::new(
                format!("{} requested", action.label()),
                resource.name.clone(),
            ),
            None => return,
        };
        debug!(action = action.label(), "resource action");
        self.toasts.notify(notification);
    }

    pub(super) fn move_selection(&mut self, delta: isize) {
        let count = self.visible_count();
        if count == 0 {
            return;
        }
        let next = (self.selected as isize + delta).clamp(0, count as isize - 1);
        self.selected = next as usize;
        self.ensure_selection_is_visible();
    }

    /// Keeps the selection inside the filtered list after the filter changed.
    pub(super) fn clamp_selection(&mut self) {
        let count = self.visible_count();
        if self.selected >= count {
            self.selected = count.saturating_sub(1);
        }
        self.ensure_selection_is_visible();
    }

    pub(super) fn ensure_selection_is_visible(&mut self) {
        let per_row = self.items_per_row();
        let total_rows = self.visible_count().div_ceil(per_row);
        if self.viewport_rows == 0 || total_rows == 0 {
            self.scroll_offset = 0;
            return;
        }
        let row = self.selected / per_row;
        if row < self.scroll_offset {
            self.scroll_offset = row;
        } else if row >= self.scroll_offset + self.viewport_rows {
            self.scroll_offset = row + 1 - self.viewport_rows;
        }
        if total_rows <= self.viewport_rows {
            self.scroll_offset = 0;
        } else {
            self.scroll_offset = self.scroll_offset.min(total_rows - self.viewport_rows);
        }
    }

    fn go_to(&mut self, path: &str) {
        if self.sidebar.navigate(path) {
            self.mode = AppMode::Normal;
        }
    }

    // --- Event handling sub-methods ---
    pub(super) fn handle_normal_mode_input(&mut self, key_event: KeyEvent, now: Instant) {
        match key_event.code {
            KeyCode::Char('q') | KeyCode::Esc => self.quit = true,
            KeyCode::Char('c') if key_event.modifiers.contains(KeyModifiers::CONTROL) => {
                self.quit = true
            }
            KeyCode::Char('b') => self.sidebar.toggle(),
            KeyCode::Char(']') => self.sidebar.next(),
            KeyCode::Char('[') => self.sidebar.previous(),
            KeyCode::Tab | KeyCode::BackTab => match self.page() {
                Page::Dashboard => self.go_to("/resources"),
                _ => self.go_to("/"),
            },
            KeyCode::Char('n') => self.add_resource(),
            _ => match self.page() {
                Page::Dashboard => {
                    if key_event.code == KeyCode::Char('r') {
                        self.refresh_dashboard(now);
                    }
                }
                Page::Resources => self.handle_library_input(key_event, now),
                Page::Placeholder(_) => {}
            },
        }
    }

    fn handle_library_input(&mut self, key_event: KeyEvent, now: Instant) {
        let row_step = self.items_per_row() as isize;
        match key_event.code {
            KeyCode::Char('/') => {
                self.mode = AppMode::Searching;
                self.search_cursor_pos = self.controller.state().search.chars().count();
            }
            KeyCode::Char('f') => self.mode = AppMode::FilterMenu,
            KeyCode::Char('v') => {
                let mode = self.controller.state().view.toggled();
                self.controller.set_view_mode(mode);
                self.ensure_selection_is_visible();
            }
            KeyCode::Char(c @ '1'..='4') => {
                let idx = c as usize - '1' as usize;
                self.switch_subset(Subset::ALL[idx], now);
            }
            KeyCode::Down | KeyCode::Char('j') => self.move_selection(row_step),
            KeyCode::Up | KeyCode::Char('k') => self.move_selection(-row_step),
            KeyCode::Right | KeyCode::Char('l') if row_step > 1 => self.move_selection(1),
            KeyCode::Left | KeyCode::Char('h') if row_step > 1 => self.move_selection(-1),
            KeyCode::Home | KeyCode::Char('g') => {
                self.selected = 0;
                self.ensure_selection_is_visible();
            }
            KeyCode::Enter => self.open_selected_resource(),
            KeyCode::Char('a') if self.selected_resource().is_some() => {
                self.action_menu_idx = 0;
                self.mode = AppMode::ActionMenu;
            }
            _ => {}
        }
    }

    pub(super) fn handle_search_mode_input(&mut self, key_event: KeyEvent) {
        let mut text = self.controller.state().search.clone();
        match key_event.code {
            KeyCode::Enter => {
                self.mode = AppMode::Normal;
                return;
            }
            KeyCode::Esc => {
                self.mode = AppMode::Normal;
                text.clear();
                self.search_cursor_pos = 0;
            }
            KeyCode::Char(c) => {
                text.insert(byte_index(&text, self.search_cursor_pos), c);
                self.search_cursor_pos += 1;
            }
            KeyCode::Backspace => {
                if self.search_cursor_pos == 0 {
                    return;
                }
                self.search_cursor_pos -= 1;
                text.remove(byte_index(&text, self.search_cursor_pos));
            }
            KeyCode::Left => {
                self.search_cursor_pos = self.search_cursor_pos.saturating_sub(1);
                return;
            }
            KeyCode::Right => {
                if self.search_cursor_pos < text.chars().count() {
                    self.search_cursor_pos += 1;
                }
                return;
            }
            _ => return,
        }
        self.controller.set_search_text(text);
        self.clamp_selection();
    }

    pub(super) fn handle_filter_menu_input(&mut self, key_event: KeyEvent) {
        let count = Category::ALL.len();
        match key_event.code {
            KeyCode::Esc | KeyCode::Enter | KeyCode::Char('f') | KeyCode::Char('q') => {
                self.mode = AppMode::Normal
            }
            KeyCode::Down | KeyCode::Char('j') => {
                self.filter_menu_idx = (self.filter_menu_idx + 1) % count
            }
            KeyCode::Up | KeyCode::Char('k') => {
                self.filter_menu_idx = (self.filter_menu_idx + count - 1) % count
            }
            KeyCode::Char(' ') | KeyCode::Char('x') => {
                let category = Category::ALL[self.filter_menu_idx];
                let enabled = self.controller.state().categories.contains(category);
                self.controller.toggle_category(category, !enabled);
                self.clamp_selection();
            }
            _ => {}
        }
    }

    pub(super) fn handle_action_menu_input(&mut self, key_event: KeyEvent) {
        let count = ResourceAction::ALL.len();
        match key_event.code {
            KeyCode::Esc | KeyCode::Char('a') | KeyCode::Char('q') => self.mode = AppMode::Normal,
            KeyCode::Down | KeyCode::Char('j') => {
                self.action_menu_idx = (self.action_menu_idx + 1) % count
            }
            KeyCode::Up | KeyCode::Char('k') => {
                self.action_menu_idx = (self.action_menu_idx + count - 1) % count
            }
            KeyCode::Enter => {
                self.mode = AppMode::Normal;
                self.run_resource_action(ResourceAction::ALL[self.action_menu_idx]);
            }
            _ => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::super::event_handler::dispatch_key;
    use super::*;
    use crate::error::SourceError;
    use crate::filter::SubsetRules;
    use crate::resource::Collection;
    use crate::source::MockSource;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn config() -> Config {
        Config {
            toast_ttl_ms: 60_000,
            ..Config::default()
        }
    }

    fn app_with(source: Box<dyn ResourceSource>) -> TuiApp {
        let controller = ViewController::new(
            Collection::new(crate::resource::mock_resources()).unwrap(),
            SubsetRules::default(),
        );
        let mut app = TuiApp::new(controller, source, &config());
        app.sidebar.navigate("/resources");
        app
    }

    fn type_text(app: &mut TuiApp, text: &str, now: Instant) {
        for c in text.chars() {
            dispatch_key(app, key(KeyCode::Char(c)), now);
        }
    }

    #[test]
    fn search_mode_filters_live_and_esc_clears() {
        let now = Instant::now();
        let mut app = app_with(Box::new(MockSource));
        dispatch_key(&mut app, key(KeyCode::Char('/')), now);
        assert_eq!(app.mode, AppMode::Searching);
        type_text(&mut app, "report", now);
        assert_eq!(app.controller().filtered().len(), 1);
        assert_eq!(
            app.selected_resource().map(|r| r.name.as_str()),
            Some("Annual Report 2023.pdf")
        );

        dispatch_key(&mut app, key(KeyCode::Esc), now);
        assert_eq!(app.mode, AppMode::Normal);
        assert!(app.controller().state().search.is_empty());
        assert_eq!(app.controller().filtered().len(), 8);
    }

    #[test]
    fn subset_keys_enter_loading_until_timer_fires() {
        let start = Instant::now();
        let mut app = app_with(Box::new(MockSource));
        dispatch_key(&mut app, key(KeyCode::Char('2')), start);
        dispatch_key(&mut app, key(KeyCode::Char('3')), start + Duration::from_millis(100));
        assert_eq!(app.selected_resource(), None);

        // The first timer is due here but belongs to the superseded switch.
        app.on_tick(start + Duration::from_millis(650));
        assert_eq!(
            app.controller().view(),
            LibraryView::Loading {
                target: Subset::Favorites
            }
        );

        app.on_tick(start + Duration::from_millis(750));
        assert_eq!(app.controller().state().subset, Subset::Favorites);
        assert!(!app.controller().is_loading());
        assert!(app.timers.is_empty());
    }

    #[test]
    fn filter_menu_toggles_categories() {
        let now = Instant::now();
        let mut app = app_with(Box::new(MockSource));
        dispatch_key(&mut app, key(KeyCode::Char('f')), now);
        dispatch_key(&mut app, key(KeyCode::Char('j')), now);
        dispatch_key(&mut app, key(KeyCode::Char(' ')), now);
        assert!(
            !app.controller()
                .state()
                .categories
                .contains(Category::Image)
        );
        dispatch_key(&mut app, key(KeyCode::Esc), now);
        assert_eq!(app.mode, AppMode::Normal);
        assert_eq!(app.controller().filtered().len(), 5);
    }

    #[test]
    fn grid_navigation_moves_by_rows() {
        let now = Instant::now();
        let mut app = app_with(Box::new(MockSource));
        app.viewport_rows = 1;
        dispatch_key(&mut app, key(KeyCode::Char('j')), now);
        assert_eq!(app.selected, 3);
        assert_eq!(app.scroll_offset, 1);
        dispatch_key(&mut app, key(KeyCode::Char('l')), now);
        assert_eq!(app.selected, 4);
        dispatch_key(&mut app, key(KeyCode::Char('j')), now);
        dispatch_key(&mut app, key(KeyCode::Char('j')), now);
        assert_eq!(app.selected, 7);

        dispatch_key(&mut app, key(KeyCode::Char('v')), now);
        assert_eq!(app.controller().state().view, ViewMode::List);
        assert_eq!(app.scroll_offset, 7);
    }

    #[test]
    fn enter_notifies_about_selected_resource() {
        let now = Instant::now();
        let mut app = app_with(Box::new(MockSource));
        dispatch_key(&mut app, key(KeyCode::Enter), now);
        let toast = app.toasts().visible().next().unwrap();
        assert_eq!(toast.notification.title, "Resource selected");
        assert!(
            toast
                .notification
                .description
                .starts_with("Annual Report 2023.pdf")
        );
    }

    #[test]
    fn dashboard_refresh_notifies_once_delay_elapses() {
        let start = Instant::now();
        let mut app = app_with(Box::new(MockSource));
        dispatch_key(&mut app, key(KeyCode::Tab), start);
        assert_eq!(app.page(), Page::Dashboard);
        dispatch_key(&mut app, key(KeyCode::Char('r')), start);
        assert!(app.dashboard.is_refreshing());
        app.on_tick(start + Duration::from_millis(100));
        assert!(app.toasts().is_empty());
        app.on_tick(start + Duration::from_millis(900));
        assert!(!app.dashboard.is_refreshing());
        assert_eq!(
            app.toasts().visible().next().map(|t| t.notification.title.as_str()),
            Some("Dashboard refreshed")
        );
    }

    struct FailingSource;

    impl ResourceSource for FailingSource {
        fn load(&self) -> Result<Vec<Resource>, SourceError> {
            Err(SourceError::DuplicateId("1".to_string()))
        }

        fn describe(&self) -> String {
            "failing".to_string()
        }
    }

    #[test]
    fn failed_reload_keeps_previous_subset_and_notifies() {
        let start = Instant::now();
        let mut app = app_with(Box::new(FailingSource));
        dispatch_key(&mut app, key(KeyCode::Char('4')), start);
        app.on_tick(start + Duration::from_secs(1));

        assert_eq!(app.controller().state().subset, Subset::All);
        assert_eq!(app.controller().collection().len(), 8);
        assert_eq!(
            app.toasts().visible().next().map(|t| t.notification.title.as_str()),
            Some("Failed to load resources")
        );
    }

    #[test]
    fn action_menu_notifies_without_touching_the_collection() {
        let now = Instant::now();
        let mut app = app_with(Box::new(MockSource));
        dispatch_key(&mut app, key(KeyCode::Char('l')), now);
        dispatch_key(&mut app, key(KeyCode::Char('a')), now);
        assert_eq!(app.mode, AppMode::ActionMenu);
        dispatch_key(&mut app, key(KeyCode::Char('k')), now);
        dispatch_key(&mut app, key(KeyCode::Enter), now);

        assert_eq!(app.mode, AppMode::Normal);
        let toast = app.toasts().visible().next().unwrap();
        assert_eq!(toast.notification.title, "Delete requested");
        assert_eq!(toast.notification.description, "product-hero-image.jpg");
        assert_eq!(app.controller().collection().len(), 8);

        dispatch_key(&mut app, key(KeyCode::Char('a')), now);
        dispatch_key(&mut app, key(KeyCode::Esc), now);
        assert_eq!(app.mode, AppMode::Normal);
        assert_eq!(app.toasts().visible().count(), 1);
    }

    #[test]
    fn action_menu_needs_a_selected_resource() {
        let now = Instant::now();
        let mut app = app_with(Box::new(MockSource));
        dispatch_key(&mut app, key(KeyCode::Char('/')), now);
        type_text(&mut app, "zzz", now);
        dispatch_key(&mut app, key(KeyCode::Enter), now);
        dispatch_key(&mut app, key(KeyCode::Char('a')), now);
        assert_eq!(app.mode, AppMode::Normal);
    }

    #[test]
    fn placeholder_pages_take_their_title_from_the_nav_path() {
        let now = Instant::now();
        let mut app = app_with(Box::new(MockSource));
        dispatch_key(&mut app, key(KeyCode::Char(']')), now);
        assert_eq!(app.page(), Page::Placeholder("/upload"));
        assert_eq!(app.page().title(), "Upload");
        dispatch_key(&mut app, key(KeyCode::Char(']')), now);
        dispatch_key(&mut app, key(KeyCode::Char(']')), now);
        assert_eq!(app.page().title(), "Settings");
        dispatch_key(&mut app, key(KeyCode::Char(']')), now);
        assert_eq!(app.page(), Page::Dashboard);
    }

    #[test]
    fn q_quits_but_not_while_searching() {
        let now = Instant::now();
        let mut app = app_with(Box::new(MockSource));
        dispatch_key(&mut app, key(KeyCode::Char('/')), now);
        dispatch_key(&mut app, key(KeyCode::Char('q')), now);
        assert!(!app.should_quit());
        assert_eq!(app.controller().state().search, "q");
        dispatch_key(&mut app, key(KeyCode::Enter), now);
        dispatch_key(&mut app, key(KeyCode::Char('q')), now);
        assert!(app.should_quit());
    }
}
