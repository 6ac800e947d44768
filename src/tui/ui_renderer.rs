use super::app_logic::TuiApp;
use super::app_state::{AppMode, Page, ResourceAction};
use super::theme::{category_style, stat_color};
use crate::controller::LibraryView;
use crate::dashboard::{self, STATS};
use crate::filter::{Subset, ViewMode};
use crate::navigation::NAV_ITEMS;
use crate::resource::{Category, Resource};
use crate::utils::{truncate_label, url_host};
use ratatui::{
    prelude::*,
    widgets::{BarChart, Block, Borders, Clear, List, ListItem, ListState, Paragraph, Tabs, Wrap},
};

const CARD_HEIGHT: u16 = 6;
const SIDEBAR_OPEN_WIDTH: u16 = 26;
const SIDEBAR_CLOSED_WIDTH: u16 = 5;
const TOAST_WIDTH: u16 = 46;
const TOAST_HEIGHT: u16 = 4;

fn badge(category: Category) -> Span<'static> {
    let style = category_style(category);
    Span::styled(
        format!(" {} ", category.as_str()),
        Style::default().fg(Color::Black).bg(style.color),
    )
}

fn draw_sidebar(f: &mut Frame, app: &TuiApp, area: Rect) {
    let open = app.sidebar.open;
    let title = if open { "ContentHub" } else { "" };
    let block = Block::default().borders(Borders::ALL).title(title);
    let inner = block.inner(area);
    f.render_widget(block, area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(0), Constraint::Length(3)])
        .split(inner);

    let items: Vec<ListItem> = NAV_ITEMS
        .iter()
        .map(|item| {
            if open {
                ListItem::new(format!("{}  {}", item.glyph, item.label))
            } else {
                ListItem::new(format!(" {}", item.glyph))
            }
        })
        .collect();
    let nav = List::new(items).highlight_style(
        Style::default()
            .add_modifier(Modifier::BOLD)
            .bg(Color::DarkGray),
    );
    let mut nav_state = ListState::default();
    nav_state.select(Some(app.sidebar.active_index()));
    f.render_stateful_widget(nav, chunks[0], &mut nav_state);

    let avatar = Span::styled(" U ", Style::default().fg(Color::Black).bg(Color::Cyan));
    let footer = if open {
        vec![
            Line::from(vec![avatar, Span::raw(" User")]),
            Line::from(Span::styled(
                "    user@example.com",
                Style::default().fg(Color::DarkGray),
            )),
        ]
    } else {
        vec![Line::from(avatar)]
    };
    f.render_widget(
        Paragraph::new(footer).block(Block::default().borders(Borders::TOP)),
        chunks[1],
    );
}

fn draw_page_header(f: &mut Frame, app: &TuiApp, area: Rect) {
    let selected: usize = match app.page() {
        Page::Dashboard => 0,
        Page::Resources => 1,
        page @ Page::Placeholder(path) => {
            let header = Paragraph::new(Line::from(vec![
                Span::styled(page.title(), Style::default().add_modifier(Modifier::BOLD)),
                Span::styled(
                    format!("  {}", path),
                    Style::default().fg(Color::DarkGray),
                ),
            ]))
            .block(Block::default().borders(Borders::ALL));
            f.render_widget(header, area);
            return;
        }
    };
    let tabs = Tabs::new(vec![Page::Dashboard.title(), Page::Resources.title()])
        .block(Block::default().borders(Borders::ALL))
        .select(selected)
        .highlight_style(
            Style::default()
                .add_modifier(Modifier::BOLD)
                .fg(Color::Cyan),
        );
    f.render_widget(tabs, area);
}

fn draw_dashboard(f: &mut Frame, app: &TuiApp, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(2),
            Constraint::Length(4),
            Constraint::Min(0),
        ])
        .split(area);

    let mut title = vec![Span::styled(
        "Dashboard",
        Style::default().add_modifier(Modifier::BOLD),
    )];
    if app.dashboard.is_refreshing() {
        title.push(Span::styled(
            "  refreshing…",
            Style::default().fg(Color::Yellow),
        ));
    }
    f.render_widget(
        Paragraph::new(vec![
            Line::from(title),
            Line::from(Span::styled(
                "Overview of your content resources",
                Style::default().fg(Color::DarkGray),
            )),
        ]),
        chunks[0],
    );

    let stat_areas = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Ratio(1, 4); 4])
        .split(chunks[1]);
    for (stat, stat_area) in STATS.iter().zip(stat_areas.iter()) {
        let value = Paragraph::new(Span::styled(
            stat.value,
            Style::default()
                .add_modifier(Modifier::BOLD)
                .fg(stat_color(stat.category)),
        ))
        .block(Block::default().borders(Borders::ALL).title(stat.name));
        f.render_widget(value, *stat_area);
    }

    let lower = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Ratio(1, 2); 2])
        .split(chunks[2]);

    let activity: Vec<ListItem> = dashboard::recent_activity()
        .into_iter()
        .map(|entry| {
            ListItem::new(vec![
                Line::from(entry.message),
                Line::from(Span::styled(entry.age, Style::default().fg(Color::DarkGray))),
            ])
        })
        .collect();
    f.render_widget(
        List::new(activity).block(
            Block::default()
                .borders(Borders::ALL)
                .title("Recent Activity"),
        ),
        lower[0],
    );

    let bars = dashboard::distribution(app.controller.collection());
    let chart = BarChart::default()
        .block(Block::default().borders(Borders::ALL).title("Content Types"))
        .bar_width(9)
        .bar_gap(2)
        .bar_style(Style::default().fg(Color::Blue))
        .value_style(Style::default().fg(Color::Black).bg(Color::Blue))
        .data(bars.as_slice());
    f.render_widget(chart, lower[1]);
}

/// Column of the terminal cursor inside the search box, measured in display
/// cells and kept inside the border.
fn search_cursor_x(area: Rect, text: &str, cursor: usize) -> u16 {
    let prefix: String = text.chars().take(cursor).collect();
    let width = u16::try_from(Span::raw(prefix).width()).unwrap_or(u16::MAX);
    let last = area.right().saturating_sub(2).max(area.x);
    area.x.saturating_add(1).saturating_add(width).min(last)
}

fn draw_toolbar(f: &mut Frame, app: &TuiApp, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Min(20), Constraint::Length(40)])
        .split(area);

    let state = app.controller.state();
    let searching = app.mode == AppMode::Searching;
    let search_text = if state.search.is_empty() && !searching {
        Span::styled("Search resources...", Style::default().fg(Color::DarkGray))
    } else {
        Span::raw(state.search.as_str())
    };
    let search_title = if searching {
        "Search (Esc to clear, Enter to apply)"
    } else {
        "Search"
    };
    f.render_widget(
        Paragraph::new(search_text)
            .block(Block::default().borders(Borders::ALL).title(search_title)),
        chunks[0],
    );
    if searching {
        f.set_cursor_position((
            search_cursor_x(chunks[0], &state.search, app.search_cursor_pos),
            chunks[0].y + 1,
        ));
    }

    let enabled = state.categories.iter().count();
    let filter_label = if enabled == Category::ALL.len() {
        "all types".to_string()
    } else {
        format!("{} of {} types", enabled, Category::ALL.len())
    };
    let view_label = match state.view {
        ViewMode::Grid => "[Grid] List",
        ViewMode::List => "Grid [List]",
    };
    f.render_widget(
        Paragraph::new(format!("Filter: {}  |  {}", filter_label, view_label))
            .block(Block::default().borders(Borders::ALL)),
        chunks[1],
    );
}

fn draw_library(f: &mut Frame, app: &mut TuiApp, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(2),
            Constraint::Length(3),
            Constraint::Length(3),
            Constraint::Min(0),
        ])
        .split(area);

    f.render_widget(
        Paragraph::new(vec![
            Line::from(Span::styled(
                "Resources",
                Style::default().add_modifier(Modifier::BOLD),
            )),
            Line::from(Span::styled(
                "Manage your content resources",
                Style::default().fg(Color::DarkGray),
            )),
        ]),
        chunks[0],
    );
    draw_toolbar(f, app, chunks[1]);

    // The loading target is highlighted as soon as the switch starts.
    let active_subset = match app.controller.view() {
        LibraryView::Loading { target } => target,
        LibraryView::Empty { subset } | LibraryView::Ready { subset, .. } => subset,
    };
    let titles: Vec<String> = Subset::ALL
        .iter()
        .enumerate()
        .map(|(i, s)| format!("{} {}", i + 1, s.title()))
        .collect();
    f.render_widget(
        Tabs::new(titles)
            .block(Block::default().borders(Borders::ALL))
            .select(active_subset.position())
            .highlight_style(
                Style::default()
                    .add_modifier(Modifier::BOLD)
                    .fg(Color::Cyan),
            ),
        chunks[2],
    );

    draw_library_body(f, app, chunks[3]);

    match app.mode {
        AppMode::FilterMenu => draw_filter_menu(f, app, chunks[3]),
        AppMode::ActionMenu => draw_action_menu(f, app, chunks[3]),
        _ => {}
    }
}

fn draw_library_body(f: &mut Frame, app: &mut TuiApp, area: Rect) {
    app.viewport_rows = match app.controller.state().view {
        ViewMode::Grid => (area.height / CARD_HEIGHT) as usize,
        ViewMode::List => area.height.saturating_sub(2) as usize,
    };
    app.ensure_selection_is_visible();

    let app = &*app;
    match app.controller.view() {
        LibraryView::Loading { target } => {
            let text = Paragraph::new(vec![
                Line::from(""),
                Line::from(Span::styled(
                    format!("Loading {} resources…", target.as_str()),
                    Style::default().fg(Color::Yellow),
                )),
            ])
            .alignment(Alignment::Center)
            .block(Block::default().borders(Borders::ALL));
            f.render_widget(text, area);
        }
        LibraryView::Empty { .. } => {
            let text = Paragraph::new(vec![
                Line::from(""),
                Line::from(Span::styled(
                    "No resources found",
                    Style::default().add_modifier(Modifier::BOLD),
                )),
                Line::from(Span::styled(
                    "Try adjusting your search or filter to find what you're looking for.",
                    Style::default().fg(Color::DarkGray),
                )),
            ])
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true })
            .block(Block::default().borders(Borders::ALL));
            f.render_widget(text, area);
        }
        LibraryView::Ready { resources, .. } => match app.controller.state().view {
            ViewMode::Grid => draw_grid(f, app, &resources, area),
            ViewMode::List => draw_list(f, app, &resources, area),
        },
    }
}

fn draw_card(f: &mut Frame, resource: &Resource, selected: bool, area: Rect) {
    let style = category_style(resource.category);
    let border_style = if selected {
        Style::default()
            .fg(Color::Cyan)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default()
    };
    let name_width = area.width.saturating_sub(4) as usize;
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(border_style)
        .title(truncate_label(&resource.name, name_width));

    let preview = match &resource.thumbnail_url {
        Some(url) => Line::from(vec![
            Span::styled("▨ ", Style::default().fg(style.color)),
            Span::styled(
                truncate_label(url_host(url), name_width.saturating_sub(2)),
                Style::default().fg(Color::DarkGray),
            ),
        ]),
        None => Line::from(Span::styled(style.glyph, Style::default().fg(style.color)))
            .alignment(Alignment::Center),
    };
    let lines = vec![
        preview,
        Line::from(vec![
            Span::raw(format!("{}  ", resource.size_label)),
            badge(resource.category),
        ]),
        Line::from(Span::styled(
            format!("Updated {}", resource.updated_label),
            Style::default().fg(Color::DarkGray),
        )),
    ];
    f.render_widget(Paragraph::new(lines).block(block), area);
}

fn draw_grid(f: &mut Frame, app: &TuiApp, resources: &[&Resource], area: Rect) {
    let columns = app.grid_columns;
    let row_areas = Layout::default()
        .direction(Direction::Vertical)
        .constraints(vec![Constraint::Length(CARD_HEIGHT); app.viewport_rows.max(1)])
        .split(area);

    let rows = resources
        .chunks(columns)
        .enumerate()
        .skip(app.scroll_offset);
    for (row_area, (row_idx, row)) in row_areas.iter().zip(rows) {
        let cells = Layout::default()
            .direction(Direction::Horizontal)
            .constraints(vec![Constraint::Ratio(1, columns as u32); columns])
            .split(*row_area);
        for (col_idx, (cell, resource)) in cells.iter().zip(row.iter()).enumerate() {
            let selected = row_idx * columns + col_idx == app.selected;
            draw_card(f, resource, selected, *cell);
        }
    }
}

fn draw_list(f: &mut Frame, app: &TuiApp, resources: &[&Resource], area: Rect) {
    let end = (app.scroll_offset + app.viewport_rows).min(resources.len());
    let window = resources.get(app.scroll_offset..end).unwrap_or(&[]);
    let name_width = area.width.saturating_sub(40).max(12) as usize;

    let items: Vec<ListItem> = window
        .iter()
        .map(|resource| {
            let style = category_style(resource.category);
            ListItem::new(Line::from(vec![
                Span::styled(format!("{} ", style.glyph), Style::default().fg(style.color)),
                Span::raw(format!(
                    "{:<width$} ",
                    truncate_label(&resource.name, name_width),
                    width = name_width
                )),
                badge(resource.category),
                Span::raw(format!(" {:>8}  ", resource.size_label)),
                Span::styled(
                    resource.updated_label.clone(),
                    Style::default().fg(Color::DarkGray),
                ),
            ]))
        })
        .collect();

    let list = List::new(items)
        .block(Block::default().borders(Borders::ALL))
        .highlight_style(
            Style::default()
                .add_modifier(Modifier::BOLD)
                .bg(Color::DarkGray),
        )
        .highlight_symbol("❯ ");

    let mut list_state = ListState::default();
    if app.selected >= app.scroll_offset && app.selected < end {
        list_state.select(Some(app.selected - app.scroll_offset));
    }
    f.render_stateful_widget(list, area, &mut list_state);
}

fn draw_filter_menu(f: &mut Frame, app: &TuiApp, area: Rect) {
    let width = 28u16.min(area.width);
    let height = (Category::ALL.len() as u16 + 2).min(area.height);
    let popup = Rect::new(area.right().saturating_sub(width), area.y, width, height);

    let categories = &app.controller.state().categories;
    let items: Vec<ListItem> = Category::ALL
        .iter()
        .map(|&category| {
            let mark = if categories.contains(category) {
                "[x] "
            } else {
                "[ ] "
            };
            ListItem::new(format!("{}{}", mark, category.menu_label()))
        })
        .collect();
    let list = List::new(items)
        .block(Block::default().borders(Borders::ALL).title("Resource Type"))
        .highlight_style(
            Style::default()
                .add_modifier(Modifier::BOLD)
                .bg(Color::DarkGray),
        );
    let mut state = ListState::default();
    state.select(Some(app.filter_menu_idx));

    f.render_widget(Clear, popup);
    f.render_stateful_widget(list, popup, &mut state);
}

fn draw_action_menu(f: &mut Frame, app: &TuiApp, area: Rect) {
    let Some(resource) = app.selected_resource() else {
        return;
    };
    let width = 30u16.min(area.width);
    let height = (ResourceAction::ALL.len() as u16 + 2).min(area.height);
    let popup = Rect::new(area.right().saturating_sub(width), area.y, width, height);

    let items: Vec<ListItem> = ResourceAction::ALL
        .iter()
        .map(|action| {
            let style = match action {
                ResourceAction::Delete => Style::default().fg(Color::Red),
                _ => Style::default(),
            };
            ListItem::new(Span::styled(action.label(), style))
        })
        .collect();
    let title = truncate_label(&resource.name, width.saturating_sub(4) as usize);
    let list = List::new(items)
        .block(Block::default().borders(Borders::ALL).title(title))
        .highlight_style(
            Style::default()
                .add_modifier(Modifier::BOLD)
                .bg(Color::DarkGray),
        );
    let mut state = ListState::default();
    state.select(Some(app.action_menu_idx));

    f.render_widget(Clear, popup);
    f.render_stateful_widget(list, popup, &mut state);
}

fn draw_placeholder(f: &mut Frame, label: &str, area: Rect) {
    let text = Paragraph::new(vec![
        Line::from(""),
        Line::from(format!("{} will appear here.", label)),
        Line::from(Span::styled(
            "Connect a data source to enable this feature.",
            Style::default().fg(Color::DarkGray),
        )),
    ])
    .alignment(Alignment::Center)
    .block(Block::default().borders(Borders::ALL));
    f.render_widget(text, area);
}

fn draw_help_block(f: &mut Frame, app: &TuiApp, area: Rect) {
    let first = match (app.mode, app.page()) {
        (AppMode::Searching, _) => "Type to search | Left/Right: Cursor | Enter: Apply | Esc: Clear",
        (AppMode::FilterMenu, _) => "j/k: Move | Space: Toggle type | Esc/Enter/f: Close",
        (AppMode::ActionMenu, _) => "j/k: Move | Enter: Run action | Esc/a: Close",
        (AppMode::Normal, Page::Resources) => {
            "/: Search | f: Filter | v: Grid/List | 1-4: Tabs | Arrows/hjkl: Move | Enter: Open | a: Actions"
        }
        (AppMode::Normal, Page::Dashboard) => "r: Refresh",
        (AppMode::Normal, Page::Placeholder(_)) => "",
    };
    let lines = vec![
        Line::from(first),
        Line::from("Tab: Dashboard/Resources | [ ]: Pages | b: Sidebar | n: Add | q/Esc: Quit"),
    ];
    f.render_widget(
        Paragraph::new(lines).block(Block::default().borders(Borders::ALL)),
        area,
    );
}

fn draw_toasts(f: &mut Frame, app: &TuiApp, area: Rect) {
    let width = TOAST_WIDTH.min(area.width);
    let mut bottom = area.bottom();
    for toast in app.toasts.visible().collect::<Vec<_>>().into_iter().rev() {
        if bottom < area.y + TOAST_HEIGHT {
            break;
        }
        bottom -= TOAST_HEIGHT;
        let rect = Rect::new(area.right().saturating_sub(width), bottom, width, TOAST_HEIGHT);
        let body = Paragraph::new(toast.notification.description.as_str())
            .wrap(Wrap { trim: true })
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(Color::Cyan))
                    .title(toast.notification.title.as_str()),
            );
        f.render_widget(Clear, rect);
        f.render_widget(body, rect);
    }
}

pub(super) fn ui_frame(frame: &mut Frame, app: &mut TuiApp) {
    let sidebar_width = if app.sidebar.open {
        SIDEBAR_OPEN_WIDTH
    } else {
        SIDEBAR_CLOSED_WIDTH
    };
    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Length(sidebar_width), Constraint::Min(0)])
        .split(frame.area());
    draw_sidebar(frame, app, columns[0]);

    let main_chunks = Layout::default()
        .direction(Direction::Vertical)
        .horizontal_margin(1)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(0),
            Constraint::Length(4),
        ])
        .split(columns[1]);

    draw_page_header(frame, app, main_chunks[0]);
    match app.page() {
        Page::Dashboard => draw_dashboard(frame, app, main_chunks[1]),
        Page::Resources => draw_library(frame, app, main_chunks[1]),
        page @ Page::Placeholder(_) => draw_placeholder(frame, page.title(), main_chunks[1]),
    }
    draw_help_block(frame, app, main_chunks[2]);
    draw_toasts(frame, app, main_chunks[1]);
}
