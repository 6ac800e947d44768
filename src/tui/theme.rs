use crate::resource::Category;
use ratatui::style::Color;

#[derive(Debug, Clone, Copy)]
pub struct CategoryStyle {
    pub glyph: &'static str,
    pub color: Color,
}

// Indexed by `Category::index`.
const CATEGORY_STYLES: [CategoryStyle; 4] = [
    CategoryStyle {
        glyph: "▤",
        color: Color::Blue,
    },
    CategoryStyle {
        glyph: "▨",
        color: Color::Green,
    },
    CategoryStyle {
        glyph: "▶",
        color: Color::Red,
    },
    CategoryStyle {
        glyph: "▤",
        color: Color::Gray,
    },
];

pub fn category_style(category: Category) -> CategoryStyle {
    CATEGORY_STYLES[category.index()]
}

/// Accent for a dashboard stat card; the total has no category.
pub fn stat_color(category: Option<Category>) -> Color {
    match category {
        None => Color::Blue,
        Some(Category::Document) => Color::Yellow,
        Some(other) => category_style(other).color,
    }
}
