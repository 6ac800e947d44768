/// Shortens `s` to at most `max` chars, marking the cut with an ellipsis.
pub fn truncate_label(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        return s.to_string();
    }
    if max == 0 {
        return String::new();
    }
    let mut out: String = s.chars().take(max - 1).collect();
    out.push('…');
    out
}

/// Host part of a URL, for showing where a thumbnail lives.
pub fn url_host(url: &str) -> &str {
    let rest = url.split_once("://").map_or(url, |(_, rest)| rest);
    rest.split(['/', '?', '#']).next().unwrap_or(rest)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn truncates_on_char_boundaries() {
        assert_eq!(truncate_label("team-photo.jpg", 20), "team-photo.jpg");
        assert_eq!(truncate_label("marketing-strategy.docx", 10), "marketing…");
        assert_eq!(truncate_label("ééééé", 3), "éé…");
        assert_eq!(truncate_label("abc", 0), "");
    }

    #[test]
    fn extracts_host() {
        assert_eq!(
            url_host("https://images.unsplash.com/photo-1?w=800"),
            "images.unsplash.com"
        );
        assert_eq!(url_host("example.com/a"), "example.com");
    }
}
