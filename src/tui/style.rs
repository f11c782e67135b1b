use crate::api::types::{ResultKind, SearchResult};
use ratatui::style::Color;

pub fn color_for_kind(kind: ResultKind) -> Color {
    match kind {
        ResultKind::Restaurant => Color::Yellow,
        ResultKind::List => Color::Cyan,
        ResultKind::Post => Color::Green,
        ResultKind::User => Color::Magenta,
    }
}

pub fn icon_for_kind(kind: ResultKind) -> &'static str {
    match kind {
        ResultKind::Restaurant => "\u{1F37D}\u{FE0F}", // fork and knife with plate
        ResultKind::List => "\u{1F4CB}",               // clipboard
        ResultKind::Post => "\u{1F4DD}",               // memo
        ResultKind::User => "\u{1F464}",               // bust
    }
}

/// "★★★★☆ 4.5" for a 0-5 rating
pub fn star_rating(rating: f64) -> String {
    let full = rating.floor().clamp(0.0, 5.0) as usize;
    let mut s = String::new();
    for _ in 0..full {
        s.push('\u{2605}');
    }
    for _ in full..5 {
        s.push('\u{2606}');
    }
    format!("{} {:.1}", s, rating)
}

/// One-line metadata summary: rating, counts, verification, price range
pub fn metadata_line(result: &SearchResult) -> String {
    let mut parts: Vec<String> = Vec::new();

    if let Some(rating) = result.rating {
        parts.push(star_rating(rating));
    }
    if let Some(meta) = &result.metadata {
        if let Some(n) = meta.member_count {
            parts.push(format!("{} members", n));
        }
        if let Some(n) = meta.post_count {
            parts.push(format!("{} posts", n));
        }
        if let Some(n) = meta.likes {
            parts.push(format!("{} likes", n));
        }
        if meta.verified == Some(true) {
            parts.push("verified".to_string());
        }
        if let Some(price) = &meta.price_range {
            parts.push(price.clone());
        }
    }

    parts.join("  ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::types::ResultMetadata;

    #[test]
    fn star_rating_renders_partial_scale() {
        assert_eq!(star_rating(4.5), "\u{2605}\u{2605}\u{2605}\u{2605}\u{2606} 4.5");
        assert_eq!(star_rating(0.0), "\u{2606}\u{2606}\u{2606}\u{2606}\u{2606} 0.0");
    }

    #[test]
    fn metadata_line_skips_absent_fields() {
        let result = SearchResult {
            id: "c1".into(),
            name: "Taco Tour".into(),
            subtitle: String::new(),
            kind: ResultKind::List,
            location: None,
            rating: None,
            metadata: Some(ResultMetadata {
                member_count: Some(12),
                verified: Some(true),
                ..Default::default()
            }),
        };
        assert_eq!(metadata_line(&result), "12 members  verified");
    }
}
