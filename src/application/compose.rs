use chrono::NaiveDate;

pub const DEFAULT_TITLE_LABEL: &str = "市場サマリー";

/// `YYYY-MM-DD <label>`
pub fn digest_title(date: NaiveDate, label: &str) -> String {
    format!("{} {}", date.format("%Y-%m-%d"), label)
}

/// Appends the source link the summarizer was told to leave out. With a
/// `limit`, only the summary is shortened; the link line is kept whole.
pub fn with_link(summary: &str, link: &str, limit: Option<usize>) -> String {
    let suffix = if link.trim().is_empty() {
        String::new()
    } else {
        format!("\n\n**Link:** {link}")
    };
    let summary = match limit {
        Some(max) => truncate(summary, max.saturating_sub(suffix.chars().count())),
        None => summary.to_string(),
    };
    format!("{summary}{suffix}")
}

fn truncate(text: &str, max: usize) -> String {
    if text.chars().count() <= max {
        return text.to_string();
    }
    if max == 0 {
        return String::new();
    }
    let mut cut: String = text.chars().take(max - 1).collect();
    cut.push('…');
    cut
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_digest_title_format() {
        let date = NaiveDate::from_ymd_opt(2026, 3, 9).unwrap();
        assert_eq!(digest_title(date, DEFAULT_TITLE_LABEL), "2026-03-09 市場サマリー");
    }

    #[test]
    fn test_with_link() {
        assert_eq!(
            with_link("Stocks rose.", "https://example.com/a", None),
            "Stocks rose.\n\n**Link:** https://example.com/a"
        );
        assert_eq!(with_link("Stocks rose.", "", None), "Stocks rose.");
    }

    #[test]
    fn test_long_summary_shortened_before_link() {
        let link = "https://news.example.jp/1";
        let body = with_link(&"あ".repeat(1995), link, Some(2000));
        assert_eq!(body.chars().count(), 2000);
        assert!(body.ends_with(&format!("…\n\n**Link:** {link}")));
    }

    #[test]
    fn test_short_summary_untouched_by_limit() {
        assert_eq!(
            with_link("短い要約", "https://x", Some(2000)),
            "短い要約\n\n**Link:** https://x"
        );
        assert_eq!(with_link("abcdef", "", Some(4)), "abc…");
    }
}
