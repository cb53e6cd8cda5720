//! Fields derived from post content.

/// Number of characters of content kept in an excerpt.
pub const EXCERPT_LENGTH: usize = 150;

/// Assumed reading speed.
pub const WORDS_PER_MINUTE: usize = 200;

const ELLIPSIS: &str = "...";

/// First [`EXCERPT_LENGTH`] characters of `content` followed by an ellipsis.
///
/// The ellipsis is appended unconditionally, short content included.
pub fn compute_excerpt(content: &str) -> String {
    let mut excerpt: String = content.chars().take(EXCERPT_LENGTH).collect();
    excerpt.push_str(ELLIPSIS);
    excerpt
}

pub fn word_count(content: &str) -> usize {
    content.split_whitespace().count()
}

/// Minutes needed to read `content`, never less than one.
pub fn compute_reading_time(content: &str) -> u32 {
    let minutes = word_count(content).div_ceil(WORDS_PER_MINUTE).max(1);
    u32::try_from(minutes).unwrap_or(u32::MAX)
}

/// Trim tags, drop blanks and duplicates. The first occurrence keeps its position.
pub fn normalize_tags<I, S>(tags: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut normalized: Vec<String> = Vec::new();
    for tag in tags {
        let tag = tag.as_ref().trim();
        if tag.is_empty() || normalized.iter().any(|t| t == tag) {
            continue;
        }
        normalized.push(tag.to_string());
    }
    normalized
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_excerpt_always_appends_ellipsis() {
        assert_eq!(compute_excerpt("short"), "short...");
        assert_eq!(compute_excerpt(""), "...");
    }

    #[test]
    fn test_excerpt_truncates_at_150_chars() {
        let content = "a".repeat(151);
        let excerpt = compute_excerpt(&content);
        assert_eq!(excerpt, format!("{}...", "a".repeat(150)));
    }

    #[test]
    fn test_excerpt_counts_characters_not_bytes() {
        let content = "é".repeat(200);
        let excerpt = compute_excerpt(&content);
        assert_eq!(excerpt.chars().count(), 153);
    }

    #[test]
    fn test_reading_time() {
        assert_eq!(compute_reading_time("one"), 1);
        assert_eq!(compute_reading_time(&"word ".repeat(200)), 1);
        assert_eq!(compute_reading_time(&"word ".repeat(201)), 2);
        assert_eq!(compute_reading_time("   "), 1);
    }

    #[test]
    fn test_word_count_splits_on_whitespace_runs() {
        assert_eq!(word_count("a  b\n\tc   "), 3);
    }

    #[test]
    fn test_normalize_tags() {
        let tags = normalize_tags(["rust", " async ", "", "rust", "  ", "web"]);
        assert_eq!(tags, vec!["rust", "async", "web"]);
    }
}
