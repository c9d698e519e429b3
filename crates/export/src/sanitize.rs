//! Page title to filename conversion.
//!
//! The mapping is lossy: titles that differ only in forbidden characters end
//! up with the same filename, and the last page written wins.

/// Extension appended to every exported file.
pub const EXTENSION: &str = "text";
/// Maximum length of the filename stem, counted in characters.
pub const MAX_STEM_LENGTH: usize = 200;

const FORBIDDEN: [char; 9] = ['<', '>', ':', '"', '/', '\\', '|', '?', '*'];

/// Turn a page title into a filesystem-safe filename stem.
///
/// 1. Each of `< > : " / \ | ? *` becomes `_`,
/// 2. each space becomes `_`,
/// 3. leading and trailing `.` and spaces are stripped,
/// 4. the result is cut to [`MAX_STEM_LENGTH`] characters.
///
/// ```
/// use wikidump_export::sanitize;
/// assert_eq!(sanitize("Page/with\\invalid:chars"), "Page_with_invalid_chars");
/// ```
pub fn sanitize(title: &str) -> String {
    let replaced: String = title.chars().map(|c| if c == ' ' || FORBIDDEN.contains(&c) { '_' } else { c }).collect();
    replaced.trim_matches(['.', ' ']).chars().take(MAX_STEM_LENGTH).collect()
}

/// Full filename for a page title: the sanitized stem plus `.text`.
///
/// ```
/// use wikidump_export::file_name;
/// assert_eq!(file_name("Normal Page"), "Normal_Page.text");
/// ```
pub fn file_name(title: &str) -> String {
    format!("{}.{EXTENSION}", sanitize(title))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("Normal Page", "Normal_Page")]
    #[case("Page/with\\invalid:chars", "Page_with_invalid_chars")]
    #[case("Page with spaces", "Page_with_spaces")]
    #[case("Page<>:\"/\\|?*", "Page_________")]
    #[case("...Dotted...", "Dotted")]
    #[case(". .Hidden. .", "_.Hidden._")]
    #[case("Main_Page", "Main_Page")]
    #[case("Ünïcödé Tïtle", "Ünïcödé_Tïtle")]
    #[case("", "")]
    fn test_sanitize(#[case] title: &str, #[case] expected: &str) {
        assert_eq!(sanitize(title), expected);
    }

    #[test]
    fn test_every_forbidden_character_is_replaced() {
        for c in FORBIDDEN {
            let title = format!("a{c}b");
            assert_eq!(sanitize(&title), "a_b", "character {c:?}");
        }
    }

    #[test]
    fn test_length_limit() {
        let title = format!("VeryLongTitle{}", "x".repeat(200));
        let stem = sanitize(&title);
        assert_eq!(stem, format!("VeryLongTitle{}", "x".repeat(187)));
        assert_eq!(stem.chars().count(), MAX_STEM_LENGTH);
    }

    #[test]
    fn test_length_limit_counts_characters() {
        // Multi-byte characters must not be split.
        let title = "ü".repeat(250);
        let stem = sanitize(&title);
        assert_eq!(stem.chars().count(), MAX_STEM_LENGTH);
        assert_eq!(stem.len(), MAX_STEM_LENGTH * 2);
    }

    #[test]
    fn test_truncation_happens_after_stripping() {
        let title = format!("...{}", "y".repeat(205));
        assert_eq!(sanitize(&title), "y".repeat(200));
    }

    #[test]
    fn test_collisions_are_not_disambiguated() {
        assert_eq!(file_name("A/B"), file_name("A:B"));
        assert_eq!(file_name("A B"), file_name("A_B"));
    }

    #[rstest]
    #[case("Normal Page", "Normal_Page.text")]
    #[case("Page<>:\"/\\|?*", "Page_________.text")]
    #[case("", ".text")]
    fn test_file_name(#[case] title: &str, #[case] expected: &str) {
        assert_eq!(file_name(title), expected);
    }
}
