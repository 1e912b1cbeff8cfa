//! Shared utility functions.

use unicode_segmentation::UnicodeSegmentation;

/// Truncates a string to at most `max_graphemes` user-perceived characters,
/// ending with an ellipsis when anything was cut.
///
/// Limits too small to hold the ellipsis cut without one.
pub fn truncate_string(input: &str, max_graphemes: usize) -> String {
    let graphemes: Vec<&str> = input.graphemes(true).collect();
    if graphemes.len() <= max_graphemes {
        return input.to_string();
    }
    if max_graphemes < 3 {
        return graphemes[..max_graphemes].concat();
    }
    let keep = max_graphemes - 3;
    let mut out: String = graphemes[..keep].concat();
    out.push_str("...");
    out
}

/// One-line preview of a possibly long, multi-line text, for log output.
///
/// Never longer than `max_graphemes`. A ` …` marks dropped lines when it
/// fits after the first line.
pub fn preview(input: &str, max_graphemes: usize) -> String {
    let trimmed = input.trim_start();
    let first_line = trimmed.lines().next().unwrap_or_default();
    let more_lines = first_line.len() < trimmed.trim_end().len();
    if more_lines && first_line.graphemes(true).count() + 2 <= max_graphemes {
        format!("{first_line} …")
    } else {
        truncate_string(first_line, max_graphemes)
    }
}

/// Reads an environment variable, treating blank values as unset.
pub fn env_var_nonempty(name: &str) -> Option<String> {
    std::env::var(name)
        .ok()
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_truncate_string() {
        let input = "This is a very long string that should be truncated";
        let truncated = truncate_string(input, 20);
        assert_eq!(truncated, "This is a very lo...");

        let short = "Short";
        let not_truncated = truncate_string(short, 20);
        assert_eq!(not_truncated, "Short");
    }

    #[test]
    fn test_truncate_string_multibyte() {
        // Curly quotes from the terms text are three bytes each.
        let input = "“Terms” of “Use”";
        assert_eq!(truncate_string(input, 10), "“Terms”...");
    }

    #[test]
    fn test_preview_multiline() {
        let text = "\nIris Wallet is intended to be used to test.\n\nSee the help page.";
        assert_eq!(preview(text, 80), "Iris Wallet is intended to be used to test. …");
        assert_eq!(preview("Accept", 80), "Accept");
    }

    #[test]
    fn test_truncate_below_ellipsis_width() {
        assert_eq!(truncate_string("Accept", 0), "");
        assert_eq!(truncate_string("Accept", 1), "A");
        assert_eq!(truncate_string("“Use”", 2), "“U");
        assert_eq!(truncate_string("Accept", 3), "...");
    }

    #[test]
    fn test_preview_stays_within_limit() {
        let text = "Backup completed\nYour wallet is safe.";
        assert_eq!(preview(text, 18), "Backup completed …");
        assert_eq!(preview(text, 17), "Backup completed");
        assert_eq!(preview(text, 10), "Backup ...");
        assert_eq!(preview(text, 1), "B");
    }

    proptest! {
        #[test]
        fn truncate_never_exceeds_limit(s in "[a-zA-Z0-9 .“”é]{0,64}", max in 0usize..40) {
            let out = truncate_string(&s, max);
            prop_assert!(out.graphemes(true).count() <= max);
        }

        #[test]
        fn preview_never_exceeds_limit(s in "[a-zA-Z0-9 .“”é\n]{0,64}", max in 0usize..40) {
            let out = preview(&s, max);
            prop_assert!(out.graphemes(true).count() <= max);
        }
    }
}
