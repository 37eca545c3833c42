//! Heading-bounded section extraction and line-limit truncation.
//!
//! The companion documents follow a constrained heading convention, so
//! sections are located by scanning heading lines rather than building a
//! markdown tree.

/// Returns the text after `line`'s `#` prefix of exactly `level` hashes,
/// or `None` if the line is not a heading of that level.
fn heading_rest(line: &str, level: usize) -> Option<&str> {
    let hashes = line.bytes().take_while(|b| *b == b'#').count();
    if hashes != level {
        return None;
    }
    let rest = &line[level..];
    (rest.is_empty() || rest.starts_with(char::is_whitespace)).then_some(rest)
}

/// `## [<digits>[.]] <name>...`, matched case-insensitively.
fn heading_names(line: &str, level: usize, name: &str) -> bool {
    let Some(rest) = heading_rest(line, level) else {
        return false;
    };
    if !rest.starts_with(char::is_whitespace) {
        return false;
    }
    let name = name.to_lowercase();
    let rest = rest.trim_start();
    if rest.to_lowercase().starts_with(&name) {
        return true;
    }
    let rest = rest.trim_start_matches(|c: char| c.is_ascii_digit());
    let rest = rest.strip_prefix('.').unwrap_or(rest).trim_start();
    rest.to_lowercase().starts_with(&name)
}

fn extract(content: &str, level: usize, name: &str, ends_at: &[usize]) -> String {
    let mut lines = content.split_inclusive('\n');
    let found = lines.by_ref().any(|raw| {
        let line = raw.trim_end_matches(['\n', '\r']);
        raw.ends_with('\n') && heading_names(line, level, name)
    });
    if !found {
        return String::new();
    }

    let mut body = String::new();
    for raw in lines {
        let line = raw.trim_end_matches(['\n', '\r']);
        if ends_at.iter().any(|level| heading_rest(line, *level).is_some()) {
            break;
        }
        body.push_str(raw);
    }
    body.trim().to_string()
}

/// Extracts the body of the level-2 section called `name`.
///
/// Matches `## Name` and `## 1. Name` case-insensitively and returns the
/// trimmed text up to the next level-2 heading. Returns an empty string when
/// the heading is absent.
#[must_use]
pub fn extract_section(content: &str, name: &str) -> String {
    extract(content, 2, name, &[2])
}

/// Extracts the body of the level-3 subsection called `name`.
///
/// Stops at the next level-3 or level-2 heading, so the result never leaks
/// into a sibling subsection or the following section.
#[must_use]
pub fn extract_subsection(content: &str, name: &str) -> String {
    extract(content, 3, name, &[3, 2])
}

/// Cuts `content` down to `max_lines` lines.
///
/// Returns the content and whether it was truncated. Truncated content ends
/// with a blank line and a `*...(<n> more lines)*` marker.
#[must_use]
pub fn truncate_content(content: &str, max_lines: usize) -> (String, bool) {
    if content.is_empty() {
        return (String::new(), false);
    }
    let lines: Vec<&str> = content.split('\n').collect();
    if lines.len() <= max_lines {
        return (content.to_string(), false);
    }
    let remaining = lines.len() - max_lines;
    let mut kept = lines[..max_lines].join("\n");
    kept.push_str(&format!("\n\n*...({remaining} more lines)*"));
    (kept, true)
}

#[cfg(test)]
mod tests {
    use super::*;

    const PLAN: &str = "# Plan

## 1. Architecture Overview
Main architecture description.

### Component A
Details about A.

### Component B
Details about B.

## 2. Target State
Everything is modular.

## Other Section
Other content.
";

    #[test]
    fn name_may_start_with_digits() {
        let content = "## 2024 Roadmap\nbody\n## Next\nother\n";
        assert_eq!(extract_section(content, "2024 Roadmap"), "body");
        let numbered = "## 3. 2024 Roadmap\nplan\n";
        assert_eq!(extract_section(numbered, "2024 Roadmap"), "plan");
    }

    #[test]
    fn extracts_simple_section() {
        let content = "# Doc\n\n## Overview\nThis is the overview.\nIt spans lines.\n\n## Next\nDifferent.\n";
        let result = extract_section(content, "Overview");
        assert_eq!(result, "This is the overview.\nIt spans lines.");
    }

    #[test]
    fn numbered_heading_and_nested_subsections() {
        let result = extract_section(PLAN, "Architecture Overview");
        assert!(result.starts_with("Main architecture description."));
        assert!(result.contains("### Component B"));
        assert!(!result.contains("Everything is modular."));
        assert!(!result.contains("Other content."));
    }

    #[test]
    fn name_prefix_matches_longer_heading() {
        let result = extract_section(PLAN, "Architecture");
        assert!(result.starts_with("Main architecture description."));
    }

    #[test]
    fn match_is_case_insensitive() {
        let content = "## OVERVIEW\nUppercase content.\n\n## Next\nMore.\n";
        assert_eq!(extract_section(content, "overview"), "Uppercase content.");
    }

    #[test]
    fn missing_section_is_empty() {
        assert_eq!(extract_section("## Introduction\nText.\n", "Overview"), "");
        assert_eq!(extract_section("", "Overview"), "");
        assert_eq!(extract_subsection("No headers, just text.", "Description"), "");
    }

    #[test]
    fn level_three_heading_is_not_a_section() {
        assert_eq!(extract_section("### Overview\nNested only.\n", "Overview"), "");
    }

    #[test]
    fn subsection_stops_at_sibling() {
        let result = extract_subsection(PLAN, "Component A");
        assert_eq!(result, "Details about A.");
    }

    #[test]
    fn subsection_stops_at_next_section() {
        let content = "## A\n### Inner\nInner text.\n## B\nOuter text.\n";
        assert_eq!(extract_subsection(content, "Inner"), "Inner text.");
    }

    #[test]
    fn truncate_short_content_unchanged() {
        let content = "Line 1\nLine 2\nLine 3";
        assert_eq!(truncate_content(content, 10), (content.to_string(), false));
    }

    #[test]
    fn truncate_boundary() {
        let exact: Vec<String> = (0..5).map(|i| format!("Line {i}")).collect();
        let exact = exact.join("\n");
        assert_eq!(truncate_content(&exact, 5), (exact.clone(), false));

        let over = format!("{exact}\nLine 5");
        let (result, truncated) = truncate_content(&over, 5);
        assert!(truncated);
        assert_eq!(result, format!("{exact}\n\n*...(1 more lines)*"));
        assert_eq!(result.lines().filter(|l| l.starts_with("Line")).count(), 5);
    }

    #[test]
    fn truncate_reports_remainder() {
        let content: Vec<String> = (0..100).map(|i| format!("Line {i}")).collect();
        let (result, truncated) = truncate_content(&content.join("\n"), 10);
        assert!(truncated);
        assert_eq!(result.lines().count(), 12);
        assert!(result.ends_with("*...(90 more lines)*"));
    }

    #[test]
    fn truncate_empty() {
        assert_eq!(truncate_content("", 10), (String::new(), false));
    }
}
