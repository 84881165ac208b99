//! Chart blocks.
//!
//! The fence header holds the chart options, the body holds the dataset;
//! both are JSON and parsed independently:
//!
//! ````markdown
//! ```chart {"type": "bar", "title": "Visitors"}
//! {"labels": ["Mon", "Tue"], "datasets": [{"data": [3, 5]}]}
//! ```
//! ````

use std::sync::LazyLock;

use regex::Regex;
use serde_json::Value;

use crate::fence::fenced_blocks;
use crate::fragment::{Chart, Fragment};
use crate::header::{Header, header_pattern, parse_header};
use crate::scanner::{Match, Scanner};

/// Fence keyword for charts.
pub const CHART_KEYWORD: &str = "chart";

static HEADER_PATTERN: LazyLock<Regex> = LazyLock::new(|| header_pattern(CHART_KEYWORD));

/// Scanner for ```` ```chart {options} ```` blocks.
#[derive(Debug, Default, Clone, Copy)]
pub struct ChartScanner;

impl ChartScanner {
    /// Create a new scanner.
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl Scanner for ChartScanner {
    fn name(&self) -> &'static str {
        "chart"
    }

    fn find(&self, text: &str, warnings: &mut Vec<String>) -> Vec<Match> {
        let mut matches = Vec::new();

        for block in fenced_blocks(text) {
            let problem = match parse_header(&HEADER_PATTERN, block.info) {
                Header::NotMatched => continue,
                Header::Empty => "missing options header".to_owned(),
                Header::Malformed(error) => format!("invalid options JSON ({error})"),
                Header::Options(mut options) => match options.remove("type") {
                    Some(Value::String(chart_type)) if !chart_type.is_empty() => {
                        match serde_json::from_str::<Value>(block.body.trim()) {
                            Ok(data) => {
                                let chart = Chart {
                                    chart_type,
                                    data,
                                    options,
                                };
                                matches.push(Match::new(block.range, Fragment::Chart(chart)));
                                continue;
                            }
                            Err(error) => format!("invalid data JSON ({error})"),
                        }
                    }
                    _ => "options need a string \"type\"".to_owned(),
                },
            };

            tracing::debug!(%problem, "Malformed chart, keeping block as text");
            warnings.push(self.kept_as_text(block.range.start, &problem));
        }

        matches
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn find(input: &str) -> (Vec<Fragment>, Vec<String>) {
        let mut warnings = Vec::new();
        let fragments = ChartScanner::new()
            .find(input, &mut warnings)
            .into_iter()
            .map(|m| m.fragment)
            .collect();
        (fragments, warnings)
    }

    #[test]
    fn test_chart_parsed() {
        let input = "```chart {\"type\": \"line\", \"title\": \"Visits\"}\n{\"labels\": [\"a\"], \"datasets\": []}\n```";
        let fragments = ChartScanner::new().scan(input);
        assert_eq!(
            fragments,
            vec![Fragment::Chart(Chart {
                chart_type: "line".to_owned(),
                data: json!({"labels": ["a"], "datasets": []}),
                options: json!({"title": "Visits"}).as_object().unwrap().clone(),
            })]
        );
    }

    #[test]
    fn test_surrounding_text() {
        let input = "<p>a</p>```chart {\"type\":\"pie\"}\n[1, 2]\n```<p>b</p>";
        let fragments = ChartScanner::new().scan(input);
        assert_eq!(fragments.len(), 3);
        assert_eq!(fragments[0], Fragment::text("<p>a</p>"));
        assert_eq!(fragments[1].kind(), "chart");
        assert_eq!(fragments[2], Fragment::text("<p>b</p>"));
    }

    #[test]
    fn test_malformed_header_kept_as_text() {
        let input = "```chart {type: bar}\n[]\n```";
        let (fragments, warnings) = find(input);
        assert!(fragments.is_empty());
        assert!(warnings[0].contains("invalid options JSON"));
        assert_eq!(ChartScanner::new().scan(input), vec![Fragment::text(input)]);
    }

    #[test]
    fn test_missing_type_kept_as_text() {
        let (fragments, warnings) = find("```chart {\"title\": \"x\"}\n[]\n```");
        assert!(fragments.is_empty());
        assert!(warnings[0].contains("\"type\""));
    }

    #[test]
    fn test_missing_header_kept_as_text() {
        let (fragments, warnings) = find("```chart\n[]\n```");
        assert!(fragments.is_empty());
        assert!(warnings[0].contains("missing options header"));
    }

    #[test]
    fn test_malformed_data_kept_as_text() {
        let (fragments, warnings) = find("```chart {\"type\": \"bar\"}\n{not json\n```");
        assert!(fragments.is_empty());
        assert!(warnings[0].contains("invalid data JSON"));
    }

    #[test]
    fn test_non_chart_fence_ignored_silently() {
        let (fragments, warnings) = find("```rust\nfn main() {}\n```");
        assert!(fragments.is_empty());
        assert!(warnings.is_empty());
    }
}
