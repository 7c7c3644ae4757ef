//! Output formatting for query results.

use anyhow::Result;
use clap::ValueEnum;

use spherepath_lib::PathSummary;

/// Supported renderings of a query result.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable listing.
    #[default]
    Text,
    /// Pretty-printed JSON document.
    Json,
}

impl OutputFormat {
    pub fn render(self, summary: &PathSummary) -> Result<String> {
        match self {
            OutputFormat::Text => Ok(summary.render_plain()),
            OutputFormat::Json => {
                let mut rendered = serde_json::to_string_pretty(summary)?;
                rendered.push('\n');
                Ok(rendered)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn summary() -> PathSummary {
        PathSummary {
            source: 1,
            destination: 3,
            found: true,
            hops: 2,
            steps: vec![1, 2, 3],
            cost: Some(2.5),
        }
    }

    #[test]
    fn json_output_is_parseable() {
        let rendered = OutputFormat::Json.render(&summary()).expect("render json");
        let value: serde_json::Value = serde_json::from_str(&rendered).expect("valid json");
        assert_eq!(value["steps"], serde_json::json!([1, 2, 3]));
        assert_eq!(value["cost"], serde_json::json!(2.5));
    }

    #[test]
    fn text_output_lists_steps() {
        let rendered = OutputFormat::Text.render(&summary()).expect("render text");
        assert!(rendered.contains("  1: 2"));
        assert!(rendered.contains("Cost: 2.5"));
    }
}
