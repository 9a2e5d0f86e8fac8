//! Property-based tests for newsrec-core
//!
//! Input validation, score formatting and description fallbacks.

#[path = "common/fakes.rs"]
mod fakes;

use fakes::{renderer, ScriptedTransport};
use newsrec_core::render::{describe, format_score, ArticleCard};
use newsrec_core::{Article, Query, RendererConfig, ViewState};
use proptest::prelude::*;

/// Strings made only of whitespace, including the empty string
fn blank_input() -> impl Strategy<Value = String> {
    "[ \t\r\n\u{00A0}\u{2003}]{0,20}"
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    // ============================================================
    // Empty input never reaches the network
    // ============================================================

    #[test]
    fn blank_input_is_rejected_locally(input in blank_input()) {
        let renderer = renderer(ScriptedTransport::default());
        renderer.input().type_text(&input);

        prop_assert!(renderer.begin_search().is_none());
        prop_assert!(renderer.transport().calls().is_empty());
        prop_assert_eq!(renderer.state(), ViewState::AwaitingInput { rejected: true });
        prop_assert!(renderer.results().current().contains("Please enter your news interests"));
    }

    #[test]
    fn non_blank_input_is_accepted_trimmed(
        pad_left in "[ \t]{0,5}",
        text in "[a-zA-Z0-9][a-zA-Z0-9 ]{0,30}[a-zA-Z0-9]",
        pad_right in "[ \t\n]{0,5}"
    ) {
        let raw = format!("{}{}{}", pad_left, text, pad_right);
        let query = Query::parse(&raw).unwrap();
        prop_assert_eq!(query.as_str(), text.as_str());
    }

    // ============================================================
    // Score formatting
    // ============================================================

    #[test]
    fn score_has_one_decimal_and_is_close(score in 0.0f64..=1.0) {
        let formatted = format_score(score);
        let (_, decimals) = formatted.split_once('.').unwrap();
        prop_assert_eq!(decimals.len(), 1);

        let value: f64 = formatted.parse().unwrap();
        prop_assert!((value - score * 100.0).abs() <= 0.05 + 1e-9);
    }

    #[test]
    fn score_label_reads_match(score in 0.0f64..=1.0) {
        let card = ArticleCard::from_article(&Article::with_score(score), 0, &RendererConfig::default());
        prop_assert!(card.score_label.ends_with("% Match"));
        let expected = format!("{}% Match", format_score(score));
        prop_assert_eq!(card.score_label, expected);
    }

    // ============================================================
    // Description fallback
    // ============================================================

    #[test]
    fn summary_always_wins(summary in ".{1,100}", content in ".{0,300}") {
        let mut article = Article::with_score(0.5);
        article.summary = Some(summary.clone());
        article.content = Some(content);
        prop_assert_eq!(describe(&article, 180), summary);
    }

    #[test]
    fn content_snippet_is_bounded(content in ".{1,400}") {
        let mut article = Article::with_score(0.5);
        article.content = Some(content.clone());
        let description = describe(&article, 180);

        prop_assert!(description.ends_with("..."));
        let body = description.strip_suffix("...").unwrap();
        prop_assert!(body.chars().count() <= 180);
        prop_assert!(content.starts_with(body));
    }

    // ============================================================
    // Ordering and count
    // ============================================================

    #[test]
    fn stagger_grows_with_position(index in 0usize..50) {
        let config = RendererConfig::default();
        let card = ArticleCard::from_article(&Article::with_score(0.1), index, &config);
        prop_assert_eq!(card.delay_ms, index as u64 * 100);
    }
}
