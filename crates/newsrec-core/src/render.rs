//! Projection of [`ViewState`] into results-region markup
//!
//! Rendering is a pure function of the state and the config. Articles are
//! first mapped to [`ArticleCard`] view models, which apply every fallback
//! rule, and only then written out. All user and service text is escaped
//! on the way into markup, and URLs with unexpected schemes are dropped.

use std::fmt::Write;

use crate::config::RendererConfig;
use crate::model::Article;
use crate::view::{Fragment, ViewState};

pub const UNTITLED: &str = "Untitled Article";
pub const DEFAULT_CATEGORY: &str = "General";
pub const NO_DESCRIPTION: &str = "No description available.";
pub const FALLBACK_LINK: &str = "#";

/// Display-ready article, one per list item.
#[derive(Debug, Clone, PartialEq)]
pub struct ArticleCard {
    pub title: String,
    pub href: String,
    pub score_label: String,
    pub category: String,
    pub description: String,
    pub image_src: String,
    pub delay_ms: u64,
}

impl ArticleCard {
    pub fn from_article(article: &Article, index: usize, config: &RendererConfig) -> Self {
        let href = present(&article.link)
            .and_then(safe_url)
            .unwrap_or(FALLBACK_LINK)
            .to_string();
        let image_src = present(&article.image_url)
            .and_then(safe_url)
            .unwrap_or(config.placeholder_image.as_str())
            .to_string();

        Self {
            title: present(&article.title).unwrap_or(UNTITLED).to_string(),
            href,
            score_label: format!("{}% Match", format_score(article.similarity_score)),
            category: present(&article.category)
                .unwrap_or(DEFAULT_CATEGORY)
                .to_string(),
            description: describe(article, config.snippet_chars),
            image_src,
            delay_ms: index as u64 * u64::from(config.stagger_ms),
        }
    }

    fn write_markup(&self, out: &mut String, placeholder_image: &str) {
        let href = escape_attr(&self.href);
        let _ = write!(
            out,
            concat!(
                r#"<li style="animation-delay: {delay}ms">"#,
                r#"<div class="flex">"#,
                r#"<img src="{img}" alt="Article image" class="article-image" "#,
                r#"onerror="this.onerror=null;this.src='{placeholder}';" />"#,
                r#"<div class="article-details">"#,
                r#"<div class="news-header">"#,
                r#"<strong><a href="{href}" target="_blank" rel="noopener noreferrer">{title}</a></strong> "#,
                r#"<span class="score">{score}</span>"#,
                r#"</div>"#,
                r#"<span class="category-tag">📂 {category}</span>"#,
                r#"<p class="content-snippet">{description}</p>"#,
                r#"<a href="{href}" target="_blank" rel="noopener noreferrer" class="read-more">Read Full Article →</a>"#,
                r#"</div></div></li>"#
            ),
            delay = self.delay_ms,
            img = escape_attr(&self.image_src),
            placeholder = escape_attr(placeholder_image),
            href = href,
            title = escape_text(&self.title),
            score = escape_text(&self.score_label),
            category = escape_text(&self.category),
            description = escape_text(&self.description),
        );
    }
}

/// Render the whole results region for `state`.
pub fn render(state: &ViewState, config: &RendererConfig) -> Fragment {
    let mut out = String::new();

    match state {
        ViewState::AwaitingInput { rejected: false } => {
            write_header(&mut out, config, None);
            out.push_str(
                r#"<p class="results-placeholder">Enter your interests above to see personalized stories.</p>"#,
            );
        }
        ViewState::AwaitingInput { rejected: true } => {
            write_header(&mut out, config, None);
            out.push_str(
                r#"<p class="error">⚠️ Please enter your news interests before searching.</p>"#,
            );
        }
        ViewState::Loading { query } => {
            write_header(&mut out, config, None);
            let _ = write!(
                out,
                r#"<p class="loading-message">🔍 Analyzing "{}" using semantic search...</p><div class="loading-spinner"></div>"#,
                escape_text(query.as_str())
            );
        }
        ViewState::EmptyResult { query } => {
            write_header(&mut out, config, Some(""));
            let _ = write!(
                out,
                concat!(
                    r#"<p class="results-placeholder">No matching articles found for "<strong>{}</strong>". "#,
                    r#"<br>Try a different search query or browse popular topics above!</p>"#
                ),
                escape_text(query.as_str())
            );
        }
        ViewState::Populated { articles, .. } => {
            write_header(&mut out, config, Some(&count_label(articles.len())));
            out.push_str("<ul>");
            for (index, article) in articles.iter().enumerate() {
                ArticleCard::from_article(article, index, config)
                    .write_markup(&mut out, &config.placeholder_image);
            }
            out.push_str("</ul>");
        }
        ViewState::ServerError { message } => {
            write_header(&mut out, config, Some(""));
            let _ = write!(
                out,
                r#"<p class="error">❌ Server Error: {}</p>"#,
                escape_text(message)
            );
        }
        ViewState::NetworkError { message } => {
            write_header(&mut out, config, None);
            let _ = write!(
                out,
                concat!(
                    r#"<p class="error">❌ A network error occurred or the server is unavailable. "#,
                    r#"<br>Please try again in a moment. <br><small>({})</small></p>"#
                ),
                escape_text(message)
            );
        }
    }

    Fragment::new(out)
}

fn write_header(out: &mut String, config: &RendererConfig, count: Option<&str>) {
    let _ = write!(
        out,
        r#"<div class="results-header"><h2>{}</h2>"#,
        escape_text(&config.header_title)
    );
    if let Some(count) = count {
        let _ = write!(
            out,
            r#"<div class="results-count" id="{}">{}</div>"#,
            escape_attr(&config.count_id),
            escape_text(count)
        );
    }
    out.push_str("</div>");
}

/// `"1 Article Found"`, `"5 Articles Found"`
pub fn count_label(n: usize) -> String {
    let noun = if n == 1 { "Article" } else { "Articles" };
    format!("{} {} Found", n, noun)
}

/// Fractional score as a percentage with one decimal, the way JavaScript's
/// `(score * 100).toFixed(1)` prints it: the exact binary value of the
/// percentage is rounded, and exact ties go away from zero.
pub fn format_score(score: f64) -> String {
    let percent = score * 100.0;
    if percent.is_nan() {
        return "NaN".to_string();
    }
    if percent.is_infinite() {
        return if percent > 0.0 { "Infinity" } else { "-Infinity" }.to_string();
    }
    if percent == 0.0 {
        return "0.0".to_string();
    }

    // Only odd multiples of 0.25 sit exactly between two tenths; `{:.1}`
    // sends those to the even neighbour.
    let quarters = percent * 4.0;
    if quarters.abs() < 1e15 && quarters.fract() == 0.0 && (quarters as i64) % 2 != 0 {
        let sign = if percent < 0.0 { "-" } else { "" };
        let tenths = (percent.abs() * 10.0).ceil() as u64;
        return format!("{}{}.{}", sign, tenths / 10, tenths % 10);
    }
    format!("{:.1}", percent)
}

/// Summary, else a prefix of content with an ellipsis, else a placeholder.
pub fn describe(article: &Article, snippet_chars: usize) -> String {
    if let Some(summary) = present(&article.summary) {
        return summary.to_string();
    }
    match present(&article.content) {
        Some(content) => {
            let mut snippet: String = content.chars().take(snippet_chars).collect();
            snippet.push_str("...");
            snippet
        }
        None => NO_DESCRIPTION.to_string(),
    }
}

/// Empty strings count as missing.
fn present(field: &Option<String>) -> Option<&str> {
    field.as_deref().filter(|s| !s.is_empty())
}

/// Accept http(s), scheme-relative, and plain relative URLs. Anything with
/// another scheme (`javascript:`, `data:`) is rejected.
pub fn safe_url(raw: &str) -> Option<&str> {
    let url = raw.trim();
    if url.is_empty() {
        return None;
    }
    match url.find([':', '/', '?', '#']) {
        Some(pos) if url.as_bytes()[pos] == b':' => {
            let scheme = url[..pos].to_ascii_lowercase();
            matches!(scheme.as_str(), "http" | "https").then_some(url)
        }
        _ => Some(url),
    }
}

/// Escape for element text content.
pub fn escape_text(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            _ => out.push(c),
        }
    }
    out
}

/// Escape for a double-quoted attribute value.
pub fn escape_attr(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}
