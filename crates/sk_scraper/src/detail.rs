//! Extraction of body text and a best-effort publication timestamp from a
//! single article page.

use std::sync::Arc;

use chrono::NaiveDateTime;
use scraper::{Html, Selector};
use sk_core::{timestamp, ArticleDetail};
use tracing::warn;

use crate::client::PageFetcher;

pub struct DetailScraper {
    fetcher: Arc<dyn PageFetcher>,
}

impl DetailScraper {
    pub fn new(fetcher: Arc<dyn PageFetcher>) -> Self {
        Self { fetcher }
    }

    /// Fetch one article page. Never fails: a transport error degrades to an
    /// empty detail and the crawl moves on.
    pub async fn fetch_detail(&self, url: &str, reference_now: NaiveDateTime) -> ArticleDetail {
        match self.fetcher.fetch(url).await {
            Ok(body) => parse_detail(&body, reference_now),
            Err(e) => {
                warn!("failed to fetch article {}: {}", url, e);
                ArticleDetail::default()
            }
        }
    }
}

pub fn parse_detail(html: &str, reference_now: NaiveDateTime) -> ArticleDetail {
    let document = Html::parse_document(html);
    let paragraph_selector = Selector::parse("p").unwrap();

    // Main body: every non-empty paragraph of the content section, joined in
    // document order.
    let mut content = String::new();
    if let Ok(section_selector) = Selector::parse(r#"section[class*="t-single-news__content"]"#) {
        if let Some(section) = document.select(&section_selector).next() {
            let paragraphs = section
                .select(&paragraph_selector)
                .map(|p| p.text().collect::<String>().trim().to_string())
                .filter(|text| !text.is_empty())
                .collect::<Vec<_>>();
            content = paragraphs.join("\n");
        }
    }

    // The editorial take, when present, leads the content even if the main
    // section came up empty.
    if let Ok(take_selector) = Selector::parse(r#"section[class*="c-skift-take"]"#) {
        if let Some(take) = document.select(&take_selector).next() {
            if let Some(paragraph) = take.select(&paragraph_selector).next() {
                let take_text = paragraph.text().collect::<String>().trim().to_string();
                content = format!("{}\n{}", take_text, content);
            }
        }
    }

    let (timestamp_raw, timestamp_is_canonical) = byline_timestamp(&document, reference_now);

    ArticleDetail {
        content,
        timestamp_raw,
        timestamp_is_canonical,
    }
}

/// Byline timestamp, best match first: the time element's `datetime`
/// attribute verbatim, else its visible text run through the normalizer
/// (kept raw when normalization fails), else absent.
fn byline_timestamp(document: &Html, reference_now: NaiveDateTime) -> (Option<String>, bool) {
    let byline_selector = Selector::parse("div.c-byline__date").unwrap();
    let time_selector = Selector::parse("time").unwrap();

    if let Some(byline) = document.select(&byline_selector).next() {
        if let Some(time_el) = byline.select(&time_selector).next() {
            if let Some(datetime) = time_el.value().attr("datetime") {
                return (Some(datetime.to_string()), true);
            }
            let visible = time_el.text().collect::<String>().trim().to_string();
            if !visible.is_empty() {
                let raw = timestamp::normalize(&visible, reference_now).unwrap_or(visible);
                return (Some(raw), false);
            }
        }
    }

    (None, false)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn reference_now() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 1, 2)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap()
    }

    #[test]
    fn test_content_joins_paragraphs_in_order() {
        let html = r#"
            <section class="t-single-news__content t-single-news__content--wide">
              <p>First paragraph.</p>
              <p>   </p>
              <p>Second paragraph.</p>
            </section>
        "#;
        let detail = parse_detail(html, reference_now());
        assert_eq!(detail.content, "First paragraph.\nSecond paragraph.");
        assert_eq!(detail.timestamp_raw, None);
    }

    #[test]
    fn test_take_section_leads_the_content() {
        let html = r#"
            <section class="c-skift-take"><p>The take.</p><p>Second take para.</p></section>
            <section class="t-single-news__content"><p>Body.</p></section>
        "#;
        let detail = parse_detail(html, reference_now());
        assert_eq!(detail.content, "The take.\nBody.");
    }

    #[test]
    fn test_take_survives_missing_content_section() {
        let html = r#"<section class="c-skift-take"><p>Only the take.</p></section>"#;
        let detail = parse_detail(html, reference_now());
        assert_eq!(detail.content, "Only the take.\n");
    }

    #[test]
    fn test_datetime_attribute_is_canonical() {
        let html = r#"
            <div class="c-byline__date">
              <time datetime="2024-01-01T18:30:00+00:00">Yesterday at 6:30 PM GMT</time>
            </div>
        "#;
        let detail = parse_detail(html, reference_now());
        assert_eq!(
            detail.timestamp_raw.as_deref(),
            Some("2024-01-01T18:30:00+00:00")
        );
        assert!(detail.timestamp_is_canonical);
    }

    #[test]
    fn test_visible_text_goes_through_normalizer() {
        let html = r#"
            <div class="c-byline__date"><time>Yesterday at 10:10 PM GMT+5:30</time></div>
        "#;
        let detail = parse_detail(html, reference_now());
        assert_eq!(detail.timestamp_raw.as_deref(), Some("2024-01-01T22:10:00"));
        assert!(!detail.timestamp_is_canonical);
    }

    #[test]
    fn test_unparsable_visible_text_is_kept_raw() {
        let html = r#"<div class="c-byline__date"><time>sometime soon</time></div>"#;
        let detail = parse_detail(html, reference_now());
        assert_eq!(detail.timestamp_raw.as_deref(), Some("sometime soon"));
        assert!(!detail.timestamp_is_canonical);
    }

    #[test]
    fn test_no_byline_means_no_timestamp() {
        let detail = parse_detail("<p>bare page</p>", reference_now());
        assert_eq!(detail.timestamp_raw, None);
        assert!(!detail.timestamp_is_canonical);
    }
}
