// SPDX-License-Identifier: MPL-2.0
//! Wikipedia summary lookup.
//!
//! One HTTP request per search against the REST summary endpoint of the
//! Wikipedia edition matching the active UI language. Every failure mode
//! (missing page, transport error, malformed response) collapses to "no
//! summary", echoing the query back as the title so the popup can still
//! show something. No retries, no caching.

use serde::Deserialize;

/// Result of one encyclopedia lookup. Transient: shown in the popup and
/// never retained in application state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LookupResult {
    pub title: String,
    pub summary: Option<String>,
}

/// The fields we consume from the REST summary payload.
#[derive(Debug, Clone, Deserialize)]
pub struct PageSummary {
    pub title: Option<String>,
    pub extract: Option<String>,
}

/// Shared HTTP client with the fixed identification string.
#[derive(Debug, Clone)]
pub struct WikiClient {
    client: reqwest::Client,
}

impl Default for WikiClient {
    fn default() -> Self {
        Self::new()
    }
}

impl WikiClient {
    #[must_use]
    pub fn new() -> Self {
        let client = reqwest::Client::builder()
            .redirect(reqwest::redirect::Policy::limited(10))
            .user_agent(concat!(
                "WildLens/",
                env!("CARGO_PKG_VERSION"),
                " (https://codeberg.org/wildlens/wildlens)"
            ))
            .build()
            .unwrap_or_else(|_| reqwest::Client::new());

        Self { client }
    }

    /// Fetches the summary of `query` from the `lang` Wikipedia edition.
    ///
    /// A single attempt; failures are logged and reported as a missing
    /// summary, indistinguishable from a page that does not exist.
    pub async fn fetch_summary(&self, query: &str, lang: &str) -> LookupResult {
        match self.try_fetch(query, lang).await {
            Ok(summary) => result_from_summary(query, summary),
            Err(e) => {
                eprintln!("Wikipedia lookup failed for '{query}' ({lang}): {e}");
                result_from_summary(query, None)
            }
        }
    }

    async fn try_fetch(
        &self,
        query: &str,
        lang: &str,
    ) -> Result<Option<PageSummary>, Box<dyn std::error::Error + Send + Sync>> {
        let url = summary_url(query, lang)?;

        let response = self.client.get(url).send().await?;
        if response.status() == reqwest::StatusCode::NOT_FOUND {
            return Ok(None);
        }
        if !response.status().is_success() {
            return Err(format!("HTTP status: {}", response.status()).into());
        }

        Ok(Some(response.json::<PageSummary>().await?))
    }
}

/// Builds the REST summary URL, percent-encoding the page title.
fn summary_url(
    query: &str,
    lang: &str,
) -> Result<reqwest::Url, Box<dyn std::error::Error + Send + Sync>> {
    if lang.is_empty() || !lang.chars().all(|c| c.is_ascii_alphanumeric() || c == '-') {
        return Err(format!("invalid language code: {lang}").into());
    }

    let mut url = reqwest::Url::parse(&format!(
        "https://{lang}.wikipedia.org/api/rest_v1/page/summary/"
    ))?;
    url.path_segments_mut()
        .map_err(|()| "cannot-be-a-base URL")?
        .pop_if_empty()
        .push(query);

    Ok(url)
}

/// Maps an optional payload onto the result contract: the query is always
/// echoed back when no usable summary exists.
fn result_from_summary(query: &str, summary: Option<PageSummary>) -> LookupResult {
    match summary {
        Some(page) => {
            let extract = page.extract.filter(|s| !s.trim().is_empty());
            match extract {
                Some(text) => LookupResult {
                    title: page.title.unwrap_or_else(|| query.to_string()),
                    summary: Some(text),
                },
                None => LookupResult {
                    title: query.to_string(),
                    summary: None,
                },
            }
        }
        None => LookupResult {
            title: query.to_string(),
            summary: None,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn url_scopes_to_language_edition() {
        let url = summary_url("Zebra", "en").expect("valid url");
        assert_eq!(
            url.as_str(),
            "https://en.wikipedia.org/api/rest_v1/page/summary/Zebra"
        );
    }

    #[test]
    fn url_percent_encodes_title() {
        let url = summary_url("Grant's zebra", "en").expect("valid url");
        assert!(url.as_str().ends_with("/Grant's%20zebra")
            || url.as_str().ends_with("/Grant%27s%20zebra"));
    }

    #[test]
    fn url_rejects_bogus_language() {
        assert!(summary_url("Zebra", "en/evil").is_err());
        assert!(summary_url("Zebra", "").is_err());
    }

    #[test]
    fn missing_page_echoes_query() {
        let result = result_from_summary("Nonexistent Page Xyzzy123", None);
        assert_eq!(result.title, "Nonexistent Page Xyzzy123");
        assert_eq!(result.summary, None);
    }

    #[test]
    fn found_page_uses_canonical_title() {
        let payload: PageSummary = serde_json::from_str(
            r#"{"title": "Zebra", "extract": "Zebras are African equines."}"#,
        )
        .expect("valid json");
        let result = result_from_summary("zebra", Some(payload));
        assert_eq!(result.title, "Zebra");
        assert_eq!(result.summary.as_deref(), Some("Zebras are African equines."));
    }

    #[test]
    fn empty_extract_counts_as_not_found() {
        let payload: PageSummary =
            serde_json::from_str(r#"{"title": "Zebra", "extract": "  "}"#).expect("valid json");
        let result = result_from_summary("zebra", Some(payload));
        assert_eq!(result.title, "zebra");
        assert_eq!(result.summary, None);
    }

    #[test]
    fn payload_tolerates_missing_fields() {
        let payload: PageSummary = serde_json::from_str(r#"{}"#).expect("valid json");
        let result = result_from_summary("okapi", Some(payload));
        assert_eq!(result.title, "okapi");
        assert_eq!(result.summary, None);
    }
}
