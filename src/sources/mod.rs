//! Catalog gateway: the one outbound HTTP surface of the crate.
//!
//! Wraps GET `https://itunes.apple.com/search` behind [`Catalog::search`],
//! normalizing request parameters and classifying transport and HTTP failures
//! into [`SearchError`] variants. Blank search terms short-circuit to an empty
//! page without touching the network.

pub mod error;

use std::sync::LazyLock;
use std::time::Duration;

use tracing::{debug, warn};

pub use error::SearchError;

use crate::state::{Entity, SearchPage};

/// Catalog search endpoint.
const SEARCH_ENDPOINT: &str = "https://itunes.apple.com/search";
/// Outbound request timeout.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);
/// Limit applied when the caller does not request one.
pub const DEFAULT_LIMIT: u32 = 50;
/// Hard cap on the requested result count.
pub const MAX_LIMIT: u32 = 200;

/// Normalized set of search parameters sent to the catalog API.
///
/// Only `term` and `entity` are required; the remaining fields fall back to
/// the catalog defaults when unset (attribute `artistTerm`, limit
/// [`DEFAULT_LIMIT`], media `music`, country `US`).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SearchCriteria {
    /// Raw search term; trimmed before use.
    pub term: String,
    /// Entity category filter.
    pub entity: Entity,
    /// Attribute to match the term against.
    pub attribute: Option<String>,
    /// Requested result count; clamped to `1..=MAX_LIMIT`.
    pub limit: Option<u32>,
    /// Media kind.
    pub media: Option<String>,
    /// Two-letter storefront country code.
    pub country: Option<String>,
}

impl SearchCriteria {
    /// Criteria for `term` and `entity` with all other parameters defaulted.
    #[must_use]
    pub fn new(term: impl Into<String>, entity: Entity) -> Self {
        Self {
            term: term.into(),
            entity,
            attribute: None,
            limit: None,
            media: None,
            country: None,
        }
    }

    /// Effective result limit after defaulting and clamping to `1..=MAX_LIMIT`.
    #[must_use]
    pub fn effective_limit(&self) -> u32 {
        self.limit.unwrap_or(DEFAULT_LIMIT).clamp(1, MAX_LIMIT)
    }

    /// Normalized query parameters for the outbound request.
    ///
    /// The term is trimmed and the optional fields are resolved to the catalog
    /// defaults.
    #[must_use]
    pub fn query_params(&self) -> [(&'static str, String); 6] {
        [
            ("term", self.term.trim().to_string()),
            ("entity", self.entity.as_key().to_string()),
            (
                "attribute",
                self.attribute
                    .clone()
                    .unwrap_or_else(|| "artistTerm".to_string()),
            ),
            ("limit", self.effective_limit().to_string()),
            (
                "media",
                self.media.clone().unwrap_or_else(|| "music".to_string()),
            ),
            (
                "country",
                self.country.clone().unwrap_or_else(|| "US".to_string()),
            ),
        ]
    }
}

/// Catalog search abstraction consumed by the search state manager.
///
/// The live implementation is [`CatalogClient`]; tests substitute scripted
/// fakes so state transitions never touch the network.
#[allow(async_fn_in_trait)]
pub trait Catalog {
    /// Execute one catalog search.
    ///
    /// # Errors
    ///
    /// Returns a classified [`SearchError`] for transport failures, non-2xx
    /// statuses, and malformed response bodies.
    async fn search(&self, criteria: SearchCriteria) -> Result<SearchPage, SearchError>;
}

/// Shared HTTP client with connection pooling for catalog requests.
/// Connection pooling is enabled by default in `reqwest::Client`.
static HTTP_CLIENT: LazyLock<reqwest::Client> = LazyLock::new(|| {
    reqwest::Client::builder()
        .timeout(REQUEST_TIMEOUT)
        .user_agent(concat!("tunescout/", env!("CARGO_PKG_VERSION")))
        .build()
        .expect("Failed to create HTTP client")
});

/// Live catalog client over the shared pooled HTTP client.
#[derive(Clone, Debug)]
pub struct CatalogClient {
    /// Endpoint URL; fixed in production, overridable for local test servers.
    url: String,
}

impl CatalogClient {
    /// Client against the production search endpoint.
    #[must_use]
    pub fn new() -> Self {
        Self {
            url: SEARCH_ENDPOINT.to_string(),
        }
    }

    /// Client against an alternate endpoint (e.g., a local fixture server).
    #[must_use]
    pub const fn with_endpoint(url: String) -> Self {
        Self { url }
    }
}

impl Default for CatalogClient {
    fn default() -> Self {
        Self::new()
    }
}

impl Catalog for CatalogClient {
    async fn search(&self, criteria: SearchCriteria) -> Result<SearchPage, SearchError> {
        if criteria.term.trim().is_empty() {
            // Blank terms never hit the network.
            return Ok(SearchPage::default());
        }
        let params = criteria.query_params();
        debug!(term = %params[0].1, entity = %criteria.entity, limit = %params[3].1, "catalog search");

        let response = match HTTP_CLIENT.get(&self.url).query(&params).send().await {
            Ok(r) => r,
            Err(e) if e.is_timeout() => {
                warn!(error = %e, "catalog request timed out");
                return Err(SearchError::Timeout);
            }
            Err(e) => {
                warn!(error = %e, "catalog request failed before a response arrived");
                return Err(SearchError::NetworkUnreachable);
            }
        };

        let status = response.status();
        if !status.is_success() {
            warn!(status = status.as_u16(), "catalog responded with an error status");
            return Err(SearchError::from_status(status.as_u16()));
        }

        match response.json::<SearchPage>().await {
            Ok(page) => {
                debug!(result_count = page.result_count, "catalog search succeeded");
                Ok(page)
            }
            Err(e) if e.is_timeout() => Err(SearchError::Timeout),
            Err(e) => {
                warn!(error = %e, "catalog response body was not the expected shape");
                Err(SearchError::InvalidResponse)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{Catalog, CatalogClient, MAX_LIMIT, SearchCriteria, SearchError};
    use crate::state::Entity;
    use mockito::Matcher;

    #[test]
    /// What: Query parameter normalization applies defaults, trimming, and clamping
    ///
    /// - Input: Criteria with a padded term and no optional fields; criteria
    ///   with limit 300
    /// - Output: Trimmed term, `artistTerm`/`music`/`US` defaults, limit 50;
    ///   limit clamped to 200
    fn query_params_normalization() {
        let criteria = SearchCriteria::new("  test  ", Entity::Album);
        let params = criteria.query_params();
        assert_eq!(params[0], ("term", "test".to_string()));
        assert_eq!(params[1], ("entity", "album".to_string()));
        assert_eq!(params[2], ("attribute", "artistTerm".to_string()));
        assert_eq!(params[3], ("limit", "50".to_string()));
        assert_eq!(params[4], ("media", "music".to_string()));
        assert_eq!(params[5], ("country", "US".to_string()));

        let capped = SearchCriteria {
            limit: Some(300),
            ..SearchCriteria::new("test", Entity::Song)
        };
        assert_eq!(capped.effective_limit(), MAX_LIMIT);
    }

    #[test]
    /// What: Limit clamping lower bound and explicit values inside the range
    ///
    /// - Input: Limits 0, 1, 200, and None
    /// - Output: 1, 1, 200, and the default 50
    fn effective_limit_bounds() {
        let with_limit = |limit| SearchCriteria {
            limit,
            ..SearchCriteria::new("x", Entity::Album)
        };
        assert_eq!(with_limit(Some(0)).effective_limit(), 1);
        assert_eq!(with_limit(Some(1)).effective_limit(), 1);
        assert_eq!(with_limit(Some(200)).effective_limit(), 200);
        assert_eq!(with_limit(None).effective_limit(), 50);
    }

    #[tokio::test]
    /// What: Blank and whitespace-only terms short-circuit without a network call
    ///
    /// - Input: Criteria with an empty and a whitespace-only term against an
    ///   unroutable endpoint
    /// - Output: Empty page, zero count, immediate success
    async fn blank_term_short_circuits() {
        // An endpoint that would fail instantly if contacted.
        let client = CatalogClient::with_endpoint("http://127.0.0.1:1/search".to_string());
        for term in ["", "   "] {
            let page = client
                .search(SearchCriteria::new(term, Entity::Album))
                .await
                .expect("blank term must not fail");
            assert!(page.results.is_empty());
            assert_eq!(page.result_count, 0);
        }
    }

    #[tokio::test]
    /// What: A request that never reaches a server classifies as unreachable
    ///
    /// - Input: A non-blank term against an endpoint nothing listens on
    /// - Output: `SearchError::NetworkUnreachable`, not a timeout or status error
    async fn connect_failure_classifies_as_network_unreachable() {
        let client = CatalogClient::with_endpoint("http://127.0.0.1:1/search".to_string());
        let err = client
            .search(SearchCriteria::new("beatles", Entity::Album))
            .await
            .expect_err("an unroutable endpoint must fail");
        assert_eq!(err, SearchError::NetworkUnreachable);
    }

    #[tokio::test]
    /// What: A 200 response with a non-JSON body classifies as invalid
    ///
    /// - Input: A local server answering the search with garbage text
    /// - Output: `SearchError::InvalidResponse`
    async fn malformed_body_classifies_as_invalid_response() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/search")
            .match_query(Matcher::Any)
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body("<html>not the catalog</html>")
            .create_async()
            .await;

        let client = CatalogClient::with_endpoint(format!("{}/search", server.url()));
        let err = client
            .search(SearchCriteria::new("beatles", Entity::Album))
            .await
            .expect_err("a garbage body must fail");
        assert_eq!(err, SearchError::InvalidResponse);
        mock.assert_async().await;
    }

    #[tokio::test]
    /// What: Error statuses flow through the classifier end to end
    ///
    /// - Input: A local server answering the search with 429
    /// - Output: `SearchError::RateLimited`
    async fn error_status_classifies_end_to_end() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/search")
            .match_query(Matcher::Any)
            .with_status(429)
            .create_async()
            .await;

        let client = CatalogClient::with_endpoint(format!("{}/search", server.url()));
        let err = client
            .search(SearchCriteria::new("beatles", Entity::Album))
            .await
            .expect_err("a 429 must fail");
        assert_eq!(err, SearchError::RateLimited);
        mock.assert_async().await;
    }

    #[tokio::test]
    /// What: A well-formed page parses and the normalized query reaches the wire
    ///
    /// - Input: A local server matching the trimmed term and clamped limit,
    ///   against padded criteria with limit 300
    /// - Output: The decoded page with one result
    async fn well_formed_body_parses_with_normalized_query() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/search")
            .match_query(Matcher::AllOf(vec![
                Matcher::UrlEncoded("term".into(), "beatles".into()),
                Matcher::UrlEncoded("entity".into(), "album".into()),
                Matcher::UrlEncoded("limit".into(), "200".into()),
            ]))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(
                r#"{"resultCount":1,"results":[{"wrapperType":"collection","collectionId":7,"collectionName":"Abbey Road","artistName":"The Beatles"}]}"#,
            )
            .create_async()
            .await;

        let client = CatalogClient::with_endpoint(format!("{}/search", server.url()));
        let page = client
            .search(SearchCriteria {
                limit: Some(300),
                ..SearchCriteria::new("  beatles  ", Entity::Album)
            })
            .await
            .expect("a well-formed body must parse");
        assert_eq!(page.result_count, 1);
        assert_eq!(page.results[0].collection_name.as_deref(), Some("Abbey Road"));
        mock.assert_async().await;
    }
}
