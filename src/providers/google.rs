//! Google Custom Search JSON API.
//!
//! A single unsigned GET endpoint, `/customsearch/v1` on
//! `www.googleapis.com`. Errors arrive as `{"error": {"message", "code"}}`.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::clients::{HttpClient, Transport};
use crate::command::{Command, CommandError, Protocol};
use crate::config::{ApiKey, Authority, ClientConfig};
use crate::provider::RestApiProvider;
use crate::response::check_for_error;

/// Host of the Custom Search API.
pub const GOOGLE_APIS_AUTHORITY: &str = "www.googleapis.com";

/// Path of the search endpoint.
pub const CUSTOM_SEARCH_PATH: &str = "/customsearch/v1";

/// Optional query parameters of a search.
///
/// Unset fields are not sent.
///
/// # Example
///
/// ```rust
/// use rest_command::providers::SearchParameters;
///
/// let parameters = SearchParameters::new().num(5).start(11).safe(true);
/// assert_ne!(parameters, SearchParameters::new());
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SearchParameters {
    num: Option<u32>,
    start: Option<u32>,
    lr: Option<String>,
    safe: Option<bool>,
    site_search: Option<String>,
}

impl SearchParameters {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of results to return (1 to 10).
    #[must_use]
    pub const fn num(mut self, num: u32) -> Self {
        self.num = Some(num);
        self
    }

    /// Index of the first result, starting at 1.
    #[must_use]
    pub const fn start(mut self, start: u32) -> Self {
        self.start = Some(start);
        self
    }

    /// Restricts results to a language, e.g. `lang_en`.
    #[must_use]
    pub fn language(mut self, lr: impl Into<String>) -> Self {
        self.lr = Some(lr.into());
        self
    }

    /// Turns SafeSearch on or off.
    #[must_use]
    pub const fn safe(mut self, safe: bool) -> Self {
        self.safe = Some(safe);
        self
    }

    /// Restricts results to one site.
    #[must_use]
    pub fn site_search(mut self, site: impl Into<String>) -> Self {
        self.site_search = Some(site.into());
        self
    }

    fn apply(&self, command: Command) -> Command {
        command
            .with_parameter_if_positive("num", self.num.map_or(0, i64::from))
            .with_parameter_if_positive("start", self.start.map_or(0, i64::from))
            .with_parameter_if_present("lr", self.lr.as_deref())
            .with_condition_parameter(
                self.safe.is_some(),
                "safe",
                if self.safe == Some(true) { "active" } else { "off" },
            )
            .with_parameter_if_present("siteSearch", self.site_search.as_deref())
    }
}

/// One search hit.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchItem {
    pub title: String,
    pub link: String,
    #[serde(default)]
    pub snippet: Option<String>,
    #[serde(default)]
    pub display_link: Option<String>,
}

/// Totals reported alongside the hits.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchInformation {
    #[serde(default)]
    pub total_results: Option<String>,
    #[serde(default)]
    pub search_time: Option<f64>,
}

/// The response of a search.
///
/// A query without hits has no `items` member; it decodes as an empty list.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchResult {
    #[serde(default)]
    pub items: Vec<SearchItem>,
    #[serde(default)]
    pub search_information: Option<SearchInformation>,
}

/// Client for Google Custom Search.
///
/// # Example
///
/// ```rust,ignore
/// use rest_command::providers::{GoogleCustomSearchProvider, SearchParameters};
/// use rest_command::ApiKey;
///
/// let provider = GoogleCustomSearchProvider::new(ApiKey::new("api-key")?, "engine-id", false, None)?;
/// let result = provider.search("rust", &SearchParameters::new().num(3)).await?;
/// for item in result.items {
///     println!("{}: {}", item.title, item.link);
/// }
/// ```
pub struct GoogleCustomSearchProvider<T: Transport = HttpClient> {
    inner: RestApiProvider<T>,
    key: ApiKey,
    cx: String,
    key_is_access_token: bool,
}

impl GoogleCustomSearchProvider<HttpClient> {
    /// Creates a provider for `www.googleapis.com` backed by a new
    /// [`HttpClient`].
    ///
    /// With `key_is_access_token`, `key` is sent as an OAuth `access_token`
    /// instead of an API `key`.
    ///
    /// # Errors
    ///
    /// Returns [`CommandError::Transport`] if the HTTP client cannot be
    /// built.
    pub fn new(
        key: ApiKey,
        cx: impl Into<String>,
        key_is_access_token: bool,
        config: Option<&ClientConfig>,
    ) -> Result<Self, CommandError> {
        let authority = Authority::new(GOOGLE_APIS_AUTHORITY)?;
        Ok(Self::with_transport(
            authority,
            key,
            cx,
            key_is_access_token,
            HttpClient::new(config)?,
        ))
    }
}

impl<T: Transport> GoogleCustomSearchProvider<T> {
    /// Creates a provider for any authority with an explicit transport.
    #[must_use]
    pub fn with_transport(
        authority: Authority,
        key: ApiKey,
        cx: impl Into<String>,
        key_is_access_token: bool,
        transport: T,
    ) -> Self {
        Self {
            inner: RestApiProvider::with_transport(Protocol::https(authority), transport),
            key,
            cx: cx.into(),
            key_is_access_token,
        }
    }

    /// Returns the underlying provider.
    #[must_use]
    pub const fn provider(&self) -> &RestApiProvider<T> {
        &self.inner
    }

    /// Starts a search command with credentials and `alt=json` set.
    ///
    /// # Errors
    ///
    /// Returns [`CommandError`] if the command cannot be created.
    pub fn run(&self) -> Result<Command, CommandError> {
        let key_name = if self.key_is_access_token {
            "access_token"
        } else {
            "key"
        };

        let key: &str = self.key.as_ref();

        Ok(self
            .inner
            .cmd(CUSTOM_SEARCH_PATH)?
            .with_parameter(key_name, key)
            .with_parameter("cx", &self.cx)
            .with_parameter("alt", "json"))
    }

    /// Runs a search.
    ///
    /// # Errors
    ///
    /// Returns [`CommandError::Api`] when Google rejects the query, or
    /// another [`CommandError`] if the call fails.
    pub async fn search(
        &self,
        query: &str,
        parameters: &SearchParameters,
    ) -> Result<SearchResult, CommandError> {
        let command = parameters.apply(self.run()?.with_parameter("q", query));
        self.inner.fetch(&command, check_for_error).await
    }
}

impl<T: Transport> fmt::Debug for GoogleCustomSearchProvider<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GoogleCustomSearchProvider")
            .field("inner", &self.inner)
            .field("cx", &self.cx)
            .field("key_is_access_token", &self.key_is_access_token)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clients::{HttpError, HttpMethod, HttpRequest, HttpResponse};
    use async_trait::async_trait;
    use std::collections::HashMap;
    use std::sync::Mutex;

    struct Recorder {
        body: &'static str,
        queries: Mutex<Vec<Vec<(String, String)>>>,
    }

    #[async_trait]
    impl Transport for Recorder {
        async fn send(&self, request: HttpRequest) -> Result<HttpResponse, HttpError> {
            assert_eq!(request.http_method, HttpMethod::Get);
            self.queries
                .lock()
                .unwrap()
                .push(request.query.unwrap_or_default());
            Ok(HttpResponse::new(200, HashMap::new(), self.body))
        }
    }

    fn provider(body: &'static str, access_token: bool) -> GoogleCustomSearchProvider<Recorder> {
        GoogleCustomSearchProvider::with_transport(
            Authority::new(GOOGLE_APIS_AUTHORITY).unwrap(),
            ApiKey::new("secret").unwrap(),
            "engine",
            access_token,
            Recorder {
                body,
                queries: Mutex::new(Vec::new()),
            },
        )
    }

    fn names(query: &[(String, String)]) -> Vec<&str> {
        query.iter().map(|(name, _)| name.as_str()).collect()
    }

    #[test]
    fn test_run_uses_key_or_access_token() {
        let command = provider("{}", false).run().unwrap();
        assert_eq!(command.path(), CUSTOM_SEARCH_PATH);
        assert!(command.parameters().contains("key"));
        assert!(!command.protocol().is_signed());

        let command = provider("{}", true).run().unwrap();
        assert!(command.parameters().contains("access_token"));
        assert!(!command.parameters().contains("key"));
    }

    #[test]
    fn test_debug_hides_key() {
        let debug_output = format!("{:?}", provider("{}", false));
        assert!(debug_output.contains("engine"));
        assert!(!debug_output.contains("secret"));
    }

    #[tokio::test]
    async fn test_search_sends_only_set_parameters() {
        let provider = provider(r#"{"items":[{"title":"Rust","link":"https://www.rust-lang.org"}]}"#, false);
        let result = provider
            .search("rust", &SearchParameters::new().num(3).safe(true))
            .await
            .unwrap();
        assert_eq!(result.items[0].title, "Rust");

        let queries = provider.provider().transport().queries.lock().unwrap();
        let query = queries.last().unwrap();
        assert_eq!(names(query), vec!["key", "cx", "alt", "q", "num", "safe"]);
        assert!(query.contains(&("safe".to_string(), "active".to_string())));
    }

    #[tokio::test]
    async fn test_search_without_items_is_empty() {
        let provider = provider(r#"{"searchInformation":{"totalResults":"0","searchTime":0.1}}"#, false);
        let result = provider.search("zzz", &SearchParameters::new()).await.unwrap();

        assert!(result.items.is_empty());
        assert_eq!(
            result
                .search_information
                .and_then(|info| info.total_results)
                .as_deref(),
            Some("0")
        );
    }

    #[tokio::test]
    async fn test_search_raises_google_error() {
        let provider = provider(r#"{"error":{"code":400,"message":"Invalid Value"}}"#, false);
        let error = provider
            .search("rust", &SearchParameters::new())
            .await
            .unwrap_err();

        match error {
            CommandError::Api(e) => {
                assert_eq!(e.code, 400);
                assert_eq!(e.message, "Invalid Value");
            }
            other => panic!("Expected Api error, got {other:?}"),
        }
    }
}
