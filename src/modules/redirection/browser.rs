use async_trait::async_trait;
use std::time::Duration;

use crate::core::Result;

/// Browser automation surface needed to complete a redirect-based challenge
///
/// `frames` lists iframe selectors from outermost to innermost; the element
/// selector is resolved inside the innermost frame. Every call receives its own
/// timeout, the handler also enforces it as an outer bound.
#[async_trait]
pub trait BrowserDriver: Send + Sync {
    async fn navigate(&self, url: &str, timeout: Duration) -> Result<()>;

    /// Wait until the current URL matches `pattern` and return it
    async fn wait_for_url(&self, pattern: &str, timeout: Duration) -> Result<String>;

    async fn click_in_frame(&self, frames: &[&str], selector: &str, timeout: Duration) -> Result<()>;

    async fn fill_in_frame(
        &self,
        frames: &[&str],
        selector: &str,
        value: &str,
        timeout: Duration,
    ) -> Result<()>;
}

/// Whether `url` is the awaited return URL
///
/// The pattern is a URL prefix; query string and fragment on `url` are allowed.
pub fn url_matches(url: &str, pattern: &str) -> bool {
    url.starts_with(pattern)
}

/// `status` query parameter appended by the service to the return URL
pub fn redirect_status(url: &str) -> Option<String> {
    let parsed = reqwest::Url::parse(url).ok()?;
    parsed
        .query_pairs()
        .find(|(key, _)| key == "status")
        .map(|(_, value)| value.into_owned())
}
