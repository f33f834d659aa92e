//! GitHub Releases API source

use std::time::Duration;

use regex::Regex;
use reqwest::header::{ACCEPT, HeaderMap, LINK};
use serde::Deserialize;
use tracing::{debug, warn};

use crate::config::Config;
use crate::release::error::SourceError;
use crate::release::source::ReleaseSource;
use crate::release::types::ReleasePage;

/// Response item from GitHub Releases API
#[derive(Debug, Deserialize)]
struct Release {
    tag_name: String,
}

/// Release source backed by `GET /repos/{owner}/{name}/releases`
pub struct GitHubReleases {
    client: reqwest::Client,
    base_url: String,
    per_page: u32,
    token: Option<String>,
    /// Extracts the `page` parameter of the `rel="next"` entry of a Link header
    next_link_re: Regex,
}

impl GitHubReleases {
    /// Creates a source for the given API base URL
    pub fn new(
        base_url: &str,
        per_page: u32,
        token: Option<String>,
        timeout: Duration,
    ) -> Result<Self, SourceError> {
        let client = reqwest::Client::builder()
            .user_agent("release-lines")
            .timeout(timeout)
            .build()?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            per_page,
            token,
            next_link_re: Regex::new(r#"<[^>]*[?&]page=(\d+)[^>]*>\s*;\s*rel="next""#)
                .expect("next link pattern is valid"),
        })
    }

    pub fn from_config(config: &Config) -> Result<Self, SourceError> {
        Self::new(
            &config.github.base_url,
            config.per_page(),
            config.github.token.clone(),
            config.timeout(),
        )
    }

    fn next_page(&self, headers: &HeaderMap) -> Option<u32> {
        let link = headers.get(LINK)?.to_str().ok()?;
        link.split(',')
            .find_map(|entry| self.next_link_re.captures(entry))
            .and_then(|caps| caps[1].parse().ok())
    }
}

fn rate_limit(status: reqwest::StatusCode, headers: &HeaderMap) -> Option<SourceError> {
    let exhausted = headers
        .get("x-ratelimit-remaining")
        .and_then(|v| v.to_str().ok())
        == Some("0");

    if status != reqwest::StatusCode::TOO_MANY_REQUESTS
        && !(status == reqwest::StatusCode::FORBIDDEN && exhausted)
    {
        return None;
    }

    let retry_after_secs = headers
        .get("retry-after")
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.parse().ok());
    Some(SourceError::RateLimited { retry_after_secs })
}

#[async_trait::async_trait]
impl ReleaseSource for GitHubReleases {
    async fn list_page(
        &self,
        owner: &str,
        name: &str,
        page: u32,
    ) -> Result<ReleasePage, SourceError> {
        let url = format!(
            "{}/repos/{}/{}/releases?per_page={}&page={}",
            self.base_url, owner, name, self.per_page, page
        );

        let mut request = self
            .client
            .get(&url)
            .header(ACCEPT, "application/vnd.github+json");
        if let Some(token) = &self.token {
            request = request.bearer_auth(token);
        }

        let response = request.send().await?;

        let status = response.status();

        if status == reqwest::StatusCode::NOT_FOUND {
            return Err(SourceError::NotFound(format!("{}/{}", owner, name)));
        }

        if let Some(err) = rate_limit(status, response.headers()) {
            return Err(err);
        }

        if !status.is_success() {
            warn!("GitHub API returned status {}: {}", status, url);
            return Err(SourceError::InvalidResponse(format!(
                "Unexpected status: {}",
                status
            )));
        }

        let next_page = self.next_page(response.headers());

        let releases: Vec<Release> = response.json().await.map_err(|e| {
            warn!("Failed to parse GitHub releases response: {}", e);
            SourceError::InvalidResponse(e.to_string())
        })?;

        debug!(
            "Fetched {} releases for {}/{} page {} (next: {:?})",
            releases.len(),
            owner,
            name,
            page,
            next_page
        );

        let tags = releases.into_iter().map(|r| r.tag_name).collect();

        Ok(ReleasePage::new(tags, next_page))
    }
}
