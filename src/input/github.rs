use std::time::Duration;

use chrono::{DateTime, Utc};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::input::{InputError, ReportPublisher, SignalSource};

pub const DEFAULT_API_BASE: &str = "https://api.github.com";
const API_VERSION: &str = "2022-11-28";
const REQUEST_TIMEOUT_SECS: u64 = 15;

/// Blocking GitHub REST client for one repository. Serves as the timing
/// source and as the summary publisher.
pub struct GitHubClient {
    api_base: String,
    repo: String,
    token: String,
    agent: ureq::Agent,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct PullTimestamps {
    pub created_at: Option<String>,
    pub merged_at: Option<String>,
    pub closed_at: Option<String>,
}

#[derive(Debug, Deserialize)]
struct SearchResponse {
    #[serde(default)]
    total_count: u64,
}

#[derive(Debug, Serialize)]
struct CommentBody<'a> {
    body: &'a str,
}

fn make_agent() -> ureq::Agent {
    ureq::config::Config::builder()
        .http_status_as_error(false)
        .timeout_global(Some(Duration::from_secs(REQUEST_TIMEOUT_SECS)))
        .build()
        .new_agent()
}

impl GitHubClient {
    pub fn new(
        api_base: impl Into<String>,
        repo: impl Into<String>,
        token: impl Into<String>,
    ) -> Self {
        let api_base = api_base.into();
        Self {
            api_base: api_base.trim_end_matches('/').to_string(),
            repo: repo.into(),
            token: token.into(),
            agent: make_agent(),
        }
    }

    fn get_json<T: DeserializeOwned>(&self, url: &str) -> Result<T, InputError> {
        tracing::debug!("GET {url}");
        let response = self
            .agent
            .get(url)
            .header("Accept", "application/vnd.github+json")
            .header("Authorization", &format!("Bearer {}", self.token))
            .header("X-GitHub-Api-Version", API_VERSION)
            .call()
            .map_err(|e| InputError::Http {
                url: url.to_string(),
                message: e.to_string(),
            })?;

        let status = response.status().as_u16();
        if status >= 400 {
            return Err(InputError::Status {
                url: url.to_string(),
                status,
            });
        }
        let text = response
            .into_body()
            .read_to_string()
            .map_err(|e| InputError::Http {
                url: url.to_string(),
                message: e.to_string(),
            })?;
        serde_json::from_str(&text).map_err(|e| InputError::Parse(format!("{url}: {e}")))
    }
}

impl SignalSource for GitHubClient {
    fn cycle_time_hours(&self, pr_number: u64) -> Result<Option<f64>, InputError> {
        let url = format!("{}/repos/{}/pulls/{}", self.api_base, self.repo, pr_number);
        let pr: PullTimestamps = self.get_json(&url)?;
        compute_cycle_time_hours(&pr, Utc::now())
    }

    fn merge_velocity(&self, window_days: u32) -> Result<Option<u64>, InputError> {
        let url = format!(
            "{}/search/issues?q={}",
            self.api_base,
            merged_search_query(&self.repo, Utc::now(), window_days)
        );
        let data: SearchResponse = self.get_json(&url)?;
        Ok(Some(data.total_count))
    }
}

impl ReportPublisher for GitHubClient {
    fn publish(&self, pr_number: u64, body: &str) -> Result<(), InputError> {
        let url = format!(
            "{}/repos/{}/issues/{}/comments",
            self.api_base, self.repo, pr_number
        );
        let response = self
            .agent
            .post(&url)
            .header("Accept", "application/vnd.github+json")
            .header("Authorization", &format!("Bearer {}", self.token))
            .header("X-GitHub-Api-Version", API_VERSION)
            .header("Content-Type", "application/json")
            .send_json(&CommentBody { body })
            .map_err(|e| InputError::Http {
                url: url.clone(),
                message: e.to_string(),
            })?;
        let status = response.status().as_u16();
        if status >= 400 {
            return Err(InputError::Status { url, status });
        }
        Ok(())
    }
}

/// Hours from creation until merge, else close, else `now`. Never negative.
/// `None` when the pull request carries no creation timestamp.
pub fn compute_cycle_time_hours(
    pr: &PullTimestamps,
    now: DateTime<Utc>,
) -> Result<Option<f64>, InputError> {
    let Some(created) = pr.created_at.as_deref() else {
        return Ok(None);
    };
    let start = parse_timestamp(created)?;
    let end = match (pr.merged_at.as_deref(), pr.closed_at.as_deref()) {
        (Some(merged), _) => parse_timestamp(merged)?,
        (None, Some(closed)) => parse_timestamp(closed)?,
        (None, None) => now,
    };
    let seconds = (end - start).num_milliseconds() as f64 / 1000.0;
    Ok(Some((seconds / 3600.0).max(0.0)))
}

/// Search query for pull requests merged within the last `window_days`.
/// `>=` is percent-encoded so the query can be placed in a URL as is.
pub fn merged_search_query(repo: &str, now: DateTime<Utc>, window_days: u32) -> String {
    let since = (now - chrono::Duration::days(i64::from(window_days))).format("%Y-%m-%d");
    format!("is:pr+repo:{repo}+is:merged+merged:%3E%3D{since}")
}

fn parse_timestamp(ts: &str) -> Result<DateTime<Utc>, InputError> {
    DateTime::parse_from_rfc3339(ts)
        .map(|t| t.with_timezone(&Utc))
        .map_err(|e| InputError::Parse(format!("invalid timestamp {ts:?}: {e}")))
}

#[cfg(test)]
#[path = "../../tests/src_inline/input/github.rs"]
mod tests;
