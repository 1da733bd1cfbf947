use chrono::{DateTime, Utc};
use folio_core::{FolioError, FolioResult};
use reqwest::StatusCode;
use reqwest::blocking::{Client, Response};
use reqwest::header::{ACCEPT, HeaderMap};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::time::Duration;

const GITHUB_V3_MEDIA_TYPE: &str = "application/vnd.github.v3+json";
const HEADER_RATELIMIT_RESET: &str = "x-ratelimit-reset";
const USER_AGENT_VALUE: &str = concat!("folio/", env!("CARGO_PKG_VERSION"));

pub const DEFAULT_API_URL: &str = "https://api.github.com";

#[derive(Debug, Clone)]
pub struct GithubApi {
    base_url: String,
    client: Client,
}

/// `GET /users/{username}` response, reduced to the fields folio reads.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UserResponse {
    #[serde(default)]
    pub avatar_url: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub bio: Option<String>,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub company: Option<String>,
    #[serde(default)]
    pub public_repos: u32,
}

/// One repository record from the search API's `items` list.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RepositorySummary {
    pub full_name: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub html_url: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub stargazers_count: u64,
    #[serde(default)]
    pub language: Option<String>,
    #[serde(default)]
    pub updated_at: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
struct SearchResponse {
    #[serde(default)]
    items: Vec<RepositorySummary>,
}

#[derive(Debug, Deserialize)]
struct ErrorEnvelope {
    message: Option<String>,
}

impl GithubApi {
    pub fn new(base_url: &str) -> FolioResult<Self> {
        let trimmed = base_url.trim_end_matches('/').to_string();
        if trimmed.is_empty() {
            return Err(FolioError::usage("API base URL cannot be empty"));
        }

        let client = Client::builder()
            .timeout(Duration::from_secs(30))
            .user_agent(USER_AGENT_VALUE)
            .build()
            .map_err(|err| FolioError::io(format!("failed to construct API client: {err}")))?;

        Ok(Self {
            base_url: trimmed,
            client,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn fetch_user(&self, username: &str) -> FolioResult<UserResponse> {
        let username = username.trim();
        if username.is_empty() {
            return Err(FolioError::usage("username is required"));
        }

        let request = self
            .client
            .get(self.url(&format!("/users/{username}")))
            .header(ACCEPT, GITHUB_V3_MEDIA_TYPE);

        parse_json_response(request.send().map_err(network_error)?)
    }

    /// Issues one search query. The query string is passed through verbatim:
    /// GitHub's search grammar uses `+` as the term separator, so it must not
    /// be form-encoded.
    pub fn search_repositories(
        &self,
        query: &str,
        sort: Option<&str>,
        per_page: Option<u32>,
    ) -> FolioResult<Vec<RepositorySummary>> {
        if query.trim().is_empty() {
            return Err(FolioError::usage("search query is required"));
        }

        let mut url = format!("{}/search/repositories?q={}", self.base_url, query);
        if let Some(sort) = sort {
            url.push_str(&format!("&sort={sort}"));
        }
        if let Some(per_page) = per_page {
            url.push_str(&format!("&per_page={per_page}"));
        }
        url.push_str("&type=Repositories");

        let request = self.client.get(url).header(ACCEPT, GITHUB_V3_MEDIA_TYPE);
        let response: SearchResponse = parse_json_response(request.send().map_err(network_error)?)?;
        Ok(response.items)
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }
}

fn parse_json_response<T: DeserializeOwned>(response: Response) -> FolioResult<T> {
    let status = response.status();
    let headers = response.headers().clone();
    let body_text = response.text().unwrap_or_default();

    if !status.is_success() {
        return Err(classify_failure(status, &headers, &body_text));
    }

    serde_json::from_str(&body_text)
        .map_err(|err| FolioError::api(format!("failed to decode API response JSON: {err}")))
}

/// Maps a failed response onto the error taxonomy: 403 with a parsable
/// rate-limit reset header becomes `RateLimit` carrying a relative-time
/// phrase, 404 becomes `NotFound`, everything else is a generic `Api` error.
fn classify_failure(status: StatusCode, headers: &HeaderMap, body_text: &str) -> FolioError {
    let detail = serde_json::from_str::<ErrorEnvelope>(body_text)
        .ok()
        .and_then(|envelope| envelope.message)
        .unwrap_or_else(|| {
            let body_trimmed = body_text.trim();
            if body_trimmed.is_empty() {
                format!("request failed with status {}", status.as_u16())
            } else {
                format!(
                    "request failed with status {}: {}",
                    status.as_u16(),
                    truncate_for_error(body_trimmed, 240)
                )
            }
        });

    match status {
        StatusCode::FORBIDDEN => match rate_limit_reset(headers) {
            Some(reset) => FolioError::rate_limit(format!(
                "{} (rate limit resets {})",
                detail,
                format_relative(reset, Utc::now())
            )),
            // No usable reset header: treat it as any other failure.
            None => FolioError::api(format!("{detail} [http_status=403]")),
        },
        StatusCode::NOT_FOUND => FolioError::not_found(format!("{detail} [http_status=404]")),
        _ => FolioError::api(format!("{} [http_status={}]", detail, status.as_u16())),
    }
}

fn rate_limit_reset(headers: &HeaderMap) -> Option<DateTime<Utc>> {
    let raw = headers.get(HEADER_RATELIMIT_RESET)?.to_str().ok()?;
    let seconds = raw.trim().parse::<i64>().ok()?;
    DateTime::from_timestamp(seconds, 0)
}

/// Renders the distance between two instants as a human phrase,
/// "in 45 minutes" or "2 hours ago".
pub fn format_relative(instant: DateTime<Utc>, now: DateTime<Utc>) -> String {
    let delta = instant - now;
    let seconds = delta.num_seconds();
    let magnitude = seconds.unsigned_abs();

    let phrase = if magnitude < 60 {
        "less than a minute".to_string()
    } else if magnitude < 60 * 60 {
        plural(magnitude / 60, "minute")
    } else if magnitude < 24 * 60 * 60 {
        plural(magnitude / (60 * 60), "hour")
    } else {
        plural(magnitude / (24 * 60 * 60), "day")
    };

    if seconds < 0 {
        format!("{phrase} ago")
    } else {
        format!("in {phrase}")
    }
}

fn plural(count: u64, unit: &str) -> String {
    if count == 1 {
        format!("1 {unit}")
    } else {
        format!("{count} {unit}s")
    }
}

fn truncate_for_error(input: &str, max_chars: usize) -> String {
    if input.chars().count() <= max_chars {
        return input.to_string();
    }

    let truncated: String = input.chars().take(max_chars).collect();
    format!("{truncated}...")
}

fn network_error(err: reqwest::Error) -> FolioError {
    FolioError::api(format!("network request failed: {err}"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use folio_core::ErrorKind;
    use reqwest::header::HeaderValue;

    fn at(seconds: i64) -> DateTime<Utc> {
        Utc.timestamp_opt(seconds, 0).unwrap()
    }

    #[test]
    fn relative_phrases_cover_every_unit() {
        let now = at(1_000_000);

        assert_eq!(format_relative(at(1_000_030), now), "in less than a minute");
        assert_eq!(format_relative(at(1_000_000 + 45 * 60), now), "in 45 minutes");
        assert_eq!(format_relative(at(1_000_000 + 60), now), "in 1 minute");
        assert_eq!(format_relative(at(1_000_000 + 2 * 3600), now), "in 2 hours");
        assert_eq!(format_relative(at(1_000_000 + 3 * 86_400), now), "in 3 days");
        assert_eq!(format_relative(at(1_000_000 - 32 * 60), now), "32 minutes ago");
    }

    #[test]
    fn forbidden_with_reset_header_is_a_rate_limit() {
        let mut headers = HeaderMap::new();
        headers.insert(HEADER_RATELIMIT_RESET, HeaderValue::from_static("4102444800"));

        let error = classify_failure(StatusCode::FORBIDDEN, &headers, "");

        assert_eq!(error.kind, ErrorKind::RateLimit);
        assert!(error.message.contains("rate limit resets"));
    }

    #[test]
    fn forbidden_without_reset_header_is_generic() {
        let error = classify_failure(StatusCode::FORBIDDEN, &HeaderMap::new(), "");
        assert_eq!(error.kind, ErrorKind::Api);
        assert!(error.message.contains("http_status=403"));
    }

    #[test]
    fn forbidden_with_garbage_reset_header_is_generic() {
        let mut headers = HeaderMap::new();
        headers.insert(HEADER_RATELIMIT_RESET, HeaderValue::from_static("soon"));

        let error = classify_failure(StatusCode::FORBIDDEN, &headers, "");
        assert_eq!(error.kind, ErrorKind::Api);
    }

    #[test]
    fn not_found_keeps_the_api_error_message() {
        let error = classify_failure(
            StatusCode::NOT_FOUND,
            &HeaderMap::new(),
            r#"{"message": "Not Found"}"#,
        );

        assert_eq!(error.kind, ErrorKind::NotFound);
        assert!(error.message.contains("Not Found"));
        assert!(error.message.contains("http_status=404"));
    }

    #[test]
    fn other_statuses_are_generic() {
        let error = classify_failure(StatusCode::INTERNAL_SERVER_ERROR, &HeaderMap::new(), "");
        assert_eq!(error.kind, ErrorKind::Api);
        assert!(error.message.contains("http_status=500"));
    }
}
