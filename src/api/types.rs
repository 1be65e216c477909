//! API request and response types for the GitHub REST API.
//!
//! Only the fields Cloudsion reads are modelled; everything else in the
//! GitHub payloads is ignored during deserialization.

use serde::{Deserialize, Serialize};

// ============================================================================
// Request Error
// ============================================================================

/// Normalized failure of a single API request.
///
/// `status` is the HTTP status of the response, or `None` when no response
/// was received at all (timeout, connection refused, DNS failure).
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{message}")]
pub struct RequestError {
    pub status: Option<u16>,
    pub message: String,
}

/// Error body returned by GitHub on non-2xx responses
#[derive(Debug, Deserialize)]
struct GitHubErrorBody {
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    errors: Vec<GitHubErrorDetail>,
}

#[derive(Debug, Deserialize)]
struct GitHubErrorDetail {
    #[serde(default)]
    message: Option<String>,
}

impl RequestError {
    /// Build an error from a non-2xx response.
    ///
    /// The human-readable message is taken from the JSON body when possible.
    /// GitHub puts the interesting part of validation failures (for example
    /// "name already exists on this account") into `errors[].message`, so
    /// those are appended to the top-level message.
    pub fn from_http_response(status: u16, body: &[u8]) -> Self {
        let parsed = serde_json::from_slice::<GitHubErrorBody>(body).ok();

        let message = parsed
            .and_then(|body| {
                let details: Vec<String> = body
                    .errors
                    .into_iter()
                    .filter_map(|detail| detail.message)
                    .filter(|m| !m.is_empty())
                    .collect();

                match (body.message.filter(|m| !m.is_empty()), details.is_empty()) {
                    (Some(message), true) => Some(message),
                    (Some(message), false) => Some(format!("{} ({})", message, details.join("; "))),
                    (None, false) => Some(details.join("; ")),
                    (None, true) => None,
                }
            })
            .unwrap_or_else(|| format!("GitHub API error: {}", status));

        Self {
            status: Some(status),
            message,
        }
    }

    /// Build an error for a request that never produced a response.
    pub fn transport(message: impl Into<String>) -> Self {
        Self {
            status: None,
            message: message.into(),
        }
    }

    pub fn is_not_found(&self) -> bool {
        self.status == Some(404)
    }

    pub fn is_conflict(&self) -> bool {
        self.status == Some(409)
    }

    /// Case-insensitive substring match on the message
    pub fn message_contains(&self, needle: &str) -> bool {
        self.message
            .to_lowercase()
            .contains(&needle.to_lowercase())
    }
}

// ============================================================================
// Users
// ============================================================================

/// Authenticated user from `GET /user`
#[derive(Debug, Clone, Deserialize)]
pub struct GitHubUser {
    #[serde(default)]
    pub login: String,
}

// ============================================================================
// Repositories
// ============================================================================

#[derive(Debug, Clone, Deserialize)]
pub struct RepositoryOwner {
    pub login: String,
}

/// Repository metadata from `GET /repos/{owner}/{name}` and friends
#[derive(Debug, Clone, Deserialize)]
pub struct RepositoryMetadata {
    pub name: String,
    #[serde(default)]
    pub full_name: String,
    #[serde(default)]
    pub html_url: String,
    #[serde(default)]
    pub private: bool,
    #[serde(default)]
    pub has_pages: bool,
    #[serde(default)]
    pub updated_at: Option<String>,
    pub owner: RepositoryOwner,
}

/// Body for `POST /user/repos`
#[derive(Debug, Serialize)]
pub(crate) struct CreateRepoRequest {
    pub name: String,
    pub description: String,
    pub private: bool,
    pub auto_init: bool,
    pub has_issues: bool,
    pub has_projects: bool,
    pub has_wiki: bool,
}

// ============================================================================
// Contents
// ============================================================================

/// File entry from `GET /repos/{owner}/{name}/contents/{path}`
///
/// For directories GitHub returns an array instead, which fails to decode
/// into this type and is treated the same as "no file".
#[derive(Debug, Clone, Deserialize)]
pub struct ContentFile {
    pub sha: String,
}

/// Body for `PUT /repos/{owner}/{name}/contents/{path}`
#[derive(Debug, Serialize)]
pub(crate) struct PutContentRequest {
    pub message: String,
    /// Base64 encoded file content
    pub content: String,
    /// Version token of the file being replaced; absent on first creation
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sha: Option<String>,
}

// ============================================================================
// Pages
// ============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PagesSource {
    pub branch: String,
    pub path: String,
}

/// Body for `POST /repos/{owner}/{name}/pages`
#[derive(Debug, Serialize)]
pub(crate) struct EnablePagesRequest {
    pub source: PagesSource,
}

/// Pages site from `GET /repos/{owner}/{name}/pages`
#[derive(Debug, Clone, Deserialize)]
pub struct PagesInfo {
    #[serde(default)]
    pub html_url: Option<String>,
    /// Build status reported by GitHub ("built", "building", "errored", ...)
    #[serde(default)]
    pub status: Option<String>,
}

// ============================================================================
// Site listing
// ============================================================================

/// A Pages-enabled repository as shown in the sites dashboard
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SiteSummary {
    pub name: String,
    pub private: bool,
    pub url: String,
    pub repo_url: String,
    pub updated_at: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_message_from_json_body() {
        let err = RequestError::from_http_response(404, br#"{"message":"Not Found"}"#);
        assert_eq!(err.status, Some(404));
        assert_eq!(err.message, "Not Found");
        assert!(err.is_not_found());
    }

    #[test]
    fn test_error_message_includes_validation_details() {
        let body = br#"{
            "message": "Repository creation failed.",
            "errors": [{"resource": "Repository", "field": "name", "message": "name already exists on this account"}]
        }"#;
        let err = RequestError::from_http_response(422, body);
        assert_eq!(
            err.message,
            "Repository creation failed. (name already exists on this account)"
        );
        assert!(err.message_contains("Name already exists"));
    }

    #[test]
    fn test_error_message_fallback_for_non_json() {
        let err = RequestError::from_http_response(502, b"<html>Bad gateway</html>");
        assert_eq!(err.message, "GitHub API error: 502");

        let err = RequestError::from_http_response(500, b"");
        assert_eq!(err.message, "GitHub API error: 500");
    }

    #[test]
    fn test_transport_error_has_no_status() {
        let err = RequestError::transport("timed out");
        assert_eq!(err.status, None);
        assert!(!err.is_not_found());
        assert_eq!(err.to_string(), "timed out");
    }

    #[test]
    fn test_put_content_omits_missing_sha() {
        let body = PutContentRequest {
            message: "Deploy".to_string(),
            content: "aGk=".to_string(),
            sha: None,
        };
        let json = serde_json::to_value(&body).unwrap();
        assert!(json.get("sha").is_none());
    }
}
