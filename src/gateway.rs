//! Vote submission gateway
//!
//! One POST per run, no retry. The backend is opaque: a fixed endpoint URL,
//! a JSON body, and a small JSON response selecting the outcome.

use crate::error::CheckinError;
use crate::types::{RawVoteResponse, ServerResult, VoteSubmission};
use async_trait::async_trait;
use reqwest::header::CONTENT_TYPE;
use tracing::{debug, warn};

/// Wire content type for the submission body
///
/// The body is JSON, but the deployed backend expects `text/plain`. It was
/// built for browser clients that dodge a CORS pre-flight this way, and the
/// contract is fixed on the server side.
pub const SUBMISSION_CONTENT_TYPE: &str = "text/plain;charset=utf-8";

/// Transport seam for vote submission
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait VoteGateway: Send + Sync {
    /// Submit one vote and return the server-declared outcome
    async fn submit(&self, submission: &VoteSubmission) -> Result<ServerResult, CheckinError>;
}

/// HTTP gateway against the real vote endpoint
#[derive(Debug, Clone)]
pub struct HttpVoteGateway {
    client: reqwest::Client,
    endpoint: String,
}

impl HttpVoteGateway {
    /// Gateway posting to the given endpoint URL
    #[inline]
    #[must_use]
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            endpoint: endpoint.into(),
        }
    }
}

#[async_trait]
impl VoteGateway for HttpVoteGateway {
    async fn submit(&self, submission: &VoteSubmission) -> Result<ServerResult, CheckinError> {
        let body = serde_json::to_string(submission)?;
        debug!(endpoint = %self.endpoint, booth = %submission.booth_id, "submitting vote");

        let response = self
            .client
            .post(&self.endpoint)
            .header(CONTENT_TYPE, SUBMISSION_CONTENT_TYPE)
            .body(body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            warn!(%status, "vote endpoint returned non-OK status");
            return Err(CheckinError::HttpStatus {
                status: status.as_u16(),
            });
        }

        let text = response.text().await?;
        let raw: RawVoteResponse = serde_json::from_str(&text)
            .map_err(|e| CheckinError::MalformedResponse(e.to_string()))?;

        let result = ServerResult::from_raw(raw);
        debug!(?result, "vote endpoint answered");
        Ok(result)
    }
}
