//! API request and response types.

use serde::{Deserialize, Serialize};

/// Request to score how well a resume fits a role.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoreRequest {
    /// Plain resume text
    pub resume: String,

    /// Hiring company name
    pub company_name: String,

    /// Optional free-form description of the company
    #[serde(default)]
    pub company_desc: Option<String>,

    /// Job description text
    pub job_desc: String,
}

/// Health check response.
#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    /// Service status
    pub status: String,

    /// Service version
    pub version: String,
}
