use serde::{Deserialize, Serialize};
use chrono::{DateTime, Utc};

use crate::characters::Character;
use crate::page::Notification;
use crate::store::Novel;

/// Submission body for both the form and the JSON endpoint.
#[derive(Deserialize)]
pub struct AnalyzeRequest {
    #[serde(default)]
    pub url: String,
}

#[derive(Serialize)]
pub struct AnalyzeResponse {
    pub novel: Novel,
    pub characters: Vec<Character>,
    pub notifications: Vec<Notification>,
    pub analyzed_at: DateTime<Utc>,
}

#[derive(Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub version: &'static str,
}
