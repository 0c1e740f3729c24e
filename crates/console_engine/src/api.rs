//! Typed endpoint calls on top of the gateway.
use std::sync::Arc;

use console_logging::{console_debug, console_warn};
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::dto::{
    CandidateCard, CandidateListResponse, PipelineStatsResponse, Position, PositionRequest,
    TopCandidatesResponse, UpdateCandidateRequest, UploadResponse,
};
use crate::gateway::Gateway;
use crate::{ApiRequest, ApiResponse, FailureKind, Method, RequestBody};

const CANDIDATES_PATH: &str = "/api/hr/candidates";
const UPLOAD_PATH: &str = "/api/hr/candidates/upload-resume";
const POSITIONS_PATH: &str = "/api/positions";
const MANAGED_POSITIONS_PATH: &str = "/api/manager/positions";
const PIPELINE_STATS_PATH: &str = "/api/manager/reports/pipeline-stats";
const TOP_CANDIDATES_PATH: &str = "/api/manager/reports/top-candidates";

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ApiError {
    #[error("HTTP {status}: {message}")]
    Http { status: u16, message: String },
    #[error("Network error: failed to {action} ({kind})")]
    Transport { action: String, kind: FailureKind },
    #[error("Unexpected response while trying to {action}: {message}")]
    Decode { action: String, message: String },
    #[error("Could not encode request: {0}")]
    Encode(String),
}

impl ApiError {
    /// Text suitable for the view's failure slot, `HTTP <status>: <message>`
    /// for server rejections. Never empty.
    pub fn user_message(&self) -> String {
        self.to_string()
    }

    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Http { status, .. } => Some(*status),
            _ => None,
        }
    }
}

/// Picks the most useful text out of an error response.
///
/// Order: JSON `message` (with per-field lines when present), JSON
/// `error`, the raw body, then a generic "Failed to ..." line.
pub fn failure_message(status: u16, body: &str, action: &str) -> String {
    if let Ok(serde_json::Value::Object(map)) = serde_json::from_str::<serde_json::Value>(body) {
        let text_of = |key: &str| {
            map.get(key)
                .and_then(serde_json::Value::as_str)
                .map(str::trim)
                .filter(|text| !text.is_empty())
                .map(str::to_string)
        };

        if let Some(mut message) = text_of("message") {
            if let Some(serde_json::Value::Object(fields)) = map.get("fields") {
                for (field, problem) in fields {
                    let problem = problem
                        .as_str()
                        .map(str::to_string)
                        .unwrap_or_else(|| problem.to_string());
                    message.push_str(&format!("\n- {field}: {problem}"));
                }
            }
            return message;
        }
        if let Some(error) = text_of("error") {
            return error;
        }
    }

    let trimmed = body.trim();
    if !trimmed.is_empty() {
        return trimmed.to_string();
    }
    format!("Failed to {action} (HTTP {status})")
}

/// One method per endpoint. Every call goes through the gateway, so the
/// credential retry applies uniformly.
#[derive(Clone)]
pub struct ConsoleApi {
    gateway: Arc<Gateway>,
}

impl ConsoleApi {
    pub fn new(gateway: Arc<Gateway>) -> Self {
        Self { gateway }
    }

    pub fn gateway(&self) -> &Arc<Gateway> {
        &self.gateway
    }

    pub async fn list_candidates(
        &self,
        query: &[(String, String)],
    ) -> Result<CandidateListResponse, ApiError> {
        let request = ApiRequest::get(CANDIDATES_PATH).with_query(query.iter().cloned());
        self.fetch_json(request, "load candidates").await
    }

    pub async fn candidate(
        &self,
        id: u64,
        position_id: Option<&str>,
    ) -> Result<CandidateCard, ApiError> {
        let request = ApiRequest::get(format!("{CANDIDATES_PATH}/{id}"))
            .with_query(position_query(position_id));
        self.fetch_json(request, "load candidate").await
    }

    pub async fn update_candidate(
        &self,
        id: u64,
        position_id: Option<&str>,
        body: &UpdateCandidateRequest,
    ) -> Result<CandidateCard, ApiError> {
        let request = ApiRequest::new(Method::Put, format!("{CANDIDATES_PATH}/{id}"))
            .with_query(position_query(position_id))
            .with_body(json_body(body)?);
        self.fetch_json(request, "save candidate").await
    }

    /// Positions visible to every recruiter. A non-array body reads as empty.
    pub async fn positions(&self) -> Result<Vec<Position>, ApiError> {
        self.fetch_list(ApiRequest::get(POSITIONS_PATH), "load positions")
            .await
    }

    pub async fn managed_positions(&self) -> Result<Vec<Position>, ApiError> {
        self.fetch_list(ApiRequest::get(MANAGED_POSITIONS_PATH), "load positions")
            .await
    }

    /// Creates when `id` is `None`, replaces otherwise.
    pub async fn save_position(
        &self,
        id: Option<u64>,
        body: &PositionRequest,
    ) -> Result<Position, ApiError> {
        let request = match id {
            Some(id) => ApiRequest::new(Method::Put, format!("{MANAGED_POSITIONS_PATH}/{id}")),
            None => ApiRequest::new(Method::Post, MANAGED_POSITIONS_PATH),
        };
        self.fetch_json(request.with_body(json_body(body)?), "save position")
            .await
    }

    pub async fn delete_position(&self, id: u64) -> Result<(), ApiError> {
        let request = ApiRequest::new(Method::Delete, format!("{MANAGED_POSITIONS_PATH}/{id}"));
        self.fetch_text(request, "delete position").await.map(|_| ())
    }

    pub async fn pipeline_stats(
        &self,
        query: &[(String, String)],
    ) -> Result<PipelineStatsResponse, ApiError> {
        let request = ApiRequest::get(PIPELINE_STATS_PATH).with_query(query.iter().cloned());
        self.fetch_json(request, "load pipeline stats").await
    }

    pub async fn top_candidates(
        &self,
        query: &[(String, String)],
    ) -> Result<TopCandidatesResponse, ApiError> {
        let request = ApiRequest::get(TOP_CANDIDATES_PATH).with_query(query.iter().cloned());
        self.fetch_json(request, "load top candidates").await
    }

    pub async fn top_candidates_csv(&self, query: &[(String, String)]) -> Result<String, ApiError> {
        let request = ApiRequest::get(TOP_CANDIDATES_PATH)
            .with_query(query.iter().cloned())
            .with_query([("download", "csv")])
            .with_accept("text/csv");
        self.fetch_text(request, "export top candidates").await
    }

    pub async fn upload_resume(
        &self,
        file_name: &str,
        bytes: Vec<u8>,
    ) -> Result<UploadResponse, ApiError> {
        let request = ApiRequest::new(Method::Post, UPLOAD_PATH).with_body(RequestBody::Multipart {
            field: "file".to_string(),
            file_name: file_name.to_string(),
            content_type: "application/pdf".to_string(),
            bytes,
        });
        self.fetch_json(request, "upload resume").await
    }

    async fn fetch_json<T: DeserializeOwned>(
        &self,
        request: ApiRequest,
        action: &str,
    ) -> Result<T, ApiError> {
        let body = self.fetch_text(request, action).await?;
        serde_json::from_str(&body).map_err(|err| ApiError::Decode {
            action: action.to_string(),
            message: err.to_string(),
        })
    }

    async fn fetch_list<T: DeserializeOwned>(
        &self,
        request: ApiRequest,
        action: &str,
    ) -> Result<Vec<T>, ApiError> {
        match self.fetch_json::<serde_json::Value>(request, action).await? {
            value @ serde_json::Value::Array(_) => {
                serde_json::from_value(value).map_err(|err| ApiError::Decode {
                    action: action.to_string(),
                    message: err.to_string(),
                })
            }
            _ => Ok(Vec::new()),
        }
    }

    async fn fetch_text(&self, request: ApiRequest, action: &str) -> Result<String, ApiError> {
        console_debug!("{:?} {} ({})", request.method, request.path, action);
        let response = self
            .gateway
            .send(&request)
            .await
            .map_err(|err| ApiError::Transport {
                action: action.to_string(),
                kind: err.kind,
            })?;
        into_body(response, action)
    }
}

fn into_body(response: ApiResponse, action: &str) -> Result<String, ApiError> {
    if response.is_success() {
        return Ok(response.body);
    }
    let message = failure_message(response.status, &response.body, action);
    console_warn!("Failed to {}: HTTP {}", action, response.status);
    Err(ApiError::Http {
        status: response.status,
        message,
    })
}

fn position_query(position_id: Option<&str>) -> Vec<(String, String)> {
    position_id
        .map(str::trim)
        .filter(|id| !id.is_empty())
        .map(|id| vec![("position_id".to_string(), id.to_string())])
        .unwrap_or_default()
}

fn json_body<T: Serialize>(body: &T) -> Result<RequestBody, ApiError> {
    serde_json::to_string(body)
        .map(RequestBody::Json)
        .map_err(|err| ApiError::Encode(err.to_string()))
}
