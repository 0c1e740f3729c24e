use std::fmt;

use chrono::{DateTime, Utc};

use crate::api::ApiError;
use crate::dto::{
    CandidateCard, CandidateListItem, Position, PositionRequest, UpdateCandidateRequest,
    UploadResponse,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
    Put,
    Delete,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RequestBody {
    Empty,
    Json(String),
    Multipart {
        field: String,
        file_name: String,
        content_type: String,
        bytes: Vec<u8>,
    },
}

/// Transport-independent request. Kept owned so the gateway can replay it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiRequest {
    pub method: Method,
    pub path: String,
    pub query: Vec<(String, String)>,
    pub accept: String,
    pub body: RequestBody,
}

impl ApiRequest {
    pub fn new(method: Method, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            query: Vec::new(),
            accept: "application/json".to_string(),
            body: RequestBody::Empty,
        }
    }

    pub fn get(path: impl Into<String>) -> Self {
        Self::new(Method::Get, path)
    }

    pub fn with_query<K, V>(mut self, pairs: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        self.query
            .extend(pairs.into_iter().map(|(key, value)| (key.into(), value.into())));
        self
    }

    pub fn with_accept(mut self, accept: impl Into<String>) -> Self {
        self.accept = accept.into();
        self
    }

    pub fn with_body(mut self, body: RequestBody) -> Self {
        self.body = body;
        self
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiResponse {
    pub status: u16,
    pub body: String,
}

impl ApiResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    pub fn is_auth_failure(&self) -> bool {
        matches!(self.status, 401 | 403)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{kind}: {message}")]
pub struct TransportError {
    pub kind: FailureKind,
    pub message: String,
}

impl TransportError {
    pub(crate) fn new(kind: FailureKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    InvalidUrl,
    Timeout,
    Network,
}

impl fmt::Display for FailureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FailureKind::InvalidUrl => write!(f, "invalid url"),
            FailureKind::Timeout => write!(f, "timeout"),
            FailureKind::Network => write!(f, "network error"),
        }
    }
}

/// Role as concluded from the manager-only probe.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    Manager,
    Hr,
    Unknown,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ViewKind {
    CandidateList,
    TopCandidates,
    PipelineStats,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ViewPayload {
    Candidates {
        items: Vec<CandidateListItem>,
        total: u64,
    },
    StatusCounts(Vec<(String, u64)>),
}

/// One-shot calls that are not tied to a list view.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Operation {
    LoadCandidate {
        id: u64,
        position_id: Option<String>,
    },
    UpdateCandidate {
        id: u64,
        position_id: Option<String>,
        body: UpdateCandidateRequest,
    },
    ListPositions,
    ListManagedPositions,
    SavePosition {
        id: Option<u64>,
        body: PositionRequest,
    },
    DeletePosition {
        id: u64,
    },
    ExportTopCandidatesCsv {
        query: Vec<(String, String)>,
    },
    UploadResume {
        file_name: String,
        bytes: Vec<u8>,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OperationOutput {
    Candidate(CandidateCard),
    Positions(Vec<Position>),
    Position(Position),
    Deleted,
    Csv(String),
    Uploaded(UploadResponse),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EngineEvent {
    LoadCompleted {
        view: ViewKind,
        request_id: u64,
        result: Result<ViewPayload, ApiError>,
    },
    RoleResolved {
        role: Role,
        resolved_at: DateTime<Utc>,
    },
    OperationCompleted {
        op_id: u64,
        result: Result<OperationOutput, ApiError>,
    },
}
