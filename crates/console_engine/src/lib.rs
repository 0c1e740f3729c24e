//! Console engine: durable state, authenticated transport and load execution.
mod api;
mod capability;
mod credential;
mod dto;
mod engine;
mod gateway;
mod persist;
mod transport;
mod types;

pub use api::{failure_message, ApiError, ConsoleApi};
pub use capability::{role_from_probe, CapabilityResolver, ProbingResolver, MANAGER_PROBE_PATH};
pub use credential::{Credential, CredentialStore, CREDENTIAL_KEY};
pub use dto::{
    CandidateCard, CandidateFields, CardValidation, CandidateListItem, CandidateListResponse,
    PipelineStatsResponse, Position, PositionRequest, TopCandidatesResponse,
    UpdateCandidateRequest, UploadResponse,
};
pub use engine::EngineHandle;
pub use gateway::{CredentialPrompt, Gateway, NoPrompt};
pub use persist::{ensure_state_dir, AtomicFileWriter, KeyValueStore, PersistError};
pub use transport::{ReqwestTransport, Transport, TransportSettings};
pub use types::{
    ApiRequest, ApiResponse, EngineEvent, FailureKind, Method, Operation, OperationOutput,
    RequestBody, Role, TransportError, ViewKind, ViewPayload,
};
