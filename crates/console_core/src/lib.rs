//! Console core: pure filter/capability/load state machine and view-model helpers.
mod capability;
mod effect;
mod filter;
mod load;
mod msg;
mod query;
mod state;
mod update;
mod validation;
mod view_model;

pub use capability::{Affordance, Capability, CapabilityState, Role};
pub use effect::Effect;
pub use filter::{FilterPatch, FilterState, FilterTiers, SortKey, StatusFilter};
pub use load::{
    CandidateRow, ListItem, LoadBoard, LoadOutcome, LoadRequest, LoadResult, RequestId, ViewId,
};
pub use msg::{Msg, ReportKind};
pub use query::{
    clamp_top_n, derive_query, derive_report_query, derive_top_candidates_query, QueryParams,
    DEFAULT_PAGE_LIMIT, DEFAULT_TOP_N,
};
pub use state::AppState;
pub use update::update;
pub use validation::{
    validate_candidate_edit, validate_filters, validate_position_draft, validate_resume,
    CandidateEdit, CandidateStatus, CandidateUpdate, PositionDraft, PositionInput,
    ValidationError, MAX_RESUME_BYTES,
};
pub use view_model::{AppViewModel, ViewPanel};
