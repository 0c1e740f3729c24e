use chrono::{DateTime, Utc};

use crate::{FilterPatch, FilterState, LoadOutcome, RequestId, Role, ViewId};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Msg {
    /// Console shell came up; carries the persisted filter record, if any.
    Mounted { restored: Option<FilterState> },
    /// User edited one or more filter inputs.
    DraftEdited(FilterPatch),
    /// User committed the draft filters.
    ApplyClicked,
    /// User restored the default filters.
    ResetClicked,
    /// User opened a report tab.
    ReportRequested(ReportKind),
    /// User asked to reload a view with the current applied filters.
    RefreshClicked(ViewId),
    /// Capability probe finished.
    RoleResolved {
        role: Role,
        resolved_at: DateTime<Utc>,
    },
    /// A view load completed (possibly after being superseded).
    LoadFinished {
        view: ViewId,
        request_id: RequestId,
        outcome: LoadOutcome,
    },
    /// Console shell is going away.
    Unmounted,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportKind {
    PipelineStats,
    TopCandidates { n: u32 },
}

impl ReportKind {
    pub fn view(self) -> ViewId {
        match self {
            ReportKind::PipelineStats => ViewId::PipelineStats,
            ReportKind::TopCandidates { .. } => ViewId::TopCandidates,
        }
    }
}
