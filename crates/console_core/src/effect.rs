use crate::{FilterState, LoadRequest, RequestId, ViewId};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// Probe the caller's role.
    ResolveRole,
    /// Abort the role probe; its result is no longer wanted.
    CancelRoleProbe,
    /// Write the applied filters to durable storage.
    PersistFilters(FilterState),
    /// Issue a view load.
    Load(LoadRequest),
    /// Abort a superseded load.
    CancelLoad { view: ViewId, request_id: RequestId },
}
