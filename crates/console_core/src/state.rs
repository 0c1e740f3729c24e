use chrono::{DateTime, Utc};

use crate::query::{derive_query, derive_report_query, derive_top_candidates_query};
use crate::validation::ValidationError;
use crate::view_model::{AppViewModel, ViewPanel};
use crate::{
    clamp_top_n, Affordance, Capability, CapabilityState, Effect, FilterPatch, FilterState,
    FilterTiers, LoadBoard, LoadOutcome, RequestId, Role, ViewId, DEFAULT_TOP_N,
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppState {
    mounted: bool,
    filters: FilterTiers,
    capability: CapabilityState,
    loads: LoadBoard,
    top_n: u32,
    notice: Option<String>,
    dirty: bool,
}

impl Default for AppState {
    fn default() -> Self {
        Self {
            mounted: false,
            filters: FilterTiers::new(),
            capability: CapabilityState::Pending,
            loads: LoadBoard::new(),
            top_n: DEFAULT_TOP_N,
            notice: None,
            dirty: false,
        }
    }
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn view(&self) -> AppViewModel {
        let capability = self.capability.capability();
        let affordances = capability
            .map(|capability| capability.role.affordances().to_vec())
            .unwrap_or_default();
        let panel = |view: ViewId| ViewPanel {
            result: self.loads.result(view).clone(),
            score_visible: self.loads.score_gated(view),
        };

        AppViewModel {
            draft: self.filters.draft().clone(),
            applied: self.filters.applied().clone(),
            score_inputs_enabled: self.filters.draft().is_position_gated(),
            capability,
            affordances,
            candidate_list: panel(ViewId::CandidateList),
            top_candidates: panel(ViewId::TopCandidates),
            pipeline_stats: panel(ViewId::PipelineStats),
            top_n: self.top_n,
            notice: self.notice.clone(),
            dirty: self.dirty,
        }
    }

    pub fn filters(&self) -> &FilterTiers {
        &self.filters
    }

    pub fn loads(&self) -> &LoadBoard {
        &self.loads
    }

    pub fn capability(&self) -> CapabilityState {
        self.capability
    }

    pub fn is_mounted(&self) -> bool {
        self.mounted
    }

    pub fn allows(&self, affordance: Affordance) -> bool {
        self.capability.allows(affordance)
    }

    /// Returns whether the state changed since the last call, clearing the flag.
    pub fn consume_dirty(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }

    pub(crate) fn mark_dirty(&mut self) {
        self.dirty = true;
    }

    pub(crate) fn set_notice(&mut self, notice: impl Into<String>) {
        self.notice = Some(notice.into());
        self.mark_dirty();
    }

    pub(crate) fn clear_notice(&mut self) {
        if self.notice.take().is_some() {
            self.mark_dirty();
        }
    }

    pub(crate) fn mount(&mut self, restored: Option<FilterState>) {
        self.mounted = true;
        if let Some(restored) = restored {
            self.filters = FilterTiers::seeded(restored);
        }
        self.mark_dirty();
    }

    pub(crate) fn edit_draft(&mut self, patch: FilterPatch) {
        if patch.is_empty() {
            return;
        }
        self.filters.edit_draft(patch);
        self.mark_dirty();
    }

    pub(crate) fn apply_filters(&mut self) -> Result<(), ValidationError> {
        self.filters.apply()?;
        self.clear_notice();
        self.mark_dirty();
        Ok(())
    }

    pub(crate) fn reset_filters(&mut self) {
        self.filters.reset();
        self.clear_notice();
        self.mark_dirty();
    }

    pub(crate) fn set_top_n(&mut self, n: u32) {
        self.top_n = clamp_top_n(n);
    }

    /// Starts a fresh load of `view` from the applied filters, superseding any
    /// outstanding one.
    pub(crate) fn reload(&mut self, view: ViewId) -> Vec<Effect> {
        let applied = self.filters.applied();
        let query = match view {
            ViewId::CandidateList => derive_query(applied),
            ViewId::PipelineStats => derive_report_query(applied),
            ViewId::TopCandidates => derive_top_candidates_query(applied, self.top_n),
        };
        let score_gated = applied.is_position_gated();

        let (request, superseded) = self.loads.begin(view, query, score_gated);
        self.mark_dirty();

        let mut effects = Vec::with_capacity(2);
        if let Some(request_id) = superseded {
            effects.push(Effect::CancelLoad { view, request_id });
        }
        effects.push(Effect::Load(request));
        effects
    }

    pub(crate) fn finish_load(&mut self, view: ViewId, request_id: RequestId, outcome: LoadOutcome) {
        if self.loads.finish(view, request_id, outcome) {
            self.mark_dirty();
        }
    }

    /// The capability is resolved once per session; later results are ignored.
    pub(crate) fn resolve_capability(&mut self, role: Role, resolved_at: DateTime<Utc>) {
        if self.capability != CapabilityState::Pending {
            return;
        }
        self.capability = CapabilityState::Resolved(Capability { role, resolved_at });
        self.mark_dirty();
    }

    pub(crate) fn unmount(&mut self) -> Vec<Effect> {
        let mut effects: Vec<Effect> = self
            .loads
            .cancel_all()
            .into_iter()
            .map(|(view, request_id)| Effect::CancelLoad { view, request_id })
            .collect();
        if self.capability == CapabilityState::Pending {
            effects.push(Effect::CancelRoleProbe);
        }
        self.filters.discard_draft();
        self.mounted = false;
        self.mark_dirty();
        effects
    }
}
