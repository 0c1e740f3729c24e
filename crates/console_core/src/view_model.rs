use crate::{Affordance, Capability, FilterState, LoadResult};

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ViewPanel {
    pub result: LoadResult,
    /// Scores are shown only for results of a position-gated query.
    pub score_visible: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AppViewModel {
    pub draft: FilterState,
    pub applied: FilterState,
    /// Min-score and sort inputs are enabled once the draft names a position.
    pub score_inputs_enabled: bool,
    pub capability: Option<Capability>,
    /// Empty until the capability probe resolves.
    pub affordances: Vec<Affordance>,
    pub candidate_list: ViewPanel,
    pub top_candidates: ViewPanel,
    pub pipeline_stats: ViewPanel,
    pub top_n: u32,
    pub notice: Option<String>,
    pub dirty: bool,
}
