use std::collections::BTreeMap;

use crate::QueryParams;

pub type RequestId = u64;

const FALLBACK_FAILURE: &str = "Request failed";

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ViewId {
    CandidateList,
    TopCandidates,
    PipelineStats,
}

impl ViewId {
    pub const ALL: [ViewId; 3] = [
        ViewId::CandidateList,
        ViewId::TopCandidates,
        ViewId::PipelineStats,
    ];

    pub fn is_report(self) -> bool {
        !matches!(self, ViewId::CandidateList)
    }

    pub fn label(self) -> &'static str {
        match self {
            ViewId::CandidateList => "candidates",
            ViewId::TopCandidates => "top candidates",
            ViewId::PipelineStats => "pipeline stats",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CandidateRow {
    pub candidate_id: Option<u64>,
    pub full_name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub status: Option<String>,
    pub years_of_experience: Option<u32>,
    pub upload_date: Option<String>,
    pub score: Option<u32>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ListItem {
    Candidate(CandidateRow),
    StatusCount { status: String, count: u64 },
}

impl ListItem {
    fn without_score(self) -> Self {
        match self {
            ListItem::Candidate(row) => ListItem::Candidate(CandidateRow { score: None, ..row }),
            other => other,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum LoadResult {
    #[default]
    Idle,
    Loading,
    Success {
        items: Vec<ListItem>,
        total: u64,
    },
    Failure {
        message: String,
    },
}

impl LoadResult {
    pub fn is_loading(&self) -> bool {
        matches!(self, LoadResult::Loading)
    }
}

/// How a load ended, as reported by the IO side.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadOutcome {
    Loaded { items: Vec<ListItem>, total: u64 },
    Failed { message: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadRequest {
    pub view: ViewId,
    pub request_id: RequestId,
    pub query: QueryParams,
    pub score_gated: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
struct ViewSlot {
    latest: Option<RequestId>,
    score_gated: bool,
    result: LoadResult,
}

/// Per-view load bookkeeping.
///
/// Every load gets an id from one monotonically increasing counter; a
/// completion is applied only when its id is still the latest issued for
/// its view.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadBoard {
    next_id: RequestId,
    slots: BTreeMap<ViewId, ViewSlot>,
}

impl Default for LoadBoard {
    fn default() -> Self {
        Self {
            next_id: 1,
            slots: ViewId::ALL
                .into_iter()
                .map(|view| (view, ViewSlot::default()))
                .collect(),
        }
    }
}

impl LoadBoard {
    pub fn new() -> Self {
        Self::default()
    }

    /// Moves `view` into `Loading`. Returns the new request and the id of
    /// the request it superseded, if that one was still outstanding.
    pub fn begin(
        &mut self,
        view: ViewId,
        query: QueryParams,
        score_gated: bool,
    ) -> (LoadRequest, Option<RequestId>) {
        let request_id = self.next_id;
        self.next_id += 1;

        let slot = self.slots.entry(view).or_default();
        let superseded = if slot.result.is_loading() {
            slot.latest
        } else {
            None
        };
        slot.latest = Some(request_id);
        slot.score_gated = score_gated;
        slot.result = LoadResult::Loading;

        (
            LoadRequest {
                view,
                request_id,
                query,
                score_gated,
            },
            superseded,
        )
    }

    /// Applies a completion. Stale or unknown ids are dropped and `false` is returned.
    pub fn finish(&mut self, view: ViewId, request_id: RequestId, outcome: LoadOutcome) -> bool {
        let Some(slot) = self.slots.get_mut(&view) else {
            return false;
        };
        if slot.latest != Some(request_id) || !slot.result.is_loading() {
            return false;
        }

        slot.result = match outcome {
            LoadOutcome::Loaded { items, total } => {
                let items = if slot.score_gated {
                    items
                } else {
                    items.into_iter().map(ListItem::without_score).collect()
                };
                LoadResult::Success { items, total }
            }
            LoadOutcome::Failed { message } => {
                let message = message.trim();
                LoadResult::Failure {
                    message: if message.is_empty() {
                        FALLBACK_FAILURE.to_string()
                    } else {
                        message.to_string()
                    },
                }
            }
        };
        true
    }

    /// Drops every outstanding load, returning the ids that should be aborted.
    pub fn cancel_all(&mut self) -> Vec<(ViewId, RequestId)> {
        let mut cancelled = Vec::new();
        for (view, slot) in &mut self.slots {
            if slot.result.is_loading() {
                if let Some(request_id) = slot.latest {
                    cancelled.push((*view, request_id));
                }
                slot.result = LoadResult::Idle;
            }
        }
        cancelled
    }

    pub fn result(&self, view: ViewId) -> &LoadResult {
        static IDLE: LoadResult = LoadResult::Idle;
        self.slots.get(&view).map_or(&IDLE, |slot| &slot.result)
    }

    pub fn latest_request(&self, view: ViewId) -> Option<RequestId> {
        self.slots.get(&view).and_then(|slot| slot.latest)
    }

    /// Whether the query behind the view's current result was position-gated.
    pub fn score_gated(&self, view: ViewId) -> bool {
        self.slots.get(&view).is_some_and(|slot| slot.score_gated)
    }

    pub fn any_loading(&self) -> bool {
        self.slots.values().any(|slot| slot.result.is_loading())
    }
}
