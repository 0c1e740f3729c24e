use std::time::Duration;

use console_core::{
    CandidateRow, Effect, ListItem, LoadOutcome, Msg, QueryParams, Role, ViewId,
};
use console_engine::{
    ApiError, CandidateListItem, EngineEvent, EngineHandle, KeyValueStore, Operation,
    OperationOutput, ViewKind, ViewPayload,
};
use console_logging::{console_debug, console_info, console_warn};

use super::persistence;

/// Something the engine reported, translated for the console loop.
#[derive(Debug)]
pub(crate) enum Inbound {
    Msg(Msg),
    Operation {
        op_id: u64,
        result: Result<OperationOutput, ApiError>,
    },
}

/// Carries out core effects against the engine and the durable store.
pub(crate) struct EffectRunner {
    engine: EngineHandle,
    store: KeyValueStore,
    next_op_id: u64,
}

impl EffectRunner {
    pub(crate) fn new(engine: EngineHandle, store: KeyValueStore) -> Self {
        Self {
            engine,
            store,
            next_op_id: 1,
        }
    }

    pub(crate) fn enqueue(&self, effects: Vec<Effect>) {
        for effect in effects {
            match effect {
                Effect::ResolveRole => {
                    console_info!("Resolving caller role");
                    self.engine.resolve_role();
                }
                Effect::CancelRoleProbe => self.engine.cancel_role_probe(),
                Effect::PersistFilters(filters) => {
                    persistence::save_filters(&self.store, &filters);
                }
                Effect::Load(request) => {
                    console_debug!(
                        "Load {} request_id={} gated={}",
                        request.view.label(),
                        request.request_id,
                        request.score_gated
                    );
                    self.engine.load(
                        view_kind(request.view),
                        request.request_id,
                        query_pairs(&request.query),
                    );
                }
                Effect::CancelLoad { view, request_id } => {
                    console_debug!("Cancel {} request_id={}", view.label(), request_id);
                    self.engine.cancel(view_kind(view), request_id);
                }
            }
        }
    }

    /// Starts a one-shot operation and returns the id its completion will carry.
    pub(crate) fn start(&mut self, op: Operation) -> u64 {
        let op_id = self.next_op_id;
        self.next_op_id += 1;
        self.engine.run(op_id, op);
        op_id
    }

    pub(crate) fn next_inbound(&self, timeout: Duration) -> Option<Inbound> {
        self.engine.recv_timeout(timeout).map(translate)
    }
}

pub(crate) fn translate(event: EngineEvent) -> Inbound {
    match event {
        EngineEvent::LoadCompleted {
            view,
            request_id,
            result,
        } => Inbound::Msg(Msg::LoadFinished {
            view: view_id(view),
            request_id,
            outcome: load_outcome(result),
        }),
        EngineEvent::RoleResolved { role, resolved_at } => Inbound::Msg(Msg::RoleResolved {
            role: map_role(role),
            resolved_at,
        }),
        EngineEvent::OperationCompleted { op_id, result } => Inbound::Operation { op_id, result },
    }
}

pub(crate) fn query_pairs(query: &QueryParams) -> Vec<(String, String)> {
    query
        .iter()
        .map(|(key, value)| (key.to_string(), value.to_string()))
        .collect()
}

fn load_outcome(result: Result<ViewPayload, ApiError>) -> LoadOutcome {
    match result {
        Ok(ViewPayload::Candidates { items, total }) => LoadOutcome::Loaded {
            items: items
                .into_iter()
                .map(|item| ListItem::Candidate(candidate_row(item)))
                .collect(),
            total,
        },
        Ok(ViewPayload::StatusCounts(counts)) => {
            let total = counts.iter().map(|(_, count)| count).sum();
            LoadOutcome::Loaded {
                items: counts
                    .into_iter()
                    .map(|(status, count)| ListItem::StatusCount { status, count })
                    .collect(),
                total,
            }
        }
        Err(err) => {
            console_warn!("Load failed: {}", err);
            LoadOutcome::Failed {
                message: err.user_message(),
            }
        }
    }
}

fn candidate_row(item: CandidateListItem) -> CandidateRow {
    CandidateRow {
        candidate_id: item.candidate_id,
        full_name: item.full_name,
        email: item.email,
        phone: item.phone,
        status: item.status,
        years_of_experience: item.years_of_experience,
        upload_date: item.upload_date,
        score: item.score,
    }
}

fn view_kind(view: ViewId) -> ViewKind {
    match view {
        ViewId::CandidateList => ViewKind::CandidateList,
        ViewId::TopCandidates => ViewKind::TopCandidates,
        ViewId::PipelineStats => ViewKind::PipelineStats,
    }
}

fn view_id(view: ViewKind) -> ViewId {
    match view {
        ViewKind::CandidateList => ViewId::CandidateList,
        ViewKind::TopCandidates => ViewId::TopCandidates,
        ViewKind::PipelineStats => ViewId::PipelineStats,
    }
}

fn map_role(role: console_engine::Role) -> Role {
    match role {
        console_engine::Role::Manager => Role::Manager,
        console_engine::Role::Hr => Role::Hr,
        console_engine::Role::Unknown => Role::Unknown,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use pretty_assertions::assert_eq;

    #[test]
    fn status_counts_become_list_items_with_summed_total() {
        let inbound = translate(EngineEvent::LoadCompleted {
            view: ViewKind::PipelineStats,
            request_id: 4,
            result: Ok(ViewPayload::StatusCounts(vec![
                ("HIRED".to_string(), 2),
                ("NEW".to_string(), 5),
            ])),
        });

        let Inbound::Msg(Msg::LoadFinished {
            view,
            request_id,
            outcome,
        }) = inbound
        else {
            panic!("expected a load completion");
        };
        assert_eq!(view, ViewId::PipelineStats);
        assert_eq!(request_id, 4);
        assert_eq!(
            outcome,
            LoadOutcome::Loaded {
                items: vec![
                    ListItem::StatusCount {
                        status: "HIRED".to_string(),
                        count: 2
                    },
                    ListItem::StatusCount {
                        status: "NEW".to_string(),
                        count: 5
                    },
                ],
                total: 7,
            }
        );
    }

    #[test]
    fn api_failures_carry_status_and_server_message() {
        let inbound = translate(EngineEvent::LoadCompleted {
            view: ViewKind::CandidateList,
            request_id: 9,
            result: Err(ApiError::Http {
                status: 503,
                message: "Maintenance".to_string(),
            }),
        });

        assert!(matches!(
            inbound,
            Inbound::Msg(Msg::LoadFinished {
                outcome: LoadOutcome::Failed { ref message },
                ..
            }) if message == "HTTP 503: Maintenance"
        ));
    }

    #[test]
    fn resolved_role_is_forwarded() {
        let at = Utc::now();
        let inbound = translate(EngineEvent::RoleResolved {
            role: console_engine::Role::Manager,
            resolved_at: at,
        });

        assert!(matches!(
            inbound,
            Inbound::Msg(Msg::RoleResolved { role: Role::Manager, resolved_at }) if resolved_at == at
        ));
    }
}
