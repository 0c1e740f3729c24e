use crate::{Affordance, AppState, Effect, Msg, ReportKind, ViewId};

const REPORTS_LOCKED: &str = "Reports are available to managers only";

/// Pure update function: applies a message to state and returns any effects.
pub fn update(mut state: AppState, msg: Msg) -> (AppState, Vec<Effect>) {
    let effects = match msg {
        Msg::Mounted { restored } => {
            if state.is_mounted() {
                return (state, Vec::new());
            }
            state.mount(restored);
            let mut effects = Vec::with_capacity(2);
            if state.capability().capability().is_none() {
                effects.push(Effect::ResolveRole);
            }
            effects.extend(state.reload(ViewId::CandidateList));
            effects
        }
        Msg::DraftEdited(patch) => {
            state.edit_draft(patch);
            Vec::new()
        }
        Msg::ApplyClicked => match state.apply_filters() {
            Ok(()) => {
                let mut effects = vec![Effect::PersistFilters(
                    state.filters().persisted().clone(),
                )];
                effects.extend(state.reload(ViewId::CandidateList));
                effects
            }
            Err(err) => {
                // Nothing committed, nothing sent.
                state.set_notice(err.to_string());
                Vec::new()
            }
        },
        Msg::ResetClicked => {
            state.reset_filters();
            let mut effects = vec![Effect::PersistFilters(
                state.filters().persisted().clone(),
            )];
            effects.extend(state.reload(ViewId::CandidateList));
            effects
        }
        Msg::ReportRequested(kind) => {
            if !state.allows(Affordance::Reports) {
                state.set_notice(REPORTS_LOCKED);
                return (state, Vec::new());
            }
            if let ReportKind::TopCandidates { n } = kind {
                state.set_top_n(n);
            }
            state.reload(kind.view())
        }
        Msg::RefreshClicked(view) => {
            if view.is_report() && !state.allows(Affordance::Reports) {
                state.set_notice(REPORTS_LOCKED);
                return (state, Vec::new());
            }
            state.reload(view)
        }
        Msg::RoleResolved { role, resolved_at } => {
            state.resolve_capability(role, resolved_at);
            Vec::new()
        }
        Msg::LoadFinished {
            view,
            request_id,
            outcome,
        } => {
            state.finish_load(view, request_id, outcome);
            Vec::new()
        }
        Msg::Unmounted => {
            if !state.is_mounted() {
                return (state, Vec::new());
            }
            state.unmount()
        }
    };

    (state, effects)
}
