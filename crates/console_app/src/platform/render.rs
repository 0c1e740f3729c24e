use std::fmt::Write as _;

use console_core::{Affordance, AppViewModel, FilterState, ListItem, LoadResult, Role, ViewPanel};
use console_engine::{CandidateCard, Position};

const DASH: &str = "-";

pub(crate) fn render_view(view: &AppViewModel) -> String {
    let mut out = String::new();

    let role = match view.capability.map(|capability| capability.role) {
        None => "resolving...",
        Some(Role::Manager) => "manager",
        Some(Role::Hr) => "HR",
        Some(Role::Unknown) => "unknown (HR features only)",
    };
    let _ = writeln!(out, "Role: {role}");
    if let Some(notice) = &view.notice {
        let _ = writeln!(out, "! {notice}");
    }

    let _ = writeln!(out, "Applied: {}", describe_filters(&view.applied));
    if view.draft != view.applied {
        let _ = writeln!(out, "Draft:   {} (not applied)", describe_filters(&view.draft));
    }
    if !view.score_inputs_enabled && has_score_inputs(&view.draft) {
        let _ = writeln!(out, "  min score and sort take effect once a position is set");
    }

    render_panel(&mut out, "Candidates", &view.candidate_list, true);
    if view.affordances.contains(&Affordance::Reports) {
        render_panel(
            &mut out,
            &format!("Top {} candidates", view.top_n),
            &view.top_candidates,
            false,
        );
        render_panel(&mut out, "Pipeline", &view.pipeline_stats, false);
    }
    out
}

fn describe_filters(filters: &FilterState) -> String {
    let mut parts = Vec::new();
    let mut push = |label: &str, value: &str| {
        if !value.trim().is_empty() {
            parts.push(format!("{label}={}", value.trim()));
        }
    };
    push("q", &filters.search_text);
    push("status", filters.status.as_wire());
    push("min_years", &filters.min_years);
    push("position", &filters.position_id);
    push("min_score", &filters.min_score);
    push("sort", filters.sort.as_wire());
    parts.join(" ")
}

fn has_score_inputs(filters: &FilterState) -> bool {
    !filters.min_score.trim().is_empty() || filters.sort != Default::default()
}

fn render_panel(out: &mut String, title: &str, panel: &ViewPanel, hide_idle: bool) {
    match &panel.result {
        LoadResult::Idle => {
            if !hide_idle {
                let _ = writeln!(out, "\n{title}: not loaded");
            }
        }
        LoadResult::Loading => {
            let _ = writeln!(out, "\n{title}: loading...");
        }
        LoadResult::Failure { message } => {
            let _ = writeln!(out, "\n{title}: failed");
            for line in message.lines() {
                let _ = writeln!(out, "  {line}");
            }
        }
        LoadResult::Success { items, total } => {
            let _ = writeln!(out, "\n{title} ({} shown, {total} total)", items.len());
            if items.is_empty() {
                let _ = writeln!(out, "  (no results)");
            }
            for item in items {
                let _ = writeln!(out, "  {}", render_item(item, panel.score_visible));
            }
        }
    }
}

fn render_item(item: &ListItem, score_visible: bool) -> String {
    match item {
        ListItem::StatusCount { status, count } => format!("{status:<12} {count}"),
        ListItem::Candidate(row) => {
            let mut line = format!(
                "#{:<5} {:<24} {:<28} {:<10} {:>3}y  {}",
                row.candidate_id.map_or_else(|| DASH.to_string(), |id| id.to_string()),
                row.full_name.as_deref().unwrap_or(DASH),
                row.email.as_deref().unwrap_or(DASH),
                row.status.as_deref().unwrap_or(DASH),
                row.years_of_experience
                    .map_or_else(|| DASH.to_string(), |years| years.to_string()),
                row.upload_date.as_deref().unwrap_or(DASH),
            );
            if score_visible {
                let score = row
                    .score
                    .map_or_else(|| DASH.to_string(), |score| score.to_string());
                let _ = write!(line, "  score {score}");
            }
            line
        }
    }
}

/// `score_visible` is false when no position was selected for the request;
/// any score the server sent anyway is dropped.
pub(crate) fn render_card(card: &CandidateCard, score_visible: bool) -> String {
    let mut out = String::new();
    let id = card
        .candidate_id
        .map_or_else(|| DASH.to_string(), |id| id.to_string());
    let draft = if card.draft { " (draft)" } else { "" };
    let _ = writeln!(out, "Candidate #{id}{draft}");
    let fields = &card.fields;
    let rows = [
        ("Name", fields.full_name.clone(), false),
        ("Email", fields.email.clone(), card.validation.email_required_missing),
        ("Phone", fields.phone.clone(), card.validation.phone_required_missing),
        ("Skills", fields.skills.clone(), false),
        ("Experience", fields.years_of_experience.map(|y| format!("{y} years")), false),
        ("Status", card.status.clone(), false),
        ("Uploaded", card.upload_date.clone(), false),
    ];
    for (label, value, missing) in rows {
        let value = value.as_deref().filter(|v| !v.is_empty());
        let flag = if missing { "  <- missing, required" } else { "" };
        let _ = writeln!(out, "  {label:<11} {}{flag}", value.unwrap_or(DASH));
    }
    if let Some(score) = card.score.filter(|_| score_visible) {
        let _ = writeln!(out, "  {:<11} {score}", "Score");
    }
    out
}

pub(crate) fn render_positions(positions: &[Position]) -> String {
    if positions.is_empty() {
        return "No positions.\n".to_string();
    }
    let mut out = String::new();
    for position in positions {
        let _ = write!(out, "  #{:<4} {}", position.id, position.name);
        if let (Some(skills), Some(experience)) =
            (position.skills_weight, position.experience_weight)
        {
            let _ = write!(out, "  (skills {skills}% / experience {experience}%)");
        }
        if let Some(required) = position.required_skills.as_deref().filter(|s| !s.is_empty()) {
            let _ = write!(out, "  requires: {required}");
        }
        out.push('\n');
    }
    out
}
