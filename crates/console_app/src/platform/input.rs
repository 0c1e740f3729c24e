use std::path::PathBuf;

use console_core::{FilterPatch, ReportKind, SortKey, StatusFilter, ViewId, DEFAULT_TOP_N};

pub(crate) const HELP: &str = "\
Filters
  set q|status|years|score|position|sort [value]   edit the draft (no value clears)
  apply                                            commit the draft and reload
  reset                                            restore default filters
  refresh [candidates|top|stats]                   reload a view
Reports (managers)
  report stats | report top [n]
  export <file.csv> [n]                            save top candidates as CSV
Candidates
  candidate <id>                                   show a candidate card
  edit <id> name=.. email=.. phone=.. skills=.. years=.. status=..
  upload <file.pdf>                                upload a resume
Positions
  positions                                        list positions
  position list | position new key=.. | position edit <id> key=.. | position delete <id>
    keys: name, skills, skills-weight, experience-weight
Session
  show | logout | help | quit";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum CandidateField {
    Name,
    Email,
    Phone,
    Skills,
    Years,
    Status,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum PositionField {
    Name,
    Skills,
    SkillsWeight,
    ExperienceWeight,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Command {
    Help,
    Show,
    Edit(FilterPatch),
    Apply,
    Reset,
    Refresh(ViewId),
    Report(ReportKind),
    Export { path: PathBuf, n: u32 },
    ShowCandidate { id: u64 },
    EditCandidate {
        id: u64,
        changes: Vec<(CandidateField, String)>,
    },
    Upload { path: PathBuf },
    Positions,
    ManagedPositions,
    SavePosition {
        id: Option<u64>,
        changes: Vec<(PositionField, String)>,
    },
    DeletePosition { id: u64 },
    Logout,
    Quit,
}

/// Parses one console line. A blank line is `Ok(None)`.
pub(crate) fn parse_command(line: &str) -> Result<Option<Command>, String> {
    let args = split_args(line)?;
    let Some((head, rest)) = args.split_first() else {
        return Ok(None);
    };

    let command = match head.to_ascii_lowercase().as_str() {
        "help" | "?" => Command::Help,
        "show" => Command::Show,
        "set" => Command::Edit(parse_filter_edit(rest)?),
        "apply" => Command::Apply,
        "reset" => Command::Reset,
        "refresh" => Command::Refresh(match rest.first().map(String::as_str) {
            None => ViewId::CandidateList,
            Some(name) => parse_view(name)?,
        }),
        "report" => Command::Report(parse_report(rest)?),
        "export" => {
            let path = rest.first().ok_or("usage: export <file.csv> [n]")?;
            Command::Export {
                path: PathBuf::from(path),
                n: parse_optional_n(rest.get(1))?,
            }
        }
        "candidate" => Command::ShowCandidate {
            id: parse_id(rest.first())?,
        },
        "edit" => Command::EditCandidate {
            id: parse_id(rest.first())?,
            changes: parse_assignments(&rest[rest.len().min(1)..], candidate_field)?,
        },
        "upload" => Command::Upload {
            path: PathBuf::from(rest.first().ok_or("usage: upload <file.pdf>")?),
        },
        "positions" => Command::Positions,
        "position" => parse_position(rest)?,
        "logout" => Command::Logout,
        "quit" | "exit" => Command::Quit,
        other => return Err(format!("unknown command {other:?}; type `help`")),
    };
    Ok(Some(command))
}

fn parse_filter_edit(args: &[String]) -> Result<FilterPatch, String> {
    let (field, value) = args
        .split_first()
        .ok_or("usage: set <field> [value]")?;
    let value = value.join(" ");
    let mut patch = FilterPatch::default();
    match field.to_ascii_lowercase().as_str() {
        "q" | "search" => patch.search_text = Some(value),
        "status" => {
            patch.status = Some(if value.trim().is_empty() {
                StatusFilter::All
            } else {
                StatusFilter::from_wire(&value)
                    .ok_or_else(|| format!("unknown status {value:?} (ALL, NEW, IN_REVIEW, REJECTED, HIRED)"))?
            });
        }
        "years" | "min-years" => patch.min_years = Some(value),
        "score" | "min-score" => patch.min_score = Some(value),
        "position" => patch.position_id = Some(value),
        "sort" => {
            patch.sort = Some(if value.trim().is_empty() {
                SortKey::UploadDateDesc
            } else {
                SortKey::from_wire(&value).ok_or_else(|| {
                    format!("unknown sort {value:?} (upload_date_desc, score_desc, score_asc)")
                })?
            });
        }
        other => return Err(format!("unknown filter {other:?}")),
    }
    Ok(patch)
}

fn parse_view(name: &str) -> Result<ViewId, String> {
    match name.to_ascii_lowercase().as_str() {
        "candidates" | "list" => Ok(ViewId::CandidateList),
        "top" => Ok(ViewId::TopCandidates),
        "stats" => Ok(ViewId::PipelineStats),
        other => Err(format!("unknown view {other:?}")),
    }
}

fn parse_report(args: &[String]) -> Result<ReportKind, String> {
    match args.first().map(|arg| arg.to_ascii_lowercase()).as_deref() {
        Some("stats") => Ok(ReportKind::PipelineStats),
        Some("top") => Ok(ReportKind::TopCandidates {
            n: parse_optional_n(args.get(1))?,
        }),
        _ => Err("usage: report stats | report top [n]".to_string()),
    }
}

fn parse_optional_n(raw: Option<&String>) -> Result<u32, String> {
    match raw {
        None => Ok(DEFAULT_TOP_N),
        Some(raw) => raw
            .parse::<u32>()
            .map_err(|_| format!("n must be a whole number, got {raw:?}")),
    }
}

fn parse_id(raw: Option<&String>) -> Result<u64, String> {
    let raw = raw.ok_or("missing id")?;
    raw.parse::<u64>()
        .map_err(|_| format!("id must be a whole number, got {raw:?}"))
}

fn parse_position(args: &[String]) -> Result<Command, String> {
    let usage = "usage: position list | new key=value.. | edit <id> key=value.. | delete <id>";
    let (action, rest) = args.split_first().ok_or(usage)?;
    match action.to_ascii_lowercase().as_str() {
        "list" => Ok(Command::ManagedPositions),
        "new" => Ok(Command::SavePosition {
            id: None,
            changes: parse_assignments(rest, position_field)?,
        }),
        "edit" => Ok(Command::SavePosition {
            id: Some(parse_id(rest.first())?),
            changes: parse_assignments(&rest[rest.len().min(1)..], position_field)?,
        }),
        "delete" => Ok(Command::DeletePosition {
            id: parse_id(rest.first())?,
        }),
        _ => Err(usage.to_string()),
    }
}

fn parse_assignments<F: Copy>(
    args: &[String],
    field_of: fn(&str) -> Option<F>,
) -> Result<Vec<(F, String)>, String> {
    args.iter()
        .map(|arg| {
            let (key, value) = arg
                .split_once('=')
                .ok_or_else(|| format!("expected key=value, got {arg:?}"))?;
            let field = field_of(&key.to_ascii_lowercase())
                .ok_or_else(|| format!("unknown field {key:?}"))?;
            Ok((field, value.to_string()))
        })
        .collect()
}

fn candidate_field(key: &str) -> Option<CandidateField> {
    match key {
        "name" => Some(CandidateField::Name),
        "email" => Some(CandidateField::Email),
        "phone" => Some(CandidateField::Phone),
        "skills" => Some(CandidateField::Skills),
        "years" => Some(CandidateField::Years),
        "status" => Some(CandidateField::Status),
        _ => None,
    }
}

fn position_field(key: &str) -> Option<PositionField> {
    match key {
        "name" => Some(PositionField::Name),
        "skills" => Some(PositionField::Skills),
        "skills-weight" | "sw" => Some(PositionField::SkillsWeight),
        "experience-weight" | "ew" => Some(PositionField::ExperienceWeight),
        _ => None,
    }
}

/// Whitespace-separated words; double quotes group words and may appear
/// mid-word (`name="Ada Lovelace"`).
pub(crate) fn split_args(line: &str) -> Result<Vec<String>, String> {
    let mut args = Vec::new();
    let mut current = String::new();
    let mut in_word = false;
    let mut quoted = false;

    for c in line.chars() {
        match c {
            '"' => {
                quoted = !quoted;
                in_word = true;
            }
            c if c.is_whitespace() && !quoted => {
                if in_word {
                    args.push(std::mem::take(&mut current));
                    in_word = false;
                }
            }
            c => {
                current.push(c);
                in_word = true;
            }
        }
    }
    if quoted {
        return Err("unterminated quote".to_string());
    }
    if in_word {
        args.push(current);
    }
    Ok(args)
}
