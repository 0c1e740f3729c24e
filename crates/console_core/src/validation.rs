//! Local validation run before anything is sent.
use thiserror::Error;

use crate::FilterState;

/// Largest resume accepted for upload (10 MiB).
pub const MAX_RESUME_BYTES: u64 = 10 * 1024 * 1024;

const MAX_SCORE: u64 = 100;
const WEIGHT_TOTAL: i64 = 100;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("{field} must be a whole number")]
    NotAWholeNumber { field: &'static str },
    #[error("{field} must be between {min} and {max}")]
    OutOfRange { field: &'static str, min: u64, max: u64 },
    #[error("Email and Phone are required.")]
    ContactRequired { email_missing: bool, phone_missing: bool },
    #[error("Status must be one of: NEW, IN_REVIEW, REJECTED, HIRED (got {value})")]
    UnknownStatus { value: String },
    #[error("Position name is required")]
    NameRequired,
    #[error("Weights must be numbers")]
    WeightsNotNumbers,
    #[error("Weights must be non-negative")]
    NegativeWeight,
    #[error("Weights must sum to 100 (got {total})")]
    WeightsSum { total: i64 },
    #[error("Please choose a file")]
    NoFile,
    #[error("Only PDF files are accepted")]
    NotPdf,
    #[error("File is too large (max 10MB)")]
    FileTooLarge { max_bytes: u64, actual: u64 },
}

/// Checks the numeric filter inputs. `min_score` is only checked when a
/// position is selected, since it is inert otherwise.
pub fn validate_filters(filters: &FilterState) -> Result<(), ValidationError> {
    parse_optional_whole(&filters.min_years, "Min years")?;
    if filters.is_position_gated() {
        if let Some(score) = parse_optional_whole(&filters.min_score, "Min score")? {
            if score > MAX_SCORE {
                return Err(ValidationError::OutOfRange {
                    field: "Min score",
                    min: 0,
                    max: MAX_SCORE,
                });
            }
        }
    }
    Ok(())
}

fn parse_optional_whole(raw: &str, field: &'static str) -> Result<Option<u64>, ValidationError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }
    trimmed
        .parse::<u64>()
        .map(Some)
        .map_err(|_| ValidationError::NotAWholeNumber { field })
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CandidateStatus {
    #[default]
    New,
    InReview,
    Rejected,
    Hired,
}

impl CandidateStatus {
    pub const VALUES: [CandidateStatus; 4] = [
        CandidateStatus::New,
        CandidateStatus::InReview,
        CandidateStatus::Rejected,
        CandidateStatus::Hired,
    ];

    pub fn as_wire(self) -> &'static str {
        match self {
            CandidateStatus::New => "NEW",
            CandidateStatus::InReview => "IN_REVIEW",
            CandidateStatus::Rejected => "REJECTED",
            CandidateStatus::Hired => "HIRED",
        }
    }

    pub fn from_wire(raw: &str) -> Option<Self> {
        let raw = raw.trim();
        Self::VALUES
            .into_iter()
            .find(|value| value.as_wire().eq_ignore_ascii_case(raw))
    }
}

/// Candidate card form contents, as typed.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CandidateEdit {
    pub full_name: String,
    pub email: String,
    pub phone: String,
    pub skills: String,
    pub years_of_experience: String,
    pub status: String,
}

/// Validated candidate update, ready for the `PUT` body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CandidateUpdate {
    pub full_name: Option<String>,
    pub email: String,
    pub phone: String,
    pub skills: Option<String>,
    pub years_of_experience: Option<u32>,
    pub status: CandidateStatus,
}

pub fn validate_candidate_edit(edit: &CandidateEdit) -> Result<CandidateUpdate, ValidationError> {
    let email = edit.email.trim();
    let phone = edit.phone.trim();
    if email.is_empty() || phone.is_empty() {
        return Err(ValidationError::ContactRequired {
            email_missing: email.is_empty(),
            phone_missing: phone.is_empty(),
        });
    }

    let years = edit.years_of_experience.trim();
    let years_of_experience = if years.is_empty() {
        None
    } else {
        Some(
            years
                .parse::<u32>()
                .map_err(|_| ValidationError::NotAWholeNumber {
                    field: "Years of experience",
                })?,
        )
    };

    let status = if edit.status.trim().is_empty() {
        CandidateStatus::default()
    } else {
        CandidateStatus::from_wire(&edit.status).ok_or_else(|| ValidationError::UnknownStatus {
            value: edit.status.trim().to_string(),
        })?
    };

    Ok(CandidateUpdate {
        full_name: non_empty(&edit.full_name),
        email: email.to_string(),
        phone: phone.to_string(),
        skills: non_empty(&edit.skills),
        years_of_experience,
        status,
    })
}

fn non_empty(raw: &str) -> Option<String> {
    let trimmed = raw.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

/// Position settings form contents, as typed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PositionDraft {
    pub name: String,
    pub required_skills: String,
    pub skills_weight: String,
    pub experience_weight: String,
}

impl Default for PositionDraft {
    fn default() -> Self {
        Self {
            name: String::new(),
            required_skills: String::new(),
            skills_weight: "50".to_string(),
            experience_weight: "50".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PositionInput {
    pub name: String,
    pub required_skills: String,
    pub skills_weight: u32,
    pub experience_weight: u32,
}

pub fn validate_position_draft(draft: &PositionDraft) -> Result<PositionInput, ValidationError> {
    let (Ok(skills), Ok(experience)) = (
        draft.skills_weight.trim().parse::<i64>(),
        draft.experience_weight.trim().parse::<i64>(),
    ) else {
        return Err(ValidationError::WeightsNotNumbers);
    };
    if skills < 0 || experience < 0 {
        return Err(ValidationError::NegativeWeight);
    }
    let total = skills + experience;
    if total != WEIGHT_TOTAL {
        return Err(ValidationError::WeightsSum { total });
    }
    let name = draft.name.trim();
    if name.is_empty() {
        return Err(ValidationError::NameRequired);
    }

    Ok(PositionInput {
        name: name.to_string(),
        required_skills: draft.required_skills.clone(),
        // Both are within 0..=100 after the sum check.
        skills_weight: skills as u32,
        experience_weight: experience as u32,
    })
}

/// Resume pre-flight: a `.pdf` name, a `%PDF` header, and at most 10 MiB.
pub fn validate_resume(file_name: &str, header: &[u8], size_bytes: u64) -> Result<(), ValidationError> {
    if file_name.trim().is_empty() {
        return Err(ValidationError::NoFile);
    }
    let has_pdf_extension = file_name
        .rsplit_once('.')
        .is_some_and(|(_, ext)| ext.eq_ignore_ascii_case("pdf"));
    if !has_pdf_extension || !header.starts_with(b"%PDF") {
        return Err(ValidationError::NotPdf);
    }
    if size_bytes > MAX_RESUME_BYTES {
        return Err(ValidationError::FileTooLarge {
            max_bytes: MAX_RESUME_BYTES,
            actual: size_bytes,
        });
    }
    Ok(())
}
