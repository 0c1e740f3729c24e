use console_core::{
    validate_candidate_edit, validate_position_draft, validate_resume, CandidateEdit,
    CandidateStatus, PositionDraft, ValidationError, MAX_RESUME_BYTES,
};

#[test]
fn candidate_edit_requires_email_and_phone() {
    let edit = CandidateEdit {
        email: "  ".to_string(),
        phone: "555".to_string(),
        ..CandidateEdit::default()
    };
    assert_eq!(
        validate_candidate_edit(&edit),
        Err(ValidationError::ContactRequired {
            email_missing: true,
            phone_missing: false,
        })
    );
}

#[test]
fn candidate_edit_normalizes_optional_fields() {
    let edit = CandidateEdit {
        full_name: " Ann Lee ".to_string(),
        email: "ann@example.com".to_string(),
        phone: " 555 ".to_string(),
        skills: "   ".to_string(),
        years_of_experience: "4".to_string(),
        status: "in_review".to_string(),
    };
    let update = validate_candidate_edit(&edit).unwrap();
    assert_eq!(update.full_name.as_deref(), Some("Ann Lee"));
    assert_eq!(update.phone, "555");
    assert_eq!(update.skills, None);
    assert_eq!(update.years_of_experience, Some(4));
    assert_eq!(update.status, CandidateStatus::InReview);
}

#[test]
fn candidate_edit_rejects_non_numeric_years() {
    let edit = CandidateEdit {
        email: "a@b.c".to_string(),
        phone: "1".to_string(),
        years_of_experience: "a few".to_string(),
        ..CandidateEdit::default()
    };
    assert!(matches!(
        validate_candidate_edit(&edit),
        Err(ValidationError::NotAWholeNumber { .. })
    ));
}

#[test]
fn position_weights_must_sum_to_one_hundred() {
    let draft = PositionDraft {
        name: "Backend".to_string(),
        skills_weight: "70".to_string(),
        experience_weight: "20".to_string(),
        ..PositionDraft::default()
    };
    assert_eq!(
        validate_position_draft(&draft),
        Err(ValidationError::WeightsSum { total: 90 })
    );

    let negative = PositionDraft {
        skills_weight: "120".to_string(),
        experience_weight: "-20".to_string(),
        ..draft.clone()
    };
    assert_eq!(
        validate_position_draft(&negative),
        Err(ValidationError::NegativeWeight)
    );

    let ok = PositionDraft {
        experience_weight: "30".to_string(),
        ..draft
    };
    let input = validate_position_draft(&ok).unwrap();
    assert_eq!((input.skills_weight, input.experience_weight), (70, 30));
}

#[test]
fn position_requires_a_name() {
    let draft = PositionDraft::default();
    assert_eq!(
        validate_position_draft(&draft),
        Err(ValidationError::NameRequired)
    );
}

#[test]
fn resume_must_be_a_small_pdf() {
    assert_eq!(validate_resume("", b"", 0), Err(ValidationError::NoFile));
    assert_eq!(
        validate_resume("cv.docx", b"PK\x03\x04", 10),
        Err(ValidationError::NotPdf)
    );
    assert_eq!(
        validate_resume("cv.pdf", b"<html>", 10),
        Err(ValidationError::NotPdf)
    );
    assert!(matches!(
        validate_resume("cv.PDF", b"%PDF-1.7", MAX_RESUME_BYTES + 1),
        Err(ValidationError::FileTooLarge { .. })
    ));
    assert_eq!(validate_resume("cv.pdf", b"%PDF-1.7", MAX_RESUME_BYTES), Ok(()));
}

#[test]
fn errors_render_as_user_facing_messages() {
    let weights = ValidationError::WeightsSum { total: 90 };
    assert_eq!(weights.to_string(), "Weights must sum to 100 (got 90)");

    let years = ValidationError::NotAWholeNumber { field: "Min years" };
    assert_eq!(years.to_string(), "Min years must be a whole number");

    let boxed: Box<dyn std::error::Error> = Box::new(ValidationError::NotPdf);
    assert_eq!(boxed.to_string(), "Only PDF files are accepted");
}
