use feedback_core::{FeedbackDraft, FeedbackField, FeedbackValidationError, NewFeedback};

fn draft(name: &str, email: &str, message: &str) -> FeedbackDraft {
    FeedbackDraft {
        name: name.to_string(),
        email: email.to_string(),
        message: message.to_string(),
    }
}

#[test]
fn draft_defaults_to_empty_fields() {
    let draft = FeedbackDraft::default();
    assert!(draft.is_empty());
    for field in FeedbackField::ALL {
        assert_eq!(draft.field(field), "");
    }
}

#[test]
fn validate_reports_missing_fields_for_empty_or_blank_values() {
    for candidate in [
        draft("", "a@b.com", "hi"),
        draft("A", "", "hi"),
        draft("A", "a@b.com", ""),
        draft("   ", "a@b.com", "hi"),
        draft("A", "a@b.com", "\n\t"),
    ] {
        assert_eq!(
            candidate.validate().unwrap_err(),
            FeedbackValidationError::MissingFields,
            "{candidate:?}"
        );
    }
}

#[test]
fn validate_reports_missing_fields_before_bad_email() {
    let err = draft("", "bad-email", "hi").validate().unwrap_err();
    assert_eq!(err, FeedbackValidationError::MissingFields);
}

#[test]
fn validate_rejects_bad_email_shape() {
    let err = draft("A", "bad-email", "hi").validate().unwrap_err();
    assert_eq!(err, FeedbackValidationError::InvalidEmail);
    assert_eq!(err.to_string(), "invalid email");
    assert_eq!(err.user_message(), "Please enter a valid email address.");
}

#[test]
fn validate_passes_values_through_untrimmed() {
    let feedback = draft(" A ", "a@b.com", "hi there ").validate().unwrap();
    assert_eq!(feedback.name(), " A ");
    assert_eq!(feedback.email(), "a@b.com");
    assert_eq!(feedback.message(), "hi there ");
}

#[test]
fn new_feedback_checks_presence_only() {
    assert!(NewFeedback::new("A", "no-at-sign", "hi").is_ok());
    assert_eq!(
        NewFeedback::new("A", "", "hi").unwrap_err(),
        FeedbackValidationError::MissingFields
    );
}

#[test]
fn new_feedback_serializes_exactly_three_fields() {
    let feedback = NewFeedback::new("A", "a@b.com", "hi").unwrap();
    let json = serde_json::to_value(&feedback).unwrap();

    assert_eq!(
        json,
        serde_json::json!({"name": "A", "email": "a@b.com", "message": "hi"})
    );
}

#[test]
fn set_field_replaces_only_the_named_field() {
    let mut draft = draft("A", "a@b.com", "hi");
    draft.set_field(FeedbackField::Message, "updated");

    assert_eq!(draft.name, "A");
    assert_eq!(draft.email, "a@b.com");
    assert_eq!(draft.message, "updated");
}
