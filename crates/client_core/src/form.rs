//! Form state holder: the job-posting values the user is editing.

use shared::domain::{FieldKind, FormField, FormRecord, UnknownFieldError};
use thiserror::Error;

/// Raw value coming from an input widget.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldInput {
    Text(String),
    Checked(bool),
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FormError {
    #[error(transparent)]
    UnknownField(#[from] UnknownFieldError),
    #[error("field '{field}' does not accept this kind of input")]
    InputKindMismatch { field: FormField },
}

#[derive(Debug, Clone, Default)]
pub struct FormState {
    record: FormRecord,
}

impl FormState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&self) -> &FormRecord {
        &self.record
    }

    pub fn update(&mut self, field: FormField, input: FieldInput) -> Result<(), FormError> {
        match (field.kind(), input) {
            (FieldKind::Checkbox, FieldInput::Checked(checked)) => {
                self.record.has_company_logo = checked;
            }
            (FieldKind::Text, FieldInput::Text(value)) => {
                if let Some(slot) = self.record.text_mut(field) {
                    *slot = value;
                }
            }
            _ => return Err(FormError::InputKindMismatch { field }),
        }
        Ok(())
    }

    pub fn update_named(&mut self, name: &str, input: FieldInput) -> Result<(), FormError> {
        let field = name.parse::<FormField>()?;
        self.update(field, input)
    }

    pub fn reset(&mut self) {
        self.record = FormRecord::default();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stores_text_verbatim() {
        let mut form = FormState::new();
        form.update(FormField::Title, FieldInput::Text("  Data Engineer \n".into()))
            .expect("update");
        assert_eq!(form.record().title, "  Data Engineer \n");
    }

    #[test]
    fn checkbox_round_trips_checked_state() {
        let mut form = FormState::new();
        form.update_named("hasCompanyLogo", FieldInput::Checked(false))
            .expect("uncheck");
        assert!(!form.record().has_company_logo);
        form.update(FormField::HasCompanyLogo, FieldInput::Checked(true))
            .expect("check");
        assert!(form.record().has_company_logo);
    }

    #[test]
    fn rejects_mismatched_input_without_touching_record() {
        let mut form = FormState::new();
        let err = form
            .update(FormField::HasCompanyLogo, FieldInput::Text("yes".into()))
            .expect_err("checkbox takes checked state");
        assert_eq!(
            err,
            FormError::InputKindMismatch {
                field: FormField::HasCompanyLogo
            }
        );
        assert!(form
            .update(FormField::Benefits, FieldInput::Checked(true))
            .is_err());
        assert_eq!(form.record(), &FormRecord::default());
    }

    #[test]
    fn rejects_unknown_field_names() {
        let mut form = FormState::new();
        let err = form
            .update_named("salary", FieldInput::Text("100k".into()))
            .expect_err("unknown");
        assert_eq!(err.to_string(), "unknown form field 'salary'");
    }

    #[test]
    fn every_field_stays_defined_across_arbitrary_updates() {
        let mut form = FormState::new();
        let inputs = [
            FieldInput::Text(String::new()),
            FieldInput::Text("x".into()),
            FieldInput::Checked(false),
            FieldInput::Checked(true),
        ];
        for (step, field) in FormField::ALL.iter().cycle().take(42).enumerate() {
            let _ = form.update(*field, inputs[step % inputs.len()].clone());
            for text_field in FormField::REQUIRED_TEXT {
                assert!(form.record().text(text_field).is_some());
            }
        }
        form.reset();
        assert_eq!(form.record(), &FormRecord::default());
    }
}
