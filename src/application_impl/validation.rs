use crate::application_port::{FieldErrors, ServiceError};
use crate::domain_model::JobKind;

/// Collects field-keyed messages and turns into a `Validation` error at the
/// end, so a response reports every bad field at once.
#[derive(Debug, Default)]
pub struct Validator {
    errors: FieldErrors,
}

impl Validator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, field: &str, message: impl Into<String>) {
        self.errors
            .entry(field.to_string())
            .or_default()
            .push(message.into());
    }

    pub fn finish(self) -> Result<(), ServiceError> {
        if self.errors.is_empty() {
            Ok(())
        } else {
            Err(ServiceError::Validation(self.errors))
        }
    }

    pub fn email(&mut self, field: &str, value: &str) {
        if !is_email(value) {
            self.push(field, format!("{} must be a valid email address", field));
        }
    }

    pub fn password(&mut self, field: &str, value: &str) {
        if value.len() < 8 {
            self.push(field, format!("{} must be more than 8 characters", field));
        } else if value.len() > 64 {
            self.push(field, format!("{} must be less than 64 characters", field));
        }
    }

    pub fn min_len(&mut self, field: &str, value: &str, min: usize) {
        if value.len() < min {
            self.push(
                field,
                format!("{} must be at least {} characters", field, min),
            );
        }
    }

    pub fn non_empty(&mut self, field: &str, value: &str) {
        if value.is_empty() {
            self.push(field, format!("{} must not be empty", field));
        }
    }

    pub fn url(&mut self, field: &str, value: &str) {
        if !is_url(value) {
            self.push(field, format!("{} must be a valid url", field));
        }
    }

    pub fn job_kind(&mut self, field: &str, value: &str) -> Option<JobKind> {
        match JobKind::parse(value) {
            Some(kind) => Some(kind),
            None => {
                self.push(
                    field,
                    "job type must be either FULL_TIME, PART_TIME, INTERNSHIP or CONTRACT",
                );
                None
            }
        }
    }

    pub fn uuid(&mut self, field: &str, value: &str) -> Option<uuid::Uuid> {
        match value.parse::<uuid::Uuid>() {
            Ok(id) => Some(id),
            Err(_) => {
                self.push(field, format!("{} must be a valid uuid", field));
                None
            }
        }
    }
}

fn is_email(value: &str) -> bool {
    let Some((local, domain)) = value.split_once('@') else {
        return false;
    };
    !local.is_empty()
        && !domain.is_empty()
        && domain.contains('.')
        && !domain.starts_with('.')
        && !domain.ends_with('.')
        && !value.contains(char::is_whitespace)
}

fn is_url(value: &str) -> bool {
    let rest = value
        .strip_prefix("https://")
        .or_else(|| value.strip_prefix("http://"));
    matches!(rest, Some(host) if !host.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn collects_all_field_errors() {
        let mut v = Validator::new();
        v.email("email", "not-an-email");
        v.password("password", "short");
        v.url("website", "example.com");
        let err = v.finish().unwrap_err();
        match err {
            ServiceError::Validation(fields) => {
                assert_eq!(fields.len(), 3);
                assert!(fields.contains_key("email"));
                assert!(fields.contains_key("password"));
                assert!(fields.contains_key("website"));
            }
            other => panic!("expected validation error, got {:?}", other),
        }
    }

    #[test]
    fn accepts_valid_inputs() {
        let mut v = Validator::new();
        v.email("email", "jobs@acme.io");
        v.password("password", "longenough");
        v.url("website", "https://acme.io");
        assert!(v.job_kind("type", "FULL_TIME").is_some());
        assert!(v.finish().is_ok());
    }

    #[test]
    fn rejects_odd_emails() {
        assert!(!is_email("@acme.io"));
        assert!(!is_email("a@"));
        assert!(!is_email("a@io"));
        assert!(!is_email("a b@acme.io"));
        assert!(is_email("a.b@acme.io"));
    }
}
