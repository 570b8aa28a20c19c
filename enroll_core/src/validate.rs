use std::collections::BTreeMap;
use validator::Validate;

/// One snapshot of the sign-up form. Rebuilt from the form on every check and
/// dropped on submit; nothing here is ever persisted. Deliberately not
/// serializable: the wire type is `api::register::Req`, which has no
/// confirmation field.
#[derive(Debug, Clone, Validate)]
pub struct SignUpInput {
    /// Email to register the account under.
    #[validate(email(message = "Invalid email address"))]
    pub email: String,

    /// Plaintext password. Only ever sent over the wire, never stored.
    #[validate(length(min = 8, message = "Password must be at least 8 characters long"))]
    pub password: String,

    /// Confirmation copy of the password. Checked against `password` as a
    /// pass over the whole input, so it errors even when the other fields
    /// are individually fine. Never transmitted.
    #[validate(must_match(other = "password", message = "Passwords do not match"))]
    pub password_confirmation: String,
}

impl SignUpInput {
    /// Run every rule over this snapshot. All rules are evaluated (no
    /// short-circuiting), so multiple fields can error at once. Pure: the
    /// same input always produces the same result.
    #[must_use]
    pub fn check(&self) -> ValidationResult {
        match self.validate() {
            Ok(()) => ValidationResult::default(),
            Err(errors) => ValidationResult::from(errors),
        }
    }
}

/// What `SignUpInput::check` found: at most one message per field. Empty
/// means the input is good to submit.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationResult {
    /// Field name to message. A `BTreeMap` so iteration order is stable.
    fields: BTreeMap<String, String>,
}

impl ValidationResult {
    /// `true` when no rule failed.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// The message attached to a field, if that field failed.
    #[must_use]
    pub fn error(&self, field: &str) -> Option<&str> {
        self.fields.get(field).map(String::as_str)
    }

    /// All failures, in field-name order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.fields
            .iter()
            .map(|(field, message)| (field.as_str(), message.as_str()))
    }
}

impl From<validator::ValidationErrors> for ValidationResult {
    fn from(errors: validator::ValidationErrors) -> Self {
        let mut fields = BTreeMap::new();

        for (field, field_errors) in errors.field_errors() {
            // Keep the first message per field. The derive attaches exactly
            // one rule per field here anyway.
            if let Some(message) = field_errors.iter().find_map(|error| error.message.clone()) {
                fields.insert(field.to_string(), message.into_owned());
            }
        }

        Self { fields }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    /// An input that passes every rule; tests tweak one field at a time.
    fn valid_input() -> SignUpInput {
        SignUpInput {
            email: "a@b.com".to_string(),
            password: "longenough1".to_string(),
            password_confirmation: "longenough1".to_string(),
        }
    }

    mod email {
        use super::*;

        #[test]
        fn rejects_plain_words() {
            let input = SignUpInput {
                email: "not-an-email".to_string(),
                ..valid_input()
            };

            assert_eq!(input.check().error("email"), Some("Invalid email address"));
        }

        #[test]
        fn errors_independently_of_password_validity() {
            let input = SignUpInput {
                email: "not-an-email".to_string(),
                password: "short".to_string(),
                password_confirmation: "short".to_string(),
            };

            let result = input.check();

            assert_eq!(result.error("email"), Some("Invalid email address"));
            assert!(result.error("password").is_some());
        }
    }

    mod password {
        use super::*;
        use proptest::{prop_assert_eq, proptest};

        proptest! {
            #[test]
            fn any_short_password_errors(password in "[a-zA-Z0-9]{0,7}", email in ".*") {
                let input = SignUpInput {
                    email,
                    password_confirmation: password.clone(),
                    password,
                };

                let result = input.check();

                prop_assert_eq!(
                    result.error("password"),
                    Some("Password must be at least 8 characters long")
                );
            }
        }
    }

    mod confirmation {
        use super::*;
        use proptest::{prop_assert_eq, prop_assume, proptest};

        proptest! {
            #[test]
            fn any_mismatch_errors_on_the_confirmation_field(
                password in "[a-zA-Z0-9]{8,20}",
                confirmation in "[a-zA-Z0-9]{8,20}",
            ) {
                prop_assume!(password != confirmation);

                let input = SignUpInput {
                    email: "a@b.com".to_string(),
                    password,
                    password_confirmation: confirmation,
                };

                let result = input.check();

                prop_assert_eq!(
                    result.error("password_confirmation"),
                    Some("Passwords do not match")
                );
                prop_assert_eq!(result.error("email"), None);
                prop_assert_eq!(result.error("password"), None);
            }
        }
    }

    mod check {
        use super::*;

        #[test]
        fn valid_input_has_no_errors() {
            assert!(valid_input().check().is_empty());
        }

        #[test]
        fn all_failures_surface_together() {
            let input = SignUpInput {
                email: "nope".to_string(),
                password: "short".to_string(),
                password_confirmation: "different".to_string(),
            };

            let result = input.check();

            assert_eq!(result.iter().count(), 3);
        }

        #[test]
        fn is_idempotent() {
            let input = SignUpInput {
                email: "nope".to_string(),
                password: "short".to_string(),
                password_confirmation: "short".to_string(),
            };

            assert_eq!(input.check(), input.check());
        }
    }
}
