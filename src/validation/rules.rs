// SPDX-License-Identifier: MPL-2.0
//! Declarative per-field checks.

use super::ValidationFailure;
use crate::i18n::I18n;
use regex::Regex;
use std::sync::LazyLock;

static EMAIL_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("e-mail pattern is a valid regex")
});

/// Read access to a form's field values by name.
pub trait Fields {
    fn get(&self, field: &str) -> Option<&str>;
}

/// One check applied to a field value.
///
/// Every rule except [`Rule::Required`] and [`Rule::Matches`] accepts an
/// empty value, so an empty field only reports "required".
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Rule {
    /// Value must be non-empty after trimming.
    Required { message_key: &'static str },
    /// Value must look like an e-mail address.
    Email { message_key: &'static str },
    /// Value must be at least `min` characters long.
    MinLength {
        min: usize,
        message_key: &'static str,
    },
    /// Value must equal the value of `field`.
    Matches {
        field: &'static str,
        message_key: &'static str,
    },
}

impl Rule {
    fn check<F: Fields + ?Sized>(&self, value: &str, form: &F) -> bool {
        match self {
            Rule::Required { .. } => !value.trim().is_empty(),
            Rule::Email { .. } => value.is_empty() || EMAIL_PATTERN.is_match(value),
            Rule::MinLength { min, .. } => value.is_empty() || value.chars().count() >= *min,
            Rule::Matches { field, .. } => form.get(field).unwrap_or_default() == value,
        }
    }

    fn message(&self, i18n: &I18n) -> String {
        match self {
            Rule::MinLength { min, message_key } => {
                i18n.tr_with_args(message_key, &[("min", &min.to_string())])
            }
            Rule::Required { message_key }
            | Rule::Email { message_key }
            | Rule::Matches { message_key, .. } => i18n.tr(message_key),
        }
    }
}

/// Ordered set of fields and the rules each must pass.
#[derive(Debug, Clone, Default)]
pub struct Schema {
    fields: Vec<(&'static str, Vec<Rule>)>,
}

impl Schema {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn field(mut self, name: &'static str, rules: impl IntoIterator<Item = Rule>) -> Self {
        self.fields.push((name, rules.into_iter().collect()));
        self
    }

    /// Runs every rule of every field and collects all failures.
    ///
    /// Failures are ordered by field declaration, then rule declaration.
    pub fn validate<F: Fields + ?Sized>(
        &self,
        form: &F,
        i18n: &I18n,
    ) -> Result<(), ValidationFailure> {
        let mut failure = ValidationFailure::new();

        for (name, rules) in &self.fields {
            let value = form.get(name).unwrap_or_default();
            for rule in rules {
                if !rule.check(value, form) {
                    failure.push(*name, rule.message(i18n));
                }
            }
        }

        if failure.is_empty() {
            Ok(())
        } else {
            Err(failure)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::validation::map_errors;
    use std::collections::HashMap;

    impl Fields for HashMap<&'static str, &'static str> {
        fn get(&self, field: &str) -> Option<&str> {
            HashMap::get(self, field).copied()
        }
    }

    fn i18n() -> I18n {
        I18n::new(Some("pt-BR".into()), &Config::default())
    }

    fn email_schema() -> Schema {
        Schema::new().field(
            "email",
            [
                Rule::Required {
                    message_key: "validation-email-required",
                },
                Rule::Email {
                    message_key: "validation-email-invalid",
                },
            ],
        )
    }

    #[test]
    fn empty_value_reports_only_required() {
        let form = HashMap::from([("email", "")]);
        let failure = email_schema().validate(&form, &i18n()).unwrap_err();

        assert_eq!(failure.len(), 1);
        assert_eq!(failure.errors()[0].message, "E-mail obrigatório.");
    }

    #[test]
    fn malformed_email_is_rejected() {
        let form = HashMap::from([("email", "not-an-email")]);
        let failure = email_schema().validate(&form, &i18n()).unwrap_err();

        assert_eq!(map_errors(&failure)["email"], "Digite um e-mail válido");
    }

    #[test]
    fn valid_email_passes() {
        let form = HashMap::from([("email", "a@b.com")]);
        assert!(email_schema().validate(&form, &i18n()).is_ok());
    }

    #[test]
    fn missing_field_counts_as_empty() {
        let form: HashMap<&'static str, &'static str> = HashMap::new();
        assert!(email_schema().validate(&form, &i18n()).is_err());
    }

    #[test]
    fn min_length_interpolates_bound() {
        let schema = Schema::new().field(
            "password",
            [Rule::MinLength {
                min: 6,
                message_key: "validation-password-min",
            }],
        );
        let form = HashMap::from([("password", "123")]);
        let failure = schema.validate(&form, &i18n()).unwrap_err();

        assert_eq!(failure.errors()[0].message, "No mínimo 6 dígitos");
    }

    #[test]
    fn matches_compares_other_field() {
        let schema = Schema::new().field(
            "password_confirmation",
            [Rule::Matches {
                field: "password",
                message_key: "validation-password-confirmation-mismatch",
            }],
        );

        let same = HashMap::from([("password", "secret"), ("password_confirmation", "secret")]);
        assert!(schema.validate(&same, &i18n()).is_ok());

        let different = HashMap::from([("password", "secret"), ("password_confirmation", "other")]);
        let failure = schema.validate(&different, &i18n()).unwrap_err();
        assert_eq!(failure.errors()[0].path, "password_confirmation");
    }

    #[test]
    fn failures_follow_declaration_order() {
        let schema = email_schema().field(
            "password",
            [Rule::Required {
                message_key: "validation-password-required",
            }],
        );
        let form = HashMap::from([("email", ""), ("password", "")]);
        let failure = schema.validate(&form, &i18n()).unwrap_err();

        let paths: Vec<_> = failure.errors().iter().map(|e| e.path.as_str()).collect();
        assert_eq!(paths, ["email", "password"]);
    }
}
