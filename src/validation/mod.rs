// SPDX-License-Identifier: MPL-2.0
//! Form validation and mapping of validation failures to per-field messages.
//!
//! A [`Schema`] checks a form and, when anything is wrong, yields a
//! [`ValidationFailure`]: every failed check in the order it was found.
//! [`map_errors`] collapses that list into the [`FieldErrorMap`] a form reads
//! by field name.

mod rules;

pub use rules::{Fields, Rule, Schema};

use std::collections::HashMap;

/// A single failed check on one field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    pub path: String,
    pub message: String,
}

/// Ordered list of failed checks produced by one validation pass.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationFailure {
    errors: Vec<FieldError>,
}

impl ValidationFailure {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, path: impl Into<String>, message: impl Into<String>) {
        self.errors.push(FieldError {
            path: path.into(),
            message: message.into(),
        });
    }

    #[must_use]
    pub fn errors(&self) -> &[FieldError] {
        &self.errors
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.errors.len()
    }
}

impl FromIterator<FieldError> for ValidationFailure {
    fn from_iter<I: IntoIterator<Item = FieldError>>(iter: I) -> Self {
        Self {
            errors: iter.into_iter().collect(),
        }
    }
}

/// Field path to message. Read by key only; iteration order is unspecified.
pub type FieldErrorMap = HashMap<String, String>;

/// Collapses a failure list into one message per field.
///
/// When a path occurs more than once, the last occurrence wins.
#[must_use]
pub fn map_errors(failure: &ValidationFailure) -> FieldErrorMap {
    let mut map = FieldErrorMap::with_capacity(failure.len());
    for error in failure.errors() {
        map.insert(error.path.clone(), error.message.clone());
    }
    map
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn empty_failure_maps_to_empty_map() {
        assert!(map_errors(&ValidationFailure::new()).is_empty());
    }

    #[test]
    fn one_entry_per_distinct_path() {
        let mut failure = ValidationFailure::new();
        failure.push("email", "E-mail obrigatório.");
        failure.push("password", "Senha obrigatório.");

        let map = map_errors(&failure);
        assert_eq!(map.len(), 2);
        assert_eq!(map["email"], "E-mail obrigatório.");
        assert_eq!(map["password"], "Senha obrigatório.");
    }

    #[test]
    fn last_occurrence_of_a_path_wins() {
        let mut failure = ValidationFailure::new();
        failure.push("password", "first");
        failure.push("email", "only");
        failure.push("password", "second");
        failure.push("password", "third");

        let map = map_errors(&failure);
        assert_eq!(map.len(), 2);
        assert_eq!(map["password"], "third");
        assert_eq!(map["email"], "only");
    }

    #[test]
    fn collects_from_iterator_in_order() {
        let failure: ValidationFailure = ["a", "b", "a"]
            .iter()
            .enumerate()
            .map(|(i, path)| FieldError {
                path: (*path).to_string(),
                message: i.to_string(),
            })
            .collect();

        assert_eq!(failure.len(), 3);
        assert_eq!(map_errors(&failure)["a"], "2");
    }

    fn arb_errors() -> impl Strategy<Value = Vec<(String, String)>> {
        prop::collection::vec(("[a-c]", "[a-z]{0,6}"), 0..24)
    }

    proptest! {
        #[test]
        fn prop_each_path_maps_to_its_last_message(pairs in arb_errors()) {
            let failure: ValidationFailure = pairs
                .iter()
                .map(|(path, message)| FieldError {
                    path: path.clone(),
                    message: message.clone(),
                })
                .collect();
            let map = map_errors(&failure);

            let mut paths: Vec<&String> = pairs.iter().map(|(path, _)| path).collect();
            paths.sort();
            paths.dedup();
            prop_assert_eq!(map.len(), paths.len());

            for path in paths {
                let last = pairs
                    .iter()
                    .rev()
                    .find(|(p, _)| p == path)
                    .map(|(_, message)| message);
                prop_assert_eq!(map.get(path), last);
            }
        }
    }
}
