//! Identity match rules
//!
//! Decides whether an [`IdentityQuery`] carries enough identifying fields to
//! be sent to the identity registry. Rules are an ordered table evaluated
//! short-circuit: the first rule whose predicate fires supplies the whole
//! error set and nothing after it is consulted.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::{FieldError, ReceptionError};

/// Partial identifying fields for a person search.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IdentityQuery {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date_of_birth: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub prison_number: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pnc_number: Option<String>,
}

impl IdentityQuery {
    pub fn with_first_name(mut self, first_name: impl Into<String>) -> Self {
        self.first_name = Some(first_name.into());
        self
    }

    pub fn with_last_name(mut self, last_name: impl Into<String>) -> Self {
        self.last_name = Some(last_name.into());
        self
    }

    pub fn with_date_of_birth(mut self, date_of_birth: NaiveDate) -> Self {
        self.date_of_birth = Some(date_of_birth);
        self
    }

    pub fn with_prison_number(mut self, prison_number: impl Into<String>) -> Self {
        self.prison_number = Some(prison_number.into());
        self
    }

    pub fn with_pnc_number(mut self, pnc_number: impl Into<String>) -> Self {
        self.pnc_number = Some(pnc_number.into());
        self
    }
}

/// Result of running the match rules over a query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationOutcome {
    Valid,
    Invalid(Vec<FieldError>),
}

impl ValidationOutcome {
    pub fn is_valid(&self) -> bool {
        matches!(self, Self::Valid)
    }

    pub fn into_result(self) -> Result<(), ReceptionError> {
        match self {
            Self::Valid => Ok(()),
            Self::Invalid(errors) => Err(ReceptionError::Validation(errors)),
        }
    }
}

/// One row of the rule table.
struct MatchRule {
    name: &'static str,
    fires: fn(&IdentityQuery) -> bool,
    errors: &'static [(&'static str, &'static str)],
}

// The prisonNumber message in the first rule repeats the last name wording.
// Callers depend on the literal text, so it stays as is.
const MATCH_RULES: &[MatchRule] = &[
    MatchRule {
        name: "no-identifying-field",
        fires: has_no_identifying_field,
        errors: &[
            ("lastName", "Last name is required"),
            ("pncNumber", "PNC number is required"),
            ("prisonNumber", "Last name is required"),
        ],
    },
    MatchRule {
        name: "dob-without-last-name",
        fires: has_dob_without_last_name,
        errors: &[("lastName", "Last name need to be provided together with DoB")],
    },
    MatchRule {
        name: "first-name-without-last-name",
        fires: has_first_name_without_last_name,
        errors: &[(
            "lastName",
            "Last name need to be provided together with first name",
        )],
    },
];

fn has_no_identifying_field(q: &IdentityQuery) -> bool {
    q.date_of_birth.is_none()
        && q.prison_number.is_none()
        && q.pnc_number.is_none()
        && q.last_name.is_none()
}

fn has_dob_without_last_name(q: &IdentityQuery) -> bool {
    q.date_of_birth.is_some() && q.last_name.is_none()
}

fn has_first_name_without_last_name(q: &IdentityQuery) -> bool {
    q.first_name.is_some() && q.last_name.is_none()
}

/// Validate a query against the ordered rule table.
pub fn validate(query: &IdentityQuery) -> ValidationOutcome {
    match MATCH_RULES.iter().find(|rule| (rule.fires)(query)) {
        Some(rule) => {
            tracing::debug!(rule = rule.name, "identity query rejected");
            ValidationOutcome::Invalid(
                rule.errors
                    .iter()
                    .map(|(field, message)| FieldError::new(*field, *message))
                    .collect(),
            )
        }
        None => ValidationOutcome::Valid,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dob() -> NaiveDate {
        NaiveDate::from_ymd_opt(1971, 2, 1).unwrap()
    }

    fn fields(outcome: &ValidationOutcome) -> Vec<(&str, &str)> {
        match outcome {
            ValidationOutcome::Valid => vec![],
            ValidationOutcome::Invalid(errors) => errors
                .iter()
                .map(|e| (e.field.as_str(), e.message.as_str()))
                .collect(),
        }
    }

    #[test]
    fn empty_query_reports_three_errors_in_order() {
        let outcome = validate(&IdentityQuery::default());
        assert_eq!(
            fields(&outcome),
            vec![
                ("lastName", "Last name is required"),
                ("pncNumber", "PNC number is required"),
                ("prisonNumber", "Last name is required"),
            ]
        );
    }

    #[test]
    fn first_name_alone_hits_first_rule_not_third() {
        let outcome = validate(&IdentityQuery::default().with_first_name("Sam"));
        assert_eq!(fields(&outcome).len(), 3);
    }

    #[test]
    fn dob_without_last_name() {
        let outcome = validate(&IdentityQuery::default().with_date_of_birth(dob()));
        assert_eq!(
            fields(&outcome),
            vec![("lastName", "Last name need to be provided together with DoB")]
        );
    }

    #[test]
    fn dob_rule_wins_over_first_name_rule() {
        let query = IdentityQuery::default()
            .with_date_of_birth(dob())
            .with_first_name("Sam")
            .with_prison_number("A1234AA");
        assert_eq!(
            fields(&validate(&query)),
            vec![("lastName", "Last name need to be provided together with DoB")]
        );
    }

    #[test]
    fn first_name_without_last_name() {
        let query = IdentityQuery::default()
            .with_first_name("Sam")
            .with_pnc_number("01/23456A");
        assert_eq!(
            fields(&validate(&query)),
            vec![(
                "lastName",
                "Last name need to be provided together with first name"
            )]
        );
    }

    #[test]
    fn full_name_and_dob_is_valid() {
        let query = IdentityQuery::default()
            .with_last_name("Smith")
            .with_date_of_birth(dob())
            .with_first_name("Sam");
        assert_eq!(validate(&query), ValidationOutcome::Valid);
    }

    #[test]
    fn prison_number_alone_is_valid() {
        let query = IdentityQuery::default().with_prison_number("A1234AA");
        assert!(validate(&query).is_valid());
    }

    #[test]
    fn pnc_alone_is_valid() {
        let query = IdentityQuery::default().with_pnc_number("01/23456A");
        assert!(validate(&query).is_valid());
    }

    #[test]
    fn last_name_alone_is_valid() {
        assert!(validate(&IdentityQuery::default().with_last_name("Smith")).is_valid());
    }

    #[test]
    fn into_result_carries_field_errors() {
        let err = validate(&IdentityQuery::default())
            .into_result()
            .unwrap_err();
        assert_eq!(err.field_errors().len(), 3);
    }

    #[test]
    fn deserializes_camel_case_and_skips_absent_fields() {
        let query: IdentityQuery = serde_json::from_str(
            r#"{"lastName":"Smith","dateOfBirth":"1971-02-01","firstName":"Sam"}"#,
        )
        .unwrap();
        assert_eq!(query.date_of_birth, Some(dob()));
        assert!(query.prison_number.is_none());

        let json = serde_json::to_value(&IdentityQuery::default().with_prison_number("A1234AA"))
            .unwrap();
        assert_eq!(json, serde_json::json!({"prisonNumber": "A1234AA"}));
    }
}

// ---------------------------------------------------------------------------
// Property tests
// ---------------------------------------------------------------------------
