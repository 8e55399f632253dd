//! Form inputs.
//!
//! Every field is received as text so that a rejected submission can
//! be shown back to the user as typed. Missing fields deserialize as
//! empty and are caught by validation.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError, ValidationErrors};

use advisory::credentials;
use advisory::error::AdvisoryError;
use advisory::risk::RiskIndices;

const REQUIRED: &str = "This field is required.";

/// Registration of a new guest account.
#[derive(Debug, Clone, Default, Deserialize, Serialize, Validate)]
pub struct RegisterForm {
    #[serde(default)]
    #[validate(custom(function = "validate_username"))]
    pub username: String,

    #[serde(default, skip_serializing)]
    #[validate(custom(function = "validate_password"))]
    pub password: String,

    #[serde(default, skip_serializing)]
    #[validate(must_match(other = "password", message = "Passwords must match"))]
    pub confirm_password: String,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize, Validate)]
pub struct LoginForm {
    #[serde(default)]
    #[validate(custom(function = "validate_required"))]
    pub username: String,

    #[serde(default, skip_serializing)]
    #[validate(custom(function = "validate_required"))]
    pub password: String,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize, Validate)]
pub struct SearchForm {
    #[serde(default)]
    #[validate(custom(function = "validate_required"))]
    pub search: String,
}

/// Edits to an existing country.
#[derive(Debug, Clone, Default, Deserialize, Serialize, Validate)]
pub struct CountryForm {
    /// The country being edited.
    pub country_id: String,

    #[serde(default)]
    #[validate(custom(function = "validate_required"))]
    pub name: String,

    #[serde(default)]
    #[validate(custom(function = "validate_required"))]
    pub description: String,

    #[serde(default)]
    #[validate(custom(function = "validate_required"))]
    pub travel_advice: String,

    #[serde(default)]
    #[validate(custom(function = "validate_real"))]
    pub crime_index: String,

    #[serde(default)]
    #[validate(custom(function = "validate_real"))]
    pub disaster_risk: String,

    #[serde(default)]
    #[validate(custom(function = "validate_real"))]
    pub corruption_index: String,

    #[serde(default)]
    #[validate(custom(function = "validate_real"))]
    pub health: String,
}

/// A submission to the admin editor.
///
/// The edit phase is recognized by the hidden `country_id` field.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum AdminSubmission {
    Edit(CountryForm),
    Search(SearchForm),
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct VoteForm {
    #[serde(default)]
    pub country_name: String,
}

impl CountryForm {
    /// Fills the form with the current values of a country.
    pub fn from_country(
        id: i64,
        name: &str,
        description: &str,
        travel_advice: &str,
        indices: RiskIndices,
    ) -> Self {
        Self {
            country_id: id.to_string(),
            name: name.to_owned(),
            description: description.to_owned(),
            travel_advice: travel_advice.to_owned(),
            crime_index: indices.crime_index.to_string(),
            disaster_risk: indices.disaster_risk.to_string(),
            corruption_index: indices.corruption_index.to_string(),
            health: indices.health.to_string(),
        }
    }

    /// Returns the edited indices.
    ///
    /// Only meaningful after validation succeeded.
    pub fn indices(&self) -> Option<RiskIndices> {
        Some(RiskIndices {
            crime_index: parse_real(&self.crime_index)?,
            disaster_risk: parse_real(&self.disaster_risk)?,
            corruption_index: parse_real(&self.corruption_index)?,
            health: parse_real(&self.health)?,
        })
    }
}

/// Collects the messages of failed validations by field.
pub fn field_errors(errors: &ValidationErrors) -> HashMap<String, Vec<String>> {
    errors
        .field_errors()
        .into_iter()
        .map(|(field, errors)| {
            let messages = errors
                .iter()
                .map(|e| {
                    e.message
                        .as_ref()
                        .map(|m| m.to_string())
                        .unwrap_or_else(|| e.code.to_string())
                })
                .collect();
            (field.to_string(), messages)
        })
        .collect()
}

fn parse_real(value: &str) -> Option<f64> {
    value.trim().parse::<f64>().ok().filter(|v| v.is_finite())
}

/// Rejects values that are empty or only whitespace.
fn validate_required(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(message_error("required", REQUIRED));
    }

    Ok(())
}

fn validate_real(value: &str) -> Result<(), ValidationError> {
    validate_required(value)?;

    if parse_real(value).is_none() {
        return Err(message_error("real", "Not a valid number."));
    }

    Ok(())
}

fn validate_username(username: &str) -> Result<(), ValidationError> {
    credentials::validate_username(username).map_err(|e| match e {
        AdvisoryError::InvalidUsername { reason, .. } => message_error("username", reason),
        _ => message_error("username", "Invalid username"),
    })
}

fn validate_password(password: &str) -> Result<(), ValidationError> {
    if password.is_empty() {
        return Err(message_error("required", REQUIRED));
    }

    credentials::validate_password(password).map_err(|e| match e {
        AdvisoryError::WeakPassword(criteria) => message_error("password", criteria),
        _ => message_error("password", credentials::PASSWORD_CRITERIA),
    })
}

fn message_error(code: &'static str, message: &'static str) -> ValidationError {
    let mut error = ValidationError::new(code);
    error.message = Some(message.into());
    error
}
