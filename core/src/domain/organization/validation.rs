//! Client-side constraints applied before create/update submissions and the
//! orgdirectory turnover filter. Bounds mirror the backend column types.

use std::num::IntErrorKind;

use thiserror::Error;
use validator::{ValidateLength, ValidateRange};

use crate::domain::organization::{
    entities::{Address, Coordinates, OrganizationType},
    value_objects::{OrganizationForm, OrganizationPayload, TurnoverRange},
};

pub const MAX_TEXT_LENGTH: u64 = 255;
pub const MAX_TURNOVER: i64 = i32::MAX as i64;
pub const COORDINATE_X_LIMIT: f64 = f64::MAX;
pub const COORDINATE_Y_LIMIT: f64 = f32::MAX as f64;
/// Significant digits kept for `coordinates.y`, matching single-precision storage.
pub const COORDINATE_Y_DIGITS: usize = 7;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{0}")]
pub struct ValidationError(String);

impl ValidationError {
    pub fn new(message: impl Into<String>) -> Self {
        Self(message.into())
    }

    pub fn message(&self) -> &str {
        &self.0
    }
}

/// Validates a create/update form and builds the request body.
///
/// Rules run in a fixed order and the first violation is reported. Both
/// coordinates are parsed before any other rule runs.
pub fn validate_organization(form: &OrganizationForm) -> Result<OrganizationPayload, ValidationError> {
    let x = parse_coordinate(&form.coordinates_x, "Coordinate X must be a valid number")?;
    let y = normalize_single_precision(parse_coordinate(
        &form.coordinates_y,
        "Coordinate Y must be a valid number",
    )?);

    let name = required_text(&form.name, "Name is required", "Name must not exceed 255 characters")?;
    let full_name = required_text(
        &form.full_name,
        "Full name is required",
        "Full name must not exceed 255 characters",
    )?;
    let street = validate_street(&form.street)?;

    if !x.validate_range(Some(-COORDINATE_X_LIMIT), Some(COORDINATE_X_LIMIT), None, None) {
        return Err(ValidationError::new("Coordinate X is out of valid range for Double"));
    }
    if !y.validate_range(Some(-COORDINATE_Y_LIMIT), Some(COORDINATE_Y_LIMIT), None, None) {
        return Err(ValidationError::new("Coordinate Y is out of valid range for Float"));
    }

    let annual_turnover = match non_blank(form.annual_turnover.as_deref()) {
        Some(raw) => Some(parse_turnover(raw)?),
        None => None,
    };

    let kind = match non_blank(form.kind.as_deref()) {
        Some(raw) => Some(raw.parse::<OrganizationType>()?),
        None => None,
    };

    Ok(OrganizationPayload {
        name,
        full_name,
        coordinates: Coordinates { x, y },
        annual_turnover,
        kind,
        postal_address: Address { street },
    })
}

/// Street used by create/update and by the address-keyed operations.
pub fn validate_street(street: &str) -> Result<String, ValidationError> {
    required_text(
        street,
        "Please enter a street address",
        "Street address must not exceed 255 characters",
    )
}

/// Rounds to seven significant digits, the precision a single-precision float keeps.
///
/// Lossy on purpose: `123.456789` becomes `123.4568`.
pub fn normalize_single_precision(value: f64) -> f64 {
    if !value.is_finite() || value == 0.0 {
        return value;
    }

    format!("{:.*e}", COORDINATE_Y_DIGITS - 1, value)
        .parse()
        .unwrap_or(value)
}

/// Validates the bounds of the orgdirectory turnover filter.
pub fn parse_turnover_range(min: &str, max: &str) -> Result<TurnoverRange, ValidationError> {
    let (Ok(min), Ok(max)) = (min.trim().parse::<i64>(), max.trim().parse::<i64>()) else {
        return Err(ValidationError::new(
            "Please enter both min and max turnover values",
        ));
    };

    if min < 0 || max < 0 {
        return Err(ValidationError::new("Turnover values cannot be negative"));
    }
    if min > MAX_TURNOVER || max > MAX_TURNOVER {
        return Err(ValidationError::new(
            "Turnover values cannot exceed 2,147,483,647",
        ));
    }
    if min > max {
        return Err(ValidationError::new(
            "Min turnover cannot be greater than max turnover",
        ));
    }

    Ok(TurnoverRange { min, max })
}

fn required_text(
    value: &str,
    missing: &str,
    too_long: &str,
) -> Result<String, ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::new(missing));
    }
    if !value.to_string().validate_length(None, Some(MAX_TEXT_LENGTH), None) {
        return Err(ValidationError::new(too_long));
    }
    Ok(value.to_string())
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|value| !value.is_empty())
}

/// Parses a coordinate; overflowing input parses as infinity and fails the range check.
fn parse_coordinate(raw: &str, invalid: &str) -> Result<f64, ValidationError> {
    match raw.trim().parse::<f64>() {
        Ok(value) if !value.is_nan() => Ok(value),
        _ => Err(ValidationError::new(invalid)),
    }
}

fn parse_turnover(raw: &str) -> Result<i64, ValidationError> {
    let turnover = raw.parse::<i64>().map_err(|e| match e.kind() {
        IntErrorKind::PosOverflow => {
            ValidationError::new("Annual turnover exceeds maximum value for Integer")
        }
        IntErrorKind::NegOverflow => ValidationError::new("Annual turnover must be greater than 0"),
        _ => ValidationError::new("Annual turnover must be an integer"),
    })?;

    if !turnover.validate_range(Some(1), None, None, None) {
        return Err(ValidationError::new("Annual turnover must be greater than 0"));
    }
    if !turnover.validate_range(None, Some(MAX_TURNOVER), None, None) {
        return Err(ValidationError::new(
            "Annual turnover exceeds maximum value for Integer",
        ));
    }

    Ok(turnover)
}
