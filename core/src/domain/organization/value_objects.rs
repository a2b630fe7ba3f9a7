use std::collections::BTreeMap;

use serde::Serialize;

use crate::domain::organization::entities::{Address, Coordinates, OrganizationType};

/// Organization count per full name, as returned by `group-by-fullname`.
pub type FullNameGroups = BTreeMap<String, i64>;

/// Raw create/update form input, before validation.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct OrganizationForm {
    pub name: String,
    pub full_name: String,
    pub coordinates_x: String,
    pub coordinates_y: String,
    pub annual_turnover: Option<String>,
    pub kind: Option<String>,
    pub street: String,
}

/// Validated create/update body.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OrganizationPayload {
    pub name: String,
    pub full_name: String,
    pub coordinates: Coordinates,
    pub annual_turnover: Option<i64>,
    #[serde(rename = "type")]
    pub kind: Option<OrganizationType>,
    pub postal_address: Address,
}

/// Body of the address-keyed operations.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AddressQuery {
    pub street: String,
}

/// Raw turnover filter input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterByTurnoverInput {
    pub min: String,
    pub max: String,
    pub page: u32,
    pub size: u32,
}

/// Inclusive annual turnover bounds, validated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TurnoverRange {
    pub min: i64,
    pub max: i64,
}

/// Body of `POST /orgdirectory/filter/turnover`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TurnoverQuery {
    pub min_annual_turnover: i64,
    pub max_annual_turnover: i64,
    pub page: u32,
    pub size: u32,
}

impl TurnoverQuery {
    pub fn new(range: TurnoverRange, page: u32, size: u32) -> Self {
        Self {
            min_annual_turnover: range.min,
            max_annual_turnover: range.max,
            page,
            size,
        }
    }
}
