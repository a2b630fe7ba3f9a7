use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::domain::query::{errors::QueryError, filter::FilterOperator};

/// Attribute of an organization record that can be filtered or sorted on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum OrganizationField {
    #[serde(rename = "id")]
    Id,
    #[serde(rename = "name")]
    Name,
    #[serde(rename = "fullName")]
    FullName,
    #[serde(rename = "type")]
    Type,
    #[serde(rename = "coordinates.x")]
    CoordinatesX,
    #[serde(rename = "coordinates.y")]
    CoordinatesY,
    #[serde(rename = "annualTurnover")]
    AnnualTurnover,
    #[serde(rename = "postalAddress.street")]
    PostalAddressStreet,
    #[serde(rename = "creationDate")]
    CreationDate,
}

impl OrganizationField {
    pub const ALL: [OrganizationField; 9] = [
        OrganizationField::Id,
        OrganizationField::Name,
        OrganizationField::FullName,
        OrganizationField::Type,
        OrganizationField::CoordinatesX,
        OrganizationField::CoordinatesY,
        OrganizationField::AnnualTurnover,
        OrganizationField::PostalAddressStreet,
        OrganizationField::CreationDate,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            OrganizationField::Id => "id",
            OrganizationField::Name => "name",
            OrganizationField::FullName => "fullName",
            OrganizationField::Type => "type",
            OrganizationField::CoordinatesX => "coordinates.x",
            OrganizationField::CoordinatesY => "coordinates.y",
            OrganizationField::AnnualTurnover => "annualTurnover",
            OrganizationField::PostalAddressStreet => "postalAddress.street",
            OrganizationField::CreationDate => "creationDate",
        }
    }

    pub fn category(&self) -> FieldCategory {
        match self {
            OrganizationField::Type => FieldCategory::Categorical,
            OrganizationField::CoordinatesX | OrganizationField::CoordinatesY => {
                FieldCategory::Coordinate
            }
            _ => FieldCategory::Text,
        }
    }

    /// Operators offered for this field, in display order.
    pub fn operators(&self) -> &'static [FilterOperator] {
        self.category().operators()
    }
}

impl fmt::Display for OrganizationField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OrganizationField {
    type Err = QueryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        OrganizationField::ALL
            .into_iter()
            .find(|field| field.as_str() == s)
            .ok_or_else(|| QueryError::UnknownField(s.to_string()))
    }
}

/// Data category of a field, which decides the legal filter operators.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldCategory {
    Categorical,
    Coordinate,
    Text,
}

const CATEGORICAL_OPERATORS: [FilterOperator; 3] =
    [FilterOperator::Eq, FilterOperator::Ne, FilterOperator::In];

const COORDINATE_OPERATORS: [FilterOperator; 7] = [
    FilterOperator::Eq,
    FilterOperator::Ne,
    FilterOperator::Gt,
    FilterOperator::Gte,
    FilterOperator::Lt,
    FilterOperator::Lte,
    FilterOperator::Between,
];

const TEXT_OPERATORS: [FilterOperator; 9] = [
    FilterOperator::Eq,
    FilterOperator::Ne,
    FilterOperator::Gt,
    FilterOperator::Gte,
    FilterOperator::Lt,
    FilterOperator::Lte,
    FilterOperator::Like,
    FilterOperator::In,
    FilterOperator::Between,
];

impl FieldCategory {
    pub fn operators(&self) -> &'static [FilterOperator] {
        match self {
            FieldCategory::Categorical => &CATEGORICAL_OPERATORS,
            FieldCategory::Coordinate => &COORDINATE_OPERATORS,
            FieldCategory::Text => &TEXT_OPERATORS,
        }
    }

    pub fn allows(&self, operator: FilterOperator) -> bool {
        self.operators().contains(&operator)
    }
}
