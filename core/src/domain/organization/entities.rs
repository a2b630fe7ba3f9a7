use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::domain::organization::validation::ValidationError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OrganizationType {
    Commercial,
    Government,
    Trust,
    PrivateLimitedCompany,
    OpenJointStockCompany,
}

impl OrganizationType {
    pub const ALL: [OrganizationType; 5] = [
        OrganizationType::Commercial,
        OrganizationType::Government,
        OrganizationType::Trust,
        OrganizationType::PrivateLimitedCompany,
        OrganizationType::OpenJointStockCompany,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            OrganizationType::Commercial => "COMMERCIAL",
            OrganizationType::Government => "GOVERNMENT",
            OrganizationType::Trust => "TRUST",
            OrganizationType::PrivateLimitedCompany => "PRIVATE_LIMITED_COMPANY",
            OrganizationType::OpenJointStockCompany => "OPEN_JOINT_STOCK_COMPANY",
        }
    }
}

impl fmt::Display for OrganizationType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OrganizationType {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        OrganizationType::ALL
            .into_iter()
            .find(|kind| kind.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| ValidationError::new(format!("Unknown organization type: {s}")))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub x: f64,
    pub y: f64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Address {
    pub street: String,
}

/// Organization record as returned by the organization service
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Organization {
    pub id: i64,
    pub name: String,
    pub full_name: String,
    #[serde(rename = "type", default)]
    pub kind: Option<OrganizationType>,
    #[serde(default)]
    pub annual_turnover: Option<i64>,
    pub coordinates: Coordinates,
    pub postal_address: Address,
    /// Backend-formatted timestamp, passed through untouched
    #[serde(default)]
    pub creation_date: Option<String>,
}
