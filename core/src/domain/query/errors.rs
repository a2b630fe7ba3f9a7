use thiserror::Error;

use crate::domain::query::{fields::OrganizationField, filter::FilterOperator};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum QueryError {
    #[error("Please fill all filter fields")]
    IncompleteFilter,

    #[error("Unknown field: {0}")]
    UnknownField(String),

    #[error("Unknown filter operator: {0}")]
    UnknownOperator(String),

    #[error("Operator {operator} is not allowed for field {field}")]
    IllegalOperator {
        field: OrganizationField,
        operator: FilterOperator,
    },

    #[error("Between expects exactly two comma-separated values, got {0}")]
    RangeArity(usize),

    #[error("Operator {0} does not accept empty values in its list")]
    EmptyListValue(FilterOperator),

    #[error("Operator {0} does not accept this kind of value")]
    ValueArity(FilterOperator),
}
