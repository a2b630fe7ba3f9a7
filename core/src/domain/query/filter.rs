use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::domain::query::{errors::QueryError, fields::OrganizationField};

/// Filter operator of a search clause
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FilterOperator {
    Eq,      // equals
    Ne,      // not equals
    Gt,      // greater than
    Gte,     // greater than or equal
    Lt,      // less than
    Lte,     // less than or equal
    Like,    // contains
    In,      // in list (comma-separated)
    Between, // inclusive range (two comma-separated bounds)
}

impl FilterOperator {
    pub fn as_str(&self) -> &'static str {
        match self {
            FilterOperator::Eq => "eq",
            FilterOperator::Ne => "ne",
            FilterOperator::Gt => "gt",
            FilterOperator::Gte => "gte",
            FilterOperator::Lt => "lt",
            FilterOperator::Lte => "lte",
            FilterOperator::Like => "like",
            FilterOperator::In => "in",
            FilterOperator::Between => "between",
        }
    }

    /// Human readable label, as offered in operator pickers.
    pub fn label(&self) -> &'static str {
        match self {
            FilterOperator::Eq => "Equals",
            FilterOperator::Ne => "Not Equals",
            FilterOperator::Gt => "Greater Than",
            FilterOperator::Gte => "Greater Than or Equal",
            FilterOperator::Lt => "Less Than",
            FilterOperator::Lte => "Less Than or Equal",
            FilterOperator::Like => "Contains",
            FilterOperator::In => "In List",
            FilterOperator::Between => "Between",
        }
    }
}

impl fmt::Display for FilterOperator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FilterOperator {
    type Err = QueryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "eq" => Ok(FilterOperator::Eq),
            "ne" => Ok(FilterOperator::Ne),
            "gt" => Ok(FilterOperator::Gt),
            "gte" => Ok(FilterOperator::Gte),
            "lt" => Ok(FilterOperator::Lt),
            "lte" => Ok(FilterOperator::Lte),
            "like" => Ok(FilterOperator::Like),
            "in" => Ok(FilterOperator::In),
            "between" => Ok(FilterOperator::Between),
            _ => Err(QueryError::UnknownOperator(s.to_string())),
        }
    }
}

/// Single filter operand: a number when the input looks numeric, text otherwise.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Scalar {
    Number(serde_json::Number),
    Text(String),
}

impl Scalar {
    /// Numeric coercion: integral input stays an integer, other finite numbers become floats.
    pub fn coerce(token: &str) -> Self {
        if let Ok(integer) = token.parse::<i64>() {
            return Scalar::Number(integer.into());
        }

        match token.parse::<f64>() {
            Ok(number) if number.is_finite() => {
                if number.fract() == 0.0 && number.abs() < i64::MAX as f64 {
                    Scalar::Number((number as i64).into())
                } else {
                    serde_json::Number::from_f64(number)
                        .map(Scalar::Number)
                        .unwrap_or_else(|| Scalar::Text(token.to_string()))
                }
            }
            _ => Scalar::Text(token.to_string()),
        }
    }

    pub fn text(token: &str) -> Self {
        Scalar::Text(token.to_string())
    }
}

impl fmt::Display for Scalar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Scalar::Number(number) => write!(f, "{number}"),
            Scalar::Text(text) => write!(f, "{text:?}"),
        }
    }
}

fn list_tokens(raw: &str, operator: FilterOperator) -> Result<Vec<&str>, QueryError> {
    let tokens: Vec<&str> = raw.split(',').map(str::trim).collect();
    if tokens.iter().any(|token| token.is_empty()) {
        return Err(QueryError::EmptyListValue(operator));
    }
    Ok(tokens)
}

/// Value of a filter clause; its shape must match the clause operator.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum FilterValue {
    Scalar(Scalar),
    List(Vec<Scalar>),
    Range(Scalar, Scalar),
}

impl FilterValue {
    /// Parses raw user input according to the operator it will be used with.
    pub fn parse(raw: &str, operator: FilterOperator) -> Result<Self, QueryError> {
        match operator {
            FilterOperator::In => Ok(FilterValue::List(
                list_tokens(raw, operator)?
                    .into_iter()
                    .map(Scalar::text)
                    .collect(),
            )),
            FilterOperator::Between => {
                let tokens = list_tokens(raw, operator)?;
                match tokens.as_slice() {
                    [low, high] => Ok(FilterValue::Range(
                        Scalar::coerce(low),
                        Scalar::coerce(high),
                    )),
                    _ => Err(QueryError::RangeArity(tokens.len())),
                }
            }
            _ => Ok(FilterValue::Scalar(Scalar::coerce(raw.trim()))),
        }
    }

    fn fits(&self, operator: FilterOperator) -> bool {
        matches!(
            (operator, self),
            (FilterOperator::In, FilterValue::List(_))
                | (FilterOperator::Between, FilterValue::Range(_, _))
                | (
                    FilterOperator::Eq
                        | FilterOperator::Ne
                        | FilterOperator::Gt
                        | FilterOperator::Gte
                        | FilterOperator::Lt
                        | FilterOperator::Lte
                        | FilterOperator::Like,
                    FilterValue::Scalar(_)
                )
        )
    }
}

impl fmt::Display for FilterValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FilterValue::Scalar(scalar) => write!(f, "{scalar}"),
            FilterValue::List(items) => {
                let items: Vec<String> = items.iter().map(ToString::to_string).collect();
                write!(f, "[{}]", items.join(","))
            }
            FilterValue::Range(low, high) => write!(f, "[{low},{high}]"),
        }
    }
}

/// Filter condition on a single field
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FilterClause {
    field: OrganizationField,
    operator: FilterOperator,
    value: FilterValue,
}

impl FilterClause {
    pub fn new(
        field: OrganizationField,
        operator: FilterOperator,
        value: FilterValue,
    ) -> Result<Self, QueryError> {
        if !field.category().allows(operator) {
            return Err(QueryError::IllegalOperator { field, operator });
        }
        if !value.fits(operator) {
            return Err(QueryError::ValueArity(operator));
        }

        Ok(Self {
            field,
            operator,
            value,
        })
    }

    pub fn field(&self) -> OrganizationField {
        self.field
    }

    pub fn operator(&self) -> FilterOperator {
        self.operator
    }

    pub fn value(&self) -> &FilterValue {
        &self.value
    }
}

impl fmt::Display for FilterClause {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {}", self.field, self.operator, self.value)
    }
}

/// Ordered filter clauses; insertion order is display order and request order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FilterSet {
    clauses: Vec<FilterClause>,
}

impl FilterSet {
    pub fn new() -> Self {
        Self {
            clauses: Vec::new(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.clauses.is_empty()
    }

    pub fn len(&self) -> usize {
        self.clauses.len()
    }

    pub fn clauses(&self) -> &[FilterClause] {
        &self.clauses
    }

    /// Builds a clause from raw picker input and appends it.
    ///
    /// Leaves the set untouched when any of the three inputs is blank or the
    /// clause is not valid for the field.
    pub fn add(
        &mut self,
        field: &str,
        operator: &str,
        raw_value: &str,
    ) -> Result<&FilterClause, QueryError> {
        let (field, operator) = (field.trim(), operator.trim());
        if field.is_empty() || operator.is_empty() || raw_value.trim().is_empty() {
            return Err(QueryError::IncompleteFilter);
        }

        let field = field.parse::<OrganizationField>()?;
        let operator = operator.parse::<FilterOperator>()?;
        let value = FilterValue::parse(raw_value, operator)?;

        Ok(self.push(FilterClause::new(field, operator, value)?))
    }

    pub fn push(&mut self, clause: FilterClause) -> &FilterClause {
        self.clauses.push(clause);
        let index = self.clauses.len() - 1;
        &self.clauses[index]
    }

    /// Removes the clause at `index`; out of range is a no-op.
    pub fn remove(&mut self, index: usize) -> Option<FilterClause> {
        if index < self.clauses.len() {
            Some(self.clauses.remove(index))
        } else {
            None
        }
    }

    pub fn clear(&mut self) {
        self.clauses.clear();
    }
}
