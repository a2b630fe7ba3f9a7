//! Plain text rendering of command results.

use std::fmt::Write;

use orgdesk_core::{
    application::console::ConsoleOutcome,
    domain::{
        organization::{entities::Organization, value_objects::FullNameGroups},
        query::{
            filter::{FilterClause, FilterOperator},
            pagination::PageControls,
            request::PagedResult,
        },
    },
};

pub const EMPTY: &str = "No organizations found";

const HEADERS: [&str; 9] = [
    "ID",
    "Name",
    "Full name",
    "Type",
    "X",
    "Y",
    "Turnover",
    "Street",
    "Created",
];

fn cells(organization: &Organization) -> [String; 9] {
    [
        organization.id.to_string(),
        organization.name.clone(),
        organization.full_name.clone(),
        organization
            .kind
            .map(|kind| kind.to_string())
            .unwrap_or_default(),
        organization.coordinates.x.to_string(),
        organization.coordinates.y.to_string(),
        organization
            .annual_turnover
            .map(|turnover| turnover.to_string())
            .unwrap_or_default(),
        organization.postal_address.street.clone(),
        organization.creation_date.clone().unwrap_or_default(),
    ]
}

/// Aligned table of organizations, one row per record.
pub fn rows(organizations: &[Organization]) -> String {
    if organizations.is_empty() {
        return EMPTY.to_string();
    }

    let rows: Vec<[String; 9]> = organizations.iter().map(cells).collect();
    let mut widths = HEADERS.map(|header| header.chars().count());
    for row in &rows {
        for (width, cell) in widths.iter_mut().zip(row) {
            *width = (*width).max(cell.chars().count());
        }
    }

    let mut out = String::new();
    line(&mut out, &HEADERS.map(str::to_string), &widths);
    line(&mut out, &widths.map(|width| "-".repeat(width)), &widths);
    for row in &rows {
        line(&mut out, row, &widths);
    }
    out.truncate(out.trim_end().len());
    out
}

fn line(out: &mut String, cells: &[String; 9], widths: &[usize; 9]) {
    let padded: Vec<String> = cells
        .iter()
        .zip(widths)
        .map(|(cell, width)| format!("{cell:<width$}"))
        .collect();
    let _ = writeln!(out, "{}", padded.join("  ").trim_end());
}

/// Pagination bar, e.g. `< 1 [2] 3 >`; disabled controls are omitted.
pub fn controls(controls: &PageControls) -> String {
    let mut parts = Vec::new();
    if controls.previous.is_some() {
        parts.push("<".to_string());
    }
    for link in &controls.pages {
        if link.active {
            parts.push(format!("[{}]", link.label));
        } else {
            parts.push(link.label.clone());
        }
    }
    if controls.next.is_some() {
        parts.push(">".to_string());
    }
    parts.join(" ")
}

pub fn page(result: &PagedResult, page_controls: &PageControls) -> String {
    if result.is_empty() {
        return EMPTY.to_string();
    }

    let mut out = rows(&result.organizations);
    let _ = write!(out, "\n\n{}", controls(page_controls));
    if let Some(total) = result.total_elements {
        let _ = write!(out, "\n{total} organizations");
    }
    out
}

pub fn organization(organization: &Organization) -> String {
    let values = cells(organization);
    HEADERS
        .iter()
        .zip(values.iter())
        .map(|(header, value)| format!("{header:<10} {value}"))
        .collect::<Vec<_>>()
        .join("\n")
}

pub fn groups(groups: &FullNameGroups) -> String {
    if groups.is_empty() {
        return EMPTY.to_string();
    }

    groups
        .iter()
        .map(|(full_name, count)| format!("{full_name}: {count}"))
        .collect::<Vec<_>>()
        .join("\n")
}

pub fn filters(clauses: &[FilterClause]) -> String {
    if clauses.is_empty() {
        return "No filters".to_string();
    }

    clauses
        .iter()
        .enumerate()
        .map(|(index, clause)| format!("{index}: {clause}"))
        .collect::<Vec<_>>()
        .join("\n")
}

pub fn operators(operators: &[FilterOperator]) -> String {
    operators
        .iter()
        .map(|operator| format!("{operator} ({})", operator.label()))
        .collect::<Vec<_>>()
        .join("\n")
}

pub fn outcome(outcome: &ConsoleOutcome) -> String {
    match outcome {
        ConsoleOutcome::Table { result, controls } => page(result, controls),
        ConsoleOutcome::SearchResults(result) => rows(&result.organizations),
        ConsoleOutcome::Empty => EMPTY.to_string(),
        ConsoleOutcome::Filters(clauses) => filters(clauses),
        ConsoleOutcome::Operators(list) => operators(list),
    }
}
