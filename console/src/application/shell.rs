//! Line-oriented interactive session driving a [`Console`].

use std::str::FromStr;

use orgdesk_core::{
    application::console::{Console, ConsoleAction},
    domain::{
        common::entities::app_errors::CoreError, organization::ports::OrganizationService,
        query::errors::QueryError,
    },
};
use thiserror::Error;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt};
use tracing::info;

use crate::application::render;

pub const HELP: &str = "\
Commands:
  load PAGE               load a page of the table (zero-based)
  next | prev             move one page forward or back
  sort FIELD              sort by FIELD, toggling its direction
  sort+ FIELD             add FIELD as a secondary sort key, or toggle it
  clear-sorts             back to id ascending
  field FIELD             list the operators FIELD accepts
  filter FIELD OP VALUE   add a filter; `in` and `between` take comma-separated values
  unfilter INDEX          remove a filter
  clear-filters           remove all filters
  search                  run the filter search
  help                    show this help
  quit                    leave the shell";

#[derive(Debug, Clone, PartialEq)]
pub enum ShellCommand {
    Action(ConsoleAction),
    Help,
    Quit,
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ShellError {
    #[error("Unknown command: {0}. Type `help` for the list of commands")]
    UnknownCommand(String),

    #[error("Usage: {0}")]
    Usage(&'static str),

    #[error(transparent)]
    Query(#[from] QueryError),
}

impl FromStr for ShellCommand {
    type Err = ShellError;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let (name, rest) = split_word(line.trim());

        let action = match name {
            "quit" | "exit" => return Ok(ShellCommand::Quit),
            "help" => return Ok(ShellCommand::Help),
            "load" => ConsoleAction::LoadPage(
                rest.parse().map_err(|_| ShellError::Usage("load PAGE"))?,
            ),
            "next" => ConsoleAction::NextPage,
            "prev" => ConsoleAction::PreviousPage,
            "sort" | "sort+" => {
                if rest.is_empty() {
                    return Err(ShellError::Usage("sort FIELD | sort+ FIELD"));
                }
                ConsoleAction::SortClick {
                    field: rest.parse()?,
                    multi_sort: name == "sort+",
                }
            }
            "clear-sorts" => ConsoleAction::ClearSorts,
            "field" => {
                if rest.is_empty() {
                    return Err(ShellError::Usage("field FIELD"));
                }
                ConsoleAction::SelectFilterField(rest.parse()?)
            }
            "filter" => {
                let (field, operator, raw_value) = split_filter(rest);
                ConsoleAction::AddFilter {
                    field: field.to_string(),
                    operator: operator.to_string(),
                    raw_value: raw_value.to_string(),
                }
            }
            "unfilter" => ConsoleAction::RemoveFilter(
                rest.parse().map_err(|_| ShellError::Usage("unfilter INDEX"))?,
            ),
            "clear-filters" => ConsoleAction::ClearFilters,
            "search" => ConsoleAction::Search,
            other => return Err(ShellError::UnknownCommand(other.to_string())),
        };

        Ok(ShellCommand::Action(action))
    }
}

fn split_word(input: &str) -> (&str, &str) {
    match input.split_once(char::is_whitespace) {
        Some((word, rest)) => (word, rest.trim_start()),
        None => (input, ""),
    }
}

/// Splits `"FIELD OP VALUE"`; the value keeps its inner spaces.
pub(crate) fn split_filter(input: &str) -> (&str, &str, &str) {
    let (field, rest) = split_word(input.trim());
    let (operator, value) = split_word(rest);
    (field, operator, value.trim_end())
}

fn describe(error: &CoreError) -> String {
    if error.is_local() {
        error.to_string()
    } else {
        format!("Error: {error}")
    }
}

/// Reads commands from `input` until `quit` or end of input.
///
/// The first table page is loaded before the first prompt.
pub async fn run<S, R, W>(
    console: &mut Console<S>,
    input: R,
    mut output: W,
) -> Result<(), anyhow::Error>
where
    S: OrganizationService,
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    info!("shell started");

    let first = match console.dispatch(ConsoleAction::LoadPage(0)).await {
        Ok(outcome) => render::outcome(&outcome),
        Err(e) => describe(&e),
    };
    write_block(&mut output, &first).await?;

    let mut lines = input.lines();
    while let Some(line) = lines.next_line().await? {
        if line.trim().is_empty() {
            continue;
        }

        let text = match line.parse::<ShellCommand>() {
            Ok(ShellCommand::Quit) => break,
            Ok(ShellCommand::Help) => HELP.to_string(),
            Ok(ShellCommand::Action(action)) => match console.dispatch(action).await {
                Ok(outcome) => render::outcome(&outcome),
                Err(e) => describe(&e),
            },
            Err(e) => e.to_string(),
        };
        write_block(&mut output, &text).await?;
    }

    info!("shell closed");
    Ok(())
}

async fn write_block<W: AsyncWrite + Unpin>(output: &mut W, text: &str) -> std::io::Result<()> {
    output.write_all(text.as_bytes()).await?;
    output.write_all(b"\n").await?;
    output.flush().await
}

#[cfg(test)]
mod tests {
    use super::*;
    use mockito::{Matcher, Server};
    use orgdesk_core::{
        application::create_service,
        domain::{
            common::{OrgdeskConfig, PagingConfig, ServicesConfig},
            query::fields::OrganizationField,
        },
    };
    use serde_json::json;
    use url::Url;

    fn parse(line: &str) -> Result<ShellCommand, ShellError> {
        line.parse()
    }

    fn action(line: &str) -> ConsoleAction {
        match parse(line) {
            Ok(ShellCommand::Action(action)) => action,
            other => panic!("not an action: {other:?}"),
        }
    }

    #[test]
    fn test_parse_navigation() {
        assert_eq!(action("load 3"), ConsoleAction::LoadPage(3));
        assert_eq!(action("  next "), ConsoleAction::NextPage);
        assert_eq!(action("prev"), ConsoleAction::PreviousPage);
        assert_eq!(parse("load x"), Err(ShellError::Usage("load PAGE")));
        assert_eq!(parse("quit"), Ok(ShellCommand::Quit));
        assert_eq!(parse("help"), Ok(ShellCommand::Help));
    }

    #[test]
    fn test_parse_sort() {
        assert_eq!(
            action("sort fullName"),
            ConsoleAction::SortClick {
                field: OrganizationField::FullName,
                multi_sort: false,
            }
        );
        assert_eq!(
            action("sort+ annualTurnover"),
            ConsoleAction::SortClick {
                field: OrganizationField::AnnualTurnover,
                multi_sort: true,
            }
        );
        assert_eq!(
            parse("sort salary"),
            Err(ShellError::Query(QueryError::UnknownField("salary".to_string())))
        );
        assert!(matches!(parse("sort"), Err(ShellError::Usage(_))));
    }

    #[test]
    fn test_parse_filter_keeps_value_spaces() {
        assert_eq!(
            action("filter postalAddress.street like Main st. 1 "),
            ConsoleAction::AddFilter {
                field: "postalAddress.street".to_string(),
                operator: "like".to_string(),
                raw_value: "Main st. 1".to_string(),
            }
        );
        assert_eq!(
            action("filter name"),
            ConsoleAction::AddFilter {
                field: "name".to_string(),
                operator: String::new(),
                raw_value: String::new(),
            }
        );
    }

    #[test]
    fn test_parse_unknown() {
        assert_eq!(
            parse("drop table"),
            Err(ShellError::UnknownCommand("drop".to_string()))
        );
        assert_eq!(action("unfilter 2"), ConsoleAction::RemoveFilter(2));
        assert!(matches!(parse("unfilter -1"), Err(ShellError::Usage(_))));
    }

    #[tokio::test]
    async fn test_session() {
        let mut server = Server::new_async().await;
        server
            .mock("POST", "/organizations/search")
            .match_body(Matcher::PartialJson(json!({"page": 0, "size": 10})))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"organizations":[],"page":0,"totalPages":0}"#)
            .create_async()
            .await;
        let search = server
            .mock("POST", "/organizations/search")
            .match_body(Matcher::PartialJson(json!({
                "size": 50,
                "filters": [{"field": "type", "operator": "in", "value": ["TRUST", "PUBLIC"]}]
            })))
            .with_status(500)
            .with_header("content-type", "application/json")
            .with_body(r#"{"message":"Unknown type PUBLIC"}"#)
            .create_async()
            .await;

        let base = Url::parse(&server.url()).unwrap();
        let service = create_service(OrgdeskConfig {
            services: ServicesConfig {
                organization_service_url: base.clone(),
                orgdirectory_service_url: base,
                request_timeout_secs: None,
            },
            paging: PagingConfig::default(),
        })
        .await
        .unwrap();
        let mut console = Console::new(service, &PagingConfig::default());

        let input = b"field type\nfilter type like TRUST\nfilter type in TRUST, PUBLIC\nsearch\nbogus\nquit\nsearch\n";
        let mut output = Vec::new();
        run(&mut console, &input[..], &mut output).await.unwrap();

        search.assert_async().await;
        let output = String::from_utf8(output).unwrap();
        let blocks: Vec<&str> = output.lines().collect();

        assert_eq!(blocks[0], render::EMPTY);
        assert_eq!(blocks[1..4], ["eq (Equals)", "ne (Not Equals)", "in (In List)"]);
        assert_eq!(blocks[4], "Operator like is not allowed for field type");
        assert_eq!(blocks[5], r#"0: type in ["TRUST","PUBLIC"]"#);
        assert_eq!(
            blocks[6],
            "Error: HTTP error! status: 500, message: Unknown type PUBLIC"
        );
        assert!(blocks[7].starts_with("Unknown command: bogus"));
        assert_eq!(blocks.len(), 8);
    }
}
