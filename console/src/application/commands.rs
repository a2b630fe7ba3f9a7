use anyhow::Context;
use orgdesk_core::{
    application::console::Console,
    domain::{
        common::PagingConfig,
        organization::{
            ports::OrganizationService,
            value_objects::{FilterByTurnoverInput, OrganizationForm},
        },
        query::{
            filter::FilterSet,
            pagination::PageControls,
            request::{PagedResult, SearchRequest},
            sort::{SortSpec, SortTerm},
        },
    },
};
use serde::Serialize;
use serde_json::json;
use tokio::io::{BufReader, stdin, stdout};

use crate::{
    application::{render, shell},
    args::{Command, FormArgs, OutputFormat},
};

impl From<FormArgs> for OrganizationForm {
    fn from(form: FormArgs) -> Self {
        OrganizationForm {
            name: form.name,
            full_name: form.full_name,
            coordinates_x: form.x,
            coordinates_y: form.y,
            annual_turnover: form.annual_turnover,
            kind: form.kind,
            street: form.street,
        }
    }
}

/// Runs one subcommand and returns its rendered result.
pub async fn execute<S: OrganizationService>(
    command: Command,
    service: S,
    paging: &PagingConfig,
    output: OutputFormat,
) -> Result<String, anyhow::Error> {
    match command {
        Command::List {
            page,
            sort,
            then_by,
        } => {
            let request = SearchRequest::table(page, paging.page_size, &sort_spec(&sort, &then_by));
            let result = service.search(request).await?;
            emit(output, &result, paged)
        }
        Command::Search { filters } => {
            let mut set = FilterSet::new();
            for raw in &filters {
                let (field, operator, value) = shell::split_filter(raw);
                set.add(field, operator, value)
                    .with_context(|| format!("invalid filter {raw:?}"))?;
            }

            let result = service
                .search(SearchRequest::panel(paging.search_page_size, &set))
                .await?;
            emit(output, &result, |result| render::rows(&result.organizations))
        }
        Command::Order {
            page,
            sort,
            then_by,
        } => {
            let request = SearchRequest::table(page, paging.page_size, &sort_spec(&sort, &then_by));
            let result = service.order(request).await?;
            emit(output, &result, paged)
        }
        Command::Get { id } => {
            let organization = service.get_organization(id).await?;
            emit(output, &organization, render::organization)
        }
        Command::Create { form } => {
            let organization = service.create_organization(form.into()).await?;
            emit(output, &organization, render::organization)
        }
        Command::Update { id, form } => {
            let organization = service.update_organization(id, form.into()).await?;
            emit(output, &organization, render::organization)
        }
        Command::Delete { id } => {
            service.delete_organization(id).await?;
            emit(output, &json!({ "deleted": id }), |_| {
                format!("Organization {id} deleted")
            })
        }
        Command::DeleteByAddress { street } => {
            service.delete_by_address(street.clone()).await?;
            emit(output, &json!({ "deletedAddress": street }), |_| {
                format!("Organization at {street} deleted")
            })
        }
        Command::GroupByFullName => {
            let groups = service.group_by_full_name().await?;
            emit(output, &groups, render::groups)
        }
        Command::CountByAddress { street } => {
            let count = service.count_by_address(street.clone()).await?;
            emit(output, &json!({ "street": street, "count": count }), |_| {
                format!("{count} organizations at {street}")
            })
        }
        Command::Turnover {
            min,
            max,
            page,
            size,
        } => {
            let result = service
                .filter_by_turnover(FilterByTurnoverInput {
                    min,
                    max,
                    page,
                    size: size.unwrap_or(0),
                })
                .await?;
            emit(output, &result, paged)
        }
        Command::Shell => {
            let mut console = Console::new(service, paging);
            shell::run(&mut console, BufReader::new(stdin()), stdout()).await?;
            Ok(String::new())
        }
    }
}

/// Replays `--sort` terms as plain header clicks and `--then-by` terms as
/// multi-sort clicks, then settles each term on its requested direction.
pub fn sort_spec(sort: &[SortTerm], then_by: &[SortTerm]) -> SortSpec {
    let mut spec = SortSpec::new();
    for term in sort {
        click(&mut spec, term, false);
    }
    for term in then_by {
        click(&mut spec, term, true);
    }
    spec
}

fn click(spec: &mut SortSpec, term: &SortTerm, multi_sort: bool) {
    spec.handle_click(term.field, multi_sort);
    if spec
        .get(term.field)
        .is_some_and(|current| current.direction != term.direction)
    {
        spec.handle_click(term.field, true);
    }
}

fn paged(result: &PagedResult) -> String {
    render::page(result, &PageControls::new(result.page, result.total_pages))
}

fn emit<T: Serialize>(
    output: OutputFormat,
    value: &T,
    text: impl FnOnce(&T) -> String,
) -> Result<String, anyhow::Error> {
    match output {
        OutputFormat::Table => Ok(text(value)),
        OutputFormat::Json => Ok(serde_json::to_string_pretty(value)?),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mockito::{Matcher, Server};
    use orgdesk_core::{
        application::{OrgdeskService, create_service},
        domain::{
            common::{OrgdeskConfig, ServicesConfig, entities::app_errors::CoreError},
            query::{
                errors::QueryError,
                fields::OrganizationField::{AnnualTurnover, Id, Name},
                sort::SortDirection,
            },
        },
    };
    use url::Url;

    async fn service(server: &Server) -> OrgdeskService {
        let base = Url::parse(&server.url()).unwrap();
        create_service(OrgdeskConfig {
            services: ServicesConfig {
                organization_service_url: base.clone(),
                orgdirectory_service_url: base,
                request_timeout_secs: Some(5),
            },
            paging: PagingConfig::default(),
        })
        .await
        .unwrap()
    }

    fn summary(spec: &SortSpec) -> Vec<(String, SortDirection, u32)> {
        spec.terms()
            .iter()
            .map(|term| (term.field.to_string(), term.direction, term.priority))
            .collect()
    }

    #[test]
    fn test_sort_spec_without_flags_is_default() {
        assert_eq!(sort_spec(&[], &[]), SortSpec::default());
    }

    #[test]
    fn test_sort_spec_keeps_requested_directions() {
        let spec = sort_spec(
            &[SortTerm::new(AnnualTurnover, SortDirection::Desc, 1)],
            &[SortTerm::new(Name, SortDirection::Asc, 1)],
        );
        assert_eq!(
            summary(&spec),
            vec![
                ("annualTurnover".to_string(), SortDirection::Desc, 1),
                ("name".to_string(), SortDirection::Asc, 2),
            ]
        );

        let spec = sort_spec(&[SortTerm::new(Id, SortDirection::Asc, 1)], &[]);
        assert_eq!(spec, SortSpec::default());
    }

    #[tokio::test]
    async fn test_list_renders_table() {
        let mut server = Server::new_async().await;
        server
            .mock("POST", "/organizations/search")
            .match_body(Matcher::PartialJson(json!({"page": 1, "size": 10})))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(
                json!({
                    "organizations": [{
                        "id": 11,
                        "name": "Acme",
                        "fullName": "Acme Holdings",
                        "coordinates": {"x": 1.0, "y": 2.0},
                        "postalAddress": {"street": "Main st. 1"}
                    }],
                    "page": 1,
                    "totalPages": 2
                })
                .to_string(),
            )
            .create_async()
            .await;

        let rendered = execute(
            Command::List {
                page: 1,
                sort: vec![],
                then_by: vec![],
            },
            service(&server).await,
            &PagingConfig::default(),
            OutputFormat::Table,
        )
        .await
        .unwrap();

        assert!(rendered.contains("Acme Holdings"));
        assert!(rendered.ends_with("< 1 [2]"));
    }

    #[tokio::test]
    async fn test_search_rejects_bad_filter_before_request() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("POST", "/organizations/search")
            .expect(0)
            .create_async()
            .await;

        let error = execute(
            Command::Search {
                filters: vec!["annualTurnover between 10".to_string()],
            },
            service(&server).await,
            &PagingConfig::default(),
            OutputFormat::Table,
        )
        .await
        .unwrap_err();

        mock.assert_async().await;
        assert_eq!(
            error.downcast_ref::<QueryError>(),
            Some(&QueryError::RangeArity(1))
        );
    }

    #[tokio::test]
    async fn test_create_validation_error_never_sends() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("POST", "/organizations")
            .expect(0)
            .create_async()
            .await;

        let form = FormArgs {
            name: "Acme".to_string(),
            full_name: "Acme Holdings".to_string(),
            x: "abc".to_string(),
            y: "1".to_string(),
            annual_turnover: None,
            kind: None,
            street: "Main st. 1".to_string(),
        };
        let error = execute(
            Command::Create { form },
            service(&server).await,
            &PagingConfig::default(),
            OutputFormat::Table,
        )
        .await
        .unwrap_err();

        mock.assert_async().await;
        assert_eq!(error.to_string(), "Coordinate X must be a valid number");
        assert!(error.downcast_ref::<CoreError>().is_some_and(CoreError::is_local));
    }

    #[tokio::test]
    async fn test_count_by_address_json_output() {
        let mut server = Server::new_async().await;
        server
            .mock("POST", "/organizations/count-by-address")
            .with_status(200)
            .with_body("2")
            .create_async()
            .await;

        let rendered = execute(
            Command::CountByAddress {
                street: "Main".to_string(),
            },
            service(&server).await,
            &PagingConfig::default(),
            OutputFormat::Json,
        )
        .await
        .unwrap();

        let value: serde_json::Value = serde_json::from_str(&rendered).unwrap();
        assert_eq!(value, json!({"street": "Main", "count": 2}));
    }

    #[tokio::test]
    async fn test_turnover_defaults_to_search_page_size() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("POST", "/orgdirectory/filter/turnover")
            .match_body(Matcher::Json(json!({
                "minAnnualTurnover": 100,
                "maxAnnualTurnover": 200,
                "page": 0,
                "size": 50
            })))
            .with_status(200)
            .with_body(r#"{"organizations":[],"page":0,"totalPages":0}"#)
            .create_async()
            .await;

        let rendered = execute(
            Command::Turnover {
                min: "100".to_string(),
                max: "200".to_string(),
                page: 0,
                size: None,
            },
            service(&server).await,
            &PagingConfig::default(),
            OutputFormat::Table,
        )
        .await
        .unwrap();

        mock.assert_async().await;
        assert_eq!(rendered, render::EMPTY);
    }
}
