use tracing::{info, warn};

use crate::domain::{
    common::{entities::app_errors::CoreError, services::Service},
    organization::{
        entities::Organization,
        ports::{OrgDirectoryClient, OrganizationClient, OrganizationService},
        validation::{
            ValidationError, parse_turnover_range, validate_organization, validate_street,
        },
        value_objects::{
            AddressQuery, FilterByTurnoverInput, FullNameGroups, OrganizationForm, TurnoverQuery,
        },
    },
    query::request::{PagedResult, SearchRequest},
};

fn rejected<T>(operation: &str, error: ValidationError) -> Result<T, CoreError> {
    warn!(operation, "rejected input: {}", error);
    Err(CoreError::Validation(error))
}

impl<O, D> OrganizationService for Service<O, D>
where
    O: OrganizationClient,
    D: OrgDirectoryClient,
{
    async fn search(&self, request: SearchRequest) -> Result<PagedResult, CoreError> {
        self.organization_client.search(request).await
    }

    async fn get_organization(&self, id: i64) -> Result<Organization, CoreError> {
        self.organization_client.get(id).await
    }

    async fn create_organization(&self, form: OrganizationForm) -> Result<Organization, CoreError> {
        let payload = match validate_organization(&form) {
            Ok(payload) => payload,
            Err(e) => return rejected("create_organization", e),
        };

        let organization = self.organization_client.create(payload).await?;
        info!(id = organization.id, "organization created");

        Ok(organization)
    }

    async fn update_organization(
        &self,
        id: i64,
        form: OrganizationForm,
    ) -> Result<Organization, CoreError> {
        let payload = match validate_organization(&form) {
            Ok(payload) => payload,
            Err(e) => return rejected("update_organization", e),
        };

        let organization = self.organization_client.update(id, payload).await?;
        info!(id, "organization updated");

        Ok(organization)
    }

    async fn delete_organization(&self, id: i64) -> Result<(), CoreError> {
        self.organization_client.delete(id).await?;
        info!(id, "organization deleted");

        Ok(())
    }

    async fn delete_by_address(&self, street: String) -> Result<(), CoreError> {
        let street = match validate_street(&street) {
            Ok(street) => street,
            Err(e) => return rejected("delete_by_address", e),
        };

        self.organization_client
            .delete_by_address(AddressQuery {
                street: street.clone(),
            })
            .await?;
        info!(street = %street, "organization deleted by address");

        Ok(())
    }

    async fn group_by_full_name(&self) -> Result<FullNameGroups, CoreError> {
        self.organization_client.group_by_full_name().await
    }

    async fn count_by_address(&self, street: String) -> Result<i64, CoreError> {
        let street = match validate_street(&street) {
            Ok(street) => street,
            Err(e) => return rejected("count_by_address", e),
        };

        self.organization_client
            .count_by_address(AddressQuery { street })
            .await
    }

    async fn filter_by_turnover(
        &self,
        input: FilterByTurnoverInput,
    ) -> Result<PagedResult, CoreError> {
        let range = match parse_turnover_range(&input.min, &input.max) {
            Ok(range) => range,
            Err(e) => return rejected("filter_by_turnover", e),
        };

        let size = match input.size {
            0 => self.paging.search_page_size,
            size => size,
        };

        self.orgdirectory_client
            .filter_by_turnover(TurnoverQuery::new(range, input.page, size))
            .await
    }

    async fn order(&self, request: SearchRequest) -> Result<PagedResult, CoreError> {
        if request.sort.is_empty() {
            return rejected("order", ValidationError::new("Missing sort criteria"));
        }

        self.orgdirectory_client.order(request).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{
        common::PagingConfig,
        organization::{
            entities::{Address, Coordinates},
            ports::{MockOrgDirectoryClient, MockOrganizationClient},
            value_objects::TurnoverRange,
        },
        query::{filter::FilterSet, sort::SortSpec},
    };

    fn organization(id: i64) -> Organization {
        Organization {
            id,
            name: "Acme".to_string(),
            full_name: "Acme Holdings".to_string(),
            kind: None,
            annual_turnover: None,
            coordinates: Coordinates { x: 1.0, y: 2.0 },
            postal_address: Address {
                street: "Main st. 1".to_string(),
            },
            creation_date: None,
        }
    }

    fn form() -> OrganizationForm {
        OrganizationForm {
            name: "Acme".to_string(),
            full_name: "Acme Holdings".to_string(),
            coordinates_x: "1".to_string(),
            coordinates_y: "123.456789".to_string(),
            annual_turnover: None,
            kind: None,
            street: "Main st. 1".to_string(),
        }
    }

    fn service(
        organization_client: MockOrganizationClient,
        orgdirectory_client: MockOrgDirectoryClient,
    ) -> Service<MockOrganizationClient, MockOrgDirectoryClient> {
        Service::new(
            organization_client,
            orgdirectory_client,
            PagingConfig::default(),
        )
    }

    #[tokio::test]
    async fn test_create_sends_normalized_payload() {
        let mut client = MockOrganizationClient::new();
        client
            .expect_create()
            .withf(|payload| payload.coordinates.y == 123.4568)
            .times(1)
            .returning(|_| Box::pin(async { Ok(organization(1)) }));

        let service = service(client, MockOrgDirectoryClient::new());
        let created = service.create_organization(form()).await.unwrap();
        assert_eq!(created.id, 1);
    }

    #[tokio::test]
    async fn test_invalid_form_never_reaches_client() {
        let mut client = MockOrganizationClient::new();
        client.expect_create().never();
        client.expect_update().never();

        let service = service(client, MockOrgDirectoryClient::new());

        let mut bad = form();
        bad.annual_turnover = Some("0".to_string());
        let error = service.create_organization(bad.clone()).await.unwrap_err();
        assert_eq!(
            error,
            CoreError::Validation(ValidationError::new(
                "Annual turnover must be greater than 0"
            ))
        );

        let error = service.update_organization(3, bad).await.unwrap_err();
        assert!(error.is_local());
    }

    #[tokio::test]
    async fn test_update_passes_id() {
        let mut client = MockOrganizationClient::new();
        client
            .expect_update()
            .withf(|id, _| *id == 9)
            .times(1)
            .returning(|id, _| Box::pin(async move { Ok(organization(id)) }));

        let service = service(client, MockOrgDirectoryClient::new());
        assert_eq!(service.update_organization(9, form()).await.unwrap().id, 9);
    }

    #[tokio::test]
    async fn test_delete_by_address_requires_street() {
        let mut client = MockOrganizationClient::new();
        client.expect_delete_by_address().never();

        let service = service(client, MockOrgDirectoryClient::new());
        let error = service.delete_by_address(String::new()).await.unwrap_err();
        assert_eq!(error.to_string(), "Please enter a street address");
    }

    #[tokio::test]
    async fn test_delete_by_address_propagates_not_found() {
        let mut client = MockOrganizationClient::new();
        client
            .expect_delete_by_address()
            .withf(|query| query.street == "Nowhere")
            .returning(|_| {
                Box::pin(async {
                    Err(CoreError::NotFound(
                        "No organization found with the specified address".to_string(),
                    ))
                })
            });

        let service = service(client, MockOrgDirectoryClient::new());
        let error = service
            .delete_by_address("Nowhere".to_string())
            .await
            .unwrap_err();
        assert!(matches!(error, CoreError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_count_by_address() {
        let mut client = MockOrganizationClient::new();
        client
            .expect_count_by_address()
            .withf(|query| query.street == "M")
            .returning(|_| Box::pin(async { Ok(4) }));

        let service = service(client, MockOrgDirectoryClient::new());
        assert_eq!(service.count_by_address("M".to_string()).await.unwrap(), 4);
    }

    #[tokio::test]
    async fn test_filter_by_turnover_validates_and_defaults_size() {
        let mut directory = MockOrgDirectoryClient::new();
        directory
            .expect_filter_by_turnover()
            .withf(|query| {
                *query == TurnoverQuery::new(TurnoverRange { min: 10, max: 20 }, 0, 50)
            })
            .times(1)
            .returning(|_| Box::pin(async { Ok(PagedResult::default()) }));

        let service = service(MockOrganizationClient::new(), directory);

        let result = service
            .filter_by_turnover(FilterByTurnoverInput {
                min: "10".to_string(),
                max: "20".to_string(),
                page: 0,
                size: 0,
            })
            .await
            .unwrap();
        assert!(result.is_empty());

        let error = service
            .filter_by_turnover(FilterByTurnoverInput {
                min: "30".to_string(),
                max: "20".to_string(),
                page: 0,
                size: 10,
            })
            .await
            .unwrap_err();
        assert_eq!(
            error.to_string(),
            "Min turnover cannot be greater than max turnover"
        );
    }

    #[tokio::test]
    async fn test_order_requires_sort() {
        let mut directory = MockOrgDirectoryClient::new();
        directory.expect_order().never();

        let service = service(MockOrganizationClient::new(), directory);
        let mut request = SearchRequest::table(0, 10, &SortSpec::default());
        request.sort.clear();

        let error = service.order(request).await.unwrap_err();
        assert_eq!(error.to_string(), "Missing sort criteria");
    }

    #[tokio::test]
    async fn test_search_passes_request_through() {
        let mut client = MockOrganizationClient::new();
        client
            .expect_search()
            .withf(|request| request.size == 50 && request.filters.len() == 1)
            .returning(|_| {
                Box::pin(async {
                    Ok(PagedResult {
                        organizations: vec![organization(2)],
                        page: 0,
                        total_pages: 1,
                        ..Default::default()
                    })
                })
            });

        let mut filters = FilterSet::new();
        filters.add("name", "eq", "Acme").unwrap();

        let service = service(client, MockOrgDirectoryClient::new());
        let result = service
            .search(SearchRequest::panel(50, &filters))
            .await
            .unwrap();
        assert_eq!(result.organizations.len(), 1);
    }
}
