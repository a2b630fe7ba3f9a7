use reqwest::Client;
use tracing::debug;
use url::Url;

use crate::{
    domain::{
        common::{endpoint, entities::app_errors::CoreError},
        organization::{
            entities::Organization,
            ports::OrganizationClient,
            value_objects::{AddressQuery, FullNameGroups, OrganizationPayload},
        },
        query::request::{PagedResult, SearchRequest},
    },
    infrastructure::http::{decode, execute},
};

const ADDRESS_NOT_FOUND: &str = "No organization found with the specified address";

/// reqwest adapter for the organization service
#[derive(Debug, Clone)]
pub struct HttpOrganizationClient {
    base_url: Url,
    client: Client,
}

impl HttpOrganizationClient {
    pub fn new(base_url: Url, client: Client) -> Self {
        Self { base_url, client }
    }

    fn url(&self, path: &str) -> String {
        endpoint(&self.base_url, path)
    }

    fn not_found(id: i64) -> Option<String> {
        Some(format!("Organization with id {id} not found"))
    }
}

impl OrganizationClient for HttpOrganizationClient {
    async fn search(&self, request: SearchRequest) -> Result<PagedResult, CoreError> {
        let url = self.url("organizations/search");
        debug!(%url, page = request.page, size = request.size, "searching organizations");

        let response = execute(self.client.post(&url).json(&request), None).await?;
        decode(response).await
    }

    async fn get(&self, id: i64) -> Result<Organization, CoreError> {
        let url = self.url(&format!("organizations/{id}"));
        debug!(%url, "fetching organization");

        let response = execute(self.client.get(&url), Self::not_found(id)).await?;
        decode(response).await
    }

    async fn create(&self, payload: OrganizationPayload) -> Result<Organization, CoreError> {
        let url = self.url("organizations");
        debug!(%url, "creating organization");

        let response = execute(self.client.post(&url).json(&payload), None).await?;
        decode(response).await
    }

    async fn update(&self, id: i64, payload: OrganizationPayload) -> Result<Organization, CoreError> {
        let url = self.url(&format!("organizations/{id}"));
        debug!(%url, "updating organization");

        let response = execute(self.client.put(&url).json(&payload), Self::not_found(id)).await?;
        decode(response).await
    }

    async fn delete(&self, id: i64) -> Result<(), CoreError> {
        let url = self.url(&format!("organizations/{id}"));
        debug!(%url, "deleting organization");

        execute(self.client.delete(&url), Self::not_found(id)).await?;
        Ok(())
    }

    async fn delete_by_address(&self, query: AddressQuery) -> Result<(), CoreError> {
        let url = self.url("organizations/by-address");
        debug!(%url, street = %query.street, "deleting organization by address");

        execute(
            self.client.delete(&url).json(&query),
            Some(ADDRESS_NOT_FOUND.to_string()),
        )
        .await?;
        Ok(())
    }

    async fn group_by_full_name(&self) -> Result<FullNameGroups, CoreError> {
        let url = self.url("organizations/group-by-fullname");
        debug!(%url, "grouping organizations by full name");

        let response = execute(self.client.post(&url), None).await?;
        decode(response).await
    }

    async fn count_by_address(&self, query: AddressQuery) -> Result<i64, CoreError> {
        let url = self.url("organizations/count-by-address");
        debug!(%url, street = %query.street, "counting organizations by address");

        let response = execute(self.client.post(&url).json(&query), None).await?;
        decode(response).await
    }
}
