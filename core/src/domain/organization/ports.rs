use std::future::Future;

use crate::domain::{
    common::entities::app_errors::CoreError,
    organization::{
        entities::Organization,
        value_objects::{
            AddressQuery, FilterByTurnoverInput, FullNameGroups, OrganizationForm,
            OrganizationPayload, TurnoverQuery,
        },
    },
    query::request::{PagedResult, SearchRequest},
};

/// Operations the console performs against the backend; input is validated
/// before any client call.
#[cfg_attr(test, mockall::automock)]
pub trait OrganizationService: Send + Sync {
    fn search(
        &self,
        request: SearchRequest,
    ) -> impl Future<Output = Result<PagedResult, CoreError>> + Send;

    fn get_organization(
        &self,
        id: i64,
    ) -> impl Future<Output = Result<Organization, CoreError>> + Send;

    fn create_organization(
        &self,
        form: OrganizationForm,
    ) -> impl Future<Output = Result<Organization, CoreError>> + Send;

    fn update_organization(
        &self,
        id: i64,
        form: OrganizationForm,
    ) -> impl Future<Output = Result<Organization, CoreError>> + Send;

    fn delete_organization(&self, id: i64) -> impl Future<Output = Result<(), CoreError>> + Send;

    fn delete_by_address(
        &self,
        street: String,
    ) -> impl Future<Output = Result<(), CoreError>> + Send;

    fn group_by_full_name(&self) -> impl Future<Output = Result<FullNameGroups, CoreError>> + Send;

    fn count_by_address(
        &self,
        street: String,
    ) -> impl Future<Output = Result<i64, CoreError>> + Send;

    fn filter_by_turnover(
        &self,
        input: FilterByTurnoverInput,
    ) -> impl Future<Output = Result<PagedResult, CoreError>> + Send;

    fn order(
        &self,
        request: SearchRequest,
    ) -> impl Future<Output = Result<PagedResult, CoreError>> + Send;
}

/// Client of the organization service
#[cfg_attr(test, mockall::automock)]
pub trait OrganizationClient: Send + Sync {
    fn search(
        &self,
        request: SearchRequest,
    ) -> impl Future<Output = Result<PagedResult, CoreError>> + Send;

    fn get(&self, id: i64) -> impl Future<Output = Result<Organization, CoreError>> + Send;

    fn create(
        &self,
        payload: OrganizationPayload,
    ) -> impl Future<Output = Result<Organization, CoreError>> + Send;

    fn update(
        &self,
        id: i64,
        payload: OrganizationPayload,
    ) -> impl Future<Output = Result<Organization, CoreError>> + Send;

    fn delete(&self, id: i64) -> impl Future<Output = Result<(), CoreError>> + Send;

    fn delete_by_address(
        &self,
        query: AddressQuery,
    ) -> impl Future<Output = Result<(), CoreError>> + Send;

    fn group_by_full_name(&self) -> impl Future<Output = Result<FullNameGroups, CoreError>> + Send;

    fn count_by_address(
        &self,
        query: AddressQuery,
    ) -> impl Future<Output = Result<i64, CoreError>> + Send;
}

/// Client of the orgdirectory aggregation service
#[cfg_attr(test, mockall::automock)]
pub trait OrgDirectoryClient: Send + Sync {
    fn filter_by_turnover(
        &self,
        query: TurnoverQuery,
    ) -> impl Future<Output = Result<PagedResult, CoreError>> + Send;

    fn order(
        &self,
        request: SearchRequest,
    ) -> impl Future<Output = Result<PagedResult, CoreError>> + Send;
}
