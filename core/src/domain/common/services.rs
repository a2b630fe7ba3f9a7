use crate::domain::{
    common::PagingConfig,
    organization::ports::{OrgDirectoryClient, OrganizationClient},
};

/// Domain service over the backend client ports.
#[derive(Clone)]
pub struct Service<O, D>
where
    O: OrganizationClient,
    D: OrgDirectoryClient,
{
    pub(crate) organization_client: O,
    pub(crate) orgdirectory_client: D,
    pub(crate) paging: PagingConfig,
}

impl<O, D> Service<O, D>
where
    O: OrganizationClient,
    D: OrgDirectoryClient,
{
    pub fn new(organization_client: O, orgdirectory_client: D, paging: PagingConfig) -> Self {
        Self {
            organization_client,
            orgdirectory_client,
            paging,
        }
    }
}
