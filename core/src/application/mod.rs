use crate::{
    domain::common::{OrgdeskConfig, services::Service},
    infrastructure::{
        http::build_client, organization::HttpOrganizationClient,
        orgdirectory::HttpOrgDirectoryClient,
    },
};

pub mod console;

pub type OrgdeskService = Service<HttpOrganizationClient, HttpOrgDirectoryClient>;

pub async fn create_service(config: OrgdeskConfig) -> Result<OrgdeskService, anyhow::Error> {
    let client = build_client(config.services.request_timeout_secs)?;

    let organization_client =
        HttpOrganizationClient::new(config.services.organization_service_url, client.clone());
    let orgdirectory_client =
        HttpOrgDirectoryClient::new(config.services.orgdirectory_service_url, client);

    Ok(Service::new(
        organization_client,
        orgdirectory_client,
        config.paging,
    ))
}
