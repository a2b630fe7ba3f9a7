use reqwest::Client;
use tracing::debug;
use url::Url;

use crate::{
    domain::{
        common::{endpoint, entities::app_errors::CoreError},
        organization::{ports::OrgDirectoryClient, value_objects::TurnoverQuery},
        query::request::{PagedResult, SearchRequest},
    },
    infrastructure::http::{decode, execute},
};

#[derive(Debug, Clone)]
pub struct HttpOrgDirectoryClient {
    base_url: Url,
    client: Client,
}

impl HttpOrgDirectoryClient {
    pub fn new(base_url: Url, client: Client) -> Self {
        Self { base_url, client }
    }
}

impl OrgDirectoryClient for HttpOrgDirectoryClient {
    async fn filter_by_turnover(&self, query: TurnoverQuery) -> Result<PagedResult, CoreError> {
        let url = endpoint(&self.base_url, "orgdirectory/filter/turnover");
        debug!(
            %url,
            min = query.min_annual_turnover,
            max = query.max_annual_turnover,
            "filtering organizations by turnover"
        );

        let response = execute(self.client.post(&url).json(&query), None).await?;
        decode(response).await
    }

    async fn order(&self, request: SearchRequest) -> Result<PagedResult, CoreError> {
        let url = endpoint(&self.base_url, "orgdirectory/order");
        debug!(%url, terms = request.sort.len(), "ordering organizations");

        let response = execute(self.client.post(&url).json(&request), None).await?;
        decode(response).await
    }
}
