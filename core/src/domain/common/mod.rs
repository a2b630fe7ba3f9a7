use url::Url;

pub mod entities;
pub mod services;

pub const DEFAULT_PAGE_SIZE: u32 = 10;
pub const DEFAULT_SEARCH_PAGE_SIZE: u32 = 50;

#[derive(Clone, Debug)]
pub struct OrgdeskConfig {
    pub services: ServicesConfig,
    pub paging: PagingConfig,
}

/// Base URLs of the two backend services.
///
/// Endpoint paths (`/organizations/...`, `/orgdirectory/...`) are appended to these.
#[derive(Clone, Debug)]
pub struct ServicesConfig {
    pub organization_service_url: Url,
    pub orgdirectory_service_url: Url,
    pub request_timeout_secs: Option<u64>,
}

#[derive(Clone, Debug)]
pub struct PagingConfig {
    /// Page size of the organizations table
    pub page_size: u32,
    /// Page size of the filter search panel and the turnover filter
    pub search_page_size: u32,
}

impl Default for PagingConfig {
    fn default() -> Self {
        Self {
            page_size: DEFAULT_PAGE_SIZE,
            search_page_size: DEFAULT_SEARCH_PAGE_SIZE,
        }
    }
}

/// Joins an endpoint path onto a service base URL, keeping any path prefix the base carries.
pub fn endpoint(base: &Url, path: &str) -> String {
    format!(
        "{}/{}",
        base.as_str().trim_end_matches('/'),
        path.trim_start_matches('/')
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_endpoint_keeps_base_prefix() {
        let base = Url::parse("http://localhost:8080/organization").unwrap();
        assert_eq!(
            endpoint(&base, "/organizations/search"),
            "http://localhost:8080/organization/organizations/search"
        );
    }

    #[test]
    fn test_endpoint_with_trailing_slash() {
        let base = Url::parse("http://localhost:8080/").unwrap();
        assert_eq!(
            endpoint(&base, "organizations/7"),
            "http://localhost:8080/organizations/7"
        );
    }
}
