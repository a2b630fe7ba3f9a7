use clap::{Parser, Subcommand, ValueEnum};
use orgdesk_core::domain::{
    common::{OrgdeskConfig, PagingConfig, ServicesConfig},
    query::sort::SortTerm,
};
use url::Url;
use validator::Validate;

#[derive(Debug, Clone, Parser)]
#[command(name = "orgdesk", version, about = "Admin console for organization records")]
pub struct Args {
    #[command(flatten)]
    pub services: ServicesArgs,

    #[command(flatten)]
    pub paging: PagingArgs,

    #[command(flatten)]
    pub log: LogArgs,

    /// Rendering of command results
    #[arg(long, env = "ORGDESK_OUTPUT", value_enum, default_value_t = OutputFormat::Table)]
    pub output: OutputFormat,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Clone, clap::Args)]
pub struct ServicesArgs {
    #[arg(
        long = "organization-service-url",
        env = "ORGANIZATION_SERVICE_URL",
        default_value = "http://localhost:8080/organization"
    )]
    pub organization_service_url: Url,

    #[arg(
        long = "orgdirectory-service-url",
        env = "ORGDIRECTORY_SERVICE_URL",
        default_value = "http://localhost:8080/orgdirectory"
    )]
    pub orgdirectory_service_url: Url,

    /// Per-request timeout; unset waits indefinitely
    #[arg(long = "request-timeout-secs", env = "REQUEST_TIMEOUT_SECS")]
    pub request_timeout_secs: Option<u64>,
}

#[derive(Debug, Clone, clap::Args, Validate)]
pub struct PagingArgs {
    #[arg(long = "page-size", env = "PAGE_SIZE", default_value_t = 10)]
    #[validate(range(min = 1, max = 1000, message = "page size must be between 1 and 1000"))]
    pub page_size: u32,

    #[arg(long = "search-page-size", env = "SEARCH_PAGE_SIZE", default_value_t = 50)]
    #[validate(range(
        min = 1,
        max = 1000,
        message = "search page size must be between 1 and 1000"
    ))]
    pub search_page_size: u32,
}

#[derive(Debug, Clone, clap::Args)]
pub struct LogArgs {
    /// Emit log lines as JSON
    #[arg(long = "log-json", env = "LOG_JSON", default_value_t = false)]
    pub log_json: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Table,
    Json,
}

#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// Show one page of the organizations table
    List {
        #[arg(long, default_value_t = 0)]
        page: u32,

        /// Sort by FIELD, `-FIELD` for descending; replaces the current sort
        #[arg(long, allow_hyphen_values = true)]
        sort: Vec<SortTerm>,

        /// Add FIELD as a secondary sort key
        #[arg(long = "then-by", allow_hyphen_values = true)]
        then_by: Vec<SortTerm>,
    },
    /// Search with filters, e.g. --filter "annualTurnover between 10,20"
    Search {
        #[arg(long = "filter", required = true)]
        filters: Vec<String>,
    },
    /// Sorted listing computed by the orgdirectory service
    Order {
        #[arg(long, default_value_t = 0)]
        page: u32,

        #[arg(long, allow_hyphen_values = true)]
        sort: Vec<SortTerm>,

        #[arg(long = "then-by", allow_hyphen_values = true)]
        then_by: Vec<SortTerm>,
    },
    Get {
        id: i64,
    },
    Create {
        #[command(flatten)]
        form: FormArgs,
    },
    Update {
        id: i64,

        #[command(flatten)]
        form: FormArgs,
    },
    Delete {
        id: i64,
    },
    DeleteByAddress {
        street: String,
    },
    /// Count organizations per full name
    GroupByFullName,
    CountByAddress {
        street: String,
    },
    /// Organizations with an annual turnover in [MIN, MAX]
    Turnover {
        #[arg(allow_hyphen_values = true)]
        min: String,

        #[arg(allow_hyphen_values = true)]
        max: String,

        #[arg(long, default_value_t = 0)]
        page: u32,

        /// Defaults to the search page size
        #[arg(long)]
        size: Option<u32>,
    },
    /// Interactive session over the organizations table and filter panel
    Shell,
}

/// Create/update input, passed to the core validation unchanged.
#[derive(Debug, Clone, clap::Args)]
pub struct FormArgs {
    #[arg(long, default_value = "")]
    pub name: String,

    #[arg(long = "full-name", default_value = "")]
    pub full_name: String,

    #[arg(long, default_value = "", allow_hyphen_values = true)]
    pub x: String,

    #[arg(long, default_value = "", allow_hyphen_values = true)]
    pub y: String,

    #[arg(long = "annual-turnover", allow_hyphen_values = true)]
    pub annual_turnover: Option<String>,

    /// One of COMMERCIAL, GOVERNMENT, TRUST, PRIVATE_LIMITED_COMPANY, OPEN_JOINT_STOCK_COMPANY
    #[arg(long = "type")]
    pub kind: Option<String>,

    #[arg(long, default_value = "")]
    pub street: String,
}

impl From<Args> for OrgdeskConfig {
    fn from(args: Args) -> Self {
        OrgdeskConfig {
            services: ServicesConfig {
                organization_service_url: args.services.organization_service_url,
                orgdirectory_service_url: args.services.orgdirectory_service_url,
                request_timeout_secs: args.services.request_timeout_secs,
            },
            paging: PagingConfig {
                page_size: args.paging.page_size,
                search_page_size: args.paging.search_page_size,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use orgdesk_core::domain::query::{fields::OrganizationField, sort::SortDirection};

    #[test]
    fn test_defaults() {
        let args = Args::try_parse_from(["orgdesk", "list"]).unwrap();
        let config = OrgdeskConfig::from(args);

        assert_eq!(
            config.services.organization_service_url.as_str(),
            "http://localhost:8080/organization"
        );
        assert_eq!(
            config.services.orgdirectory_service_url.as_str(),
            "http://localhost:8080/orgdirectory"
        );
        assert_eq!(config.services.request_timeout_secs, None);
        assert_eq!(config.paging.page_size, 10);
        assert_eq!(config.paging.search_page_size, 50);
    }

    #[test]
    fn test_list_sort_flags() {
        let args = Args::try_parse_from([
            "orgdesk",
            "list",
            "--page",
            "2",
            "--sort",
            "-annualTurnover",
            "--then-by",
            "name",
        ])
        .unwrap();

        match args.command {
            Command::List {
                page,
                sort,
                then_by,
            } => {
                assert_eq!(page, 2);
                assert_eq!(sort[0].field, OrganizationField::AnnualTurnover);
                assert_eq!(sort[0].direction, SortDirection::Desc);
                assert_eq!(then_by[0].field, OrganizationField::Name);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_unknown_sort_field_is_rejected() {
        assert!(Args::try_parse_from(["orgdesk", "list", "--sort", "salary"]).is_err());
    }

    #[test]
    fn test_create_accepts_negative_coordinates() {
        let args = Args::try_parse_from([
            "orgdesk", "create", "--name", "Acme", "--x", "-12.5", "--y", "-3", "--type", "TRUST",
        ])
        .unwrap();

        match args.command {
            Command::Create { form } => {
                assert_eq!(form.x, "-12.5");
                assert_eq!(form.y, "-3");
                assert_eq!(form.full_name, "");
                assert_eq!(form.kind.as_deref(), Some("TRUST"));
                assert_eq!(form.annual_turnover, None);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_search_requires_a_filter() {
        assert!(Args::try_parse_from(["orgdesk", "search"]).is_err());
    }

    #[test]
    fn test_paging_validation() {
        let args =
            Args::try_parse_from(["orgdesk", "--page-size", "0", "list"]).unwrap();
        assert!(args.paging.validate().is_err());

        let args = Args::try_parse_from(["orgdesk", "--search-page-size", "100", "shell"]).unwrap();
        assert!(args.paging.validate().is_ok());
    }
}
