use clap::Parser;
use orgdesk_core::{application::create_service, domain::common::OrgdeskConfig};
use tracing::debug;
use tracing_subscriber::EnvFilter;
use validator::Validate;

use crate::{
    application::commands::execute,
    args::{Args, LogArgs},
};

mod application;
mod args;

fn init_logger(log: &LogArgs) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr);

    if log.log_json {
        subscriber.json().init();
    } else {
        subscriber.init();
    }
}

#[tokio::main]
async fn main() -> Result<(), anyhow::Error> {
    dotenv::dotenv().ok();

    let args = Args::parse();
    init_logger(&args.log);
    args.paging.validate()?;

    let output = args.output;
    let command = args.command.clone();
    let config = OrgdeskConfig::from(args);
    debug!(?config, "configuration loaded");

    let paging = config.paging.clone();
    let service = create_service(config).await?;

    let rendered = execute(command, service, &paging, output).await?;
    if !rendered.is_empty() {
        println!("{rendered}");
    }

    Ok(())
}
