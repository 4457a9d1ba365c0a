use clap::Parser;
use scripts::{cli::Cli, errors::DeployError};

#[tokio::main]
async fn main() -> Result<(), DeployError> {
    let Cli {
        priv_key,
        rpc_url,
        deployments_path,
        command,
    } = Cli::parse();

    tracing_subscriber::fmt().pretty().init();

    command
        .run(&rpc_url, priv_key.as_deref(), deployments_path)
        .await
}
