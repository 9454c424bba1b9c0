use std::process::ExitCode;
use std::time::Duration;

use clap::Parser;
use course_graph_api::health::probe::{health_url, probe};

#[derive(Parser)]
#[command(name = "healthcheck")]
#[command(about = "Liveness probe for course-graph-api", long_about = None)]
struct Cli {
    /// Base URL of the running service.
    #[arg(short, long, default_value = "http://127.0.0.1:8000")]
    url: String,

    /// Give up after this many seconds.
    #[arg(short, long, default_value_t = 3)]
    timeout_secs: u64,
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    let client = match reqwest::Client::builder()
        .timeout(Duration::from_secs(cli.timeout_secs))
        .no_proxy()
        .build()
    {
        Ok(client) => client,
        Err(e) => {
            eprintln!("Error: could not build HTTP client: {}", e);
            return ExitCode::FAILURE;
        }
    };

    match probe(&client, &cli.url).await {
        Ok(report) => {
            println!(
                "{} {} ({}) is {}",
                report.service, report.version, report.env, report.status
            );
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("Error: {} unhealthy: {}", health_url(&cli.url), e);
            ExitCode::FAILURE
        }
    }
}
