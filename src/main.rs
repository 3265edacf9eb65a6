use std::process::ExitCode;

use tour_planner::config::Config;
use tour_planner::engine::Engine;
use tour_planner::error::Error;
use tour_planner::server::serve;

async fn run() -> Result<(), Error> {
    let config = Config::from_env()?;
    let engine = Engine::new(&config).await?;

    serve(engine, config.bind_addr).await
}

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::fmt::init();

    match run().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            tracing::error!("tour planner stopped: {}", err);
            ExitCode::FAILURE
        }
    }
}
