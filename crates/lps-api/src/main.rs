use lps_core::Config;

#[tokio::main]
async fn main() -> Result<(), anyhow::Error> {
    let config = Config::from_env()?;

    // Initialize the application (database, services, routes)
    let (_state, router) = lps_api::setup::initialize_app(config.clone()).await?;

    lps_api::setup::server::start_server(&config, router).await?;

    Ok(())
}
