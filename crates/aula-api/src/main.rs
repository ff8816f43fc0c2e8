use aula_core::Config;

#[tokio::main]
async fn main() -> Result<(), anyhow::Error> {
    aula_api::setup::telemetry::init_telemetry();

    // Load configuration
    let config = Config::from_env()?;
    config.validate()?;

    // Initialize the application (database, services, routes)
    let (_state, router) = aula_api::setup::initialize_app(config.clone()).await?;

    // Start the server
    aula_api::setup::server::start_server(&config, router).await?;

    Ok(())
}
