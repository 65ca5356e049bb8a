use directory_proxy::config::get_configuration;
use directory_proxy::Application;
use service_core::observability::logging::init_tracing;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let configuration = get_configuration().map_err(|e| {
        eprintln!("Failed to read configuration: {}", e);
        anyhow::anyhow!("Configuration error: {}", e)
    })?;

    init_tracing(
        "directory-proxy",
        &configuration.server.log_level,
        configuration.server.otlp_endpoint.as_deref(),
    );

    let application = Application::build(configuration).await?;
    application.run_until_stopped().await?;

    Ok(())
}
