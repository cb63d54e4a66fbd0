use landing_contact::{configuration::get_configuration, telemetry, App};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    telemetry::init_subscriber(telemetry::get_subscriber(
        "landing-contact".to_string(),
        std::io::stdout,
    ));

    let configuration = get_configuration().expect("Failed to read configuration.");
    if !configuration.contact().is_complete() {
        tracing::warn!("Contact delivery settings are incomplete, submissions will fail");
    }

    App::build(configuration)?.run_until_stopped().await?;

    Ok(())
}
