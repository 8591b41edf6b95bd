//! Courier demo: send one welcome email through the configured relay.
//!
//! Run with: cargo run
//!
//! Reads `EMAIL_HOST_USER`, `EMAIL_HOST_PASSWORD` and `EMAIL_HOST` (plus the
//! optional `EMAIL_PORT` and `EMAIL_DISPLAY_NAME`) from `.env` or the
//! environment.

use courier::{OutgoingMail, TemplatePair};
use serde::Serialize;
use tracing::{error, info};

#[derive(Serialize)]
struct WelcomeContext<'a> {
    #[serde(rename = "Name")]
    name: &'a str,
    #[serde(rename = "Link")]
    link: &'a str,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load environment variables
    courier::config::load_dotenv(None)?;

    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .with_target(true)
        .init();

    let settings = courier::config::MailSettings::from_env(&Default::default())
        .inspect_err(|e| error!("Error loading mail settings: {}", e))?;
    info!(host = %settings.host, port = settings.port, "Loaded mail settings");

    let composer = courier::smtp_composer(&settings)?;

    let mail = OutgoingMail::new(
        "Welcome to FundusAI",
        TemplatePair::with_default_layout("templates/welcome.hbs"),
    )
    .to("recipient@example.com")
    .attach("assets/sample.txt");

    let context = WelcomeContext {
        name: "John Doe",
        link: "http://example.com",
    };

    composer
        .send(&mail, &context)
        .await
        .inspect_err(|e| error!("Error sending email: {}", e))?;

    Ok(())
}
