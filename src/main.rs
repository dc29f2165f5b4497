use std::net::TcpListener;

use anyhow::Context;

use sqlx::PgPool;

use cashew_coop::settings::Settings;
use cashew_coop::{app, telemetry};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    telemetry::init("info")?;

    let settings = Settings::load().expect("Failed to load settings");

    let pool = PgPool::connect_with(settings.database.with_db()).await?;

    let email_client = settings.email.client()?;
    let notifier = settings.notify.notifier(email_client);
    let media_client = settings.media.client()?;

    let listener = TcpListener::bind(settings.app.addr())?;

    app::run(listener, pool, notifier, media_client)?
        .await
        .context("Failed to run app")
}
