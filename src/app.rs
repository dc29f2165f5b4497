use std::net::TcpListener;

use actix_web::dev::Server;
use actix_web::{get, HttpResponse, Responder};
use actix_web::{web, App, HttpServer};

use sqlx::PgPool;

use tracing_actix_web::TracingLogger;

use crate::client::MediaClient;
use crate::controller::{contact, newsletter, payments, registrations};
use crate::notify::Notifier;

/// Simple health-check endpoint
#[tracing::instrument(name = "Health check")]
#[get("/health_check")]
async fn health_check() -> impl Responder {
    HttpResponse::Ok().body("I am alive")
}

/// Run the application on a specified TCP listener
pub fn run(
    listener: TcpListener,
    pool: PgPool,
    notifier: Notifier,
    media_client: MediaClient,
) -> anyhow::Result<Server> {
    // Wrap application data
    let pool = web::Data::new(pool);
    let notifier = web::Data::new(notifier);
    let media_client = web::Data::new(media_client);

    // Allow receipt bodies past the default payload limit; the upload
    // handler enforces its own 5 MiB cap with a user-facing message
    let payload_config = web::PayloadConfig::new(registrations::MAX_RECEIPT_BYTES + 64 * 1024);

    // Start the server
    let server = HttpServer::new(move || {
        App::new()
            .wrap(TracingLogger::default())
            .app_data(pool.clone())
            .app_data(notifier.clone())
            .app_data(media_client.clone())
            .app_data(payload_config.clone())
            .service(health_check)
            .service(contact::scope())
            .service(registrations::scope())
            .service(newsletter::scope())
            .service(payments::scope())
    })
    .listen(listener)?
    .run();

    Ok(server)
}
