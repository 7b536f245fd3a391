//! Backend entry-point: configuration, seeding, and the HTTP server.

use std::sync::Arc;

use actix_web::{App, HttpServer, web};
use tracing::{error, warn};
use tracing_subscriber::{EnvFilter, fmt};

use lifeline_backend::Trace;
use lifeline_backend::inbound::http::health::{self, HealthState};
use lifeline_backend::outbound::persistence::{
    MemoryHospitalRepository, MemoryIncidentRepository, MemoryUserRepository,
};
use lifeline_backend::server::{self, ServerConfig};

/// Application bootstrap.
#[actix_web::main]
async fn main() -> std::io::Result<()> {
    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }

    let config = ServerConfig::from_env().map_err(std::io::Error::other)?;

    let users = Arc::new(MemoryUserRepository::default());
    let incidents = Arc::new(MemoryIncidentRepository::default());
    let hospitals = Arc::new(MemoryHospitalRepository::default());

    if config.seed_reference_data {
        if let Err(e) = server::seed::seed_hospitals_if_empty(hospitals.as_ref()).await {
            error!(error = %e, "hospital seeding failed");
            return Err(std::io::Error::other(e));
        }
    }

    let bind_addr = config.bind_addr;
    let state = server::build_state(&config, users, incidents, hospitals);

    let health_state = web::Data::new(HealthState::new());
    // Clone for the server factory so the probe handle stays accessible here.
    let server_health_state = health_state.clone();
    let server = HttpServer::new(move || {
        App::new()
            .wrap(Trace)
            .app_data(web::Data::new(state.clone()))
            .app_data(server_health_state.clone())
            .service(health::live)
            .service(health::ready)
            .configure(server::configure_api)
    })
    .bind(bind_addr)?;

    health_state.mark_ready();
    server.run().await
}
