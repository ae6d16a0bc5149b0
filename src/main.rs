#![warn(clippy::pedantic, clippy::all, clippy::nursery)]
#![allow(clippy::single_match_else)]

use crate::{config::RuntimeConfiguration, routes::build_router, state::RosterState};
use tokio::{net::TcpListener, signal};
use tower_http::trace::TraceLayer;
use tracing_subscriber::{EnvFilter, FmtSubscriber};

#[macro_use]
extern crate tracing;

mod config;
mod controllers;
mod data;
mod error;
mod gateway;
mod maud_conveniences;
mod routes;
mod screen;
mod session;
mod state;
#[cfg(test)]
mod test_support;
mod validator;

async fn shutdown_signal(state: RosterState) {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }

    state.sensible_shutdown();
    warn!("signal received, starting graceful shutdown");
}

#[tokio::main]
async fn main() {
    let dotenv = dotenvy::dotenv();

    tracing::subscriber::set_global_default(
        FmtSubscriber::builder()
            .with_env_filter(EnvFilter::from_default_env())
            .finish(),
    )
    .expect("unable to set tracing subscriber");

    info!("`tracing` online");
    if let Err(e) = dotenv {
        //plenty of deployments just set the variables directly
        warn!(?e, "Not loading .env");
    }

    let config = RuntimeConfiguration::new().expect("unable to create config");
    let state = RosterState::new(&config).expect("unable to create state");
    state.start().await;

    let app = build_router(state.clone()).layer(TraceLayer::new_for_http());

    let listener = TcpListener::bind(&config.server_ip)
        .await
        .expect("unable to listen on server ip");

    info!(server_ip = ?config.server_ip, "Listening");
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal(state))
        .await
        .expect("unable to serve app");
}
