use axum::{Router, routing::get};
use dotenvy::dotenv;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use marketplace_auth_axum::{AUTH_ROUTE_PREFIX, AuthState, init, marketplace_auth_router};

mod server;

use crate::server::spawn_http_server;

const DEFAULT_PORT: u16 = 3001;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenv().ok();
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                format!(
                    "{}=debug,marketplace_auth=debug,marketplace_auth_axum=info",
                    env!("CARGO_CRATE_NAME")
                )
                .into()
            }),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let state = AuthState::from_env()?;
    init(state.store.as_ref()).await?;

    let app = Router::new()
        .route("/", get(|| async { "marketplace-auth demo" }))
        .nest(AUTH_ROUTE_PREFIX.as_str(), marketplace_auth_router(state));

    let port = match std::env::var("PORT") {
        Ok(port) => port.parse()?,
        Err(_) => DEFAULT_PORT,
    };

    spawn_http_server(port, app).await?;
    Ok(())
}
