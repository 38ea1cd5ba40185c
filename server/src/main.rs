mod rate_limit;
mod routes;
mod services;
mod state;

use std::net::SocketAddr;
use std::sync::Arc;

use weather::CurrentWeather;

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt::init();

    let port: u16 = std::env::var("PORT")
        .unwrap_or_else(|_| "5000".into())
        .parse()
        .expect("invalid PORT");

    let messages_file = std::env::var("MESSAGES_FILE").unwrap_or_else(|_| "messages.json".into());
    let cap = services::env_parse("MESSAGE_CAP", services::store::DEFAULT_MESSAGE_CAP);
    let store = services::store::MessageStore::open(&messages_file, cap).expect("message store init failed");

    let cycle_secs = services::env_parse("SCENE_CYCLE_SECS", services::scene::DEFAULT_CYCLE_SECS);
    let scenes = services::scene::SceneCycler::new(routes::assets_dir().join("images"), cycle_secs);

    // Initialize weather client (non-fatal: demo data served if config missing).
    let client: Option<Arc<dyn CurrentWeather>> = match weather::WeatherClient::from_env() {
        Ok(client) => {
            tracing::info!(
                provider = client.provider().as_str(),
                city = client.city(),
                "weather client initialized"
            );
            Some(Arc::new(client))
        }
        Err(e) => {
            tracing::warn!(error = %e, "weather client not configured — serving demo data");
            None
        }
    };

    let state = state::AppState::new(store, scenes, client);

    // Spawn background weather refresh task.
    let _refresh = services::refresh::spawn_refresh_task(state.clone());

    let app = routes::app(state);
    let listener = tokio::net::TcpListener::bind(format!("0.0.0.0:{port}"))
        .await
        .expect("failed to bind");

    tracing::info!(%port, "weather station listening");
    axum::serve(listener, app.into_make_service_with_connect_info::<SocketAddr>())
        .await
        .expect("server failed");
}
