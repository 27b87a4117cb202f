use std::sync::Arc;

use axum::{
    Router,
    http::StatusCode,
    response::Html,
    routing::{get, post},
};
use color_eyre::eyre::{Context, eyre};
use tower::ServiceBuilder;
use tower_http::cors::CorsLayer;

use crate::database::Database;
use crate::http_server::{
    routes::{artists, home, shows, venues},
    state::AppState,
    views,
};

pub struct HttpServerConfig {
    pub port: u16,
    pub database: Database,
}

async fn not_found() -> (StatusCode, Html<String>) {
    (StatusCode::NOT_FOUND, Html(views::not_found_page()))
}

pub async fn start(config: HttpServerConfig) -> color_eyre::Result<()> {
    let app_state = Arc::new(AppState {
        db: Arc::new(config.database),
    });

    let app = Router::new()
        .route("/", get(home::index))
        .route("/venues", get(venues::list))
        .route("/venues/search", post(venues::search))
        .route("/venues/create", get(venues::create_form).post(venues::create_submit))
        .route("/venues/{venue_id}", get(venues::detail))
        .route("/venues/{venue_id}/edit", get(venues::edit_form).post(venues::edit_submit))
        .route("/venues/{venue_id}/delete", get(venues::delete).post(venues::delete))
        .route("/artists", get(artists::list))
        .route("/artists/search", post(artists::search))
        .route("/artists/create", get(artists::create_form).post(artists::create_submit))
        .route("/artists/{artist_id}", get(artists::detail))
        .route("/artists/{artist_id}/edit", get(artists::edit_form).post(artists::edit_submit))
        .route("/shows", get(shows::list))
        .route("/shows/create", get(shows::create_form).post(shows::create_submit))
        .fallback(not_found)
        .layer(ServiceBuilder::new().layer(CorsLayer::permissive()))
        .with_state(app_state);

    let listener = tokio::net::TcpListener::bind(format!("0.0.0.0:{}", config.port))
        .await
        .wrap_err_with(|| eyre!("Failed to bind to port {}", config.port))?;
    log::info!("Listening on port {}", config.port);
    axum::serve(listener, app)
        .await
        .wrap_err("Failed to start HTTP server")?;

    Ok(())
}
