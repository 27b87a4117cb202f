use std::sync::Arc;

use axum::{extract::State, response::Html};
use axum_extra::extract::Form;

use crate::http_server::error::PageError;
use crate::http_server::forms::ShowForm;
use crate::http_server::state::AppState;
use crate::http_server::views;
use crate::services::show::ShowService;

pub async fn list(State(state): State<Arc<AppState>>) -> Result<Html<String>, PageError> {
    let listings = ShowService::new(state.db.clone()).list().await?;
    Ok(Html(views::shows_page(&listings)))
}

pub async fn create_form() -> Html<String> {
    Html(views::show_form_page())
}

pub async fn create_submit(
    State(state): State<Arc<AppState>>,
    Form(form): Form<ShowForm>,
) -> Result<Html<String>, PageError> {
    let (artist_id, venue_id, start_time) = form.parse().map_err(PageError::BadRequest)?;
    ShowService::new(state.db.clone())
        .create(artist_id, venue_id, start_time)
        .await?;
    Ok(Html(views::home_page(Some("Show was successfully listed!"))))
}
