use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    response::{Html, Redirect},
};
use axum_extra::extract::Form;
use chrono::Local;

use crate::http_server::error::PageError;
use crate::http_server::forms::{FlashQuery, SearchForm, VenueForm};
use crate::http_server::state::AppState;
use crate::http_server::views;
use crate::services::venue::VenueService;

fn service(state: &AppState) -> VenueService {
    VenueService::new(state.db.clone())
}

pub async fn list(State(state): State<Arc<AppState>>) -> Result<Html<String>, PageError> {
    let groups = service(&state)
        .list_grouped(Local::now().naive_local())
        .await?;
    Ok(Html(views::venues_page(&groups)))
}

pub async fn search(
    State(state): State<Arc<AppState>>,
    Form(form): Form<SearchForm>,
) -> Result<Html<String>, PageError> {
    let results = service(&state).search(&form.search_term).await?;
    Ok(Html(views::search_results_page(
        "Venues",
        &form.search_term,
        &results,
    )))
}

pub async fn detail(
    State(state): State<Arc<AppState>>,
    Path(venue_id): Path<i64>,
    Query(query): Query<FlashQuery>,
) -> Result<Html<String>, PageError> {
    let detail = service(&state)
        .get_detail(venue_id, Local::now().naive_local())
        .await?;
    Ok(Html(views::venue_detail_page(
        &detail,
        query.flash.as_deref(),
    )))
}

pub async fn create_form() -> Html<String> {
    Html(views::venue_form_page("/venues/create", None))
}

pub async fn create_submit(
    State(state): State<Arc<AppState>>,
    Form(form): Form<VenueForm>,
) -> Result<Html<String>, PageError> {
    form.validate().map_err(PageError::BadRequest)?;
    let venue = service(&state).create(form.into_input()).await?;
    // The source app lands back on the home page after a create
    Ok(Html(views::home_page(Some(&format!(
        "Venue {} was successfully listed!",
        venue.name
    )))))
}

pub async fn edit_form(
    State(state): State<Arc<AppState>>,
    Path(venue_id): Path<i64>,
) -> Result<Html<String>, PageError> {
    let venue = service(&state).get(venue_id).await?;
    Ok(Html(views::venue_form_page(
        &format!("/venues/{venue_id}/edit"),
        Some(&venue.to_payload()),
    )))
}

pub async fn edit_submit(
    State(state): State<Arc<AppState>>,
    Path(venue_id): Path<i64>,
    Form(form): Form<VenueForm>,
) -> Result<Redirect, PageError> {
    form.validate().map_err(PageError::BadRequest)?;
    let venue = service(&state).update(venue_id, form.into_input()).await?;
    Ok(Redirect::to(&format!(
        "/venues/{}?flash={}",
        venue.id,
        urlencoding::encode("Update successful!")
    )))
}

/// Always lands back on the index, whatever the outcome.
pub async fn delete(State(state): State<Arc<AppState>>, Path(venue_id): Path<i64>) -> Redirect {
    match service(&state).delete(venue_id).await {
        Ok(name) => Redirect::to(&format!(
            "/?flash={}",
            urlencoding::encode(&format!("Venue {name} was deleted successfully!"))
        )),
        Err(err) => {
            log::error!("Failed to delete venue {venue_id}: {err}");
            Redirect::to(&format!(
                "/?flash={}",
                urlencoding::encode("Venue was not deleted successfully.")
            ))
        }
    }
}
