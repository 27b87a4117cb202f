use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    response::{Html, Redirect},
};
use axum_extra::extract::Form;
use chrono::Local;

use crate::http_server::error::PageError;
use crate::http_server::forms::{ArtistForm, FlashQuery, SearchForm};
use crate::http_server::state::AppState;
use crate::http_server::views;
use crate::services::artist::ArtistService;

fn service(state: &AppState) -> ArtistService {
    ArtistService::new(state.db.clone())
}

pub async fn list(State(state): State<Arc<AppState>>) -> Result<Html<String>, PageError> {
    let artists = service(&state).list().await?;
    Ok(Html(views::artists_page(&artists)))
}

pub async fn search(
    State(state): State<Arc<AppState>>,
    Form(form): Form<SearchForm>,
) -> Result<Html<String>, PageError> {
    let results = service(&state).search(&form.search_term).await?;
    Ok(Html(views::search_results_page(
        "Artists",
        &form.search_term,
        &results,
    )))
}

pub async fn detail(
    State(state): State<Arc<AppState>>,
    Path(artist_id): Path<i64>,
    Query(query): Query<FlashQuery>,
) -> Result<Html<String>, PageError> {
    let detail = service(&state)
        .get_detail(artist_id, Local::now().naive_local())
        .await?;
    Ok(Html(views::artist_detail_page(
        &detail,
        query.flash.as_deref(),
    )))
}

pub async fn create_form() -> Html<String> {
    Html(views::artist_form_page("/artists/create", None))
}

pub async fn create_submit(
    State(state): State<Arc<AppState>>,
    Form(form): Form<ArtistForm>,
) -> Result<Html<String>, PageError> {
    form.validate().map_err(PageError::BadRequest)?;
    let artist = service(&state).create(form.into_input()).await?;
    // The source app lands back on the home page after a create
    Ok(Html(views::home_page(Some(&format!(
        "Artist {} was successfully listed!",
        artist.name
    )))))
}

pub async fn edit_form(
    State(state): State<Arc<AppState>>,
    Path(artist_id): Path<i64>,
) -> Result<Html<String>, PageError> {
    let artist = service(&state).get(artist_id).await?;
    Ok(Html(views::artist_form_page(
        &format!("/artists/{artist_id}/edit"),
        Some(&artist.to_payload()),
    )))
}

pub async fn edit_submit(
    State(state): State<Arc<AppState>>,
    Path(artist_id): Path<i64>,
    Form(form): Form<ArtistForm>,
) -> Result<Redirect, PageError> {
    form.validate().map_err(PageError::BadRequest)?;
    let artist = service(&state).update(artist_id, form.into_input()).await?;
    Ok(Redirect::to(&format!(
        "/artists/{}?flash={}",
        artist.id,
        urlencoding::encode("Update successful!")
    )))
}
