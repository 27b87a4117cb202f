use axum::{extract::Query, response::Html};

use crate::http_server::forms::FlashQuery;
use crate::http_server::views;

pub async fn index(Query(query): Query<FlashQuery>) -> Html<String> {
    Html(views::home_page(query.flash.as_deref()))
}
