use axum::{extract::Extension, Json};
use serde::Serialize;

use crate::common::ApiError;
use crate::domains::tag::Tag;
use crate::server::app::AppState;

#[derive(Serialize)]
pub struct TagList {
    data: Vec<Tag>,
}

/// List all tags, unpaginated
pub async fn list_tags(
    Extension(state): Extension<AppState>,
) -> Result<Json<TagList>, ApiError> {
    let tags = Tag::find_all(&state.db_pool).await?;
    Ok(Json(TagList { data: tags }))
}
