//! Idea details HTTP handler

use axum::{extract::State, Json};

use crate::errors::AppResult;
use crate::models::{Idea, IdeaDetailsRequest};
use crate::web::{extractors::ApiJson, AppState};

/// `POST /details`
///
/// Searches the upstream provider for `address` and returns the first match
/// shaped as the requested idea type.
pub async fn get_idea_details(
    State(state): State<AppState>,
    ApiJson(request): ApiJson<IdeaDetailsRequest>,
) -> AppResult<Json<Idea>> {
    let idea = state
        .idea_mapper
        .map_to_idea(&request.address, &request.idea_type)
        .await?;

    Ok(Json(idea))
}
