use axum::{
    Json,
    extract::{Path, Query, Request, State},
    response::{IntoResponse, Response},
};
use serde::Deserialize;
use titlebox_catalog::page::{Page, PageRequest};
use titlebox_catalog::types::Title;
use titlebox_db::{TitleFilter, queries};
use titlebox_import::strip_suffix_ignore_case;
use tower::ServiceExt;
use tower_http::services::ServeFile;

use crate::error::{AppError, AppResult};
use crate::search;
use crate::state::AppState;

const TITLE_ID_LEN: usize = 8;
const MAX_PICTURE_LEN: usize = 10;

/// Query parameters are taken as raw strings so malformed values fall back to
/// defaults instead of rejecting the request.
#[derive(Debug, Default, Deserialize)]
pub struct ListParams {
    pub page: Option<String>,
    pub limit: Option<String>,
    pub only_with_pictures: Option<String>,
    pub reverse: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct SearchParams {
    pub q: Option<String>,
    pub page: Option<String>,
    pub limit: Option<String>,
    pub only_with_pictures: Option<String>,
}

fn flag(value: Option<&str>) -> bool {
    value == Some("true")
}

fn page_request(page: Option<&String>, limit: Option<&String>) -> PageRequest {
    PageRequest::parse(page.map(String::as_str), limit.map(String::as_str))
}

pub async fn list_titles(
    State(state): State<AppState>,
    Query(params): Query<ListParams>,
) -> AppResult<Json<Page<Title>>> {
    let filter = TitleFilter {
        request: page_request(params.page.as_ref(), params.limit.as_ref()),
        only_with_pictures: flag(params.only_with_pictures.as_deref()),
        reverse: flag(params.reverse.as_deref()),
    };
    let page = state
        .with_db(move |conn| queries::list_titles(conn, &filter))
        .await?;
    Ok(Json(page))
}

pub async fn search_titles(
    State(state): State<AppState>,
    Query(params): Query<SearchParams>,
) -> AppResult<Json<Page<Title>>> {
    let query = match params.q {
        Some(q) if !q.is_empty() => q,
        _ => return Err(AppError::bad_request("Query parameter 'q' is required")),
    };
    let request = page_request(params.page.as_ref(), params.limit.as_ref());
    let only_with_pictures = flag(params.only_with_pictures.as_deref());

    let titles = state.with_db(queries::all_titles).await?;
    Ok(Json(search::search_titles(
        titles,
        &query,
        only_with_pictures,
        request,
    )))
}

pub async fn get_title(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Json<Title>> {
    let id = id.to_lowercase();
    state
        .with_db(move |conn| queries::find_title(conn, &id))
        .await?
        .map(Json)
        .ok_or_else(|| AppError::not_found("Title not found"))
}

/// Stream `<pictures_root>/<id>/<picture><suffix>`.
///
/// Both path segments are validated before the filesystem is touched. The
/// file itself is not checked ahead of time; a missing file is answered by
/// the file service.
pub async fn get_title_picture(
    State(state): State<AppState>,
    Path((id, picture)): Path<(String, String)>,
    request: Request,
) -> AppResult<Response> {
    let id = id.to_lowercase();
    if id.chars().count() != TITLE_ID_LEN || has_separator(&id) {
        return Err(AppError::bad_request("Invalid title ID"));
    }

    let picture = picture.to_lowercase();
    let picture = strip_suffix_ignore_case(&picture, &state.pictures_suffix).unwrap_or(&picture);
    let len = picture.chars().count();
    if len == 0 || len > MAX_PICTURE_LEN || has_separator(picture) {
        return Err(AppError::bad_request("Invalid picture name"));
    }

    let path = state
        .pictures_root
        .join(&id)
        .join(format!("{}{}", picture, state.pictures_suffix));
    match ServeFile::new(path).oneshot(request).await {
        Ok(response) => Ok(response.into_response()),
        Err(never) => match never {},
    }
}

fn has_separator(segment: &str) -> bool {
    segment.contains(['/', '\\'])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_literal_true_is_set() {
        assert!(flag(Some("true")));
        assert!(!flag(Some("TRUE")));
        assert!(!flag(Some("1")));
        assert!(!flag(None));
    }

    #[test]
    fn separators_detected() {
        assert!(has_separator("a/b"));
        assert!(has_separator("a\\b"));
        assert!(!has_separator("20452"));
    }
}
