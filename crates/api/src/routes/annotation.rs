use axum::routing::get;
use axum::Router;

use crate::handlers::annotation;
use crate::state::AppState;

/// Annotation routes, merged into `/api/v1`.
///
/// ```text
/// GET    /annotations  -> list_annotations
/// PUT    /annotations  -> replace_annotations
/// POST   /annotations  -> append_annotation
/// DELETE /annotations  -> clear_annotations
/// ```
pub fn router() -> Router<AppState> {
    Router::new().route(
        "/annotations",
        get(annotation::list_annotations)
            .put(annotation::replace_annotations)
            .post(annotation::append_annotation)
            .delete(annotation::clear_annotations),
    )
}
