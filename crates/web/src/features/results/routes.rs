use axum::{
    Router, middleware,
    routing::{delete, get, patch, put},
};
use storage::Database;

use super::handlers::{delete_result, list_results, publish_results, update_rank};
use crate::middleware::auth::{ApiKeys, AuthGate, require_auth};

/// Routes nested under `/api/events/:event_id/loops/:loop_id/results`
pub fn routes(api_keys: ApiKeys) -> Router<Database> {
    let protected = Router::new()
        .route("/", put(publish_results))
        .route("/rank", patch(update_rank))
        .route("/:camel_id", delete(delete_result))
        .route_layer(middleware::from_fn_with_state(
            AuthGate::admin(api_keys),
            require_auth,
        ));

    Router::new()
        .route("/", get(list_results))
        .merge(protected)
}
