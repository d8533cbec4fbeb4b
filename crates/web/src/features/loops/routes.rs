use axum::{
    Router, middleware,
    routing::{delete, get, post, put},
};
use storage::Database;

use super::handlers::{create_loop, delete_loop, get_loop, list_event_loops, update_loop};
use crate::middleware::auth::{ApiKeys, AuthGate, require_auth};

/// Routes nested under `/api/loops`
pub fn routes(api_keys: ApiKeys) -> Router<Database> {
    let protected = Router::new()
        .route("/:loop_id", put(update_loop))
        .route("/:loop_id", delete(delete_loop))
        .route_layer(middleware::from_fn_with_state(
            AuthGate::admin(api_keys),
            require_auth,
        ));

    Router::new()
        .route("/:loop_id", get(get_loop))
        .merge(protected)
}

/// Routes nested under `/api/events/:event_id/loops`
pub fn event_routes(api_keys: ApiKeys) -> Router<Database> {
    let protected = Router::new()
        .route("/", post(create_loop))
        .route_layer(middleware::from_fn_with_state(
            AuthGate::admin(api_keys),
            require_auth,
        ));

    Router::new()
        .route("/", get(list_event_loops))
        .merge(protected)
}
