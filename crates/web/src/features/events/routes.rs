use axum::{
    Router, middleware,
    routing::{delete, get, post, put},
};
use storage::Database;

use super::handlers::{create_event, delete_event, get_event, list_events, update_event};
use crate::middleware::auth::{ApiKeys, AuthGate, require_auth};

pub fn routes(api_keys: ApiKeys) -> Router<Database> {
    let protected = Router::new()
        .route("/", post(create_event))
        .route("/:event_id", put(update_event))
        .route("/:event_id", delete(delete_event))
        .route_layer(middleware::from_fn_with_state(
            AuthGate::admin(api_keys),
            require_auth,
        ));

    Router::new()
        .route("/", get(list_events))
        .route("/:event_id", get(get_event))
        .merge(protected)
}
