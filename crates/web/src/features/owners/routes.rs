use axum::{
    Router, middleware,
    routing::{delete, get, post, put},
};
use storage::Database;

use super::handlers::{create_owner, delete_owner, get_owner, list_owners, update_owner};
use crate::middleware::auth::{ApiKeys, AuthGate, require_auth};

pub fn routes(api_keys: ApiKeys) -> Router<Database> {
    let protected = Router::new()
        .route("/", post(create_owner))
        .route("/:id", put(update_owner))
        .route("/:id", delete(delete_owner))
        .route_layer(middleware::from_fn_with_state(
            AuthGate::admin(api_keys),
            require_auth,
        ));

    Router::new()
        .route("/", get(list_owners))
        .route("/:id", get(get_owner))
        .merge(protected)
}
