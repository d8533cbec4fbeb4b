use axum::{
    Router, middleware,
    routing::{delete, get, post, put},
};
use storage::Database;

use super::handlers::{create_camel, delete_camel, get_camel, list_camels, update_camel};
use crate::middleware::auth::{ApiKeys, AuthGate, require_auth};

pub fn routes(api_keys: ApiKeys) -> Router<Database> {
    let protected = Router::new()
        .route("/", post(create_camel))
        .route("/:id", put(update_camel))
        .route("/:id", delete(delete_camel))
        .route_layer(middleware::from_fn_with_state(
            AuthGate::admin(api_keys),
            require_auth,
        ));

    Router::new()
        .route("/", get(list_camels))
        .route("/:id", get(get_camel))
        .merge(protected)
}
