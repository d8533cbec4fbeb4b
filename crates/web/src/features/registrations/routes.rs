use axum::{
    Router, middleware,
    routing::{delete, get, post},
};
use storage::Database;

use super::handlers::{deregister, list_registrations, register, transfer};
use crate::middleware::auth::{ApiKeys, AuthGate, require_auth};

/// Routes nested under `/api/registrations`
pub fn routes(api_keys: ApiKeys) -> Router<Database> {
    Router::new()
        .route("/", post(register))
        .route("/transfer", post(transfer))
        .route_layer(middleware::from_fn_with_state(
            AuthGate::registrar(api_keys),
            require_auth,
        ))
}

/// Routes nested under `/api/loops/:loop_id/registrations`
pub fn loop_routes(api_keys: ApiKeys) -> Router<Database> {
    let protected = Router::new()
        .route("/:camel_id", delete(deregister))
        .route_layer(middleware::from_fn_with_state(
            AuthGate::registrar(api_keys),
            require_auth,
        ));

    Router::new()
        .route("/", get(list_registrations))
        .merge(protected)
}
