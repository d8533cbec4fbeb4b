use axum::Router;
use storage::Database;

use crate::middleware::auth::ApiKeys;

pub mod camels;
pub mod events;
pub mod loops;
pub mod owners;
pub mod registrations;
pub mod results;

pub fn routes(api_keys: ApiKeys) -> Router<Database> {
    Router::new()
        .nest("/api/owners", owners::routes::routes(api_keys.clone()))
        .nest("/api/camels", camels::routes::routes(api_keys.clone()))
        .nest("/api/events", events::routes::routes(api_keys.clone()))
        .nest(
            "/api/events/:event_id/loops",
            loops::routes::event_routes(api_keys.clone()),
        )
        .nest(
            "/api/events/:event_id/loops/:loop_id/results",
            results::routes::routes(api_keys.clone()),
        )
        .nest("/api/loops", loops::routes::routes(api_keys.clone()))
        .nest(
            "/api/loops/:loop_id/registrations",
            registrations::routes::loop_routes(api_keys.clone()),
        )
        .nest(
            "/api/registrations",
            registrations::routes::routes(api_keys),
        )
}
