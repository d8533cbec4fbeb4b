use anyhow::Context;
use storage::Database;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

mod config;
mod error;
mod features;
mod middleware;

use config::Config;
use middleware::auth::ApiKeys;

#[derive(OpenApi)]
#[openapi(
    paths(
        features::owners::handlers::list_owners,
        features::owners::handlers::get_owner,
        features::owners::handlers::create_owner,
        features::owners::handlers::update_owner,
        features::owners::handlers::delete_owner,
        features::camels::handlers::list_camels,
        features::camels::handlers::get_camel,
        features::camels::handlers::create_camel,
        features::camels::handlers::update_camel,
        features::camels::handlers::delete_camel,
        features::events::handlers::list_events,
        features::events::handlers::get_event,
        features::events::handlers::create_event,
        features::events::handlers::update_event,
        features::events::handlers::delete_event,
        features::loops::handlers::list_event_loops,
        features::loops::handlers::create_loop,
        features::loops::handlers::get_loop,
        features::loops::handlers::update_loop,
        features::loops::handlers::delete_loop,
        features::registrations::handlers::list_registrations,
        features::registrations::handlers::register,
        features::registrations::handlers::transfer,
        features::registrations::handlers::deregister,
        features::results::handlers::list_results,
        features::results::handlers::publish_results,
        features::results::handlers::update_rank,
        features::results::handlers::delete_result,
    ),
    components(
        schemas(
            storage::dto::owner::CreateOwnerRequest,
            storage::dto::owner::UpdateOwnerRequest,
            storage::dto::camel::CreateCamelRequest,
            storage::dto::camel::UpdateCamelRequest,
            storage::dto::event::CreateEventRequest,
            storage::dto::event::UpdateEventRequest,
            storage::dto::race_loop::CreateLoopRequest,
            storage::dto::race_loop::UpdateLoopRequest,
            storage::dto::race_loop::LoopDetailResponse,
            storage::dto::registration::RegisterRequest,
            storage::dto::registration::TransferRequest,
            storage::dto::registration::DeregisterResponse,
            storage::dto::registration::RegistrationEntry,
            storage::dto::race_result::PublishedResult,
            storage::dto::race_result::PublishResultsRequest,
            storage::dto::race_result::UpdateRankRequest,
            storage::dto::race_result::ResultEntry,
            storage::dto::common::PaginationMeta,
            storage::models::Owner,
            storage::models::Camel,
            storage::models::AgeClass,
            storage::models::Sex,
            storage::models::Event,
            storage::models::RaceLoop,
            storage::models::Registration,
            storage::models::RaceResult,
        )
    ),
    tags(
        (name = "owners", description = "Camel owners and their payout details"),
        (name = "camels", description = "Camel registry"),
        (name = "events", description = "Race meetings"),
        (name = "loops", description = "Race heats within an event"),
        (name = "registrations", description = "Camel entry into loops"),
        (name = "results", description = "Published race results and ranking"),
    ),
    modifiers(&SecurityAddon)
)]
struct ApiDoc;

struct SecurityAddon;

impl utoipa::Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                utoipa::openapi::security::SecurityScheme::Http(
                    utoipa::openapi::security::HttpBuilder::new()
                        .scheme(utoipa::openapi::security::HttpAuthScheme::Bearer)
                        .bearer_format("API Key")
                        .build(),
                ),
            )
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()),
        )
        .with_target(true)
        .with_file(true)
        .with_line_number(true)
        .init();

    tracing::info!("Starting camel race admin API");

    let config = Config::from_env().context("Failed to load API configuration")?;
    tracing::info!("Configuration loaded successfully");

    tracing::info!(
        "Connecting to database at: {}",
        config
            .database_url
            .split('@')
            .next_back()
            .unwrap_or("unknown")
    );
    let db = Database::new(&config.database_url, config.database_max_connections)
        .await
        .context("Failed to initialize database")?;
    tracing::info!("Database connection established");

    tracing::info!("Running database migrations");
    db.run_migrations()
        .await
        .context("Failed to run migrations")?;
    tracing::info!("Database migrations completed successfully");

    let api_keys = ApiKeys::from_comma_separated(&config.api_keys);
    if api_keys.is_empty() {
        tracing::warn!("No API keys configured, every mutating route will answer 401");
    } else {
        tracing::info!("Loaded {} API key(s)", api_keys.len());
    }

    let app = features::routes(api_keys)
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(db);

    let bind_address = format!("{}:{}", config.host, config.port);
    let listener = tokio::net::TcpListener::bind(&bind_address)
        .await
        .with_context(|| format!("Failed to bind {bind_address}"))?;

    tracing::info!("Starting server at http://{}", bind_address);
    tracing::info!(
        "Swagger UI available at http://{}/swagger-ui/",
        bind_address
    );

    axum::serve(listener, app).await?;

    Ok(())
}
