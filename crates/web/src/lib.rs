use std::time::Duration;

use axum::Router;
use storage::Database;
use tower_http::cors::{Any, CorsLayer};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

pub mod config;
pub mod error;
pub mod features;
pub mod middleware;

use features::{athletes, feed, leaderboard, opportunities, posts, saved, scores, shortlist};
use middleware::auth::ApiKeys;

#[derive(OpenApi)]
#[openapi(
    paths(
        feed::handlers::get_feed,
        posts::handlers::create_post,
        posts::handlers::list_own_posts,
        posts::handlers::attach_analysis,
        athletes::handlers::get_athlete_score,
        leaderboard::handlers::get_leaderboard,
        shortlist::handlers::generate_shortlist,
        saved::handlers::toggle_saved,
        saved::handlers::list_saved,
        opportunities::handlers::list_opportunities,
        opportunities::handlers::create_opportunity,
        opportunities::handlers::list_own_opportunities,
        opportunities::handlers::apply,
        scores::handlers::recompute_all,
        scores::handlers::refresh_athlete,
    ),
    components(
        schemas(
            storage::dto::common::PaginationMeta,
            storage::services::feed::FeedItem,
            storage::services::feed::PerformanceItem,
            storage::services::narrative::Narrative,
            storage::models::Profile,
            storage::models::Sport,
            storage::models::Role,
            storage::models::Tier,
            storage::models::Severity,
        )
    ),
    tags(
        (name = "feed", description = "Discovery feed for signed-in users"),
        (name = "posts", description = "Performance clips and their analysis"),
        (name = "athletes", description = "Public athlete score endpoints"),
        (name = "leaderboard", description = "Public rankings"),
        (name = "recruit", description = "Recruiter shortlists and saved athletes"),
        (name = "opportunities", description = "Trials and openings posted by recruiters"),
        (name = "scores", description = "Score maintenance"),
    ),
    modifiers(&SecurityAddon)
)]
pub struct ApiDoc;

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

pub fn build_router(db: Database, api_keys: ApiKeys) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any)
        .max_age(Duration::from_secs(3600));

    Router::new()
        .nest("/api/feed", feed::routes::routes(api_keys.clone()))
        .nest("/api/posts", posts::routes::routes(api_keys.clone()))
        .nest("/api/athletes", athletes::routes::routes())
        .nest("/api/leaderboard", leaderboard::routes::routes())
        .nest("/api/recruit", shortlist::routes::routes(api_keys.clone()))
        .nest("/api/recruiters", saved::routes::routes(api_keys.clone()))
        .nest(
            "/api/opportunities",
            opportunities::routes::routes(api_keys.clone()),
        )
        .nest("/api/scores", scores::routes::routes(api_keys))
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .layer(cors)
        .with_state(db)
}

