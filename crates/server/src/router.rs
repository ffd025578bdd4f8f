use axum::routing::get;
use axum::{Extension, Router};

use crate::graphql;
use crate::handlers;
use crate::state::AppState;

pub fn create_router(state: AppState) -> Router {
    let schema = graphql::build_schema(&state);

    Router::new()
        // REST surface
        .route("/movies/{year}", get(handlers::get_movies_by_year))
        .route(
            "/moviesforyears/{num_years}",
            get(handlers::get_movies_for_years),
        )
        .route("/performance/{year}", get(handlers::get_fetch_performance))
        .route(
            "/performancebyyears/{num_years}",
            get(handlers::get_performance_plot),
        )
        // GraphQL surface
        .route(
            "/graphql",
            get(graphql::graphql_playground).post(graphql::graphql_handler),
        )
        // Generated chart images
        .route("/static/{file_name}", get(handlers::get_static_file))
        .layer(Extension(schema))
        .with_state(state)
}
