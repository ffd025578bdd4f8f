//! GraphQL query surface.
//!
//! Exposes the same catalog and chart services as the REST handlers, as a
//! single query root with three fields.

use std::sync::Arc;

use async_graphql::http::{playground_source, GraphQLPlaygroundConfig};
use async_graphql::{Context, EmptyMutation, EmptySubscription, Object, Schema, SimpleObject};
use async_graphql_axum::{GraphQLRequest, GraphQLResponse};
use axum::response::{Html, IntoResponse};
use axum::Extension;
use chrono::{Datelike, Utc};

use crate::services::{ChartService, ServiceLabel, YearSpan};
use crate::state::{AppState, Catalog};

/// A review score from one ratings source.
#[derive(Debug, Clone, SimpleObject)]
pub struct Rating {
    pub source: String,
    pub value: String,
}

/// Movie entry exposed over GraphQL.
///
/// Mirrors [`omdb::Movie`] field for field; kept separate so the client
/// crate stays free of GraphQL derives.
#[derive(Debug, Clone, SimpleObject)]
pub struct Movie {
    pub id: String,
    pub title: String,
    pub year: String,
    pub genre: Vec<String>,
    pub director: String,
    pub actors: Vec<String>,
    pub plot: String,
    pub language: String,
    pub country: String,
    pub awards: String,
    pub ratings: Vec<Rating>,
    pub poster: String,
}

impl From<omdb::Movie> for Movie {
    fn from(movie: omdb::Movie) -> Self {
        Self {
            id: movie.id,
            title: movie.title,
            year: movie.year,
            genre: movie.genre,
            director: movie.director,
            actors: movie.actors,
            plot: movie.plot,
            language: movie.language,
            country: movie.country,
            awards: movie.awards,
            ratings: movie
                .ratings
                .into_iter()
                .map(|rating| Rating {
                    source: rating.source,
                    value: rating.value,
                })
                .collect(),
            poster: movie.poster,
        }
    }
}

#[derive(Debug, Clone, SimpleObject)]
pub struct MovieFetchPerformance {
    pub movie_count: usize,
    pub time_taken: String,
}

#[derive(Debug, Clone, SimpleObject)]
pub struct PlotPerformance {
    pub plot_url: String,
}

pub struct QueryRoot;

#[Object]
impl QueryRoot {
    /// All movies across the trailing span of years.
    async fn all_movies(
        &self,
        ctx: &Context<'_>,
        num_years: i32,
    ) -> async_graphql::Result<Vec<Movie>> {
        let catalog = ctx.data_unchecked::<Arc<Catalog>>();
        let span = YearSpan::trailing(Utc::now().year(), num_years);
        let movies = catalog.fetch_span(span).await?;
        Ok(movies.into_iter().map(Movie::from).collect())
    }

    /// Movie count and fetch duration for a single year.
    async fn fetch_performance(
        &self,
        ctx: &Context<'_>,
        year: i32,
    ) -> async_graphql::Result<MovieFetchPerformance> {
        let catalog = ctx.data_unchecked::<Arc<Catalog>>();
        let fetched = catalog.fetch_year(year).await?;
        Ok(MovieFetchPerformance {
            movie_count: fetched.movies.len(),
            time_taken: format!("{:.2} seconds", fetched.elapsed.as_secs_f64()),
        })
    }

    /// Render the performance chart for the trailing span of years.
    async fn performance_plot(
        &self,
        ctx: &Context<'_>,
        num_years: i32,
    ) -> async_graphql::Result<PlotPerformance> {
        let catalog = ctx.data_unchecked::<Arc<Catalog>>();
        let charts = ctx.data_unchecked::<Arc<ChartService>>();
        let span = YearSpan::trailing(Utc::now().year(), num_years);
        let samples = catalog.sample_span(span).await?;
        charts.render(&samples, ServiceLabel::Graphql).await?;
        Ok(PlotPerformance {
            plot_url: charts.chart_url(ServiceLabel::Graphql),
        })
    }
}

pub type MovieSchema = Schema<QueryRoot, EmptyMutation, EmptySubscription>;

pub fn build_schema(state: &AppState) -> MovieSchema {
    Schema::build(QueryRoot, EmptyMutation, EmptySubscription)
        .data(Arc::clone(&state.catalog))
        .data(Arc::clone(&state.charts))
        .finish()
}

pub async fn graphql_handler(
    Extension(schema): Extension<MovieSchema>,
    req: GraphQLRequest,
) -> GraphQLResponse {
    schema.execute(req.into_inner()).await.into()
}

/// Interactive GraphQL Playground served on GET /graphql.
pub async fn graphql_playground() -> impl IntoResponse {
    Html(playground_source(GraphQLPlaygroundConfig::new("/graphql")))
}
