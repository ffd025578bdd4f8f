//! Catalog aggregation: paginated per-year fetches, year-range
//! concatenation, and performance sampling.

use std::time::{Duration, Instant};

use async_trait::async_trait;
use omdb::{Movie, OmdbClient, OmdbError, SearchPage};
use serde::Serialize;
use thiserror::Error;

use super::span::YearSpan;

/// Fixed generic search term used for year queries.
const SEARCH_TERM: &str = "movie";

const FIRST_PAGE: u32 = 1;

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("OMDb API error: {0}")]
    Omdb(#[from] OmdbError),
}

/// One-page source for the movie catalog.
///
/// Abstracted so the pagination loop can be driven by a scripted source in
/// tests; production wires in [`OmdbClient`].
#[async_trait]
pub trait CatalogSource: Send + Sync {
    async fn search_page(
        &self,
        term: &str,
        year: Option<i32>,
        page: u32,
    ) -> Result<SearchPage, OmdbError>;
}

#[async_trait]
impl CatalogSource for OmdbClient {
    async fn search_page(
        &self,
        term: &str,
        year: Option<i32>,
        page: u32,
    ) -> Result<SearchPage, OmdbError> {
        OmdbClient::search_page(self, term, year, page).await
    }
}

/// Movies fetched for a single year plus the wall-clock cost of fetching
/// them across all pages.
#[derive(Debug, Clone)]
pub struct YearFetch {
    pub movies: Vec<Movie>,
    pub elapsed: Duration,
}

/// One (year, count, duration) measurement.
#[derive(Debug, Clone, Serialize)]
pub struct PerformanceSample {
    pub year: i32,
    pub count: usize,
    pub time_taken: f64,
}

pub struct CatalogService<S> {
    source: S,
    max_pages: u32,
}

impl<S: CatalogSource> CatalogService<S> {
    pub fn new(source: S, max_pages: u32) -> Self {
        Self { source, max_pages }
    }

    /// Fetch one catalog page, retrying once if the catalog was unreachable.
    /// Decoding failures are not retried.
    async fn search_page_with_retry(
        &self,
        year: i32,
        page: u32,
    ) -> Result<SearchPage, CatalogError> {
        match self.source.search_page(SEARCH_TERM, Some(year), page).await {
            Ok(result) => Ok(result),
            Err(err) if err.is_transport() => {
                tracing::warn!(
                    "Page {} for year {} failed, retrying once: {}",
                    page,
                    year,
                    err
                );
                Ok(self.source.search_page(SEARCH_TERM, Some(year), page).await?)
            }
            Err(err) => Err(err.into()),
        }
    }

    /// Fetch every search page for a year.
    ///
    /// Pages are requested sequentially from 1 until the catalog reports
    /// exhaustion, always bounded by `max_pages` in case the exhaustion
    /// signal never arrives.
    pub async fn fetch_year(&self, year: i32) -> Result<YearFetch, CatalogError> {
        let start = Instant::now();
        let mut movies = Vec::new();

        for page in FIRST_PAGE..=self.max_pages {
            let result = self.search_page_with_retry(year, page).await?;
            if result.exhausted {
                break;
            }
            movies.extend(result.movies);
        }

        let elapsed = start.elapsed();
        tracing::debug!(
            "Fetched {} movies for year {} in {:.2}s",
            movies.len(),
            year,
            elapsed.as_secs_f64()
        );

        Ok(YearFetch { movies, elapsed })
    }

    /// Fetch movies for every year in the span, concatenated in year order.
    ///
    /// Years are fetched strictly sequentially and results are not
    /// deduplicated across years.
    pub async fn fetch_span(&self, span: YearSpan) -> Result<Vec<Movie>, CatalogError> {
        let mut combined = Vec::new();
        for year in span.years() {
            let fetched = self.fetch_year(year).await?;
            combined.extend(fetched.movies);
        }
        tracing::info!("Fetched {} movies across span {}", combined.len(), span);
        Ok(combined)
    }

    /// Time the fetch for each year in the span, one sample per year.
    pub async fn sample_span(
        &self,
        span: YearSpan,
    ) -> Result<Vec<PerformanceSample>, CatalogError> {
        let mut samples = Vec::with_capacity(span.len());
        for year in span.years() {
            let fetched = self.fetch_year(year).await?;
            samples.push(PerformanceSample {
                year,
                count: fetched.movies.len(),
                time_taken: fetched.elapsed.as_secs_f64(),
            });
        }
        Ok(samples)
    }
}

#[cfg(test)]
mod tests {
    use std::collections::VecDeque;
    use std::sync::{Arc, Mutex};

    use super::*;

    /// Scripted page source: serves pre-programmed results in order, then
    /// falls back to a fixed page forever.
    #[derive(Clone)]
    struct MockCatalogSource {
        script: Arc<Mutex<VecDeque<Result<SearchPage, OmdbError>>>>,
        fallback: SearchPage,
        calls: Arc<Mutex<Vec<(Option<i32>, u32)>>>,
    }

    impl MockCatalogSource {
        fn new(fallback: SearchPage) -> Self {
            Self {
                script: Arc::new(Mutex::new(VecDeque::new())),
                fallback,
                calls: Arc::new(Mutex::new(Vec::new())),
            }
        }

        fn push(&self, result: Result<SearchPage, OmdbError>) {
            self.script.lock().unwrap().push_back(result);
        }

        fn call_count(&self) -> usize {
            self.calls.lock().unwrap().len()
        }

        /// Recorded (year, page) pairs, in call order.
        fn calls(&self) -> Vec<(Option<i32>, u32)> {
            self.calls.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl CatalogSource for MockCatalogSource {
        async fn search_page(
            &self,
            _term: &str,
            year: Option<i32>,
            page: u32,
        ) -> Result<SearchPage, OmdbError> {
            self.calls.lock().unwrap().push((year, page));
            match self.script.lock().unwrap().pop_front() {
                Some(result) => result,
                None => Ok(self.fallback.clone()),
            }
        }
    }

    fn movie(id: &str) -> Movie {
        Movie {
            id: id.to_string(),
            title: format!("Movie {}", id),
            year: "2023".to_string(),
            genre: vec!["Action".to_string()],
            director: "N/A".to_string(),
            actors: vec!["N/A".to_string()],
            plot: "N/A".to_string(),
            language: "N/A".to_string(),
            country: "N/A".to_string(),
            awards: "N/A".to_string(),
            ratings: Vec::new(),
            poster: "N/A".to_string(),
        }
    }

    fn page_of(ids: &[&str]) -> SearchPage {
        SearchPage {
            movies: ids.iter().map(|id| movie(id)).collect(),
            exhausted: false,
        }
    }

    fn exhausted() -> SearchPage {
        SearchPage {
            movies: Vec::new(),
            exhausted: true,
        }
    }

    fn api_error() -> OmdbError {
        OmdbError::Api {
            status_code: 503,
            message: "unavailable".to_string(),
        }
    }

    #[tokio::test]
    async fn test_fetch_year_stops_at_page_cap_without_exhaustion_signal() {
        // The source never reports exhaustion; the loop must still terminate.
        let source = MockCatalogSource::new(page_of(&["tt1", "tt2", "tt3"]));
        let service = CatalogService::new(source.clone(), 10);

        let fetched = service.fetch_year(2023).await.expect("bounded fetch");

        assert_eq!(source.call_count(), 10);
        assert_eq!(fetched.movies.len(), 30);
    }

    #[tokio::test]
    async fn test_fetch_year_stops_when_exhausted() {
        let source = MockCatalogSource::new(exhausted());
        source.push(Ok(page_of(&["tt1", "tt2"])));
        source.push(Ok(exhausted()));
        let service = CatalogService::new(source.clone(), 10);

        let fetched = service.fetch_year(2023).await.expect("two pages");

        assert_eq!(source.call_count(), 2);
        assert_eq!(fetched.movies.len(), 2);
        assert_eq!(fetched.movies[0].id, "tt1");
    }

    #[tokio::test]
    async fn test_exhausted_first_page_yields_empty_fetch() {
        let source = MockCatalogSource::new(exhausted());
        let service = CatalogService::new(source.clone(), 10);

        let fetched = service.fetch_year(1890).await.expect("empty year");

        assert_eq!(source.call_count(), 1);
        assert!(fetched.movies.is_empty());
        assert!(fetched.elapsed.as_secs_f64() >= 0.0);
    }

    #[tokio::test]
    async fn test_transient_transport_error_is_retried_once() {
        let source = MockCatalogSource::new(exhausted());
        source.push(Err(api_error()));
        source.push(Ok(exhausted()));
        let service = CatalogService::new(source.clone(), 10);

        let fetched = service.fetch_year(2023).await.expect("retry succeeded");

        assert_eq!(source.call_count(), 2);
        assert!(fetched.movies.is_empty());
    }

    #[tokio::test]
    async fn test_persistent_transport_error_propagates() {
        let source = MockCatalogSource::new(exhausted());
        source.push(Err(api_error()));
        source.push(Err(api_error()));
        let service = CatalogService::new(source.clone(), 10);

        let result = service.fetch_year(2023).await;

        assert_eq!(source.call_count(), 2);
        assert!(matches!(
            result,
            Err(CatalogError::Omdb(OmdbError::Api {
                status_code: 503,
                ..
            }))
        ));
    }

    #[tokio::test]
    async fn test_malformed_response_fails_without_retry() {
        let source = MockCatalogSource::new(exhausted());
        source.push(Err(OmdbError::MissingResponseFlag));
        let service = CatalogService::new(source.clone(), 10);

        let result = service.fetch_year(2023).await;

        assert_eq!(source.call_count(), 1);
        assert!(matches!(
            result,
            Err(CatalogError::Omdb(OmdbError::MissingResponseFlag))
        ));
    }

    #[tokio::test]
    async fn test_fetch_span_concatenates_in_year_order() {
        let source = MockCatalogSource::new(exhausted());
        // Year 2022: one page, then exhausted. Year 2023: likewise.
        source.push(Ok(page_of(&["tt-a"])));
        source.push(Ok(exhausted()));
        source.push(Ok(page_of(&["tt-b"])));
        source.push(Ok(exhausted()));
        let service = CatalogService::new(source.clone(), 10);

        let movies = service
            .fetch_span(YearSpan::trailing(2024, 1))
            .await
            .expect("span fetch");

        assert_eq!(
            movies.iter().map(|m| m.id.as_str()).collect::<Vec<_>>(),
            vec!["tt-a", "tt-b"]
        );
        let years: Vec<Option<i32>> = source.calls().iter().map(|(year, _)| *year).collect();
        assert_eq!(years, vec![Some(2022), Some(2022), Some(2023), Some(2023)]);
    }

    #[tokio::test]
    async fn test_sample_span_yields_one_sample_per_year() {
        let source = MockCatalogSource::new(exhausted());
        let service = CatalogService::new(source, 10);

        let samples = service
            .sample_span(YearSpan::trailing(2024, 2))
            .await
            .expect("samples");

        assert_eq!(
            samples.iter().map(|s| s.year).collect::<Vec<_>>(),
            vec![2021, 2022, 2023]
        );
        for sample in &samples {
            assert_eq!(sample.count, 0);
            assert!(sample.time_taken >= 0.0);
        }
    }
}
