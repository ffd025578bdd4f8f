use serde::{Deserialize, Serialize};

use crate::error::OmdbError;

/// Sentinel substituted for any field the catalog left out.
pub const NOT_AVAILABLE: &str = "N/A";

/// Raw search envelope as returned by the catalog.
///
/// The catalog reports exhaustion in-band: a `"Response": "False"` body with
/// no `Search` array means there are no (more) results for the query.
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct RawSearchResponse {
    #[serde(rename = "Response")]
    pub response: Option<String>,
    #[serde(rename = "Search", default)]
    pub search: Vec<RawMovie>,
}

/// Raw movie record from a search result entry.
///
/// Every field is optional; the catalog omits keys rather than sending null.
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct RawMovie {
    #[serde(rename = "imdbID")]
    pub imdb_id: Option<String>,
    #[serde(rename = "Title")]
    pub title: Option<String>,
    #[serde(rename = "Year")]
    pub year: Option<String>,
    #[serde(rename = "Genre")]
    pub genre: Option<String>,
    #[serde(rename = "Director")]
    pub director: Option<String>,
    #[serde(rename = "Actors")]
    pub actors: Option<String>,
    #[serde(rename = "Plot")]
    pub plot: Option<String>,
    #[serde(rename = "Language")]
    pub language: Option<String>,
    #[serde(rename = "Country")]
    pub country: Option<String>,
    #[serde(rename = "Awards")]
    pub awards: Option<String>,
    #[serde(rename = "Ratings", default)]
    pub ratings: Vec<RawRating>,
    #[serde(rename = "Poster")]
    pub poster: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub(crate) struct RawRating {
    #[serde(rename = "Source")]
    pub source: Option<String>,
    #[serde(rename = "Value")]
    pub value: Option<String>,
}

/// A review score from one ratings source.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rating {
    pub source: String,
    pub value: String,
}

/// Normalized movie entry.
///
/// Every field is always present: missing source data is coerced to the
/// `"N/A"` sentinel rather than omitted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
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

fn or_na(field: Option<String>) -> String {
    field.unwrap_or_else(|| NOT_AVAILABLE.to_string())
}

/// Comma-separated source fields become ordered lists, so a missing field
/// normalizes to `["N/A"]`.
fn split_list(field: Option<String>) -> Vec<String> {
    or_na(field).split(", ").map(str::to_string).collect()
}

impl From<RawMovie> for Movie {
    fn from(raw: RawMovie) -> Self {
        Self {
            id: or_na(raw.imdb_id),
            title: or_na(raw.title),
            year: or_na(raw.year),
            genre: split_list(raw.genre),
            director: or_na(raw.director),
            actors: split_list(raw.actors),
            plot: or_na(raw.plot),
            language: or_na(raw.language),
            country: or_na(raw.country),
            awards: or_na(raw.awards),
            ratings: raw
                .ratings
                .into_iter()
                .map(|rating| Rating {
                    source: or_na(rating.source),
                    value: or_na(rating.value),
                })
                .collect(),
            poster: or_na(raw.poster),
        }
    }
}

/// One page of search results.
///
/// Exhaustion is an explicit flag, not an error: an exhausted page carries no
/// movies and tells the caller to stop paginating.
#[derive(Debug, Clone)]
pub struct SearchPage {
    pub movies: Vec<Movie>,
    pub exhausted: bool,
}

impl SearchPage {
    pub(crate) fn from_raw(raw: RawSearchResponse) -> crate::Result<Self> {
        match raw.response.as_deref() {
            None => Err(OmdbError::MissingResponseFlag),
            Some("True") => Ok(Self {
                movies: raw.search.into_iter().map(Movie::from).collect(),
                exhausted: false,
            }),
            Some(_) => Ok(Self {
                movies: Vec::new(),
                exhausted: true,
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn raw_movie(value: serde_json::Value) -> RawMovie {
        serde_json::from_value(value).expect("valid raw movie")
    }

    fn raw_response(value: serde_json::Value) -> RawSearchResponse {
        serde_json::from_value(value).expect("valid raw response")
    }

    #[test]
    fn test_missing_fields_default_to_na() {
        let movie = Movie::from(raw_movie(json!({ "imdbID": "tt0133093" })));

        assert_eq!(movie.id, "tt0133093");
        assert_eq!(movie.title, "N/A");
        assert_eq!(movie.year, "N/A");
        assert_eq!(movie.director, "N/A");
        assert_eq!(movie.plot, "N/A");
        assert_eq!(movie.language, "N/A");
        assert_eq!(movie.country, "N/A");
        assert_eq!(movie.awards, "N/A");
        assert_eq!(movie.poster, "N/A");
        assert_eq!(movie.genre, vec!["N/A"]);
        assert_eq!(movie.actors, vec!["N/A"]);
        assert!(movie.ratings.is_empty());
    }

    #[test]
    fn test_genre_and_actors_split_on_comma_space() {
        let movie = Movie::from(raw_movie(json!({
            "Genre": "Action, Drama",
            "Actors": "Keanu Reeves, Carrie-Anne Moss",
        })));

        assert_eq!(movie.genre, vec!["Action", "Drama"]);
        assert_eq!(movie.actors, vec!["Keanu Reeves", "Carrie-Anne Moss"]);
    }

    #[test]
    fn test_ratings_pair_source_and_value() {
        let movie = Movie::from(raw_movie(json!({
            "Ratings": [
                { "Source": "Internet Movie Database", "Value": "8.7/10" },
                { "Source": "Rotten Tomatoes" },
            ],
        })));

        assert_eq!(
            movie.ratings,
            vec![
                Rating {
                    source: "Internet Movie Database".to_string(),
                    value: "8.7/10".to_string(),
                },
                Rating {
                    source: "Rotten Tomatoes".to_string(),
                    value: "N/A".to_string(),
                },
            ]
        );
    }

    #[test]
    fn test_true_response_yields_records() {
        let page = SearchPage::from_raw(raw_response(json!({
            "Response": "True",
            "Search": [
                { "imdbID": "tt1", "Title": "First" },
                { "imdbID": "tt2", "Title": "Second" },
            ],
        })))
        .expect("valid page");

        assert!(!page.exhausted);
        assert_eq!(page.movies.len(), 2);
        assert_eq!(page.movies[0].title, "First");
        assert_eq!(page.movies[1].id, "tt2");
    }

    #[test]
    fn test_false_response_is_exhausted() {
        let page = SearchPage::from_raw(raw_response(json!({ "Response": "False" })))
            .expect("exhaustion is not an error");

        assert!(page.exhausted);
        assert!(page.movies.is_empty());
    }

    #[test]
    fn test_missing_response_flag_is_an_error() {
        let result = SearchPage::from_raw(raw_response(json!({ "Search": [] })));

        assert!(matches!(result, Err(OmdbError::MissingResponseFlag)));
    }
}
