//! Movie catalog models
//!
//! These mirror the upstream catalog payloads field for field, so they keep
//! the upstream snake_case names on the wire.

use serde::{Deserialize, Serialize};

/// Upstream list endpoint behind a movie listing type
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MovieListKind {
    Popular,
    TopRated,
    Upcoming,
    Trending,
}

impl MovieListKind {
    /// Parse a listing type; unknown or missing values fall back to trending
    pub fn parse(value: Option<&str>) -> Self {
        match value.map(|v| v.trim().to_lowercase()).as_deref() {
            Some("popular") => MovieListKind::Popular,
            Some("top-rated") => MovieListKind::TopRated,
            Some("upcoming") => MovieListKind::Upcoming,
            _ => MovieListKind::Trending,
        }
    }

    pub fn path(self) -> &'static str {
        match self {
            MovieListKind::Popular => "movie/popular",
            MovieListKind::TopRated => "movie/top_rated",
            MovieListKind::Upcoming => "movie/upcoming",
            MovieListKind::Trending => "trending/all/day",
        }
    }
}

/// Query parameters for movie listing
#[derive(Debug, Clone, Deserialize)]
pub struct MoviesFilter {
    #[serde(rename = "type")]
    pub kind: Option<String>,
    #[serde(default = "default_page")]
    pub page: u32,
    #[serde(default = "default_language")]
    pub language: String,
}

impl Default for MoviesFilter {
    fn default() -> Self {
        Self {
            kind: None,
            page: default_page(),
            language: default_language(),
        }
    }
}

fn default_page() -> u32 {
    1
}

fn default_language() -> String {
    "en-US".to_string()
}

/// Movie entry as it appears in list endpoints
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct MovieSummary {
    pub id: i64,
    pub adult: bool,
    pub backdrop_path: Option<String>,
    pub original_language: Option<String>,
    pub original_title: Option<String>,
    pub overview: Option<String>,
    pub popularity: f64,
    pub poster_path: Option<String>,
    pub release_date: Option<String>,
    pub vote_average: f64,
    pub vote_count: f64,
    pub video: bool,
    pub title: Option<String>,
    pub genre_ids: Vec<i64>,
}

/// Paginated movie list
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct PaginatedMovies {
    pub page: u32,
    pub total_pages: u32,
    pub total_results: u64,
    pub results: Vec<MovieSummary>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Genre {
    pub id: i64,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SpokenLanguage {
    pub english_name: Option<String>,
    pub name: Option<String>,
    pub iso_639_1: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ProductionCompany {
    pub id: i64,
    pub logo_path: Option<String>,
    pub name: Option<String>,
    pub origin_country: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ProductionCountry {
    pub iso_3166_1: Option<String>,
    pub name: Option<String>,
}

/// Primary movie details
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct MovieDetails {
    pub id: i64,
    pub adult: bool,
    pub backdrop_path: Option<String>,
    pub original_language: Option<String>,
    pub original_title: Option<String>,
    pub overview: Option<String>,
    pub popularity: f64,
    pub poster_path: Option<String>,
    pub release_date: Option<String>,
    pub vote_average: f64,
    pub vote_count: f64,
    pub video: bool,
    pub title: Option<String>,
    pub budget: f64,
    pub revenue: f64,
    pub genres: Vec<Genre>,
    pub homepage: Option<String>,
    pub imdb_id: Option<String>,
    pub runtime: Option<i64>,
    pub status: Option<String>,
    pub tagline: Option<String>,
    pub spoken_languages: Vec<SpokenLanguage>,
    pub production_companies: Vec<ProductionCompany>,
    pub production_countries: Vec<ProductionCountry>,
}

/// Cast or crew member
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct CreditMember {
    pub id: i64,
    pub name: Option<String>,
    pub original_name: Option<String>,
    pub popularity: f64,
    pub profile_path: Option<String>,
    pub gender: Option<i64>,
    pub adult: bool,
    pub known_for_department: Option<String>,
    pub cast_id: Option<i64>,
    pub character: Option<String>,
    pub credit_id: Option<String>,
    pub department: Option<String>,
    pub job: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct MovieCredits {
    pub cast: Vec<CreditMember>,
    pub crew: Vec<CreditMember>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ReviewAuthor {
    pub name: Option<String>,
    pub username: Option<String>,
    pub avatar_path: Option<String>,
    pub rating: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Review {
    pub id: String,
    pub author: Option<String>,
    pub author_details: Option<ReviewAuthor>,
    pub content: Option<String>,
    pub url: Option<String>,
    pub created_at: Option<String>,
    pub updated_at: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct MovieReviews {
    pub id: i64,
    pub page: u32,
    pub total_pages: u32,
    pub total_results: u64,
    pub results: Vec<Review>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct MovieVideo {
    pub name: Option<String>,
    pub key: Option<String>,
    pub site: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct MovieVideos {
    pub results: Vec<MovieVideo>,
}

/// Composite view assembled from the six detail requests
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FullMovieResponse {
    pub movie: MovieDetails,
    pub similar_movies: Vec<MovieSummary>,
    pub recommended_movies: Vec<MovieSummary>,
    pub credits: Option<MovieCredits>,
    pub reviews: Option<MovieReviews>,
    pub videos: Option<MovieVideos>,
    pub is_favorite_movie: bool,
}
