//! Field names shared by the enrichment jobs and the downstream transform.

/// Dataset-local record key (MovieLens `movieId`, renamed upstream).
pub const MOVIE_ID: &str = "movie_id";
/// Numeric IMDb identifier, without the `tt` prefix.
pub const IMDB_ID: &str = "imdbId";

pub const MOVIE_TITLE: &str = "movie_title";
pub const TITLE: &str = "title";

pub const DESCRIPTION: &str = "description";
pub const INTERESTS: &str = "interests";
pub const RELEASE_DATE: &str = "release_date";
pub const DIRECTORS: &str = "directors";
pub const CAST: &str = "cast";
pub const WRITERS: &str = "writers";

/// Width-in-pixels (as a string) to URL, plus a `src` fallback entry.
pub const POSTER_URLS: &str = "poster_urls";
/// Single preferred poster URL picked out of [`POSTER_URLS`].
pub const POSTER_URL: &str = "poster_url";

/// Fields written by the metadata API job, in output order.
pub const METADATA_FIELDS: &[&str] = &[
    DESCRIPTION,
    INTERESTS,
    RELEASE_DATE,
    DIRECTORS,
    CAST,
    WRITERS,
];

/// Fields written by the poster scrape job.
pub const POSTER_FIELDS: &[&str] = &[POSTER_URLS];
