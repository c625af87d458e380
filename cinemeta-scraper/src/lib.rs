pub mod config;
pub mod error;
pub mod http;
pub mod imdb_api;
pub mod posters;
pub mod source;
pub mod types;

pub use config::{
    ApiConfig, ConfigSource, ConfigSources, config_path, config_sources, mask_secret, save_to_file,
};
pub use error::{FetchError, ScrapeError};
pub use imdb_api::ImdbApiSource;
pub use posters::{PosterPageSource, PosterSet};
pub use source::EnrichmentSource;
