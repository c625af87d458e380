pub mod completion;
pub mod fields;
pub mod imdb_id;
pub mod record;

pub use completion::{CompletionPolicy, DEFAULT_COMPLETENESS_THRESHOLD, Presence, is_meaningful};
pub use imdb_id::{IdParseError, ImdbId};
pub use record::{FieldMap, Record, RecordSchema};
