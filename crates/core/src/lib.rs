pub mod media;
pub mod query;

pub use media::NowPlaying;
pub use query::{QueryField, SearchQuery};
