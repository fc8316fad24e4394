pub mod extractor;
pub mod upstream;

pub use extractor::{
    DetailPageExtractor, ListPageExtractor, PassthroughExtractor, ScheduleExtractor,
};
pub use upstream::{UpstreamClient, UpstreamEnvelope, UpstreamFetcher};
