pub mod catalog;
pub mod filter;
pub mod person;
pub mod schedule;
pub mod validation;

pub use catalog::{FilterCatalogs, FilterField, OptionCatalog, OptionEntry, FILTER_CATALOGS};
pub use filter::{CanonicalQuery, Endpoint, FilterRequest, UpstreamRequest};
pub use person::{normalize_person_id, DEFAULT_PERSON_KIND};
pub use schedule::{SchedulePlan, ScheduleRequest};
pub use validation::{
    DatePartValidator, FieldResolver, GenreResolver, SortResolver, ValidationError,
};
