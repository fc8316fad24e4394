pub mod filter_service;
pub mod person_service;
pub mod query_builder;
pub mod schedule_service;

pub use filter_service::{FilterError, FilterService};
pub use person_service::{PersonError, PersonService};
pub use query_builder::FilterQueryBuilder;
pub use schedule_service::{ScheduleDays, ScheduleService};
