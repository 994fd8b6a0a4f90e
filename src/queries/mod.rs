pub mod person_queries;
pub mod consultation_queries;
pub mod stats_queries;
