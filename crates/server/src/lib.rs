pub mod errors;
pub mod extractors;
pub mod forms;
pub mod observability;
pub mod routes;
pub mod startup;
pub mod state;
pub mod templates;

pub use startup::run;
