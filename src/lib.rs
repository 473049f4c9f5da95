pub mod cli;
pub mod composition;
pub mod generator;
pub mod integrity_validator;
pub mod model;
pub mod quantity_aggregator;
pub mod schedule;
pub mod store;
