//! Use cases (application services)

pub mod bulk_mutation;
pub mod catalog_engine;
pub mod payload;
pub mod usage_analytics;

#[cfg(test)]
mod test_support;
