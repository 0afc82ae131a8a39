// Domain layer - stat catalog, settings model and the pure dashboard engine
pub mod dashboard;
pub mod district;
pub mod layout;
pub mod metrics;
pub mod settings;
pub mod stat;
