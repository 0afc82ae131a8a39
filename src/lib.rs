// City Vitals - dashboard engine for a city simulation's vital statistics
pub mod application;
pub mod domain;
pub mod infrastructure;
pub mod presentation;
