// Infrastructure layer - file persistence, configuration and host adapters
pub mod config;
pub mod headless_ui;
pub mod json_settings_store;
pub mod snapshot_source;
