// Application layer - collaborator traits and dashboard orchestration
pub mod city_data_source;
pub mod dashboard_controller;
pub mod host_ui;
pub mod panel;
pub mod settings_panel;
pub mod settings_store;
