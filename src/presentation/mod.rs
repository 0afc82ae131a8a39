// Presentation layer - host lifecycle entry points
pub mod loader;
