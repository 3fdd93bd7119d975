//! Library exports for reuse in integration tests.
/// Per-platform config and data directories.
pub mod app_dirs;
/// Persisted application settings.
pub mod config;
/// Key-value storage for the last submitted recipe.
pub mod draft_store;
/// Shared egui UI modules.
pub mod egui_app;
/// Shared HTTP agent construction.
pub mod http_client;
/// File logging setup.
pub mod logging;
/// Prediction service client and wire types.
pub mod prediction;
/// Recipe form fields and validation.
pub mod recipe;
