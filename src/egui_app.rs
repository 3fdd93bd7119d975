//! Egui application modules: state, controller, and rendering.
/// Application controller and its background jobs.
pub mod controller;
/// Plain data describing everything the UI renders.
pub mod state;
/// Widget rendering for the main window.
pub mod ui;
/// Pure helpers that map predictions onto display values.
pub mod view_model;
