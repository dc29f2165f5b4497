/// Basic application code
pub mod app;
/// REST clients for outside services
pub mod client;
/// Controllers for form actions and REST endpoints
pub mod controller;
/// Domain objects
pub mod domain;
/// Error enums and user-facing result bodies
pub mod error;
/// Email composition and the advisory-send policy
pub mod notify;
/// Repositories
pub mod repo;
/// Application settings
pub mod settings;
/// Application telemetry for tracing and logging
pub mod telemetry;
