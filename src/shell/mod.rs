// Composition root for the timesheet pipeline.
//
// Responsibilities:
// - Read config from environment.
// - Instantiate concrete infrastructure implementations.
// - Wire implementations into the application handlers and the HTTP router.

pub mod config;
pub mod http;
