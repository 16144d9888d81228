// Composition root for the timer service.
//
// Responsibilities
// - Read config from environment.
// - Instantiate the in-memory infrastructure.
// - Wire it into the use case handlers and the axum router.

pub mod config;
pub mod http;
pub mod state;
