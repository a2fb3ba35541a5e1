// Library surface shared by the binary and the integration tests.
pub mod config;
pub mod deadline;
pub mod display;
pub mod engine;
pub mod error;
pub mod results;
pub mod runtime;
pub mod scoring;
pub mod sequencer;
pub mod session;
pub mod validator;

pub use engine::{Game, Phase};
pub use error::GameError;
