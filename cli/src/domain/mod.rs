//! Domain layer — pure machine model, guard, builder, validation, and parsing.
//!
//! This module has zero imports from `crate::infra`, `crate::commands`,
//! `crate::application`, `tokio`, `std::fs`, `std::process`, or `std::net`.
//! All functions are synchronous and take data in, returning data out.

pub mod config;
pub mod create;
pub mod error;
pub mod interpret;
pub mod machine;
pub mod tool_args;
pub mod transition;
pub mod validate;

pub use config::{OrbdeckConfig, apply_config_value, validate_config_key, validate_config_value};
pub use error::{CommandError, ConfigError, MachineError, ParseError, ValidationError};
pub use machine::{Architecture, Distro, Machine, MachineInfo, MachineState};
pub use tool_args::{BaseArgs, CommandArgs, CreateArgs};
pub use transition::{Decision, RequestedState, StateTransition, TransitionFlow, decide};
