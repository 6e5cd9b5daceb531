//! AuthVoice - voice deepfake detection CLI
//!
//! This crate provides the client half of a voice-authentication workflow:
//! it records a short voice sample from the microphone, uploads it to a
//! remote deepfake-detection service, and renders the resulting verdict.
//!
//! # Architecture
//!
//! The crate follows hexagonal (ports & adapters) architecture:
//!
//! - **Domain**: Recording session state machine, detection result value
//!   objects, and the pure result-presentation mapping
//! - **Application**: Use cases and port interfaces (traits)
//! - **Infrastructure**: Adapter implementations (cpal capture, HTTP
//!   detection client, config store)
//! - **CLI**: Command-line interface, argument parsing, and terminal output

pub mod application;
pub mod cli;
pub mod domain;
pub mod infrastructure;
