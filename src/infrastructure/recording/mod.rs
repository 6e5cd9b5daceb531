//! Audio capture adapters

pub mod cpal_recorder;
pub mod wav;

pub use cpal_recorder::CpalRecorder;
