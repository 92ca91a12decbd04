//! CLI library components for the COVID-19 severity tool.

#![deny(unsafe_code)]

pub mod logging;
pub mod pipeline;
