//! Symlinking pipeline outputs into the flat `IGVnav` directory.

pub mod generator;
pub mod rules;
