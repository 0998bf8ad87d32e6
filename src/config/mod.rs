//! JSON configuration for the demo binaries.

pub mod group_lines;
