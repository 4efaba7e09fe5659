//! Command-line front ends

pub mod play;
