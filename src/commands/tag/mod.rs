//! Tag commands

pub mod set;
