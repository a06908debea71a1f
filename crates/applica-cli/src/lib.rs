//! CLI library components for the applica form autofill shell.

pub mod logging;
pub mod report;
