//! Human-readable rendering of health reports
//!
//! The console generator lays a [`HealthReport`](crate::facts::HealthReport) out the way
//! a reader scans it: a header naming the package, then one block per rating category
//! showing the rating next to the metrics it was derived from, then the weekly download
//! trend and any errors met while collecting. Colors are optional so the same output
//! can go to a terminal or a file.

mod console;

pub use console::generate as generate_console;
