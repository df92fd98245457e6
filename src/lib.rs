//! Exhibition records pipeline: load, filter, aggregate.
//!
//! The egui front end lives in the binary; everything here is free of
//! drawing types so it can be exercised headless.

pub mod data;
pub mod session;
