//! # IO
//!
//! In-memory exchange formats. Reading and writing files is left to the application.

pub mod sheet;
