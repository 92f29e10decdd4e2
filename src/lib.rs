//! Core library for the boletim command line application.
//!
//! The library exposes high-level orchestration helpers that power the
//! command-line interface as well as the tests. The modules are structured to
//! keep responsibilities narrow and composable: workbook reading lives under
//! [`io`], the aggregate data structures inside [`model`], sheet
//! classification in [`ingest`], mean computation in [`calc`], table shaping
//! in [`format`], PDF output in [`render`], and the end-to-end run under
//! [`pipeline`].

pub mod calc;
pub mod error;
pub mod format;
pub mod ingest;
pub mod io;
pub mod model;
pub mod pipeline;
pub mod render;

pub use error::{BoletimError, Result};
