//! Library components of the `spst` command-line tool.

pub mod listing;
pub mod logging;
pub mod summary;
