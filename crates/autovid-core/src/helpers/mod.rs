// crates/autovid-core/src/helpers/mod.rs
//
// Shared string helpers with no UI dependency.

pub mod format;
pub mod summary;
