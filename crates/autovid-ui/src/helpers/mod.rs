// crates/autovid-ui/src/helpers/mod.rs

pub mod dialog;
pub mod log;
pub mod open;
