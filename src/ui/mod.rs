pub mod browser;
pub(crate) mod common;
pub mod picker;
pub mod terminal;
