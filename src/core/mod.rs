pub mod constants;
pub mod converter;
pub mod error;
pub mod format;
pub mod mock;
