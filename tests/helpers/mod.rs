pub mod providers;
pub mod resolution;
