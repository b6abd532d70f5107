pub mod build;
pub mod probe;
pub mod show;
