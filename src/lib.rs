pub mod classify;
pub mod config;
pub mod render;
pub mod schedule;
pub mod source;
pub mod text;
