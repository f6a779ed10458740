//! Playlist Creator matching core - shared modules for the CLI.

pub mod models;
pub mod pipeline;
pub mod queries;
pub mod ranking;
pub mod review;
pub mod scoring;
pub mod selector;
pub mod similarity;
