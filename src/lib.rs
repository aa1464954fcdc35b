//! Regenerate a blog's README index from its markdown articles.
//!
//! A run enumerates the articles, assigns each one a "last changed" instant
//! (from git status plus a cached `update.json`, or from file metadata),
//! renders a link list sorted newest first, and writes the index and cache.

pub mod build_info;
pub mod commands;
pub mod config;
pub mod error;
pub mod fs;
pub mod git;
pub mod model;
pub mod output;
pub mod pipeline;
pub mod reconcile;
pub mod render;
pub mod scan;
pub mod source;
pub mod store;
