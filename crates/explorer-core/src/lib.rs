//! Core engine for the chess opening-explorer dashboard.
//!
//! Builds the opening-sequence prefix tree, reconstructs board positions
//! from SAN move sequences, and aggregates the heatmap and rating-bracket
//! views. Pure and synchronous; the HTTP layer lives in the `server` crate.

pub mod board;
pub mod brackets;
pub mod dataset;
pub mod filters;
pub mod game_record;
pub mod heatmap;
pub mod notation;
pub mod opening_tree;
