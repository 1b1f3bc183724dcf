pub mod board;
pub mod brackets;
pub mod filters;
pub mod health;
pub mod heatmap;
pub mod opening_tree;
