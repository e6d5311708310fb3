pub mod config;
pub mod generator;
pub mod grid;
pub mod pathfinder;
pub mod statistics;
