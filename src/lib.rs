pub mod app;
pub mod audio;
pub mod config;
pub mod event;
pub mod game;
pub mod geometry;
pub mod input;
pub mod render;
pub mod scores;
