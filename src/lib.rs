pub mod app;
pub mod catalog;
pub mod cli;
pub mod config;
pub mod controller;
pub mod output;
pub mod palette;
pub mod view;

#[cfg(test)]
mod tests;
