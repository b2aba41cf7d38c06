//! Prompt Lab: assemble generation prompts from a topic, a style DNA record and a
//! product template, and hand them to the remote prompt service.

pub mod api;
pub mod catalog;
pub mod composer;
pub mod config;
pub mod lab;
pub mod loader;
pub mod models;
pub mod render;
pub mod routes;
pub mod selection;
pub mod submission;

#[cfg(test)]
mod testing;
