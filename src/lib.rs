pub mod config;
pub mod error;
pub mod html;
pub mod models;
pub mod pipeline;
pub mod web;
