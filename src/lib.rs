//! Bodur Oto Kurtarma marketing site library
//!
//! This library provides the content store, admin authentication and
//! HTTP surface for the site. The binary entry point is in main.rs.

pub mod config;
pub mod db;
pub mod seed;
mod sql;
pub mod upload;
pub mod web;
