//! GPA, CGPA and graduation planning service.
//!
//! The grading engines in [`grading`] are pure; [`server`] exposes them over
//! HTTP alongside a small document store for profiles and semester history.

pub mod config;
pub mod db;
pub mod export;
pub mod grading;
pub mod server;
pub mod types;
