//! Tracklet - a small single-user issue tracker.
//!
//! The library holds every rule; the `tracklet` binary is a thin consumer.
//!
//! - [`storage`]: the issue store, one JSON collection in a key-value slot
//! - [`service`]: request-shaped API with validation, not-found signalling,
//!   request logging and simulated latency
//! - [`dashboard`]: filtering, sorting and statistics
//! - [`config`], [`commands`], [`app`]: workspace setup and wiring

#![forbid(unsafe_code)]

// Public modules for library usage
pub mod dashboard;
pub mod domain;
pub mod error;
pub mod id_generation;
pub mod service;
pub mod storage;

// Workspace configuration and setup
pub mod commands;
pub mod config;

// Application context
pub mod app;

// Public CLI module (needed by binary)
pub mod cli;

// Output formatting
pub mod output;
