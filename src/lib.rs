//! Employee Tracker - employee activity tracking backend
//!
//! Employees clock in and out, report idle/active state, application usage
//! and website visits; administrators manage employees, read dashboards,
//! reports and timelines, and export PDF reports.
//!
//! # Architecture
//! - `storage`: SeaORM persistence (entities live in the `migration` crate)
//! - `services`: business operations, one service per concern
//! - `api`: HTTP handlers, token service and middleware
//! - `report`: report document model and PDF rendering
//! - `interfaces`: administrative CLI commands
//! - `config`: static configuration
//! - `runtime`: application lifecycle and execution modes
//! - `system`: logging

pub mod api;
pub mod cli;
pub mod config;
pub mod errors;
pub mod interfaces;
pub mod report;
pub mod runtime;
pub mod services;
pub mod storage;
pub mod system;
pub mod utils;
