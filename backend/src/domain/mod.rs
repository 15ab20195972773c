//! # Domain Module
//!
//! Contains all business logic for the contribution tracker.
//!
//! ## Module Organization
//!
//! - **contribution_service**: Submission lifecycle, aggregates and report export
//! - **contribution_form**: Form validation, amount parsing and form state
//! - **transaction_simulator**: Simulated mobile-money payment with injectable randomness
//! - **statistics**: Totals, distinct contributors, payment-method breakdown
//! - **export_service**: Plain-text report rendering and amount formatting
//! - **notifier**: User-visible notifications raised by domain operations
//!
//! ## Business Rules
//!
//! - Every submission produces exactly one record, successful or failed
//! - Only successful records count towards totals and contributors
//! - Contributors are distinct by exact name
//! - Records are kept newest first
//! - Only one submission may be in flight at a time

pub mod commands;
pub mod contribution_form;
pub mod contribution_service;
pub mod export_service;
pub mod models;
pub mod notifier;
pub mod statistics;
pub mod transaction_simulator;

pub use commands::*;
pub use contribution_form::*;
pub use contribution_service::*;
pub use export_service::*;
pub use notifier::*;
pub use transaction_simulator::*;
