//! # File Storage Module
//!
//! File-based storage for the contribution tracker. Each storage key maps to
//! one JSON file in the data directory, and exported reports are written to
//! a separate export directory.
//!
//! ## File Format
//!
//! ```json
//! [
//!   {"id":"contribution::1710406507000::4f1c…","name":"Asha Juma","amount":5000.0,
//!    "paymentMethod":"M-Pesa","phoneNumber":"0712345678",
//!    "date":"3/14/2024, 9:15:07 AM","status":"success"}
//! ]
//! ```

pub mod connection;
pub mod contribution_repository;
pub mod report_directory;

#[cfg(test)]
pub mod test_utils;

pub use connection::FileConnection;
pub use contribution_repository::ContributionRepository;
pub use report_directory::ReportDirectory;
