//! # IO Module
//!
//! Adapter layer between the browser frontend and the domain logic: exposes
//! the REST API, converts between JSON DTOs and domain types, and maps domain
//! errors to HTTP status codes.

pub mod rest;
