//! Conversions between domain types and the DTOs in the `shared` crate.

pub mod contribution_mapper;

pub use contribution_mapper::ContributionMapper;
