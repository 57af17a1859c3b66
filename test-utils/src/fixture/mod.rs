//! Test fixtures providing reusable test data without database insertion.
//!
//! Unlike factories, fixtures do NOT insert data into the database. Use them
//! to test conversions and business logic that only needs in-memory models.
//!
//! # Example
//!
//! ```rust,ignore
//! use test_utils::fixture;
//!
//! let named = fixture::guild::entity_with("123", "Home");
//! ```

pub mod guild;
