//! Test utilities and helpers for the recset project.
//!
//! This crate provides delimited-file fixtures for the test suites:
//! - `data_gen`: declarative construction of delimited temp files (delimiter,
//!   byte-order mark, line terminators, header span) and synthetic
//!   "inventory" data generation.
//!
//! It is intended for use within the recset test suites and development
//! tools only.

pub mod data_gen;
