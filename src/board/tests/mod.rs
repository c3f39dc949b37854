//! Unit tests for the board module.

mod fixtures;

mod archive_tests;
mod domain_tests;
mod ordering_tests;
mod postgres_tests;
