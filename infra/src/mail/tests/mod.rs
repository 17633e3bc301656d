//! Unit tests for mail module

mod create_service_tests;
