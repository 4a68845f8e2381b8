//! Tests for the token codec and token service

mod service_tests;
