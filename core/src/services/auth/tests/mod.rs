//! Tests for the login service
