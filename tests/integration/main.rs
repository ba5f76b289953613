//! Integration tests for the submission pipeline
//!
//! These tests use wiremock to stand in for the notification endpoint and
//! exercise the client and the full collect → submit → log cycle.

mod pipeline_tests;
mod submit_tests;
