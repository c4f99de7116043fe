//! Tests for the authentication service


#[cfg(test)]
mod service_tests;
