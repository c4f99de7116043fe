//! Tests for token repository mocks
