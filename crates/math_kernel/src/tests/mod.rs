//! Cross-module integration tests
