//! Approval module tests.
