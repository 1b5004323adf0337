//! Remote module tests.

mod http_tests;
