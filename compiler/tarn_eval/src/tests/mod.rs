//! Test suites exercising the public evaluation API.

mod operators_tests;
