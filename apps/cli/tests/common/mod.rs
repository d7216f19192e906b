//! Common test utilities for tunectl integration tests
//!
//! This module provides in-memory fakes for the catalog, the text generator
//! and the prompt, plus track and device fixtures.

#![allow(unused_imports)]
#![allow(dead_code)]

pub mod fakes;
pub mod fixtures;

pub use fakes::*;
pub use fixtures::*;
