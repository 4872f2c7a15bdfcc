//! Common test utilities for claude-sync CLI and scenario tests.
//!
//! This module provides:
//! - `TestEnv`: one isolated machine (home, working directory, config)
//! - `SharedFolder`: a shared directory several machines sync through
//! - `fixtures`: reusable machine ids and file contents

#![allow(dead_code)]

pub mod env;
pub mod fixtures;

pub use env::*;
