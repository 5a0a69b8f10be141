// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

mod blueprint;
mod config;
mod execution;
mod resolution;

pub use blueprint::BlueprintError;
pub use config::ConfigError;
pub use execution::ExecutionError;
pub use resolution::ResolutionError;
