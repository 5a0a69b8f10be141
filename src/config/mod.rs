// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

mod loader;
mod validation;

pub mod consts;

pub use loader::{
    load_and_validate_blueprint, load_blueprint, load_blueprints, parse_blueprint, BlueprintConfig,
    BlueprintFormat, ComponentConfig, ConfigScalar, ConfigValue, ConnectionConfig,
};
pub use validation::{validate_blueprint_config, validate_blueprint_set};
