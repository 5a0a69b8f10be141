// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Criterion keys understood by the catalog and the connection resolver.

/// Implementation class a component must be an instance of.
pub const NAME_OF_CLASS: &str = "NameOfClass";
/// Capability a connection is pinned to.
pub const NAME_OF_INTERFACE: &str = "NameOfInterface";
pub const DIMENSIONALITY: &str = "Dimensionality";
/// Value type of image pixels.
pub const PIXEL_TYPE: &str = "PixelType";
/// Value type used for internal computation; same check as `PixelType`.
pub const INTERNAL_COMPUTATION_VALUE_TYPE: &str = "InternalComputationValueType";
/// Stage names a multi-stage component runs, in order.
pub const EXECUTION_ORDER: &str = "ExecutionOrder";
/// Kind of transform a registration stage estimates.
pub const TRANSFORM_TYPE: &str = "TransformType";
/// Parameters of the estimated transform.
pub const TRANSFORM_PARAMETERS: &str = "TransformParameters";
/// Iteration budget of a registration stage's optimizer.
pub const NUMBER_OF_ITERATIONS: &str = "NumberOfIterations";
