// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use std::sync::Arc;

use async_trait::async_trait;

use crate::backends::local::capabilities::{
    FixedImageCapability, MovingImageCapability, ResultImageCapability,
};
use crate::backends::local::data::Image;
use crate::blueprint::ParameterMap;
use crate::errors::ExecutionError;
use crate::observability::Logger;
use crate::traits::{
    Capability, CapabilitySignature, Component, ComponentKind, Feed, Port, Pull, Scalar, Slot,
    ValueType,
};

/// Entry point for an image the caller supplies through
/// [`Network::set_input`](crate::engine::Network::set_input).
///
/// Provides the image under every image role, so one source can feed a
/// sink directly or serve as a registration stage's fixed or moving input.
pub struct ImageSourceComponent<N, const D: usize> {
    name: String,
    reader: Arc<ImageReader<N, D>>,
}

struct ImageReader<N, const D: usize> {
    name: String,
    slot: Arc<Slot<Image<N, D>>>,
}

#[async_trait]
impl<N: Scalar, const D: usize> Pull<Image<N, D>> for ImageReader<N, D> {
    async fn pull(&self) -> Result<Image<N, D>, ExecutionError> {
        self.slot.get().ok_or_else(|| ExecutionError::MissingInput {
            component: self.name.clone(),
        })
    }
}

impl<N: Scalar, const D: usize> ImageSourceComponent<N, D> {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            reader: Arc::new(ImageReader {
                name: name.to_string(),
                slot: Arc::new(Slot::new()),
            }),
        }
    }
}

impl<N: Scalar, const D: usize> Component for ImageSourceComponent<N, D> {
    fn name(&self) -> &str {
        &self.name
    }

    fn provide(&self, signature: &CapabilitySignature) -> Option<Port> {
        let reader: Arc<dyn Pull<Image<N, D>>> = self.reader.clone();
        if *signature == ResultImageCapability::<N, D>::signature() {
            Some(Port::new::<ResultImageCapability<N, D>>(reader))
        } else if *signature == FixedImageCapability::<N, D>::signature() {
            Some(Port::new::<FixedImageCapability<N, D>>(reader))
        } else if *signature == MovingImageCapability::<N, D>::signature() {
            Some(Port::new::<MovingImageCapability<N, D>>(reader))
        } else {
            None
        }
    }

    fn accept(&mut self, _port: Port) -> bool {
        false
    }

    fn connections_satisfied(&self) -> bool {
        true
    }

    fn input(&self) -> Option<Port> {
        Some(Port::new::<Feed<Image<N, D>>>(self.reader.slot.clone()))
    }
}

impl<N: Scalar, const D: usize> ComponentKind for ImageSourceComponent<N, D> {
    const CLASS_NAME: &'static str = "ImageSourceComponent";

    fn value_type() -> ValueType {
        ValueType::of::<N>()
    }

    fn dimensionality() -> usize {
        D
    }

    fn provided() -> Vec<CapabilitySignature> {
        vec![
            ResultImageCapability::<N, D>::signature(),
            FixedImageCapability::<N, D>::signature(),
            MovingImageCapability::<N, D>::signature(),
        ]
    }

    fn accepted() -> Vec<CapabilitySignature> {
        Vec::new()
    }

    fn construct(name: &str, _parameters: &ParameterMap, _logger: Logger) -> Result<Self, String> {
        Ok(Self::new(name))
    }
}
