// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use std::sync::Arc;

use async_trait::async_trait;

use crate::backends::local::capabilities::ResultImageCapability;
use crate::backends::local::components::{log_hookup, Connections};
use crate::backends::local::data::Image;
use crate::blueprint::ParameterMap;
use crate::errors::ExecutionError;
use crate::observability::messages::component::SinkUpdated;
use crate::observability::messages::StructuredLog;
use crate::observability::Logger;
use crate::traits::{
    Capability, CapabilitySignature, Component, ComponentKind, Feed, Port, Pull, Scalar, Slot,
    ValueType,
};

/// Terminal component: updating it pulls the image through the network and
/// keeps it for [`Network::output`](crate::engine::Network::output).
pub struct ImageSinkComponent<N, const D: usize> {
    name: String,
    logger: Logger,
    upstream: Connections<Arc<dyn Pull<Image<N, D>>>>,
    slot: Arc<Slot<Image<N, D>>>,
}

impl<N: Scalar, const D: usize> ImageSinkComponent<N, D> {
    pub fn new(name: &str, logger: Logger) -> Self {
        Self {
            name: name.to_string(),
            logger,
            upstream: Connections::new(),
            slot: Arc::new(Slot::new()),
        }
    }
}

#[async_trait]
impl<N: Scalar, const D: usize> Component for ImageSinkComponent<N, D> {
    fn name(&self) -> &str {
        &self.name
    }

    fn provide(&self, _signature: &CapabilitySignature) -> Option<Port> {
        None
    }

    fn accept(&mut self, port: Port) -> bool {
        let accepted = match port.handle::<ResultImageCapability<N, D>>() {
            Some(handle) => {
                self.upstream.push(handle);
                true
            }
            None => false,
        };
        log_hookup(&self.logger, &self.name, &port, accepted)
    }

    fn connections_satisfied(&self) -> bool {
        self.upstream.is_single()
    }

    fn output(&self) -> Option<Port> {
        Some(Port::new::<Feed<Image<N, D>>>(self.slot.clone()))
    }

    fn is_sink(&self) -> bool {
        true
    }

    async fn update(&self) -> Result<(), ExecutionError> {
        let upstream = self
            .upstream
            .single()
            .ok_or_else(|| ExecutionError::MissingInput {
                component: self.name.clone(),
            })?;
        let image = upstream.pull().await?;
        self.slot.set(image);
        self.logger.in_scope(|| SinkUpdated { component: &self.name }.log());
        Ok(())
    }
}

impl<N: Scalar, const D: usize> ComponentKind for ImageSinkComponent<N, D> {
    const CLASS_NAME: &'static str = "ImageSinkComponent";

    fn value_type() -> ValueType {
        ValueType::of::<N>()
    }

    fn dimensionality() -> usize {
        D
    }

    fn provided() -> Vec<CapabilitySignature> {
        Vec::new()
    }

    fn accepted() -> Vec<CapabilitySignature> {
        vec![ResultImageCapability::<N, D>::signature()]
    }

    fn construct(name: &str, _parameters: &ParameterMap, logger: Logger) -> Result<Self, String> {
        Ok(Self::new(name, logger))
    }
}
