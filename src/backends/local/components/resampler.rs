// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use crate::backends::local::capabilities::{
    MovingImageCapability, ReconnectTransformCapability, ResultImageCapability,
    TransformCapability,
};
use crate::backends::local::components::{lock, log_hookup, Connections};
use crate::backends::local::data::{Image, Transform};
use crate::blueprint::ParameterMap;
use crate::errors::ExecutionError;
use crate::observability::messages::component::CachedResultCleared;
use crate::observability::messages::StructuredLog;
use crate::observability::Logger;
use crate::traits::{
    Capability, CapabilitySignature, Component, ComponentKind, Port, Pull, Reconnect, Scalar,
    ValueType,
};

/// Applies a composite transform to the moving image.
///
/// The transform is pulled once and kept until the composite transform
/// reconnects, so pulling the result image again does not rerun the stages.
pub struct ResamplerComponent<N, const D: usize> {
    name: String,
    logger: Logger,
    output: Arc<ResampledImage<N, D>>,
}

struct ResampledImage<N, const D: usize> {
    name: String,
    logger: Logger,
    transform: Mutex<Connections<Arc<dyn Pull<Transform<N, D>>>>>,
    moving: Mutex<Connections<Arc<dyn Pull<Image<N, D>>>>>,
    cached: Mutex<Option<Transform<N, D>>>,
}

impl<N: Scalar, const D: usize> ResampledImage<N, D> {
    fn missing_input(&self) -> ExecutionError {
        ExecutionError::MissingInput {
            component: self.name.clone(),
        }
    }

    async fn current_transform(&self) -> Result<Transform<N, D>, ExecutionError> {
        let cached = lock(&self.cached).clone();
        if let Some(transform) = cached {
            return Ok(transform);
        }
        let upstream = lock(&self.transform)
            .single()
            .cloned()
            .ok_or_else(|| self.missing_input())?;
        let transform = upstream.pull().await?;
        *lock(&self.cached) = Some(transform.clone());
        Ok(transform)
    }
}

#[async_trait]
impl<N: Scalar, const D: usize> Pull<Image<N, D>> for ResampledImage<N, D> {
    async fn pull(&self) -> Result<Image<N, D>, ExecutionError> {
        let transform = self.current_transform().await?;
        let moving = lock(&self.moving)
            .single()
            .cloned()
            .ok_or_else(|| self.missing_input())?;

        let mut image = moving.pull().await?;
        image
            .applied_transforms
            .extend(transform.steps.iter().map(|step| step.kind.clone()));
        Ok(image)
    }
}

impl<N: Scalar, const D: usize> Reconnect for ResampledImage<N, D> {
    fn reconnect(&self) {
        *lock(&self.cached) = None;
        self.logger
            .in_scope(|| CachedResultCleared { component: &self.name }.log());
    }
}

impl<N: Scalar, const D: usize> Component for ResamplerComponent<N, D> {
    fn name(&self) -> &str {
        &self.name
    }

    fn provide(&self, signature: &CapabilitySignature) -> Option<Port> {
        if *signature == ResultImageCapability::<N, D>::signature() {
            let image: Arc<dyn Pull<Image<N, D>>> = self.output.clone();
            Some(Port::new::<ResultImageCapability<N, D>>(image))
        } else if *signature == ReconnectTransformCapability::signature() {
            let reconnect: Arc<dyn Reconnect> = self.output.clone();
            Some(Port::new::<ReconnectTransformCapability>(reconnect))
        } else {
            None
        }
    }

    fn accept(&mut self, port: Port) -> bool {
        let accepted = if let Some(transform) = port.handle::<TransformCapability<N, D>>() {
            lock(&self.output.transform).push(transform);
            true
        } else if let Some(moving) = port.handle::<MovingImageCapability<N, D>>() {
            lock(&self.output.moving).push(moving);
            true
        } else {
            false
        };
        log_hookup(&self.logger, &self.name, &port, accepted)
    }

    fn connections_satisfied(&self) -> bool {
        lock(&self.output.transform).is_single() && lock(&self.output.moving).is_single()
    }
}

impl<N: Scalar, const D: usize> ComponentKind for ResamplerComponent<N, D> {
    const CLASS_NAME: &'static str = "ResamplerComponent";

    fn value_type() -> ValueType {
        ValueType::of::<N>()
    }

    fn dimensionality() -> usize {
        D
    }

    fn provided() -> Vec<CapabilitySignature> {
        vec![
            ResultImageCapability::<N, D>::signature(),
            ReconnectTransformCapability::signature(),
        ]
    }

    fn accepted() -> Vec<CapabilitySignature> {
        vec![
            TransformCapability::<N, D>::signature(),
            MovingImageCapability::<N, D>::signature(),
        ]
    }

    fn construct(name: &str, _parameters: &ParameterMap, logger: Logger) -> Result<Self, String> {
        Ok(Self {
            name: name.to_string(),
            logger: logger.clone(),
            output: Arc::new(ResampledImage {
                name: name.to_string(),
                logger,
                transform: Mutex::new(Connections::new()),
                moving: Mutex::new(Connections::new()),
                cached: Mutex::new(None),
            }),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backends::local::components::ImageSourceComponent;
    use crate::backends::local::data::TransformStep;
    use crate::traits::Feed;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct CountingTransform {
        pulls: AtomicUsize,
    }

    #[async_trait]
    impl Pull<Transform<f32, 2>> for CountingTransform {
        async fn pull(&self) -> Result<Transform<f32, 2>, ExecutionError> {
            let n = self.pulls.fetch_add(1, Ordering::SeqCst);
            Ok(Transform {
                steps: vec![TransformStep {
                    kind: format!("Step{}", n),
                    parameters: vec![],
                    iterations: 0,
                }],
            })
        }
    }

    fn wired() -> (ResamplerComponent<f32, 2>, Arc<CountingTransform>, ImageSourceComponent<f32, 2>) {
        let mut resampler =
            ResamplerComponent::<f32, 2>::construct("Resampler", &ParameterMap::new(), Logger::root()).unwrap();
        let transform = Arc::new(CountingTransform {
            pulls: AtomicUsize::new(0),
        });
        let moving = ImageSourceComponent::<f32, 2>::new("Moving");
        moving
            .input()
            .unwrap()
            .handle::<Feed<Image<f32, 2>>>()
            .unwrap()
            .set(Image::filled([2, 2], 0.25));

        assert!(resampler.accept(Port::new::<TransformCapability<f32, 2>>(transform.clone())));
        assert!(resampler.accept(
            moving
                .provide(&MovingImageCapability::<f32, 2>::signature())
                .unwrap()
        ));
        (resampler, transform, moving)
    }

    fn result_of(resampler: &ResamplerComponent<f32, 2>) -> Arc<dyn Pull<Image<f32, 2>>> {
        resampler
            .provide(&ResultImageCapability::<f32, 2>::signature())
            .unwrap()
            .handle::<ResultImageCapability<f32, 2>>()
            .unwrap()
    }

    #[tokio::test]
    async fn applies_transform_to_moving_image() {
        let (resampler, _, _moving) = wired();
        assert!(resampler.connections_satisfied());

        let image = result_of(&resampler).pull().await.unwrap();
        assert_eq!(image.applied_transforms, vec!["Step0"]);
        assert_eq!(image.pixels, vec![0.25; 4]);
    }

    #[tokio::test]
    async fn reconnect_drops_the_cached_transform() {
        let (resampler, transform, _moving) = wired();
        let result = result_of(&resampler);

        result.pull().await.unwrap();
        result.pull().await.unwrap();
        assert_eq!(transform.pulls.load(Ordering::SeqCst), 1);

        resampler
            .provide(&ReconnectTransformCapability::signature())
            .unwrap()
            .handle::<ReconnectTransformCapability>()
            .unwrap()
            .reconnect();

        let image = result.pull().await.unwrap();
        assert_eq!(image.applied_transforms, vec!["Step1"]);
    }

    #[test]
    fn needs_a_transform_and_a_moving_image() {
        let resampler =
            ResamplerComponent::<f32, 2>::construct("Resampler", &ParameterMap::new(), Logger::root()).unwrap();
        assert!(!resampler.connections_satisfied());
    }
}
