// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use crate::backends::local::capabilities::{
    FixedImageCapability, MovingImageCapability, MultiStageTransformCapability,
};
use crate::backends::local::components::{lock, log_hookup, Connections};
use crate::backends::local::data::{Image, Transform, TransformStep};
use crate::blueprint::ParameterMap;
use crate::catalog::CriterionStatus;
use crate::config::consts::{NUMBER_OF_ITERATIONS, TRANSFORM_PARAMETERS, TRANSFORM_TYPE};
use crate::errors::ExecutionError;
use crate::observability::Logger;
use crate::traits::{
    Capability, CapabilitySignature, Component, ComponentKind, Port, Pull, Scalar, Stage,
    ValueType,
};

const DEFAULT_TRANSFORM_TYPE: &str = "Identity";
const DEFAULT_NUMBER_OF_ITERATIONS: u32 = 100;

/// One stage of a multi-stage registration.
///
/// Accepts a fixed and a moving image and contributes one transform step,
/// described by its `TransformType`, `TransformParameters` and
/// `NumberOfIterations`, when the composite transform runs it.
pub struct RegistrationStageComponent<N, const D: usize> {
    stage: Arc<RegistrationStage<N, D>>,
    logger: Logger,
}

struct RegistrationStage<N, const D: usize> {
    name: String,
    transform_type: String,
    parameters: Vec<N>,
    iterations: u32,
    inputs: Mutex<StageInputs<N, D>>,
}

struct StageInputs<N, const D: usize> {
    fixed: Connections<Arc<dyn Pull<Image<N, D>>>>,
    moving: Connections<Arc<dyn Pull<Image<N, D>>>>,
}

impl<N: Scalar, const D: usize> RegistrationStage<N, D> {
    fn inputs(&self) -> Result<(Arc<dyn Pull<Image<N, D>>>, Arc<dyn Pull<Image<N, D>>>), ExecutionError> {
        let inputs = lock(&self.inputs);
        match (inputs.fixed.single(), inputs.moving.single()) {
            (Some(fixed), Some(moving)) => Ok((fixed.clone(), moving.clone())),
            _ => Err(ExecutionError::MissingInput {
                component: self.name.clone(),
            }),
        }
    }
}

#[async_trait]
impl<N: Scalar, const D: usize> Stage<Transform<N, D>> for RegistrationStage<N, D> {
    fn stage_name(&self) -> &str {
        &self.name
    }

    async fn run_stage(&self, _initial: &Transform<N, D>) -> Result<TransformStep<N>, ExecutionError> {
        let (fixed, moving) = self.inputs()?;
        let fixed = fixed.pull().await?;
        let moving = moving.pull().await?;

        if fixed.size != moving.size {
            return Err(ExecutionError::ExecutionFailure {
                stage: self.name.clone(),
                message: format!(
                    "fixed image size {:?} differs from moving image size {:?}",
                    fixed.size, moving.size
                ),
            });
        }
        Ok(TransformStep {
            kind: self.transform_type.clone(),
            parameters: self.parameters.clone(),
            iterations: self.iterations,
        })
    }
}

fn parse_all<N: Scalar>(values: &[String]) -> Result<Vec<N>, String> {
    values
        .iter()
        .map(|v| {
            v.trim()
                .parse::<N>()
                .map_err(|_| format!("'{}' is not a valid {}", v, N::NAME))
        })
        .collect()
}

impl<N: Scalar, const D: usize> Component for RegistrationStageComponent<N, D> {
    fn name(&self) -> &str {
        &self.stage.name
    }

    fn provide(&self, signature: &CapabilitySignature) -> Option<Port> {
        if *signature != MultiStageTransformCapability::<N, D>::signature() {
            return None;
        }
        let stage: Arc<dyn Stage<Transform<N, D>>> = self.stage.clone();
        Some(Port::new::<MultiStageTransformCapability<N, D>>(stage))
    }

    fn accept(&mut self, port: Port) -> bool {
        let accepted = {
            let mut inputs = lock(&self.stage.inputs);
            if let Some(fixed) = port.handle::<FixedImageCapability<N, D>>() {
                inputs.fixed.push(fixed);
                true
            } else if let Some(moving) = port.handle::<MovingImageCapability<N, D>>() {
                inputs.moving.push(moving);
                true
            } else {
                false
            }
        };
        log_hookup(&self.logger, &self.stage.name, &port, accepted)
    }

    fn connections_satisfied(&self) -> bool {
        let inputs = lock(&self.stage.inputs);
        inputs.fixed.is_single() && inputs.moving.is_single()
    }
}

impl<N: Scalar, const D: usize> ComponentKind for RegistrationStageComponent<N, D> {
    const CLASS_NAME: &'static str = "RegistrationStageComponent";

    fn value_type() -> ValueType {
        ValueType::of::<N>()
    }

    fn dimensionality() -> usize {
        D
    }

    fn provided() -> Vec<CapabilitySignature> {
        vec![MultiStageTransformCapability::<N, D>::signature()]
    }

    fn accepted() -> Vec<CapabilitySignature> {
        vec![
            FixedImageCapability::<N, D>::signature(),
            MovingImageCapability::<N, D>::signature(),
        ]
    }

    fn meets_criterion(key: &str, values: &[String]) -> CriterionStatus {
        let satisfied = match key {
            TRANSFORM_TYPE => matches!(values, [kind] if !kind.trim().is_empty()),
            TRANSFORM_PARAMETERS => !values.is_empty() && parse_all::<N>(values).is_ok(),
            NUMBER_OF_ITERATIONS => matches!(values, [n] if n.trim().parse::<u32>().is_ok()),
            _ => return CriterionStatus::Failed,
        };
        if satisfied {
            CriterionStatus::Satisfied
        } else {
            CriterionStatus::Failed
        }
    }

    fn construct(name: &str, parameters: &ParameterMap, logger: Logger) -> Result<Self, String> {
        let values = parameters.get(TRANSFORM_PARAMETERS).unwrap_or_default();
        let iterations = match parameters.first(NUMBER_OF_ITERATIONS) {
            Some(n) => n
                .trim()
                .parse::<u32>()
                .map_err(|_| format!("'{}' is not a valid iteration count", n))?,
            None => DEFAULT_NUMBER_OF_ITERATIONS,
        };

        Ok(Self {
            stage: Arc::new(RegistrationStage {
                name: name.to_string(),
                transform_type: parameters
                    .first(TRANSFORM_TYPE)
                    .unwrap_or(DEFAULT_TRANSFORM_TYPE)
                    .to_string(),
                parameters: parse_all::<N>(values)?,
                iterations,
                inputs: Mutex::new(StageInputs {
                    fixed: Connections::new(),
                    moving: Connections::new(),
                }),
            }),
            logger,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backends::local::capabilities::ResultImageCapability;
    use crate::backends::local::components::ImageSourceComponent;
    use crate::traits::Feed;

    fn stage(parameters: ParameterMap) -> RegistrationStageComponent<f64, 2> {
        RegistrationStageComponent::construct("Rigid", &parameters, Logger::root()).unwrap()
    }

    fn source(name: &str, size: [usize; 2]) -> ImageSourceComponent<f64, 2> {
        let source = ImageSourceComponent::new(name);
        source
            .input()
            .unwrap()
            .handle::<Feed<Image<f64, 2>>>()
            .unwrap()
            .set(Image::filled(size, 0.0));
        source
    }

    fn connect(
        stage: &mut RegistrationStageComponent<f64, 2>,
        fixed: &ImageSourceComponent<f64, 2>,
        moving: &ImageSourceComponent<f64, 2>,
    ) {
        assert!(stage.accept(fixed.provide(&FixedImageCapability::<f64, 2>::signature()).unwrap()));
        assert!(stage.accept(moving.provide(&MovingImageCapability::<f64, 2>::signature()).unwrap()));
    }

    #[test]
    fn criteria_understood_by_the_stage() {
        struct TestCase {
            key: &'static str,
            values: Vec<&'static str>,
            expected: CriterionStatus,
        }

        let cases = vec![
            TestCase { key: "TransformType", values: vec!["Rigid"], expected: CriterionStatus::Satisfied },
            TestCase { key: "TransformType", values: vec![" "], expected: CriterionStatus::Failed },
            TestCase { key: "TransformParameters", values: vec!["0.5", "-2", "1e-3"], expected: CriterionStatus::Satisfied },
            TestCase { key: "TransformParameters", values: vec!["0.5", "abc"], expected: CriterionStatus::Failed },
            TestCase { key: "NumberOfIterations", values: vec!["250"], expected: CriterionStatus::Satisfied },
            TestCase { key: "NumberOfIterations", values: vec!["-1"], expected: CriterionStatus::Failed },
            TestCase { key: "Metric", values: vec!["MeanSquares"], expected: CriterionStatus::Failed },
        ];

        for case in cases {
            let values: Vec<String> = case.values.iter().map(|v| v.to_string()).collect();
            assert_eq!(
                RegistrationStageComponent::<f64, 2>::meets_criterion(case.key, &values),
                case.expected,
                "{} = {:?}",
                case.key,
                case.values
            );
        }
    }

    #[test]
    fn construct_rejects_unparsable_parameters() {
        let parameters = ParameterMap::new().with("TransformParameters", ["1", "x"]);
        let result = RegistrationStageComponent::<f32, 2>::construct("Rigid", &parameters, Logger::root());
        assert!(result.is_err());
    }

    #[test]
    fn needs_one_fixed_and_one_moving_image() {
        let mut stage = stage(ParameterMap::new());
        let fixed = source("Fixed", [4, 4]);
        let moving = source("Moving", [4, 4]);

        assert!(!stage.connections_satisfied());
        assert!(stage.accept(fixed.provide(&FixedImageCapability::<f64, 2>::signature()).unwrap()));
        assert!(!stage.connections_satisfied());
        assert!(stage.accept(moving.provide(&MovingImageCapability::<f64, 2>::signature()).unwrap()));
        assert!(stage.connections_satisfied());
        assert!(!stage.accept(moving.provide(&ResultImageCapability::<f64, 2>::signature()).unwrap()));
    }

    #[tokio::test]
    async fn run_stage_contributes_configured_step() {
        let mut component = stage(
            ParameterMap::new()
                .with("TransformType", ["Affine"])
                .with("TransformParameters", ["1", "0", "0", "1"])
                .with("NumberOfIterations", ["250"]),
        );
        let fixed = source("Fixed", [3, 3]);
        let moving = source("Moving", [3, 3]);
        connect(&mut component, &fixed, &moving);

        let stage = component
            .provide(&MultiStageTransformCapability::<f64, 2>::signature())
            .unwrap()
            .handle::<MultiStageTransformCapability<f64, 2>>()
            .unwrap();
        let step = stage.run_stage(&Transform::default()).await.unwrap();

        assert_eq!(stage.stage_name(), "Rigid");
        assert_eq!(step.kind, "Affine");
        assert_eq!(step.parameters, vec![1.0, 0.0, 0.0, 1.0]);
        assert_eq!(step.iterations, 250);
    }

    #[tokio::test]
    async fn unset_iteration_count_uses_the_default() {
        let mut component = stage(ParameterMap::new().with("TransformType", ["Rigid"]));
        let fixed = source("Fixed", [2, 2]);
        let moving = source("Moving", [2, 2]);
        connect(&mut component, &fixed, &moving);

        let stage = component
            .provide(&MultiStageTransformCapability::<f64, 2>::signature())
            .unwrap()
            .handle::<MultiStageTransformCapability<f64, 2>>()
            .unwrap();
        let step = stage.run_stage(&Transform::default()).await.unwrap();
        assert_eq!(step.iterations, DEFAULT_NUMBER_OF_ITERATIONS);
    }

    #[tokio::test]
    async fn run_stage_fails_on_mismatched_images() {
        let mut component = stage(ParameterMap::new());
        let fixed = source("Fixed", [3, 3]);
        let moving = source("Moving", [3, 4]);
        connect(&mut component, &fixed, &moving);

        let stage = component
            .provide(&MultiStageTransformCapability::<f64, 2>::signature())
            .unwrap()
            .handle::<MultiStageTransformCapability<f64, 2>>()
            .unwrap();
        let err = stage.run_stage(&Transform::default()).await.unwrap_err();
        assert!(matches!(err, ExecutionError::ExecutionFailure { ref stage, .. } if stage == "Rigid"));
    }
}
