// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use std::marker::PhantomData;
use std::sync::Arc;

use crate::backends::local::data::{Image, Transform};
use crate::traits::{Capability, Pull, Reconnect, Scalar, Stage, ValueType};

/// Which image an [`ImageCapability`] carries. Each role is its own
/// interface, so a registration stage can tell its fixed and moving inputs
/// apart.
pub trait ImageRole: Send + Sync + 'static {
    const INTERFACE: &'static str;
}

pub struct ResultImage;
pub struct FixedImage;
pub struct MovingImage;

impl ImageRole for ResultImage {
    const INTERFACE: &'static str = "ImageInterface";
}

impl ImageRole for FixedImage {
    const INTERFACE: &'static str = "FixedImageInterface";
}

impl ImageRole for MovingImage {
    const INTERFACE: &'static str = "MovingImageInterface";
}

/// Lazy access to an image.
pub struct ImageCapability<R, N, const D: usize>(PhantomData<(R, N)>);

impl<R: ImageRole, N: Scalar, const D: usize> Capability for ImageCapability<R, N, D> {
    const NAME: &'static str = R::INTERFACE;

    type Handle = Arc<dyn Pull<Image<N, D>>>;

    fn value_type() -> ValueType {
        ValueType::of::<N>()
    }

    fn dimensionality() -> usize {
        D
    }
}

pub type ResultImageCapability<N, const D: usize> = ImageCapability<ResultImage, N, D>;
pub type FixedImageCapability<N, const D: usize> = ImageCapability<FixedImage, N, D>;
pub type MovingImageCapability<N, const D: usize> = ImageCapability<MovingImage, N, D>;

/// Lazy access to a finished composite transform.
pub struct TransformCapability<N, const D: usize>(PhantomData<N>);

impl<N: Scalar, const D: usize> Capability for TransformCapability<N, D> {
    const NAME: &'static str = "TransformInterface";

    type Handle = Arc<dyn Pull<Transform<N, D>>>;

    fn value_type() -> ValueType {
        ValueType::of::<N>()
    }

    fn dimensionality() -> usize {
        D
    }
}

/// One stage of a multi-stage transform estimate.
pub struct MultiStageTransformCapability<N, const D: usize>(PhantomData<N>);

impl<N: Scalar, const D: usize> Capability for MultiStageTransformCapability<N, D> {
    const NAME: &'static str = "MultiStageTransformInterface";

    type Handle = Arc<dyn Stage<Transform<N, D>>>;

    fn value_type() -> ValueType {
        ValueType::of::<N>()
    }

    fn dimensionality() -> usize {
        D
    }
}

/// Notification that a composite transform was recomputed.
pub struct ReconnectTransformCapability;

impl Capability for ReconnectTransformCapability {
    const NAME: &'static str = "ReconnectTransformInterface";

    type Handle = Arc<dyn Reconnect>;

    fn value_type() -> ValueType {
        ValueType::untyped()
    }

    fn dimensionality() -> usize {
        0
    }
}
