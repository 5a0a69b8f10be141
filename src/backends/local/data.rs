// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Payloads that flow between the built-in components.
//!
//! They stay deliberately opaque: components move them between ports and
//! record what was applied, but no numeric work happens here.

use crate::traits::{CompositeState, Scalar};

/// An image of `D` axes with pixels of type `N`.
#[derive(Debug, Clone, PartialEq)]
pub struct Image<N, const D: usize> {
    pub size: [usize; D],
    pub pixels: Vec<N>,
    /// Kinds of the transform steps applied to this image, in order.
    pub applied_transforms: Vec<String>,
}

impl<N: Scalar, const D: usize> Image<N, D> {
    pub fn new(size: [usize; D], pixels: Vec<N>) -> Self {
        Self {
            size,
            pixels,
            applied_transforms: Vec::new(),
        }
    }

    /// An image with every pixel set to `value`.
    pub fn filled(size: [usize; D], value: N) -> Self {
        let count = size.iter().product();
        Self::new(size, vec![value; count])
    }

    pub fn pixel_count(&self) -> usize {
        self.pixels.len()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct TransformStep<N> {
    pub kind: String,
    pub parameters: Vec<N>,
    /// Optimizer iterations the stage ran to estimate this step.
    pub iterations: u32,
}

/// A composite transform: the steps estimated so far, applied in order.
#[derive(Debug, Clone, PartialEq)]
pub struct Transform<N, const D: usize> {
    pub steps: Vec<TransformStep<N>>,
}

impl<N, const D: usize> Default for Transform<N, D> {
    fn default() -> Self {
        Self { steps: Vec::new() }
    }
}

impl<N: Scalar, const D: usize> Transform<N, D> {
    pub fn kinds(&self) -> Vec<&str> {
        self.steps.iter().map(|s| s.kind.as_str()).collect()
    }
}

impl<N: Scalar, const D: usize> CompositeState for Transform<N, D> {
    type Increment = TransformStep<N>;

    fn fold(&mut self, increment: TransformStep<N>) {
        self.steps.push(increment);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn filled_image_has_one_pixel_per_index() {
        let image = Image::<u8, 3>::filled([4, 3, 2], 7);
        assert_eq!(image.pixel_count(), 24);
        assert!(image.pixels.iter().all(|p| *p == 7));
        assert!(image.applied_transforms.is_empty());
    }

    #[test]
    fn folding_appends_steps_in_order() {
        let mut transform = Transform::<f64, 2>::default();
        transform.fold(TransformStep { kind: "Rigid".to_string(), parameters: vec![0.1], iterations: 0 });
        transform.fold(TransformStep { kind: "Affine".to_string(), parameters: vec![], iterations: 0 });
        assert_eq!(transform.kinds(), vec!["Rigid", "Affine"]);
    }
}
