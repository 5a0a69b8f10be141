// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use crate::backends::local::components::{
    CompositeTransformComponent, ImageSinkComponent, ImageSourceComponent,
    RegistrationStageComponent, ResamplerComponent,
};
use crate::catalog::ComponentCatalog;
use crate::traits::Scalar;

/// Register every built-in component kind.
///
/// The registration family (source, sink, stage, composite transform and
/// resampler) exists for `float` and `double` in 2 and 3 dimensions. Sources
/// and sinks are also available for `unsigned char` and `short`, for
/// pipelines that only move images.
pub fn register_defaults(catalog: &mut ComponentCatalog) {
    register_registration_family::<f32, 2>(catalog);
    register_registration_family::<f32, 3>(catalog);
    register_registration_family::<f64, 2>(catalog);
    register_registration_family::<f64, 3>(catalog);

    register_image_io::<u8, 2>(catalog);
    register_image_io::<u8, 3>(catalog);
    register_image_io::<i16, 2>(catalog);
    register_image_io::<i16, 3>(catalog);
}

fn register_image_io<N: Scalar, const D: usize>(catalog: &mut ComponentCatalog) {
    catalog.register::<ImageSourceComponent<N, D>>();
    catalog.register::<ImageSinkComponent<N, D>>();
}

fn register_registration_family<N: Scalar, const D: usize>(catalog: &mut ComponentCatalog) {
    register_image_io::<N, D>(catalog);
    catalog.register::<RegistrationStageComponent<N, D>>();
    catalog.register::<CompositeTransformComponent<N, D>>();
    catalog.register::<ResamplerComponent<N, D>>();
}

/// Class names of the built-in components, for help output.
pub fn list_available_classes() -> Vec<&'static str> {
    ComponentCatalog::with_defaults()
        .class_names()
        .into_iter()
        .collect()
}

/// Check if a class name is provided by the built-in components.
pub fn is_class_available(class_name: &str) -> bool {
    list_available_classes().contains(&class_name)
}
