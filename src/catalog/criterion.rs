// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use std::fmt::{self, Display, Formatter};

use crate::config::consts::{DIMENSIONALITY, INTERNAL_COMPUTATION_VALUE_TYPE, NAME_OF_CLASS, PIXEL_TYPE};
use crate::traits::ValueType;

/// Outcome of testing one criterion against one catalog entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CriterionStatus {
    Satisfied,
    Failed,
    /// Not decided by static properties; the component itself must judge.
    Unknown,
}

impl Display for CriterionStatus {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            CriterionStatus::Satisfied => write!(f, "satisfied"),
            CriterionStatus::Failed => write!(f, "failed"),
            CriterionStatus::Unknown => write!(f, "unknown"),
        }
    }
}

/// The static identity of a catalog entry: class, value type, dimensionality.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TemplateProperties {
    pub class_name: &'static str,
    pub value_type: ValueType,
    pub dimensionality: usize,
}

impl TemplateProperties {
    /// Decide a criterion from static properties alone. Keys these
    /// properties do not cover are `Unknown`; a covered key needs exactly one
    /// value.
    pub fn check(&self, key: &str, values: &[String]) -> CriterionStatus {
        if !matches!(key, NAME_OF_CLASS | DIMENSIONALITY | PIXEL_TYPE | INTERNAL_COMPUTATION_VALUE_TYPE) {
            return CriterionStatus::Unknown;
        }
        let [value] = values else {
            return CriterionStatus::Failed;
        };
        let value = value.trim();

        let satisfied = match key {
            NAME_OF_CLASS => value == self.class_name,
            DIMENSIONALITY => value.parse::<usize>().map_or(false, |d| d == self.dimensionality),
            _ => value == self.value_type.name(),
        };
        if satisfied {
            CriterionStatus::Satisfied
        } else {
            CriterionStatus::Failed
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn values(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn template_properties_decide_static_keys() {
        struct TestCase {
            key: &'static str,
            values: Vec<String>,
            expected: CriterionStatus,
        }

        let properties = TemplateProperties {
            class_name: "ImageSourceComponent",
            value_type: ValueType::of::<f32>(),
            dimensionality: 2,
        };

        let cases = vec![
            TestCase { key: "NameOfClass", values: values(&["ImageSourceComponent"]), expected: CriterionStatus::Satisfied },
            TestCase { key: "NameOfClass", values: values(&["ImageSinkComponent"]), expected: CriterionStatus::Failed },
            TestCase { key: "Dimensionality", values: values(&["2"]), expected: CriterionStatus::Satisfied },
            TestCase { key: "Dimensionality", values: values(&["3"]), expected: CriterionStatus::Failed },
            TestCase { key: "Dimensionality", values: values(&["two"]), expected: CriterionStatus::Failed },
            TestCase { key: "PixelType", values: values(&["float"]), expected: CriterionStatus::Satisfied },
            TestCase { key: "InternalComputationValueType", values: values(&["double"]), expected: CriterionStatus::Failed },
            TestCase { key: "PixelType", values: values(&["float", "float"]), expected: CriterionStatus::Failed },
            TestCase { key: "PixelType", values: values(&[]), expected: CriterionStatus::Failed },
            TestCase { key: "ExecutionOrder", values: values(&["Rigid"]), expected: CriterionStatus::Unknown },
        ];

        for case in cases {
            assert_eq!(
                properties.check(case.key, &case.values),
                case.expected,
                "{} = {:?}",
                case.key,
                case.values
            );
        }
    }
}
