// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use tracing::Span;

/// The logging handle every component receives at construction.
///
/// Wraps a span so a component's events are scoped under its name and class
/// wherever the subscriber renders them. Cloning is cheap.
#[derive(Debug, Clone)]
pub struct Logger {
    span: Span,
}

impl Logger {
    pub fn root() -> Self {
        Self {
            span: tracing::info_span!("switchyard"),
        }
    }

    /// Child logger scoped to one component instance.
    pub fn for_component(&self, name: &str, class: &str) -> Self {
        Self {
            span: tracing::info_span!(parent: &self.span, "component", component = name, class = class),
        }
    }

    pub fn in_scope<T>(&self, f: impl FnOnce() -> T) -> T {
        self.span.in_scope(f)
    }

    pub fn span(&self) -> &Span {
        &self.span
    }
}

impl Default for Logger {
    fn default() -> Self {
        Self::root()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn in_scope_returns_closure_value() {
        let logger = Logger::root().for_component("Fixed", "ImageSourceComponent<float, 2>");
        assert_eq!(logger.in_scope(|| 41 + 1), 42);
    }
}
