// Copyright 2026 the Loupe Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use wasm_bindgen::JsValue;

/// Failures while setting up a [`WebViewport`](crate::WebViewport).
#[derive(Debug, thiserror::Error)]
pub enum WebError {
    /// There is no global `window`.
    #[error("no global `window` is available")]
    NoWindow,
    /// The container is not attached to a document.
    #[error("the container has no owner document")]
    NoDocument,
    /// The canvas refused to create a 2D context.
    #[error("the canvas has no 2D rendering context")]
    NoContext,
    /// A DOM object had an unexpected type.
    #[error("expected a `{0}`")]
    UnexpectedType(&'static str),
    /// A DOM call threw.
    #[error("JavaScript error: {0}")]
    Js(String),
}

impl From<JsValue> for WebError {
    fn from(value: JsValue) -> Self {
        Self::Js(
            value
                .as_string()
                .unwrap_or_else(|| format!("{value:?}")),
        )
    }
}
