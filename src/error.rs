//! Bitfft: radix-2 Fourier and cosine transforms.
//!
//! # Licensing
//! This Source Code is subject to the terms of the Mozilla Public License
//! version 2.0 (the "License"). You can obtain a copy of the License at
//! http://mozilla.org/MPL/2.0/ .

use thiserror::Error;

/// Errors raised while constructing a transform.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum TransformError {
    /// The dimension is not a power of two, is not larger than 1, or does
    /// not fit below `1 << max_bits`.
    #[error("invalid dimension {dim}: must be a power of two, larger than 1, and smaller than 1 << {max_bits}")]
    InvalidDimension {
        /// The rejected dimension.
        dim: usize,
        /// Exclusive bit-width ceiling of the transform.
        max_bits: u32,
    },
}
