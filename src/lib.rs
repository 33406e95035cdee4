//! Bitfft: radix-2 Fourier and cosine transforms.
//!
//! Fast Fourier transforms (one- and two-dimensional, complex or real
//! input) and discrete cosine transforms (one- and two-dimensional) on
//! power-of-two dimensions.
//!
//! Buffers are plain slices with explicit offsets. Complex values are
//! interleaved as `[re0, im0, re1, im1, ..]`; two-dimensional data are
//! square matrices stored with the first index running fastest.
//!
//! ```rust
//! use bitfft::{CFft1D, Dct1D};
//! use num_complex::Complex;
//!
//! let fft = CFft1D::<f64>::with_len(4).unwrap();
//! let spectrum = fft.forward(&[Complex::new(1.0, 0.0); 4]);
//! assert!((spectrum[0].re - 4.0).abs() < 1e-12);
//!
//! let mut dct = Dct1D::<f64>::with_len(4).unwrap();
//! let coef = dct.forward(&[1.0; 4]);
//! assert!((coef[0] - 4.0).abs() < 1e-12);
//! ```
//!
//! # Licensing
//! This Source Code is subject to the terms of the Mozilla Public License
//! version 2.0 (the "License"). You can obtain a copy of the License at
//! http://mozilla.org/MPL/2.0/ .

mod cfft1d;
mod cfft2d;
mod dct1d;
mod dct2d;
mod error;
mod precompute_utils;
mod radix2;

pub use crate::cfft1d::CFft1D;
pub use crate::cfft2d::CFft2D;
pub use crate::dct1d::Dct1D;
pub use crate::dct2d::Dct2D;
pub use crate::error::TransformError;
pub use crate::precompute_utils::{reverse, reverse_bits};

#[cfg(test)]
use appro_eq::AbsError;
#[cfg(test)]
use std::fmt::Debug;

/// Dimension of a transform
pub trait Transform {
    /// Number of samples along each axis
    fn dim(&self) -> usize;

    /// `log2(dim())`
    fn bits(&self) -> u32;
}

/// Fourier transform callable through a shared reference
///
/// Implementors hold no scratch state, so a single instance may serve
/// several threads at once.
pub trait SharedFourierTransform<T>: Transform + Sync {
    /// Transforms interleaved complex input from `source[source_off..]` into
    /// `dest[dest_off..]`. The inverse is scaled by the number of samples.
    fn apply_complex(
        &self,
        source: &[T],
        source_off: usize,
        is_back: bool,
        dest: &mut [T],
        dest_off: usize,
    );

    /// Transforms real input from `source[source_off..]` into interleaved
    /// complex output at `dest[dest_off..]`.
    fn apply_real(
        &self,
        source: &[T],
        source_off: usize,
        is_back: bool,
        dest: &mut [T],
        dest_off: usize,
    );
}

/// Fourier transform that may use internal scratch space
pub trait FourierTransform<T>: Transform {
    /// See [`SharedFourierTransform::apply_complex`]
    fn apply_complex(
        &mut self,
        source: &[T],
        source_off: usize,
        is_back: bool,
        dest: &mut [T],
        dest_off: usize,
    );

    /// See [`SharedFourierTransform::apply_real`]
    fn apply_real(
        &mut self,
        source: &[T],
        source_off: usize,
        is_back: bool,
        dest: &mut [T],
        dest_off: usize,
    );
}

/// Discrete cosine transform on real values
pub trait CosineTransform<T>: Transform {
    /// Forward (DCT-II) or inverse (DCT-III) transform of real values from
    /// `source[source_off..]` into `dest[dest_off..]`.
    fn apply(
        &mut self,
        source: &[T],
        source_off: usize,
        is_back: bool,
        dest: &mut [T],
        dest_off: usize,
    );
}

#[cfg(test)]
trait FloatEps {
    fn eps() -> Self;
}

#[cfg(test)]
impl FloatEps for f32 {
    fn eps() -> Self {
        1e-2
    }
}

#[cfg(test)]
impl FloatEps for f64 {
    fn eps() -> Self {
        1e-7
    }
}

#[cfg(test)]
fn assert_appro_eq<
    A: AbsError<B, C> + Debug + ?Sized,
    B: Debug + ?Sized,
    C: FloatEps + PartialOrd + Debug,
>(
    expected: &A,
    actual: &B,
) {
    appro_eq::assert_appro_eq!(expected, actual, C::eps());
}
