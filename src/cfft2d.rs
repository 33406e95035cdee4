//! Bitfft: radix-2 Fourier and cosine transforms.
//!
//! # Licensing
//! This Source Code is subject to the terms of the Mozilla Public License
//! version 2.0 (the "License"). You can obtain a copy of the License at
//! http://mozilla.org/MPL/2.0/ .

use crate::precompute_utils::{self, reverse_bits};
use crate::radix2;
use crate::{FourierTransform, Transform, TransformError};
use log::debug;
use num_complex::Complex;
use num_traits::float::{Float, FloatConst};
use num_traits::identities::{one, zero};
use num_traits::{cast, NumAssign};

pub(crate) const MAX_BITS: u32 = 16;

/// Perform a two-dimensional Fourier transform on a square power-of-two matrix
///
/// A `len x len` matrix is stored with the first index running fastest:
/// element `[m, n]` lives at position `m + n * len`, and complex elements
/// are interleaved, so for a 2x2 matrix the buffer holds
/// `[re00, im00, re10, im10, re01, im01, re11, im11]`.
///
/// The instance owns a `2 * len * len` scratch buffer that every call
/// mutates, hence the `&mut self` receivers.
///
/// # Example
///
/// ```rust
/// use bitfft::CFft2D;
///
/// fn main() {
///     let input = [
///         2.0, 0.0, 1.0, 1.0, 0.0, 3.0, 2.0, 4.0,
///         5.0, 0.0, 3.0, 1.0, 2.0, 3.0, 2.0, 8.0,
///         2.0, 5.0, 2.0, 3.0, 3.0, 7.0, 2.0, 1.0,
///         5.0, 4.0, 1.0, 2.0, 4.0, 3.0, 2.0, 1.0,
///     ];
///     let mut output = [0.0; 32];
///
///     let mut fft = CFft2D::<f64>::with_len(4).unwrap();
///     fft.apply_complex(&input, 0, false, &mut output, 0);
///
///     println!("the transform of {:?} is {:?}", input, output);
/// }
/// ```
#[derive(Debug)]
pub struct CFft2D<T> {
    len: usize,
    bits: u32,
    scaler_n: T,
    work: Vec<T>,
}

impl<T: Float + FloatConst + NumAssign> CFft2D<T> {
    /// Returns a instances to execute FFT on `len x len` matrices
    ///
    /// `len` must be a power of two larger than 1 and smaller than `1 << 16`.
    ///
    /// ```rust
    /// use bitfft::CFft2D;
    /// let mut fft = CFft2D::<f64>::with_len(256).unwrap();
    /// ```
    pub fn with_len(len: usize) -> Result<Self, TransformError> {
        let bits = precompute_utils::calc_bits(len, MAX_BITS, "CFft2D")?;
        debug!("CFft2D: len {}, bits {}", len, bits);
        Ok(Self {
            len,
            bits,
            scaler_n: T::one() / cast(len * len).unwrap(),
            work: vec![zero(); (len * len) << 1],
        })
    }

    /// Number of samples along one side of the matrix
    pub fn dim(&self) -> usize {
        self.len
    }

    /// Bit width of the dimension
    pub fn bits(&self) -> u32 {
        self.bits
    }

    /// Transforms a matrix of interleaved complex samples.
    ///
    /// The inverse transform is scaled by \\(\frac 1 {n^2}\\).
    ///
    /// # Panics
    ///
    /// Panics if either buffer is too short for `2 * len * len` values past its offset.
    pub fn apply_complex(
        &mut self,
        source: &[T],
        source_off: usize,
        is_back: bool,
        dest: &mut [T],
        dest_off: usize,
    ) {
        let stride = self.len << 1;
        let size = stride * self.len;

        for m in 0..self.len {
            let src = source_off + (m << 1);
            let dst = dest_off + (reverse_bits(m, self.bits) << 1);
            for row in (0..size).step_by(stride) {
                dest[dst + row] = source[src + row];
                dest[dst + row + 1] = source[src + row + 1];
            }
        }
        self.convert(dest, dest_off, is_back);
    }

    /// Transforms a matrix of real samples; the output is complex.
    ///
    /// # Panics
    ///
    /// Panics if `source` is too short for `len * len` values or `dest` for
    /// `2 * len * len` values past their offsets.
    pub fn apply_real(
        &mut self,
        source: &[T],
        source_off: usize,
        is_back: bool,
        dest: &mut [T],
        dest_off: usize,
    ) {
        for m in 0..self.len {
            let src = source_off + m;
            let dst = dest_off + (reverse_bits(m, self.bits) << 1);
            for n in 0..self.len {
                let pos = dst + ((n * self.len) << 1);
                dest[pos] = source[src + n * self.len];
                dest[pos + 1] = zero();
            }
        }
        self.convert(dest, dest_off, is_back);
    }

    // rows -> transpose with bit reversal -> rows (former columns) -> transpose back
    fn convert(&mut self, dest: &mut [T], dest_off: usize, is_back: bool) {
        let len = self.len;
        radix2::radix2_kernel(dest, dest_off, len, len, is_back);
        transpose_bitreverse(dest, dest_off, len, self.bits, &mut self.work);
        radix2::radix2_kernel(&mut self.work, 0, len, len, is_back);
        let scaler = if is_back { self.scaler_n } else { one() };
        transpose_scale(&self.work, len, scaler, dest, dest_off);
    }

    /// The 1 scaling factor forward transform
    ///
    /// `source` holds `len * len` elements, first index running fastest.
    ///
    /// ```rust
    /// use num_complex::Complex;
    /// use bitfft::CFft2D;
    ///
    /// let input = [
    ///     Complex::new(2.0, 0.0), Complex::new(1.0, 1.0),
    ///     Complex::new(5.0, 0.0), Complex::new(3.0, 1.0),
    /// ];
    ///
    /// let mut fft = CFft2D::<f64>::with_len(2).unwrap();
    /// let output = fft.forward(&input);
    /// ```
    pub fn forward(&mut self, source: &[Complex<T>]) -> Vec<Complex<T>> {
        self.convert_complex(source, false)
    }

    /// The \\(\frac 1 {n^2}\\) scaling factor backward transform
    ///
    /// ```rust
    /// use num_complex::Complex;
    /// use bitfft::CFft2D;
    ///
    /// let input = [
    ///     Complex::new(2.0, 0.0), Complex::new(1.0, 1.0),
    ///     Complex::new(5.0, 0.0), Complex::new(3.0, 1.0),
    /// ];
    ///
    /// let mut fft = CFft2D::<f64>::with_len(2).unwrap();
    /// let output = fft.forward(&input);
    /// let restored = fft.backward(&output);
    /// ```
    pub fn backward(&mut self, source: &[Complex<T>]) -> Vec<Complex<T>> {
        self.convert_complex(source, true)
    }

    fn convert_complex(&mut self, source: &[Complex<T>], is_back: bool) -> Vec<Complex<T>> {
        if source.len() != self.len * self.len {
            panic!(
                "invalid length (source: {}, fft.len: {} x {})",
                source.len(),
                self.len,
                self.len
            )
        }
        let flat = precompute_utils::interleave(source);
        let mut ret = vec![zero(); flat.len()];
        self.apply_complex(&flat, 0, is_back, &mut ret, 0);
        precompute_utils::deinterleave(&ret)
    }
}

/// Writes the transpose of `source` into `dest`, bit-reversing the row
/// index on the way so the next row pass sees bit-reversed input.
fn transpose_bitreverse<T: Copy>(
    source: &[T],
    source_off: usize,
    len: usize,
    bits: u32,
    dest: &mut [T],
) {
    let stride = len << 1;
    for n in 0..len {
        let src = source_off + n * stride;
        let dst = reverse_bits(n, bits) << 1;
        for m in 0..len {
            dest[dst + m * stride] = source[src + (m << 1)];
            dest[dst + m * stride + 1] = source[src + (m << 1) + 1];
        }
    }
}

/// Writes the scaled transpose of `source` into `dest`.
fn transpose_scale<T: Float>(source: &[T], len: usize, scaler: T, dest: &mut [T], dest_off: usize) {
    let stride = len << 1;
    for n in 0..len {
        let src = n << 1;
        let dst = dest_off + n * stride;
        for m in 0..len {
            dest[dst + (m << 1)] = source[src + m * stride] * scaler;
            dest[dst + (m << 1) + 1] = source[src + m * stride + 1] * scaler;
        }
    }
}

impl<T> Transform for CFft2D<T> {
    fn dim(&self) -> usize {
        self.len
    }

    fn bits(&self) -> u32 {
        self.bits
    }
}

impl<T: Float + FloatConst + NumAssign> FourierTransform<T> for CFft2D<T> {
    fn apply_complex(
        &mut self,
        source: &[T],
        source_off: usize,
        is_back: bool,
        dest: &mut [T],
        dest_off: usize,
    ) {
        CFft2D::apply_complex(self, source, source_off, is_back, dest, dest_off)
    }

    fn apply_real(
        &mut self,
        source: &[T],
        source_off: usize,
        is_back: bool,
        dest: &mut [T],
        dest_off: usize,
    ) {
        CFft2D::apply_real(self, source, source_off, is_back, dest, dest_off)
    }
}
