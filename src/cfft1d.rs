//! Bitfft: radix-2 Fourier and cosine transforms.
//!
//! # Licensing
//! This Source Code is subject to the terms of the Mozilla Public License
//! version 2.0 (the "License"). You can obtain a copy of the License at
//! http://mozilla.org/MPL/2.0/ .

use crate::precompute_utils::{self, reverse_bits};
use crate::radix2;
use crate::{FourierTransform, SharedFourierTransform, Transform, TransformError};
use log::debug;
use num_complex::Complex;
use num_traits::float::{Float, FloatConst};
use num_traits::identities::zero;
use num_traits::{cast, NumAssign};

pub(crate) const MAX_BITS: u32 = 31;

/// Perform a one-dimensional Fourier transform on a power-of-two vector
///
/// <script type="text/javascript" src="http://cdn.mathjax.org/mathjax/latest/MathJax.js?config=TeX-AMS_CHTML"></script>
/// When X is input array and Y is output array,
/// the forward discrete Fourier transform of the one-dimensional array is
///
/// \\[ \Large Y_k = \sum_{j=0}\^{n-1} X_j e\^{- \frac {2 \pi i j k}{n}} \\]
///
/// also, the inverse discrete Fourier transform of the one-dimensional array is
///
/// \\[ \Large Y_k = \frac 1 n \sum_{j=0}\^{n-1} X_j e\^{\frac {2 \pi i j k}{n}} \\]
///
/// Complex samples are interleaved: `[.. re0, im0, re1, im1 ..]`.
///
/// The transform holds nothing but its dimension, so one instance may be
/// shared between threads.
///
/// # Example
///
/// ```rust
/// use bitfft::CFft1D;
///
/// fn main() {
///     let input = [2.0, 0.0, 1.0, 1.0, 0.0, 3.0, 2.0, 4.0];
///     let mut output = [0.0; 8];
///
///     let fft = CFft1D::<f64>::with_len(4).unwrap();
///     fft.apply_complex(&input, 0, false, &mut output, 0);
///
///     println!("the transform of {:?} is {:?}", input, output);
/// }
/// ```
#[derive(Debug, Clone)]
pub struct CFft1D<T> {
    len: usize,
    bits: u32,
    scaler_n: T,
}

impl<T: Float + FloatConst + NumAssign> CFft1D<T> {
    /// Returns a instances to execute FFT on vectors of `len` samples
    ///
    /// `len` must be a power of two larger than 1 and smaller than `1 << 31`.
    ///
    /// ```rust
    /// use bitfft::CFft1D;
    /// let fft = CFft1D::<f64>::with_len(1024).unwrap();
    /// assert!(CFft1D::<f64>::with_len(1000).is_err());
    /// ```
    pub fn with_len(len: usize) -> Result<Self, TransformError> {
        let bits = precompute_utils::calc_bits(len, MAX_BITS, "CFft1D")?;
        debug!("CFft1D: len {}, bits {}", len, bits);
        Ok(Self {
            len,
            bits,
            scaler_n: T::one() / cast(len).unwrap(),
        })
    }

    /// Number of samples per vector
    pub fn dim(&self) -> usize {
        self.len
    }

    /// Bit width of the dimension
    pub fn bits(&self) -> u32 {
        self.bits
    }

    /// Transforms `len` interleaved complex samples read from `source[source_off..]`
    /// into `dest[dest_off..]`.
    ///
    /// The inverse transform is scaled by \\(\frac 1 n\\).
    ///
    /// # Panics
    ///
    /// Panics if either buffer is too short for `2 * len` values past its offset.
    ///
    /// ```rust
    /// use bitfft::CFft1D;
    ///
    /// let input = [2.0, 0.0, 1.0, 1.0, 0.0, 3.0, 2.0, 4.0];
    /// let mut output = [0.0; 8];
    /// let mut restored = [0.0; 8];
    ///
    /// let fft = CFft1D::<f64>::with_len(4).unwrap();
    /// fft.apply_complex(&input, 0, false, &mut output, 0);
    /// fft.apply_complex(&output, 0, true, &mut restored, 0);
    /// assert!(input.iter().zip(&restored).all(|(a, b)| (a - b).abs() < 1e-12));
    /// ```
    pub fn apply_complex(
        &self,
        source: &[T],
        source_off: usize,
        is_back: bool,
        dest: &mut [T],
        dest_off: usize,
    ) {
        for i in 0..self.len {
            let src = source_off + (i << 1);
            let dst = dest_off + (reverse_bits(i, self.bits) << 1);
            dest[dst] = source[src];
            dest[dst + 1] = source[src + 1];
        }
        self.finish(dest, dest_off, is_back);
    }

    /// Transforms `len` real samples read from `source[source_off..]`.
    ///
    /// The output is always complex: `2 * len` interleaved values written
    /// into `dest[dest_off..]`.
    ///
    /// ```rust
    /// use bitfft::CFft1D;
    ///
    /// let input = [2.0, 0.0, 1.0, 1.0];
    /// let mut output = [0.0; 8];
    ///
    /// let fft = CFft1D::<f64>::with_len(4).unwrap();
    /// fft.apply_real(&input, 0, false, &mut output, 0);
    /// assert!((output[0] - 4.0).abs() < 1e-12);
    /// ```
    pub fn apply_real(
        &self,
        source: &[T],
        source_off: usize,
        is_back: bool,
        dest: &mut [T],
        dest_off: usize,
    ) {
        for i in 0..self.len {
            let dst = dest_off + (reverse_bits(i, self.bits) << 1);
            dest[dst] = source[source_off + i];
            dest[dst + 1] = zero();
        }
        self.finish(dest, dest_off, is_back);
    }

    #[inline]
    fn finish(&self, dest: &mut [T], dest_off: usize, is_back: bool) {
        radix2::radix2_kernel(dest, dest_off, self.len, 1, is_back);
        if is_back {
            radix2::scale(dest, dest_off, self.len << 1, self.scaler_n);
        }
    }

    /// The 1 scaling factor forward transform
    ///
    /// ```rust
    /// use bitfft::CFft1D;
    /// use num_complex::Complex;
    ///
    /// let input = [Complex::new(2.0, 0.0), Complex::new(1.0, 1.0),
    ///              Complex::new(0.0, 3.0), Complex::new(2.0, 4.0)];
    ///
    /// let fft = CFft1D::<f64>::with_len(input.len()).unwrap();
    /// let output = fft.forward(&input);
    /// ```
    pub fn forward(&self, source: &[Complex<T>]) -> Vec<Complex<T>> {
        self.convert(source, false)
    }

    /// The \\(\frac 1 n\\) scaling factor backward transform
    ///
    /// ```rust
    /// use bitfft::CFft1D;
    /// use num_complex::Complex;
    ///
    /// let input = [Complex::new(2.0, 0.0), Complex::new(1.0, 1.0),
    ///              Complex::new(0.0, 3.0), Complex::new(2.0, 4.0)];
    ///
    /// let fft = CFft1D::<f64>::with_len(input.len()).unwrap();
    /// let output = fft.backward(&fft.forward(&input));
    /// ```
    pub fn backward(&self, source: &[Complex<T>]) -> Vec<Complex<T>> {
        self.convert(source, true)
    }

    fn convert(&self, source: &[Complex<T>], is_back: bool) -> Vec<Complex<T>> {
        if source.len() != self.len {
            panic!(
                "invalid length (source: {}, fft.len: {})",
                source.len(),
                self.len
            )
        }
        let flat = precompute_utils::interleave(source);
        let mut ret = vec![zero(); self.len << 1];
        self.apply_complex(&flat, 0, is_back, &mut ret, 0);
        precompute_utils::deinterleave(&ret)
    }
}

impl<T> Transform for CFft1D<T> {
    fn dim(&self) -> usize {
        self.len
    }

    fn bits(&self) -> u32 {
        self.bits
    }
}

impl<T: Float + FloatConst + NumAssign + Sync> SharedFourierTransform<T> for CFft1D<T> {
    fn apply_complex(
        &self,
        source: &[T],
        source_off: usize,
        is_back: bool,
        dest: &mut [T],
        dest_off: usize,
    ) {
        CFft1D::apply_complex(self, source, source_off, is_back, dest, dest_off)
    }

    fn apply_real(
        &self,
        source: &[T],
        source_off: usize,
        is_back: bool,
        dest: &mut [T],
        dest_off: usize,
    ) {
        CFft1D::apply_real(self, source, source_off, is_back, dest, dest_off)
    }
}

impl<T: Float + FloatConst + NumAssign> FourierTransform<T> for CFft1D<T> {
    fn apply_complex(
        &mut self,
        source: &[T],
        source_off: usize,
        is_back: bool,
        dest: &mut [T],
        dest_off: usize,
    ) {
        CFft1D::apply_complex(self, source, source_off, is_back, dest, dest_off)
    }

    fn apply_real(
        &mut self,
        source: &[T],
        source_off: usize,
        is_back: bool,
        dest: &mut [T],
        dest_off: usize,
    ) {
        CFft1D::apply_real(self, source, source_off, is_back, dest, dest_off)
    }
}
