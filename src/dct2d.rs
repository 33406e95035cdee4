//! Bitfft: radix-2 Fourier and cosine transforms.
//!
//! # Licensing
//! This Source Code is subject to the terms of the Mozilla Public License
//! version 2.0 (the "License"). You can obtain a copy of the License at
//! http://mozilla.org/MPL/2.0/ .

use crate::cfft2d;
use crate::precompute_utils::{self, fold_index, load, reverse_bits, store};
use crate::radix2;
use crate::{CosineTransform, Transform, TransformError};
use log::debug;
use num_complex::Complex;
use num_traits::float::{Float, FloatConst};
use num_traits::identities::zero;
use num_traits::NumAssign;

/// Perform a two-dimensional discrete cosine transform on a square
/// power-of-two matrix of real values
///
/// The matrix is stored with the first index running fastest, as for
/// [`CFft2D`](crate::CFft2D). The same reduction as [`Dct1D`](crate::Dct1D)
/// runs along the rows and then along the columns; each pass fuses the
/// reordering, the weights and the transpose into one sweep.
///
/// Two `2 * len * len` scratch buffers are owned by the instance.
///
/// # Example
///
/// ```rust
/// use bitfft::Dct2D;
///
/// fn main() {
///     let input = [
///         2.0, 0.0, 1.0, 1.0,
///         0.0, 3.0, 2.0, 4.0,
///         5.0, 0.0, 3.0, 1.0,
///         2.0, 3.0, 2.0, 8.0,
///     ];
///
///     let mut dct = Dct2D::<f64>::with_len(4).unwrap();
///     let output = dct.forward(&input);
///     println!("the transform of {:?} is {:?}", input, output);
/// }
/// ```
#[derive(Debug)]
pub struct Dct2D<T> {
    len: usize,
    bits: u32,
    weight: Vec<Complex<T>>,
    inv_weight: Vec<Complex<T>>,
    work_a: Vec<T>,
    work_b: Vec<T>,
}

impl<T: Float + FloatConst + NumAssign> Dct2D<T> {
    /// Returns a instances to execute DCT on `len x len` matrices
    ///
    /// ```rust
    /// use bitfft::Dct2D;
    /// let mut dct = Dct2D::<f64>::with_len(64).unwrap();
    /// ```
    pub fn with_len(len: usize) -> Result<Self, TransformError> {
        let bits = precompute_utils::calc_bits(len, cfft2d::MAX_BITS, "Dct2D")?;
        debug!("Dct2D: len {}, bits {}", len, bits);
        let (weight, inv_weight) = precompute_utils::calc_dct_weights(len);
        Ok(Self {
            len,
            bits,
            weight,
            inv_weight,
            work_a: vec![zero(); (len * len) << 1],
            work_b: vec![zero(); (len * len) << 1],
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

    /// Transforms `len * len` real values from `source[source_off..]` into
    /// `len * len` real values at `dest[dest_off..]`.
    ///
    /// # Panics
    ///
    /// Panics if either buffer is too short for `len * len` values past its offset.
    pub fn apply(
        &mut self,
        source: &[T],
        source_off: usize,
        is_back: bool,
        dest: &mut [T],
        dest_off: usize,
    ) {
        let len = self.len;
        let bits = self.bits;
        if is_back {
            weigh_rows(source, source_off, len, bits, &self.inv_weight, &mut self.work_a);
            radix2::radix2_kernel(&mut self.work_a, 0, len, len, true);
            unfold_weigh_transpose(&self.work_a, len, bits, &self.inv_weight, &mut self.work_b);
            radix2::radix2_kernel(&mut self.work_b, 0, len, len, true);
            unfold_transpose(&self.work_b, len, dest, dest_off);
        } else {
            fold_rows(source, source_off, len, bits, &mut self.work_a);
            radix2::radix2_kernel(&mut self.work_a, 0, len, len, false);
            weigh_fold_transpose(&self.work_a, len, bits, &self.weight, &mut self.work_b);
            radix2::radix2_kernel(&mut self.work_b, 0, len, len, false);
            weigh_transpose(&self.work_b, len, &self.weight, dest, dest_off);
        }
    }

    /// The forward transform
    ///
    /// ```rust
    /// use bitfft::Dct2D;
    ///
    /// let input = [2.0, 0.0, 1.0, 1.0];
    ///
    /// let mut dct = Dct2D::<f64>::with_len(2).unwrap();
    /// let output = dct.forward(&input);
    /// ```
    pub fn forward(&mut self, source: &[T]) -> Vec<T> {
        self.convert_vec(source, false)
    }

    /// The inverse transform
    ///
    /// ```rust
    /// use bitfft::Dct2D;
    ///
    /// let input = [2.0, 0.0, 1.0, 1.0];
    ///
    /// let mut dct = Dct2D::<f64>::with_len(2).unwrap();
    /// let output = dct.forward(&input);
    /// let restored = dct.backward(&output);
    /// assert!(input.iter().zip(&restored).all(|(a, b)| (a - b).abs() < 1e-12));
    /// ```
    pub fn backward(&mut self, source: &[T]) -> Vec<T> {
        self.convert_vec(source, true)
    }

    fn convert_vec(&mut self, source: &[T], is_back: bool) -> Vec<T> {
        if source.len() != self.len * self.len {
            panic!(
                "invalid length (source: {}, dct.len: {} x {})",
                source.len(),
                self.len,
                self.len
            )
        }
        let mut ret = vec![zero(); source.len()];
        self.apply(source, 0, is_back, &mut ret, 0);
        ret
    }
}

// Forward passes.

/// Real input -> complex rows, each row folded and bit-reversed.
fn fold_rows<T: Float>(source: &[T], source_off: usize, len: usize, bits: u32, dest: &mut [T]) {
    let stride = len << 1;
    for i in 0..len {
        let src = source_off + fold_index(reverse_bits(i, bits), len);
        for n in 0..len {
            dest[(i << 1) + n * stride] = source[src + n * len];
            dest[(i << 1) + n * stride + 1] = zero();
        }
    }
}

/// Weighs the row spectra, keeps the real parts and writes them transposed,
/// folded and bit-reversed for the column pass.
fn weigh_fold_transpose<T: Float>(
    source: &[T],
    len: usize,
    bits: u32,
    weight: &[Complex<T>],
    dest: &mut [T],
) {
    let stride = len << 1;
    for i in 0..len {
        let src = fold_index(reverse_bits(i, bits), len) * stride;
        for (k, w) in weight.iter().enumerate() {
            dest[(i << 1) + k * stride] = (load(source, src + (k << 1)) * w).re;
            dest[(i << 1) + k * stride + 1] = zero();
        }
    }
}

/// Weighs the column spectra and writes the real parts transposed back.
fn weigh_transpose<T: Float>(
    source: &[T],
    len: usize,
    weight: &[Complex<T>],
    dest: &mut [T],
    dest_off: usize,
) {
    let stride = len << 1;
    for (k, w) in weight.iter().enumerate() {
        let dst = dest_off + k * len;
        for m in 0..len {
            dest[dst + m] = (load(source, (k << 1) + m * stride) * w).re;
        }
    }
}

// Inverse passes.

/// Weighs every row of real input and writes it bit-reversed as complex.
fn weigh_rows<T: Float>(
    source: &[T],
    source_off: usize,
    len: usize,
    bits: u32,
    weight: &[Complex<T>],
    dest: &mut [T],
) {
    let stride = len << 1;
    for (k, w) in weight.iter().enumerate() {
        let dst = reverse_bits(k, bits) << 1;
        for n in 0..len {
            let v = source[source_off + k + n * len];
            store(dest, dst + n * stride, w.scale(v));
        }
    }
}

/// Keeps the real parts of the rows, unfolds them, transposes, and weighs
/// and bit-reverses for the column pass.
fn unfold_weigh_transpose<T: Float>(
    source: &[T],
    len: usize,
    bits: u32,
    weight: &[Complex<T>],
    dest: &mut [T],
) {
    let stride = len << 1;
    for i in 0..len {
        let n = reverse_bits(i, bits);
        let src = n * stride;
        let w = weight[n];
        for j in 0..len {
            let v = source[src + (j << 1)];
            store(dest, (i << 1) + fold_index(j, len) * stride, w.scale(v));
        }
    }
}

/// Keeps the real parts of the columns, unfolds them and transposes back.
fn unfold_transpose<T: Float>(source: &[T], len: usize, dest: &mut [T], dest_off: usize) {
    let stride = len << 1;
    for i in 0..len {
        let dst = dest_off + fold_index(i, len) * len;
        for m in 0..len {
            dest[dst + m] = source[(i << 1) + m * stride];
        }
    }
}

impl<T> Transform for Dct2D<T> {
    fn dim(&self) -> usize {
        self.len
    }

    fn bits(&self) -> u32 {
        self.bits
    }
}

impl<T: Float + FloatConst + NumAssign> CosineTransform<T> for Dct2D<T> {
    fn apply(
        &mut self,
        source: &[T],
        source_off: usize,
        is_back: bool,
        dest: &mut [T],
        dest_off: usize,
    ) {
        Dct2D::apply(self, source, source_off, is_back, dest, dest_off)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assert_appro_eq;
    use crate::Dct1D;
    use crate::FloatEps;
    use appro_eq::AbsError;
    use num_traits::cast;
    use rand::distributions::{Distribution, Standard};
    use rand::{Rng, SeedableRng};
    use rand_xorshift::XorShiftRng;
    use std::fmt::Debug;

    fn convert<T: Float + FloatConst>(source: &[T], len: usize) -> Vec<T> {
        let coef = |k: usize, j: usize| -> T {
            let c = (T::PI() / cast(len * 2).unwrap() * cast::<_, T>((j * 2 + 1) * k).unwrap())
                .cos();
            if k == 0 {
                c
            } else {
                c * cast(2).unwrap()
            }
        };
        let mut ret = Vec::with_capacity(len * len);
        for k1 in 0..len {
            for k2 in 0..len {
                let mut sum = zero();
                for n in 0..len {
                    for m in 0..len {
                        sum = sum + source[m + n * len] * coef(k1, n) * coef(k2, m);
                    }
                }
                ret.push(sum);
            }
        }
        ret
    }

    fn convert_by_rows<T: Float + FloatConst + NumAssign>(source: &[T], len: usize) -> Vec<T> {
        let mut dct = Dct1D::<T>::with_len(len).unwrap();
        let rows = source
            .chunks(len)
            .flat_map(|row| dct.forward(row))
            .collect::<Vec<_>>();
        let mut ret = rows.clone();
        for m in 0..len {
            let col = (0..len).map(|n| rows[m + n * len]).collect::<Vec<_>>();
            for (n, v) in dct.forward(&col).into_iter().enumerate() {
                ret[m + n * len] = v;
            }
        }
        ret
    }

    fn test_with_source<T: Float + FloatConst + NumAssign + Debug + AbsError + FloatEps>(
        dct: &mut Dct2D<T>,
        source: &[T],
    ) {
        let len = dct.dim();
        let expected = convert(source, len);
        let actual = dct.forward(source);
        assert_appro_eq(&expected, &actual);
        assert_appro_eq(&convert_by_rows(source, len), &actual);
        let actual_source = dct.backward(&actual);
        assert_appro_eq(source, &actual_source);

        let actual = dct.backward(source);
        let actual_source = dct.forward(&actual);
        assert_appro_eq(source, &actual_source);
    }

    fn test_with_len<T: Float + FloatConst + NumAssign + Debug + AbsError + FloatEps>(len: usize)
    where
        Standard: Distribution<T>,
    {
        let mut rng = XorShiftRng::from_seed([
            0xDA, 0xE1, 0x4B, 0x0B, 0xFF, 0xC2, 0xFE, 0x64, 0x23, 0xFE, 0x3F, 0x51, 0x6D, 0x3E,
            0xA2, 0xF3,
        ]);
        let mut dct = Dct2D::<T>::with_len(len).unwrap();

        for _ in 0..5 {
            let arr = (0..len * len).map(|_| rng.gen::<T>()).collect::<Vec<T>>();
            test_with_source(&mut dct, &arr);
        }
    }

    #[test]
    fn f64_with_len() {
        for bits in 1..5 {
            test_with_len::<f64>(1 << bits);
        }
    }

    #[test]
    fn f32_with_len() {
        for bits in 1..4 {
            test_with_len::<f32>(1 << bits);
        }
    }

    #[test]
    fn offsets() {
        let mut dct = Dct2D::<f64>::with_len(4).unwrap();
        let source = (0..19).map(|i| (i as f64 * 1.1).cos()).collect::<Vec<_>>();
        let expected = dct.forward(&source[3..]);

        let mut actual = vec![9.0; 21];
        dct.apply(&source, 3, false, &mut actual, 5);
        assert!(actual[..5].iter().all(|&v| v == 9.0));
        assert_eq!(&actual[5..], &expected[..]);
    }

    #[test]
    fn invalid_dimensions() {
        for &len in &[0, 1, 3, 6, 1 << 16] {
            assert!(Dct2D::<f64>::with_len(len).is_err());
        }
    }
}
