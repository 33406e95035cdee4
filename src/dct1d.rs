//! Bitfft: radix-2 Fourier and cosine transforms.
//!
//! # Licensing
//! This Source Code is subject to the terms of the Mozilla Public License
//! version 2.0 (the "License"). You can obtain a copy of the License at
//! http://mozilla.org/MPL/2.0/ .

use crate::cfft1d;
use crate::precompute_utils::{self, fold_index, load, reverse_bits, store};
use crate::radix2;
use crate::{CosineTransform, Transform, TransformError};
use log::debug;
use num_complex::Complex;
use num_traits::float::{Float, FloatConst};
use num_traits::identities::zero;
use num_traits::NumAssign;

/// Perform a discrete cosine transform on a power-of-two vector
///
/// <script type="text/javascript" src="http://cdn.mathjax.org/mathjax/latest/MathJax.js?config=TeX-AMS_CHTML"></script>
/// The forward transform is the DCT-II
///
/// \\[ \Large Y_k = c_k \sum_{j=0}\^{n-1} X_j \cos \frac {\pi (2j + 1) k}{2n}, \quad c_0 = 1,\ c_k = 2 \\]
///
/// and the inverse is the matching DCT-III, so `backward(forward(x)) == x`.
///
/// Both directions run a single complex FFT of the same length: the input
/// is reordered (even samples ascending, odd samples descending), and a
/// precomputed weight vector turns the spectrum into cosine coefficients.
///
/// # Example
///
/// ```rust
/// use bitfft::Dct1D;
///
/// fn main() {
///     let input = [2.0, 0.0, 1.0, 1.0, 0.0, 3.0, 2.0, 4.0];
///
///     let mut dct = Dct1D::<f64>::with_len(input.len()).unwrap();
///     let output = dct.forward(&input);
///     println!("the transform of {:?} is {:?}", input, output);
/// }
/// ```
#[derive(Debug)]
pub struct Dct1D<T> {
    len: usize,
    bits: u32,
    weight: Vec<Complex<T>>,
    inv_weight: Vec<Complex<T>>,
    work: Vec<T>,
}

impl<T: Float + FloatConst + NumAssign> Dct1D<T> {
    /// Returns a instances to execute DCT on vectors of `len` samples
    ///
    /// ```rust
    /// use bitfft::Dct1D;
    /// let mut dct = Dct1D::<f64>::with_len(1024).unwrap();
    /// ```
    pub fn with_len(len: usize) -> Result<Self, TransformError> {
        let bits = precompute_utils::calc_bits(len, cfft1d::MAX_BITS, "Dct1D")?;
        debug!("Dct1D: len {}, bits {}", len, bits);
        let (weight, inv_weight) = precompute_utils::calc_dct_weights(len);
        Ok(Self {
            len,
            bits,
            weight,
            inv_weight,
            work: vec![zero(); len << 1],
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

    /// Transforms `len` real values from `source[source_off..]` into
    /// `len` real values at `dest[dest_off..]`.
    ///
    /// # Panics
    ///
    /// Panics if either buffer is too short for `len` values past its offset.
    ///
    /// ```rust
    /// use bitfft::Dct1D;
    ///
    /// let input = [2.0, 0.0, 1.0, 1.0];
    /// let mut coef = [0.0; 4];
    /// let mut restored = [0.0; 4];
    ///
    /// let mut dct = Dct1D::<f64>::with_len(4).unwrap();
    /// dct.apply(&input, 0, false, &mut coef, 0);
    /// dct.apply(&coef, 0, true, &mut restored, 0);
    /// assert!(input.iter().zip(&restored).all(|(a, b)| (a - b).abs() < 1e-12));
    /// ```
    pub fn apply(
        &mut self,
        source: &[T],
        source_off: usize,
        is_back: bool,
        dest: &mut [T],
        dest_off: usize,
    ) {
        if is_back {
            self.convert_back(source, source_off, dest, dest_off);
        } else {
            self.convert(source, source_off, dest, dest_off);
        }
    }

    fn convert(&mut self, source: &[T], source_off: usize, dest: &mut [T], dest_off: usize) {
        let len = self.len;

        // fold, bit reversal
        for i in 0..len {
            let src = fold_index(reverse_bits(i, self.bits), len);
            self.work[i << 1] = source[source_off + src];
            self.work[(i << 1) + 1] = zero();
        }

        radix2::radix2_kernel(&mut self.work, 0, len, 1, false);

        // weights, real part only
        for (k, w) in self.weight.iter().enumerate() {
            dest[dest_off + k] = (load(&self.work, k << 1) * w).re;
        }
    }

    fn convert_back(&mut self, source: &[T], source_off: usize, dest: &mut [T], dest_off: usize) {
        let len = self.len;

        // weights, bit reversal
        for (k, w) in self.inv_weight.iter().enumerate() {
            let pos = reverse_bits(k, self.bits) << 1;
            store(&mut self.work, pos, w.scale(source[source_off + k]));
        }

        radix2::radix2_kernel(&mut self.work, 0, len, 1, true);

        // real part only, unfold
        for i in 0..len {
            dest[dest_off + fold_index(i, len)] = self.work[i << 1];
        }
    }

    /// The forward transform (DCT-II)
    ///
    /// ```rust
    /// use bitfft::Dct1D;
    ///
    /// let input = [2.0, 0.0, 1.0, 1.0, 0.0, 3.0, 2.0, 4.0];
    ///
    /// let mut dct = Dct1D::<f64>::with_len(input.len()).unwrap();
    /// let output = dct.forward(&input);
    /// ```
    pub fn forward(&mut self, source: &[T]) -> Vec<T> {
        self.convert_vec(source, false)
    }

    /// The inverse transform (DCT-III)
    ///
    /// ```rust
    /// use bitfft::Dct1D;
    ///
    /// let input = [2.0, 0.0, 1.0, 1.0, 0.0, 3.0, 2.0, 4.0];
    ///
    /// let mut dct = Dct1D::<f64>::with_len(input.len()).unwrap();
    /// let output = dct.forward(&input);
    /// let restored = dct.backward(&output);
    /// assert!(input.iter().zip(&restored).all(|(a, b)| (a - b).abs() < 1e-12));
    /// ```
    pub fn backward(&mut self, source: &[T]) -> Vec<T> {
        self.convert_vec(source, true)
    }

    fn convert_vec(&mut self, source: &[T], is_back: bool) -> Vec<T> {
        if source.len() != self.len {
            panic!(
                "invalid length (source: {}, dct.len: {})",
                source.len(),
                self.len
            )
        }
        let mut ret = vec![zero(); self.len];
        self.apply(source, 0, is_back, &mut ret, 0);
        ret
    }
}

impl<T> Transform for Dct1D<T> {
    fn dim(&self) -> usize {
        self.len
    }

    fn bits(&self) -> u32 {
        self.bits
    }
}

impl<T: Float + FloatConst + NumAssign> CosineTransform<T> for Dct1D<T> {
    fn apply(
        &mut self,
        source: &[T],
        source_off: usize,
        is_back: bool,
        dest: &mut [T],
        dest_off: usize,
    ) {
        Dct1D::apply(self, source, source_off, is_back, dest, dest_off)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assert_appro_eq;
    use crate::FloatEps;
    use appro_eq::AbsError;
    use num_traits::cast;
    use rand::distributions::{Distribution, Standard};
    use rand::{Rng, SeedableRng};
    use rand_xorshift::XorShiftRng;
    use std::fmt::Debug;

    fn convert<T: Float + FloatConst>(source: &[T]) -> Vec<T> {
        (0..source.len())
            .map(|i| {
                let sum = (0..source.len()).fold(zero(), |x: T, j| {
                    x + source[j]
                        * (T::PI() / cast(source.len() * 2).unwrap()
                            * cast::<_, T>((j * 2 + 1) * i).unwrap())
                        .cos()
                });
                if i == 0 {
                    sum
                } else {
                    sum * cast(2).unwrap()
                }
            })
            .collect::<Vec<_>>()
    }

    fn test_with_source<T: Float + FloatConst + NumAssign + Debug + AbsError + FloatEps>(
        dct: &mut Dct1D<T>,
        source: &[T],
    ) {
        let expected = convert(source);
        let actual = dct.forward(source);
        assert_appro_eq(&expected, &actual);
        let actual_source = dct.backward(&actual);
        assert_appro_eq(source, &actual_source);

        // the other way round
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
        let mut dct = Dct1D::<T>::with_len(len).unwrap();

        for _ in 0..10 {
            let arr = (0..len).map(|_| rng.gen::<T>()).collect::<Vec<T>>();
            test_with_source(&mut dct, &arr);
        }
    }

    #[test]
    fn f64_with_len() {
        for bits in 1..9 {
            test_with_len::<f64>(1 << bits);
        }
    }

    #[test]
    fn f32_with_len() {
        for bits in 1..7 {
            test_with_len::<f32>(1 << bits);
        }
    }

    #[test]
    fn offsets() {
        let mut dct = Dct1D::<f64>::with_len(8).unwrap();
        let source = (0..11).map(|i| i as f64 - 4.0).collect::<Vec<_>>();
        let expected = dct.forward(&source[3..]);

        let mut actual = vec![9.0; 10];
        dct.apply(&source, 3, false, &mut actual, 1);
        assert_eq!(actual[0], 9.0);
        assert_eq!(actual[9], 9.0);
        assert_eq!(&actual[1..9], &expected[..]);
    }

    #[test]
    fn invalid_dimensions() {
        for &len in &[0, 1, 3, 6, 1 << 31] {
            assert!(Dct1D::<f64>::with_len(len).is_err());
        }
    }

    #[test]
    #[should_panic(expected = "invalid length")]
    fn invalid_length_convert() {
        let mut dct = Dct1D::<f64>::with_len(8).unwrap();
        dct.forward(&[0.0; 10]);
    }
}
