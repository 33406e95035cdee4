//! Bitfft: radix-2 Fourier and cosine transforms.
//!
//! # Licensing
//! This Source Code is subject to the terms of the Mozilla Public License
//! version 2.0 (the "License"). You can obtain a copy of the License at
//! http://mozilla.org/MPL/2.0/ .

use crate::precompute_utils::{load, store};
use num_complex::Complex;
use num_traits::float::{Float, FloatConst};
use num_traits::NumAssign;

/// Iterative Cooley-Tukey butterflies over `rows` interleaved complex
/// vectors of `len` samples each, stored back to back from `off`.
///
/// The input of every vector must already be in bit-reversed order. No
/// scaling is applied; `is_back` only conjugates the rotations.
///
/// Each rotation is evaluated directly with one sine and one cosine and is
/// then shared by every block and row of its stage.
pub fn radix2_kernel<T: Float + FloatConst + NumAssign>(
    source: &mut [T],
    off: usize,
    len: usize,
    rows: usize,
    is_back: bool,
) {
    let stride = len << 1;

    let mut half = 1;
    let mut block = 2;
    while block <= len {
        for n in 0..half {
            let rot = twiddle::<T>(n, block, is_back);

            let mut i = n;
            while i < len {
                let pos_a = off + (i << 1);
                let pos_b = pos_a + (half << 1);
                for r in 0..rows {
                    let a = pos_a + r * stride;
                    let b = pos_b + r * stride;
                    let wfb = load(source, b) * rot;
                    let wfa = load(source, a);
                    store(source, b, wfa - wfb);
                    store(source, a, wfa + wfb);
                }
                i += block;
            }
        }

        half = block;
        block <<= 1;
    }
}

/// `e^{-2 pi i n / block}`, conjugated when `is_back` is set.
#[inline]
pub fn twiddle<T: Float + FloatConst>(n: usize, block: usize, is_back: bool) -> Complex<T> {
    let angle = T::PI() * cast_len::<T>(n << 1) / cast_len(block);
    let (sin, cos) = angle.sin_cos();
    Complex::new(cos, if is_back { sin } else { -sin })
}

#[inline]
fn cast_len<T: Float>(len: usize) -> T {
    num_traits::cast(len).unwrap()
}

/// Multiplies `len` consecutive values from `off` by `scaler`.
pub fn scale<T: Float + NumAssign>(source: &mut [T], off: usize, len: usize, scaler: T) {
    for v in source[off..off + len].iter_mut() {
        *v *= scaler;
    }
}
