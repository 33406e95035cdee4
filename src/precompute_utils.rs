//! Bitfft: radix-2 Fourier and cosine transforms.
//!
//! # Licensing
//! This Source Code is subject to the terms of the Mozilla Public License
//! version 2.0 (the "License"). You can obtain a copy of the License at
//! http://mozilla.org/MPL/2.0/ .

use crate::TransformError;
use log::warn;
use num_complex::Complex;
use num_traits::cast;
use num_traits::float::{Float, FloatConst};
use num_traits::identities::{one, zero};

/// Returns `val` with its 32 bits in reversed order (bit 0 becomes bit 31).
///
/// Each byte is reversed independently with a multiply/mask/modulo trick and
/// the four reversed bytes are then reassembled in swapped positions.
///
/// ```rust
/// use bitfft::reverse;
///
/// assert_eq!(reverse(1), 0x8000_0000);
/// assert_eq!(reverse(0x0000_00F0), 0x0F00_0000);
/// ```
#[inline]
pub fn reverse(val: u32) -> u32 {
    reverse_byte(val >> 24)
        | reverse_byte((val >> 16) & 0xFF) << 8
        | reverse_byte((val >> 8) & 0xFF) << 16
        | reverse_byte(val & 0xFF) << 24
}

#[inline(always)]
fn reverse_byte(b: u32) -> u32 {
    (((u64::from(b) * 0x02_0202_0202) & 0x0108_8442_2010) % 1023) as u32
}

/// Reverses the low `bits` bits of `index`.
///
/// `bits` must not exceed 32. Higher bits of `index` are discarded, and a
/// width of zero yields zero.
///
/// ```rust
/// use bitfft::reverse_bits;
///
/// // 0b001 -> 0b100
/// assert_eq!(reverse_bits(1, 3), 4);
/// assert_eq!(reverse_bits(6, 3), 3);
/// assert_eq!(reverse_bits(6, 0), 0);
/// ```
#[inline]
pub fn reverse_bits(index: usize, bits: u32) -> usize {
    debug_assert!(bits <= 32);
    reverse(index as u32).checked_shr(32 - bits).unwrap_or(0) as usize
}

/// Folds the even samples ascending and the odd samples descending:
/// `[0 1 2 3 4 5 6 7] -> [0 2 4 6 7 5 3 1]` for `len == 8`.
#[inline]
pub fn fold_index(q: usize, len: usize) -> usize {
    if q < len >> 1 {
        q << 1
    } else {
        (len << 1) - (q << 1) - 1
    }
}

/// Validates `len` and returns its bit width.
pub fn calc_bits(len: usize, max_bits: u32, name: &str) -> Result<u32, TransformError> {
    let bits = len.trailing_zeros();
    if !len.is_power_of_two() || bits == 0 || bits >= max_bits {
        warn!("{}: rejected dimension {} (max bits {})", name, len, max_bits);
        return Err(TransformError::InvalidDimension { dim: len, max_bits });
    }
    Ok(bits)
}

/// Weight vectors linking a length-`len` FFT to the DCT-II / DCT-III pair.
///
/// The forward vector is `1` at zero and `2 e^{-i k pi / 2len}` elsewhere.
/// The inverse vector is `1/len` at zero and `e^{i k pi / 2len} / len`
/// elsewhere, so it absorbs the inverse scaling.
pub fn calc_dct_weights<T: Float + FloatConst>(len: usize) -> (Vec<Complex<T>>, Vec<Complex<T>>) {
    let s = T::one() / cast::<_, T>(len).unwrap();
    let two = T::one() + T::one();
    let step = T::FRAC_PI_2() * s;

    let mut weight = Vec::with_capacity(len);
    let mut inv_weight = Vec::with_capacity(len);
    weight.push(one());
    inv_weight.push(Complex::new(s, zero()));

    for k in 1..len {
        let (sin, cos) = (cast::<_, T>(k).unwrap() * step).sin_cos();
        weight.push(Complex::new(two * cos, -two * sin));
        inv_weight.push(Complex::new(s * cos, s * sin));
    }
    (weight, inv_weight)
}

/// Reads the complex sample stored at `pos` and `pos + 1`.
#[inline(always)]
pub fn load<T: Copy>(buf: &[T], pos: usize) -> Complex<T> {
    Complex::new(buf[pos], buf[pos + 1])
}

/// Writes `value` at `pos` and `pos + 1`.
#[inline(always)]
pub fn store<T: Copy>(buf: &mut [T], pos: usize, value: Complex<T>) {
    buf[pos] = value.re;
    buf[pos + 1] = value.im;
}

pub fn interleave<T: Copy>(source: &[Complex<T>]) -> Vec<T> {
    let mut ret = Vec::with_capacity(source.len() << 1);
    for c in source {
        ret.push(c.re);
        ret.push(c.im);
    }
    ret
}

pub fn deinterleave<T: Copy>(source: &[T]) -> Vec<Complex<T>> {
    source
        .chunks_exact(2)
        .map(|c| Complex::new(c[0], c[1]))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assert_appro_eq;
    use rand::{Rng, SeedableRng};
    use rand_xorshift::XorShiftRng;

    #[test]
    fn reverse_matches_std() {
        let mut rng = XorShiftRng::from_seed([
            0xDA, 0xE1, 0x4B, 0x0B, 0xFF, 0xC2, 0xFE, 0x64, 0x23, 0xFE, 0x3F, 0x51, 0x6D, 0x3E,
            0xA2, 0xF3,
        ]);
        for v in [0, 1, 2, 0xFF, 0x8000_0000, 0xFFFF_FFFF, 0x1234_5678].iter() {
            assert_eq!(reverse(*v), v.reverse_bits());
        }
        for _ in 0..10000 {
            let v = rng.gen::<u32>();
            assert_eq!(reverse(v), v.reverse_bits());
        }
    }

    #[test]
    fn reverse_bits_is_involution() {
        for bits in 1..12 {
            for i in 0..(1 << bits) {
                let r = reverse_bits(i, bits);
                assert!(r < 1 << bits);
                assert_eq!(reverse_bits(r, bits), i);
            }
        }
        assert_eq!(
            (0..8).map(|i| reverse_bits(i, 3)).collect::<Vec<_>>(),
            vec![0, 4, 2, 6, 1, 5, 3, 7]
        );
    }

    #[test]
    fn reverse_bits_edge_widths() {
        assert_eq!(reverse_bits(0, 0), 0);
        assert_eq!(reverse_bits(7, 0), 0);
        assert_eq!(reverse_bits(1, 1), 1);
        assert_eq!(reverse_bits(1, 32), 1 << 31);
        assert_eq!(reverse_bits(0xFFFF_FFFF, 32), 0xFFFF_FFFF);
    }

    #[test]
    fn fold() {
        assert_eq!(
            (0..8).map(|i| fold_index(i, 8)).collect::<Vec<_>>(),
            vec![0, 2, 4, 6, 7, 5, 3, 1]
        );
        assert_eq!(
            (0..2).map(|i| fold_index(i, 2)).collect::<Vec<_>>(),
            vec![0, 1]
        );
    }

    #[test]
    fn bits() {
        assert_eq!(calc_bits(2, 31, "test"), Ok(1));
        assert_eq!(calc_bits(1024, 31, "test"), Ok(10));
        assert_eq!(calc_bits(1 << 30, 31, "test"), Ok(30));
        for &len in &[0, 1, 3, 6, 1 << 31] {
            assert_eq!(
                calc_bits(len, 31, "test"),
                Err(TransformError::InvalidDimension {
                    dim: len,
                    max_bits: 31
                })
            );
        }
        assert!(calc_bits(1 << 15, 16, "test").is_ok());
        assert!(calc_bits(1 << 16, 16, "test").is_err());
    }

    #[test]
    fn dct_weights() {
        let (w, iw) = calc_dct_weights::<f64>(8);
        assert_eq!(w.len(), 8);
        assert_eq!(w[0], Complex::new(1.0, 0.0));
        assert_eq!(iw[0], Complex::new(0.125, 0.0));
        for k in 1..8 {
            let angle = k as f64 * std::f64::consts::PI / 16.0;
            assert_eq!(w[k].im.signum(), -1.0);
            let expected = Complex::from_polar(2.0, -angle);
            assert_appro_eq(&expected.re, &w[k].re);
            assert_appro_eq(&expected.im, &w[k].im);
            let expected = Complex::from_polar(0.125, angle);
            assert_appro_eq(&expected.re, &iw[k].re);
            assert_appro_eq(&expected.im, &iw[k].im);
        }
    }

    #[test]
    fn interleaving() {
        let source = vec![Complex::new(1.0, 2.0), Complex::new(3.0, 4.0)];
        let flat = interleave(&source);
        assert_eq!(flat, vec![1.0, 2.0, 3.0, 4.0]);
        assert_eq!(deinterleave(&flat), source);
    }
}
