//! In-place iterative radix-2 Cooley-Tukey FFT
//!
//! The transform runs over a caller-owned buffer: a bit-reversal permutation
//! followed by butterfly passes of doubling length. No allocation happens
//! inside the butterfly loop.

use crate::error::VisualiserError;
use crate::model::Complex;
use std::f64::consts::PI;

/// Forward FFT of `buffer`, overwriting it with the result in natural order
///
/// `buffer.len()` must be a power of two; anything else (including zero) is
/// rejected with [`VisualiserError::NotPowerOfTwo`] and the buffer is left untouched.
pub fn fft_in_place(buffer: &mut [Complex]) -> Result<(), VisualiserError> {
    let n = buffer.len();
    if !n.is_power_of_two() {
        return Err(VisualiserError::NotPowerOfTwo(n));
    }
    if n == 1 {
        return Ok(());
    }

    bit_reverse_permute(buffer);

    let mut len = 2;
    while len <= n {
        let half = len / 2;
        for k in 0..half {
            let w = Complex::from_angle(-2.0 * PI * k as f64 / len as f64);
            for start in (0..n).step_by(len) {
                let a = buffer[start + k];
                let t = w * buffer[start + k + half];
                buffer[start + k + half] = a - t;
                buffer[start + k] = a + t;
            }
        }
        len *= 2;
    }

    Ok(())
}

/// Swap every index with its `log2(n)`-bit reversal
fn bit_reverse_permute(buffer: &mut [Complex]) {
    let n = buffer.len();
    let shift = usize::BITS - n.trailing_zeros();
    for k in 0..n {
        let j = k.reverse_bits() >> shift;
        if j > k {
            buffer.swap(j, k);
        }
    }
}

/// Largest power of two strictly below `n`, or `n / 2` when `n` is itself a power of two
///
/// `65 -> 64`, `64 -> 32`, `2 -> 1`, `1 -> 0`, `0 -> 0`.
pub fn nearest_power_of_two(n: usize) -> usize {
    if n == 0 {
        return 0;
    }
    n.next_power_of_two() / 2
}
