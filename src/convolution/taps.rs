//! Per-sample kernel application: fixed-length unrolled paths for 3 to 15
//! taps, a 5-wide unrolled generic loop for longer odd kernels, and a
//! block strategy picked from the coefficient alignment hint. Both axes
//! are chosen once per filter call, outside the per-row loops.

use crate::alignment::Alignment;

cfg_if::cfg_if! {
    if #[cfg(any(
        all(any(target_arch = "x86", target_arch = "x86_64"), target_feature = "fma"),
        all(target_arch = "aarch64", target_feature = "neon")
    ))] {
        // Contracts into a single fused instruction on these targets.
        #[inline(always)]
        fn mla(acc: f32, a: f32, b: f32) -> f32 {
            a.mul_add(b, acc)
        }
    } else {
        #[inline(always)]
        fn mla(acc: f32, a: f32, b: f32) -> f32 {
            acc + a * b
        }
    }
}

type DotFn = fn(&[f32], &[f32]) -> f32;

macro_rules! unrolled_dot {
    ($name:ident, $($idx:literal)+) => {
        #[inline(always)]
        fn $name(s: &[f32], k: &[f32]) -> f32 {
            let mut acc = 0.0;
            $( acc = mla(acc, s[$idx], k[$idx]); )+
            acc
        }
    };
}

unrolled_dot!(dot3, 0 1 2);
unrolled_dot!(dot5, 0 1 2 3 4);
unrolled_dot!(dot7, 0 1 2 3 4 5 6);
unrolled_dot!(dot9, 0 1 2 3 4 5 6 7 8);
unrolled_dot!(dot11, 0 1 2 3 4 5 6 7 8 9 10);
unrolled_dot!(dot13, 0 1 2 3 4 5 6 7 8 9 10 11 12);
unrolled_dot!(dot15, 0 1 2 3 4 5 6 7 8 9 10 11 12 13 14);

/// Any other odd length: 5-wide unrolled inner loop plus remainder.
/// Single accumulator, strictly left to right, so the summation order
/// matches the fixed paths.
fn dot_generic(s: &[f32], k: &[f32]) -> f32 {
    let len = k.len();
    let mut acc = 0.0;
    let mut i = 0;
    while i + 5 <= len {
        acc = mla(acc, s[i], k[i]);
        acc = mla(acc, s[i + 1], k[i + 1]);
        acc = mla(acc, s[i + 2], k[i + 2]);
        acc = mla(acc, s[i + 3], k[i + 3]);
        acc = mla(acc, s[i + 4], k[i + 4]);
        i += 5;
    }
    while i < len {
        acc = mla(acc, s[i], k[i]);
        i += 1;
    }
    acc
}

/// Execution plan of one filter call: the tap path (by kernel length) and
/// the block strategy (by coefficient alignment).
#[derive(Clone, Copy)]
pub(crate) struct TapPlan {
    dot: DotFn,
    alignment: Alignment,
}

impl TapPlan {
    pub fn new(len: usize, alignment: Alignment) -> Self {
        let dot: DotFn = match len {
            3 => dot3,
            5 => dot5,
            7 => dot7,
            9 => dot9,
            11 => dot11,
            13 => dot13,
            15 => dot15,
            _ => dot_generic,
        };
        Self { dot, alignment }
    }

    /// Run the kernel over a zero-padded buffer, writing the `out_len`
    /// results in place at the buffer's front.
    ///
    /// Every window starts past the slot it overwrites, so the in-place
    /// update never reads a produced value, and the blocked strategy is
    /// arithmetically identical to the plain loop.
    pub fn apply(&self, padded: &mut [f32], out_len: usize, k: &[f32]) {
        debug_assert!(padded.len() >= out_len + k.len() - 1);
        let dot = self.dot;
        match self.alignment {
            Alignment::Aligned16 => {
                let mut i = 0;
                while i + 4 <= out_len {
                    let d0 = dot(&padded[i..], k);
                    let d1 = dot(&padded[i + 1..], k);
                    let d2 = dot(&padded[i + 2..], k);
                    let d3 = dot(&padded[i + 3..], k);
                    padded[i] = d0;
                    padded[i + 1] = d1;
                    padded[i + 2] = d2;
                    padded[i + 3] = d3;
                    i += 4;
                }
                while i < out_len {
                    padded[i] = dot(&padded[i..], k);
                    i += 1;
                }
            }
            Alignment::Unaligned => {
                for i in 0..out_len {
                    padded[i] = dot(&padded[i..], k);
                }
            }
        }
    }
}
