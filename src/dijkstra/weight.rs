// (c) Copyright 2025 Mikołaj Kuranowski
// SPDX-License-Identifier: MIT

use std::ops::Add;

/// Scalar edge weight usable by [shortest_paths](crate::shortest_paths).
///
/// Weights must be non-negative and comparable (no NaNs).
/// [Weight::INFINITY] marks vertices which were not reached.
pub trait Weight: Copy + PartialOrd + Add<Output = Self> {
    const ZERO: Self;
    const INFINITY: Self;

    fn is_infinite(self) -> bool;
}

impl Weight for f32 {
    const ZERO: Self = 0.0;
    const INFINITY: Self = f32::INFINITY;

    #[inline]
    fn is_infinite(self) -> bool {
        f32::is_infinite(self)
    }
}

impl Weight for f64 {
    const ZERO: Self = 0.0;
    const INFINITY: Self = f64::INFINITY;

    #[inline]
    fn is_infinite(self) -> bool {
        f64::is_infinite(self)
    }
}
