use std::{fmt, str::FromStr};

use crate::{error::PackError, types::Padding};

/// How to round an estimated container side length.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SizeMode {
    /// The next power of two.
    PowerOfTwo,

    /// The next multiple of two.
    MultipleOfTwo,

    /// The next multiple of four.
    MultipleOfFour,

    /// The smallest whole side length whose square holds the total area.
    Minimum,
}

impl SizeMode {
    fn round(self, side: u64) -> u64 {
        match self {
            SizeMode::PowerOfTwo => side.next_power_of_two(),
            SizeMode::MultipleOfTwo => side.div_ceil(2) * 2,
            SizeMode::MultipleOfFour => side.div_ceil(4) * 4,
            SizeMode::Minimum => side,
        }
    }

    fn name(self) -> &'static str {
        match self {
            SizeMode::PowerOfTwo => "power-of-two",
            SizeMode::MultipleOfTwo => "multiple-of-two",
            SizeMode::MultipleOfFour => "multiple-of-four",
            SizeMode::Minimum => "minimum",
        }
    }
}

impl FromStr for SizeMode {
    type Err = PackError;

    fn from_str(value: &str) -> Result<SizeMode, Self::Err> {
        match value {
            "power-of-two" => Ok(SizeMode::PowerOfTwo),
            "multiple-of-two" => Ok(SizeMode::MultipleOfTwo),
            "multiple-of-four" => Ok(SizeMode::MultipleOfFour),
            "minimum" => Ok(SizeMode::Minimum),

            _ => Err(PackError::invalid_argument(format!(
                "unknown size mode '{}'. Valid options are 'power-of-two', \
                 'multiple-of-two', 'multiple-of-four' and 'minimum'.",
                value
            ))),
        }
    }
}

impl fmt::Display for SizeMode {
    fn fmt(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        formatter.write_str(self.name())
    }
}

/// Estimates a square container size from the total padded area of `sizes`.
///
/// This is only a starting point. Area says nothing about shape, so packing
/// into the estimated size can still fail.
pub fn estimate_size(sizes: &[(u32, u32)], padding: Padding, mode: SizeMode) -> (u32, u32) {
    let area = padded_area(sizes, padding);
    if area == 0 {
        return (0, 0);
    }

    let side = mode.round(ceil_sqrt(area));
    let side = u32::try_from(side).unwrap_or(u32::MAX);

    (side, side)
}

/// Sum of the padded areas of every rectangle, including the padding around
/// rectangles that have no area themselves.
pub(crate) fn padded_area(sizes: &[(u32, u32)], padding: Padding) -> u64 {
    sizes
        .iter()
        .map(|&size| {
            let padded = padding.apply(size);
            u64::from(padded.0) * u64::from(padded.1)
        })
        .fold(0, u64::saturating_add)
}

/// Rectangles without area are never placed.
#[inline]
pub(crate) fn takes_space(size: (u32, u32)) -> bool {
    size.0 != 0 && size.1 != 0
}

fn ceil_sqrt(value: u64) -> u64 {
    let mut root = (value as f64).sqrt() as u64;

    // Float rounding can leave us off by one in either direction.
    while u128::from(root) * u128::from(root) < u128::from(value) {
        root += 1;
    }
    while root > 0 && u128::from(root - 1) * u128::from(root - 1) >= u128::from(value) {
        root -= 1;
    }

    root
}
