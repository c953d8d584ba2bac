// SPDX-FileCopyrightText: 2025 The vita49-rs Authors
//
// SPDX-License-Identifier: MIT OR Apache-2.0
/*!
Conversions between IEEE floats and the fixed-point integers VRT packs
into its wire words.

Every numeric VRT subfield is `value * 2^-radix` stored in a 16-, 32-,
or 64-bit integer. The six concrete entry points below cover every
combination this crate needs: (signed 16), (signed 32), (unsigned 32),
and (signed 64), each with its inverse.

There is no error path: a value too large or too small for the target
integer's range saturates at the integer's min/max, and conversion to
float is always exact up to the target float's mantissa width for the
radixes this format uses (radix <= 22, so a 32-bit integer fits
comfortably in an `f64`'s 52-bit mantissa).

Concrete call sites that only ever use one radix (gain, reference
level, temperature) additionally store their value through
[`fixed::FixedI16`], keeping the typed representation the rest of the
crate uses for those fields; the rounding and saturation policy here is
what computes the raw bits that go into `FixedI16::from_bits`.
*/

/// Round-half-to-even to the nearest integer, as an `i128` so every
/// width this module supports (up to 64 bits) fits without overflow.
fn round_half_to_even(x: f64) -> i128 {
    if !x.is_finite() {
        return if x.is_sign_positive() { i128::MAX } else { i128::MIN };
    }
    let floor = x.floor();
    let diff = x - floor;
    let floor_i = floor as i128;
    if diff < 0.5 {
        floor_i
    } else if diff > 0.5 {
        floor_i + 1
    } else if floor_i % 2 == 0 {
        floor_i
    } else {
        floor_i + 1
    }
}

fn saturate_i128(v: i128, min: i128, max: i128) -> i128 {
    v.clamp(min, max)
}

/// Converts a signed 16-bit fixed-point value at the given radix to a float.
pub(crate) fn to_float_i16(x: i16, radix: u32) -> f64 {
    x as f64 / (1u64 << radix) as f64
}

/// Converts a float to a signed 16-bit fixed-point value at the given
/// radix, rounding half to even and saturating at `i16::MIN`/`MAX`.
pub(crate) fn from_float_i16(v: f64, radix: u32) -> i16 {
    let scaled = v * (1u64 << radix) as f64;
    saturate_i128(round_half_to_even(scaled), i16::MIN as i128, i16::MAX as i128) as i16
}

/// Converts a signed 32-bit fixed-point value at the given radix to a float.
pub(crate) fn to_float_i32(x: i32, radix: u32) -> f64 {
    x as f64 / (1u64 << radix) as f64
}

/// Converts a float to a signed 32-bit fixed-point value at the given
/// radix, rounding half to even and saturating at `i32::MIN`/`MAX`.
pub(crate) fn from_float_i32(v: f64, radix: u32) -> i32 {
    let scaled = v * (1u64 << radix) as f64;
    saturate_i128(round_half_to_even(scaled), i32::MIN as i128, i32::MAX as i128) as i32
}

/// Converts an unsigned 32-bit fixed-point value at the given radix to a float.
pub(crate) fn to_float_u32(x: u32, radix: u32) -> f64 {
    x as f64 / (1u64 << radix) as f64
}

/// Converts a float to an unsigned 32-bit fixed-point value at the
/// given radix, rounding half to even and saturating at `0`/`u32::MAX`.
pub(crate) fn from_float_u32(v: f64, radix: u32) -> u32 {
    let scaled = v * (1u64 << radix) as f64;
    saturate_i128(round_half_to_even(scaled), 0, u32::MAX as i128) as u32
}

/// Converts a signed 64-bit fixed-point value at the given radix to a float.
pub(crate) fn to_float_i64(x: i64, radix: u32) -> f64 {
    x as f64 / (1u64 << radix) as f64
}

/// Converts a float to a signed 64-bit fixed-point value at the given
/// radix, rounding half to even and saturating at `i64::MIN`/`MAX`.
pub(crate) fn from_float_i64(v: f64, radix: u32) -> i64 {
    let scaled = v * (1u64 << radix) as f64;
    saturate_i128(round_half_to_even(scaled), i64::MIN as i128, i64::MAX as i128) as i64
}

/// Packs a signed 64-bit fixed-point value into a big-endian two-word
/// pair (high word first), as used by frequency/bandwidth/sample-rate
/// subfields.
pub(crate) fn split_i64(x: i64) -> (u32, u32) {
    let bits = x as u64;
    ((bits >> 32) as u32, bits as u32)
}

/// Reassembles a signed 64-bit fixed-point value from a big-endian
/// two-word pair (high word first).
pub(crate) fn join_i64(hi: u32, lo: u32) -> i64 {
    (((hi as u64) << 32) | lo as u64) as i64
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn radix_7_gain_round_trip() {
        for bits in [0i16, 1, -1, 100, -100, i16::MAX, i16::MIN, 3226] {
            let f = to_float_i16(bits, 7);
            assert_eq!(from_float_i16(f, 7), bits);
        }
    }

    #[test]
    fn radix_20_frequency_value() {
        // 4097.0 Hz at radix 20 is 4097 * 2^20 = 0x0000000100100000
        let raw = from_float_i64(4097.0, 20);
        assert_eq!(raw, 0x0000_0001_0010_0000);
        let (hi, lo) = split_i64(raw);
        assert_eq!(hi, 0x0000_0001);
        assert_eq!(lo, 0x0010_0000);
        assert_relative_eq!(to_float_i64(join_i64(hi, lo), 20), 4097.0);
    }

    #[test]
    fn negative_bandwidth_round_trips_through_fixed_point() {
        let raw = from_float_i64(-1.0, 20);
        assert_eq!(raw, -(1i64 << 20));
        assert_relative_eq!(to_float_i64(raw, 20), -1.0);
    }

    #[test]
    fn saturates_rather_than_panics() {
        assert_eq!(from_float_i16(1.0e30, 7), i16::MAX);
        assert_eq!(from_float_i16(-1.0e30, 7), i16::MIN);
        assert_eq!(from_float_u32(-1.0, 20), 0);
        assert_eq!(from_float_i32(f64::NAN, 20), i32::MAX);
    }

    #[test]
    fn rounds_half_to_even() {
        // 0.5 rounds to 0 (even), 1.5 rounds to 2 (even)
        assert_eq!(round_half_to_even(0.5), 0);
        assert_eq!(round_half_to_even(1.5), 2);
        assert_eq!(round_half_to_even(2.5), 2);
        assert_eq!(round_half_to_even(-0.5), 0);
        assert_eq!(round_half_to_even(-1.5), -2);
    }
}
