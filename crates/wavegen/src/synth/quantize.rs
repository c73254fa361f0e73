//! Amplitude quantization to arbitrary bit depths.
//!
//! Codes are computed in `i128`. Depths up to [`PRECISION_BITS`] are exact up
//! to the float product; wider depths keep their top [`PRECISION_BITS`] bits
//! and store zeros below them. Storage bytes are the low bytes of the
//! two's-complement value, which gives the container's fixed-width wraparound
//! for out-of-range amplitudes.

use crate::wav::ceil_to_byte;

/// Significant bits carried by a code. Deeper samples are zero-filled below.
pub const PRECISION_BITS: u16 = 120;

/// Maps amplitudes in [-1, 1] to integer sample codes and back.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Quantizer {
    bits_per_sample: u16,
    shift: u32,
    bytes_per_sample: usize,
    /// Zero bytes stored below the code (wide depths only).
    padding_bytes: usize,
    /// Bytes holding the code itself.
    code_bytes: usize,
    max_code: i128,
    max_volume: f64,
    midpoint: i128,
    unsigned: bool,
}

impl Quantizer {
    /// Creates a quantizer for `bits_per_sample`, or `None` for a zero depth.
    pub fn new(bits_per_sample: u16) -> Option<Self> {
        if bits_per_sample == 0 {
            return None;
        }
        let ceil_bits = ceil_to_byte(bits_per_sample);
        let bytes_per_sample = (ceil_bits / 8) as usize;
        let wide = bits_per_sample > PRECISION_BITS;

        let code_bits = bits_per_sample.min(PRECISION_BITS);
        let max_code = (1i128 << (code_bits - 1)) - 1;
        let (shift, padding_bytes, code_bytes) = if wide {
            let padding = (ceil_bits - u32::from(PRECISION_BITS)) as usize / 8;
            (0, padding, bytes_per_sample - padding)
        } else {
            (ceil_bits - u32::from(bits_per_sample), 0, bytes_per_sample)
        };

        Some(Self {
            bits_per_sample,
            shift,
            bytes_per_sample,
            padding_bytes,
            code_bytes,
            max_code,
            max_volume: max_code as f64,
            midpoint: max_code + 1,
            unsigned: bits_per_sample <= 8,
        })
    }

    /// Nominal bit depth.
    pub fn bits_per_sample(&self) -> u16 {
        self.bits_per_sample
    }

    /// Left shift of the code within its storage bytes.
    pub fn shift(&self) -> u32 {
        self.shift
    }

    /// Storage bytes per sample.
    pub fn bytes_per_sample(&self) -> usize {
        self.bytes_per_sample
    }

    /// Largest positive code before shifting.
    pub fn max_code(&self) -> i128 {
        self.max_code
    }

    /// [`Self::max_code`] as a float, the scale applied to amplitudes.
    pub fn max_volume(&self) -> f64 {
        self.max_volume
    }

    /// Offset added to depths of 8 bits or fewer, which are stored unsigned.
    pub fn midpoint(&self) -> i128 {
        self.midpoint
    }

    /// Whether samples are stored unsigned (depths of 8 bits or fewer).
    pub fn is_unsigned(&self) -> bool {
        self.unsigned
    }

    /// Converts an amplitude to its stored code.
    ///
    /// `floor(amplitude * max_volume)`, shifted into position, plus the
    /// midpoint for unsigned depths. Amplitudes in [-1, 1] never exceed
    /// `±max_code`, even where `max_volume` rounds up past it. Out-of-range
    /// amplitudes are not clamped. NaN maps to zero before the midpoint is
    /// applied, and infinities take the saturating float-to-integer cast
    /// before wrapping like any other out-of-range value.
    #[inline]
    pub fn quantize(&self, amplitude: f64) -> i128 {
        let mut code = (amplitude * self.max_volume).floor() as i128;
        if (-1.0..=1.0).contains(&amplitude) {
            code = code.clamp(-self.max_code, self.max_code);
        }
        let code = code.wrapping_shl(self.shift);
        if self.unsigned {
            code.wrapping_add(self.midpoint)
        } else {
            code
        }
    }

    /// Appends the little-endian storage bytes of `code` to `out`.
    #[inline]
    pub fn pack(&self, code: i128, out: &mut Vec<u8>) {
        out.resize(out.len() + self.padding_bytes, 0);
        for byte in 0..self.code_bytes {
            out.push((code >> (8 * byte)) as u8);
        }
    }

    /// Recovers the unshifted signed code from storage bytes.
    pub fn unpack(&self, bytes: &[u8]) -> i128 {
        let start = self.padding_bytes.min(bytes.len());
        let end = (self.padding_bytes + self.code_bytes).min(bytes.len());
        let window = &bytes[start..end];
        if window.is_empty() {
            return 0;
        }
        let width = 8 * window.len() as u32;
        let mut raw: i128 = 0;
        for (i, &b) in window.iter().enumerate() {
            raw |= i128::from(b) << (8 * i);
        }
        if self.unsigned {
            raw -= self.midpoint;
        }
        // Reinterpret the low `width` bits as two's complement.
        let modulus = 1i128 << width;
        raw = raw.rem_euclid(modulus);
        if raw >= modulus / 2 {
            raw -= modulus;
        }
        raw >> self.shift
    }

    /// Converts storage bytes back to an amplitude.
    pub fn dequantize(&self, bytes: &[u8]) -> f64 {
        if self.max_code == 0 {
            return 0.0;
        }
        self.unpack(bytes) as f64 / self.max_volume
    }
}
