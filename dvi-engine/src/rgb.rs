//! Packed pixel formats and their HSTX expander parameters.
//!
//! Both formats put red in the least-significant bits, matching the order
//! the expander feeds the TMDS lanes.

// -----------------------------------------------------------------------------
// Licence Statement
// -----------------------------------------------------------------------------
// Copyright (c) The hstx-dvi-rs developers, 2026
//
// This program is free software: you can redistribute it and/or modify it under
// the terms of the GNU General Public License as published by the Free Software
// Foundation, either version 3 of the License, or (at your option) any later
// version.
//
// This program is distributed in the hope that it will be useful, but WITHOUT
// ANY WARRANTY; without even the implied warranty of MERCHANTABILITY or FITNESS
// FOR A PARTICULAR PURPOSE.  See the GNU General Public License for more
// details.
//
// You should have received a copy of the GNU General Public License along with
// this program.  If not, see <https://www.gnu.org/licenses/>.
// -----------------------------------------------------------------------------

// -----------------------------------------------------------------------------
// Sub-modules
// -----------------------------------------------------------------------------

// -----------------------------------------------------------------------------
// Imports
// -----------------------------------------------------------------------------

// -----------------------------------------------------------------------------
// Types
// -----------------------------------------------------------------------------

/// Configuration the HSTX command expander needs for one pixel format.
///
/// The `lN` fields programme the bit count and rotation that route each
/// colour channel to TMDS lane N; the `enc` fields say how many pixels are
/// packed into each 32-bit word and how far apart they sit.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ExpandConfig {
    /// Significant bits for lane 2
    pub l2_nbits: u8,
    /// Rotation applied for lane 2
    pub l2_rot: u8,
    /// Significant bits for lane 1
    pub l1_nbits: u8,
    /// Rotation applied for lane 1
    pub l1_rot: u8,
    /// Significant bits for lane 0
    pub l0_nbits: u8,
    /// Rotation applied for lane 0
    pub l0_rot: u8,
    /// Pixels popped from each 32-bit word
    pub enc_n_shifts: u8,
    /// Bits the word is shifted between pixels
    pub enc_shift: u8,
}

/// One pixel in the 8-bit RGB332 format.
///
/// Red in bits 1..=0, green in bits 4..=2, blue in bits 7..=5.
#[repr(transparent)]
#[derive(Copy, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Rgb332(pub u8);

/// One pixel in the 16-bit RGB565 format.
///
/// Red in bits 4..=0, green in bits 10..=5, blue in bits 15..=11.
#[repr(transparent)]
#[derive(Copy, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Rgb565(pub u16);

impl Rgb332 {
    /// Black (all bits off)
    pub const BLACK: Rgb332 = Rgb332::from_24bit(0x00, 0x00, 0x00);

    /// White
    pub const WHITE: Rgb332 = Rgb332::from_24bit(0xff, 0xff, 0xff);

    /// Expander parameters for this format: four 8-bit pixels per word.
    pub const EXPAND: ExpandConfig = ExpandConfig {
        l2_nbits: 2,
        l2_rot: 0,
        l1_nbits: 2,
        l1_rot: 29,
        l0_nbits: 1,
        l0_rot: 26,
        enc_n_shifts: 4,
        enc_shift: 8,
    };

    /// Make an [`Rgb332`] from a 24-bit RGB triplet.
    ///
    /// Keeps the top 2 bits of red and the top 3 bits of green and blue.
    pub const fn from_24bit(red: u8, green: u8, blue: u8) -> Rgb332 {
        Rgb332((red & 0xc0) >> 6 | (green & 0xe0) >> 3 | (blue & 0xe0))
    }

    /// Get the red component as an 8-bit value
    pub const fn red8(self) -> u8 {
        (self.0 & 0x03) << 6
    }

    /// Get the green component as an 8-bit value
    pub const fn green8(self) -> u8 {
        (self.0 & 0x1c) << 3
    }

    /// Get the blue component as an 8-bit value
    pub const fn blue8(self) -> u8 {
        self.0 & 0xe0
    }
}

impl Rgb565 {
    /// Black (all bits off)
    pub const BLACK: Rgb565 = Rgb565::from_24bit(0x00, 0x00, 0x00);

    /// White
    pub const WHITE: Rgb565 = Rgb565::from_24bit(0xff, 0xff, 0xff);

    /// Expander parameters for this format: two 16-bit pixels per word.
    pub const EXPAND: ExpandConfig = ExpandConfig {
        l2_nbits: 5,
        l2_rot: 0,
        l1_nbits: 6,
        l1_rot: 29,
        l0_nbits: 5,
        l0_rot: 26,
        enc_n_shifts: 2,
        enc_shift: 16,
    };

    /// Make an [`Rgb565`] from a 24-bit RGB triplet.
    ///
    /// Keeps the top 5 bits of red and blue and the top 6 bits of green.
    pub const fn from_24bit(red: u8, green: u8, blue: u8) -> Rgb565 {
        Rgb565(
            ((red as u16 & 0xf8) >> 3) | ((green as u16 & 0xfc) << 3) | ((blue as u16 & 0xf8) << 8),
        )
    }

    /// Get the red component as an 8-bit value
    pub const fn red8(self) -> u8 {
        ((self.0 & 0x001f) << 3) as u8
    }

    /// Get the green component as an 8-bit value
    pub const fn green8(self) -> u8 {
        (((self.0 >> 5) & 0x3f) << 2) as u8
    }

    /// Get the blue component as an 8-bit value
    pub const fn blue8(self) -> u8 {
        (((self.0 >> 11) & 0x1f) << 3) as u8
    }
}

// -----------------------------------------------------------------------------
// Static and Const Data
// -----------------------------------------------------------------------------

// -----------------------------------------------------------------------------
// Functions
// -----------------------------------------------------------------------------

// -----------------------------------------------------------------------------
// Tests
// -----------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_rgb332_primaries() {
        assert_eq!(Rgb332::from_24bit(0xff, 0x00, 0x00).0, 0x03);
        assert_eq!(Rgb332::from_24bit(0x00, 0xff, 0x00).0, 0x1c);
        assert_eq!(Rgb332::from_24bit(0x00, 0x00, 0xff).0, 0xe0);
        assert_eq!(Rgb332::BLACK.0, 0x00);
        assert_eq!(Rgb332::WHITE.0, 0xff);
    }

    #[test]
    fn test_rgb565_primaries() {
        assert_eq!(Rgb565::from_24bit(0xff, 0x00, 0x00).0, 0x001f);
        assert_eq!(Rgb565::from_24bit(0x00, 0xff, 0x00).0, 0x07e0);
        assert_eq!(Rgb565::from_24bit(0x00, 0x00, 0xff).0, 0xf800);
        assert_eq!(Rgb565::BLACK.0, 0x0000);
        assert_eq!(Rgb565::WHITE.0, 0xffff);
    }

    #[test]
    fn test_expand_consumes_whole_words() {
        // Every pop must walk the full 32-bit word
        let e = Rgb332::EXPAND;
        assert_eq!(e.enc_n_shifts as u32 * e.enc_shift as u32, 32);
        let e = Rgb565::EXPAND;
        assert_eq!(e.enc_n_shifts as u32 * e.enc_shift as u32, 32);
    }

    proptest! {
        #[test]
        fn test_rgb332_round_trips_top_bits(red: u8, green: u8, blue: u8) {
            let px = Rgb332::from_24bit(red, green, blue);
            prop_assert_eq!(px.red8(), red & 0xc0);
            prop_assert_eq!(px.green8(), green & 0xe0);
            prop_assert_eq!(px.blue8(), blue & 0xe0);
        }

        #[test]
        fn test_rgb565_round_trips_top_bits(red: u8, green: u8, blue: u8) {
            let px = Rgb565::from_24bit(red, green, blue);
            prop_assert_eq!(px.red8(), red & 0xf8);
            prop_assert_eq!(px.green8(), green & 0xfc);
            prop_assert_eq!(px.blue8(), blue & 0xf8);
        }
    }
}

// -----------------------------------------------------------------------------
// End of file
// -----------------------------------------------------------------------------
