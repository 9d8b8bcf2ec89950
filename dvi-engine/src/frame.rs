//! Frame sources: turning an active scanline index into pixel data.
//!
//! Two strategies, one per pixel format. The RGB332 source holds a
//! full-height image and stages each row through a word-aligned scratch
//! buffer before the DMA reads it. The RGB565 source points the DMA
//! straight into a half-height image, showing the top half of the picture
//! twice; at two bytes per pixel, halving the height halves the memory the
//! image takes. Either format could use the other strategy; only these two
//! pairings are provided.

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

use crate::feeder::Transfer;
use crate::rgb::{ExpandConfig, Rgb332, Rgb565};
use crate::timing::{H_ACTIVE_PIXELS, V_ACTIVE_LINES};

// -----------------------------------------------------------------------------
// Types
// -----------------------------------------------------------------------------

/// Supplies pixel rows to the feeder and expander parameters to start-up.
pub trait FrameSource {
    /// What the HSTX expander must be programmed with for this format.
    const EXPAND: ExpandConfig;

    /// The transfer carrying active row `row`, in `0..V_ACTIVE_LINES`.
    ///
    /// Called from the completion handler, so it must be quick: at most one
    /// row copy, no other work.
    fn row(&mut self, row: u16) -> Transfer;
}

/// A full-height RGB332 image, staged through a scratch row.
///
/// The DMA always reads the scratch buffer, never the image itself, which
/// leaves the image free to live in flash or in a layout the DMA could not
/// read word-by-word.
pub struct Rgb332Source<'a> {
    image: &'a [u8],
    scratch: ScratchRow,
}

/// One row of staged pixels, aligned for 32-bit DMA reads.
#[repr(C, align(4))]
struct ScratchRow([u8; FRAME_WIDTH]);

/// A half-height RGB565 image, read in place.
///
/// Rows past the end of the image wrap back to the top, so the top half of
/// the picture repeats in the bottom half.
pub struct Rgb565Source<'a> {
    image: &'a [u16],
}

impl<'a> Rgb332Source<'a> {
    /// Rows in the image
    pub const ROWS: usize = FRAME_HEIGHT;

    /// Wrap a full-height image of exactly 640 x 480 pixels.
    pub const fn new(image: &'a [u8]) -> Rgb332Source<'a> {
        assert!(image.len() == FRAME_WIDTH * Self::ROWS);
        Rgb332Source {
            image,
            scratch: ScratchRow([0; FRAME_WIDTH]),
        }
    }

    #[cfg(test)]
    fn scratch_bytes(&self) -> &[u8] {
        &self.scratch.0
    }
}

impl FrameSource for Rgb332Source<'_> {
    const EXPAND: ExpandConfig = Rgb332::EXPAND;

    fn row(&mut self, row: u16) -> Transfer {
        let start = row as usize * FRAME_WIDTH;
        self.scratch
            .0
            .copy_from_slice(&self.image[start..start + FRAME_WIDTH]);
        Transfer::from_bytes(&self.scratch.0)
    }
}

impl<'a> Rgb565Source<'a> {
    /// Rows in the image; each is shown twice per frame
    pub const ROWS: usize = FRAME_HEIGHT / 2;

    /// Wrap a half-height image of exactly 640 x 240 pixels.
    ///
    /// The image must start on a 32-bit boundary so the DMA can read whole
    /// words from any row.
    pub const fn new(image: &'a [u16]) -> Rgb565Source<'a> {
        assert!(image.len() == FRAME_WIDTH * Self::ROWS);
        Rgb565Source { image }
    }
}

impl FrameSource for Rgb565Source<'_> {
    const EXPAND: ExpandConfig = Rgb565::EXPAND;

    fn row(&mut self, row: u16) -> Transfer {
        let mut row = row as usize;
        if row >= Self::ROWS {
            row -= Self::ROWS;
        }
        let start = row * FRAME_WIDTH;
        Transfer::from_halfwords(&self.image[start..start + FRAME_WIDTH])
    }
}

// -----------------------------------------------------------------------------
// Static and Const Data
// -----------------------------------------------------------------------------

/// Pixels per row
pub const FRAME_WIDTH: usize = H_ACTIVE_PIXELS as usize;

/// Rows per full-height frame
pub const FRAME_HEIGHT: usize = V_ACTIVE_LINES as usize;

// A pixel row must be a whole number of DMA words in either format.
const _: () = assert!(FRAME_WIDTH % 4 == 0);

// -----------------------------------------------------------------------------
// Functions
// -----------------------------------------------------------------------------

// -----------------------------------------------------------------------------
// Tests
// -----------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use std::vec::Vec;

    fn rgb332_image() -> Vec<u8> {
        // Every pixel of row r holds r (mod 256)
        (0..FRAME_HEIGHT)
            .flat_map(|r| core::iter::repeat(r as u8).take(FRAME_WIDTH))
            .collect()
    }

    fn rgb565_image() -> Vec<u16> {
        (0..Rgb565Source::ROWS)
            .flat_map(|r| core::iter::repeat(r as u16).take(FRAME_WIDTH))
            .collect()
    }

    #[test]
    fn test_rgb332_stages_rows_through_scratch() {
        let image = rgb332_image();
        let mut source = Rgb332Source::new(&image);

        let t = source.row(3);
        assert_eq!(t.words(), 160);
        assert!(source.scratch_bytes().iter().all(|&px| px == 3));

        // The scratch buffer is reused, so the address never moves
        let t2 = source.row(479);
        assert_eq!(t2.addr(), t.addr());
        assert!(source.scratch_bytes().iter().all(|&px| px == 223));
    }

    #[test]
    fn test_rgb565_reads_rows_in_place() {
        let image = rgb565_image();
        let mut source = Rgb565Source::new(&image);

        let t = source.row(0);
        assert_eq!(t.addr(), image.as_ptr() as *const u32);
        assert_eq!(t.words(), 320);

        let t = source.row(239);
        assert_eq!(t.addr(), image[239 * FRAME_WIDTH..].as_ptr() as *const u32);
    }

    #[test]
    fn test_rgb565_repeats_top_half() {
        let image = rgb565_image();
        let mut source = Rgb565Source::new(&image);

        // Rows past the image fold back to its start...
        assert_eq!(source.row(240).addr(), source.row(0).addr());
        assert_eq!(source.row(250).addr(), source.row(10).addr());
        // ...and the bottom scanline reads the last row, staying in bounds
        assert_eq!(source.row(479).addr(), source.row(239).addr());
    }
}

// -----------------------------------------------------------------------------
// End of file
// -----------------------------------------------------------------------------
