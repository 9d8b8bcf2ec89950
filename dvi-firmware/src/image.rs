//! Built-in test card images.
//!
//! Both cards show the classic eight colour bars (white, yellow, cyan,
//! green, magenta, red, blue, black) with a black-to-white grey ramp
//! across the bottom sixth of the picture. The RGB332 card is full
//! height; the RGB565 card is half height and gets line-doubled on the
//! way out, so it covers the same picture.
//!
//! The pixels are computed at compile time and stored in flash.

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
// Imports
// -----------------------------------------------------------------------------

use dvi_engine::frame::{FRAME_HEIGHT, FRAME_WIDTH};
#[cfg(feature = "rgb332")]
use dvi_engine::rgb::Rgb332;
#[cfg(all(feature = "rgb565", not(feature = "rgb332")))]
use dvi_engine::rgb::Rgb565;

// -----------------------------------------------------------------------------
// Types
// -----------------------------------------------------------------------------

/// A full-height RGB332 frame.
#[cfg(feature = "rgb332")]
#[repr(C, align(4))]
pub struct Rgb332Card(pub [u8; FRAME_WIDTH * FRAME_HEIGHT]);

/// A half-height RGB565 frame.
///
/// The rows go out as word-sized DMA transfers straight from flash, so the
/// pixel data must sit on a word boundary.
#[cfg(all(feature = "rgb565", not(feature = "rgb332")))]
#[repr(C, align(4))]
pub struct Rgb565Card(pub [u16; FRAME_WIDTH * FRAME_HEIGHT / 2]);

// -----------------------------------------------------------------------------
// Static and Const Data
// -----------------------------------------------------------------------------

/// 24-bit colours for the eight bars, left to right.
const BARS: [(u8, u8, u8); 8] = [
    (0xff, 0xff, 0xff), // white
    (0xff, 0xff, 0x00), // yellow
    (0x00, 0xff, 0xff), // cyan
    (0x00, 0xff, 0x00), // green
    (0xff, 0x00, 0xff), // magenta
    (0xff, 0x00, 0x00), // red
    (0x00, 0x00, 0xff), // blue
    (0x00, 0x00, 0x00), // black
];

#[cfg(feature = "rgb332")]
pub static TEST_CARD_RGB332: Rgb332Card = Rgb332Card(make_rgb332_card());

#[cfg(all(feature = "rgb565", not(feature = "rgb332")))]
pub static TEST_CARD_RGB565: Rgb565Card = Rgb565Card(make_rgb565_card());

// -----------------------------------------------------------------------------
// Functions
// -----------------------------------------------------------------------------

/// The 24-bit colour of the test card at `(x, y)`, for a card `rows` tall.
const fn card_colour(x: usize, y: usize, rows: usize) -> (u8, u8, u8) {
    if y >= rows - rows / 6 {
        // Grey ramp, black on the left to white on the right
        let grey = (x * 255 / (FRAME_WIDTH - 1)) as u8;
        (grey, grey, grey)
    } else {
        BARS[x / (FRAME_WIDTH / BARS.len())]
    }
}

#[cfg(feature = "rgb332")]
const fn make_rgb332_card() -> [u8; FRAME_WIDTH * FRAME_HEIGHT] {
    let mut pixels = [0u8; FRAME_WIDTH * FRAME_HEIGHT];
    let mut y = 0;
    while y < FRAME_HEIGHT {
        let mut x = 0;
        while x < FRAME_WIDTH {
            let (red, green, blue) = card_colour(x, y, FRAME_HEIGHT);
            pixels[y * FRAME_WIDTH + x] = Rgb332::from_24bit(red, green, blue).0;
            x += 1;
        }
        y += 1;
    }
    pixels
}

#[cfg(all(feature = "rgb565", not(feature = "rgb332")))]
const fn make_rgb565_card() -> [u16; FRAME_WIDTH * FRAME_HEIGHT / 2] {
    let mut pixels = [0u16; FRAME_WIDTH * FRAME_HEIGHT / 2];
    let mut y = 0;
    while y < FRAME_HEIGHT / 2 {
        let mut x = 0;
        while x < FRAME_WIDTH {
            let (red, green, blue) = card_colour(x, y, FRAME_HEIGHT / 2);
            pixels[y * FRAME_WIDTH + x] = Rgb565::from_24bit(red, green, blue).0;
            x += 1;
        }
        y += 1;
    }
    pixels
}

// -----------------------------------------------------------------------------
// End of file
// -----------------------------------------------------------------------------
