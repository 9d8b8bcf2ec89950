//! Video timing for the one supported mode: 640x480 @ 60 Hz.
//!
//! All the geometry here is in pixel clocks (horizontal) and scanlines
//! (vertical). Both sync pulses are active-low in this mode.

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

/// What a given scanline requires from the feeder.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum LinePhase {
    /// Inside the vertical sync pulse; blanking with vsync asserted
    Sync,
    /// Vertical front or back porch; blanking with vsync deasserted
    Blank,
    /// Active picture; a command header followed by one row of pixels
    Active,
}

// -----------------------------------------------------------------------------
// Static and Const Data
// -----------------------------------------------------------------------------

/// Pixel clocks between the end of active video and the hsync pulse
pub const H_FRONT_PORCH: u32 = 16;

/// Width of the hsync pulse, in pixel clocks
pub const H_SYNC_WIDTH: u32 = 96;

/// Pixel clocks between the hsync pulse and the start of active video
pub const H_BACK_PORCH: u32 = 48;

/// Visible pixels per scanline
pub const H_ACTIVE_PIXELS: u32 = 640;

/// Pixel clocks per scanline, blanking included
pub const H_TOTAL_PIXELS: u32 = H_FRONT_PORCH + H_SYNC_WIDTH + H_BACK_PORCH + H_ACTIVE_PIXELS;

/// Scanlines between the end of active video and the vsync pulse
pub const V_FRONT_PORCH: u16 = 10;

/// Height of the vsync pulse, in scanlines
pub const V_SYNC_WIDTH: u16 = 2;

/// Scanlines between the vsync pulse and the start of active video
pub const V_BACK_PORCH: u16 = 33;

/// Visible scanlines per frame
pub const V_ACTIVE_LINES: u16 = 480;

/// First scanline of the frame that carries pixels.
///
/// Scanline 0 is the first line of the vertical front porch, so the whole
/// vertical blanking interval sits in front of the active picture.
pub const V_FIRST_ACTIVE_LINE: u16 = V_FRONT_PORCH + V_SYNC_WIDTH + V_BACK_PORCH;

/// Scanlines per frame, blanking included
pub const V_TOTAL_LINES: u16 = V_FIRST_ACTIVE_LINE + V_ACTIVE_LINES;

// -----------------------------------------------------------------------------
// Functions
// -----------------------------------------------------------------------------

/// Classify a scanline index in `0..V_TOTAL_LINES`.
pub const fn line_phase(line: u16) -> LinePhase {
    if line >= V_FRONT_PORCH && line < V_FRONT_PORCH + V_SYNC_WIDTH {
        LinePhase::Sync
    } else if line < V_FIRST_ACTIVE_LINE {
        LinePhase::Blank
    } else {
        LinePhase::Active
    }
}

// -----------------------------------------------------------------------------
// Tests
// -----------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mode_totals() {
        assert_eq!(H_TOTAL_PIXELS, 800);
        assert_eq!(V_TOTAL_LINES, 525);
        assert_eq!(V_FIRST_ACTIVE_LINE, 45);
    }

    #[test]
    fn test_phase_boundaries() {
        assert_eq!(line_phase(0), LinePhase::Blank);
        assert_eq!(line_phase(9), LinePhase::Blank);
        assert_eq!(line_phase(10), LinePhase::Sync);
        assert_eq!(line_phase(11), LinePhase::Sync);
        assert_eq!(line_phase(12), LinePhase::Blank);
        assert_eq!(line_phase(44), LinePhase::Blank);
        assert_eq!(line_phase(45), LinePhase::Active);
        assert_eq!(line_phase(524), LinePhase::Active);
    }

    #[test]
    fn test_phase_census() {
        let mut sync = 0;
        let mut blank = 0;
        let mut active = 0;
        for line in 0..V_TOTAL_LINES {
            match line_phase(line) {
                LinePhase::Sync => sync += 1,
                LinePhase::Blank => blank += 1,
                LinePhase::Active => active += 1,
            }
        }
        assert_eq!(sync, V_SYNC_WIDTH);
        assert_eq!(blank, V_FRONT_PORCH + V_BACK_PORCH);
        assert_eq!(active, V_ACTIVE_LINES);
    }
}

// -----------------------------------------------------------------------------
// End of file
// -----------------------------------------------------------------------------
