//! HSTX command lists for each kind of scanline.
//!
//! The HSTX command expander executes a stream of 32-bit words. A command
//! word carries an opcode in bits 12 and up and a count in the low 12 bits;
//! a `raw_repeat` command is followed by one data word to hold on the
//! outputs for `count` pixel clocks, and a `tmds` command switches the
//! encoder into pixel mode for the next `count` pixels, which arrive as
//! packed pixel data in a later transfer.
//!
//! Three lists cover every scanline of the frame: blanking with vsync
//! deasserted, blanking with vsync asserted, and the header that times the
//! blanked portion of an active line before handing over to pixels.

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

use crate::timing::{
    H_ACTIVE_PIXELS, H_BACK_PORCH, H_FRONT_PORCH, H_SYNC_WIDTH, H_TOTAL_PIXELS,
};

// -----------------------------------------------------------------------------
// Types
// -----------------------------------------------------------------------------

// -----------------------------------------------------------------------------
// Static and Const Data
// -----------------------------------------------------------------------------

/// TMDS control code for {c1, c0} = {0, 0}
pub const TMDS_CTRL_00: u32 = 0x354;
/// TMDS control code for {c1, c0} = {0, 1}
pub const TMDS_CTRL_01: u32 = 0x0ab;
/// TMDS control code for {c1, c0} = {1, 0}
pub const TMDS_CTRL_10: u32 = 0x154;
/// TMDS control code for {c1, c0} = {1, 1}
pub const TMDS_CTRL_11: u32 = 0x2ab;

/// Vsync low, hsync low (both pulses asserted; they are active-low)
pub const SYNC_V0_H0: u32 = sync_word(TMDS_CTRL_00);
/// Vsync low, hsync high
pub const SYNC_V0_H1: u32 = sync_word(TMDS_CTRL_01);
/// Vsync high, hsync low
pub const SYNC_V1_H0: u32 = sync_word(TMDS_CTRL_10);
/// Vsync high, hsync high (both pulses idle)
pub const SYNC_V1_H1: u32 = sync_word(TMDS_CTRL_11);

/// Do-nothing command word
pub const NOP: u32 = 0xf << 12;

/// Blanking scanline with vsync deasserted.
///
/// The lists are padded with [`NOP`]s to be no smaller than the HSTX FIFO,
/// so the DMA channels cannot ping-pong faster than the completion
/// interrupt can be serviced.
pub static VBLANK_SYNC_OFF: [u32; 7] = [
    raw_repeat(H_FRONT_PORCH),
    SYNC_V1_H1,
    raw_repeat(H_SYNC_WIDTH),
    SYNC_V1_H0,
    raw_repeat(H_BACK_PORCH + H_ACTIVE_PIXELS),
    SYNC_V1_H1,
    NOP,
];

/// Blanking scanline with vsync asserted.
pub static VBLANK_SYNC_ON: [u32; 7] = [
    raw_repeat(H_FRONT_PORCH),
    SYNC_V0_H1,
    raw_repeat(H_SYNC_WIDTH),
    SYNC_V0_H0,
    raw_repeat(H_BACK_PORCH + H_ACTIVE_PIXELS),
    SYNC_V0_H1,
    NOP,
];

/// Header for an active scanline: the blanked portion of the line, then a
/// command that takes the next 640 pixels from the following transfer.
pub static VACTIVE_HEADER: [u32; 9] = [
    raw_repeat(H_FRONT_PORCH),
    SYNC_V1_H1,
    NOP,
    raw_repeat(H_SYNC_WIDTH),
    SYNC_V1_H0,
    NOP,
    raw_repeat(H_BACK_PORCH),
    SYNC_V1_H1,
    tmds(H_ACTIVE_PIXELS),
];

// Every list must account for exactly one scanline of pixel clocks, and the
// header must request every active pixel.
const _: () = assert!(scanline_cycles(&VBLANK_SYNC_OFF) == H_TOTAL_PIXELS);
const _: () = assert!(scanline_cycles(&VBLANK_SYNC_ON) == H_TOTAL_PIXELS);
const _: () = assert!(scanline_cycles(&VACTIVE_HEADER) == H_TOTAL_PIXELS);
const _: () = assert!(VACTIVE_HEADER[VACTIVE_HEADER.len() - 1] == tmds(H_ACTIVE_PIXELS));

// -----------------------------------------------------------------------------
// Functions
// -----------------------------------------------------------------------------

/// Shift out the next `count` data words unmodified, one per pixel clock.
pub const fn raw(count: u32) -> u32 {
    (0x0 << 12) | count
}

/// Hold the next data word on the outputs for `count` pixel clocks.
pub const fn raw_repeat(count: u32) -> u32 {
    (0x1 << 12) | count
}

/// TMDS-encode the next `count` pixels.
pub const fn tmds(count: u32) -> u32 {
    (0x2 << 12) | count
}

/// TMDS-encode the next pixel and repeat it for `count` pixel clocks.
pub const fn tmds_repeat(count: u32) -> u32 {
    (0x3 << 12) | count
}

/// Place a control code on lane 0 and the idle code on lanes 1 and 2.
///
/// Only lane 0 carries the sync state; the upper lanes hold `CTRL_00`
/// throughout blanking.
const fn sync_word(lane0: u32) -> u32 {
    lane0 | (TMDS_CTRL_00 << 10) | (TMDS_CTRL_00 << 20)
}

/// Count the pixel clocks a command list accounts for.
const fn scanline_cycles(cmds: &[u32]) -> u32 {
    let mut cycles = 0;
    let mut i = 0;
    while i < cmds.len() {
        let op = cmds[i] >> 12;
        let count = cmds[i] & 0x0fff;
        i += 1;
        if op == 0x0 {
            // raw: count data words follow, one clock each
            cycles += count;
            i += count as usize;
        } else if op == 0x1 {
            // raw repeat: one data word follows, held for count clocks
            cycles += count;
            i += 1;
        } else if op == 0x2 || op == 0x3 {
            // tmds: count pixel clocks, data arrives by a later transfer
            cycles += count;
        }
        // nop: no clocks, no data
    }
    cycles
}

// -----------------------------------------------------------------------------
// Tests
// -----------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_command_words() {
        assert_eq!(raw(5), 0x0005);
        assert_eq!(raw_repeat(16), 0x1010);
        assert_eq!(tmds(640), 0x2280);
        assert_eq!(tmds_repeat(1), 0x3001);
        assert_eq!(NOP, 0xf000);
    }

    #[test]
    fn test_sync_words() {
        // Three 10-bit control codes packed into one word
        assert_eq!(SYNC_V0_H0, 0x354d_5354);
        assert_eq!(SYNC_V0_H1, 0x354d_50ab);
        assert_eq!(SYNC_V1_H0, 0x354d_5154);
        assert_eq!(SYNC_V1_H1, 0x354d_52ab);
    }

    #[test]
    fn test_lists_fill_one_scanline() {
        assert_eq!(scanline_cycles(&VBLANK_SYNC_OFF), 800);
        assert_eq!(scanline_cycles(&VBLANK_SYNC_ON), 800);
        assert_eq!(scanline_cycles(&VACTIVE_HEADER), 800);
    }

    #[test]
    fn test_blanking_lists_differ_only_in_sync_level() {
        assert_eq!(VBLANK_SYNC_OFF.len(), VBLANK_SYNC_ON.len());
        for (off, on) in VBLANK_SYNC_OFF.iter().zip(VBLANK_SYNC_ON.iter()) {
            if off != on {
                // The two control-code families differ only in bit 9 of
                // the lane 0 code, which is where c1 (vsync) lands
                assert_eq!(off ^ on, 0x200);
            }
        }
    }

    #[test]
    fn test_header_requests_every_active_pixel() {
        assert_eq!(*VACTIVE_HEADER.last().unwrap(), tmds(640));
    }
}

// -----------------------------------------------------------------------------
// End of file
// -----------------------------------------------------------------------------
