//! The ping-pong scanline feeder.
//!
//! Two DMA channels take turns draining into the HSTX FIFO, each chained to
//! trigger the other when it finishes. Every completion raises an interrupt,
//! and the handler's only job is to hand the channel that just finished its
//! next payload while the opposite channel is still making progress. That
//! decision lives here, behind the [`LineSink`] trait, so none of it needs a
//! register to run.

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

use crate::cmdlist;
use crate::frame::FrameSource;
use crate::timing::{line_phase, LinePhase, V_FIRST_ACTIVE_LINE, V_TOTAL_LINES};

// -----------------------------------------------------------------------------
// Types
// -----------------------------------------------------------------------------

/// One DMA transfer: where to read, and how many 32-bit words.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct Transfer {
    addr: *const u32,
    words: u32,
}

impl Transfer {
    /// Describe a transfer of a whole word slice.
    pub const fn from_words(words: &[u32]) -> Transfer {
        Transfer {
            addr: words.as_ptr(),
            words: words.len() as u32,
        }
    }

    /// Describe a transfer of a whole half-word slice.
    ///
    /// The slice must start on a 32-bit boundary and hold an even number of
    /// half-words, because the DMA moves it one word at a time.
    pub const fn from_halfwords(halfwords: &[u16]) -> Transfer {
        Transfer {
            addr: halfwords.as_ptr() as *const u32,
            words: (halfwords.len() / 2) as u32,
        }
    }

    /// Describe a transfer of a whole byte slice.
    ///
    /// The slice must start on a 32-bit boundary and hold a multiple of four
    /// bytes, because the DMA moves it one word at a time.
    pub const fn from_bytes(bytes: &[u8]) -> Transfer {
        Transfer {
            addr: bytes.as_ptr() as *const u32,
            words: (bytes.len() / 4) as u32,
        }
    }

    /// The source address, for a channel's read-address register.
    pub const fn addr(self) -> *const u32 {
        self.addr
    }

    /// The word count, for a channel's transfer-count register.
    pub const fn words(self) -> u32 {
        self.words
    }
}

/// Which of the two alternating DMA channels.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Channel {
    /// DMA channel 0
    Ping,
    /// DMA channel 1
    Pong,
}

impl Channel {
    /// The DMA channel number this maps to.
    pub const fn index(self) -> usize {
        match self {
            Channel::Ping => 0,
            Channel::Pong => 1,
        }
    }
}

/// Where completed-channel reloads go.
///
/// The implementation must acknowledge the completion interrupt for
/// `channel` and reprogram that channel's source address and word count from
/// `transfer`. It must not block: the opposite channel is draining while
/// this runs, and the reload only has to land before that drain finishes.
pub trait LineSink {
    fn submit(&mut self, channel: Channel, transfer: Transfer);
}

/// Owns every piece of state the completion handler touches.
///
/// Single writer by construction: after start-up, only the completion
/// handler calls [`ScanlineFeeder::on_transfer_complete`], so none of this
/// needs locking.
pub struct ScanlineFeeder<F> {
    frame: F,
    line: u16,
    pong: bool,
    header_posted: bool,
}

impl<F: FrameSource> ScanlineFeeder<F> {
    /// Make a feeder ready for the first completion interrupt.
    ///
    /// Before the channels start, the caller must load both of them with
    /// [`cmdlist::VBLANK_SYNC_OFF`], covering scanlines 0 and 1 (both in
    /// the vertical front porch). The first interrupt therefore decides
    /// scanline [`PRELOADED_LINES`], and the feeder starts there.
    pub const fn new(frame: F) -> ScanlineFeeder<F> {
        ScanlineFeeder {
            frame,
            line: PRELOADED_LINES,
            pong: false,
            header_posted: false,
        }
    }

    /// The scanline the next completion will feed.
    pub const fn line(&self) -> u16 {
        self.line
    }

    /// Reload the channel that just finished.
    ///
    /// Call this once per completion interrupt and from nowhere else. The
    /// channel is tracked by parity here, not read back from the hardware:
    /// by the time the handler runs, the finished channel's registers are
    /// already being rewritten by the chain and cannot be trusted.
    ///
    /// Active scanlines take two completions: one posts the command header,
    /// the next posts the pixel row, and only then does the line advance.
    pub fn on_transfer_complete<K: LineSink>(&mut self, sink: &mut K) {
        let channel = if self.pong { Channel::Pong } else { Channel::Ping };
        self.pong = !self.pong;

        let transfer = match line_phase(self.line) {
            LinePhase::Sync => Transfer::from_words(&cmdlist::VBLANK_SYNC_ON),
            LinePhase::Blank => Transfer::from_words(&cmdlist::VBLANK_SYNC_OFF),
            LinePhase::Active if !self.header_posted => {
                self.header_posted = true;
                Transfer::from_words(&cmdlist::VACTIVE_HEADER)
            }
            LinePhase::Active => {
                self.header_posted = false;
                self.frame.row(self.line - V_FIRST_ACTIVE_LINE)
            }
        };
        sink.submit(channel, transfer);

        if !self.header_posted {
            self.line = (self.line + 1) % V_TOTAL_LINES;
        }
    }
}

// -----------------------------------------------------------------------------
// Static and Const Data
// -----------------------------------------------------------------------------

/// Scanlines already covered by the transfers queued before starting.
///
/// Both channels are pre-loaded, so the first completion interrupt is cueing
/// up the third scanline of the frame.
pub const PRELOADED_LINES: u16 = 2;

// -----------------------------------------------------------------------------
// Functions
// -----------------------------------------------------------------------------

// -----------------------------------------------------------------------------
// Tests
// -----------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rgb::{ExpandConfig, Rgb332};
    use std::vec::Vec;

    static DUMMY_PIXELS: [u32; 2] = [0, 0];

    /// Records which rows were fetched and returns a recognisable payload.
    struct FakeFrame {
        rows: Vec<u16>,
    }

    impl FakeFrame {
        fn new() -> FakeFrame {
            FakeFrame { rows: Vec::new() }
        }
    }

    impl FrameSource for FakeFrame {
        const EXPAND: ExpandConfig = Rgb332::EXPAND;

        fn row(&mut self, row: u16) -> Transfer {
            self.rows.push(row);
            Transfer::from_words(&DUMMY_PIXELS)
        }
    }

    /// Records every submission.
    struct RecordingSink {
        calls: Vec<(Channel, Transfer)>,
    }

    impl RecordingSink {
        fn new() -> RecordingSink {
            RecordingSink { calls: Vec::new() }
        }
    }

    impl LineSink for RecordingSink {
        fn submit(&mut self, channel: Channel, transfer: Transfer) {
            self.calls.push((channel, transfer));
        }
    }

    fn sync_on() -> Transfer {
        Transfer::from_words(&cmdlist::VBLANK_SYNC_ON)
    }

    fn sync_off() -> Transfer {
        Transfer::from_words(&cmdlist::VBLANK_SYNC_OFF)
    }

    fn header() -> Transfer {
        Transfer::from_words(&cmdlist::VACTIVE_HEADER)
    }

    fn drive(feeder: &mut ScanlineFeeder<FakeFrame>, sink: &mut RecordingSink, n: usize) {
        for _ in 0..n {
            feeder.on_transfer_complete(sink);
        }
    }

    /// Completions in one whole frame: one per blanking line, two per
    /// active line.
    const CALLS_PER_FRAME: usize = 45 + 480 * 2;

    #[test]
    fn test_starts_after_preloaded_lines() {
        let mut feeder = ScanlineFeeder::new(FakeFrame::new());
        let mut sink = RecordingSink::new();
        assert_eq!(feeder.line(), 2);
        drive(&mut feeder, &mut sink, 1);
        assert_eq!(sink.calls[0], (Channel::Ping, sync_off()));
        assert_eq!(feeder.line(), 3);
    }

    #[test]
    fn test_vsync_window_covers_lines_10_and_11() {
        let mut feeder = ScanlineFeeder::new(FakeFrame::new());
        let mut sink = RecordingSink::new();
        // Calls 0..8 cover lines 2..10, calls 8 and 9 lines 10 and 11
        drive(&mut feeder, &mut sink, 11);
        assert_eq!(sink.calls[7].1, sync_off());
        assert_eq!(sink.calls[8].1, sync_on());
        assert_eq!(sink.calls[9].1, sync_on());
        // Back to vsync-off exactly at line 12
        assert_eq!(sink.calls[10].1, sync_off());
    }

    #[test]
    fn test_active_video_starts_at_line_45() {
        let mut feeder = ScanlineFeeder::new(FakeFrame::new());
        let mut sink = RecordingSink::new();
        // Lines 2..=44 are blanking: 43 calls
        drive(&mut feeder, &mut sink, 43);
        assert_eq!(feeder.line(), 45);
        assert_eq!(sink.calls.last().unwrap().1, sync_off());

        // Header first, pixels second, and only then the line advances
        drive(&mut feeder, &mut sink, 1);
        assert_eq!(sink.calls.last().unwrap().1, header());
        assert_eq!(feeder.line(), 45);
        drive(&mut feeder, &mut sink, 1);
        assert_eq!(
            sink.calls.last().unwrap().1,
            Transfer::from_words(&DUMMY_PIXELS)
        );
        assert_eq!(feeder.line(), 46);
        assert_eq!(feeder.frame.rows, [0]);
    }

    #[test]
    fn test_every_row_fetched_once_in_order() {
        let mut feeder = ScanlineFeeder::new(FakeFrame::new());
        let mut sink = RecordingSink::new();
        drive(&mut feeder, &mut sink, CALLS_PER_FRAME);
        let expected: Vec<u16> = (0..480).collect();
        assert_eq!(feeder.frame.rows, expected);
    }

    #[test]
    fn test_frame_census() {
        let mut feeder = ScanlineFeeder::new(FakeFrame::new());
        let mut sink = RecordingSink::new();
        drive(&mut feeder, &mut sink, CALLS_PER_FRAME);
        // One whole frame brings us back to where we started
        assert_eq!(feeder.line(), 2);

        let count = |t: Transfer| sink.calls.iter().filter(|(_, c)| *c == t).count();
        assert_eq!(count(sync_on()), 2);
        assert_eq!(count(sync_off()), 43);
        assert_eq!(count(header()), 480);
        assert_eq!(count(Transfer::from_words(&DUMMY_PIXELS)), 480);
    }

    #[test]
    fn test_consecutive_frames_are_identical() {
        let mut feeder = ScanlineFeeder::new(FakeFrame::new());
        let mut sink = RecordingSink::new();
        drive(&mut feeder, &mut sink, CALLS_PER_FRAME * 2);
        let first: Vec<Transfer> = sink.calls[..CALLS_PER_FRAME]
            .iter()
            .map(|(_, t)| *t)
            .collect();
        let second: Vec<Transfer> = sink.calls[CALLS_PER_FRAME..]
            .iter()
            .map(|(_, t)| *t)
            .collect();
        assert_eq!(first, second);
    }

    #[test]
    fn test_channels_strictly_alternate() {
        let mut feeder = ScanlineFeeder::new(FakeFrame::new());
        let mut sink = RecordingSink::new();
        drive(&mut feeder, &mut sink, CALLS_PER_FRAME * 2);
        for (i, (channel, _)) in sink.calls.iter().enumerate() {
            let expected = if i % 2 == 0 {
                Channel::Ping
            } else {
                Channel::Pong
            };
            assert_eq!(*channel, expected, "call {}", i);
        }
    }

    #[test]
    fn test_wraps_to_line_zero() {
        let mut feeder = ScanlineFeeder::new(FakeFrame::new());
        let mut sink = RecordingSink::new();
        while feeder.line() != 524 {
            drive(&mut feeder, &mut sink, 1);
        }
        // Last active line still takes two completions
        drive(&mut feeder, &mut sink, 2);
        assert_eq!(feeder.line(), 0);
        drive(&mut feeder, &mut sink, 1);
        assert_eq!(sink.calls.last().unwrap().1, sync_off());
        assert_eq!(feeder.line(), 1);
    }
}

// -----------------------------------------------------------------------------
// End of file
// -----------------------------------------------------------------------------
