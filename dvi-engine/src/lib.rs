//! Hardware-independent scanline engine for DVI output.
//!
//! This crate contains everything needed to feed a DVI/TMDS command stream
//! to the RP2350's HSTX peripheral, except the code that actually touches a
//! register:
//!
//! - Video mode geometry and scanline classification
//! - HSTX command lists for blanking and active lines
//! - Packed pixel formats and their expander parameters
//! - Frame sources that turn a scanline index into a DMA transfer
//! - The ping-pong feeder state machine run from the DMA completion handler
//!
//! The firmware crate supplies the two DMA channels behind the
//! [`feeder::LineSink`] trait. Everything here runs unchanged on the host,
//! which is where the tests live.

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

#![no_std]
#![deny(unsafe_code)]

#[cfg(test)]
extern crate std;

// -----------------------------------------------------------------------------
// Sub-modules
// -----------------------------------------------------------------------------

pub mod cmdlist;
pub mod feeder;
pub mod frame;
pub mod rgb;
pub mod timing;

// -----------------------------------------------------------------------------
// Imports
// -----------------------------------------------------------------------------

// -----------------------------------------------------------------------------
// Types
// -----------------------------------------------------------------------------

// -----------------------------------------------------------------------------
// Static and Const Data
// -----------------------------------------------------------------------------

// -----------------------------------------------------------------------------
// Functions
// -----------------------------------------------------------------------------

// -----------------------------------------------------------------------------
// End of file
// -----------------------------------------------------------------------------
