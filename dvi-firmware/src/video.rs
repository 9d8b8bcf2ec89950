//! DVI scanout on core 1.
//!
//! Core 1 owns the HSTX, both DMA channels and the `DMA_IRQ_0` handler.
//! After bring-up it parks in `wfi` and all the work happens in the
//! interrupt, which runs [`ScanlineFeeder`] to keep the idle channel cued
//! with the next scanline while the other one drains into the HSTX FIFO.
//!
//! The handler and the core 1 entry point live in `.data` so scanout never
//! stalls on an XIP cache miss.

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

use core::cell::UnsafeCell;

use cortex_m::peripheral::NVIC;
use rp235x_hal::pac::{
    interrupt, Interrupt, Peripherals, DMA, HSTX_CTRL, HSTX_FIFO, IO_BANK0, PADS_BANK0,
};

use dvi_engine::cmdlist;
use dvi_engine::feeder::{Channel, LineSink, ScanlineFeeder, Transfer};
use dvi_engine::frame::FrameSource;
#[cfg(feature = "rgb332")]
use dvi_engine::frame::Rgb332Source;
#[cfg(all(feature = "rgb565", not(feature = "rgb332")))]
use dvi_engine::frame::Rgb565Source;
use dvi_engine::rgb::ExpandConfig;

use crate::image;

// -----------------------------------------------------------------------------
// Types
// -----------------------------------------------------------------------------

/// The frame source selected at build time.
#[cfg(feature = "rgb332")]
type CardSource = Rgb332Source<'static>;

/// The frame source selected at build time.
#[cfg(all(feature = "rgb565", not(feature = "rgb332")))]
type CardSource = Rgb565Source<'static>;

#[cfg(not(any(feature = "rgb332", feature = "rgb565")))]
compile_error!("enable a pixel format feature: rgb332 or rgb565");

/// Wraps the feeder so it can live in a `static` the interrupt handler can
/// reach. Only core 1 touches it, and only from `DMA_IRQ_0` once scanout is
/// running.
struct FeederCell(UnsafeCell<ScanlineFeeder<CardSource>>);

unsafe impl Sync for FeederCell {}

/// Feeds cued-up transfers to the two real DMA channels.
struct DmaLineSink {
    dma: DMA,
}

// -----------------------------------------------------------------------------
// Static and Const Data
// -----------------------------------------------------------------------------

/// Name of the selected pixel format, for the boot log.
#[cfg(feature = "rgb332")]
pub const FORMAT_NAME: &str = "RGB332";

/// Name of the selected pixel format, for the boot log.
#[cfg(all(feature = "rgb565", not(feature = "rgb332")))]
pub const FORMAT_NAME: &str = "RGB565";

#[cfg(feature = "rgb332")]
static VIDEO_FEEDER: FeederCell = FeederCell(UnsafeCell::new(ScanlineFeeder::new(
    Rgb332Source::new(&image::TEST_CARD_RGB332.0),
)));

#[cfg(all(feature = "rgb565", not(feature = "rgb332")))]
static VIDEO_FEEDER: FeederCell = FeederCell(UnsafeCell::new(ScanlineFeeder::new(
    Rgb565Source::new(&image::TEST_CARD_RGB565.0),
)));

/// DREQ asserted by the HSTX FIFO.
const DREQ_HSTX: u8 = 52;

/// GPIO function select for HSTX output.
const FUNCTION_HSTX: u8 = 0;

/// `BITx` flag inverting the output, for the negative half of each pair.
const BIT_INV: u32 = 1 << 16;

/// `BITx` flag making the output a copy of the shifter clock.
const BIT_CLK: u32 = 1 << 17;

// -----------------------------------------------------------------------------
// Functions
// -----------------------------------------------------------------------------

/// Entry point for core 1.
///
/// Brings up the HSTX and the scanline DMA, starts scanout and sleeps
/// forever. Everything after this runs in the `DMA_IRQ_0` handler.
#[link_section = ".data"]
pub fn core1_main() -> ! {
    // Core 0 used `take`, so this is the only other copy in existence, and
    // the peripherals it touches belong to this core.
    let p = unsafe { Peripherals::steal() };

    // Release HSTX from reset
    p.RESETS.reset().modify(|_, w| w.hstx().clear_bit());
    while p.RESETS.reset_done().read().hstx().bit_is_clear() {}

    unsafe {
        configure_hstx(&p.HSTX_CTRL, CardSource::EXPAND);
        configure_dma(&p.DMA, &p.HSTX_FIFO);
    }

    // DMA wins bus arbitration, so scanout cannot be starved by either CPU
    p.BUSCTRL
        .bus_priority()
        .write(|w| w.dma_r().set_bit().dma_w().set_bit());

    // Connecting the pins last means they never carry a half-configured
    // signal
    configure_pins(&p.PADS_BANK0, &p.IO_BANK0);

    defmt::info!("Scanout running: {=str} test card", FORMAT_NAME);

    unsafe {
        NVIC::unmask(Interrupt::DMA_IRQ_0);
        // Start the ping channel; the chain brings in pong from then on
        p.DMA
            .multi_chan_trigger()
            .write(|w| w.multi_chan_trigger().bits(1));
    }

    loop {
        cortex_m::asm::wfi();
    }
}

/// Set up the HSTX shifter, expander and output bit routing.
unsafe fn configure_hstx(hstx: &HSTX_CTRL, expand: ExpandConfig) {
    unsafe {
        hstx.expand_tmds().write(|w| {
            w.l2_nbits()
                .bits(expand.l2_nbits)
                .l2_rot()
                .bits(expand.l2_rot)
                .l1_nbits()
                .bits(expand.l1_nbits)
                .l1_rot()
                .bits(expand.l1_rot)
                .l0_nbits()
                .bits(expand.l0_nbits)
                .l0_rot()
                .bits(expand.l0_rot)
        });
        hstx.expand_shift().write(|w| {
            w.enc_n_shifts()
                .bits(expand.enc_n_shifts)
                .enc_shift()
                .bits(expand.enc_shift)
                .raw_n_shifts()
                .bits(1)
        });
        // Disable the shifter while it is reconfigured, then bring it up in
        // one go. Five HSTX clocks per pixel, two output bits per clock:
        // each lane shifts out its ten TMDS bits per pixel, and with the
        // HSTX clock at 125 MHz that is a 25 MHz pixel clock.
        hstx.csr().write(|w| w.bits(0));
        hstx.csr().write(|w| {
            w.expand_en()
                .set_bit()
                .clkdiv()
                .bits(5)
                .n_shifts()
                .bits(5)
                .shift()
                .bits(2)
                .en()
                .set_bit()
        });
        hstx.bit0().write(|w| w.bits(output_bit_config(0)));
        hstx.bit1().write(|w| w.bits(output_bit_config(1)));
        hstx.bit2().write(|w| w.bits(output_bit_config(2)));
        hstx.bit3().write(|w| w.bits(output_bit_config(3)));
        hstx.bit4().write(|w| w.bits(output_bit_config(4)));
        hstx.bit5().write(|w| w.bits(output_bit_config(5)));
        hstx.bit6().write(|w| w.bits(output_bit_config(6)));
        hstx.bit7().write(|w| w.bits(output_bit_config(7)));
    }
}

/// Select fields routing TMDS lane `lane` to an output bit.
///
/// `SEL_P` (bits 4:0) takes shift register bit `lane * 10` in the first
/// half of each clock cycle and `SEL_N` (bits 12:8) takes the bit above in
/// the second half, which is the lane's DDR data.
const fn lane_sel(lane: u32) -> u32 {
    (lane * 10) | ((lane * 10 + 1) << 8)
}

/// Routing value for HSTX output bit `bit`, which drives GPIO `12 + bit`.
///
/// The Metro RP2350 wires GPIO 12 to 19 to its HDMI socket as D2+, D2-,
/// CK+, CK-, D1+, D1-, D0+, D0-. Even bits carry the positive half of a
/// pair and the next bit up repeats it inverted.
const fn output_bit_config(bit: usize) -> u32 {
    let invert = if bit % 2 == 1 { BIT_INV } else { 0 };
    match bit / 2 {
        0 => lane_sel(2) | invert, // GPIO 12/13: TMDS lane 2 (red)
        1 => BIT_CLK | invert,     // GPIO 14/15: pixel clock
        2 => lane_sel(1) | invert, // GPIO 16/17: TMDS lane 1 (green)
        _ => lane_sel(0) | invert, // GPIO 18/19: TMDS lane 0 (blue)
    }
}

/// Hand GPIO 12 to 19 over to the HSTX.
///
/// The HAL's `Pins` table has no HSTX function, so the pads are set up by
/// hand. RP2350 pads come up isolated; isolation is removed last, once the
/// function select is in place.
fn configure_pins(pads: &PADS_BANK0, io: &IO_BANK0) {
    for pin in 12..20 {
        pads.gpio(pin)
            .modify(|_, w| w.ie().set_bit().od().clear_bit());
        unsafe {
            io.gpio(pin)
                .gpio_ctrl()
                .write(|w| w.funcsel().bits(FUNCTION_HSTX));
        }
        pads.gpio(pin).modify(|_, w| w.iso().clear_bit());
    }
}

/// Set up both scanline DMA channels and their completion interrupt.
unsafe fn configure_dma(dma: &DMA, hstx_fifo: &HSTX_FIFO) {
    // Both channels start out cued with a vsync-off blanking line, which is
    // what lines 0 and 1 of the frame need. The feeder takes over from line
    // 2 at the first completion interrupt.
    let first = Transfer::from_words(&cmdlist::VBLANK_SYNC_OFF);
    unsafe {
        for i in 0..2 {
            let ch = dma.ch(i);
            ch.ch_read_addr().write(|w| w.bits(first.addr() as u32));
            ch.ch_write_addr()
                .write(|w| w.bits(hstx_fifo.fifo().as_ptr() as u32));
            ch.ch_trans_count().write(|w| w.bits(first.words()));
            ch.ch_al1_ctrl().write(|w| {
                w.chain_to()
                    .bits((i ^ 1) as u8)
                    .data_size()
                    .bits(2)
                    .incr_read()
                    .set_bit()
                    .treq_sel()
                    .bits(DREQ_HSTX)
                    .en()
                    .set_bit()
            });
        }
        dma.ints0().write(|w| w.ints0().bits(3));
        dma.inte0().write(|w| w.inte0().bits(3));
    }
}

impl LineSink for DmaLineSink {
    fn submit(&mut self, channel: Channel, transfer: Transfer) {
        let index = channel.index();
        let ch = self.dma.ch(index);
        unsafe {
            // Acknowledge first; the other channel's completion must not be
            // lost while this one is reprogrammed.
            self.dma.intr().write(|w| w.bits(1 << index));
            ch.ch_read_addr().write(|w| w.bits(transfer.addr() as u32));
            ch.ch_trans_count().write(|w| w.bits(transfer.words()));
            // No trigger: the other channel's CHAIN_TO starts this one when
            // the time comes.
        }
    }
}

// In Rust 2024, this would need to be marked unsafe, but the cortex-m-rt
// crate won't accept it. So 2021 it is.
#[link_section = ".data"]
#[interrupt]
fn DMA_IRQ_0() {
    let mut sink = DmaLineSink {
        dma: unsafe { Peripherals::steal() }.DMA,
    };
    let feeder = unsafe { &mut *VIDEO_FEEDER.0.get() };
    feeder.on_transfer_complete(&mut sink);
}

// -----------------------------------------------------------------------------
// End of file
// -----------------------------------------------------------------------------
