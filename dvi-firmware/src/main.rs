//! # hstx-dvi-rs
//!
//! DVI video output for the Adafruit Metro RP2350, using the HSTX
//! peripheral.
//!
//! This is the firmware for Core 0. It brings up the clocks, starts the
//! scanline engine on Core 1 and then just blinks the LED. The interesting
//! parts are in [`video`] and in the `dvi-engine` crate.

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
#![no_main]

mod image;
mod video;

use defmt::*;
use defmt_rtt as _;
use panic_probe as _;
use rp235x_hal as hal;

use embedded_hal::digital::StatefulOutputPin;
use fugit::RateExtU32;
use hal::{
    clocks::{self, Clock},
    multicore::{Multicore, Stack},
    pac, pll,
    sio::Sio,
    xosc,
};

/// Tell the Boot ROM about our application
#[link_section = ".start_block"]
#[used]
pub static IMAGE_DEF: hal::block::ImageDef = hal::block::ImageDef::secure_exe();

/// Program metadata for `picotool info`
#[link_section = ".bi_entries"]
#[used]
pub static PICOTOOL_ENTRIES: [hal::binary_info::EntryAddr; 4] = [
    hal::binary_info::rp_program_name!(c"hstx-dvi-rs"),
    hal::binary_info::rp_cargo_version!(),
    hal::binary_info::rp_program_description!(c"DVI test card over HSTX"),
    hal::binary_info::rp_program_build_attribute!(),
];

/// The Metro RP2350 fits a 12 MHz crystal
const XOSC_CRYSTAL_FREQ: u32 = 12_000_000;

/// Stack for Core 1, which runs the scanline engine
static mut CORE1_STACK: Stack<4096> = Stack::new();

#[hal::entry]
fn main() -> ! {
    defmt::info!(
        "Firmware {} {} starting up",
        env!("CARGO_PKG_NAME"),
        env!("CARGO_PKG_VERSION")
    );

    let mut periph = pac::Peripherals::take().unwrap();
    let cm = cortex_m::Peripherals::take().unwrap();
    let mut sio = Sio::new(periph.SIO);

    defmt::info!("Configuring clocks...");

    // Run at 125 MHz SYS_PLL, 48 MHz USB_PLL. This is important: the HSTX
    // clock follows clk_sys, and shifting two bits per clock it outputs 250
    // Mbps per lane, close enough to the 252 Mbps bit clock of standard
    // 640x480 @ 60 Hz.

    // Step 1. Turn on the crystal.
    let xosc = xosc::setup_xosc_blocking(periph.XOSC, XOSC_CRYSTAL_FREQ.Hz())
        .map_err(|_x| false)
        .unwrap();
    // Step 2. Create a clocks manager.
    let mut clocks = clocks::ClocksManager::new(periph.CLOCKS);
    // Step 3. Set up the system PLL.
    //
    // We take the Crystal Oscillator (=12 MHz) with no divider, and ×125 to
    // give a FOUTVCO of 1500 MHz. This must be in the range 750 MHz - 1600
    // MHz. The factor of 125 is calculated automatically given the desired
    // FOUTVCO.
    //
    // Next we ÷6 on the first post divider to give 250 MHz.
    //
    // Finally we ÷2 on the second post divider to give 125 MHz.
    let pll_sys = pll::setup_pll_blocking(
        periph.PLL_SYS,
        xosc.operating_frequency(),
        pll::PLLConfig {
            vco_freq: 1500.MHz(),
            refdiv: 1,
            post_div1: 6,
            post_div2: 2,
        },
        &mut clocks,
        &mut periph.RESETS,
    )
    .map_err(|_x| false)
    .unwrap();
    // Step 4. Set up a 48 MHz PLL for the USB system.
    let pll_usb = pll::setup_pll_blocking(
        periph.PLL_USB,
        xosc.operating_frequency(),
        pll::common_configs::PLL_USB_48MHZ,
        &mut clocks,
        &mut periph.RESETS,
    )
    .map_err(|_x| false)
    .unwrap();
    // Step 5. Set the system to run from the PLLs we just configured.
    clocks
        .init_default(&xosc, &pll_sys, &pll_usb)
        .map_err(|_x| false)
        .unwrap();

    defmt::info!("Clocks OK!");

    defmt::info!("Configuring pins...");

    let pins = hal::gpio::Pins::new(
        periph.IO_BANK0,
        periph.PADS_BANK0,
        sio.gpio_bank0,
        &mut periph.RESETS,
    );
    let mut led = pins.gpio23.into_push_pull_output();

    defmt::info!(
        "Video mode 640x480 @ 60 Hz, {=str} test card",
        video::FORMAT_NAME
    );

    defmt::info!("Setting up Core 1");

    let mut multicore = Multicore::new(&mut periph.PSM, &mut periph.PPB, &mut sio.fifo);
    let core1 = &mut multicore.cores()[1];
    core1
        .spawn(
            unsafe {
                #[allow(static_mut_refs)]
                CORE1_STACK.take().unwrap()
            },
            move || video::core1_main(),
        )
        .expect("Spawning Core 1");

    let mut delay = cortex_m::delay::Delay::new(cm.SYST, clocks.system_clock.freq().to_Hz());

    info!("Looping...");

    let mut uptime = 0u32;
    loop {
        delay.delay_ms(1000);
        uptime += 1;
        led.toggle().unwrap();
        info!("Uptime {=u32} s", uptime);
    }
}

// End of file
