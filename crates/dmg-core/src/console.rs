use serde::{Deserialize, Serialize};

use crate::bus::{Bus, InitError};
use crate::cartridge::header::Model;
use crate::cartridge::Cartridge;
use crate::cpu::Cpu;

/// Master clock rate in Hz.
pub const CLOCK_HZ: u32 = 4_194_304;

/// Cycle budget of one emulated video frame at the 60 Hz target rate.
pub const CYCLES_PER_FRAME: u32 = CLOCK_HZ / 60;

/// One emulated session: CPU, bus, and the per-frame cycle counter.
///
/// Sessions are self-contained; any number of them can run side by side.
/// All methods are synchronous and run to completion, so a session must
/// only ever be driven from one thread at a time.
#[derive(Serialize, Deserialize)]
pub struct Console {
    pub cpu: Cpu,
    pub bus: Bus,
    frame_cycles: u32,
}

impl Console {
    /// Builds a session for the model declared in the ROM header and
    /// resets the register file to its power-on values.
    pub fn new(cart: Cartridge) -> Result<Self, InitError> {
        let model = cart.header.model;
        Self::with_model(cart, model)
    }

    /// Same as [`Console::new`] but with the model forced, e.g. to run a
    /// color-flagged ROM on the base hardware profile.
    pub fn with_model(cart: Cartridge, model: Model) -> Result<Self, InitError> {
        Ok(Self {
            cpu: Cpu::new(),
            bus: Bus::new(cart, model)?,
            frame_cycles: 0,
        })
    }

    pub fn model(&self) -> Model {
        self.bus.model
    }

    /// Executes one instruction and accrues its cycles toward the current
    /// frame.
    pub fn step(&mut self) -> u32 {
        let cycles = self.cpu.step(&mut self.bus);
        self.frame_cycles += cycles;
        cycles
    }

    /// Cycles consumed so far in the frame being executed. Zero right
    /// after [`Console::run_frame`] returns.
    pub fn frame_cycles(&self) -> u32 {
        self.frame_cycles
    }

    /// Consumes one frame's budget from the counter if enough cycles have
    /// accrued, returning whether a frame boundary was crossed. Hosts that
    /// drive [`Console::step`] directly call this after each step so the
    /// counter stays bounded; overshoot carries into the next frame.
    pub fn frame_elapsed(&mut self) -> bool {
        if self.frame_cycles >= CYCLES_PER_FRAME {
            self.frame_cycles -= CYCLES_PER_FRAME;
            true
        } else {
            false
        }
    }

    /// Runs until the frame cycle budget is consumed, then resets the
    /// frame counter and returns the cycles actually consumed (>= budget;
    /// the last instruction may overshoot). The host performs display,
    /// audio, and input work between calls.
    pub fn run_frame(&mut self) -> u32 {
        while self.frame_cycles < CYCLES_PER_FRAME {
            self.step();
        }
        let consumed = self.frame_cycles;
        self.frame_cycles = 0;
        consumed
    }
}
