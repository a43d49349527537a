use crate::bus::Bus;
use serde::{Deserialize, Serialize};

use super::registers::Registers;
use super::{cb_ops, ops};

/// 8-bit operand position as encoded in an opcode's register field.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum R8 {
    A,
    B,
    C,
    D,
    E,
    H,
    L,
    /// Memory at address in HL.
    HlInd,
}

/// Observer invoked once per opcode with no defined mapping, carrying the
/// opcode byte and the address it was fetched from.
pub type UnknownOpcodeHook = Box<dyn FnMut(u8, u16)>;

#[derive(Serialize, Deserialize)]
pub struct Cpu {
    pub regs: Registers,
    /// Interrupt master enable latch. EI/DI/RETI maintain it; interrupt
    /// servicing itself is future work.
    pub ime: bool,
    #[serde(skip)]
    unknown_opcode_hook: Option<UnknownOpcodeHook>,
}

impl Cpu {
    pub fn new() -> Self {
        Self {
            regs: Registers::new(),
            ime: false,
            unknown_opcode_hook: None,
        }
    }

    /// Installs the unknown-opcode observer. The core itself never logs;
    /// the host decides whether to print, count, or halt.
    pub fn set_unknown_opcode_hook(&mut self, hook: impl FnMut(u8, u16) + 'static) {
        self.unknown_opcode_hook = Some(Box::new(hook));
    }

    pub fn clear_unknown_opcode_hook(&mut self) {
        self.unknown_opcode_hook = None;
    }

    pub(super) fn report_unknown(&mut self, opcode: u8, pc: u16) {
        if let Some(hook) = self.unknown_opcode_hook.as_mut() {
            hook(opcode, pc);
        }
    }

    /// Reads the byte at PC and advances PC by one, wrapping at 16 bits.
    /// The only sanctioned way PC moves during opcode/operand consumption.
    #[inline]
    pub fn fetch8(&mut self, bus: &mut Bus) -> u8 {
        let v = bus.read8(self.regs.pc);
        self.regs.pc = self.regs.pc.wrapping_add(1);
        v
    }

    /// Fetches a little-endian word: low byte first, then high. The order
    /// matters under self-modifying code, since PC must land correctly
    /// between the two fetches.
    #[inline]
    pub fn fetch16(&mut self, bus: &mut Bus) -> u16 {
        let lo = self.fetch8(bus);
        let hi = self.fetch8(bus);
        u16::from_le_bytes([lo, hi])
    }

    #[inline]
    pub fn read_r8(&mut self, bus: &mut Bus, r: R8) -> u8 {
        match r {
            R8::A => self.regs.a(),
            R8::B => self.regs.b(),
            R8::C => self.regs.c(),
            R8::D => self.regs.d(),
            R8::E => self.regs.e(),
            R8::H => self.regs.h(),
            R8::L => self.regs.l(),
            R8::HlInd => bus.read8(self.regs.hl()),
        }
    }

    #[inline]
    pub fn write_r8(&mut self, bus: &mut Bus, r: R8, v: u8) {
        match r {
            R8::A => self.regs.set_a(v),
            R8::B => self.regs.set_b(v),
            R8::C => self.regs.set_c(v),
            R8::D => self.regs.set_d(v),
            R8::E => self.regs.set_e(v),
            R8::H => self.regs.set_h(v),
            R8::L => self.regs.set_l(v),
            R8::HlInd => bus.write8(self.regs.hl(), v),
        }
    }

    #[inline]
    pub fn push16(&mut self, bus: &mut Bus, v: u16) {
        let [hi, lo] = v.to_be_bytes();
        self.regs.sp = self.regs.sp.wrapping_sub(1);
        bus.write8(self.regs.sp, hi);
        self.regs.sp = self.regs.sp.wrapping_sub(1);
        bus.write8(self.regs.sp, lo);
    }

    #[inline]
    pub fn pop16(&mut self, bus: &mut Bus) -> u16 {
        let lo = bus.read8(self.regs.sp);
        self.regs.sp = self.regs.sp.wrapping_add(1);
        let hi = bus.read8(self.regs.sp);
        self.regs.sp = self.regs.sp.wrapping_add(1);
        u16::from_be_bytes([hi, lo])
    }

    /// Fetches, decodes, and executes one instruction; returns the clock
    /// cycles it consumed. Always runs to completion; an instruction is
    /// never split across two calls.
    pub fn step(&mut self, bus: &mut Bus) -> u32 {
        let opcode = self.fetch8(bus);
        if opcode == 0xCB {
            let cb = self.fetch8(bus);
            let desc = &cb_ops::table()[cb as usize];
            (desc.exec)(self, bus, cb)
        } else {
            let desc = &ops::table()[opcode as usize];
            (desc.exec)(self, bus, opcode)
        }
    }
}

impl Default for Cpu {
    fn default() -> Self {
        Self::new()
    }
}
