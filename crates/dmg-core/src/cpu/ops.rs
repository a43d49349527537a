//! Primary opcode page: fixed 256-entry dispatch table built once at
//! startup. Each entry carries the handler, the base cycle cost, and a
//! mnemonic for diagnostics. Slots with no defined instruction hold the
//! `unknown` handler, which reports through the CPU's observer and
//! consumes no operand bytes.

use std::sync::OnceLock;

use crate::bus::Bus;

use super::alu;
use super::cpu::{Cpu, R8};
use super::registers::Flags;

pub(super) type Handler = fn(&mut Cpu, &mut Bus, u8) -> u32;

pub struct OpDesc {
    pub mnemonic: &'static str,
    /// Cycle cost of the register-operand / branch-not-taken form.
    /// Handlers return the actual cost for (HL) operands and taken
    /// branches.
    pub cycles: u32,
    pub(super) exec: Handler,
}

static TABLE: OnceLock<[OpDesc; 256]> = OnceLock::new();

pub(super) fn table() -> &'static [OpDesc; 256] {
    TABLE.get_or_init(build)
}

pub fn mnemonic(opcode: u8) -> &'static str {
    table()[opcode as usize].mnemonic
}

/// Cycle cost of the register-operand / branch-not-taken form.
pub fn base_cycles(opcode: u8) -> u32 {
    table()[opcode as usize].cycles
}

fn build() -> [OpDesc; 256] {
    std::array::from_fn(|i| {
        let opcode = i as u8;
        let (cycles, exec) = decode(opcode);
        OpDesc {
            mnemonic: MNEMONICS[i],
            cycles,
            exec,
        }
    })
}

#[rustfmt::skip]
static MNEMONICS: [&str; 256] = [
    // 0x00
    "NOP", "LD BC,d16", "LD (BC),A", "INC BC", "INC B", "DEC B", "LD B,d8", "RLCA",
    "LD (a16),SP", "ADD HL,BC", "LD A,(BC)", "DEC BC", "INC C", "DEC C", "LD C,d8", "RRCA",
    // 0x10
    "STOP", "LD DE,d16", "LD (DE),A", "INC DE", "INC D", "DEC D", "LD D,d8", "RLA",
    "JR e8", "ADD HL,DE", "LD A,(DE)", "DEC DE", "INC E", "DEC E", "LD E,d8", "RRA",
    // 0x20
    "JR NZ,e8", "LD HL,d16", "LD (HL+),A", "INC HL", "INC H", "DEC H", "LD H,d8", "DAA",
    "JR Z,e8", "ADD HL,HL", "LD A,(HL+)", "DEC HL", "INC L", "DEC L", "LD L,d8", "CPL",
    // 0x30
    "JR NC,e8", "LD SP,d16", "LD (HL-),A", "INC SP", "INC (HL)", "DEC (HL)", "LD (HL),d8", "SCF",
    "JR C,e8", "ADD HL,SP", "LD A,(HL-)", "DEC SP", "INC A", "DEC A", "LD A,d8", "CCF",
    // 0x40
    "LD B,B", "LD B,C", "LD B,D", "LD B,E", "LD B,H", "LD B,L", "LD B,(HL)", "LD B,A",
    "LD C,B", "LD C,C", "LD C,D", "LD C,E", "LD C,H", "LD C,L", "LD C,(HL)", "LD C,A",
    // 0x50
    "LD D,B", "LD D,C", "LD D,D", "LD D,E", "LD D,H", "LD D,L", "LD D,(HL)", "LD D,A",
    "LD E,B", "LD E,C", "LD E,D", "LD E,E", "LD E,H", "LD E,L", "LD E,(HL)", "LD E,A",
    // 0x60
    "LD H,B", "LD H,C", "LD H,D", "LD H,E", "LD H,H", "LD H,L", "LD H,(HL)", "LD H,A",
    "LD L,B", "LD L,C", "LD L,D", "LD L,E", "LD L,H", "LD L,L", "LD L,(HL)", "LD L,A",
    // 0x70
    "LD (HL),B", "LD (HL),C", "LD (HL),D", "LD (HL),E", "LD (HL),H", "LD (HL),L", "HALT", "LD (HL),A",
    "LD A,B", "LD A,C", "LD A,D", "LD A,E", "LD A,H", "LD A,L", "LD A,(HL)", "LD A,A",
    // 0x80
    "ADD A,B", "ADD A,C", "ADD A,D", "ADD A,E", "ADD A,H", "ADD A,L", "ADD A,(HL)", "ADD A,A",
    "ADC A,B", "ADC A,C", "ADC A,D", "ADC A,E", "ADC A,H", "ADC A,L", "ADC A,(HL)", "ADC A,A",
    // 0x90
    "SUB B", "SUB C", "SUB D", "SUB E", "SUB H", "SUB L", "SUB (HL)", "SUB A",
    "SBC A,B", "SBC A,C", "SBC A,D", "SBC A,E", "SBC A,H", "SBC A,L", "SBC A,(HL)", "SBC A,A",
    // 0xA0
    "AND B", "AND C", "AND D", "AND E", "AND H", "AND L", "AND (HL)", "AND A",
    "XOR B", "XOR C", "XOR D", "XOR E", "XOR H", "XOR L", "XOR (HL)", "XOR A",
    // 0xB0
    "OR B", "OR C", "OR D", "OR E", "OR H", "OR L", "OR (HL)", "OR A",
    "CP B", "CP C", "CP D", "CP E", "CP H", "CP L", "CP (HL)", "CP A",
    // 0xC0
    "RET NZ", "POP BC", "JP NZ,a16", "JP a16", "CALL NZ,a16", "PUSH BC", "ADD A,d8", "RST 00H",
    "RET Z", "RET", "JP Z,a16", "PREFIX CB", "CALL Z,a16", "CALL a16", "ADC A,d8", "RST 08H",
    // 0xD0
    "RET NC", "POP DE", "JP NC,a16", "???", "CALL NC,a16", "PUSH DE", "SUB d8", "RST 10H",
    "RET C", "RETI", "JP C,a16", "???", "CALL C,a16", "???", "SBC A,d8", "RST 18H",
    // 0xE0
    "LDH (a8),A", "POP HL", "LD (C),A", "???", "???", "PUSH HL", "AND d8", "RST 20H",
    "ADD SP,e8", "JP HL", "LD (a16),A", "???", "???", "???", "XOR d8", "RST 28H",
    // 0xF0
    "LDH A,(a8)", "POP AF", "LD A,(C)", "DI", "???", "PUSH AF", "OR d8", "RST 30H",
    "LD HL,SP+e8", "LD SP,HL", "LD A,(a16)", "EI", "???", "???", "CP d8", "RST 38H",
];

fn decode(opcode: u8) -> (u32, Handler) {
    match opcode {
        0x00 => (4, nop),
        0x01 | 0x11 | 0x21 | 0x31 => (12, ld_rr_d16),
        0x02 | 0x12 => (8, ld_rr_a),
        0x03 | 0x13 | 0x23 | 0x33 => (8, inc_rr),
        0x04 | 0x0C | 0x14 | 0x1C | 0x24 | 0x2C | 0x34 | 0x3C => (4, inc_r),
        0x05 | 0x0D | 0x15 | 0x1D | 0x25 | 0x2D | 0x35 | 0x3D => (4, dec_r),
        0x06 | 0x0E | 0x16 | 0x1E | 0x26 | 0x2E | 0x36 | 0x3E => (8, ld_r_d8),
        0x07 => (4, rlca),
        0x08 => (20, ld_a16_sp),
        0x09 | 0x19 | 0x29 | 0x39 => (8, add_hl_rr),
        0x0A | 0x1A => (8, ld_a_rr),
        0x0B | 0x1B | 0x2B | 0x3B => (8, dec_rr),
        0x0F => (4, rrca),
        0x10 => (4, stop),
        0x17 => (4, rla),
        0x18 => (12, jr_e8),
        0x1F => (4, rra),
        0x20 | 0x28 | 0x30 | 0x38 => (8, jr_cc),
        0x22 => (8, ld_hli_a),
        0x27 => (4, daa),
        0x2A => (8, ld_a_hli),
        0x2F => (4, cpl),
        0x32 => (8, ld_hld_a),
        0x37 => (4, scf),
        0x3A => (8, ld_a_hld),
        0x3F => (4, ccf),
        0x76 => (4, halt),
        0x40..=0x7F => (4, ld_r_r),
        0x80..=0xBF => (4, alu_a_r),
        0xC0 | 0xC8 | 0xD0 | 0xD8 => (8, ret_cc),
        0xC1 | 0xD1 | 0xE1 | 0xF1 => (12, pop_rr),
        0xC2 | 0xCA | 0xD2 | 0xDA => (12, jp_cc),
        0xC3 => (16, jp_a16),
        0xC4 | 0xCC | 0xD4 | 0xDC => (12, call_cc),
        0xC5 | 0xD5 | 0xE5 | 0xF5 => (16, push_rr),
        0xC6 | 0xCE | 0xD6 | 0xDE | 0xE6 | 0xEE | 0xF6 | 0xFE => (8, alu_a_d8),
        0xC7 | 0xCF | 0xD7 | 0xDF | 0xE7 | 0xEF | 0xF7 | 0xFF => (16, rst),
        0xC9 => (16, ret),
        // 0xCB is intercepted by Cpu::step before table dispatch.
        0xCB => (4, nop),
        0xCD => (24, call_a16),
        0xD9 => (16, reti),
        0xE0 => (12, ldh_a8_a),
        0xE2 => (8, ldh_c_a),
        0xE8 => (16, add_sp_e8),
        0xE9 => (4, jp_hl),
        0xEA => (16, ld_a16_a),
        0xF0 => (12, ldh_a_a8),
        0xF2 => (8, ldh_a_c),
        0xF3 => (4, di),
        0xF8 => (12, ld_hl_sp_e8),
        0xF9 => (8, ld_sp_hl),
        0xFA => (16, ld_a_a16),
        0xFB => (4, ei),
        _ => (4, unknown),
    }
}

pub(super) fn r8_from_code(code: u8) -> R8 {
    match code & 0x07 {
        0 => R8::B,
        1 => R8::C,
        2 => R8::D,
        3 => R8::E,
        4 => R8::H,
        5 => R8::L,
        6 => R8::HlInd,
        _ => R8::A,
    }
}

/// BC/DE/HL/SP selection as encoded in bits 4-5.
fn read_r16(cpu: &Cpu, idx: u8) -> u16 {
    match idx & 0x03 {
        0 => cpu.regs.bc(),
        1 => cpu.regs.de(),
        2 => cpu.regs.hl(),
        _ => cpu.regs.sp,
    }
}

fn write_r16(cpu: &mut Cpu, idx: u8, v: u16) {
    match idx & 0x03 {
        0 => cpu.regs.set_bc(v),
        1 => cpu.regs.set_de(v),
        2 => cpu.regs.set_hl(v),
        _ => cpu.regs.sp = v,
    }
}

/// Condition field shared by JR/JP/CALL/RET cc (bits 3-4).
fn cond(cpu: &Cpu, opcode: u8) -> bool {
    match (opcode >> 3) & 0x03 {
        0 => !cpu.regs.test(Flags::Z),
        1 => cpu.regs.test(Flags::Z),
        2 => !cpu.regs.test(Flags::C),
        _ => cpu.regs.test(Flags::C),
    }
}

fn nop(_cpu: &mut Cpu, _bus: &mut Bus, _opcode: u8) -> u32 {
    4
}

/// Opcode with no defined mapping: report it with the address it was
/// fetched from and make forward progress without consuming operands.
fn unknown(cpu: &mut Cpu, _bus: &mut Bus, opcode: u8) -> u32 {
    let pc = cpu.regs.pc.wrapping_sub(1);
    cpu.report_unknown(opcode, pc);
    4
}

/// HALT: the low-power state is not modeled yet; surface the opcode and
/// keep fetching.
fn halt(cpu: &mut Cpu, _bus: &mut Bus, opcode: u8) -> u32 {
    let pc = cpu.regs.pc.wrapping_sub(1);
    cpu.report_unknown(opcode, pc);
    4
}

/// STOP: reported like HALT, but the two-byte encoding means the operand
/// byte must still be consumed so PC stays aligned with the instruction
/// stream.
fn stop(cpu: &mut Cpu, bus: &mut Bus, opcode: u8) -> u32 {
    let pc = cpu.regs.pc.wrapping_sub(1);
    cpu.report_unknown(opcode, pc);
    let _ = cpu.fetch8(bus);
    4
}

fn ld_rr_d16(cpu: &mut Cpu, bus: &mut Bus, opcode: u8) -> u32 {
    let v = cpu.fetch16(bus);
    write_r16(cpu, (opcode >> 4) & 0x03, v);
    12
}

fn ld_a16_sp(cpu: &mut Cpu, bus: &mut Bus, _opcode: u8) -> u32 {
    let addr = cpu.fetch16(bus);
    let [lo, hi] = cpu.regs.sp.to_le_bytes();
    bus.write8(addr, lo);
    bus.write8(addr.wrapping_add(1), hi);
    20
}

fn ld_rr_a(cpu: &mut Cpu, bus: &mut Bus, opcode: u8) -> u32 {
    let addr = if opcode == 0x02 {
        cpu.regs.bc()
    } else {
        cpu.regs.de()
    };
    bus.write8(addr, cpu.regs.a());
    8
}

fn ld_a_rr(cpu: &mut Cpu, bus: &mut Bus, opcode: u8) -> u32 {
    let addr = if opcode == 0x0A {
        cpu.regs.bc()
    } else {
        cpu.regs.de()
    };
    let v = bus.read8(addr);
    cpu.regs.set_a(v);
    8
}

fn ld_hli_a(cpu: &mut Cpu, bus: &mut Bus, _opcode: u8) -> u32 {
    let addr = cpu.regs.hl();
    bus.write8(addr, cpu.regs.a());
    cpu.regs.set_hl(addr.wrapping_add(1));
    8
}

fn ld_hld_a(cpu: &mut Cpu, bus: &mut Bus, _opcode: u8) -> u32 {
    let addr = cpu.regs.hl();
    bus.write8(addr, cpu.regs.a());
    cpu.regs.set_hl(addr.wrapping_sub(1));
    8
}

fn ld_a_hli(cpu: &mut Cpu, bus: &mut Bus, _opcode: u8) -> u32 {
    let addr = cpu.regs.hl();
    let v = bus.read8(addr);
    cpu.regs.set_a(v);
    cpu.regs.set_hl(addr.wrapping_add(1));
    8
}

fn ld_a_hld(cpu: &mut Cpu, bus: &mut Bus, _opcode: u8) -> u32 {
    let addr = cpu.regs.hl();
    let v = bus.read8(addr);
    cpu.regs.set_a(v);
    cpu.regs.set_hl(addr.wrapping_sub(1));
    8
}

fn inc_rr(cpu: &mut Cpu, _bus: &mut Bus, opcode: u8) -> u32 {
    let idx = (opcode >> 4) & 0x03;
    let v = alu::inc16(read_r16(cpu, idx));
    write_r16(cpu, idx, v);
    8
}

fn dec_rr(cpu: &mut Cpu, _bus: &mut Bus, opcode: u8) -> u32 {
    let idx = (opcode >> 4) & 0x03;
    let v = alu::dec16(read_r16(cpu, idx));
    write_r16(cpu, idx, v);
    8
}

fn inc_r(cpu: &mut Cpu, bus: &mut Bus, opcode: u8) -> u32 {
    let r = r8_from_code((opcode >> 3) & 0x07);
    let v = cpu.read_r8(bus, r);
    let res = alu::inc8(&mut cpu.regs, v);
    cpu.write_r8(bus, r, res);
    if r == R8::HlInd {
        12
    } else {
        4
    }
}

fn dec_r(cpu: &mut Cpu, bus: &mut Bus, opcode: u8) -> u32 {
    let r = r8_from_code((opcode >> 3) & 0x07);
    let v = cpu.read_r8(bus, r);
    let res = alu::dec8(&mut cpu.regs, v);
    cpu.write_r8(bus, r, res);
    if r == R8::HlInd {
        12
    } else {
        4
    }
}

fn ld_r_d8(cpu: &mut Cpu, bus: &mut Bus, opcode: u8) -> u32 {
    let r = r8_from_code((opcode >> 3) & 0x07);
    let v = cpu.fetch8(bus);
    cpu.write_r8(bus, r, v);
    if r == R8::HlInd {
        12
    } else {
        8
    }
}

fn ld_r_r(cpu: &mut Cpu, bus: &mut Bus, opcode: u8) -> u32 {
    let dst = r8_from_code((opcode >> 3) & 0x07);
    let src = r8_from_code(opcode & 0x07);
    let v = cpu.read_r8(bus, src);
    cpu.write_r8(bus, dst, v);
    if dst == R8::HlInd || src == R8::HlInd {
        8
    } else {
        4
    }
}

fn rlca(cpu: &mut Cpu, _bus: &mut Bus, _opcode: u8) -> u32 {
    let a = cpu.regs.a();
    let res = alu::rlc(&mut cpu.regs, a);
    cpu.regs.set_a(res);
    4
}

fn rrca(cpu: &mut Cpu, _bus: &mut Bus, _opcode: u8) -> u32 {
    let a = cpu.regs.a();
    let res = alu::rrc(&mut cpu.regs, a);
    cpu.regs.set_a(res);
    4
}

fn rla(cpu: &mut Cpu, _bus: &mut Bus, _opcode: u8) -> u32 {
    let a = cpu.regs.a();
    let res = alu::rl(&mut cpu.regs, a);
    cpu.regs.set_a(res);
    cpu.regs.clear(Flags::Z);
    4
}

fn rra(cpu: &mut Cpu, _bus: &mut Bus, _opcode: u8) -> u32 {
    let a = cpu.regs.a();
    let res = alu::rr(&mut cpu.regs, a);
    cpu.regs.set_a(res);
    cpu.regs.clear(Flags::Z);
    4
}

fn add_hl_rr(cpu: &mut Cpu, _bus: &mut Bus, opcode: u8) -> u32 {
    let hl = cpu.regs.hl();
    let rr = read_r16(cpu, (opcode >> 4) & 0x03);
    let res = alu::add16(&mut cpu.regs, hl, rr);
    cpu.regs.set_hl(res);
    8
}

fn jr_e8(cpu: &mut Cpu, bus: &mut Bus, _opcode: u8) -> u32 {
    let off = cpu.fetch8(bus) as i8;
    cpu.regs.pc = cpu.regs.pc.wrapping_add(off as u16);
    12
}

fn jr_cc(cpu: &mut Cpu, bus: &mut Bus, opcode: u8) -> u32 {
    let off = cpu.fetch8(bus) as i8;
    if cond(cpu, opcode) {
        cpu.regs.pc = cpu.regs.pc.wrapping_add(off as u16);
        12
    } else {
        8
    }
}

fn daa(cpu: &mut Cpu, _bus: &mut Bus, _opcode: u8) -> u32 {
    let a = cpu.regs.a();
    let res = alu::daa(&mut cpu.regs, a);
    cpu.regs.set_a(res);
    4
}

fn cpl(cpu: &mut Cpu, _bus: &mut Bus, _opcode: u8) -> u32 {
    cpu.regs.set_a(!cpu.regs.a());
    cpu.regs.set(Flags::N);
    cpu.regs.set(Flags::H);
    4
}

fn scf(cpu: &mut Cpu, _bus: &mut Bus, _opcode: u8) -> u32 {
    cpu.regs.clear(Flags::N);
    cpu.regs.clear(Flags::H);
    cpu.regs.set(Flags::C);
    4
}

fn ccf(cpu: &mut Cpu, _bus: &mut Bus, _opcode: u8) -> u32 {
    let c = cpu.regs.test(Flags::C);
    cpu.regs.clear(Flags::N);
    cpu.regs.clear(Flags::H);
    cpu.regs.set_if(Flags::C, !c);
    4
}

fn apply_alu_a(cpu: &mut Cpu, family: u8, v: u8) {
    let a = cpu.regs.a();
    let carry = cpu.regs.test(Flags::C) as u8;
    match family & 0x07 {
        0 => {
            let res = alu::add8(&mut cpu.regs, a, v, 0);
            cpu.regs.set_a(res);
        }
        1 => {
            let res = alu::add8(&mut cpu.regs, a, v, carry);
            cpu.regs.set_a(res);
        }
        2 => {
            let res = alu::sub8(&mut cpu.regs, a, v, 0);
            cpu.regs.set_a(res);
        }
        3 => {
            let res = alu::sub8(&mut cpu.regs, a, v, carry);
            cpu.regs.set_a(res);
        }
        4 => {
            let res = alu::and8(&mut cpu.regs, a, v);
            cpu.regs.set_a(res);
        }
        5 => {
            let res = alu::xor8(&mut cpu.regs, a, v);
            cpu.regs.set_a(res);
        }
        6 => {
            let res = alu::or8(&mut cpu.regs, a, v);
            cpu.regs.set_a(res);
        }
        _ => {
            // CP: compare without writing A back.
            let _ = alu::sub8(&mut cpu.regs, a, v, 0);
        }
    }
}

fn alu_a_r(cpu: &mut Cpu, bus: &mut Bus, opcode: u8) -> u32 {
    let r = r8_from_code(opcode & 0x07);
    let v = cpu.read_r8(bus, r);
    apply_alu_a(cpu, (opcode >> 3) & 0x07, v);
    if r == R8::HlInd {
        8
    } else {
        4
    }
}

fn alu_a_d8(cpu: &mut Cpu, bus: &mut Bus, opcode: u8) -> u32 {
    let v = cpu.fetch8(bus);
    apply_alu_a(cpu, (opcode >> 3) & 0x07, v);
    8
}

fn jp_a16(cpu: &mut Cpu, bus: &mut Bus, _opcode: u8) -> u32 {
    cpu.regs.pc = cpu.fetch16(bus);
    16
}

fn jp_cc(cpu: &mut Cpu, bus: &mut Bus, opcode: u8) -> u32 {
    let addr = cpu.fetch16(bus);
    if cond(cpu, opcode) {
        cpu.regs.pc = addr;
        16
    } else {
        12
    }
}

fn jp_hl(cpu: &mut Cpu, _bus: &mut Bus, _opcode: u8) -> u32 {
    cpu.regs.pc = cpu.regs.hl();
    4
}

fn call_a16(cpu: &mut Cpu, bus: &mut Bus, _opcode: u8) -> u32 {
    let addr = cpu.fetch16(bus);
    let pc = cpu.regs.pc;
    cpu.push16(bus, pc);
    cpu.regs.pc = addr;
    24
}

fn call_cc(cpu: &mut Cpu, bus: &mut Bus, opcode: u8) -> u32 {
    let addr = cpu.fetch16(bus);
    if cond(cpu, opcode) {
        let pc = cpu.regs.pc;
        cpu.push16(bus, pc);
        cpu.regs.pc = addr;
        24
    } else {
        12
    }
}

fn ret(cpu: &mut Cpu, bus: &mut Bus, _opcode: u8) -> u32 {
    cpu.regs.pc = cpu.pop16(bus);
    16
}

fn ret_cc(cpu: &mut Cpu, bus: &mut Bus, opcode: u8) -> u32 {
    if cond(cpu, opcode) {
        cpu.regs.pc = cpu.pop16(bus);
        20
    } else {
        8
    }
}

fn reti(cpu: &mut Cpu, bus: &mut Bus, _opcode: u8) -> u32 {
    cpu.regs.pc = cpu.pop16(bus);
    cpu.ime = true;
    16
}

fn rst(cpu: &mut Cpu, bus: &mut Bus, opcode: u8) -> u32 {
    let vec = u16::from(opcode & 0x38);
    let pc = cpu.regs.pc;
    cpu.push16(bus, pc);
    cpu.regs.pc = vec;
    16
}

fn push_rr(cpu: &mut Cpu, bus: &mut Bus, opcode: u8) -> u32 {
    let v = match (opcode >> 4) & 0x03 {
        0 => cpu.regs.bc(),
        1 => cpu.regs.de(),
        2 => cpu.regs.hl(),
        _ => cpu.regs.af(),
    };
    cpu.push16(bus, v);
    16
}

fn pop_rr(cpu: &mut Cpu, bus: &mut Bus, opcode: u8) -> u32 {
    let v = cpu.pop16(bus);
    match (opcode >> 4) & 0x03 {
        0 => cpu.regs.set_bc(v),
        1 => cpu.regs.set_de(v),
        2 => cpu.regs.set_hl(v),
        _ => cpu.regs.set_af(v),
    }
    12
}

fn ldh_a8_a(cpu: &mut Cpu, bus: &mut Bus, _opcode: u8) -> u32 {
    let n = u16::from(cpu.fetch8(bus));
    bus.write8(0xFF00 | n, cpu.regs.a());
    12
}

fn ldh_a_a8(cpu: &mut Cpu, bus: &mut Bus, _opcode: u8) -> u32 {
    let n = u16::from(cpu.fetch8(bus));
    let v = bus.read8(0xFF00 | n);
    cpu.regs.set_a(v);
    12
}

fn ldh_c_a(cpu: &mut Cpu, bus: &mut Bus, _opcode: u8) -> u32 {
    let addr = 0xFF00 | u16::from(cpu.regs.c());
    bus.write8(addr, cpu.regs.a());
    8
}

fn ldh_a_c(cpu: &mut Cpu, bus: &mut Bus, _opcode: u8) -> u32 {
    let addr = 0xFF00 | u16::from(cpu.regs.c());
    let v = bus.read8(addr);
    cpu.regs.set_a(v);
    8
}

fn ld_a16_a(cpu: &mut Cpu, bus: &mut Bus, _opcode: u8) -> u32 {
    let addr = cpu.fetch16(bus);
    bus.write8(addr, cpu.regs.a());
    16
}

fn ld_a_a16(cpu: &mut Cpu, bus: &mut Bus, _opcode: u8) -> u32 {
    let addr = cpu.fetch16(bus);
    let v = bus.read8(addr);
    cpu.regs.set_a(v);
    16
}

fn di(cpu: &mut Cpu, _bus: &mut Bus, _opcode: u8) -> u32 {
    cpu.ime = false;
    4
}

fn ei(cpu: &mut Cpu, _bus: &mut Bus, _opcode: u8) -> u32 {
    cpu.ime = true;
    4
}

fn add_sp_e8(cpu: &mut Cpu, bus: &mut Bus, _opcode: u8) -> u32 {
    let e = cpu.fetch8(bus) as i8;
    let sp = cpu.regs.sp;
    cpu.regs.sp = alu::add_sp_e8(&mut cpu.regs, sp, e);
    16
}

fn ld_hl_sp_e8(cpu: &mut Cpu, bus: &mut Bus, _opcode: u8) -> u32 {
    let e = cpu.fetch8(bus) as i8;
    let sp = cpu.regs.sp;
    let res = alu::add_sp_e8(&mut cpu.regs, sp, e);
    cpu.regs.set_hl(res);
    12
}

fn ld_sp_hl(cpu: &mut Cpu, _bus: &mut Bus, _opcode: u8) -> u32 {
    cpu.regs.sp = cpu.regs.hl();
    8
}
