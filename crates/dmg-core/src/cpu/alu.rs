//! Flag computation for arithmetic, logic, and rotate operations.
//!
//! Every function here recomputes all the flags its operation affects from
//! scratch on every call; flags are never incrementally patched. Carry is
//! deliberately untouched by 8-bit INC/DEC, and 16-bit INC/DEC touch no
//! flags at all; both asymmetries are documented hardware behavior.

use super::registers::{Flags, Registers};

/// 8-bit increment. Z/N/H updated, C preserved.
pub fn inc8(r: &mut Registers, v: u8) -> u8 {
    let res = v.wrapping_add(1);
    r.set_if(Flags::Z, res == 0);
    r.clear(Flags::N);
    r.set_if(Flags::H, (v & 0x0F) == 0x0F);
    res
}

/// 8-bit decrement. Z/N/H updated, C preserved.
///
/// Half-carry means a borrow out of bit 4, i.e. the low nibble was zero
/// before the decrement.
pub fn dec8(r: &mut Registers, v: u8) -> u8 {
    let res = v.wrapping_sub(1);
    r.set_if(Flags::Z, res == 0);
    r.set(Flags::N);
    r.set_if(Flags::H, (v & 0x0F) == 0x00);
    res
}

/// 16-bit increment. Touches no flags.
pub fn inc16(v: u16) -> u16 {
    v.wrapping_add(1)
}

/// 16-bit decrement. Touches no flags.
pub fn dec16(v: u16) -> u16 {
    v.wrapping_sub(1)
}

/// 16-bit addition (ADD HL,rr class). N/H/C updated, Z preserved.
pub fn add16(r: &mut Registers, a: u16, b: u16) -> u16 {
    let sum = u32::from(a) + u32::from(b);
    r.clear(Flags::N);
    r.set_if(Flags::H, ((a & 0x0FFF) + (b & 0x0FFF)) > 0x0FFF);
    r.set_if(Flags::C, sum > 0xFFFF);
    sum as u16
}

/// 8-bit add with optional carry-in (ADD/ADC).
pub fn add8(r: &mut Registers, a: u8, b: u8, carry_in: u8) -> u8 {
    let sum = u16::from(a) + u16::from(b) + u16::from(carry_in);
    let res = sum as u8;
    r.set_if(Flags::Z, res == 0);
    r.clear(Flags::N);
    r.set_if(Flags::H, ((a & 0x0F) + (b & 0x0F) + carry_in) > 0x0F);
    r.set_if(Flags::C, sum > 0xFF);
    res
}

/// 8-bit subtract with optional borrow-in (SUB/SBC/CP).
pub fn sub8(r: &mut Registers, a: u8, b: u8, carry_in: u8) -> u8 {
    let res = a.wrapping_sub(b).wrapping_sub(carry_in);
    r.set_if(Flags::Z, res == 0);
    r.set(Flags::N);
    r.set_if(Flags::H, (a & 0x0F) < (b & 0x0F) + carry_in);
    r.set_if(Flags::C, u16::from(a) < u16::from(b) + u16::from(carry_in));
    res
}

pub fn and8(r: &mut Registers, a: u8, b: u8) -> u8 {
    let res = a & b;
    r.set_if(Flags::Z, res == 0);
    r.clear(Flags::N);
    r.set(Flags::H);
    r.clear(Flags::C);
    res
}

pub fn xor8(r: &mut Registers, a: u8, b: u8) -> u8 {
    let res = a ^ b;
    r.set_if(Flags::Z, res == 0);
    r.clear(Flags::N);
    r.clear(Flags::H);
    r.clear(Flags::C);
    res
}

pub fn or8(r: &mut Registers, a: u8, b: u8) -> u8 {
    let res = a | b;
    r.set_if(Flags::Z, res == 0);
    r.clear(Flags::N);
    r.clear(Flags::H);
    r.clear(Flags::C);
    res
}

/// Rotate left circular: bit 7 re-enters at bit 0 and lands in C.
pub fn rlc(r: &mut Registers, v: u8) -> u8 {
    let res = v.rotate_left(1);
    r.set_if(Flags::Z, res == 0);
    r.clear(Flags::N);
    r.clear(Flags::H);
    r.set_if(Flags::C, (v & 0x80) != 0);
    res
}

/// Rotate right circular: bit 0 re-enters at bit 7 and lands in C.
pub fn rrc(r: &mut Registers, v: u8) -> u8 {
    let res = v.rotate_right(1);
    r.set_if(Flags::Z, res == 0);
    r.clear(Flags::N);
    r.clear(Flags::H);
    r.set_if(Flags::C, (v & 0x01) != 0);
    res
}

/// Rotate left through carry.
pub fn rl(r: &mut Registers, v: u8) -> u8 {
    let carry_in = r.test(Flags::C) as u8;
    let res = (v << 1) | carry_in;
    r.set_if(Flags::Z, res == 0);
    r.clear(Flags::N);
    r.clear(Flags::H);
    r.set_if(Flags::C, (v & 0x80) != 0);
    res
}

/// Rotate right through carry.
pub fn rr(r: &mut Registers, v: u8) -> u8 {
    let carry_in = (r.test(Flags::C) as u8) << 7;
    let res = (v >> 1) | carry_in;
    r.set_if(Flags::Z, res == 0);
    r.clear(Flags::N);
    r.clear(Flags::H);
    r.set_if(Flags::C, (v & 0x01) != 0);
    res
}

/// Shift left arithmetic; bit 0 becomes zero.
pub fn sla(r: &mut Registers, v: u8) -> u8 {
    let res = v << 1;
    r.set_if(Flags::Z, res == 0);
    r.clear(Flags::N);
    r.clear(Flags::H);
    r.set_if(Flags::C, (v & 0x80) != 0);
    res
}

/// Shift right arithmetic; bit 7 is duplicated.
pub fn sra(r: &mut Registers, v: u8) -> u8 {
    let res = (v >> 1) | (v & 0x80);
    r.set_if(Flags::Z, res == 0);
    r.clear(Flags::N);
    r.clear(Flags::H);
    r.set_if(Flags::C, (v & 0x01) != 0);
    res
}

/// Swap nibbles.
pub fn swap(r: &mut Registers, v: u8) -> u8 {
    let res = v.rotate_right(4);
    r.set_if(Flags::Z, res == 0);
    r.clear(Flags::N);
    r.clear(Flags::H);
    r.clear(Flags::C);
    res
}

/// Shift right logical; bit 7 becomes zero.
pub fn srl(r: &mut Registers, v: u8) -> u8 {
    let res = v >> 1;
    r.set_if(Flags::Z, res == 0);
    r.clear(Flags::N);
    r.clear(Flags::H);
    r.set_if(Flags::C, (v & 0x01) != 0);
    res
}

/// BIT b,r: Z from the tested bit, C preserved.
pub fn bit(r: &mut Registers, v: u8, b: u8) {
    r.set_if(Flags::Z, (v & (1 << b)) == 0);
    r.clear(Flags::N);
    r.set(Flags::H);
}

/// Signed offset addition to SP (ADD SP,e8 / LD HL,SP+e8 class). H and C
/// come from the low-byte addition.
pub fn add_sp_e8(r: &mut Registers, sp: u16, e: i8) -> u16 {
    let e_u = e as u16;
    r.clear(Flags::Z);
    r.clear(Flags::N);
    r.set_if(Flags::H, ((sp & 0x0F) + (e_u & 0x0F)) > 0x0F);
    r.set_if(Flags::C, ((sp & 0xFF) + (e_u & 0xFF)) > 0xFF);
    sp.wrapping_add(e_u)
}

/// Decimal adjust after BCD arithmetic.
pub fn daa(r: &mut Registers, a: u8) -> u8 {
    let mut a = a;
    let mut adjust = 0u8;
    let mut c = r.test(Flags::C);

    if !r.test(Flags::N) {
        if r.test(Flags::H) || (a & 0x0F) > 0x09 {
            adjust |= 0x06;
        }
        if c || a > 0x99 {
            adjust |= 0x60;
            c = true;
        }
        a = a.wrapping_add(adjust);
    } else {
        if r.test(Flags::H) {
            adjust |= 0x06;
        }
        if c {
            adjust |= 0x60;
        }
        a = a.wrapping_sub(adjust);
    }

    r.set_if(Flags::Z, a == 0);
    r.clear(Flags::H);
    r.set_if(Flags::C, c);
    a
}
