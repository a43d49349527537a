use std::cell::RefCell;
use std::rc::Rc;

use dmg_core::cartridge::Cartridge;
use dmg_core::console::Console;
use dmg_core::cpu::Flags;

/// ROM-only image with `program` placed at the power-on PC (0x0100).
fn make_rom(program: &[u8]) -> Vec<u8> {
    let mut rom = vec![0u8; 0x8000];
    rom[0x0147] = 0x00; // ROM only
    rom[0x0148] = 0x00; // 32KB
    rom[0x0149] = 0x00; // No RAM
    rom[0x0100..0x0100 + program.len()].copy_from_slice(program);
    rom
}

fn setup(program: &[u8]) -> Console {
    let cart = Cartridge::from_rom(make_rom(program)).unwrap();
    Console::new(cart).unwrap()
}

fn assert_flags(console: &Console, z: bool, n: bool, h: bool, c: bool) {
    let r = &console.cpu.regs;
    assert_eq!(r.test(Flags::Z), z, "Z");
    assert_eq!(r.test(Flags::N), n, "N");
    assert_eq!(r.test(Flags::H), h, "H");
    assert_eq!(r.test(Flags::C), c, "C");
}

#[test]
fn power_on_state_matches_documented_values() {
    let console = setup(&[]);
    let r = &console.cpu.regs;
    assert_eq!(r.a(), 0x01);
    assert_eq!(r.f(), 0xB0);
    assert_eq!(r.b(), 0x00);
    assert_eq!(r.c(), 0x13);
    assert_eq!(r.d(), 0x00);
    assert_eq!(r.e(), 0xD8);
    assert_eq!(r.h(), 0x01);
    assert_eq!(r.l(), 0x4D);
    assert_eq!(r.sp, 0xFFFE);
    assert_eq!(r.pc, 0x0100);
    assert_eq!(console.frame_cycles(), 0);
    assert!(!console.cpu.ime);
}

#[test]
fn fetch16_is_little_endian_and_advances_pc_by_two() {
    let mut console = setup(&[0x34, 0x12]);
    let v = console.cpu.fetch16(&mut console.bus);
    assert_eq!(v, 0x1234);
    assert_eq!(console.cpu.regs.pc, 0x0102);
}

#[test]
fn inc_b_wraps_to_zero_and_preserves_carry() {
    let mut console = setup(&[0x04]); // INC B
    console.cpu.regs.set_b(0xFF);
    console.cpu.regs.set_if(Flags::C, true);

    let cycles = console.step();

    assert_eq!(cycles, 4);
    assert_eq!(console.cpu.regs.b(), 0x00);
    assert_flags(&console, true, false, true, true);
    assert_eq!(console.cpu.regs.pc, 0x0101);
}

#[test]
fn dec_r_sets_subtract_and_half_borrow() {
    let mut console = setup(&[0x05]); // DEC B
    console.cpu.regs.set_b(0x10);
    console.cpu.regs.set_if(Flags::C, false);

    console.step();

    assert_eq!(console.cpu.regs.b(), 0x0F);
    assert_flags(&console, false, true, true, false);
}

#[test]
fn sixteen_bit_inc_leaves_flags_alone() {
    let mut console = setup(&[0x03]); // INC BC
    console.cpu.regs.set_bc(0xFFFF);
    console.cpu.regs.set_af(0x01F0); // all four flags set

    let cycles = console.step();

    assert_eq!(cycles, 8);
    assert_eq!(console.cpu.regs.bc(), 0x0000);
    assert_eq!(console.cpu.regs.f(), 0xF0);
}

#[test]
fn unknown_opcode_is_reported_with_prefetch_pc_and_consumes_one_byte() {
    let mut console = setup(&[0xD3, 0x00]);
    let seen: Rc<RefCell<Vec<(u8, u16)>>> = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&seen);
    console
        .cpu
        .set_unknown_opcode_hook(move |opcode, pc| sink.borrow_mut().push((opcode, pc)));

    let cycles = console.step();

    assert_eq!(cycles, 4);
    assert_eq!(console.cpu.regs.pc, 0x0101);
    assert_eq!(seen.borrow().as_slice(), &[(0xD3, 0x0100)]);

    // Execution keeps making forward progress afterwards.
    console.step();
    assert_eq!(console.cpu.regs.pc, 0x0102);
    assert_eq!(seen.borrow().len(), 1);
}

#[test]
fn halt_surfaces_through_the_observer_and_falls_through() {
    let mut console = setup(&[0x76, 0x00]);
    let seen: Rc<RefCell<Vec<(u8, u16)>>> = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&seen);
    console
        .cpu
        .set_unknown_opcode_hook(move |opcode, pc| sink.borrow_mut().push((opcode, pc)));

    console.step();

    assert_eq!(seen.borrow().as_slice(), &[(0x76, 0x0100)]);
    assert_eq!(console.cpu.regs.pc, 0x0101);
}

#[test]
fn stop_consumes_its_operand_byte() {
    // STOP 0x00 ; INC B — the 0x00 operand must not execute as a NOP.
    let mut console = setup(&[0x10, 0x00, 0x04]);
    let seen: Rc<RefCell<Vec<(u8, u16)>>> = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&seen);
    console
        .cpu
        .set_unknown_opcode_hook(move |opcode, pc| sink.borrow_mut().push((opcode, pc)));

    let cycles = console.step();

    assert_eq!(cycles, 4);
    assert_eq!(seen.borrow().as_slice(), &[(0x10, 0x0100)]);
    assert_eq!(console.cpu.regs.pc, 0x0102);

    // The next fetch lands on INC B, not the operand byte.
    console.step();
    assert_eq!(console.cpu.regs.b(), 0x01);
}

#[test]
fn ld_hl_then_store_immediate_goes_through_the_bus() {
    // LD HL,0xC000 ; LD (HL),0x5A
    let mut console = setup(&[0x21, 0x00, 0xC0, 0x36, 0x5A]);

    let cycles = console.step();
    assert_eq!(cycles, 12);
    assert_eq!(console.cpu.regs.hl(), 0xC000);

    let cycles = console.step();
    assert_eq!(cycles, 12);
    assert_eq!(console.bus.read8(0xC000), 0x5A);
}

#[test]
fn store_a_through_bc_and_load_back_through_de() {
    // LD (BC),A ; LD A,(DE)
    let mut console = setup(&[0x02, 0x1A]);
    console.cpu.regs.set_a(0x77);
    console.cpu.regs.set_bc(0xC123);
    console.cpu.regs.set_de(0xC123);

    console.step();
    assert_eq!(console.bus.read8(0xC123), 0x77);

    console.cpu.regs.set_a(0x00);
    console.step();
    assert_eq!(console.cpu.regs.a(), 0x77);
}

#[test]
fn hl_postincrement_and_postdecrement_loads() {
    // LD (HL+),A ; LD A,(HL-)
    let mut console = setup(&[0x22, 0x3A]);
    console.cpu.regs.set_a(0x42);
    console.cpu.regs.set_hl(0xC800);

    console.step();
    assert_eq!(console.bus.read8(0xC800), 0x42);
    assert_eq!(console.cpu.regs.hl(), 0xC801);

    console.bus.write8(0xC801, 0x99);
    console.step();
    assert_eq!(console.cpu.regs.a(), 0x99);
    assert_eq!(console.cpu.regs.hl(), 0xC800);
}

#[test]
fn add_hl_bc_updates_only_nhc() {
    let mut console = setup(&[0x09]); // ADD HL,BC
    console.cpu.regs.set_hl(0x0FFF);
    console.cpu.regs.set_bc(0x0001);
    console.cpu.regs.set_if(Flags::Z, true);

    let cycles = console.step();

    assert_eq!(cycles, 8);
    assert_eq!(console.cpu.regs.hl(), 0x1000);
    assert_flags(&console, true, false, true, false); // Z unaffected
}

#[test]
fn rlca_sets_carry_from_bit7() {
    let mut console = setup(&[0x07]); // RLCA
    console.cpu.regs.set_a(0x85);
    console.cpu.regs.set_if(Flags::Z, true);

    console.step();

    assert_eq!(console.cpu.regs.a(), 0x0B);
    assert_flags(&console, false, false, false, true);
}

#[test]
fn jr_backwards_wraps_pc_correctly() {
    // JR -4 lands two bytes before the instruction.
    let mut console = setup(&[0x00, 0x00, 0x18, 0xFC]);
    console.step(); // NOP
    console.step(); // NOP

    let cycles = console.step(); // JR -4
    assert_eq!(cycles, 12);
    assert_eq!(console.cpu.regs.pc, 0x0100);
}

#[test]
fn conditional_jr_not_taken_costs_less() {
    let mut console = setup(&[0x20, 0x10]); // JR NZ,+0x10
    console.cpu.regs.set_if(Flags::Z, true);

    let cycles = console.step();

    assert_eq!(cycles, 8);
    assert_eq!(console.cpu.regs.pc, 0x0102);
}

#[test]
fn call_and_ret_round_trip_pc_and_stack() {
    // CALL 0x0110 ; ... ; RET at 0x0110
    let mut program = vec![0xCD, 0x10, 0x01];
    program.resize(0x10, 0x00);
    program.push(0xC9);
    let mut console = setup(&program);

    let cycles = console.step();
    assert_eq!(cycles, 24);
    assert_eq!(console.cpu.regs.pc, 0x0110);
    assert_eq!(console.cpu.regs.sp, 0xFFFC);
    assert_eq!(console.bus.read8(0xFFFC), 0x03);
    assert_eq!(console.bus.read8(0xFFFD), 0x01);

    let cycles = console.step();
    assert_eq!(cycles, 16);
    assert_eq!(console.cpu.regs.pc, 0x0103);
    assert_eq!(console.cpu.regs.sp, 0xFFFE);
}

#[test]
fn rst_pushes_return_address_and_jumps_to_vector() {
    let mut console = setup(&[0xFF]); // RST 38H

    let cycles = console.step();

    assert_eq!(cycles, 16);
    assert_eq!(console.cpu.regs.pc, 0x0038);
    assert_eq!(console.cpu.regs.sp, 0xFFFC);
    assert_eq!(console.bus.read8(0xFFFC), 0x01);
    assert_eq!(console.bus.read8(0xFFFD), 0x01);
}

#[test]
fn push_pop_af_masks_lower_flag_nibble() {
    // PUSH AF ; LD A,0x12 ; POP AF
    let mut console = setup(&[0xF5, 0x3E, 0x12, 0xF1]);
    console.cpu.regs.set_a(0xAB);
    console.cpu.regs.set_af((0xAB << 8) | 0x00F3);

    console.step();
    assert_eq!(console.cpu.regs.sp, 0xFFFC);
    assert_eq!(console.bus.read8(0xFFFC), 0xF0);
    assert_eq!(console.bus.read8(0xFFFD), 0xAB);

    console.step();
    assert_eq!(console.cpu.regs.a(), 0x12);

    console.step();
    assert_eq!(console.cpu.regs.a(), 0xAB);
    assert_eq!(console.cpu.regs.f(), 0xF0);
}

#[test]
fn cb_rlc_and_bit_hl_update_flags_and_cycles() {
    // RLC B: 0x80 -> 0x01, carry set.
    let mut console = setup(&[0xCB, 0x00]);
    console.cpu.regs.set_b(0x80);
    let cycles = console.step();
    assert_eq!(cycles, 8);
    assert_eq!(console.cpu.regs.b(), 0x01);
    assert_flags(&console, false, false, false, true);

    // BIT 0,(HL): tests the bit without touching C; 12 cycles for (HL).
    let mut console = setup(&[0xCB, 0x46]);
    console.cpu.regs.set_hl(0xC000);
    console.bus.write8(0xC000, 0x00);
    console.cpu.regs.set_if(Flags::C, true);

    let cycles = console.step();
    assert_eq!(cycles, 12);
    assert_flags(&console, true, false, true, true);
}

#[test]
fn cb_set_and_res_on_memory_operand() {
    // SET 7,(HL) ; RES 0,(HL)
    let mut console = setup(&[0xCB, 0xFE, 0xCB, 0x86]);
    console.cpu.regs.set_hl(0xC000);
    console.bus.write8(0xC000, 0x01);

    let cycles = console.step();
    assert_eq!(cycles, 16);
    assert_eq!(console.bus.read8(0xC000), 0x81);

    console.step();
    assert_eq!(console.bus.read8(0xC000), 0x80);
}

#[test]
fn ei_and_di_toggle_the_master_enable_latch() {
    let mut console = setup(&[0xFB, 0xF3]);

    console.step();
    assert!(console.cpu.ime);

    console.step();
    assert!(!console.cpu.ime);
}

#[test]
fn ldh_reads_back_the_io_shadow() {
    // LDH (0x40),A ; LDH A,(0x40)
    let mut console = setup(&[0xE0, 0x40, 0x3E, 0x00, 0xF0, 0x40]);
    console.cpu.regs.set_a(0x91);

    console.step();
    assert_eq!(console.bus.read8(0xFF40), 0x91);

    console.step(); // LD A,0x00
    console.step();
    assert_eq!(console.cpu.regs.a(), 0x91);
}

#[test]
fn mnemonics_are_available_for_diagnostics() {
    assert_eq!(dmg_core::cpu::mnemonic(0x00), "NOP");
    assert_eq!(dmg_core::cpu::mnemonic(0x04), "INC B");
    assert_eq!(dmg_core::cpu::mnemonic(0xD3), "???");
    assert_eq!(dmg_core::cpu::cb_mnemonic(0x37), "SWAP A");
    assert_eq!(dmg_core::cpu::base_cycles(0xC3), 16); // JP a16
    assert_eq!(dmg_core::cpu::cb_base_cycles(0x00), 8); // RLC B
}
