use dmg_core::cartridge::header::{CartridgeType, Header, HeaderError, Model, RamSize, RomSize};
use dmg_core::cartridge::{Cartridge, CartridgeError};

fn rom_with_header(cgb: u8, cart_type: u8, rom_size: u8, ram_size: u8) -> Vec<u8> {
    let mut rom = vec![0u8; 0x8000];
    rom[0x0143] = cgb;
    rom[0x0147] = cart_type;
    rom[0x0148] = rom_size;
    rom[0x0149] = ram_size;
    rom
}

#[test]
fn model_is_selected_from_the_cgb_flag() {
    assert_eq!(Model::from_cgb_flag(0x00), Model::Dmg);
    assert_eq!(Model::from_cgb_flag(0x80), Model::Cgb);
    assert_eq!(Model::from_cgb_flag(0xC0), Model::Cgb);
    // Anything else means a plain DMG cartridge.
    assert_eq!(Model::from_cgb_flag(0x42), Model::Dmg);
}

#[test]
fn header_parse_classifies_type_and_sizes() {
    let rom = rom_with_header(0x00, 0x01, 0x01, 0x03);
    let header = Header::parse(&rom).unwrap();
    assert_eq!(header.model, Model::Dmg);
    assert_eq!(header.cartridge_type, CartridgeType::Mbc1);
    assert_eq!(header.rom_size, RomSize::Kilobytes64);
    assert_eq!(header.rom_size.byte_len(), 0x10000);
    assert_eq!(header.ram_size, RamSize::Kilobytes32);
}

#[test]
fn cgb_flag_in_header_selects_color_model() {
    let rom = rom_with_header(0x80, 0x00, 0x00, 0x00);
    let header = Header::parse(&rom).unwrap();
    assert_eq!(header.model, Model::Cgb);
}

#[test]
fn header_smaller_than_the_header_area_is_rejected() {
    let rom = vec![0u8; 0x0100];
    assert!(matches!(
        Header::parse(&rom),
        Err(HeaderError::RomTooSmall)
    ));
}

#[test]
fn unsupported_cartridge_type_is_rejected() {
    let rom = rom_with_header(0x00, 0x20, 0x00, 0x00);
    assert!(matches!(
        Header::parse(&rom),
        Err(HeaderError::UnsupportedCartridgeType(0x20))
    ));
}

#[test]
fn rom_shorter_than_declared_size_is_rejected() {
    // Header declares 1MB but the image is 32KB.
    let rom = rom_with_header(0x00, 0x00, 0x05, 0x00);
    match Cartridge::from_rom(rom) {
        Err(CartridgeError::RomTooSmall { declared, actual }) => {
            assert_eq!(declared, 0x100000);
            assert_eq!(actual, 0x8000);
        }
        other => panic!("expected RomTooSmall, got {:?}", other.err()),
    }
}

#[test]
fn smallest_rom_declaration_requires_two_banks() {
    assert_eq!(RomSize::Kilobytes32.byte_len(), 0x8000);

    // A single-bank 16KB image declaring 32KB is truncated.
    let mut rom = vec![0u8; 0x4000];
    rom[0x0147] = 0x00;
    rom[0x0148] = 0x00;
    rom[0x0149] = 0x00;
    match Cartridge::from_rom(rom) {
        Err(CartridgeError::RomTooSmall { declared, actual }) => {
            assert_eq!(declared, 0x8000);
            assert_eq!(actual, 0x4000);
        }
        other => panic!("expected RomTooSmall, got {:?}", other.err()),
    }
}
