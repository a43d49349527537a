use serde::{Deserialize, Serialize};

/// Console model, selected once at ROM load from the CGB flag byte.
///
/// The model is fixed for the lifetime of a session and decides how much
/// VRAM/WRAM the bus allocates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Model {
    Dmg,
    Cgb,
}

impl Model {
    /// Header offset of the CGB flag.
    pub const CGB_FLAG_OFFSET: usize = 0x0143;

    pub fn from_cgb_flag(byte: u8) -> Self {
        match byte {
            0x80 | 0xC0 => Model::Cgb,
            _ => Model::Dmg,
        }
    }

    pub const fn vram_len(self) -> usize {
        match self {
            Model::Dmg => 0x2000,
            Model::Cgb => 0x4000,
        }
    }

    pub const fn wram_len(self) -> usize {
        match self {
            Model::Dmg => 0x2000,
            Model::Cgb => 0x8000,
        }
    }

    pub const fn hram_len(self) -> usize {
        0x80
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CartridgeType {
    RomOnly,
    Mbc1,
    Mbc1Ram,
    Mbc1RamBattery,
    Mbc3,
    Mbc3Ram,
    Mbc3RamBattery,
}

impl CartridgeType {
    fn from_byte(byte: u8) -> Result<Self, HeaderError> {
        match byte {
            0x00 => Ok(CartridgeType::RomOnly),
            0x01 => Ok(CartridgeType::Mbc1),
            0x02 => Ok(CartridgeType::Mbc1Ram),
            0x03 => Ok(CartridgeType::Mbc1RamBattery),
            0x11 => Ok(CartridgeType::Mbc3),
            0x12 => Ok(CartridgeType::Mbc3Ram),
            0x13 => Ok(CartridgeType::Mbc3RamBattery),
            _ => Err(HeaderError::UnsupportedCartridgeType(byte)),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RomSize {
    Kilobytes32,  // 2 banks
    Kilobytes64,  // 4 banks
    Kilobytes128, // 8 banks
    Kilobytes256, // 16 banks
    Kilobytes512, // 32 banks
    Megabyte1,    // 64 banks
    Megabyte2,    // 128 banks
    Megabyte4,    // 256 banks
}

impl RomSize {
    /// Number of 0x4000-byte banks: header value n declares 2^(n+1).
    pub fn bank_count(self) -> usize {
        match self {
            RomSize::Kilobytes32 => 2,
            RomSize::Kilobytes64 => 4,
            RomSize::Kilobytes128 => 8,
            RomSize::Kilobytes256 => 16,
            RomSize::Kilobytes512 => 32,
            RomSize::Megabyte1 => 64,
            RomSize::Megabyte2 => 128,
            RomSize::Megabyte4 => 256,
        }
    }

    pub fn byte_len(self) -> usize {
        self.bank_count() * 0x4000
    }

    fn from_byte(byte: u8) -> Result<Self, HeaderError> {
        match byte {
            0x00 => Ok(RomSize::Kilobytes32),
            0x01 => Ok(RomSize::Kilobytes64),
            0x02 => Ok(RomSize::Kilobytes128),
            0x03 => Ok(RomSize::Kilobytes256),
            0x04 => Ok(RomSize::Kilobytes512),
            0x05 => Ok(RomSize::Megabyte1),
            0x06 => Ok(RomSize::Megabyte2),
            0x07 => Ok(RomSize::Megabyte4),
            _ => Err(HeaderError::UnsupportedRomSize(byte)),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RamSize {
    None,
    Kilobytes8,
    Kilobytes32,
    Kilobytes128,
    Kilobytes64,
}

impl RamSize {
    pub fn byte_len(self) -> usize {
        match self {
            RamSize::None => 0,
            RamSize::Kilobytes8 => 0x2000,
            RamSize::Kilobytes32 => 0x8000,
            RamSize::Kilobytes128 => 0x20000,
            RamSize::Kilobytes64 => 0x10000,
        }
    }

    fn from_byte(byte: u8) -> Result<Self, HeaderError> {
        match byte {
            0x00 => Ok(RamSize::None),
            0x02 => Ok(RamSize::Kilobytes8),
            0x03 => Ok(RamSize::Kilobytes32),
            0x04 => Ok(RamSize::Kilobytes128),
            0x05 => Ok(RamSize::Kilobytes64),
            _ => Err(HeaderError::UnsupportedRamSize(byte)),
        }
    }
}

/// Classification of a ROM image: model selection plus cartridge
/// type/size identification. No banking behavior lives here.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Header {
    pub model: Model,
    pub cartridge_type: CartridgeType,
    pub rom_size: RomSize,
    pub ram_size: RamSize,
}

#[derive(Debug, Clone)]
pub enum HeaderError {
    RomTooSmall,
    UnsupportedCartridgeType(u8),
    UnsupportedRomSize(u8),
    UnsupportedRamSize(u8),
}

impl Header {
    pub fn parse(rom: &[u8]) -> Result<Self, HeaderError> {
        if rom.len() < 0x014A {
            return Err(HeaderError::RomTooSmall);
        }

        let model = Model::from_cgb_flag(rom[Model::CGB_FLAG_OFFSET]);
        let cartridge_type = CartridgeType::from_byte(rom[0x0147])?;
        let rom_size = RomSize::from_byte(rom[0x0148])?;
        let ram_size = RamSize::from_byte(rom[0x0149])?;

        Ok(Header {
            model,
            cartridge_type,
            rom_size,
            ram_size,
        })
    }
}
