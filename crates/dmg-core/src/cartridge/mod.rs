pub mod header;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone)]
pub enum CartridgeError {
    HeaderParse(header::HeaderError),
    RomTooSmall { declared: usize, actual: usize },
}

/// A loaded ROM image plus its parsed header.
///
/// The ROM bytes are logically immutable once loaded; the bus only ever
/// reads them. Bank-switching write traps are future work.
#[derive(Serialize, Deserialize)]
pub struct Cartridge {
    #[serde(with = "serde_bytes")]
    pub rom: Vec<u8>,
    pub header: header::Header,
}

impl Cartridge {
    pub fn from_rom(rom: Vec<u8>) -> Result<Self, CartridgeError> {
        let header = header::Header::parse(&rom).map_err(CartridgeError::HeaderParse)?;

        // Validate ROM size matches header declaration
        let expected_rom_size = header.rom_size.byte_len();
        if rom.len() < expected_rom_size {
            return Err(CartridgeError::RomTooSmall {
                declared: expected_rom_size,
                actual: rom.len(),
            });
        }

        Ok(Cartridge { rom, header })
    }
}
