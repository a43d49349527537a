use crate::cartridge::header::Model;
use crate::cartridge::Cartridge;
use serde::{Deserialize, Serialize};
use serde_big_array::BigArray;

/// Fatal initialization failures. A session must not start after one of
/// these.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InitError {
    OutOfMemory,
}

/// The unified 16-bit address space.
///
/// Every address maps to exactly one region, so reads and writes are total:
/// there is no invalid-address condition. Regions with no behavior yet (IO
/// registers, OAM) read back whatever was last written; the unusable range
/// and the cartridge-RAM window (no mapper support) read 0xFF and drop
/// writes.
#[derive(Serialize, Deserialize)]
pub struct Bus {
    pub cart: Cartridge,
    pub model: Model,
    #[serde(with = "serde_bytes")]
    pub vram: Vec<u8>,
    #[serde(with = "serde_bytes")]
    pub wram: Vec<u8>,
    #[serde(with = "serde_bytes")]
    pub hram: Vec<u8>,
    #[serde(with = "BigArray")]
    pub oam: [u8; 0xA0],
    #[serde(with = "BigArray")]
    pub io: [u8; 0x80],
    pub ie: u8,
}

/// Zero-filled region allocation that surfaces exhaustion instead of
/// aborting.
fn alloc_region(len: usize) -> Result<Vec<u8>, InitError> {
    let mut region = Vec::new();
    region
        .try_reserve_exact(len)
        .map_err(|_| InitError::OutOfMemory)?;
    region.resize(len, 0);
    Ok(region)
}

impl Bus {
    pub fn new(cart: Cartridge, model: Model) -> Result<Self, InitError> {
        Ok(Self {
            cart,
            model,
            vram: alloc_region(model.vram_len())?,
            wram: alloc_region(model.wram_len())?,
            hram: alloc_region(model.hram_len())?,
            oam: [0; 0xA0],
            io: [0; 0x80],
            ie: 0,
        })
    }

    pub fn read8(&self, addr: u16) -> u8 {
        match addr {
            // ROM: 0x0000..=0x7FFF. Short images read 0xFF past their end.
            0x0000..=0x7FFF => self.cart.rom.get(addr as usize).copied().unwrap_or(0xFF),

            // VRAM: 0x8000..=0x9FFF (bank 0; CGB bank select is future work)
            0x8000..=0x9FFF => self.vram[(addr - 0x8000) as usize],

            // Cartridge RAM window: 0xA000..=0xBFFF (no mapper support)
            0xA000..=0xBFFF => 0xFF,

            // WRAM: 0xC000..=0xDFFF (banks 0-1; CGB bank select is future work)
            0xC000..=0xDFFF => self.wram[(addr - 0xC000) as usize],

            // Echo WRAM: 0xE000..=0xFDFF (mirrors 0xC000..=0xDDFF)
            0xE000..=0xFDFF => self.wram[(addr - 0xE000) as usize],

            // OAM: 0xFE00..=0xFE9F
            0xFE00..=0xFE9F => self.oam[(addr - 0xFE00) as usize],

            // Unusable: 0xFEA0..=0xFEFF
            0xFEA0..=0xFEFF => 0xFF,

            // IO registers: 0xFF00..=0xFF7F (shadow storage only)
            0xFF00..=0xFF7F => self.io[(addr - 0xFF00) as usize],

            // HRAM: 0xFF80..=0xFFFE
            0xFF80..=0xFFFE => self.hram[(addr - 0xFF80) as usize],

            // IE register: 0xFFFF
            0xFFFF => self.ie,
        }
    }

    pub fn write8(&mut self, addr: u16, val: u8) {
        match addr {
            // ROM: 0x0000..=0x7FFF. Mapper control writes are future work.
            0x0000..=0x7FFF => {}

            // VRAM: 0x8000..=0x9FFF
            0x8000..=0x9FFF => self.vram[(addr - 0x8000) as usize] = val,

            // Cartridge RAM window: 0xA000..=0xBFFF (no mapper support)
            0xA000..=0xBFFF => {}

            // WRAM: 0xC000..=0xDFFF
            0xC000..=0xDFFF => self.wram[(addr - 0xC000) as usize] = val,

            // Echo WRAM: 0xE000..=0xFDFF (mirrors 0xC000..=0xDDFF)
            0xE000..=0xFDFF => self.wram[(addr - 0xE000) as usize] = val,

            // OAM: 0xFE00..=0xFE9F
            0xFE00..=0xFE9F => self.oam[(addr - 0xFE00) as usize] = val,

            // Unusable: 0xFEA0..=0xFEFF
            0xFEA0..=0xFEFF => {}

            // IO registers: 0xFF00..=0xFF7F (shadow storage only)
            0xFF00..=0xFF7F => self.io[(addr - 0xFF00) as usize] = val,

            // HRAM: 0xFF80..=0xFFFE
            0xFF80..=0xFFFE => self.hram[(addr - 0xFF80) as usize] = val,

            // IE register: 0xFFFF
            0xFFFF => self.ie = val,
        }
    }
}
