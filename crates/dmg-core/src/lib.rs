pub mod bus;
pub mod cartridge;
pub mod console;
pub mod cpu;
