pub mod alu;
mod cb_ops;
#[allow(clippy::module_inception)]
pub mod cpu;
mod ops;
pub mod registers;

pub use cb_ops::base_cycles as cb_base_cycles;
pub use cb_ops::mnemonic as cb_mnemonic;
pub use cpu::{Cpu, R8, UnknownOpcodeHook};
pub use ops::{base_cycles, mnemonic};
pub use registers::{Flags, Registers};
