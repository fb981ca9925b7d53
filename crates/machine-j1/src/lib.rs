//! J1 machine emulation.
//!
//! Wires the CPU core to its 16 KiB RAM, the console ports and a run loop.
//! The console is a capability passed in at construction, so the machine is
//! deterministic under test and interactive in the runner.

mod console;
mod machine;
mod memory;

pub use console::{ChannelConsole, Console};
pub use machine::J1Machine;
pub use memory::{J1Memory, RAM_WORDS, port};
