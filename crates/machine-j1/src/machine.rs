//! The machine: CPU, memory and console glued together.

use cpu_j1::{Instruction, J1, Registers};
use format_j1_bin::{Image, ImageError};

use crate::Console;
use crate::memory::J1Memory;

/// A complete J1 system.
///
/// Owns the CPU core and the memory fabric; the console arrives as a
/// capability at construction. Execution begins at word 0.
pub struct J1Machine<C: Console> {
    cpu: J1,
    mem: J1Memory<C>,
}

impl<C: Console> J1Machine<C> {
    /// A machine with empty RAM and the CPU in reset state.
    pub fn new(console: C) -> Self {
        Self {
            cpu: J1::new(),
            mem: J1Memory::new(console),
        }
    }

    /// Parse and load a flat little-endian image at word 0.
    ///
    /// An oversized image is rejected and RAM is left untouched.
    pub fn load_bytes(&mut self, data: &[u8]) -> Result<(), ImageError> {
        self.load_image(&Image::from_bytes(data)?);
        Ok(())
    }

    /// Load a parsed image at word 0.
    pub fn load_image(&mut self, image: &Image) {
        self.mem.load(image.words());
    }

    /// Return the CPU to reset state. RAM keeps the loaded image.
    pub fn reset(&mut self) {
        self.cpu.reset();
    }

    /// Decode the instruction under the program counter.
    pub fn fetch(&mut self) -> Instruction {
        self.cpu.fetch(&mut self.mem)
    }

    /// Execute one decoded instruction.
    pub fn execute(&mut self, ins: Instruction) {
        self.cpu.execute(ins, &mut self.mem);
    }

    /// Fetch and execute a single instruction.
    pub fn step(&mut self) {
        self.cpu.step(&mut self.mem);
    }

    /// Run until a bye request.
    ///
    /// The store requesting the halt completes first; the loop observes the
    /// latch on its next iteration, shuts the console down and returns with
    /// the rest of the state intact for inspection.
    pub fn run(&mut self) {
        while !self.mem.halted() {
            self.cpu.step(&mut self.mem);
        }
        self.mem.console_mut().stop();
    }

    /// True once the machine has halted.
    #[must_use]
    pub fn stopped(&self) -> bool {
        self.mem.halted()
    }

    /// Snapshot of the CPU state.
    #[must_use]
    pub fn registers(&self) -> Registers {
        self.cpu.registers()
    }

    /// RAM word at a word index.
    #[must_use]
    pub fn word(&self, index: usize) -> u16 {
        self.mem.word(index)
    }

    pub fn console_mut(&mut self) -> &mut C {
        self.mem.console_mut()
    }
}
