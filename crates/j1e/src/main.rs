//! J1 eForth terminal runner.
//!
//! Loads a flat J1 image, wires the console to stdio and runs until the
//! program executes BYE or input runs out. With a terminal attached, raw
//! mode hands every keystroke to the Forth line editor.

use std::env;
use std::error::Error;
use std::io::{self, IsTerminal};
use std::process;

use format_j1_bin::Image;
use machine_j1::{ChannelConsole, J1Machine};
use termion::raw::IntoRawMode;

fn main() -> Result<(), Box<dyn Error>> {
    let args: Vec<String> = env::args().collect();
    let path = match args.len() {
        1 => "j1e.bin",
        2 => args[1].as_str(),
        _ => {
            eprintln!("Usage: j1e [image.bin]");
            process::exit(1);
        }
    };

    let image = Image::open(path).map_err(|err| format!("{path}: {err}"))?;

    // Raw mode only when interactive: eForth does its own echo and line
    // editing. The guard restores the terminal on drop.
    let raw = if io::stdout().is_terminal() {
        Some(io::stdout().into_raw_mode()?)
    } else {
        None
    };

    let mut machine = J1Machine::new(ChannelConsole::stdio());
    machine.load_image(&image);
    machine.run();

    drop(raw);
    println!();
    Ok(())
}
