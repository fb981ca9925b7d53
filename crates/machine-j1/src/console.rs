//! Console capability and the threaded stdio console.

use std::io::{Read, Write};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::{Receiver, SyncSender, sync_channel};
use std::thread;

/// Byte console attached to the I/O ports.
///
/// The machine invokes exactly four operations. `read` blocks until input
/// arrives and returns `None` once the source is exhausted; `len` never
/// blocks. After `stop`, reads and writes fail silently.
pub trait Console {
    /// Next input byte, blocking. `None` means end of input.
    fn read(&mut self) -> Option<u8>;

    /// Emit one output byte.
    fn write(&mut self, byte: u8);

    /// Non-blocking readable-byte indicator: 1 when a byte is waiting.
    fn len(&mut self) -> u16;

    /// Shut the console down. Idempotent.
    fn stop(&mut self);
}

/// Console backed by a reader thread and a writer thread.
///
/// Each worker sits behind a capacity-1 channel: the CPU blocks on output
/// only while the sink stalls, and input is buffered at most one byte ahead
/// of the port read. `stop` hangs up the output channel and raises a flag
/// the reader checks on its next byte.
pub struct ChannelConsole {
    input: Receiver<u8>,
    output: Option<SyncSender<u8>>,
    pending: Option<u8>,
    done: Arc<AtomicBool>,
}

impl ChannelConsole {
    /// Spawn the worker threads over a byte source and sink.
    pub fn new<R, W>(mut reader: R, mut writer: W) -> Self
    where
        R: Read + Send + 'static,
        W: Write + Send + 'static,
    {
        let (in_tx, in_rx) = sync_channel(1);
        let (out_tx, out_rx) = sync_channel::<u8>(1);
        let done = Arc::new(AtomicBool::new(false));

        let reader_done = Arc::clone(&done);
        thread::spawn(move || {
            let mut buf = [0u8; 1];
            loop {
                match reader.read(&mut buf) {
                    Ok(0) | Err(_) => return,
                    Ok(_) => {}
                }
                if reader_done.load(Ordering::Relaxed) {
                    return;
                }
                // Line feeds become carriage returns: eForth's ACCEPT ends
                // lines on CR, whether input is piped or typed.
                let byte = if buf[0] == b'\n' { b'\r' } else { buf[0] };
                if in_tx.send(byte).is_err() {
                    return;
                }
            }
        });

        thread::spawn(move || {
            while let Ok(byte) = out_rx.recv() {
                if writer.write_all(&[byte]).is_err() {
                    return;
                }
                let _ = writer.flush();
            }
        });

        Self {
            input: in_rx,
            output: Some(out_tx),
            pending: None,
            done,
        }
    }

    /// Console over the process stdio.
    #[must_use]
    pub fn stdio() -> Self {
        Self::new(std::io::stdin(), std::io::stdout())
    }
}

impl Console for ChannelConsole {
    fn read(&mut self) -> Option<u8> {
        if let Some(byte) = self.pending.take() {
            return Some(byte);
        }
        self.input.recv().ok()
    }

    fn write(&mut self, byte: u8) {
        if let Some(output) = &self.output {
            let _ = output.send(byte);
        }
    }

    fn len(&mut self) -> u16 {
        if self.pending.is_none() {
            self.pending = self.input.try_recv().ok();
        }
        u16::from(self.pending.is_some())
    }

    fn stop(&mut self) {
        self.done.store(true, Ordering::Relaxed);
        self.output.take();
    }
}
