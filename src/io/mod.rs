//! Destinations for the terminal output of the solver backends.
//!
//! Every [`Problem`](crate::problem::Problem) owns one output destination.
//! Progress lines of the simplex, interior point and branch-and-bound
//! backends are written there, filtered by the `msg_lev` parameter.

use std::fs::File;
use std::io::{self, Write};

/// Where the progress lines of one problem go.
#[derive(Default)]
pub(crate) enum PrintTarget {
    #[default]
    Stdout,
    File(File),
    Buffer(Vec<u8>),
    Stream(Box<dyn Write + Send + Sync>),
    /// complete lines become `tracing` events; the partial last line
    /// is held back
    Tracing(Vec<u8>),
    Sink,
}

impl std::fmt::Debug for PrintTarget {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            PrintTarget::Stdout => "Stdout",
            PrintTarget::File(_) => "File",
            PrintTarget::Buffer(_) => "Buffer",
            PrintTarget::Stream(_) => "Stream",
            PrintTarget::Tracing(_) => "Tracing",
            PrintTarget::Sink => "Sink",
        };
        write!(f, "PrintTarget::{}", name)
    }
}

impl PrintTarget {
    fn emit_lines(pending: &mut Vec<u8>) {
        while let Some(pos) = pending.iter().position(|&b| b == b'\n') {
            let line: Vec<u8> = pending.drain(..=pos).collect();
            let line = String::from_utf8_lossy(&line[..pos]);
            tracing::info!(target: "lpcontrol::output", "{}", line);
        }
    }
}

impl Write for PrintTarget {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        match self {
            PrintTarget::Stdout => io::stdout().lock().write(buf),
            PrintTarget::File(file) => file.write(buf),
            PrintTarget::Stream(stream) => stream.write(buf),
            PrintTarget::Buffer(data) => {
                data.extend_from_slice(buf);
                Ok(buf.len())
            }
            PrintTarget::Tracing(pending) => {
                pending.extend_from_slice(buf);
                Self::emit_lines(pending);
                Ok(buf.len())
            }
            PrintTarget::Sink => Ok(buf.len()),
        }
    }

    fn flush(&mut self) -> io::Result<()> {
        match self {
            PrintTarget::Stdout => io::stdout().flush(),
            PrintTarget::File(file) => file.flush(),
            PrintTarget::Stream(stream) => stream.flush(),
            PrintTarget::Buffer(_) | PrintTarget::Tracing(_) | PrintTarget::Sink => Ok(()),
        }
    }
}

/// Redirection of the progress output of a problem.
pub trait ConfigurablePrintTarget {
    /// print to standard output (the default)
    fn print_to_stdout(&mut self);
    /// print to an open file
    fn print_to_file(&mut self, file: File);
    /// print to any writer
    fn print_to_stream(&mut self, stream: Box<dyn Write + Send + Sync>);
    /// collect the output in memory, see [`get_print_buffer`](Self::get_print_buffer)
    fn print_to_buffer(&mut self);
    /// forward every output line as a `tracing` event at info level
    fn print_to_tracing(&mut self);
    /// drop all output
    fn print_to_sink(&mut self);
    /// the output collected since the last call to
    /// [`print_to_buffer`](Self::print_to_buffer)
    fn get_print_buffer(&mut self) -> io::Result<String>;
}

impl ConfigurablePrintTarget for PrintTarget {
    fn print_to_stdout(&mut self) {
        *self = PrintTarget::Stdout;
    }

    fn print_to_file(&mut self, file: File) {
        *self = PrintTarget::File(file);
    }

    fn print_to_stream(&mut self, stream: Box<dyn Write + Send + Sync>) {
        *self = PrintTarget::Stream(stream);
    }

    fn print_to_buffer(&mut self) {
        *self = PrintTarget::Buffer(Vec::new());
    }

    fn print_to_tracing(&mut self) {
        *self = PrintTarget::Tracing(Vec::new());
    }

    fn print_to_sink(&mut self) {
        *self = PrintTarget::Sink;
    }

    fn get_print_buffer(&mut self) -> io::Result<String> {
        if let PrintTarget::Buffer(data) = self {
            Ok(String::from_utf8_lossy(data).into_owned())
        } else {
            Err(io::Error::new(
                io::ErrorKind::Other,
                "output is not being collected in a buffer",
            ))
        }
    }
}

#[test]
fn test_print_buffer() {
    let mut target = PrintTarget::default();
    assert!(target.get_print_buffer().is_err());

    target.print_to_buffer();
    writeln!(target, "OPTIMAL SOLUTION FOUND").unwrap();
    assert_eq!(target.get_print_buffer().unwrap(), "OPTIMAL SOLUTION FOUND\n");

    target.print_to_sink();
    writeln!(target, "dropped").unwrap();
    assert!(target.get_print_buffer().is_err());
}

#[test]
fn test_tracing_holds_partial_line() {
    let mut target = PrintTarget::default();
    target.print_to_tracing();
    write!(target, "first\nsec").unwrap();
    match &target {
        PrintTarget::Tracing(pending) => assert_eq!(pending, b"sec"),
        other => panic!("unexpected target {:?}", other),
    }
    writeln!(target, "ond").unwrap();
    match &target {
        PrintTarget::Tracing(pending) => assert!(pending.is_empty()),
        other => panic!("unexpected target {:?}", other),
    }
}
