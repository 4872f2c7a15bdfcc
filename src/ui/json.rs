use std::io::{self, Write};

/// Write one event as a single NDJSON line.
pub fn write_event(out: &mut impl Write, event: &serde_json::Value) -> io::Result<()> {
    serde_json::to_writer(&mut *out, event)?;
    writeln!(out)
}

/// Emit an event on stdout.
pub fn emit(event: serde_json::Value) -> io::Result<()> {
    write_event(&mut io::stdout().lock(), &event)
}
