//! Frame output: clear the screen, draw the block, flush.

use std::io::{self, BufWriter, Stdout, Write};

use crate::error::PlayerError;

/// ANSI "erase display" followed by "cursor home".
pub const CLEAR_AND_HOME: &str = "\x1b[2J\x1b[H";

/// Writes rendered frames to a terminal stream.
///
/// Every draw is flushed before returning so buffered bytes never shift a
/// frame past its pacing deadline.
#[derive(Debug)]
pub struct TerminalSink<W: Write> {
    out: W,
    frames_drawn: u64,
}

impl TerminalSink<BufWriter<Stdout>> {
    /// Sink on standard output.
    pub fn stdout() -> Self {
        Self::new(BufWriter::with_capacity(64 * 1024, io::stdout()))
    }
}

impl<W: Write> TerminalSink<W> {
    pub fn new(out: W) -> Self {
        Self {
            out,
            frames_drawn: 0,
        }
    }

    /// Clear the display, home the cursor and write `block` followed by a newline.
    ///
    /// # Errors
    /// * `PlayerError::OutputWriteFailure` - the stream is closed or broken
    pub fn clear_and_draw(&mut self, block: &str) -> Result<(), PlayerError> {
        write_frame(&mut self.out, block).map_err(PlayerError::OutputWriteFailure)?;
        self.frames_drawn += 1;
        Ok(())
    }

    /// Number of successful draws.
    pub fn frames_drawn(&self) -> u64 {
        self.frames_drawn
    }

    pub fn get_ref(&self) -> &W {
        &self.out
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

fn write_frame<W: Write>(out: &mut W, block: &str) -> io::Result<()> {
    out.write_all(CLEAR_AND_HOME.as_bytes())?;
    out.write_all(block.as_bytes())?;
    out.write_all(b"\n")?;
    out.flush()
}

#[cfg(test)]
mod tests {
    use super::*;

    struct ClosedStream;

    impl Write for ClosedStream {
        fn write(&mut self, _buf: &[u8]) -> io::Result<usize> {
            Err(io::Error::new(io::ErrorKind::BrokenPipe, "stream closed"))
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    /// Accepts writes but fails to flush, like a terminal that went away.
    struct FailingFlush(Vec<u8>);

    impl Write for FailingFlush {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Err(io::Error::new(io::ErrorKind::BrokenPipe, "flush failed"))
        }
    }

    #[test]
    fn test_clear_and_draw_bytes() {
        let mut sink = TerminalSink::new(Vec::new());
        sink.clear_and_draw("ab\ncd").unwrap();
        assert_eq!(sink.get_ref().as_slice(), b"\x1b[2J\x1b[Hab\ncd\n");
        assert_eq!(sink.frames_drawn(), 1);
    }

    #[test]
    fn test_each_draw_starts_with_clear() {
        let mut sink = TerminalSink::new(Vec::new());
        sink.clear_and_draw("1").unwrap();
        sink.clear_and_draw("2").unwrap();
        let out = String::from_utf8(sink.into_inner()).unwrap();
        assert_eq!(out.matches(CLEAR_AND_HOME).count(), 2);
        assert!(out.ends_with("\x1b[2J\x1b[H2\n"));
    }

    #[test]
    fn test_closed_stream_is_write_failure() {
        let mut sink = TerminalSink::new(ClosedStream);
        let err = sink.clear_and_draw("x").unwrap_err();
        assert!(matches!(err, PlayerError::OutputWriteFailure(_)));
        assert_eq!(sink.frames_drawn(), 0);
    }

    #[test]
    fn test_flush_failure_is_write_failure() {
        let mut sink = TerminalSink::new(FailingFlush(Vec::new()));
        let err = sink.clear_and_draw("x").unwrap_err();
        assert!(matches!(err, PlayerError::OutputWriteFailure(_)));
    }

    #[test]
    fn test_utf8_blocks_written_verbatim() {
        let mut sink = TerminalSink::new(Vec::new());
        sink.clear_and_draw("░▒▓█").unwrap();
        let out = String::from_utf8(sink.into_inner()).unwrap();
        assert!(out.contains("░▒▓█"));
    }
}
