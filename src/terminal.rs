use crossterm::{
    cursor::MoveTo,
    queue,
    style::Print,
    terminal::{Clear, ClearType},
};
use std::io::{self, stdout, BufWriter, Stdout, Write};

/// Where animation frames go
pub trait FrameSink {
    /// Called once before the first frame
    fn begin(&mut self) -> io::Result<()>;

    /// Show one complete frame
    fn present(&mut self, frame: &str) -> io::Result<()>;
}

/// ANSI terminal output. Frames are drawn from the top-left corner after
/// clearing the screen, and flushed one at a time.
pub struct Terminal<W: Write = BufWriter<Stdout>> {
    out: W,
}

impl Terminal {
    pub fn stdout() -> Self {
        Self::new(BufWriter::new(stdout()))
    }
}

impl<W: Write> Terminal<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    /// Clear the actual terminal
    pub fn clear_screen(&mut self) -> io::Result<()> {
        queue!(self.out, Clear(ClearType::All))?;
        self.out.flush()
    }
}

impl<W: Write> FrameSink for Terminal<W> {
    fn begin(&mut self) -> io::Result<()> {
        self.clear_screen()
    }

    fn present(&mut self, frame: &str) -> io::Result<()> {
        queue!(self.out, MoveTo(0, 0), Clear(ClearType::All), Print(frame))?;
        self.out.flush()
    }
}
