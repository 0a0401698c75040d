//! Streaming Demo: an LLM-style HTML response streamed into a document.
//!
//! A producer thread emits 1-3 grapheme "tokens" every 10ms. The driver
//! renders at most every 50ms; each document write redraws the terminal with
//! the session-owned range highlighted.
//!
//! Run with `RUST_LOG=debug` to see session lifecycle logs.

use crossterm::{
    cursor::MoveTo,
    execute,
    style::{Color, Print, ResetColor, SetForegroundColor},
    terminal::{Clear, ClearType},
};
use flywheel_markup::{
    Document, DocumentError, DriverConfig, MemoryDocument, StreamDriver, StreamWriter, WriterConfig,
};
use std::io::{self, Write};
use std::ops::Range;
use std::thread;
use std::time::Duration;
use unicode_segmentation::UnicodeSegmentation;

/// Sample response (simulating an LLM writing HTML).
const SAMPLE_HTML: &str = "<h2>Streaming into a live document</h2>\
<p>Each token may split a tag in half, like <strong>this one</strong>. \
Paragraphs and headings preview as they arrive, auto-closed, while \
structured blocks wait.</p>\
<ul><li>Lists appear only when complete</li><li>So nested items never flicker</li></ul>\
<blockquote><p>Correctness over latency.</p></blockquote>\
<p>Finished. ✨</p>";

/// A `MemoryDocument` that redraws the terminal on every write.
struct TerminalDocument {
    inner: MemoryDocument,
    /// Span of the most recent write.
    highlight: Range<usize>,
    writes: u64,
}

impl TerminalDocument {
    fn new(existing: &str) -> Self {
        Self {
            inner: MemoryDocument::from_markup(existing),
            highlight: 0..0,
            writes: 0,
        }
    }

    fn redraw(&self) {
        let text = self.inner.text();
        let Range { start, end } = self.highlight.clone();
        let mut stdout = io::stdout();
        let _ = execute!(
            stdout,
            Clear(ClearType::All),
            MoveTo(0, 0),
            SetForegroundColor(Color::DarkGrey),
            Print(format!("flywheel-markup demo | writes: {}\n\n", self.writes)),
            ResetColor,
            Print(&text[..start]),
            SetForegroundColor(Color::Cyan),
            Print(&text[start..end]),
            ResetColor,
            Print(&text[end..]),
            Print("\n"),
        );
        let _ = stdout.flush();
    }
}

impl Document for TerminalDocument {
    fn cursor_position(&self) -> usize {
        self.inner.cursor_position()
    }

    fn len(&self) -> usize {
        self.inner.len()
    }

    fn set_editable(&mut self, editable: bool) {
        self.inner.set_editable(editable);
    }

    fn insert_markup(&mut self, at: usize, markup: &str) -> Result<usize, DocumentError> {
        let extent = self.inner.insert_markup(at, markup)?;
        self.highlight = at..at + extent;
        self.writes += 1;
        self.redraw();
        Ok(extent)
    }

    fn replace_range(&mut self, range: Range<usize>, markup: &str) -> Result<usize, DocumentError> {
        let start = range.start;
        let extent = self.inner.replace_range(range, markup)?;
        self.highlight = start..start + extent;
        self.writes += 1;
        self.redraw();
        Ok(extent)
    }

    fn delete_selection(&mut self) -> Result<(), DocumentError> {
        self.inner.delete_selection()
    }
}

fn main() {
    env_logger::init();

    let document = TerminalDocument::new("<p>Existing content above the stream.</p>");
    let writer = StreamWriter::with_config(document, WriterConfig::default());
    let (driver, handle) = StreamDriver::with_config(writer, DriverConfig::default());

    let producer = thread::spawn(move || {
        let graphemes: Vec<&str> = SAMPLE_HTML.graphemes(true).collect();
        let token_interval = Duration::from_millis(10); // ~100 tokens/s

        handle.start(false);
        let mut index = 0;
        while index < graphemes.len() {
            // Pseudo-random 1-3 graphemes per token
            let size = ((index * 7) % 3) + 1;
            let end = (index + size).min(graphemes.len());
            handle.write(graphemes[index..end].concat());
            index = end;
            thread::sleep(token_interval);
        }
        handle.stop();
        handle.shutdown();
    });

    let writer = driver.run();
    let _ = producer.join();

    let stats = writer.stats();
    println!(
        "\nDone: {} renders, {} throttled frames, {} unchanged, {} conflicts",
        stats.renders, stats.throttled, stats.unchanged, stats.conflicts
    );
}
