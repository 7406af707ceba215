//! Console rendering: banner, bordered panels, centred text and line input.

use std::io::{BufRead, Write};
use std::thread;
use std::time::Duration;

use anyhow::Result;
use crossterm::cursor::MoveTo;
use crossterm::queue;
use crossterm::style::{Color, Stylize};
use crossterm::terminal::{Clear, ClearType};

const BANNER: &str = r" ____  _   _  ____    _    _  __ _   _
/ ___|| | | |/ ___|  / \  | |/ /| | | |
\___ \| | | | |  _  / _ \ | ' / | | | |
 ___) | |_| | |_| |/ ___ \| . \ | |_| |
|____/ \___/ \____/_/   \_\_|\_\ \___/";

const RETURN_PROMPT: &str = "Press Enter to return to the main menu...";

/// A line-oriented console over any reader and writer.
pub struct Console<R, W> {
    input: R,
    out: W,
    width: usize,
    pause: Duration,
    clear_screen: bool,
}

impl<R: BufRead, W: Write> Console<R, W> {
    pub fn new(input: R, out: W, width: usize) -> Self {
        Self {
            input,
            out,
            width,
            pause: Duration::ZERO,
            clear_screen: false,
        }
    }

    /// Delay applied by [`Console::pause`].
    pub fn with_pause(mut self, pause: Duration) -> Self {
        self.pause = pause;
        self
    }

    /// Only worth enabling when the output is a terminal.
    pub fn with_clear_screen(mut self, clear_screen: bool) -> Self {
        self.clear_screen = clear_screen;
        self
    }

    pub fn clear(&mut self) -> Result<()> {
        if self.clear_screen {
            queue!(self.out, Clear(ClearType::All), MoveTo(0, 0))?;
        }
        self.out.flush()?;
        Ok(())
    }

    /// Clear the screen and draw the boxed banner.
    pub fn header(&mut self) -> Result<()> {
        self.clear()?;
        let inner = self.width.saturating_sub(2);
        writeln!(self.out, "{}", border('┌', '┐', self.width).with(Color::Magenta))?;
        for line in BANNER.lines() {
            let row = format!("│{}│", center(line, inner));
            writeln!(self.out, "{}", row.with(Color::Cyan))?;
        }
        writeln!(self.out, "{}", border('└', '┘', self.width).with(Color::Magenta))?;
        Ok(())
    }

    /// A titled, bordered block. Body entries may contain newlines.
    pub fn panel(&mut self, title: &str, body: &[String], color: Color) -> Result<()> {
        writeln!(self.out)?;
        writeln!(self.out, "{}", border('┌', '┐', self.width).with(Color::Magenta))?;
        self.centered(title, Color::Yellow)?;
        writeln!(self.out, "{}", border('├', '┤', self.width).with(Color::Magenta))?;
        writeln!(self.out)?;
        for entry in body {
            self.centered(entry, color)?;
        }
        writeln!(self.out)?;
        writeln!(self.out, "{}", border('└', '┘', self.width).with(Color::Magenta))?;
        Ok(())
    }

    pub fn centered(&mut self, text: &str, color: Color) -> Result<()> {
        for line in text.lines() {
            writeln!(self.out, "{}", center(line, self.width).with(color))?;
        }
        Ok(())
    }

    /// A centred message preceded by a blank line.
    pub fn notice(&mut self, text: &str, color: Color) -> Result<()> {
        writeln!(self.out)?;
        self.centered(text, color)
    }

    /// Prompt and read one trimmed line. `None` once input is exhausted.
    pub fn read_line(&mut self, prompt: &str) -> Result<Option<String>> {
        write!(self.out, "{}", prompt.with(Color::Cyan))?;
        self.out.flush()?;
        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            writeln!(self.out)?;
            return Ok(None);
        }
        Ok(Some(line.trim().to_string()))
    }

    pub fn wait_for_enter(&mut self) -> Result<()> {
        writeln!(self.out)?;
        self.read_line(RETURN_PROMPT)?;
        Ok(())
    }

    pub fn pause(&mut self) -> Result<()> {
        self.out.flush()?;
        if !self.pause.is_zero() {
            thread::sleep(self.pause);
        }
        Ok(())
    }

    #[cfg(test)]
    pub fn into_output(self) -> W {
        self.out
    }
}

/// Centre `text` in a field of `width` characters.
pub fn center(text: &str, width: usize) -> String {
    format!("{text:^width$}")
}

fn border(left: char, right: char, width: usize) -> String {
    format!("{left}{}{right}", "─".repeat(width.saturating_sub(2)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn console(input: &str, width: usize) -> Console<Cursor<Vec<u8>>, Vec<u8>> {
        Console::new(Cursor::new(input.as_bytes().to_vec()), Vec::new(), width)
    }

    fn output(console: Console<Cursor<Vec<u8>>, Vec<u8>>) -> String {
        String::from_utf8(console.into_output()).unwrap()
    }

    #[test]
    fn center_pads_both_sides() {
        assert_eq!(center("ab", 6), "  ab  ");
        assert_eq!(center("abc", 6), " abc  ");
        assert_eq!(center("too long", 4), "too long");
    }

    #[test]
    fn border_spans_the_width() {
        let b = border('┌', '┐', 10);
        assert_eq!(b.chars().count(), 10);
        assert!(b.starts_with('┌') && b.ends_with('┐'));
    }

    #[test]
    fn read_line_trims_and_detects_eof() {
        let mut c = console("  2 \n", 40);
        assert_eq!(c.read_line("> ").unwrap(), Some("2".to_string()));
        assert_eq!(c.read_line("> ").unwrap(), None);
    }

    #[test]
    fn panel_renders_title_and_every_body_line() {
        let mut c = console("", 60);
        c.panel(
            "STATISTICS",
            &["first\nsecond".to_string(), "third".to_string()],
            Color::Green,
        )
        .unwrap();
        let out = output(c);
        for expected in ["STATISTICS", "first", "second", "third", "├", "└"] {
            assert!(out.contains(expected), "missing {expected} in {out}");
        }
    }

    #[test]
    fn header_draws_the_banner() {
        let mut c = console("", 60);
        c.header().unwrap();
        let out = output(c);
        assert!(out.contains("|____/"));
        assert!(out.contains('┌'));
    }

    #[test]
    fn clear_is_silent_when_disabled() {
        let mut c = console("", 60);
        c.clear().unwrap();
        assert!(output(c).is_empty());
    }
}
