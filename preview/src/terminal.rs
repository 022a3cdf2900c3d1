//! Strip simulation on an ANSI truecolor terminal

use std::io::{self, Write};

use myrtio_frame_composer::driver::brightness8;
use myrtio_frame_composer::{OFF, OutputDriver, Rgb};

const LED_GLYPH: char = '\u{25A0}';

/// Prints the strip on a single, constantly redrawn line
pub struct TerminalDriver<const N: usize> {
    pixels: [Rgb; N],
    brightness: u8,
    out: io::Stdout,
}

impl<const N: usize> TerminalDriver<N> {
    pub fn new() -> Self {
        Self {
            pixels: [OFF; N],
            brightness: 255,
            out: io::stdout(),
        }
    }

    fn render(&self) -> io::Result<()> {
        let mut out = self.out.lock();
        write!(out, "\r")?;
        for (index, pixel) in self.pixels.iter().enumerate() {
            let Rgb { r, g, b } = scale(*pixel, self.brightness);
            if index > 0 {
                write!(out, " ")?;
            }
            write!(out, "\x1b[38;2;{r};{g};{b}m{LED_GLYPH}\x1b[0m")?;
        }
        out.flush()
    }

    /// Move the cursor off the strip line
    pub fn finish(&self) {
        let mut out = self.out.lock();
        // Nothing to recover from on a closed terminal
        let _ = writeln!(out);
        let _ = out.flush();
    }
}

impl<const N: usize> Default for TerminalDriver<N> {
    fn default() -> Self {
        Self::new()
    }
}

impl<const N: usize> OutputDriver for TerminalDriver<N> {
    fn set_pixel(&mut self, index: usize, color: Rgb, brightness: f32) {
        if let Some(pixel) = self.pixels.get_mut(index) {
            *pixel = color;
        }
        self.brightness = brightness8(brightness);
    }

    fn show(&mut self) {
        if let Err(err) = self.render() {
            log::warn!("[TerminalDriver.show] {err}");
        }
    }
}

#[allow(clippy::cast_possible_truncation)]
fn scale(color: Rgb, brightness: u8) -> Rgb {
    let channel = |value: u8| ((u16::from(value) * u16::from(brightness)) / 255) as u8;
    Rgb {
        r: channel(color.r),
        g: channel(color.g),
        b: channel(color.b),
    }
}
