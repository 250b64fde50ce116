//! Tile layouts and drawing.
//!
//! Layout is computed as a [`Frame`] (positioned text lines) so the row order
//! and positions can be checked without inspecting pixels; [`Frame::draw`]
//! then rasterizes it onto a [`RenderSurface`].

use embedded_graphics::Drawable;
use embedded_graphics::mono_font::MonoTextStyle;
use embedded_graphics::mono_font::ascii::{FONT_9X18, FONT_9X18_BOLD};
use embedded_graphics::pixelcolor::Rgb888;
use embedded_graphics::prelude::{Point, RgbColor};
use embedded_graphics::text::{Alignment, Baseline, Text, TextStyleBuilder};

use crate::stats::FormattedStats;

mod surface;

pub use surface::{RenderSurface, SURFACE_SIZE};

pub const LOADING_TEXT: &str = "Loading...";

/// Left edge of every stats row.
const ROW_X: i32 = 10;
/// Baseline of the first row.
const TOP_MARGIN: i32 = 20;
/// Baseline distance between consecutive rows.
const ROW_PITCH: i32 = 22;
const LOADING_BASELINE: i32 = 62;

const HEADING_COLOR: Rgb888 = Rgb888::new(0xAA, 0xAA, 0xAA);

/// Text style of a line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextRole {
    /// Row label: bold, muted gray.
    Heading,
    /// Row value: regular, white.
    Paragraph,
}

impl TextRole {
    fn character_style(self) -> MonoTextStyle<'static, Rgb888> {
        match self {
            TextRole::Heading => MonoTextStyle::new(&FONT_9X18_BOLD, HEADING_COLOR),
            TextRole::Paragraph => MonoTextStyle::new(&FONT_9X18, Rgb888::WHITE),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextAlign {
    Left,
    Center,
}

impl From<TextAlign> for Alignment {
    fn from(align: TextAlign) -> Self {
        match align {
            TextAlign::Left => Alignment::Left,
            TextAlign::Center => Alignment::Center,
        }
    }
}

/// One line of text anchored at its alphabetic baseline.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextLine {
    pub text: String,
    pub role: TextRole,
    pub align: TextAlign,
    pub x: i32,
    pub y: i32,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Frame {
    pub lines: Vec<TextLine>,
}

impl Frame {
    /// Clears `surface` and draws every line onto it.
    pub fn draw(&self, surface: &mut RenderSurface) {
        surface.clear();
        for line in &self.lines {
            let text_style = TextStyleBuilder::new()
                .alignment(line.align.into())
                .baseline(Baseline::Alphabetic)
                .build();
            let Ok(_) = Text::with_text_style(
                &line.text,
                Point::new(line.x, line.y),
                line.role.character_style(),
                text_style,
            )
            .draw(surface);
        }
    }

    pub fn texts(&self) -> Vec<&str> {
        self.lines.iter().map(|line| line.text.as_str()).collect()
    }
}

/// Centered placeholder shown while the first fetch is in flight.
pub fn loading_frame() -> Frame {
    Frame {
        lines: vec![TextLine {
            text: LOADING_TEXT.to_string(),
            role: TextRole::Heading,
            align: TextAlign::Center,
            x: SURFACE_SIZE as i32 / 2,
            y: LOADING_BASELINE,
        }],
    }
}

/// Hashrate, Balance, Workers: label then value, one row pitch apart.
pub fn stats_frame(stats: &FormattedStats) -> Frame {
    let rows = [
        ("Hashrate", stats.hashrate.as_str()),
        ("Balance", stats.unpaid.as_str()),
        ("Workers", stats.workers.as_str()),
    ];

    let mut y = TOP_MARGIN;
    let mut lines = Vec::with_capacity(rows.len() * 2);
    for (label, value) in rows {
        for (text, role) in [(label, TextRole::Heading), (value, TextRole::Paragraph)] {
            lines.push(TextLine {
                text: text.to_string(),
                role,
                align: TextAlign::Left,
                x: ROW_X,
                y,
            });
            y += ROW_PITCH;
        }
    }
    Frame { lines }
}
