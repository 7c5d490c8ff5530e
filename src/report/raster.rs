use std::io::Cursor;

use font8x8::{UnicodeFonts, BASIC_FONTS};
use image::{ImageOutputFormat, Rgba, RgbaImage};

use super::{ExportError, ExportSnapshot, ReportKind, ReportRenderer, APP_NAME};

const GLYPH: u32 = 8;

const GRADIENT_TOP: Rgba<u8> = Rgba([0x66, 0x7e, 0xea, 0xff]);
const GRADIENT_BOTTOM: Rgba<u8> = Rgba([0x76, 0x4b, 0xa2, 0xff]);
const WHITE: Rgba<u8> = Rgba([0xff, 0xff, 0xff, 0xff]);
const ACCENT: Rgba<u8> = Rgba([0x09, 0x84, 0xe3, 0xff]);
const TEXT_DARK: Rgba<u8> = Rgba([0x2d, 0x34, 0x36, 0xff]);
const TEXT_MUTED: Rgba<u8> = Rgba([0x63, 0x6e, 0x72, 0xff]);
const PANEL: Rgba<u8> = Rgba([0xf8, 0xf9, 0xfa, 0xff]);
const FOOTER: Rgba<u8> = Rgba([0xb2, 0xbe, 0xc3, 0xff]);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Align {
    Left,
    Center,
}

/// Minimal drawing surface over an RGBA buffer.
struct Canvas {
    img: RgbaImage,
}

impl Canvas {
    fn new(width: u32, height: u32) -> Self {
        Self {
            img: RgbaImage::new(width, height),
        }
    }

    fn width(&self) -> u32 {
        self.img.width()
    }

    fn put(&mut self, x: i64, y: i64, color: Rgba<u8>) {
        if x >= 0 && y >= 0 && (x as u32) < self.img.width() && (y as u32) < self.img.height() {
            self.img.put_pixel(x as u32, y as u32, color);
        }
    }

    fn vertical_gradient(&mut self, top: Rgba<u8>, bottom: Rgba<u8>) {
        let h = self.img.height().max(2) - 1;
        for y in 0..self.img.height() {
            let t = y as f32 / h as f32;
            let mut c = [0u8; 4];
            for (i, ch) in c.iter_mut().enumerate() {
                *ch = (top.0[i] as f32 + (bottom.0[i] as f32 - top.0[i] as f32) * t).round() as u8;
            }
            for x in 0..self.img.width() {
                self.img.put_pixel(x, y, Rgba(c));
            }
        }
    }

    /// Fills a rectangle whose corners are rounded with radius `r`.
    /// With `top_only` the bottom corners stay square.
    #[allow(clippy::too_many_arguments)]
    fn round_rect(&mut self, x: i64, y: i64, w: i64, h: i64, r: i64, top_only: bool, color: Rgba<u8>) {
        for py in y..y + h {
            for px in x..x + w {
                let cx = if px < x + r {
                    Some(x + r)
                } else if px >= x + w - r {
                    Some(x + w - r - 1)
                } else {
                    None
                };
                let cy = if py < y + r {
                    Some(y + r)
                } else if !top_only && py >= y + h - r {
                    Some(y + h - r - 1)
                } else {
                    None
                };
                if let (Some(cx), Some(cy)) = (cx, cy) {
                    let (dx, dy) = (px - cx, py - cy);
                    if dx * dx + dy * dy > r * r {
                        continue;
                    }
                }
                self.put(px, py, color);
            }
        }
    }

    fn text_width(text: &str, scale: u32) -> i64 {
        (text.chars().count() as u32 * GLYPH * scale) as i64
    }

    /// Largest scale not above `preferred` that keeps the text within `max_width`.
    fn fit_scale(text: &str, preferred: u32, max_width: i64) -> u32 {
        let mut scale = preferred.max(1);
        while scale > 1 && Self::text_width(text, scale) > max_width {
            scale -= 1;
        }
        scale
    }

    /// Draws text with its baseline at `baseline`.
    #[allow(clippy::too_many_arguments)]
    fn text(&mut self, text: &str, x: i64, baseline: i64, scale: u32, bold: bool, align: Align, color: Rgba<u8>) {
        let scale = scale.max(1);
        let start_x = match align {
            Align::Left => x,
            Align::Center => x - Self::text_width(text, scale) / 2,
        };
        let top = baseline - (GLYPH * scale) as i64;
        for (i, ch) in text.chars().enumerate() {
            let glyph = BASIC_FONTS
                .get(ch)
                .or_else(|| BASIC_FONTS.get('?'))
                .unwrap_or([0; 8]);
            let gx = start_x + (i as u32 * GLYPH * scale) as i64;
            for (row, &bits) in glyph.iter().enumerate() {
                for col in 0..GLYPH {
                    if bits & (1u8 << col) == 0 {
                        continue;
                    }
                    let px = gx + (col * scale) as i64;
                    let py = top + (row as u32 * scale) as i64;
                    for sy in 0..scale as i64 {
                        for sx in 0..scale as i64 {
                            self.put(px + sx, py + sy, color);
                            if bold {
                                self.put(px + sx + 1, py + sy, color);
                            }
                        }
                    }
                }
            }
        }
    }
}

/// Fixed-layout PNG card of the report.
#[derive(Debug, Clone, Copy)]
pub struct PngRenderer {
    pub width: u32,
    pub height: u32,
}

impl Default for PngRenderer {
    fn default() -> Self {
        Self {
            width: 600,
            height: 700,
        }
    }
}

impl PngRenderer {
    /// Draws the report onto a fresh RGBA buffer.
    pub fn draw(&self, s: &ExportSnapshot) -> RgbaImage {
        let mut c = Canvas::new(self.width, self.height);
        let w = c.width() as i64;
        let h = self.height as i64;
        let mid = w / 2;

        c.vertical_gradient(GRADIENT_TOP, GRADIENT_BOTTOM);
        c.round_rect(30, 30, w - 60, h - 60, 20, false, WHITE);
        c.round_rect(30, 30, w - 60, 100, 20, true, ACCENT);

        c.text(APP_NAME, mid, 85, 4, true, Align::Center, WHITE);
        let subtitle = format!("Fuel Cost Report - {}", s.date);
        let sub_scale = Canvas::fit_scale(&subtitle, 2, w - 80);
        c.text(&subtitle, mid, 115, sub_scale, false, Align::Center, WHITE);

        c.text("INFORMATION", 60, 170, 2, true, Align::Left, TEXT_DARK);
        for (i, (label, value)) in s.info_rows().iter().enumerate() {
            let line = format!("{label}: {value}");
            c.text(&line, 60, 200 + 25 * i as i64, 2, false, Align::Left, TEXT_MUTED);
        }

        c.round_rect(50, 280, w - 100, 200, 15, false, PANEL);
        c.text("CALCULATION RESULTS", mid, 315, 2, true, Align::Center, ACCENT);

        let col1 = 80;
        let col2 = mid + 20;
        for (i, (label, value)) in s.result_rows().iter().enumerate() {
            let x = if i % 2 == 0 { col1 } else { col2 };
            let y = 350 + 55 * (i as i64 / 2);
            let value_scale = Canvas::fit_scale(value, 2, mid - 50);
            c.text(&format!("{label}:"), x, y, 2, false, Align::Left, TEXT_MUTED);
            c.text(value, x, y + 22, value_scale, true, Align::Left, TEXT_DARK);
        }

        c.round_rect(50, 510, w - 100, 60, 15, false, ACCENT);
        let total = format!("TOTAL: {}", s.total);
        let total_scale = Canvas::fit_scale(&total, 3, w - 120);
        c.text(&total, mid, 550, total_scale, true, Align::Center, WHITE);

        c.text(&format!("Generated by {APP_NAME}"), mid, 620, 1, false, Align::Center, FOOTER);
        c.img
    }
}

impl ReportRenderer for PngRenderer {
    fn kind(&self) -> ReportKind {
        ReportKind::Png
    }

    fn render(&self, snapshot: &ExportSnapshot) -> Result<Vec<u8>, ExportError> {
        let img = self.draw(snapshot);
        let mut out = Cursor::new(Vec::new());
        img.write_to(&mut out, ImageOutputFormat::Png)?;
        Ok(out.into_inner())
    }
}
