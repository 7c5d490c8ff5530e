use printpdf::{
    BuiltinFont, Color, IndirectFontRef, Mm, PdfDocument, PdfLayerReference, Rect, Rgb,
};

use super::{ExportError, ExportSnapshot, ReportKind, ReportRenderer, APP_NAME};

const PAGE_W: f32 = 210.0;
const PAGE_H: f32 = 297.0;
const PT_TO_MM: f32 = 0.3528;
/// Rough average Helvetica advance as a fraction of the font size.
const AVG_ADVANCE: f32 = 0.5;

fn pdf_err(e: impl std::fmt::Display) -> ExportError {
    ExportError::Pdf(e.to_string())
}

fn rgb(r: u8, g: u8, b: u8) -> Color {
    Color::Rgb(Rgb::new(r as f32 / 255.0, g as f32 / 255.0, b as f32 / 255.0, None))
}

/// Layer wrapper taking top-left coordinates in millimeters.
struct Page<'a> {
    layer: PdfLayerReference,
    regular: &'a IndirectFontRef,
    bold: &'a IndirectFontRef,
}

impl Page<'_> {
    fn fill(&self, color: Color, x: f32, y: f32, w: f32, h: f32) {
        self.layer.set_fill_color(color);
        self.layer
            .add_rect(Rect::new(Mm(x), Mm(PAGE_H - y - h), Mm(x + w), Mm(PAGE_H - y)));
    }

    fn text(&self, text: &str, size: f32, x: f32, y: f32, bold: bool, color: Color) {
        let font = if bold { self.bold } else { self.regular };
        self.layer.set_fill_color(color);
        self.layer.use_text(text, size, Mm(x), Mm(PAGE_H - y), font);
    }

    fn centered(&self, text: &str, size: f32, y: f32, bold: bool, color: Color) {
        let width = text.chars().count() as f32 * size * AVG_ADVANCE * PT_TO_MM;
        self.text(text, size, (PAGE_W - width) / 2.0, y, bold, color);
    }
}

/// Single A4 page with the report fields.
#[derive(Debug, Clone, Copy, Default)]
pub struct PdfRenderer;

impl ReportRenderer for PdfRenderer {
    fn kind(&self) -> ReportKind {
        ReportKind::Pdf
    }

    fn render(&self, s: &ExportSnapshot) -> Result<Vec<u8>, ExportError> {
        let (doc, page, layer) = PdfDocument::new(&s.title, Mm(PAGE_W), Mm(PAGE_H), "report");
        let regular = doc.add_builtin_font(BuiltinFont::Helvetica).map_err(pdf_err)?;
        let bold = doc.add_builtin_font(BuiltinFont::HelveticaBold).map_err(pdf_err)?;
        let p = Page {
            layer: doc.get_page(page).get_layer(layer),
            regular: &regular,
            bold: &bold,
        };

        let accent = || rgb(9, 132, 227);
        let dark = || rgb(45, 52, 54);
        let white = || rgb(255, 255, 255);

        p.fill(accent(), 0.0, 0.0, PAGE_W, 45.0);
        p.centered(APP_NAME, 28.0, 22.0, true, white());
        p.centered("Fuel Cost Report", 11.0, 33.0, false, white());
        p.centered(&s.date, 10.0, 42.0, false, white());

        p.text("INFORMATION", 12.0, 20.0, 60.0, true, dark());
        for (i, (label, value)) in s.info_rows().iter().enumerate() {
            let y = 72.0 + 10.0 * i as f32;
            p.text(&format!("{label}: {value}"), 11.0, 25.0, y, false, dark());
        }

        p.fill(rgb(240, 242, 245), 15.0, 102.0, PAGE_W - 30.0, 75.0);
        p.centered("CALCULATION RESULTS", 13.0, 118.0, true, accent());

        let col1 = 25.0;
        let col2 = PAGE_W / 2.0 + 10.0;
        for (i, (label, value)) in s.result_rows().iter().enumerate() {
            let x = if i % 2 == 0 { col1 } else { col2 };
            let y = 135.0 + 15.0 * (i / 2) as f32;
            p.text(&format!("{label}: {value}"), 11.0, x, y, false, dark());
        }

        p.fill(accent(), 15.0, 190.0, PAGE_W - 30.0, 25.0);
        p.centered(&format!("TOTAL: {}", s.total), 16.0, 207.0, true, white());

        p.centered(&format!("Generated by {APP_NAME}"), 9.0, 235.0, false, rgb(150, 150, 150));

        doc.save_to_bytes().map_err(pdf_err)
    }
}
