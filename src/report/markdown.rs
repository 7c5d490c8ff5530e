use super::{ExportError, ExportSnapshot, ReportKind, ReportRenderer, APP_NAME};

/// Plain text report shared through the clipboard or saved as `.md`.
#[derive(Debug, Clone, Copy, Default)]
pub struct MarkdownRenderer;

impl MarkdownRenderer {
    pub fn to_markdown(&self, s: &ExportSnapshot) -> String {
        format!(
            "## ⛽ {APP_NAME} Report

📅 **Date:** {date}

---

### 📋 Information
| Item | Value |
|------|-------|
| 📊 Method | {method} |
| ⛽ Fuel Price | {price} |
| 🚗 Consumption | {consumption} |

---

### 💰 Results
| Item | Value |
|------|-------|
| 💵 Fuel Cost | {fuel_cost} |
| 🛢️ Liters Used | {liters} |
| 📏 Cost per km | {per_km} |
| ⚡ Efficiency | {efficiency} |
| 🚙 Rental Fee | {rental} |

---

### 🏆 TOTAL: {total}

---
*Generated by {APP_NAME} ❤️*",
            date = s.date,
            method = s.method,
            price = s.fuel_price,
            consumption = s.consumption,
            fuel_cost = s.fuel_cost,
            liters = s.liters,
            per_km = s.per_km,
            efficiency = s.efficiency,
            rental = s.rental,
            total = s.total,
        )
    }
}

impl ReportRenderer for MarkdownRenderer {
    fn kind(&self) -> ReportKind {
        ReportKind::Markdown
    }

    fn render(&self, snapshot: &ExportSnapshot) -> Result<Vec<u8>, ExportError> {
        Ok(self.to_markdown(snapshot).into_bytes())
    }
}
