use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Style},
    widgets::{Block, Borders, Widget},
};

use crate::model::forecast::MergedSeries;
use crate::model::price::PricePoint;

const FORECAST_COLOR: Color = Color::Rgb(0xbb, 0x86, 0xfc);

pub struct PriceChart<'a> {
    points: &'a [PricePoint],
    label: &'a str,
    accent: (u8, u8, u8),
    merged: Option<&'a MergedSeries>,
}

impl<'a> PriceChart<'a> {
    pub fn new(points: &'a [PricePoint], label: &'a str, accent: (u8, u8, u8)) -> Self {
        Self {
            points,
            label,
            accent,
            merged: None,
        }
    }

    pub fn merged(mut self, merged: Option<&'a MergedSeries>) -> Self {
        self.merged = merged;
        self
    }
}

fn row_for(price: f64, min_price: f64, range: f64, chart_height: usize) -> usize {
    let normalized = (price - min_price) / range;
    chart_height - 1 - ((normalized * (chart_height - 1) as f64) as usize).min(chart_height - 1)
}

impl Widget for PriceChart<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let (r, g, b) = self.accent;
        let accent = Color::Rgb(r, g, b);
        let block = Block::default()
            .title(format!(" Price ({}) ", self.label))
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::DarkGray));
        let inner = block.inner(area);
        block.render(area, buf);

        if self.points.is_empty() || inner.height < 3 || inner.width < 4 {
            return;
        }

        let chart_height = inner.height.saturating_sub(1) as usize; // last row holds the date axis
        let chart_width = inner.width as usize;

        // (value, is_prediction); the merged anchor repeats the last close and is skipped
        let mut values: Vec<(f64, bool)> = self.points.iter().map(|p| (p.close, false)).collect();
        if let Some(merged) = self.merged {
            values.extend(merged.predictions().map(|p| (p.value, true)));
        }
        let visible = if values.len() > chart_width {
            &values[values.len() - chart_width..]
        } else {
            &values[..]
        };

        let min_price = visible.iter().map(|v| v.0).fold(f64::INFINITY, f64::min);
        let max_price = visible.iter().map(|v| v.0).fold(f64::NEG_INFINITY, f64::max);
        let range = max_price - min_price;
        let range = if range < 0.01 { 1.0 } else { range };

        for (i, &(price, is_prediction)) in visible.iter().enumerate() {
            let x = inner.x + i as u16;
            let y = inner.y + row_for(price, min_price, range, chart_height) as u16;
            let (symbol, color) = if is_prediction {
                ("◆", FORECAST_COLOR)
            } else {
                ("●", accent)
            };
            buf.set_string(x, y, symbol, Style::default().fg(color));
        }

        let label_style = Style::default().fg(Color::DarkGray);
        buf.set_string(inner.x, inner.y, format!("€{:.2}", max_price), label_style);
        buf.set_string(
            inner.x,
            inner.y + chart_height as u16 - 1,
            format!("€{:.2}", min_price),
            label_style,
        );

        let axis_y = inner.y + inner.height - 1;
        if let Some(first) = self.points.first() {
            buf.set_string(inner.x, axis_y, first.date.format("%b %d").to_string(), label_style);
        }
        let last_date = self
            .merged
            .and_then(|m| m.points.last().map(|p| p.date))
            .or_else(|| self.points.last().map(|p| p.date));
        if let Some(date) = last_date {
            let text = date.format("%b %d").to_string();
            let x = inner.x + inner.width.saturating_sub(text.len() as u16);
            buf.set_string(x, axis_y, text, label_style);
        }
    }
}
