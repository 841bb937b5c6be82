use std::borrow::Cow;

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Widget, Wrap},
};

use crate::dashboard::PredictionPanel;
use crate::model::bank::{Bank, ModelKind, MODEL_NOTE};
use crate::news;
use crate::simulator::{self, Direction, SimulationOutcome};
use crate::stats::StatisticsSnapshot;
use crate::test_curve::TestCurve;

use super::FetchStatus;

fn panel_block(title: &str) -> Block<'_> {
    Block::default()
        .title(title)
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::DarkGray))
}

fn label<'a>(text: impl Into<Cow<'a, str>>) -> Span<'a> {
    Span::styled(text, Style::default().fg(Color::DarkGray))
}

fn signed_color(val: f64) -> Color {
    if val > 0.0 {
        Color::Green
    } else if val < 0.0 {
        Color::Red
    } else {
        Color::White
    }
}

pub struct StatsPanel<'a> {
    stats: Option<&'a StatisticsSnapshot>,
}

impl<'a> StatsPanel<'a> {
    pub fn new(stats: Option<&'a StatisticsSnapshot>) -> Self {
        Self { stats }
    }
}

impl Widget for StatsPanel<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let block = panel_block(" Statistics ");
        let Some(stats) = self.stats else {
            Paragraph::new(Line::from(label("no data")))
                .block(block)
                .render(area, buf);
            return;
        };

        let value = Style::default().fg(Color::White);
        let trend = match stats.trend_percent {
            Some(t) => Span::styled(format!(" {:.3}%", t), Style::default().fg(signed_color(t))),
            None => Span::styled(" ---", value),
        };
        let vol = match stats.volatility_percent {
            Some(v) => Span::styled(format!(" {:.2}%", v), value),
            None => Span::styled(" ---", value),
        };

        let lines = vec![
            Line::from(vec![label("Mean: "), Span::styled(format!(" €{:.2}", stats.mean), value)]),
            Line::from(vec![label("Max:  "), Span::styled(format!(" €{:.2}", stats.max), value)]),
            Line::from(vec![label("Min:  "), Span::styled(format!(" €{:.2}", stats.min), value)]),
            Line::from(vec![label("Trend:"), trend]),
            Line::from(vec![label("Vol:  "), vol]),
        ];
        Paragraph::new(lines).block(block).render(area, buf);
    }
}

pub struct PredictionPanelWidget<'a> {
    panel: Option<&'a PredictionPanel>,
    status: &'a FetchStatus,
}

impl<'a> PredictionPanelWidget<'a> {
    pub fn new(panel: Option<&'a PredictionPanel>, status: &'a FetchStatus) -> Self {
        Self { panel, status }
    }
}

impl Widget for PredictionPanelWidget<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let title = match self.panel {
            Some(p) => format!(" {} forecast ", p.bank.profile().model.short_name()),
            None => " Forecast ".to_string(),
        };
        let block = panel_block(&title);

        let mut lines = Vec::new();
        match (self.status, self.panel) {
            (FetchStatus::Loading, _) => {
                lines.push(Line::from(label("Computing predictions...")));
            }
            (FetchStatus::Failed(_), _) => {
                lines.push(Line::from(Span::styled(
                    "Could not reach the forecast API",
                    Style::default().fg(Color::Red),
                )));
            }
            (FetchStatus::Idle, None) => {
                lines.push(Line::from(label("Press 1-3 to forecast 1-3 days")));
            }
            (FetchStatus::Idle, Some(panel)) => {
                for (i, v) in panel.shown.iter().enumerate() {
                    lines.push(Line::from(vec![
                        label(format!("Day {}  ", i + 1)),
                        Span::styled(
                            format!("€{:.2}", v),
                            Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
                        ),
                    ]));
                }
                lines.push(Line::from(label(panel.heading())));
                let mae = match &panel.mae {
                    Ok(v) => Span::styled(format!("MAE €{:.4}", v), Style::default().fg(Color::Yellow)),
                    Err(e) => Span::styled(e.clone(), Style::default().fg(Color::Red)),
                };
                lines.push(Line::from(mae));
                lines.push(Line::from(label(panel.bank.profile().history_url)));
            }
        }

        Paragraph::new(lines).block(block).render(area, buf);
    }
}

pub struct SimulatorPanel<'a> {
    factor: f64,
    outcome: Option<&'a SimulationOutcome>,
    status: &'a FetchStatus,
}

impl<'a> SimulatorPanel<'a> {
    pub fn new(factor: f64, outcome: Option<&'a SimulationOutcome>, status: &'a FetchStatus) -> Self {
        Self {
            factor,
            outcome,
            status,
        }
    }
}

impl Widget for SimulatorPanel<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let block = panel_block(" Scenario ");
        let pct_color = match simulator::direction(self.factor) {
            Direction::Up => Color::Green,
            Direction::Down => Color::Red,
            Direction::Flat => Color::White,
        };
        let mut lines = vec![Line::from(vec![
            label("Open shift "),
            Span::styled(simulator::percent_label(self.factor), Style::default().fg(pct_color)),
        ])];

        match (self.status, self.outcome) {
            (FetchStatus::Failed(_), _) => {
                lines.push(Line::from(Span::styled("Error", Style::default().fg(Color::Red))));
            }
            (FetchStatus::Loading, _) => {
                lines.push(Line::from(label("...")));
            }
            (FetchStatus::Idle, Some(outcome)) => {
                if let Some(shift) = outcome.shift {
                    lines.push(Line::from(vec![
                        label("Open "),
                        Span::styled(format!("€{:.2} ", shift.new_open), Style::default().fg(Color::White)),
                        Span::styled(
                            format!("{}€{:.2}", if shift.delta >= 0.0 { "+" } else { "-" }, shift.delta.abs()),
                            Style::default().fg(signed_color(shift.delta)),
                        ),
                    ]));
                }
                for (i, v) in outcome.closes.iter().enumerate() {
                    lines.push(Line::from(vec![
                        label(format!("Day {}  ", i + 1)),
                        Span::styled(format!("€{:.2}", v), Style::default().fg(Color::White)),
                    ]));
                }
            }
            (FetchStatus::Idle, None) => {
                lines.push(Line::from(label("[+]/[-] to shift the open")));
            }
        }

        Paragraph::new(lines).block(block).render(area, buf);
    }
}

pub struct TestCurvePanel<'a> {
    curve: Option<&'a TestCurve>,
}

impl<'a> TestCurvePanel<'a> {
    pub fn new(curve: Option<&'a TestCurve>) -> Self {
        Self { curve }
    }
}

impl Widget for TestCurvePanel<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let block = panel_block(" Test curve ");
        let Some(curve) = self.curve else {
            Paragraph::new(Line::from(label("no test data")))
                .block(block)
                .render(area, buf);
            return;
        };

        let mut lines = Vec::new();
        if let Ok(mae) = curve.mae() {
            lines.push(Line::from(vec![
                label("MAE "),
                Span::styled(format!("€{:.4}", mae), Style::default().fg(Color::Yellow)),
            ]));
        }
        let rows = area.height.saturating_sub(3) as usize;
        let start = curve.points.len().saturating_sub(rows);
        for p in &curve.points[start..] {
            lines.push(Line::from(vec![
                label(p.date.format("%m-%d ").to_string()),
                Span::styled(format!("{:.2}", p.real), Style::default().fg(Color::White)),
                label(" / "),
                Span::styled(format!("{:.2}", p.predicted), Style::default().fg(Color::Magenta)),
            ]));
        }
        Paragraph::new(lines).block(block).render(area, buf);
    }
}

pub struct NewsPanel {
    bank: Bank,
}

impl NewsPanel {
    pub fn new(bank: Bank) -> Self {
        Self { bank }
    }
}

impl Widget for NewsPanel {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let title = format!(" News: {} ", self.bank);
        let block = panel_block(&title);
        let mut lines = Vec::new();
        for item in news::headlines(self.bank) {
            lines.push(Line::from(Span::styled(
                item.title,
                Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
            )));
            lines.push(Line::from(label(item.age)));
        }
        Paragraph::new(lines).block(block).render(area, buf);
    }
}

pub struct ModelPanel {
    model: ModelKind,
}

impl ModelPanel {
    pub fn new(model: ModelKind) -> Self {
        Self { model }
    }
}

impl Widget for ModelPanel {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let info = self.model.info();
        let block = panel_block(" Model [L]STM/[G]RU ");
        let mut lines = vec![
            Line::from(Span::styled(
                info.title,
                Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
            )),
            Line::from(info.description),
        ];
        for h in info.highlights {
            lines.push(Line::from(format!("• {}", h)));
        }
        lines.push(Line::from(label(MODEL_NOTE)));
        Paragraph::new(lines)
            .block(block)
            .wrap(Wrap { trim: true })
            .render(area, buf);
    }
}

pub struct LogPanel<'a> {
    messages: &'a [String],
}

impl<'a> LogPanel<'a> {
    pub fn new(messages: &'a [String]) -> Self {
        Self { messages }
    }
}

impl Widget for LogPanel<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let block = panel_block(" Log ");
        let rows = area.height.saturating_sub(2) as usize;
        let start = self.messages.len().saturating_sub(rows);
        let lines: Vec<Line> = self.messages[start..]
            .iter()
            .map(|msg| {
                let color = if msg.starts_with("[ERR]") {
                    Color::Red
                } else if msg.starts_with("[WARN]") {
                    Color::Yellow
                } else {
                    Color::Gray
                };
                Line::from(Span::styled(msg.as_str(), Style::default().fg(color)))
            })
            .collect();
        Paragraph::new(lines).block(block).render(area, buf);
    }
}

pub struct StatusBar<'a> {
    pub bank: Bank,
    pub model: ModelKind,
    pub interval: &'a str,
    pub current_price: Option<f64>,
    pub forecast_status: &'a FetchStatus,
}

impl Widget for StatusBar<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let (r, g, b) = self.bank.profile().accent;
        let price = self
            .current_price
            .map(|p| format!("€{:.2}", p))
            .unwrap_or_else(|| "---".to_string());
        let forecast = match self.forecast_status {
            FetchStatus::Idle => Span::styled("API OK", Style::default().fg(Color::Green)),
            FetchStatus::Loading => Span::styled("API ...", Style::default().fg(Color::Yellow)),
            FetchStatus::Failed(_) => Span::styled("API DOWN", Style::default().fg(Color::Red)),
        };

        let line = Line::from(vec![
            Span::styled(
                " bank-dashboard ",
                Style::default()
                    .fg(Color::White)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::styled("| ", Style::default().fg(Color::DarkGray)),
            Span::styled(
                format!("{} • {}", self.model.short_name(), self.bank),
                Style::default().fg(Color::Rgb(r, g, b)),
            ),
            Span::styled(" | ", Style::default().fg(Color::DarkGray)),
            Span::styled(price, Style::default().fg(Color::Rgb(r, g, b))),
            Span::styled(" | ", Style::default().fg(Color::DarkGray)),
            Span::styled(self.interval.to_string(), Style::default().fg(Color::White)),
            Span::styled(" | ", Style::default().fg(Color::DarkGray)),
            forecast,
        ]);

        buf.set_line(area.x, area.y, &line, area.width);
    }
}

pub struct KeybindBar;

impl Widget for KeybindBar {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let key = Style::default().fg(Color::Yellow);
        let text = Style::default().fg(Color::DarkGray);
        let line = Line::from(vec![
            Span::styled(" [Q]", key),
            Span::styled("uit  ", text),
            Span::styled("[B]", key),
            Span::styled("BVA  ", text),
            Span::styled("[S]", key),
            Span::styled("antander  ", text),
            Span::styled("[←/→]", key),
            Span::styled(" interval  ", text),
            Span::styled("[1-3]", key),
            Span::styled(" forecast  ", text),
            Span::styled("[+/-]", key),
            Span::styled(" scenario  ", text),
            Span::styled("[R]", key),
            Span::styled("eload", text),
        ]);

        buf.set_line(area.x, area.y, &line, area.width);
    }
}
