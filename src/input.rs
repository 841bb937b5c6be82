use crossterm::event::KeyCode;

use crate::model::bank::{Bank, ModelKind};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UiCommand {
    Quit,
    SelectBank(Bank),
    NextInterval,
    PrevInterval,
    Forecast { days: usize },
    ShowModel(ModelKind),
    ScenarioUp,
    ScenarioDown,
    Reload,
}

pub fn parse_main_command(key_code: &KeyCode) -> Option<UiCommand> {
    match key_code {
        KeyCode::Esc => Some(UiCommand::Quit),
        KeyCode::Right | KeyCode::Tab => Some(UiCommand::NextInterval),
        KeyCode::Left | KeyCode::BackTab => Some(UiCommand::PrevInterval),
        KeyCode::Up => Some(UiCommand::ScenarioUp),
        KeyCode::Down => Some(UiCommand::ScenarioDown),
        KeyCode::Char('+') | KeyCode::Char('=') => Some(UiCommand::ScenarioUp),
        KeyCode::Char('-') | KeyCode::Char('_') => Some(UiCommand::ScenarioDown),
        KeyCode::Char(c @ '1'..='3') => Some(UiCommand::Forecast {
            days: (*c as u8 - b'0') as usize,
        }),
        KeyCode::Char(c) => match c.to_ascii_lowercase() {
            'q' => Some(UiCommand::Quit),
            'b' => Some(UiCommand::SelectBank(Bank::Bbva)),
            's' => Some(UiCommand::SelectBank(Bank::Santander)),
            'l' => Some(UiCommand::ShowModel(ModelKind::Lstm)),
            'g' => Some(UiCommand::ShowModel(ModelKind::Gru)),
            'r' => Some(UiCommand::Reload),
            _ => None,
        },
        _ => None,
    }
}
