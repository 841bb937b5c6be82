use crossterm::event::KeyCode;

use bank_dashboard::input::{parse_main_command, UiCommand};
use bank_dashboard::model::bank::{Bank, ModelKind};

#[test]
fn parse_main_command_maps_case_insensitive_char_keys() {
    assert_eq!(parse_main_command(&KeyCode::Char('q')), Some(UiCommand::Quit));
    assert_eq!(parse_main_command(&KeyCode::Char('Q')), Some(UiCommand::Quit));
    assert_eq!(
        parse_main_command(&KeyCode::Char('B')),
        Some(UiCommand::SelectBank(Bank::Bbva))
    );
    assert_eq!(
        parse_main_command(&KeyCode::Char('s')),
        Some(UiCommand::SelectBank(Bank::Santander))
    );
    assert_eq!(
        parse_main_command(&KeyCode::Char('l')),
        Some(UiCommand::ShowModel(ModelKind::Lstm))
    );
    assert_eq!(
        parse_main_command(&KeyCode::Char('G')),
        Some(UiCommand::ShowModel(ModelKind::Gru))
    );
    assert_eq!(parse_main_command(&KeyCode::Char('r')), Some(UiCommand::Reload));
}

#[test]
fn parse_main_command_maps_forecast_days() {
    assert_eq!(
        parse_main_command(&KeyCode::Char('1')),
        Some(UiCommand::Forecast { days: 1 })
    );
    assert_eq!(
        parse_main_command(&KeyCode::Char('3')),
        Some(UiCommand::Forecast { days: 3 })
    );
    assert_eq!(parse_main_command(&KeyCode::Char('4')), None);
}

#[test]
fn parse_main_command_maps_navigation_keys() {
    assert_eq!(parse_main_command(&KeyCode::Right), Some(UiCommand::NextInterval));
    assert_eq!(parse_main_command(&KeyCode::Left), Some(UiCommand::PrevInterval));
    assert_eq!(parse_main_command(&KeyCode::Char('+')), Some(UiCommand::ScenarioUp));
    assert_eq!(parse_main_command(&KeyCode::Down), Some(UiCommand::ScenarioDown));
    assert_eq!(parse_main_command(&KeyCode::Esc), Some(UiCommand::Quit));
    assert_eq!(parse_main_command(&KeyCode::Enter), None);
}
