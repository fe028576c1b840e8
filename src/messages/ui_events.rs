//! UI events - messages from UI layer to App layer

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// Application tabs
#[derive(Clone, Copy, PartialEq, Debug, Default)]
pub enum AppTab {
    #[default]
    Generate,
    History,
}

/// Events generated from user input in the UI layer
#[derive(Debug, Clone, PartialEq)]
pub enum UiEvent {
    // Tab navigation
    SwitchTab(AppTab),

    // URL input editing
    StartEditing,
    StopEditing,
    CharInput(char),
    Backspace,
    CursorLeft,
    CursorRight,

    // Generate tab
    GenerateQuiz,
    OpenLatest,

    // History tab
    ReloadHistory,
    NextHistoryItem,
    PrevHistoryItem,
    OpenHistoryItem,

    // Quiz popup
    QuizNext,
    QuizPrev,
    QuizSelect(usize),
    QuizSubmit,
    QuizClose,

    // Popups
    ToggleHelp,
    CloseHelp,

    // System
    Quit,
}

/// Input mode
#[derive(Clone, Copy, PartialEq, Debug, Default)]
pub enum InputMode {
    #[default]
    Normal,
    Editing,
}

/// Convert a key event to a UiEvent based on current UI context
pub fn key_to_ui_event(
    key: KeyEvent,
    active_tab: AppTab,
    input_mode: InputMode,
    quiz_open: bool,
    show_help: bool,
) -> Option<UiEvent> {
    use crossterm::event::KeyEventKind;

    if key.kind != KeyEventKind::Press {
        return None;
    }

    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        return Some(UiEvent::Quit);
    }

    if show_help {
        return Some(UiEvent::CloseHelp);
    }

    // The quiz popup captures all keys while open
    if quiz_open {
        return handle_quiz_keys(key);
    }

    if input_mode == InputMode::Normal {
        match key.code {
            KeyCode::Char('1') => return Some(UiEvent::SwitchTab(AppTab::Generate)),
            KeyCode::Char('2') => return Some(UiEvent::SwitchTab(AppTab::History)),
            KeyCode::Tab => {
                let next = match active_tab {
                    AppTab::Generate => AppTab::History,
                    AppTab::History => AppTab::Generate,
                };
                return Some(UiEvent::SwitchTab(next));
            }
            _ => {}
        }
    }

    match active_tab {
        AppTab::Generate => handle_generate_tab_keys(key, input_mode),
        AppTab::History => handle_history_tab_keys(key),
    }
}

fn handle_quiz_keys(key: KeyEvent) -> Option<UiEvent> {
    match key.code {
        KeyCode::Esc | KeyCode::Char('q') => Some(UiEvent::QuizClose),
        KeyCode::Left | KeyCode::Char('h') => Some(UiEvent::QuizPrev),
        KeyCode::Right | KeyCode::Char('l') => Some(UiEvent::QuizNext),
        KeyCode::Char('s') => Some(UiEvent::QuizSubmit),
        KeyCode::Char(c @ '1'..='9') => Some(UiEvent::QuizSelect(c as usize - '1' as usize)),
        _ => None,
    }
}

/// Handle keys for the Generate tab
fn handle_generate_tab_keys(key: KeyEvent, input_mode: InputMode) -> Option<UiEvent> {
    match input_mode {
        InputMode::Normal => match key.code {
            KeyCode::Char('q') => Some(UiEvent::Quit),
            KeyCode::Char('?') => Some(UiEvent::ToggleHelp),
            KeyCode::Char('e') | KeyCode::Char('i') => Some(UiEvent::StartEditing),
            KeyCode::Char('g') | KeyCode::Enter => Some(UiEvent::GenerateQuiz),
            KeyCode::Char('t') => Some(UiEvent::OpenLatest),
            _ => None,
        },
        InputMode::Editing => match key.code {
            KeyCode::Esc => Some(UiEvent::StopEditing),
            KeyCode::Left => Some(UiEvent::CursorLeft),
            KeyCode::Right => Some(UiEvent::CursorRight),
            KeyCode::Backspace => Some(UiEvent::Backspace),
            KeyCode::Enter => Some(UiEvent::GenerateQuiz),
            KeyCode::Char(c) => Some(UiEvent::CharInput(c)),
            _ => None,
        },
    }
}

/// Handle keys for the History tab
fn handle_history_tab_keys(key: KeyEvent) -> Option<UiEvent> {
    match key.code {
        KeyCode::Char('q') => Some(UiEvent::Quit),
        KeyCode::Char('?') => Some(UiEvent::ToggleHelp),
        KeyCode::Char('r') => Some(UiEvent::ReloadHistory),
        KeyCode::Up | KeyCode::Char('k') => Some(UiEvent::PrevHistoryItem),
        KeyCode::Down | KeyCode::Char('j') => Some(UiEvent::NextHistoryItem),
        KeyCode::Enter => Some(UiEvent::OpenHistoryItem),
        _ => None,
    }
}
