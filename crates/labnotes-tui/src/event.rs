//! Semantic application events — crossterm key events mapped to a
//! widget-agnostic vocabulary so widgets never touch crossterm directly.
//!
//! | Key(s)                  | Event            |
//! |-------------------------|------------------|
//! | `q`, `Ctrl+c`           | `Quit`           |
//! | `Tab`                   | `FocusNext`      |
//! | `PageUp`, `Ctrl+u`      | `PageUp`         |
//! | `PageDown`, `Ctrl+d`    | `PageDown`       |
//! | `g`, `Home`             | `Top`            |
//! | `G`, `End`              | `Bottom`         |
//! | `↑` / `k`               | `Nav(Up)`        |
//! | `↓` / `j`               | `Nav(Down)`      |
//! | `?`                     | `ToggleHelp`     |
//! | `t`                     | `CycleTheme`     |
//! | `r`                     | `Refresh`        |
//! | `Esc`                   | `Escape`         |
//! | terminal resize         | `Resize(w, h)`   |

use crossterm::event::{Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Up,
    Down,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppEvent {
    Quit,
    /// Move keyboard focus between the entry list and the detail pane.
    FocusNext,
    PageUp,
    PageDown,
    /// Jump to the oldest entry.
    Top,
    /// Jump to the newest entry.
    Bottom,
    Nav(Direction),
    ToggleHelp,
    CycleTheme,
    /// Fetch both sources again and rebuild the timeline.
    Refresh,
    Escape,
    Resize(u16, u16),
}

/// Map a raw crossterm [`Event`] to an [`AppEvent`].
///
/// Returns `None` for mouse events, key releases and unbound keys.
pub fn to_app_event(event: Event) -> Option<AppEvent> {
    match event {
        Event::Resize(w, h) => Some(AppEvent::Resize(w, h)),
        Event::Key(key) if key.kind == KeyEventKind::Press => map_key(key),
        _ => None,
    }
}

fn map_key(key: KeyEvent) -> Option<AppEvent> {
    use KeyCode::*;
    use KeyModifiers as Mod;

    match key.code {
        Char('q') if key.modifiers == Mod::NONE => Some(AppEvent::Quit),
        Char('c') if key.modifiers == Mod::CONTROL => Some(AppEvent::Quit),

        Tab if key.modifiers == Mod::NONE => Some(AppEvent::FocusNext),

        PageUp => Some(AppEvent::PageUp),
        PageDown => Some(AppEvent::PageDown),
        Char('u') if key.modifiers == Mod::CONTROL => Some(AppEvent::PageUp),
        Char('d') if key.modifiers == Mod::CONTROL => Some(AppEvent::PageDown),

        Char('g') if key.modifiers == Mod::NONE => Some(AppEvent::Top),
        Home => Some(AppEvent::Top),
        // Uppercase; SHIFT may or may not be reported depending on the terminal
        Char('G') => Some(AppEvent::Bottom),
        End => Some(AppEvent::Bottom),

        Up | Char('k') if key.modifiers == Mod::NONE => Some(AppEvent::Nav(Direction::Up)),
        Down | Char('j') if key.modifiers == Mod::NONE => Some(AppEvent::Nav(Direction::Down)),

        Char('?') => Some(AppEvent::ToggleHelp),
        Char('t') if key.modifiers == Mod::NONE => Some(AppEvent::CycleTheme),
        Char('r') if key.modifiers == Mod::NONE => Some(AppEvent::Refresh),
        Esc => Some(AppEvent::Escape),

        _ => None,
    }
}
