//! TUI rendering

use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, Paragraph, Widget},
    Frame,
};

use super::app::CalculatorApp;
use super::keypad::KeypadWidget;
use crate::clock::Clock;

/// Title on the outer border
pub const TITLE: &str = " tapcalc ";

/// Keyboard help shown in the sidebar
pub const HELP_SHORTCUTS: &[(&str, &str)] = &[
    ("Enter =", "Evaluate"),
    ("Bksp", "Delete last"),
    ("Del", "Clear last"),
    ("Esc", "All clear"),
    ("s c t", "sin cos tan"),
    ("l g", "ln log"),
    ("r", "Square root"),
    ("q", "Quit"),
];

/// Width of the keypad column including its border
pub const KEYPAD_WIDTH: u16 = 26;

/// Screen regions of the calculator UI
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UiLayout {
    /// Expression / result panel
    pub display: Rect,
    /// Clock line
    pub clock: Rect,
    /// Keyboard help
    pub help: Rect,
    /// Clickable keypad
    pub keypad: Rect,
}

impl UiLayout {
    /// Splits the full terminal area
    #[must_use]
    pub fn new(area: Rect) -> Self {
        let columns = Layout::default()
            .direction(Direction::Horizontal)
            .margin(1)
            .constraints([Constraint::Min(20), Constraint::Length(KEYPAD_WIDTH)])
            .split(area);

        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3), // display
                Constraint::Length(3), // clock
                Constraint::Min(3),    // help
            ])
            .split(columns[0]);

        Self {
            display: rows[0],
            clock: rows[1],
            help: rows[2],
            keypad: columns[1],
        }
    }
}

/// Draws the app and records the keypad position for mouse hit-testing
pub fn render(app: &mut CalculatorApp, frame: &mut Frame) {
    let area = frame.area();
    app.set_keypad_area(UiLayout::new(area).keypad);
    let clock_text = app.clock().map(Clock::now_text);
    frame.render_widget(CalculatorUI::new(app, clock_text), area);
}

/// Calculator UI widget
#[derive(Debug)]
pub struct CalculatorUI<'a> {
    app: &'a CalculatorApp,
    clock_text: Option<String>,
}

impl<'a> CalculatorUI<'a> {
    /// Creates the widget; `clock_text` is drawn verbatim
    #[must_use]
    pub fn new(app: &'a CalculatorApp, clock_text: Option<String>) -> Self {
        Self { app, clock_text }
    }

    fn render_display(&self, area: Rect, buf: &mut Buffer) {
        let style = if self.app.state().is_error() {
            Style::default().fg(Color::Red).add_modifier(Modifier::BOLD)
        } else if self.app.state().is_result() {
            Style::default()
                .fg(Color::Green)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::White)
        };

        Paragraph::new(Span::styled(self.app.display_text(), style))
            .alignment(Alignment::Right)
            .block(
                Block::default()
                    .title(" Display ")
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(Color::Cyan)),
            )
            .render(area, buf);
    }

    fn render_clock(&self, area: Rect, buf: &mut Buffer) {
        let Some(text) = self.clock_text.as_deref() else {
            return;
        };
        Paragraph::new(Span::styled(text, Style::default().fg(Color::Gray)))
            .alignment(Alignment::Center)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(Color::DarkGray)),
            )
            .render(area, buf);
    }

    fn render_help(area: Rect, buf: &mut Buffer) {
        let items: Vec<ListItem> = HELP_SHORTCUTS
            .iter()
            .map(|(key, desc)| {
                ListItem::new(Line::from(vec![
                    Span::styled(format!("{key:>7}"), Style::default().fg(Color::Yellow)),
                    Span::raw(" "),
                    Span::styled(*desc, Style::default().fg(Color::Gray)),
                ]))
            })
            .collect();

        List::new(items)
            .block(
                Block::default()
                    .title(" Help ")
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(Color::DarkGray)),
            )
            .render(area, buf);
    }
}

impl Widget for CalculatorUI<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        Block::default()
            .title(TITLE)
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::White))
            .render(area, buf);

        let layout = UiLayout::new(area);
        self.render_display(layout.display, buf);
        self.render_clock(layout.clock, buf);
        Self::render_help(layout.help, buf);
        KeypadWidget::new(self.app.keypad()).render(layout.keypad, buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::buffer::{Key, Session};
    use ratatui::backend::TestBackend;
    use ratatui::Terminal;

    fn create_test_terminal() -> Terminal<TestBackend> {
        Terminal::new(TestBackend::new(80, 24)).unwrap()
    }

    fn draw(app: &mut CalculatorApp) -> Terminal<TestBackend> {
        let mut terminal = create_test_terminal();
        terminal.draw(|frame| render(app, frame)).unwrap();
        terminal
    }

    fn content(terminal: &Terminal<TestBackend>) -> String {
        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|c| c.symbol())
            .collect()
    }

    fn press_all(app: &mut CalculatorApp, labels: &[&str]) {
        for label in labels {
            app.press(label.parse().unwrap());
        }
    }

    fn quiet_app() -> CalculatorApp {
        CalculatorApp::with_session(Session::new(), None)
    }

    #[test]
    fn test_layout_regions() {
        let layout = UiLayout::new(Rect::new(0, 0, 80, 24));
        assert_eq!(layout.keypad.width, KEYPAD_WIDTH);
        assert_eq!(layout.keypad.height, 22);
        assert_eq!(layout.display.height, 3);
        assert_eq!(layout.clock.y, layout.display.bottom());
        assert!(layout.help.height >= 3);
    }

    #[test]
    fn test_render_empty_shows_zero() {
        let mut app = quiet_app();
        let terminal = draw(&mut app);
        let text = content(&terminal);
        assert!(text.contains("Display"));
        assert!(text.contains('0'));
        assert!(text.contains("tapcalc"));
    }

    #[test]
    fn test_render_buffer() {
        let mut app = quiet_app();
        press_all(&mut app, &["sin", "4", "+", "2"]);
        let terminal = draw(&mut app);
        assert!(content(&terminal).contains("sin(4+2"));
    }

    #[test]
    fn test_render_result() {
        let mut app = quiet_app();
        press_all(&mut app, &["4", "2", "*", "1", "0", "="]);
        let terminal = draw(&mut app);
        assert!(content(&terminal).contains("420"));
    }

    #[test]
    fn test_render_error_in_red() {
        let mut app = quiet_app();
        press_all(&mut app, &["/", "="]);
        let terminal = draw(&mut app);
        assert!(content(&terminal).contains("Error"));

        let buffer = terminal.backend().buffer();
        let red_e = buffer
            .content()
            .iter()
            .any(|cell| cell.symbol() == "E" && cell.fg == Color::Red);
        assert!(red_e);
    }

    #[test]
    fn test_render_records_keypad_area() {
        let mut app = quiet_app();
        let terminal = draw(&mut app);
        let keypad = UiLayout::new(Rect::new(0, 0, 80, 24)).keypad;
        drop(terminal);

        // top-left button after the border is AC
        app.click(keypad.x + 1, keypad.y + 1);
        assert_eq!(app.keypad().pressed(), Some(Key::AllClear));
    }

    #[test]
    fn test_render_clock_text() {
        let app = quiet_app();
        let area = Rect::new(0, 0, 80, 24);
        let mut buf = Buffer::empty(area);
        CalculatorUI::new(&app, Some("2024-03-09  07:05:42".into())).render(area, &mut buf);
        let text: String = buf.content().iter().map(|c| c.symbol()).collect();
        assert!(text.contains("2024-03-09  07:05:42"));
    }

    #[test]
    fn test_render_without_clock() {
        let app = quiet_app();
        let area = Rect::new(0, 0, 80, 24);
        let mut buf = Buffer::empty(area);
        CalculatorUI::new(&app, None).render(area, &mut buf);
        let text: String = buf.content().iter().map(|c| c.symbol()).collect();
        assert!(!text.contains("2024"));
    }

    #[test]
    fn test_render_with_live_clock() {
        let mut app = CalculatorApp::new();
        let terminal = draw(&mut app);
        let year = chrono::Local::now().format("%Y").to_string();
        assert!(content(&terminal).contains(&year));
    }

    #[test]
    fn test_render_help_and_keypad() {
        let mut app = quiet_app();
        let terminal = draw(&mut app);
        let text = content(&terminal);
        assert!(text.contains("Help"));
        assert!(text.contains("Evaluate"));
        assert!(text.contains("Keypad"));
        assert!(text.contains("[sin]"));
        assert!(text.contains("[=]"));
    }

    #[test]
    fn test_render_small_terminal() {
        let mut app = quiet_app();
        let mut terminal = Terminal::new(TestBackend::new(20, 8)).unwrap();
        terminal.draw(|frame| render(&mut app, frame)).unwrap();
    }

    #[test]
    fn test_help_shortcuts_cover_quit_and_evaluate() {
        let keys: Vec<&str> = HELP_SHORTCUTS.iter().map(|(k, _)| *k).collect();
        assert!(keys.contains(&"q"));
        assert!(keys.contains(&"Enter ="));
    }
}
