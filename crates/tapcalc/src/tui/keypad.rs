//! On-screen keypad
//!
//! Buttons can be clicked with the mouse and light up when the matching
//! keyboard key is pressed.
//!
//! ```text
//! [AC ] [ C ] [ ) ] [ ⌫ ]
//! [sin] [cos] [tan] [ln ]
//! [log] [ √ ] [ / ] [ * ]
//! [ 1 ] [ 2 ] [ 3 ] [ - ]
//! [ 4 ] [ 5 ] [ 6 ] [ + ]
//! [ 7 ] [ 8 ] [ 9 ] [ . ]
//! [ 0 ] [ = ] [ ^ ]
//! ```

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::Span,
    widgets::{Block, Borders, Widget},
};

use crate::buffer::{FunctionKey, Key, OperatorKey};

/// Grid width
pub const KEYPAD_COLS: usize = 4;

/// Grid height
pub const KEYPAD_ROWS: usize = 7;

/// Button layout in row-major order; `None` is an empty cell
const LAYOUT: [[Option<Key>; KEYPAD_COLS]; KEYPAD_ROWS] = [
    [
        Some(Key::AllClear),
        Some(Key::Clear),
        Some(Key::CloseParen),
        Some(Key::Backspace),
    ],
    [
        Some(Key::Function(FunctionKey::Sin)),
        Some(Key::Function(FunctionKey::Cos)),
        Some(Key::Function(FunctionKey::Tan)),
        Some(Key::Function(FunctionKey::Ln)),
    ],
    [
        Some(Key::Function(FunctionKey::Log)),
        Some(Key::Sqrt),
        Some(Key::Operator(OperatorKey::Divide)),
        Some(Key::Operator(OperatorKey::Times)),
    ],
    [
        Some(Key::Digit(1)),
        Some(Key::Digit(2)),
        Some(Key::Digit(3)),
        Some(Key::Operator(OperatorKey::Minus)),
    ],
    [
        Some(Key::Digit(4)),
        Some(Key::Digit(5)),
        Some(Key::Digit(6)),
        Some(Key::Operator(OperatorKey::Plus)),
    ],
    [
        Some(Key::Digit(7)),
        Some(Key::Digit(8)),
        Some(Key::Digit(9)),
        Some(Key::Point),
    ],
    [
        Some(Key::Digit(0)),
        Some(Key::Equals),
        Some(Key::Operator(OperatorKey::Power)),
        None,
    ],
];

/// A single keypad button
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeypadButton {
    /// The key this button sends
    pub key: Key,
    /// Whether the button is currently highlighted
    pub pressed: bool,
}

impl KeypadButton {
    /// Creates a released button
    #[must_use]
    pub const fn new(key: Key) -> Self {
        Self {
            key,
            pressed: false,
        }
    }

    /// Sets the pressed state
    pub fn set_pressed(&mut self, pressed: bool) {
        self.pressed = pressed;
    }

    /// Text drawn on the button
    #[must_use]
    pub fn label(&self) -> String {
        self.key.label()
    }

    fn style(&self) -> Style {
        if self.pressed {
            return Style::default()
                .fg(Color::Black)
                .bg(Color::Yellow)
                .add_modifier(Modifier::BOLD);
        }
        match self.key {
            Key::Digit(_) | Key::Point => Style::default().fg(Color::White),
            Key::Operator(_) => Style::default().fg(Color::Yellow),
            Key::Equals => Style::default().fg(Color::Green),
            Key::AllClear | Key::Clear | Key::Backspace => Style::default().fg(Color::Red),
            Key::Sqrt | Key::Function(_) | Key::CloseParen => Style::default().fg(Color::Cyan),
        }
    }
}

/// The keypad grid
#[derive(Debug, Clone)]
pub struct Keypad {
    cells: Vec<Option<KeypadButton>>,
}

impl Default for Keypad {
    fn default() -> Self {
        Self::new()
    }
}

impl Keypad {
    /// Creates the standard layout
    #[must_use]
    pub fn new() -> Self {
        let cells = LAYOUT
            .iter()
            .flatten()
            .map(|cell| cell.map(KeypadButton::new))
            .collect();
        Self { cells }
    }

    /// Number of buttons (empty cells excluded)
    #[must_use]
    pub fn button_count(&self) -> usize {
        self.cells.iter().flatten().count()
    }

    /// Grid dimensions as (rows, cols)
    #[must_use]
    pub const fn dimensions(&self) -> (usize, usize) {
        (KEYPAD_ROWS, KEYPAD_COLS)
    }

    /// Button at a grid position
    #[must_use]
    pub fn button_at(&self, row: usize, col: usize) -> Option<&KeypadButton> {
        if row < KEYPAD_ROWS && col < KEYPAD_COLS {
            self.cells.get(row * KEYPAD_COLS + col)?.as_ref()
        } else {
            None
        }
    }

    /// Button that sends `key`
    #[must_use]
    pub fn find(&self, key: Key) -> Option<&KeypadButton> {
        self.buttons().find(|b| b.key == key)
    }

    /// Releases every button
    pub fn release_all(&mut self) {
        for btn in self.cells.iter_mut().flatten() {
            btn.set_pressed(false);
        }
    }

    /// Lights up the button for `key`, releasing the rest
    pub fn highlight(&mut self, key: Key) {
        for btn in self.cells.iter_mut().flatten() {
            btn.set_pressed(btn.key == key);
        }
    }

    /// The highlighted button, if any
    #[must_use]
    pub fn pressed(&self) -> Option<Key> {
        self.buttons().find(|b| b.pressed).map(|b| b.key)
    }

    /// Iterates over the buttons in row-major order
    pub fn buttons(&self) -> impl Iterator<Item = &KeypadButton> {
        self.cells.iter().flatten()
    }

    /// Iterates over buttons with their (row, col) positions
    pub fn buttons_with_positions(&self) -> impl Iterator<Item = ((usize, usize), &KeypadButton)> {
        self.cells.iter().enumerate().filter_map(|(i, cell)| {
            cell.as_ref()
                .map(|btn| ((i / KEYPAD_COLS, i % KEYPAD_COLS), btn))
        })
    }

    /// Maps a click inside the bordered keypad area to a key
    #[must_use]
    pub fn hit_test(&self, area: Rect, x: u16, y: u16) -> Option<Key> {
        if x < area.x || y < area.y || x >= area.right() || y >= area.bottom() {
            return None;
        }

        let rel_x = x - area.x;
        let rel_y = y - area.y;

        // border
        if rel_x == 0 || rel_y == 0 || rel_x >= area.width - 1 || rel_y >= area.height - 1 {
            return None;
        }

        let btn_width = (area.width - 2) / KEYPAD_COLS as u16;
        let btn_height = (area.height - 2) / KEYPAD_ROWS as u16;
        if btn_width == 0 || btn_height == 0 {
            return None;
        }

        let col = ((rel_x - 1) / btn_width) as usize;
        let row = ((rel_y - 1) / btn_height) as usize;
        self.button_at(row, col).map(|b| b.key)
    }
}

/// Keypad widget for rendering
#[derive(Debug)]
pub struct KeypadWidget<'a> {
    keypad: &'a Keypad,
}

impl<'a> KeypadWidget<'a> {
    /// Creates a new keypad widget
    #[must_use]
    pub fn new(keypad: &'a Keypad) -> Self {
        Self { keypad }
    }
}

impl Widget for KeypadWidget<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        Block::default()
            .title(" Keypad ")
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Cyan))
            .render(area, buf);

        let inner = Rect {
            x: area.x + 1,
            y: area.y + 1,
            width: area.width.saturating_sub(2),
            height: area.height.saturating_sub(2),
        };

        if inner.width < KEYPAD_COLS as u16 || inner.height < KEYPAD_ROWS as u16 {
            return;
        }

        let btn_width = inner.width / KEYPAD_COLS as u16;
        let btn_height = inner.height / KEYPAD_ROWS as u16;

        for ((row, col), btn) in self.keypad.buttons_with_positions() {
            let x = inner.x + (col as u16 * btn_width);
            let y = inner.y + (row as u16 * btn_height);

            if btn_width >= 3 {
                let label = format!("[{}]", btn.label());
                let label_width = label.chars().count() as u16;
                let label_x = x + btn_width.saturating_sub(label_width) / 2;
                let label_y = y + btn_height / 2;

                if label_y < inner.bottom() && label_x < inner.right() {
                    buf.set_span(label_x, label_y, &Span::styled(label, btn.style()), btn_width);
                }
            }
        }
    }
}
