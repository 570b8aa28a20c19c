use crate::form_fields;
use crossterm::event::{Event, KeyCode, KeyEvent};
use enroll_core::{SignUpInput, ValidationResult};
use ratatui::{
    layout::{Constraint, Flex, Layout, Rect},
    style::{Color, Style},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};
use tui_input::{backend::crossterm::EventHandler, Input};

/// The sign-up form: three fields plus whatever inline errors the last
/// validation pass produced.
#[derive(Debug, Default)]
pub struct SignUpForm {
    /// Which field we're editing
    active: Field,

    /// Email to register with
    email: Input,

    /// Desired password (will be masked)
    password: Input,

    /// Confirmation copy of the password (also masked)
    password_confirmation: Input,

    /// Errors from the last validation pass, shown under their fields.
    errors: ValidationResult,
}

form_fields!(Field, Email, Password, PasswordConfirmation);

impl SignUpForm {
    /// Draw the form centered in `body_area`: a heading, a bordered input
    /// per field, and an inline error line under each field that failed the
    /// last validation pass.
    #[expect(clippy::cast_possible_truncation)]
    pub fn render(&mut self, body_area: Rect, frame: &mut Frame<'_>) {
        let popup_vert = Layout::vertical([Constraint::Length(14)]).flex(Flex::Center);
        let popup_horiz = Layout::horizontal([Constraint::Percentage(50)]).flex(Flex::Center);

        let [popup_area] = popup_vert.areas(body_area);
        let [popup_area] = popup_horiz.areas(popup_area);
        frame.render_widget(Clear, popup_area);

        let width = popup_area.width.saturating_sub(2 + 1); // -2 for the border, -1 for the cursor

        let rows = Layout::vertical(Constraint::from_lengths([2, 3, 1, 3, 1, 3, 1]));
        let [heading_area, email_area, email_error_area, password_area, password_error_area, confirmation_area, confirmation_error_area] =
            rows.areas(popup_area);

        frame.render_widget(
            Paragraph::new("Create new account").centered(),
            heading_area,
        );

        let border_style = Style::default().fg(Color::Blue);

        // EMAIL
        {
            let email_input_scroll = self.email.visual_scroll(width as usize);

            let email_field = Paragraph::new(self.email.value())
                .scroll((0, email_input_scroll as u16))
                .block(
                    Block::default()
                        .borders(Borders::ALL)
                        .title("Email address")
                        .border_style(border_style),
                );

            frame.render_widget(email_field, email_area);
            self.render_error("email", email_error_area, frame);

            if matches!(self.active, Field::Email) {
                frame.set_cursor_position((
                    popup_area.x
                        + (self.email.visual_cursor().max(email_input_scroll) - email_input_scroll) as u16 // current end of text
                        + 1, // just past the end of the text
                    email_area.y + 1, // +1 row for the border/title
                ));
            };
        }

        // PASSWORD
        {
            let password_input_scroll = self.password.visual_scroll(width as usize);

            let password_field = Paragraph::new(mask(self.password.value()))
                .scroll((0, password_input_scroll as u16))
                .block(
                    Block::default()
                        .borders(Borders::ALL)
                        .title("Password")
                        .border_style(border_style),
                );

            frame.render_widget(password_field, password_area);
            self.render_error("password", password_error_area, frame);

            if matches!(self.active, Field::Password) {
                frame.set_cursor_position((
                    popup_area.x
                        + (self.password.visual_cursor().max(password_input_scroll) - password_input_scroll) as u16 // current end of text
                        + 1, // just past the end of the text
                    password_area.y + 1, // +1 row for the border/title
                ));
            };
        }

        // PASSWORD CONFIRMATION
        {
            let confirmation_input_scroll = self.password_confirmation.visual_scroll(width as usize);

            let confirmation_field =
                Paragraph::new(mask(self.password_confirmation.value()))
                    .scroll((0, confirmation_input_scroll as u16))
                    .block(
                        Block::default()
                            .borders(Borders::ALL)
                            .title("Confirm password")
                            .border_style(border_style),
                    );

            frame.render_widget(confirmation_field, confirmation_area);
            self.render_error("password_confirmation", confirmation_error_area, frame);

            if matches!(self.active, Field::PasswordConfirmation) {
                frame.set_cursor_position((
                    popup_area.x
                        + (self.password_confirmation.visual_cursor().max(confirmation_input_scroll) - confirmation_input_scroll) as u16 // current end of text
                        + 1, // just past the end of the text
                    confirmation_area.y + 1, // +1 row for the border/title
                ));
            };
        }
    }

    /// Draw the inline error line for one field, if it has one.
    fn render_error(&self, field: &str, area: Rect, frame: &mut Frame<'_>) {
        if let Some(message) = self.errors.error(field) {
            frame.render_widget(
                Paragraph::new(message.to_string()).style(Style::default().fg(Color::Red)),
                area,
            );
        }
    }

    /// Route a key press to the form: tab/shift-tab move between fields,
    /// anything else edits the active field. Once errors are on screen,
    /// every edit re-checks the whole input so stale messages clear as the
    /// user types.
    pub fn handle_event(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Tab => {
                self.active = self.active.next();
            }
            KeyCode::BackTab => {
                self.active = self.active.prev();
            }
            _ => {
                let event = Event::Key(key);

                match self.active {
                    Field::Email => self.email.handle_event(&event),
                    Field::Password => self.password.handle_event(&event),
                    Field::PasswordConfirmation => {
                        self.password_confirmation.handle_event(&event)
                    }
                };

                if !self.errors.is_empty() {
                    self.errors = self.finish().check();
                }
            }
        }
    }

    /// Snapshot the current field values for validation and submission.
    pub fn finish(&self) -> SignUpInput {
        SignUpInput {
            email: self.email.to_string(),
            password: self.password.to_string(),
            password_confirmation: self.password_confirmation.to_string(),
        }
    }

    /// Attach a validation pass's failures for inline display.
    pub fn set_errors(&mut self, errors: ValidationResult) {
        self.errors = errors;
    }

    /// The failures currently on display.
    #[cfg(test)]
    pub fn errors(&self) -> &ValidationResult {
        &self.errors
    }
}

/// One mask character per character of the value, so multibyte passwords
/// don't show as longer than they are.
fn mask(value: &str) -> String {
    "*".repeat(value.chars().count())
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn first_listed_field_starts_focused() {
        assert!(matches!(SignUpForm::default().active, Field::Email));
    }

    mod mask {
        use super::*;

        #[test]
        fn one_star_per_character() {
            assert_eq!(mask("hunter42"), "********");
        }

        #[test]
        fn counts_characters_not_bytes() {
            assert_eq!(mask("pàsswörd"), "********");
        }
    }

    mod render {
        use super::*;
        use ratatui::{backend::TestBackend, Terminal};

        #[test]
        fn survives_a_tiny_terminal() {
            let mut terminal = Terminal::new(TestBackend::new(4, 3)).unwrap();
            let mut form = SignUpForm::default();

            terminal
                .draw(|frame| form.render(frame.area(), frame))
                .unwrap();
        }
    }
}

