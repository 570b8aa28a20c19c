use crossterm::event::{KeyCode, KeyEventKind};
use enroll_core::api::{register, Client};
use ratatui::{
    layout::{Constraint, Layout},
    widgets::Paragraph,
    Frame,
};
use std::process::ExitCode;

/// Things that can happen to this app
mod action;
pub use action::Action;

/// Side effects and how to run them
mod effect;
pub use effect::{Effect, EffectContext, Notice};

/// The sign-up form itself
mod signup_form;
use signup_form::SignUpForm;

/// The "functional core" of the app: it owns the form state, decides what
/// each event means, and describes side effects without performing them.
pub struct App {
    /// Status to display (visible at the bottom of the screen)
    status_line: Option<String>,

    /// How to reach the registration server
    client: Client,

    /// Where the app is in its lifecycle
    state: AppState,
}

impl App {
    /// Create a new instance of the app, pointed at the given server.
    pub fn new(server: String) -> Self {
        Self {
            status_line: None,
            client: Client::new(server),
            state: AppState::SignUp {
                form: SignUpForm::default(),
                in_flight: false,
            },
        }
    }

    /// Render the app's UI to the screen
    pub fn render(&mut self, frame: &mut Frame) {
        let vertical = Layout::vertical([Constraint::Min(0), Constraint::Length(1)]);
        let [body_area, status_area] = vertical.areas(frame.area());

        match &mut self.state {
            AppState::SignUp { form, .. } => form.render(body_area, frame),
            AppState::Login => {
                frame.render_widget(
                    Paragraph::new("Account created! Log in to continue.\n\nPress q to exit.")
                        .centered(),
                    body_area,
                );
            }
            AppState::Exiting(_) => frame.render_widget(Paragraph::new("Exiting…"), body_area),
        };

        let status = Paragraph::new(match &self.status_line {
            Some(line) => line.as_str(),
            None => "tab: next field · enter: sign up · esc: quit",
        });

        frame.render_widget(status, status_area);
    }

    /// Handle an `Action`, updating the app's state and producing some side
    /// effect(s)
    pub fn handle(&mut self, action: Action) -> Vec<Effect> {
        match action {
            Action::Key(key) => {
                if key.kind != KeyEventKind::Press {
                    return vec![];
                }

                match &mut self.state {
                    AppState::SignUp { form, in_flight } => match key.code {
                        KeyCode::Enter => {
                            if *in_flight {
                                // At most one outstanding submission per
                                // form; the first one has to resolve before
                                // we accept another.
                                self.status_line = Some("Still submitting…".to_owned());

                                return vec![];
                            }

                            let input = form.finish();
                            let errors = input.check();

                            if errors.is_empty() {
                                form.set_errors(errors);
                                *in_flight = true;
                                self.status_line = Some("Submitting…".to_owned());

                                vec![Effect::Register(
                                    self.client.clone(),
                                    register::Req {
                                        email: input.email,
                                        password: input.password,
                                    },
                                )]
                            } else {
                                form.set_errors(errors);

                                vec![]
                            }
                        }
                        KeyCode::Esc => {
                            self.state = AppState::Exiting(ExitCode::SUCCESS);

                            vec![]
                        }
                        _ => {
                            form.handle_event(key);

                            vec![]
                        }
                    },
                    AppState::Login => match key.code {
                        KeyCode::Char('q') | KeyCode::Esc => {
                            self.state = AppState::Exiting(ExitCode::SUCCESS);

                            vec![]
                        }
                        _ => vec![],
                    },
                    AppState::Exiting(_) => vec![],
                }
            }

            Action::Submitted(resp) => match resp.outcome() {
                register::Outcome::Success => {
                    self.state = AppState::Login;
                    self.status_line = Some(resp.message.clone());

                    vec![Effect::Notify(Notice::info(resp.message, resp.description))]
                }
                register::Outcome::Failure => {
                    // Stay on the form so the user can try again.
                    self.state.map_signup_mut(|_, in_flight| *in_flight = false);
                    self.status_line = Some(resp.message.clone());

                    vec![Effect::Notify(Notice::destructive(
                        resp.message,
                        resp.description,
                    ))]
                }
            },

            Action::Problem(problem) => {
                // The request never produced a response. Clear the guard so
                // the user can resubmit, and make sure they hear about it.
                self.state.map_signup_mut(|_, in_flight| *in_flight = false);
                self.status_line = Some(problem.clone());

                vec![Effect::Notify(Notice::destructive(
                    "Could not reach the server".to_owned(),
                    problem,
                ))]
            }
        }
    }

    /// Let the TUI manager know whether we're all wrapped up and can exit.
    pub fn should_exit(&self) -> Option<ExitCode> {
        if let AppState::Exiting(code) = &self.state {
            Some(*code)
        } else {
            None
        }
    }
}

/// App lifecycle
#[derive(Debug)]
enum AppState {
    /// Filling out (or submitting) the sign-up form
    SignUp {
        /// The form being filled out
        form: SignUpForm,

        /// Whether a submission is outstanding. While this is set, further
        /// submit attempts are ignored; field edits are still fine.
        in_flight: bool,
    },

    /// The account exists; we've moved on to the login screen
    Login,

    /// We're done and want the following exit code after final effects
    Exiting(ExitCode),
}

impl AppState {
    /// Do something to the sign-up form state, if the app is indeed in that
    /// state.
    fn map_signup_mut<T>(&mut self, edit: impl FnOnce(&mut SignUpForm, &mut bool) -> T) -> Option<T> {
        if let Self::SignUp { form, in_flight } = self {
            Some(edit(form, in_flight))
        } else {
            None
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crossterm::event::KeyEvent;

    /// The server tests point at. Nothing ever connects to it; effects are
    /// data, not network calls.
    const SERVER: &str = "https://api.enroll.app";

    fn app() -> App {
        App::new(SERVER.to_string())
    }

    fn press(app: &mut App, code: KeyCode) -> Vec<Effect> {
        app.handle(Action::Key(KeyEvent::from(code)))
    }

    fn type_str(app: &mut App, s: &str) {
        for c in s.chars() {
            press(app, KeyCode::Char(c));
        }
    }

    /// Fill the form with input that passes validation.
    fn fill_valid(app: &mut App) {
        type_str(app, "a@b.com");
        press(app, KeyCode::Tab);
        type_str(app, "longenough1");
        press(app, KeyCode::Tab);
        type_str(app, "longenough1");
    }

    fn success_resp() -> register::Resp {
        register::Resp {
            status: "success".to_string(),
            message: "Welcome".to_string(),
            description: "Check your inbox".to_string(),
        }
    }

    fn rejection_resp() -> register::Resp {
        register::Resp {
            status: "error".to_string(),
            message: "Email taken".to_string(),
            description: "Use another email".to_string(),
        }
    }

    mod submit {
        use super::*;

        #[test]
        fn valid_input_issues_exactly_one_request() {
            let mut app = app();
            fill_valid(&mut app);

            let effects = press(&mut app, KeyCode::Enter);

            assert_eq!(
                effects,
                vec![Effect::Register(
                    Client::new(SERVER.to_string()),
                    register::Req {
                        email: "a@b.com".to_string(),
                        password: "longenough1".to_string(),
                    },
                )]
            );
        }

        #[test]
        fn invalid_input_stays_local() {
            let mut app = app();
            type_str(&mut app, "not-an-email");

            let effects = press(&mut app, KeyCode::Enter);

            assert_eq!(effects, vec![]);
            app.state
                .map_signup_mut(|form, _| assert!(!form.errors().is_empty()))
                .unwrap();
        }

        #[test]
        fn second_submit_is_ignored_while_in_flight() {
            let mut app = app();
            fill_valid(&mut app);

            assert_eq!(press(&mut app, KeyCode::Enter).len(), 1);
            assert_eq!(press(&mut app, KeyCode::Enter), vec![]);
        }
    }

    mod submitted {
        use super::*;

        #[test]
        fn success_navigates_and_notifies() {
            let mut app = app();
            fill_valid(&mut app);
            press(&mut app, KeyCode::Enter);

            let effects = app.handle(Action::Submitted(success_resp()));

            assert!(matches!(app.state, AppState::Login));
            assert_eq!(
                effects,
                vec![Effect::Notify(Notice::info(
                    "Welcome".to_string(),
                    "Check your inbox".to_string(),
                ))]
            );
        }

        #[test]
        fn rejection_stays_and_notifies_destructively() {
            let mut app = app();
            fill_valid(&mut app);
            press(&mut app, KeyCode::Enter);

            let effects = app.handle(Action::Submitted(rejection_resp()));

            assert!(matches!(app.state, AppState::SignUp { .. }));
            assert_eq!(
                effects,
                vec![Effect::Notify(Notice::destructive(
                    "Email taken".to_string(),
                    "Use another email".to_string(),
                ))]
            );
        }

        #[test]
        fn rejection_allows_resubmission() {
            let mut app = app();
            fill_valid(&mut app);
            press(&mut app, KeyCode::Enter);
            app.handle(Action::Submitted(rejection_resp()));

            assert_eq!(press(&mut app, KeyCode::Enter).len(), 1);
        }
    }

    mod problem {
        use super::*;

        #[test]
        fn transport_failure_notifies_destructively() {
            let mut app = app();
            fill_valid(&mut app);
            press(&mut app, KeyCode::Enter);

            let effects = app.handle(Action::Problem("connection refused".to_string()));

            // Presence and style matter; the wording is not part of the
            // contract.
            assert_eq!(effects.len(), 1);
            assert!(matches!(
                &effects[0],
                Effect::Notify(notice) if notice.destructive
            ));
        }

        #[test]
        fn transport_failure_clears_the_in_flight_guard() {
            let mut app = app();
            fill_valid(&mut app);
            press(&mut app, KeyCode::Enter);
            app.handle(Action::Problem("connection refused".to_string()));

            assert_eq!(press(&mut app, KeyCode::Enter).len(), 1);
        }
    }
}
