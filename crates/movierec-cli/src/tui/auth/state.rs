//! Login and registration form state.

use movierec_api::{ApiError, LoginRequest, RegisterRequest, Route};

use crate::tui::command::{Command, Effect, Outcome};

/// Shown when required fields are empty.
pub const MISSING_FIELDS: &str = "Please fill in all required fields.";

/// Shown when the two password fields differ.
pub const PASSWORD_MISMATCH: &str = "Passwords do not match.";

/// Fallback when a login fails without a backend message.
pub const LOGIN_FAILED: &str = "Login failed. Please check your credentials.";

/// Fallback when a registration fails without a backend message.
pub const REGISTER_FAILED: &str = "Registration failed. Please try again.";

/// Which form is shown.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthMode {
    /// Username and password.
    Login,
    /// Full registration form.
    Register,
}

impl AuthMode {
    /// The route showing this form.
    #[must_use]
    pub const fn route(self) -> Route {
        match self {
            Self::Login => Route::Login,
            Self::Register => Route::Register,
        }
    }

    /// The other form.
    #[must_use]
    pub const fn other(self) -> Self {
        match self {
            Self::Login => Self::Register,
            Self::Register => Self::Login,
        }
    }
}

/// One form input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    /// Login name.
    Username,
    /// Email address.
    Email,
    /// Password.
    Password,
    /// Password confirmation.
    Confirm,
    /// Given name.
    FirstName,
    /// Family name.
    LastName,
}

impl Field {
    /// Input label.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Username => "Username",
            Self::Email => "Email",
            Self::Password => "Password",
            Self::Confirm => "Confirm password",
            Self::FirstName => "First name",
            Self::LastName => "Last name",
        }
    }

    /// Whether the input is masked.
    #[must_use]
    pub const fn is_secret(self) -> bool {
        matches!(self, Self::Password | Self::Confirm)
    }
}

const LOGIN_FIELDS: &[Field] = &[Field::Username, Field::Password];
const REGISTER_FIELDS: &[Field] = &[
    Field::Username,
    Field::Email,
    Field::FirstName,
    Field::LastName,
    Field::Password,
    Field::Confirm,
];

/// State for the login and registration pages.
#[derive(Debug)]
#[allow(clippy::module_name_repetitions)]
pub struct AuthState {
    /// Shown form.
    pub mode: AuthMode,
    username: String,
    email: String,
    password: String,
    confirm: String,
    first_name: String,
    last_name: String,
    /// Index of the focused input.
    pub focus: usize,
    /// Request outstanding; submit is disabled meanwhile.
    pub submitting: bool,
    /// Form-level error.
    pub error: Option<String>,
}

impl AuthState {
    /// Creates an empty form.
    #[must_use]
    pub const fn new(mode: AuthMode) -> Self {
        Self {
            mode,
            username: String::new(),
            email: String::new(),
            password: String::new(),
            confirm: String::new(),
            first_name: String::new(),
            last_name: String::new(),
            focus: 0,
            submitting: false,
            error: None,
        }
    }

    /// Signed-in users skip the form.
    #[must_use]
    pub fn mount(&self, authenticated: bool) -> Vec<Effect> {
        if authenticated {
            vec![Effect::Navigate(Route::Dashboard)]
        } else {
            Vec::new()
        }
    }

    /// Inputs of the current form, in focus order.
    #[must_use]
    pub const fn fields(&self) -> &'static [Field] {
        match self.mode {
            AuthMode::Login => LOGIN_FIELDS,
            AuthMode::Register => REGISTER_FIELDS,
        }
    }

    /// The focused input.
    #[must_use]
    pub fn focused(&self) -> Field {
        self.fields()
            .get(self.focus)
            .copied()
            .unwrap_or(Field::Username)
    }

    /// Current value of `field`.
    #[must_use]
    pub fn value(&self, field: Field) -> &str {
        match field {
            Field::Username => &self.username,
            Field::Email => &self.email,
            Field::Password => &self.password,
            Field::Confirm => &self.confirm,
            Field::FirstName => &self.first_name,
            Field::LastName => &self.last_name,
        }
    }

    fn value_mut(&mut self, field: Field) -> &mut String {
        match field {
            Field::Username => &mut self.username,
            Field::Email => &mut self.email,
            Field::Password => &mut self.password,
            Field::Confirm => &mut self.confirm,
            Field::FirstName => &mut self.first_name,
            Field::LastName => &mut self.last_name,
        }
    }

    /// Focuses the next input, wrapping.
    pub fn focus_next(&mut self) {
        let len = self.fields().len();
        self.focus = self.focus.saturating_add(1).checked_rem(len).unwrap_or(0);
    }

    /// Focuses the previous input, wrapping.
    pub fn focus_previous(&mut self) {
        let len = self.fields().len();
        self.focus = if self.focus == 0 {
            len.saturating_sub(1)
        } else {
            self.focus.saturating_sub(1)
        };
    }

    /// Types into the focused input.
    pub fn push(&mut self, c: char) {
        let field = self.focused();
        self.value_mut(field).push(c);
        self.error = None;
    }

    /// Deletes from the focused input.
    pub fn pop(&mut self) {
        let field = self.focused();
        self.value_mut(field).pop();
    }

    /// Switches to the other form.
    #[must_use]
    pub fn switch_mode(&self) -> Vec<Effect> {
        vec![Effect::Navigate(self.mode.other().route())]
    }

    /// Validates and submits the form.
    pub fn submit(&mut self) -> Vec<Effect> {
        if self.submitting {
            return Vec::new();
        }
        let username = self.username.trim();
        let email = self.email.trim();
        let missing = match self.mode {
            AuthMode::Login => username.is_empty() || self.password.is_empty(),
            AuthMode::Register => {
                username.is_empty() || email.is_empty() || self.password.is_empty()
            }
        };
        if missing {
            self.error = Some(String::from(MISSING_FIELDS));
            return Vec::new();
        }
        let command = match self.mode {
            AuthMode::Login => Command::Login(LoginRequest {
                username: String::from(username),
                password: self.password.clone(),
            }),
            AuthMode::Register => {
                if self.password != self.confirm {
                    self.error = Some(String::from(PASSWORD_MISMATCH));
                    return Vec::new();
                }
                Command::Register(RegisterRequest {
                    username: String::from(username),
                    email: String::from(email),
                    password: self.password.clone(),
                    first_name: String::from(self.first_name.trim()),
                    last_name: String::from(self.last_name.trim()),
                })
            }
        };
        self.submitting = true;
        self.error = None;
        vec![Effect::Run(command)]
    }

    /// Applies a finished login or registration.
    pub fn apply(&mut self, outcome: Outcome) -> Vec<Effect> {
        let (result, fallback) = match outcome {
            Outcome::LoggedIn(result) => (result, LOGIN_FAILED),
            Outcome::Registered(result) => (result, REGISTER_FAILED),
            other => {
                tracing::trace!(?other, "outcome not handled by auth page");
                return Vec::new();
            }
        };
        self.submitting = false;
        match result {
            Ok(response) => {
                tracing::info!(username = %response.user.username, "signed in");
                self.password.clear();
                self.confirm.clear();
                vec![Effect::Navigate(Route::Dashboard)]
            }
            Err(e) => {
                tracing::warn!(error = %e, "authentication failed");
                self.error = Some(String::from(
                    ApiError::backend_message(&e).unwrap_or(fallback),
                ));
                self.password.clear();
                self.confirm.clear();
                Vec::new()
            }
        }
    }
}
