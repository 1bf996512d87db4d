use once_cell::sync::Lazy;
use regex::Regex;
use tui_textarea::TextArea;

use crate::constants::PASSWORD_MIN_LEN;

static EMAIL_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("valid email regex"));

/// Which login field has the cursor
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoginField {
    Email,
    Password,
}

/// State of the login screen: two input fields, their validation errors,
/// and the in-flight lock while a login request is outstanding
pub struct LoginForm {
    pub email: TextArea<'static>,
    pub password: TextArea<'static>,
    pub focus: LoginField,
    pub show_password: bool,
    pub email_error: Option<String>,
    pub password_error: Option<String>,
    pub submitting: bool,
}

impl LoginForm {
    pub fn new() -> Self {
        let email = TextArea::default();
        let mut password = TextArea::default();
        password.set_mask_char('\u{2022}');

        Self {
            email,
            password,
            focus: LoginField::Email,
            show_password: false,
            email_error: None,
            password_error: None,
            submitting: false,
        }
    }

    pub fn email_value(&self) -> String {
        self.email.lines().join("")
    }

    pub fn password_value(&self) -> String {
        self.password.lines().join("")
    }

    /// Move the cursor to the other field
    pub fn switch_focus(&mut self) {
        self.focus = match self.focus {
            LoginField::Email => LoginField::Password,
            LoginField::Password => LoginField::Email,
        };
    }

    /// Show or hide the password characters
    pub fn toggle_show_password(&mut self) {
        self.show_password = !self.show_password;
        if self.show_password {
            self.password.clear_mask_char();
        } else {
            self.password.set_mask_char('\u{2022}');
        }
    }

    /// Validate both fields; true when the form may be submitted
    pub fn validate(&mut self) -> bool {
        self.email_error = validate_email(&self.email_value());
        self.password_error = validate_password(&self.password_value());
        self.email_error.is_none() && self.password_error.is_none()
    }
}

impl Default for LoginForm {
    fn default() -> Self {
        Self::new()
    }
}

/// Validate the email field, `None` when acceptable
pub fn validate_email(email: &str) -> Option<String> {
    if email.is_empty() {
        Some("Email is required".to_string())
    } else if !EMAIL_RE.is_match(email) {
        Some("Invalid email format".to_string())
    } else {
        None
    }
}

/// Validate the password field, `None` when acceptable
pub fn validate_password(password: &str) -> Option<String> {
    if password.is_empty() {
        Some("Password is required".to_string())
    } else if password.len() < PASSWORD_MIN_LEN {
        Some(format!(
            "Password must be at least {} characters",
            PASSWORD_MIN_LEN
        ))
    } else {
        None
    }
}
