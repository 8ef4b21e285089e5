use std::collections::HashMap;

use crate::api::RegisterRequest;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RegisterField {
    Username,
    Email,
    FirstName,
    LastName,
    Password,
    ConfirmPassword,
    PhoneNumber,
    Department,
}

impl RegisterField {
    pub const ALL: [RegisterField; 8] = [
        RegisterField::Username,
        RegisterField::Email,
        RegisterField::FirstName,
        RegisterField::LastName,
        RegisterField::Password,
        RegisterField::ConfirmPassword,
        RegisterField::PhoneNumber,
        RegisterField::Department,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            RegisterField::Username => "Username",
            RegisterField::Email => "Email",
            RegisterField::FirstName => "First name",
            RegisterField::LastName => "Last name",
            RegisterField::Password => "Password",
            RegisterField::ConfirmPassword => "Confirm password",
            RegisterField::PhoneNumber => "Phone number (optional)",
            RegisterField::Department => "Department (optional)",
        }
    }

    pub fn masked(&self) -> bool {
        matches!(self, RegisterField::Password | RegisterField::ConfirmPassword)
    }
}

#[derive(Debug, Default)]
pub struct RegisterForm {
    pub username: String,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub password: String,
    pub confirm_password: String,
    pub phone_number: String,
    pub department: String,
    pub focus: usize,
    pub errors: HashMap<RegisterField, String>,
    pub server_error: Option<String>,
    pub submitting: bool,
}

impl RegisterForm {
    pub fn focused(&self) -> RegisterField {
        RegisterField::ALL[self.focus % RegisterField::ALL.len()]
    }

    pub fn value(&self, field: RegisterField) -> &str {
        match field {
            RegisterField::Username => &self.username,
            RegisterField::Email => &self.email,
            RegisterField::FirstName => &self.first_name,
            RegisterField::LastName => &self.last_name,
            RegisterField::Password => &self.password,
            RegisterField::ConfirmPassword => &self.confirm_password,
            RegisterField::PhoneNumber => &self.phone_number,
            RegisterField::Department => &self.department,
        }
    }

    fn value_mut(&mut self, field: RegisterField) -> &mut String {
        match field {
            RegisterField::Username => &mut self.username,
            RegisterField::Email => &mut self.email,
            RegisterField::FirstName => &mut self.first_name,
            RegisterField::LastName => &mut self.last_name,
            RegisterField::Password => &mut self.password,
            RegisterField::ConfirmPassword => &mut self.confirm_password,
            RegisterField::PhoneNumber => &mut self.phone_number,
            RegisterField::Department => &mut self.department,
        }
    }

    pub fn insert(&mut self, c: char) {
        let field = self.focused();
        self.value_mut(field).push(c);
    }

    pub fn backspace(&mut self) {
        let field = self.focused();
        self.value_mut(field).pop();
    }

    pub fn focus_next(&mut self) {
        self.focus = (self.focus + 1) % RegisterField::ALL.len();
    }

    pub fn focus_prev(&mut self) {
        self.focus = (self.focus + RegisterField::ALL.len() - 1) % RegisterField::ALL.len();
    }

    pub fn error_for(&self, field: RegisterField) -> Option<&str> {
        self.errors.get(&field).map(String::as_str)
    }

    /// Validate every field; submission is blocked until this returns true.
    pub fn validate(&mut self) -> bool {
        self.errors.clear();
        self.server_error = None;

        if self.username.trim().is_empty() {
            self.errors
                .insert(RegisterField::Username, "Username is required".into());
        }

        if self.email.trim().is_empty() {
            self.errors
                .insert(RegisterField::Email, "Email is required".into());
        } else if !is_valid_email(self.email.trim()) {
            self.errors
                .insert(RegisterField::Email, "Enter a valid email address".into());
        }

        if self.first_name.trim().is_empty() {
            self.errors
                .insert(RegisterField::FirstName, "First name is required".into());
        }

        if self.last_name.trim().is_empty() {
            self.errors
                .insert(RegisterField::LastName, "Last name is required".into());
        }

        if self.password.is_empty() {
            self.errors
                .insert(RegisterField::Password, "Password is required".into());
        } else if !is_strong_password(&self.password) {
            self.errors.insert(
                RegisterField::Password,
                "Password must be at least 8 characters with uppercase, lowercase, and a number"
                    .into(),
            );
        }

        if self.confirm_password.is_empty() {
            self.errors.insert(
                RegisterField::ConfirmPassword,
                "Please confirm your password".into(),
            );
        } else if self.confirm_password != self.password {
            self.errors.insert(
                RegisterField::ConfirmPassword,
                "Passwords do not match".into(),
            );
        }

        self.errors.is_empty()
    }

    /// The exact payload the register endpoint expects; optional fields are
    /// always present, defaulting to empty strings.
    pub fn payload(&self) -> RegisterRequest {
        RegisterRequest {
            username: self.username.trim().to_string(),
            email: self.email.trim().to_string(),
            password: self.password.clone(),
            first_name: self.first_name.trim().to_string(),
            last_name: self.last_name.trim().to_string(),
            phone_number: self.phone_number.trim().to_string(),
            department: self.department.trim().to_string(),
        }
    }
}

pub fn is_valid_email(value: &str) -> bool {
    if value.contains(char::is_whitespace) {
        return false;
    }
    let mut parts = value.splitn(2, '@');
    let (local, domain) = match (parts.next(), parts.next()) {
        (Some(local), Some(domain)) => (local, domain),
        _ => return false,
    };
    !local.is_empty()
        && !domain.is_empty()
        && !domain.contains('@')
        && domain.contains('.')
        && !domain.starts_with('.')
        && !domain.ends_with('.')
}

pub fn is_strong_password(value: &str) -> bool {
    value.chars().count() >= 8
        && value.chars().any(|c| c.is_uppercase())
        && value.chars().any(|c| c.is_lowercase())
        && value.chars().any(|c| c.is_ascii_digit())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_form() -> RegisterForm {
        RegisterForm {
            username: "ana".into(),
            email: "ana@taskflow.dev".into(),
            first_name: "Ana".into(),
            last_name: "Silva".into(),
            password: "Sup3rSecret".into(),
            confirm_password: "Sup3rSecret".into(),
            ..RegisterForm::default()
        }
    }

    #[test]
    fn empty_form_surfaces_all_six_required_messages() {
        let mut form = RegisterForm::default();
        assert!(!form.validate());
        assert_eq!(form.errors.len(), 6);
        assert_eq!(
            form.error_for(RegisterField::Username),
            Some("Username is required")
        );
        assert_eq!(
            form.error_for(RegisterField::Email),
            Some("Email is required")
        );
        assert_eq!(
            form.error_for(RegisterField::FirstName),
            Some("First name is required")
        );
        assert_eq!(
            form.error_for(RegisterField::LastName),
            Some("Last name is required")
        );
        assert_eq!(
            form.error_for(RegisterField::Password),
            Some("Password is required")
        );
        assert_eq!(
            form.error_for(RegisterField::ConfirmPassword),
            Some("Please confirm your password")
        );
    }

    #[test]
    fn optional_fields_never_error() {
        let mut form = valid_form();
        form.phone_number.clear();
        form.department.clear();
        assert!(form.validate());
        assert!(form.error_for(RegisterField::PhoneNumber).is_none());
        assert!(form.error_for(RegisterField::Department).is_none());
    }

    #[test]
    fn malformed_email_surfaces_exactly_the_format_message() {
        let mut form = valid_form();
        form.email = "not-an-email".into();
        assert!(!form.validate());
        assert_eq!(form.errors.len(), 1);
        assert_eq!(
            form.error_for(RegisterField::Email),
            Some("Enter a valid email address")
        );
    }

    #[test]
    fn weak_password_surfaces_the_strength_message() {
        let mut form = valid_form();
        form.password = "weak".into();
        form.confirm_password = "weak".into();
        assert!(!form.validate());
        assert_eq!(
            form.error_for(RegisterField::Password),
            Some("Password must be at least 8 characters with uppercase, lowercase, and a number")
        );
    }

    #[test]
    fn mismatched_confirmation_surfaces_the_mismatch_message() {
        let mut form = valid_form();
        form.confirm_password = "Sup3rSecret2".into();
        assert!(!form.validate());
        assert_eq!(
            form.error_for(RegisterField::ConfirmPassword),
            Some("Passwords do not match")
        );
    }

    #[test]
    fn valid_form_builds_the_exact_payload() {
        let mut form = valid_form();
        assert!(form.validate());
        assert_eq!(
            form.payload(),
            RegisterRequest {
                username: "ana".into(),
                email: "ana@taskflow.dev".into(),
                password: "Sup3rSecret".into(),
                first_name: "Ana".into(),
                last_name: "Silva".into(),
                phone_number: String::new(),
                department: String::new(),
            }
        );
    }

    #[test]
    fn email_shapes() {
        assert!(is_valid_email("a@b.co"));
        assert!(is_valid_email("first.last@team.taskflow.dev"));
        assert!(!is_valid_email("@b.co"));
        assert!(!is_valid_email("a@"));
        assert!(!is_valid_email("a@b"));
        assert!(!is_valid_email("a b@c.co"));
        assert!(!is_valid_email("a@b@c.co"));
        assert!(!is_valid_email("a@.co"));
    }

    #[test]
    fn password_strength_requires_all_three_classes() {
        assert!(is_strong_password("Abcdefg1"));
        assert!(!is_strong_password("abcdefg1"));
        assert!(!is_strong_password("ABCDEFG1"));
        assert!(!is_strong_password("Abcdefgh"));
        assert!(!is_strong_password("Ab1"));
    }

    #[test]
    fn focus_cycles_through_all_fields() {
        let mut form = RegisterForm::default();
        assert_eq!(form.focused(), RegisterField::Username);
        for _ in 0..RegisterField::ALL.len() {
            form.focus_next();
        }
        assert_eq!(form.focused(), RegisterField::Username);
        form.focus_prev();
        assert_eq!(form.focused(), RegisterField::Department);
    }
}
