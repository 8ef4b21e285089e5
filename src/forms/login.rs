use std::collections::HashMap;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LoginField {
    Username,
    Password,
}

impl LoginField {
    pub const ALL: [LoginField; 2] = [LoginField::Username, LoginField::Password];

    pub fn label(&self) -> &'static str {
        match self {
            LoginField::Username => "Username",
            LoginField::Password => "Password",
        }
    }

    pub fn masked(&self) -> bool {
        matches!(self, LoginField::Password)
    }
}

#[derive(Debug, Default)]
pub struct LoginForm {
    pub username: String,
    pub password: String,
    pub focus: usize,
    pub errors: HashMap<LoginField, String>,
    pub server_error: Option<String>,
    pub submitting: bool,
}

impl LoginForm {
    pub fn focused(&self) -> LoginField {
        LoginField::ALL[self.focus % LoginField::ALL.len()]
    }

    pub fn value(&self, field: LoginField) -> &str {
        match field {
            LoginField::Username => &self.username,
            LoginField::Password => &self.password,
        }
    }

    pub fn insert(&mut self, c: char) {
        match self.focused() {
            LoginField::Username => self.username.push(c),
            LoginField::Password => self.password.push(c),
        }
    }

    pub fn backspace(&mut self) {
        match self.focused() {
            LoginField::Username => {
                self.username.pop();
            }
            LoginField::Password => {
                self.password.pop();
            }
        }
    }

    pub fn focus_next(&mut self) {
        self.focus = (self.focus + 1) % LoginField::ALL.len();
    }

    pub fn focus_prev(&mut self) {
        self.focus = (self.focus + LoginField::ALL.len() - 1) % LoginField::ALL.len();
    }

    pub fn error_for(&self, field: LoginField) -> Option<&str> {
        self.errors.get(&field).map(String::as_str)
    }

    pub fn validate(&mut self) -> bool {
        self.errors.clear();
        self.server_error = None;

        if self.username.trim().is_empty() {
            self.errors
                .insert(LoginField::Username, "Username is required".into());
        }
        if self.password.is_empty() {
            self.errors
                .insert(LoginField::Password, "Password is required".into());
        }

        self.errors.is_empty()
    }
}
