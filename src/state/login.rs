use crate::backend::{AccountRole, Credentials, SignupForm};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoginTab {
    Login,
    Signup,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoginField {
    Name,
    Email,
    Password,
    Role,
}

#[derive(Debug, Clone, PartialEq)]
pub enum AuthRequest {
    Login(Credentials),
    Signup(SignupForm),
}

/// State of the login / sign-up screen
#[derive(Debug, Clone)]
pub struct LoginState {
    tab: LoginTab,
    focus: LoginField,
    pub name: String,
    pub email: String,
    pub password: String,
    pub role: AccountRole,
    show_password: bool,
    loading: bool,
}

impl Default for LoginState {
    fn default() -> Self {
        Self {
            tab: LoginTab::Login,
            focus: LoginField::Email,
            name: String::new(),
            email: String::new(),
            password: String::new(),
            role: AccountRole::Student,
            show_password: false,
            loading: false,
        }
    }
}

impl LoginState {
    pub fn tab(&self) -> LoginTab {
        self.tab
    }

    pub fn focus(&self) -> LoginField {
        self.focus
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn show_password(&self) -> bool {
        self.show_password
    }

    /// Fields on the active tab, in tab order.
    pub fn fields(&self) -> &'static [LoginField] {
        match self.tab {
            LoginTab::Login => &[LoginField::Email, LoginField::Password],
            LoginTab::Signup => &[
                LoginField::Name,
                LoginField::Email,
                LoginField::Password,
                LoginField::Role,
            ],
        }
    }

    pub fn switch_tab(&mut self) {
        if self.loading {
            return;
        }
        self.tab = match self.tab {
            LoginTab::Login => LoginTab::Signup,
            LoginTab::Signup => LoginTab::Login,
        };
        self.focus = self.fields()[0];
    }

    pub fn next_field(&mut self, forward: bool) {
        let fields = self.fields();
        let i = fields.iter().position(|f| *f == self.focus).unwrap_or(0);
        let n = fields.len();
        self.focus = if forward {
            fields[(i + 1) % n]
        } else {
            fields[(i + n - 1) % n]
        };
    }

    pub fn toggle_password_visibility(&mut self) {
        self.show_password = !self.show_password;
    }

    pub fn toggle_role(&mut self) {
        self.role = match self.role {
            AccountRole::Student => AccountRole::Faculty,
            AccountRole::Faculty => AccountRole::Student,
        };
    }

    fn focused_text(&mut self) -> Option<&mut String> {
        match self.focus {
            LoginField::Name => Some(&mut self.name),
            LoginField::Email => Some(&mut self.email),
            LoginField::Password => Some(&mut self.password),
            LoginField::Role => None,
        }
    }

    pub fn handle_input(&mut self, c: char) {
        if self.loading {
            return;
        }
        if self.focus == LoginField::Role {
            if c == ' ' {
                self.toggle_role();
            }
            return;
        }
        if let Some(text) = self.focused_text() {
            text.push(c);
        }
    }

    pub fn backspace(&mut self) {
        if self.loading {
            return;
        }
        if let Some(text) = self.focused_text() {
            text.pop();
        }
    }

    fn first_missing(&self) -> Option<LoginField> {
        self.fields().iter().copied().find(|field| match field {
            LoginField::Name => self.name.trim().is_empty(),
            LoginField::Email => self.email.trim().is_empty(),
            LoginField::Password => self.password.is_empty(),
            LoginField::Role => false,
        })
    }

    /// Submit the active form. Required fields left blank move the focus to
    /// the first of them instead.
    pub fn submit(&mut self) -> Option<AuthRequest> {
        if self.loading {
            return None;
        }
        if let Some(missing) = self.first_missing() {
            self.focus = missing;
            return None;
        }

        self.loading = true;
        let credentials = Credentials {
            email: self.email.trim().to_string(),
            password: self.password.clone(),
        };
        Some(match self.tab {
            LoginTab::Login => AuthRequest::Login(credentials),
            LoginTab::Signup => AuthRequest::Signup(SignupForm {
                name: self.name.trim().to_string(),
                credentials,
                role: self.role,
            }),
        })
    }

    pub fn finish(&mut self) {
        self.loading = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn type_text(login: &mut LoginState, text: &str) {
        for c in text.chars() {
            login.handle_input(c);
        }
    }

    #[test]
    fn test_login_requires_fields() {
        let mut login = LoginState::default();
        assert!(login.submit().is_none());
        assert_eq!(login.focus(), LoginField::Email);

        type_text(&mut login, "me@uni.edu");
        assert!(login.submit().is_none());
        assert_eq!(login.focus(), LoginField::Password);
        assert!(!login.is_loading());
    }

    #[test]
    fn test_login_submit() {
        let mut login = LoginState::default();
        type_text(&mut login, "me@uni.edu");
        login.next_field(true);
        type_text(&mut login, "secret");

        let request = login.submit();
        assert_eq!(
            request,
            Some(AuthRequest::Login(Credentials {
                email: "me@uni.edu".to_string(),
                password: "secret".to_string(),
            }))
        );
        assert!(login.is_loading());
        assert!(login.submit().is_none());

        login.finish();
        assert!(!login.is_loading());
    }

    #[test]
    fn test_signup_with_role() {
        let mut login = LoginState::default();
        login.switch_tab();
        assert_eq!(login.tab(), LoginTab::Signup);
        assert_eq!(login.focus(), LoginField::Name);

        type_text(&mut login, "Ada");
        login.next_field(true);
        type_text(&mut login, "ada@uni.edu");
        login.next_field(true);
        type_text(&mut login, "pw");
        login.next_field(true);
        type_text(&mut login, " ");

        match login.submit() {
            Some(AuthRequest::Signup(form)) => {
                assert_eq!(form.name, "Ada");
                assert_eq!(form.role, AccountRole::Faculty);
            }
            other => panic!("unexpected request: {:?}", other),
        }
    }

    #[test]
    fn test_field_cycle_wraps() {
        let mut login = LoginState::default();
        login.next_field(false);
        assert_eq!(login.focus(), LoginField::Password);
        login.next_field(true);
        assert_eq!(login.focus(), LoginField::Email);
    }
}
