// src/ui/state.rs - Login form view state and its reducer

use serde::{Deserialize, Serialize};

use crate::validation::{Field, FormFields, ValidationErrors};

/// Independent on/off switches of the form
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UiToggles {
    pub remember_me: bool,
    pub show_password: bool,
    pub dark_mode: bool,
}

/// Welcome toast; hidden until the reveal timer or the secondary trigger fires
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ToastState {
    pub visible: bool,
    pub message: String,
}

/// Everything the rendering layer needs to draw the form
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoginState {
    pub fields: FormFields,
    pub errors: ValidationErrors,
    pub toggles: UiToggles,
    pub toast: ToastState,
}

/// Actions that can be performed on the login state
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoginAction {
    SetField(Field, String),
    SetErrors(ValidationErrors),
    ClearErrors,
    ToggleShowPassword,
    SetRememberMe(bool),
    ToggleDarkMode,
    SetToastMessage(String),
    ShowToast,
    DismissToast,
}

/// State reducer function
pub fn login_state_reducer(state: &LoginState, action: LoginAction) -> LoginState {
    let mut new_state = state.clone();

    match action {
        LoginAction::SetField(Field::Username, value) => {
            new_state.fields.username = value;
        }
        LoginAction::SetField(Field::Password, value) => {
            new_state.fields.password = value;
        }
        LoginAction::SetErrors(errors) => {
            new_state.errors = errors;
        }
        LoginAction::ClearErrors => {
            new_state.errors = ValidationErrors::default();
        }
        LoginAction::ToggleShowPassword => {
            new_state.toggles.show_password = !new_state.toggles.show_password;
        }
        LoginAction::SetRememberMe(remember_me) => {
            new_state.toggles.remember_me = remember_me;
        }
        LoginAction::ToggleDarkMode => {
            new_state.toggles.dark_mode = !new_state.toggles.dark_mode;
        }
        LoginAction::SetToastMessage(message) => {
            new_state.toast.message = message;
        }
        LoginAction::ShowToast => {
            new_state.toast.visible = true;
        }
        LoginAction::DismissToast => {
            new_state.toast.visible = false;
        }
    }

    new_state
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_login_state() {
        let state = LoginState::default();
        assert!(state.fields.username.is_empty());
        assert!(state.fields.password.is_empty());
        assert!(state.errors.is_empty());
        assert!(!state.toggles.remember_me);
        assert!(!state.toggles.show_password);
        assert!(!state.toggles.dark_mode);
        assert!(!state.toast.visible);
        assert!(state.toast.message.is_empty());
    }

    #[test]
    fn test_set_fields() {
        let state = LoginState::default();

        let state = login_state_reducer(&state, LoginAction::SetField(Field::Username, "alice".into()));
        let state = login_state_reducer(&state, LoginAction::SetField(Field::Password, "pw".into()));
        assert_eq!(state.fields, FormFields::new("alice", "pw"));

        // Editing does not touch errors
        let with_errors = LoginState {
            errors: ValidationErrors {
                username_error: Some("Username is required.".into()),
                password_error: None,
            },
            ..LoginState::default()
        };
        let edited = login_state_reducer(&with_errors, LoginAction::SetField(Field::Username, "a".into()));
        assert_eq!(edited.errors, with_errors.errors);
    }

    #[test]
    fn test_toggles_are_independent() {
        let initial = LoginState::default();

        let state = login_state_reducer(&initial, LoginAction::ToggleDarkMode);
        assert!(state.toggles.dark_mode);
        assert!(!state.toggles.show_password);
        assert!(!state.toggles.remember_me);

        let state = login_state_reducer(&state, LoginAction::ToggleShowPassword);
        let state = login_state_reducer(&state, LoginAction::SetRememberMe(true));
        assert_eq!(
            state.toggles,
            UiToggles {
                remember_me: true,
                show_password: true,
                dark_mode: true,
            }
        );

        let state = login_state_reducer(&state, LoginAction::ToggleDarkMode);
        assert!(!state.toggles.dark_mode);
        assert!(state.toggles.show_password);
    }

    #[test]
    fn test_toast_actions() {
        let state = login_state_reducer(
            &LoginState::default(),
            LoginAction::SetToastMessage("Good Morning, Welcome to the Hopewell Hospital!".into()),
        );
        assert!(!state.toast.visible);

        let shown = login_state_reducer(&state, LoginAction::ShowToast);
        assert!(shown.toast.visible);
        assert_eq!(login_state_reducer(&shown, LoginAction::ShowToast), shown);

        let dismissed = login_state_reducer(&shown, LoginAction::DismissToast);
        assert!(!dismissed.toast.visible);
        assert_eq!(dismissed.toast.message, state.toast.message);
    }

    #[test]
    fn test_clear_errors() {
        let state = LoginState {
            errors: ValidationErrors {
                username_error: Some("Username is required.".into()),
                password_error: Some("Password is required.".into()),
            },
            ..LoginState::default()
        };
        assert!(login_state_reducer(&state, LoginAction::ClearErrors).errors.is_empty());
    }
}
