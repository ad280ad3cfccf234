// src/ui/pages/login.rs - Hospital portal login page

use std::sync::Arc;

use dioxus::prelude::*;

use crate::auth::{Authenticator, LoggingAuthenticator};
use crate::config::PortalConfig;
use crate::scheduler::{self, ManualScheduler, Scheduler};
use crate::ui::components::{DarkModeToggle, FadeIn, FieldError, PortalFooter, Toast};
use crate::ui::controller::LoginController;
use crate::ui::theme::Palette;
use crate::utils::time::{Clock, SystemClock};
use crate::validation::Field;

/// Entrance animations; `animationend` on the social icons is the secondary toast trigger
pub const ANIMATION_CSS: &str = r#"
@keyframes portal-fade-in { from { opacity: 0; } to { opacity: 1; } }
@keyframes portal-pop-in { from { transform: scale(0); } to { transform: scale(1); } }
@keyframes portal-slide-down { from { opacity: 0; transform: translateY(-20px); } to { opacity: 0.9; transform: translateY(0); } }
.portal-fade-in { opacity: 0; animation: portal-fade-in 0.5s ease-in-out forwards; }
.portal-pop-in { transform: scale(0); animation: portal-pop-in 0.3s ease-out 0.4s forwards; }
.portal-slide-down { animation: portal-slide-down 0.5s ease-out 0.5s both; }
"#;

/// Overrides the authenticator used by [`LoginForm`]
#[derive(Clone)]
pub struct AuthenticatorContext(pub Arc<dyn Authenticator>);

fn mount_controller(config: &PortalConfig, authenticator: Arc<dyn Authenticator>) -> LoginController {
    let scheduler: Arc<dyn Scheduler> = match scheduler::default_scheduler() {
        Ok(scheduler) => scheduler,
        Err(e) => {
            // Only the animation trigger can reveal the toast now.
            tracing::warn!(error = %e, "Falling back to an idle scheduler");
            Arc::new(ManualScheduler::new())
        }
    };

    LoginController::mount(config, &SystemClock, authenticator, scheduler)
}

/// Login form component
#[component]
pub fn LoginForm() -> Element {
    let config = use_context::<PortalConfig>();
    let authenticator = try_use_context::<AuthenticatorContext>()
        .map(|ctx| ctx.0)
        .unwrap_or_else(|| Arc::new(LoggingAuthenticator));

    let controller = use_hook({
        let config = config.clone();
        move || mount_controller(&config, authenticator)
    });

    // Mirror controller snapshots into a signal so every change re-renders
    let mut view = use_signal(|| controller.snapshot());
    use_future({
        let controller = controller.clone();
        move || {
            let mut updates = controller.subscribe();
            async move {
                while updates.changed().await.is_ok() {
                    let snapshot = updates.borrow_and_update().clone();
                    view.set(snapshot);
                }
            }
        }
    });

    use_drop({
        let controller = controller.clone();
        move || controller.dispose()
    });

    let state = view();
    let palette = Palette::for_mode(state.toggles.dark_mode);
    let year = SystemClock.year();

    let background_class = format!(
        "relative flex flex-col items-center justify-center min-h-screen transition duration-300 {}",
        palette.background
    );
    let background_style = format!(
        "background-image: url({}); background-size: cover; background-position: center",
        config.portal.background_image_url
    );
    let text = palette.text;
    let hospital_name = config.portal.hospital_name.clone();
    let logo_path = config.portal.logo_path.clone();
    let logo_alt = format!("{} Logo", hospital_name);
    let hospital_name_class = palette.hospital_name;
    let card = palette.card;

    let username = state.fields.username.clone();
    let password = state.fields.password.clone();
    let username_class = palette.input_class(state.errors.username_error.is_some());
    let password_class = palette.input_class(state.errors.password_error.is_some());
    let password_type = if state.toggles.show_password { "text" } else { "password" };
    let (visibility_label, visibility_text) = if state.toggles.show_password {
        ("Hide password", "Hide")
    } else {
        ("Show password", "Show")
    };
    let checkbox_class = if state.toggles.remember_me {
        "border-blue-600 bg-blue-600"
    } else {
        "border-gray-300 bg-white"
    };

    let on_submit = {
        let controller = controller.clone();
        move |event: FormEvent| {
            event.prevent_default();
            controller.submit();
        }
    };
    let on_username = {
        let controller = controller.clone();
        move |event: FormEvent| controller.set_field(Field::Username, event.value())
    };
    let on_password = {
        let controller = controller.clone();
        move |event: FormEvent| controller.set_field(Field::Password, event.value())
    };
    let on_remember = {
        let controller = controller.clone();
        move |event: FormEvent| controller.toggle_remember_me(event.checked())
    };
    let on_show_password = {
        let controller = controller.clone();
        move |_: MouseEvent| controller.toggle_show_password()
    };
    let on_dark_mode = {
        let controller = controller.clone();
        move |_: ()| controller.toggle_dark_mode()
    };
    let on_reveal = {
        let controller = controller.clone();
        move |_: ()| controller.reveal_toast()
    };
    let on_dismiss = {
        let controller = controller.clone();
        move |_: ()| controller.dismiss_toast()
    };

    rsx! {
        style { {ANIMATION_CSS} }
        div {
            class: "{background_class}",
            style: "{background_style}",
            div { class: "absolute inset-0 bg-black opacity-30" }

            FadeIn {
                class: "relative z-10 w-full max-w-md p-4 transition-opacity duration-700 ease-in-out {text}",

                // Header
                header {
                    class: "flex flex-col items-center mb-8",
                    img {
                        src: "{logo_path}",
                        alt: "{logo_alt}",
                        class: "h-16 mb-2 portal-fade-in",
                        loading: "lazy"
                    }
                    h1 {
                        class: "text-3xl font-bold text-center portal-fade-in {hospital_name_class}",
                        style: "animation-delay: 0.2s",
                        "{hospital_name}"
                    }
                }

                DarkModeToggle {
                    dark_mode: state.toggles.dark_mode,
                    on_toggle: on_dark_mode
                }

                form {
                    class: "p-6 rounded-lg shadow-lg w-full transition-transform duration-300 ease-in-out portal-fade-in {card}",
                    style: "animation-delay: 0.6s",
                    "aria-labelledby": "login-form",
                    onsubmit: on_submit,

                    // Username field
                    FadeIn {
                        delay: 0.8,
                        class: "mb-6",
                        label {
                            r#for: "username",
                            class: "block font-medium mb-1 {text}",
                            "Username"
                        }
                        input {
                            id: "username",
                            r#type: "text",
                            value: "{username}",
                            class: "{username_class}",
                            "aria-invalid": state.errors.username_error.is_some(),
                            "aria-describedby": "username-error",
                            oninput: on_username
                        }
                        FieldError {
                            id: "username-error",
                            message: state.errors.username_error.clone()
                        }
                    }

                    // Password field
                    FadeIn {
                        delay: 1.0,
                        class: "mb-6",
                        label {
                            r#for: "password",
                            class: "block font-medium mb-1 {text}",
                            "Password"
                        }
                        div {
                            class: "relative",
                            input {
                                id: "password",
                                r#type: password_type,
                                value: "{password}",
                                class: "{password_class}",
                                "aria-invalid": state.errors.password_error.is_some(),
                                "aria-describedby": "password-error",
                                oninput: on_password
                            }
                            button {
                                r#type: "button",
                                class: "absolute inset-y-0 right-0 flex items-center px-3 text-gray-500 hover:text-blue-600 transition duration-150 ease-in-out",
                                "aria-label": visibility_label,
                                onclick: on_show_password,
                                "{visibility_text}"
                            }
                        }
                        FieldError {
                            id: "password-error",
                            message: state.errors.password_error.clone()
                        }
                    }

                    // Remember me
                    FadeIn {
                        delay: 1.2,
                        class: "flex items-center mb-6",
                        input {
                            id: "rememberMe",
                            r#type: "checkbox",
                            class: "hidden",
                            checked: state.toggles.remember_me,
                            onchange: on_remember
                        }
                        label {
                            r#for: "rememberMe",
                            class: "flex items-center cursor-pointer",
                            div {
                                class: "relative w-6 h-6 border-2 rounded-md flex items-center justify-center transition duration-300 {checkbox_class}",
                                if state.toggles.remember_me {
                                    svg {
                                        class: "w-4 h-4 text-white",
                                        fill: "none",
                                        view_box: "0 0 24 24",
                                        stroke: "currentColor",
                                        xmlns: "http://www.w3.org/2000/svg",
                                        path {
                                            stroke_linecap: "round",
                                            stroke_linejoin: "round",
                                            stroke_width: "2",
                                            d: "M5 13l4 4L19 7"
                                        }
                                    }
                                }
                            }
                            span { class: "ml-2 {text}", "Remember Me" }
                        }
                    }

                    // Submit button
                    button {
                        r#type: "submit",
                        class: "w-full bg-blue-600 text-white py-3 rounded-md hover:bg-blue-700 transition duration-150 ease-in-out portal-fade-in",
                        style: "animation-delay: 1.4s",
                        "Login"
                    }
                    p {
                        class: "text-center mt-4 portal-fade-in {text}",
                        style: "animation-delay: 1.6s",
                        a { href: "#", class: "hover:underline", "Forgot Password?" }
                    }
                }

                PortalFooter {
                    settings: config.portal.clone(),
                    links: config.social.clone(),
                    dark_mode: state.toggles.dark_mode,
                    year,
                    on_reveal
                }

                if state.toast.visible {
                    Toast {
                        message: state.toast.message.clone(),
                        on_close: on_dismiss
                    }
                }
            }
        }
    }
}
