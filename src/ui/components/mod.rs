// src/ui/components/mod.rs - Building blocks of the login page

use dioxus::prelude::*;

use crate::config::{PortalSettings, SocialLink};
use crate::ui::theme::{mode_toggle_label, Palette};

/// Delay before the first social icon starts fading in, in seconds
const SOCIAL_BASE_DELAY: f32 = 2.4;
/// Stagger between consecutive social icons, in seconds
const SOCIAL_STAGGER: f32 = 0.2;

/// Fade-in wrapper with a start delay in seconds
#[component]
pub fn FadeIn(
    #[props(default = 0.0)] delay: f32,
    #[props(default = "".to_string())] class: String,
    children: Element,
) -> Element {
    rsx! {
        div {
            class: "portal-fade-in {class}",
            style: "animation-delay: {delay}s",
            {children}
        }
    }
}

/// Round button switching between light and dark mode
#[component]
pub fn DarkModeToggle(dark_mode: bool, on_toggle: EventHandler<()>) -> Element {
    let colors = Palette::for_mode(dark_mode).toggle_button;
    let (label, icon) = mode_toggle_label(dark_mode);

    rsx! {
        button {
            r#type: "button",
            class: "absolute top-4 right-4 p-2 rounded-full transition duration-300 portal-pop-in {colors}",
            "aria-label": label,
            onclick: move |_| on_toggle.call(()),
            "{icon}"
        }
    }
}

/// Inline message under an input
#[component]
pub fn FieldError(id: String, message: Option<String>) -> Element {
    rsx! {
        if let Some(message) = message {
            p {
                id: "{id}",
                class: "text-red-500 text-sm mt-1",
                "{message}"
            }
        }
    }
}

/// Welcome notification in the top-right corner
#[component]
pub fn Toast(message: String, on_close: EventHandler<()>) -> Element {
    rsx! {
        div {
            class: "fixed top-5 right-5 bg-blue-600 text-white p-4 rounded-md shadow-md opacity-90 flex items-center justify-between portal-slide-down",
            role: "status",
            span { "{message}" }
            button {
                r#type: "button",
                class: "ml-4 p-2 bg-red-500 text-white rounded-full hover:bg-red-700 transition duration-200 focus:outline-none",
                "aria-label": "Close notification",
                onclick: move |_| on_close.call(()),
                svg {
                    class: "w-4 h-4",
                    xmlns: "http://www.w3.org/2000/svg",
                    fill: "none",
                    view_box: "0 0 24 24",
                    stroke: "currentColor",
                    path {
                        stroke_linecap: "round",
                        stroke_linejoin: "round",
                        stroke_width: "2",
                        d: "M6 18L18 6M6 6l12 12"
                    }
                }
            }
        }
    }
}

struct SocialIcon {
    name: String,
    url: String,
    style: String,
    icon: String,
    reveals_toast: bool,
}

impl SocialIcon {
    fn from_link(index: usize, link: SocialLink) -> Self {
        let delay = SOCIAL_BASE_DELAY + SOCIAL_STAGGER * index as f32;
        Self {
            style: format!("color: {}; animation-delay: {}s", link.color, delay),
            name: link.name,
            url: link.url,
            icon: link.icon,
            reveals_toast: link.reveals_toast,
        }
    }
}

/// Row of social icons; `on_reveal` fires when a toast-revealing icon finishes fading in
#[component]
pub fn SocialLinks(links: Vec<SocialLink>, on_reveal: EventHandler<()>) -> Element {
    let icons = links
        .into_iter()
        .enumerate()
        .map(|(index, link)| SocialIcon::from_link(index, link));

    rsx! {
        div {
            class: "flex justify-center space-x-4 mt-2",
            for SocialIcon { name, url, style, icon, reveals_toast } in icons {
                a {
                    key: "{name}",
                    href: "{url}",
                    target: "_blank",
                    rel: "noopener noreferrer",
                    class: "text-2xl transition duration-200 hover:scale-110 portal-fade-in",
                    style: "{style}",
                    "aria-label": "{name}",
                    onanimationend: move |_| {
                        if reveals_toast {
                            on_reveal.call(());
                        }
                    },
                    i { class: "{icon}" }
                }
            }
        }
    }
}

/// "Stay Connected" footer with social links and contact details
#[component]
pub fn PortalFooter(
    settings: PortalSettings,
    links: Vec<SocialLink>,
    dark_mode: bool,
    year: i32,
    on_reveal: EventHandler<()>,
) -> Element {
    let palette = Palette::for_mode(dark_mode);
    let footer_class = format!(
        "w-full text-center mt-8 p-6 rounded-lg shadow-lg transition duration-300 {}",
        palette.footer
    );
    let text = palette.text;
    let copyright = format!("© {} {}. All rights reserved.", year, settings.hospital_name);
    let contact_email = settings.contact_email;
    let privacy_policy_url = settings.privacy_policy_url;

    rsx! {
        FadeIn {
            delay: 2.0,
            class: footer_class,
            footer {
                h2 {
                    class: "text-lg font-bold {text}",
                    "Stay Connected"
                }
                SocialLinks { links, on_reveal }
                p {
                    class: "mt-4 {text}",
                    "{copyright}"
                }
                p {
                    class: "mt-1 {text}",
                    "Contact us: "
                    a {
                        href: "mailto:{contact_email}",
                        class: "hover:underline",
                        "{contact_email}"
                    }
                }
                p {
                    class: "mt-1 {text}",
                    a {
                        href: "{privacy_policy_url}",
                        target: "_blank",
                        rel: "noopener noreferrer",
                        class: "hover:underline",
                        "Privacy Policy"
                    }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_component_creation() {
        let _toast = rsx! {
            Toast {
                message: "Good Morning, Welcome to the Hopewell Hospital!".to_string(),
                on_close: move |_| {}
            }
        };
        let _toggle = rsx! { DarkModeToggle { dark_mode: true, on_toggle: move |_| {} } };
    }
}
