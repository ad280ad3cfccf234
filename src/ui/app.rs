// src/ui/app.rs - Root component of the portal

use dioxus::prelude::*;

use crate::config::PortalConfig;
use crate::ui::pages::LoginForm;

/// Root component; uses a launch-provided [`PortalConfig`] or falls back to
/// defaults with environment overrides
#[component]
pub fn App() -> Element {
    let config = use_hook(|| try_consume_context::<PortalConfig>().unwrap_or_else(PortalConfig::from_env));
    use_context_provider(move || config);

    rsx! {
        LoginForm {}
    }
}
