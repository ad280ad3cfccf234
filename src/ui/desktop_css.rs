// src/ui/desktop_css.rs - Stylesheets for the desktop webview

/// Tailwind utility classes used by the form
pub const TAILWIND_CDN: &str = "https://cdn.tailwindcss.com";

/// Font Awesome brand icons used by the social links
pub const FONT_AWESOME_CSS: &str =
    "https://cdnjs.cloudflare.com/ajax/libs/font-awesome/6.5.1/css/all.min.css";

/// Markup injected into the desktop webview's `<head>`
#[cfg(not(target_arch = "wasm32"))]
pub fn custom_head() -> String {
    format!(
        r#"
        <script src="{}"></script>
        <link rel="stylesheet" href="{}" />
        "#,
        TAILWIND_CDN, FONT_AWESOME_CSS
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[cfg(not(target_arch = "wasm32"))]
    #[test]
    fn test_custom_head_links_stylesheets() {
        let head = custom_head();
        assert!(head.contains(TAILWIND_CDN));
        assert!(head.contains(FONT_AWESOME_CSS));
    }
}
