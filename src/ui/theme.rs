// src/ui/theme.rs - Light/dark class palettes for the login form

/// Tailwind classes that depend on the dark-mode flag
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette {
    pub background: &'static str,
    pub text: &'static str,
    pub input: &'static str,
    pub hospital_name: &'static str,
    pub card: &'static str,
    pub footer: &'static str,
    pub toggle_button: &'static str,
}

impl Palette {
    pub const LIGHT: Palette = Palette {
        background: "bg-gray-100",
        text: "text-gray-800",
        input: "bg-white text-gray-800 border-gray-300",
        hospital_name: "text-gray-900",
        card: "bg-white",
        footer: "bg-gray-100 text-gray-800",
        toggle_button: "bg-white text-gray-800",
    };

    pub const DARK: Palette = Palette {
        background: "bg-gray-900",
        text: "text-gray-300",
        input: "bg-gray-800 text-white border-gray-600",
        hospital_name: "text-green-400",
        card: "bg-gray-800",
        footer: "bg-gray-900 text-gray-300",
        toggle_button: "bg-gray-700 text-white",
    };

    pub fn for_mode(dark_mode: bool) -> Self {
        if dark_mode {
            Self::DARK
        } else {
            Self::LIGHT
        }
    }

    /// Classes for a text input, outlined in red while its field has an error
    pub fn input_class(&self, has_error: bool) -> String {
        let border = if has_error { " border-red-500" } else { "" };
        format!(
            "mt-1 block w-full p-3 border{} rounded-md focus:outline-none focus:ring-2 focus:ring-blue-500 transition duration-150 ease-in-out {}",
            border, self.input
        )
    }
}

/// Label and icon of the dark-mode button, which always offers the other mode
pub fn mode_toggle_label(dark_mode: bool) -> (&'static str, &'static str) {
    if dark_mode {
        ("Switch to light mode", "☀️")
    } else {
        ("Switch to dark mode", "🌙")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_palette_selection() {
        assert_eq!(Palette::for_mode(false), Palette::LIGHT);
        assert_eq!(Palette::for_mode(true).background, "bg-gray-900");
        assert_eq!(Palette::for_mode(true).hospital_name, "text-green-400");
    }

    #[test]
    fn test_input_class_marks_errors() {
        let palette = Palette::LIGHT;
        assert!(palette.input_class(true).contains("border-red-500"));
        assert!(!palette.input_class(false).contains("border-red-500"));
        assert!(palette.input_class(false).ends_with(Palette::LIGHT.input));
    }

    #[test]
    fn test_mode_toggle_label() {
        assert_eq!(mode_toggle_label(false).0, "Switch to dark mode");
        assert_eq!(mode_toggle_label(true).1, "☀️");
    }
}
