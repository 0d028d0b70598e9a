use colored::Colorize;

pub struct Theme {
    pub prompt_style: Box<dyn Fn(String) -> String>,
    pub error_style: Box<dyn Fn(String) -> String>,
}

impl Default for Theme {
    fn default() -> Self {
        Theme {
            // 38;5;68
            prompt_style: Box::new(|s: String| s.truecolor(95, 135, 215).to_string()),
            error_style: Box::new(|s: String| s.red().to_string()),
        }
    }
}

impl Theme {
    pub fn load_theme(theme_name: &str) -> Theme {
        match theme_name {
            "default" => Theme::default(),
            "dark" => Theme {
                prompt_style: Box::new(|s: String| s.bright_purple().to_string()),
                error_style: Box::new(|s: String| s.bright_red().to_string()),
            },
            "plain" => Theme {
                prompt_style: Box::new(|s: String| s),
                error_style: Box::new(|s: String| s),
            },
            _ => Theme::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_theme_is_identity() {
        let theme = Theme::load_theme("plain");
        assert_eq!((theme.prompt_style)("/tmp > ".into()), "/tmp > ");
        assert_eq!((theme.error_style)("msh: oops".into()), "msh: oops");
    }

    #[test]
    fn test_styles_keep_text() {
        for name in ["default", "dark", "unknown"] {
            let theme = Theme::load_theme(name);
            assert!((theme.prompt_style)("/tmp > ".into()).contains("/tmp > "));
            assert!((theme.error_style)("msh: oops".into()).contains("msh: oops"));
        }
    }
}
