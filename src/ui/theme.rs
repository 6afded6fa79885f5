use ratatui::style::Color;

#[derive(Debug, Clone, PartialEq)]
pub struct Theme {
    pub name: String,
    pub title: Color,
    pub day_header: Color,
    pub class_name: Color,
    pub time_range: Color,
    pub room: Color,
    pub placeholder: Color,
    pub border: Color,
    pub selected_bg: Color,
    pub selected_fg: Color,
    pub status_bar: Color,
    pub command_mode: Color,
    pub help_title: Color,
    pub help_section: Color,
    pub error: Color,
    pub success: Color,
}

impl Theme {
    pub fn default_theme() -> Self {
        Self {
            name: "default".to_string(),
            title: Color::Cyan,
            day_header: Color::Yellow,
            class_name: Color::White,
            time_range: Color::Cyan,
            room: Color::Gray,
            placeholder: Color::DarkGray,
            border: Color::DarkGray,
            selected_bg: Color::Blue,
            selected_fg: Color::White,
            status_bar: Color::White,
            command_mode: Color::White,
            help_title: Color::Cyan,
            help_section: Color::Yellow,
            error: Color::Red,
            success: Color::Green,
        }
    }

    /// Pastel palette that matches the exported image background.
    pub fn blossom() -> Self {
        Self {
            name: "blossom".to_string(),
            title: Color::Rgb(214, 51, 132),
            day_header: Color::Rgb(194, 24, 91),
            class_name: Color::Rgb(74, 20, 60),
            time_range: Color::Rgb(136, 14, 79),
            room: Color::Rgb(120, 84, 104),
            placeholder: Color::Rgb(176, 144, 160),
            border: Color::Rgb(248, 187, 208),
            selected_bg: Color::Rgb(252, 228, 236),
            selected_fg: Color::Rgb(136, 14, 79),
            status_bar: Color::Rgb(74, 20, 60),
            command_mode: Color::Rgb(74, 20, 60),
            help_title: Color::Rgb(214, 51, 132),
            help_section: Color::Rgb(194, 24, 91),
            error: Color::Rgb(198, 40, 40),
            success: Color::Rgb(46, 125, 50),
        }
    }

    pub fn gruvbox() -> Self {
        Self {
            name: "gruvbox".to_string(),
            title: Color::Rgb(251, 184, 108),
            day_header: Color::Rgb(254, 128, 25),
            class_name: Color::Rgb(235, 219, 178),
            time_range: Color::Rgb(142, 192, 124),
            room: Color::Rgb(189, 174, 147),
            placeholder: Color::Rgb(146, 131, 116),
            border: Color::Rgb(102, 92, 84),
            selected_bg: Color::Rgb(60, 56, 54),
            selected_fg: Color::Rgb(235, 219, 178),
            status_bar: Color::Rgb(235, 219, 178),
            command_mode: Color::Rgb(235, 219, 178),
            help_title: Color::Rgb(251, 184, 108),
            help_section: Color::Rgb(254, 128, 25),
            error: Color::Rgb(251, 73, 52),
            success: Color::Rgb(184, 187, 38),
        }
    }

    pub fn nord() -> Self {
        Self {
            name: "nord".to_string(),
            title: Color::Rgb(136, 192, 208),
            day_header: Color::Rgb(235, 203, 139),
            class_name: Color::Rgb(236, 239, 244),
            time_range: Color::Rgb(129, 161, 193),
            room: Color::Rgb(216, 222, 233),
            placeholder: Color::Rgb(76, 86, 106),
            border: Color::Rgb(67, 76, 94),
            selected_bg: Color::Rgb(59, 66, 82),
            selected_fg: Color::Rgb(236, 239, 244),
            status_bar: Color::Rgb(216, 222, 233),
            command_mode: Color::Rgb(216, 222, 233),
            help_title: Color::Rgb(136, 192, 208),
            help_section: Color::Rgb(235, 203, 139),
            error: Color::Rgb(191, 97, 106),
            success: Color::Rgb(163, 190, 140),
        }
    }

    pub fn get_by_name(name: &str) -> Self {
        match name.to_lowercase().as_str() {
            "blossom" => Self::blossom(),
            "gruvbox" => Self::gruvbox(),
            "nord" => Self::nord(),
            _ => Self::default_theme(),
        }
    }

    pub fn available_themes() -> Vec<&'static str> {
        vec!["default", "blossom", "gruvbox", "nord"]
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self::default_theme()
    }
}
