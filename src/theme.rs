use iced::{Background, Color};

/// Colors and font sizes for the dropdown menu.
pub struct MenuColors {
    pub text: Color,
    pub muted: Color,
    pub menu_bg: Color,
    pub menu_text: f32,
    pub info_text: f32,
}

impl MenuColors {
    pub fn dark() -> Self {
        Self {
            text: Color {
                r: 1.0,
                g: 1.0,
                b: 1.0,
                a: 0.9,
            },
            muted: Color {
                r: 1.0,
                g: 1.0,
                b: 1.0,
                a: 0.5,
            },
            menu_bg: Color {
                r: 0.05,
                g: 0.05,
                b: 0.08,
                a: 0.92,
            },
            menu_text: 14.0,
            info_text: 11.0,
        }
    }

    pub fn menu_bg_style(&self) -> impl Fn(&iced::Theme) -> iced::widget::container::Style {
        let color = self.menu_bg;
        move |_theme: &iced::Theme| iced::widget::container::Style {
            background: Some(Background::Color(color)),
            border: iced::Border {
                radius: 6.0.into(),
                ..Default::default()
            },
            ..Default::default()
        }
    }
}
