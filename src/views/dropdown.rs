use iced::widget::{column, container, mouse_area, text};
use iced::{mouse, Element, Length};

use loadviz::control::MenuAction;

use crate::app::{Message, StatusApp};
use crate::theme::MenuColors;

pub(crate) fn about_line() -> String {
    format!(
        "LoadViz v{} ({})",
        env!("LOADVIZ_VERSION"),
        env!("LOADVIZ_COMMIT")
    )
}

fn menu_entry<'a>(label: &'a str, action: MenuAction, colors: &MenuColors) -> Element<'a, Message> {
    mouse_area(text(label).size(colors.menu_text).color(colors.text))
        .on_press(Message::Menu(action))
        .interaction(mouse::Interaction::Pointer)
        .into()
}

impl StatusApp {
    pub(crate) fn view_dropdown(&self) -> Element<'_, Message> {
        let colors = &self.colors;

        let mut col = column![
            menu_entry("About LoadViz", MenuAction::About, colors),
            menu_entry("Help", MenuAction::Help, colors),
        ]
        .spacing(8);

        if self.show_about {
            col = col.push(text(about_line()).size(colors.info_text).color(colors.muted));
        }

        col = col.push(menu_entry("Quit", MenuAction::Quit, colors));

        container(col)
            .padding(10)
            .width(Length::Fill)
            .height(Length::Fill)
            .style(colors.menu_bg_style())
            .into()
    }
}
