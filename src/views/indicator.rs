use iced::widget::image::FilterMethod;
use iced::widget::{image as iced_image, mouse_area, space};
use iced::{mouse, Element};

use crate::app::{Message, StatusApp};

impl StatusApp {
    /// The bitmap itself. Scaled to the configured slot size without
    /// smoothing; clicking opens the dropdown.
    pub(crate) fn view_indicator(&self) -> Element<'_, Message> {
        let (w, h) = (self.config.width as f32, self.config.height as f32);
        let content: Element<'_, Message> = match &self.indicator.surface().handle {
            Some(handle) => iced_image(handle.clone())
                .width(w)
                .height(h)
                .filter_method(FilterMethod::Nearest)
                .into(),
            None => space::Space::new().width(w).height(h).into(),
        };
        mouse_area(content)
            .on_press(Message::ToggleMenu)
            .interaction(mouse::Interaction::Pointer)
            .into()
    }
}
