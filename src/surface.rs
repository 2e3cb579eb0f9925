use iced_layershell::reexport::{Anchor, KeyboardInteractivity, Layer, NewLayerShellSettings};

use loadviz::config::Config;

pub(crate) const DROPDOWN_WIDTH: u32 = 180;
pub(crate) const DROPDOWN_HEIGHT: u32 = 120;
const EDGE_MARGIN: i32 = 8;

fn make_output_option(output: Option<&str>) -> iced_layershell::reexport::OutputOption {
    match output {
        Some(name) => iced_layershell::reexport::OutputOption::OutputName(name.to_string()),
        None => iced_layershell::reexport::OutputOption::None,
    }
}

/// The status-bar slot: a fixed-size clickable surface in the top-right corner.
pub(crate) fn indicator_settings(config: &Config) -> NewLayerShellSettings {
    NewLayerShellSettings {
        layer: Layer::Top,
        anchor: Anchor::Top | Anchor::Right,
        keyboard_interactivity: KeyboardInteractivity::None,
        exclusive_zone: Some(0),
        size: Some((config.width, config.height)),
        margin: Some((0, EDGE_MARGIN, 0, 0)),
        events_transparent: false,
        output_option: make_output_option(config.screen.as_deref()),
        ..Default::default()
    }
}

/// Dropdown menu, opened just below the indicator.
pub(crate) fn dropdown_settings(config: &Config) -> NewLayerShellSettings {
    NewLayerShellSettings {
        layer: Layer::Overlay,
        anchor: Anchor::Top | Anchor::Right,
        keyboard_interactivity: KeyboardInteractivity::OnDemand,
        exclusive_zone: Some(-1),
        size: Some((DROPDOWN_WIDTH, DROPDOWN_HEIGHT)),
        margin: Some((config.height as i32 + 2, EDGE_MARGIN, 0, 0)),
        events_transparent: false,
        output_option: make_output_option(config.screen.as_deref()),
        ..Default::default()
    }
}
