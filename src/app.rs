use iced::widget::image as iced_image;
use iced::{Color, Element, Subscription, Task};
use iced_layershell::build_pattern::daemon;
use iced_layershell::settings::{LayerShellSettings, StartMode};
use iced_layershell::to_layer_message;

use loadviz::adapter::DisplayImage;
use loadviz::config::Config;
use loadviz::control::MenuAction;
use loadviz::host::AutostartEntries;
use loadviz::indicator::{Indicator, MenuResponse};
use loadviz::render::DisplaySurface;
use loadviz::source::{ActiveSource, active_source};

use crate::ipc;
use crate::surface::*;
use crate::theme::MenuColors;

pub(crate) type IcedId = iced_layershell::reexport::IcedId;

/// The status-bar slot: latest frame as an iced image handle.
#[derive(Default)]
pub(crate) struct StatusSlot {
    pub(crate) handle: Option<iced_image::Handle>,
}

impl DisplaySurface for StatusSlot {
    fn set_image(&mut self, image: DisplayImage) {
        let (w, h, pixels) = rgba_frame(&image);
        self.handle = Some(iced_image::Handle::from_rgba(w, h, pixels));
    }
}

/// Width, height and opaque RGBA bytes, the layout `Handle::from_rgba` takes.
fn rgba_frame(image: &DisplayImage) -> (u32, u32, Vec<u8>) {
    let rgba = image.to_rgba();
    (rgba.width(), rgba.height(), rgba.into_raw())
}

pub(crate) struct StatusApp {
    pub(crate) indicator: Indicator<ActiveSource, StatusSlot, AutostartEntries>,
    pub(crate) config: Config,
    pub(crate) surface_id: Option<IcedId>,
    pub(crate) dropdown_id: Option<IcedId>,
    pub(crate) show_about: bool,
    pub(crate) colors: MenuColors,
}

#[to_layer_message(multi)]
#[derive(Debug, Clone)]
pub(crate) enum Message {
    Tick,
    ToggleMenu,
    Menu(MenuAction),
}

pub(crate) fn run() -> Result<(), iced_layershell::Error> {
    log::info!(
        "v{} ({}) starting",
        env!("LOADVIZ_VERSION"),
        env!("LOADVIZ_COMMIT")
    );

    let settings = LayerShellSettings {
        start_mode: StartMode::Background,
        ..Default::default()
    };

    daemon(
        StatusApp::new,
        StatusApp::namespace,
        StatusApp::update,
        StatusApp::view,
    )
    .style(StatusApp::style)
    .subscription(StatusApp::subscription)
    .layer_settings(settings)
    .run()
}

impl StatusApp {
    fn new() -> (Self, Task<Message>) {
        let config = Config::load();
        let login_items = AutostartEntries::for_user(config.resolved_helper_path());
        let mut indicator = Indicator::new(&config, active_source(), StatusSlot::default(), login_items);

        // Nothing to show without a pixel source.
        if let Err(e) = indicator.start() {
            log::error!("{e}");
            std::process::exit(1);
        }

        let (id, task) = Message::layershell_open(indicator_settings(&config));
        log::info!("booting -> indicator (surface {id})");
        (
            Self {
                indicator,
                config,
                surface_id: Some(id),
                dropdown_id: None,
                show_about: false,
                colors: MenuColors::dark(),
            },
            task,
        )
    }

    fn namespace() -> String {
        String::from("loadviz")
    }

    fn open_dropdown_task(&mut self) -> Task<Message> {
        if self.dropdown_id.is_some() {
            return Task::none();
        }
        let (id, task) = Message::layershell_open(dropdown_settings(&self.config));
        self.dropdown_id = Some(id);
        task
    }

    fn close_dropdown_task(&mut self) -> Task<Message> {
        if let Some(id) = self.dropdown_id.take() {
            Task::done(Message::RemoveWindow(id))
        } else {
            Task::none()
        }
    }

    fn update(&mut self, message: Message) -> Task<Message> {
        match message {
            Message::Tick => {
                self.indicator.tick();
                Task::none()
            }
            Message::ToggleMenu => {
                if self.dropdown_id.is_some() {
                    self.close_dropdown_task()
                } else {
                    self.open_dropdown_task()
                }
            }
            Message::Menu(action) => match self.indicator.handle_menu(action) {
                MenuResponse::Exit => {
                    let dropdown_task = self.close_dropdown_task();
                    let remove_task = if let Some(id) = self.surface_id.take() {
                        Task::done(Message::RemoveWindow(id))
                    } else {
                        Task::none()
                    };
                    Task::batch([dropdown_task, remove_task, iced::exit()])
                }
                MenuResponse::ToggleAbout => {
                    self.show_about = !self.show_about;
                    self.open_dropdown_task()
                }
                MenuResponse::OpenHelp => {
                    open_help(self.config.help_url.clone());
                    self.close_dropdown_task()
                }
            },
            _ => Task::none(),
        }
    }

    fn view(&self, window_id: IcedId) -> Element<'_, Message> {
        if self.dropdown_id == Some(window_id) {
            return self.view_dropdown();
        }
        self.view_indicator()
    }

    fn subscription(state: &Self) -> Subscription<Message> {
        let mut subs = vec![Subscription::run(ipc::socket_listener)];

        // The render loop's timer: armed only while it holds a context.
        if state.indicator.is_running() {
            subs.push(Subscription::run_with(state.config.tick_ms, ipc::tick_stream));
        }

        Subscription::batch(subs)
    }

    fn style(&self, _theme: &iced::Theme) -> iced::theme::Style {
        iced::theme::Style {
            background_color: Color::TRANSPARENT,
            text_color: self.colors.text,
        }
    }
}

fn open_help(url: String) {
    std::thread::spawn(move || {
        match std::process::Command::new("xdg-open").arg(&url).status() {
            Ok(s) if s.success() => log::info!("help: opened {url}"),
            Ok(s) => log::warn!("help: xdg-open exited: {s}"),
            Err(e) => log::warn!("help: xdg-open failed: {e}"),
        }
    });
}
