use crate::config::Config;
use crate::control::MenuAction;
use crate::login_item::{LoginItemRegistration, LoginItemService};
use crate::render::{DisplaySurface, RenderError, RenderLoop, TickOutcome};
use crate::source::PixelSource;

/// What the host should do after a menu activation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuResponse {
    /// Tear down the UI and end the process.
    Exit,
    ToggleAbout,
    OpenHelp,
}

/// All process-wide indicator state: the render loop with its context, the
/// status-bar slot and the auto-launcher's login item.
///
/// Built once at startup and driven from the UI thread.
pub struct Indicator<S: PixelSource, D, L> {
    render: RenderLoop<S>,
    surface: D,
    login_items: L,
    registration: LoginItemRegistration,
}

impl<S, D, L> Indicator<S, D, L>
where
    S: PixelSource,
    D: DisplaySurface,
    L: LoginItemService,
{
    pub fn new(config: &Config, source: S, surface: D, login_items: L) -> Self {
        Self {
            render: RenderLoop::new(source, config.width, config.height, config.tick_period()),
            surface,
            login_items,
            registration: LoginItemRegistration::new(config.helper_bundle_id.clone()),
        }
    }

    /// Start rendering, then register the auto-launcher. Only a render
    /// failure is returned; a refused registration is logged and ignored.
    pub fn start(&mut self) -> Result<(), RenderError> {
        self.render.start()?;
        self.registration.enable(&mut self.login_items);
        Ok(())
    }

    pub fn tick(&mut self) -> TickOutcome {
        self.render.tick(&mut self.surface)
    }

    pub fn handle_menu(&mut self, action: MenuAction) -> MenuResponse {
        match action {
            MenuAction::Quit => {
                log::info!("menu: quit");
                self.registration.disable(&mut self.login_items);
                self.render.stop();
                MenuResponse::Exit
            }
            MenuAction::About => MenuResponse::ToggleAbout,
            MenuAction::Help => MenuResponse::OpenHelp,
        }
    }

    pub fn is_running(&self) -> bool {
        self.render.is_running()
    }

    pub fn render_loop(&self) -> &RenderLoop<S> {
        &self.render
    }

    pub fn surface(&self) -> &D {
        &self.surface
    }

    pub fn registration(&self) -> &LoginItemRegistration {
        &self.registration
    }

    pub fn login_items(&self) -> &L {
        &self.login_items
    }
}
