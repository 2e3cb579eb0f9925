mod app;
mod ipc;
mod surface;
mod theme;
mod views;

fn main() -> Result<(), iced_layershell::Error> {
    loadviz::init_logging();
    app::run()
}
