use std::io::BufRead;
use std::os::unix::net::UnixListener;
use std::time::Duration;

use futures::StreamExt;
use futures::channel::mpsc;
use loadviz::control::{ControlCommand, socket_path};
use loadviz::render::ticker;

use crate::app::Message;

pub(crate) fn socket_listener() -> impl futures::Stream<Item = Message> {
    let (tx, rx) = mpsc::unbounded();
    std::thread::spawn(move || {
        let path = socket_path();
        let _ = std::fs::remove_file(&path);
        let listener = match UnixListener::bind(&path) {
            Ok(l) => l,
            Err(e) => {
                log::warn!("failed to bind socket {path:?}: {e}");
                return;
            }
        };
        log::info!("listening on {path:?}");
        for stream in listener.incoming().flatten() {
            let mut buf = String::new();
            if std::io::BufReader::new(stream).read_line(&mut buf).is_ok() {
                let msg = match ControlCommand::parse(&buf) {
                    Some(ControlCommand::Menu(action)) => Message::Menu(action),
                    Some(ControlCommand::ToggleMenu) => Message::ToggleMenu,
                    None => {
                        log::warn!("unknown command: {:?}", buf.trim());
                        continue;
                    }
                };
                if tx.unbounded_send(msg).is_err() {
                    break;
                }
            }
        }
    });
    rx
}

/// Fires `Message::Tick` every `ms` milliseconds, coalesced while `update`
/// is busy. The tick itself runs in `update` on the UI thread.
pub(crate) fn tick_stream(ms: &u64) -> impl futures::Stream<Item = Message> + use<> {
    ticker(Duration::from_millis(*ms)).map(|()| Message::Tick)
}
