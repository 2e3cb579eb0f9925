use std::time::Duration;

use futures::channel::mpsc;
use thiserror::Error;

use crate::adapter::{self, DisplayImage, ImageError};
use crate::source::{PixelSource, SourceError};

pub const DEFAULT_WIDTH: u32 = 40;
pub const DEFAULT_HEIGHT: u32 = 22;
pub const DEFAULT_TICK_MS: u64 = 100;

/// The status-bar slot the render loop writes into.
pub trait DisplaySurface {
    /// Replace whatever is shown with `image`.
    fn set_image(&mut self, image: DisplayImage);
}

#[derive(Debug, Error)]
pub enum RenderError {
    #[error("cannot start render loop: {0}")]
    SourceUnavailable(#[from] SourceError),
    #[error("render loop already running")]
    AlreadyRunning,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SkipReason {
    /// The source had nothing for us this tick.
    NoBuffer,
    /// The source handed back a buffer we could not convert.
    BadBuffer(ImageError),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TickOutcome {
    Rendered,
    Skipped(SkipReason),
    /// The loop is not running; nothing was pulled.
    Stopped,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RenderStats {
    pub rendered: u64,
    pub skipped: u64,
}

/// Owns the visualization context and turns timer ticks into images.
///
/// The loop is "running" exactly while it holds a context. The host arms its
/// periodic timer while [`RenderLoop::is_running`] is true and calls
/// [`RenderLoop::tick`] on every firing, always from the UI thread.
pub struct RenderLoop<S: PixelSource> {
    source: S,
    context: Option<S::Context>,
    width: u32,
    height: u32,
    period: Duration,
    stats: RenderStats,
}

impl<S: PixelSource> RenderLoop<S> {
    pub fn new(source: S, width: u32, height: u32, period: Duration) -> Self {
        Self {
            source,
            context: None,
            width,
            height,
            period,
            stats: RenderStats::default(),
        }
    }

    pub fn with_defaults(source: S) -> Self {
        Self::new(
            source,
            DEFAULT_WIDTH,
            DEFAULT_HEIGHT,
            Duration::from_millis(DEFAULT_TICK_MS),
        )
    }

    /// Create the visualization context. Without one the indicator has
    /// nothing to show, so callers treat an error here as fatal.
    pub fn start(&mut self) -> Result<(), RenderError> {
        if self.context.is_some() {
            return Err(RenderError::AlreadyRunning);
        }
        let context = self.source.create_context()?;
        self.context = Some(context);
        log::info!(
            "render loop: started ({}x{} every {}ms)",
            self.width,
            self.height,
            self.period.as_millis()
        );
        Ok(())
    }

    /// Pull one frame and publish it. Any failure leaves the surface showing
    /// the previous image.
    pub fn tick<D: DisplaySurface + ?Sized>(&mut self, surface: &mut D) -> TickOutcome {
        let Some(context) = self.context.as_mut() else {
            return TickOutcome::Stopped;
        };

        let Some(buffer) = self.source.pull(context, self.width, self.height) else {
            self.stats.skipped += 1;
            log::debug!("render loop: no buffer, keeping previous image");
            return TickOutcome::Skipped(SkipReason::NoBuffer);
        };

        match adapter::to_image(&buffer, self.width, self.height) {
            Ok(image) => {
                surface.set_image(image);
                self.stats.rendered += 1;
                TickOutcome::Rendered
            }
            Err(e) => {
                self.stats.skipped += 1;
                log::debug!("render loop: skipping tick: {e}");
                TickOutcome::Skipped(SkipReason::BadBuffer(e))
            }
        }
    }

    /// Disarm and release the context. Safe to call more than once.
    pub fn stop(&mut self) {
        if self.context.take().is_some() {
            log::info!(
                "render loop: stopped after {} rendered / {} skipped ticks",
                self.stats.rendered,
                self.stats.skipped
            );
        }
    }

    pub fn is_running(&self) -> bool {
        self.context.is_some()
    }

    pub fn period(&self) -> Duration {
        self.period
    }

    pub fn size(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    pub fn stats(&self) -> RenderStats {
        self.stats
    }

    pub fn source(&self) -> &S {
        &self.source
    }
}

/// Timer for the render loop: yields `()` every `period` from a background
/// thread. At most one tick waits in the channel; firings while it is full
/// are dropped, so a slow consumer sees one tick after a stall, not a burst.
/// The thread exits once the receiver is dropped.
pub fn ticker(period: Duration) -> mpsc::Receiver<()> {
    let (mut tx, rx) = mpsc::channel(0);
    std::thread::spawn(move || loop {
        std::thread::sleep(period);
        if let Err(e) = tx.try_send(()) {
            if e.is_disconnected() {
                break;
            }
        }
    });
    rx
}

#[cfg(test)]
pub(crate) mod testing {
    use std::collections::VecDeque;

    use super::*;

    /// Hands out scripted buffers, one per pull.
    #[derive(Default)]
    pub(crate) struct ScriptedSource {
        pub(crate) script: VecDeque<Option<Vec<u8>>>,
        pub(crate) fail_create: bool,
        pub(crate) contexts_created: usize,
        pub(crate) pulls: usize,
    }

    impl ScriptedSource {
        pub(crate) fn new(script: impl IntoIterator<Item = Option<Vec<u8>>>) -> Self {
            Self {
                script: script.into_iter().collect(),
                ..Default::default()
            }
        }
    }

    pub(crate) struct ScriptedContext;

    impl PixelSource for ScriptedSource {
        type Context = ScriptedContext;

        fn create_context(&mut self) -> Result<ScriptedContext, SourceError> {
            if self.fail_create {
                return Err(SourceError::Unavailable("scripted failure".into()));
            }
            self.contexts_created += 1;
            Ok(ScriptedContext)
        }

        fn pull(&mut self, _: &mut ScriptedContext, _: u32, _: u32) -> Option<Vec<u8>> {
            self.pulls += 1;
            self.script.pop_front().flatten()
        }
    }

    #[derive(Default)]
    pub(crate) struct RecordingSurface {
        pub(crate) current: Option<DisplayImage>,
        pub(crate) assignments: usize,
    }

    impl DisplaySurface for RecordingSurface {
        fn set_image(&mut self, image: DisplayImage) {
            self.current = Some(image);
            self.assignments += 1;
        }
    }

    pub(crate) fn solid(width: u32, height: u32, value: u8) -> Vec<u8> {
        vec![value; (width * height * 3) as usize]
    }
}
