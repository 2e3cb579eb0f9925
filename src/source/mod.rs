//! Pixel sources: the opaque external producer of raw RGB frames.

pub mod demo;
#[cfg(feature = "libloadviz")]
pub mod ffi;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum SourceError {
    #[error("visualization library unavailable: {0}")]
    Unavailable(String),
}

/// Something that can produce RGB frames of a requested size.
///
/// A source hands out one context at startup; every pull goes through that
/// context. `pull` returning `None` means "nothing this time" and is never
/// fatal.
pub trait PixelSource {
    type Context;

    fn create_context(&mut self) -> Result<Self::Context, SourceError>;

    /// Row-major RGB bytes, ideally `width * height * 3` of them.
    fn pull(&mut self, context: &mut Self::Context, width: u32, height: u32) -> Option<Vec<u8>>;
}

/// The source the indicator is built with.
#[cfg(feature = "libloadviz")]
pub type ActiveSource = ffi::LibLoadViz;
#[cfg(not(feature = "libloadviz"))]
pub type ActiveSource = demo::DemoSource;

pub fn active_source() -> ActiveSource {
    ActiveSource::default()
}
