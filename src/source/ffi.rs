//! Binding to the native `libloadviz` visualization library.

use std::ffi::c_void;
use std::ptr::NonNull;

use crate::adapter::expected_len;

use super::{PixelSource, SourceError};

#[link(name = "loadviz")]
unsafe extern "C" {
    fn new_loadviz() -> *mut c_void;
    fn get_image(loadviz: *mut c_void, width: usize, height: usize) -> *const u8;
}

#[derive(Debug, Default)]
pub struct LibLoadViz;

/// Context handle returned by `new_loadviz`.
///
/// The library exposes no destructor, so dropping the handle only gives up
/// our use of it.
#[derive(Debug)]
pub struct LoadVizHandle(NonNull<c_void>);

impl PixelSource for LibLoadViz {
    type Context = LoadVizHandle;

    fn create_context(&mut self) -> Result<LoadVizHandle, SourceError> {
        // SAFETY: takes no arguments; a null return is handled below.
        let raw = unsafe { new_loadviz() };
        let handle = NonNull::new(raw)
            .map(LoadVizHandle)
            .ok_or_else(|| SourceError::Unavailable("new_loadviz returned null".to_string()))?;
        log::info!("pixel source: libloadviz");
        Ok(handle)
    }

    fn pull(&mut self, context: &mut LoadVizHandle, width: u32, height: u32) -> Option<Vec<u8>> {
        let len = expected_len(width, height)?;
        // SAFETY: the handle came from new_loadviz and is only used from the
        // UI thread.
        let ptr = unsafe { get_image(context.0.as_ptr(), width as usize, height as usize) };
        if ptr.is_null() {
            return None;
        }
        // SAFETY: a non-null result points at width * height * 3 bytes that
        // stay valid until the next get_image call. Copy them out right away.
        let bytes = unsafe { std::slice::from_raw_parts(ptr, len) };
        Some(bytes.to_vec())
    }
}
