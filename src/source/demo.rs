use crate::adapter::expected_len;

use super::{PixelSource, SourceError};

const AIR_COLOR_RGB: [u8; 3] = [0x40, 0x40, 0xff];
const LOAD_COLOR_RGB: [u8; 3] = [0x00, 0xc0, 0x00];

const DEMO_CORES: usize = 4;
const PERIOD_FRAMES: u64 = 60;
/// Phase offset between neighbouring cores, in frames.
const CORE_STAGGER: u64 = 17;

/// Built-in stand-in for the native visualization library.
///
/// Draws one vertical bar per simulated core, each rising and falling on a
/// fixed schedule. Output depends only on the frame counter, so two contexts
/// pulled the same number of times produce identical bytes.
#[derive(Debug, Default)]
pub struct DemoSource;

#[derive(Debug, Default)]
pub struct DemoContext {
    frame: u64,
}

impl DemoContext {
    pub fn frame(&self) -> u64 {
        self.frame
    }
}

impl PixelSource for DemoSource {
    type Context = DemoContext;

    fn create_context(&mut self) -> Result<DemoContext, SourceError> {
        log::info!("pixel source: built-in demo ({DEMO_CORES} simulated cores)");
        Ok(DemoContext::default())
    }

    fn pull(&mut self, context: &mut DemoContext, width: u32, height: u32) -> Option<Vec<u8>> {
        if width == 0 || height == 0 {
            return None;
        }
        let mut pixels = vec![0u8; expected_len(width, height)?];
        let loads: Vec<f32> = (0..DEMO_CORES)
            .map(|core| simulated_load(context.frame, core))
            .collect();
        render_bars(&loads, width as usize, height as usize, &mut pixels);
        context.frame = context.frame.wrapping_add(1);
        Some(pixels)
    }
}

/// Triangle wave in `0.0..=1.0`.
pub fn simulated_load(frame: u64, core: usize) -> f32 {
    let half = PERIOD_FRAMES / 2;
    let phase = frame.wrapping_add(core as u64 * CORE_STAGGER) % PERIOD_FRAMES;
    let rising = if phase < half { phase } else { PERIOD_FRAMES - phase };
    rising as f32 / half as f32
}

/// Fill `pixels` with one bar per entry in `loads`, load colour from the
/// bottom up, air colour above.
fn render_bars(loads: &[f32], width: usize, height: usize, pixels: &mut [u8]) {
    for (i, rgb) in pixels.chunks_exact_mut(3).enumerate() {
        let x = i % width;
        let y_from_bottom = height - 1 - i / width;
        let core = (x * loads.len() / width).min(loads.len() - 1);
        let filled = (y_from_bottom as f32 + 0.5) / height as f32 <= loads[core];
        rgb.copy_from_slice(if filled { &LOAD_COLOR_RGB } else { &AIR_COLOR_RGB });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pull_returns_full_rgb_buffer() {
        let mut source = DemoSource;
        let mut ctx = source.create_context().unwrap();
        let buf = source.pull(&mut ctx, 40, 22).unwrap();
        assert_eq!(buf.len(), 40 * 22 * 3);
        assert_eq!(ctx.frame(), 1);
    }

    #[test]
    fn zero_size_pull_is_none() {
        let mut source = DemoSource;
        let mut ctx = source.create_context().unwrap();
        assert!(source.pull(&mut ctx, 0, 22).is_none());
        assert_eq!(ctx.frame(), 0);
    }

    #[test]
    fn frames_are_reproducible() {
        let mut source = DemoSource;
        let mut a = source.create_context().unwrap();
        let mut b = source.create_context().unwrap();
        for _ in 0..5 {
            assert_eq!(source.pull(&mut a, 8, 6), source.pull(&mut b, 8, 6));
        }
    }

    #[test]
    fn only_palette_colours_used() {
        let mut source = DemoSource;
        let mut ctx = source.create_context().unwrap();
        let buf = source.pull(&mut ctx, 40, 22).unwrap();
        assert!(
            buf.chunks_exact(3)
                .all(|p| p == AIR_COLOR_RGB || p == LOAD_COLOR_RGB)
        );
    }

    #[test]
    fn simulated_load_stays_in_range() {
        for frame in 0..200 {
            for core in 0..DEMO_CORES {
                let load = simulated_load(frame, core);
                assert!((0.0..=1.0).contains(&load), "{load} at {frame}/{core}");
            }
        }
        assert_eq!(simulated_load(0, 0), 0.0);
        assert_eq!(simulated_load(PERIOD_FRAMES / 2, 0), 1.0);
    }

    #[test]
    fn full_load_fills_column() {
        let mut pixels = vec![0u8; 2 * 3 * 3];
        render_bars(&[1.0, 0.0], 2, 3, &mut pixels);
        for row in pixels.chunks_exact(6) {
            assert_eq!(&row[..3], &LOAD_COLOR_RGB);
            assert_eq!(&row[3..], &AIR_COLOR_RGB);
        }
    }
}
