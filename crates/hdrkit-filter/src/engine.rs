//! Tiled box-parallel filter engine
//!
//! Filters implement a single-method pipeline-stage interface,
//! [`RegionFilter`]: given read-only source images and a rectangular
//! [`Region`] of the output, fill that region's pixels. The engine owns
//! partitioning and dispatch:
//!
//! - [`apply`] runs one region covering the whole image on the calling
//!   thread
//! - [`apply_parallel`] splits the output into disjoint horizontal bands
//!   that cover it exactly once and dispatches them with rayon
//!
//! Shared state (kernel tables, sample patterns, density maps, sources) is
//! read-only during a pass, so workers need no locking; each worker writes
//! only through its own [`RegionOutput`] and owns its random generator.
//! Multi-stage pipelines compose by sequencing `apply*` calls.

use crate::error::{FilterError, FilterResult};
use hdrkit_core::Image;
use rand::SeedableRng;
use rand::rngs::StdRng;
use rayon::prelude::*;

/// Rectangular sub-range `[x0, x1) × [y0, y1)` of the output image
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Region {
    pub x0: u32,
    pub x1: u32,
    pub y0: u32,
    pub y1: u32,
}

impl Region {
    /// Region covering a full `width × height` image
    pub fn full(width: u32, height: u32) -> Self {
        Region {
            x0: 0,
            x1: width,
            y0: 0,
            y1: height,
        }
    }

    /// Width of the region
    #[inline]
    pub fn width(&self) -> u32 {
        self.x1 - self.x0
    }

    /// Height of the region
    #[inline]
    pub fn height(&self) -> u32 {
        self.y1 - self.y0
    }
}

/// Mutable view over the output rows assigned to one worker
///
/// Coordinates passed to [`RegionOutput::pixel_mut`] are global image
/// coordinates; the view translates them onto its own row span. A worker
/// can only reach pixels inside its band, which is what confines mutation
/// to disjoint destination ranges.
pub struct RegionOutput<'a> {
    data: &'a mut [f32],
    width: u32,
    channels: u32,
    y_offset: u32,
}

impl<'a> RegionOutput<'a> {
    /// Wrap the rows starting at global row `y_offset`
    pub fn new(data: &'a mut [f32], width: u32, channels: u32, y_offset: u32) -> Self {
        RegionOutput {
            data,
            width,
            channels,
            y_offset,
        }
    }

    /// Mutable channel slice for the pixel at global coordinates (x, y)
    ///
    /// # Panics
    ///
    /// Panics if (x, y) lies outside the wrapped rows.
    #[inline]
    pub fn pixel_mut(&mut self, x: u32, y: u32) -> &mut [f32] {
        let local_y = (y - self.y_offset) as usize;
        let idx =
            (local_y * self.width as usize + x as usize) * self.channels as usize;
        &mut self.data[idx..idx + self.channels as usize]
    }
}

/// A pipeline stage: transforms source images into one output image,
/// evaluated region by region
///
/// Implementations must be `Sync`: `process_region` is called concurrently
/// for disjoint regions, and all state reachable through `&self` is shared
/// read-only across workers. Per-worker mutable state (random generators,
/// accumulators) lives in `process_region` locals.
pub trait RegionFilter: Sync {
    /// Output shape as (frames, width, height, channels)
    ///
    /// Defaults to the shape of the first source.
    fn output_shape(&self, src: &[&Image]) -> (u32, u32, u32, u32) {
        let s = src[0];
        (1, s.width(), s.height(), s.channels())
    }

    /// Fill the output pixels inside `region`
    fn process_region(&self, src: &[&Image], out: &mut RegionOutput<'_>, region: &Region);
}

/// Validate sources and compute the output shape
///
/// All sources must share the spatial extent of the first (channel and
/// frame counts may differ); the engine only drives single-frame outputs.
fn checked_shape(
    filter: &impl RegionFilter,
    src: &[&Image],
) -> FilterResult<(u32, u32, u32, u32)> {
    let first = *src.first().ok_or(FilterError::EmptySource)?;
    for other in &src[1..] {
        first.check_same_size(other)?;
    }

    let shape = filter.output_shape(src);
    if shape.0 != 1 {
        return Err(FilterError::InvalidParameters(
            "region engine drives single-frame outputs only".to_string(),
        ));
    }
    Ok(shape)
}

/// Run the filter over the whole output on the calling thread
pub fn apply(filter: &impl RegionFilter, src: &[&Image]) -> FilterResult<Image> {
    let (frames, width, height, channels) = checked_shape(filter, src)?;
    let mut dst = Image::new(frames, width, height, channels)?;

    let region = Region::full(width, height);
    let mut out = RegionOutput::new(dst.data_mut(), width, channels, 0);
    filter.process_region(src, &mut out, &region);

    Ok(dst)
}

/// Run the filter with the output partitioned into parallel bands
///
/// Bands are disjoint horizontal strips covering the image exactly once;
/// there is no ordering guarantee between them and none is needed, since
/// no pixel depends on another worker's writes. Runs to completion; there
/// is no cancellation.
pub fn apply_parallel(filter: &impl RegionFilter, src: &[&Image]) -> FilterResult<Image> {
    let (frames, width, height, channels) = checked_shape(filter, src)?;
    let mut dst = Image::new(frames, width, height, channels)?;

    let n_bands = (rayon::current_num_threads() * 4).max(1);
    let band_rows = ((height as usize).div_ceil(n_bands)).max(1);
    let row_stride = (width as usize) * (channels as usize);

    dst.data_mut()
        .par_chunks_mut(band_rows * row_stride)
        .enumerate()
        .for_each(|(i, band)| {
            let y0 = (i * band_rows) as u32;
            let rows = (band.len() / row_stride) as u32;
            let region = Region {
                x0: 0,
                x1: width,
                y0,
                y1: y0 + rows,
            };
            let mut out = RegionOutput::new(band, width, channels, y0);
            filter.process_region(src, &mut out, &region);
        });

    Ok(dst)
}

/// Random generator for one worker
///
/// With an injected seed the generator is derived from the seed and the
/// region, so a run is reproducible for a fixed partition; without one,
/// each worker seeds independently from OS entropy.
pub fn region_rng(seed: Option<u64>, region: &Region) -> StdRng {
    match seed {
        Some(s) => StdRng::seed_from_u64(
            s ^ ((region.y0 as u64) << 32) ^ ((region.x0 as u64) << 1),
        ),
        None => StdRng::from_os_rng(),
    }
}
