//! Separable convolution over rasters: zero-padded horizontal and
//! vertical passes, sequential and parallel execution, and a Gaussian
//! convenience layer.
//!
//! Out-of-range samples contribute zero, never a replicated or reflected
//! value; output compatibility depends on this exact boundary policy.
//! Filtering is defined for single-channel and planar rasters;
//! interleaved 3-channel input must be converted to a planar layout
//! first.

mod horizontal;
mod kernel;
mod taps;
mod vertical;

pub use kernel::Kernel;

use crate::alignment::Alignment;
use crate::pixels::{Component, RasterType};
use crate::raster::Raster;
use taps::TapPlan;

/// Execution strategy of a filter call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Execution {
    /// One thread; rows and column blocks are processed in order.
    #[default]
    Sequential,
    /// Rows and column bands are distributed over the rayon pool; the
    /// call still blocks until every band is done, and the output is
    /// bit-identical to the sequential strategy.
    Parallel,
}

/// Configured entry point of the convolution engine.
///
/// The value is cheap to build and copy; it fixes the execution strategy
/// and, optionally, an alignment override once, so nothing is re-derived
/// in the per-row loops.
#[derive(Debug, Clone, Copy, Default)]
pub struct Convolver {
    execution: Execution,
    alignment: Option<Alignment>,
}

impl Convolver {
    pub fn new(execution: Execution) -> Self {
        Self {
            execution,
            alignment: None,
        }
    }

    /// Override the derived coefficient-alignment hint. Without an
    /// override the hint is computed from the kernel buffer's address at
    /// each call.
    pub fn with_alignment(mut self, alignment: Alignment) -> Self {
        self.alignment = Some(alignment);
        self
    }

    fn plan(&self, kernel: &Kernel) -> TapPlan {
        let alignment = self
            .alignment
            .unwrap_or_else(|| Alignment::of(kernel.coeffs()));
        TapPlan::new(kernel.len(), alignment)
    }

    /// Horizontal pass into a fresh raster of the same shape.
    pub fn filter_horizontal(&self, src: &Raster, kernel: &Kernel) -> Raster {
        let mut dst = src.clone();
        self.filter_horizontal_in_place(&mut dst, kernel);
        dst
    }

    /// Horizontal pass, overwriting `raster`. The row algorithm copies
    /// each row into its scratch buffer before writing, so aliasing
    /// source and destination is sound.
    pub fn filter_horizontal_in_place(&self, raster: &mut Raster, kernel: &Kernel) {
        self.check_filterable(raster);
        let plan = self.plan(kernel);
        match raster.raster_type() {
            RasterType::U8Gray | RasterType::U8PlanarRgb => {
                self.horiz_planes::<u8>(raster, kernel, &plan)
            }
            RasterType::F32Gray | RasterType::F32PlanarRgb => {
                self.horiz_planes::<f32>(raster, kernel, &plan)
            }
            RasterType::U8Rgb | RasterType::F32Rgb => unreachable!(),
        }
    }

    /// Vertical pass into a fresh raster of the same shape.
    pub fn filter_vertical(&self, src: &Raster, kernel: &Kernel) -> Raster {
        self.check_filterable(src);
        let plan = self.plan(kernel);
        let mut dst = Raster::create(src.width(), src.height(), src.raster_type());
        match src.raster_type() {
            RasterType::U8Gray | RasterType::U8PlanarRgb => {
                self.vert_planes::<u8>(src, &mut dst, kernel, &plan)
            }
            RasterType::F32Gray | RasterType::F32PlanarRgb => {
                self.vert_planes::<f32>(src, &mut dst, kernel, &plan)
            }
            RasterType::U8Rgb | RasterType::F32Rgb => unreachable!(),
        }
        dst
    }

    /// Vertical pass, overwriting `raster`.
    pub fn filter_vertical_in_place(&self, raster: &mut Raster, kernel: &Kernel) {
        self.check_filterable(raster);
        let plan = self.plan(kernel);
        match raster.raster_type() {
            RasterType::U8Gray | RasterType::U8PlanarRgb => {
                self.vert_planes_in_place::<u8>(raster, kernel, &plan)
            }
            RasterType::F32Gray | RasterType::F32PlanarRgb => {
                self.vert_planes_in_place::<f32>(raster, kernel, &plan)
            }
            RasterType::U8Rgb | RasterType::F32Rgb => unreachable!(),
        }
    }

    /// Full separable 2D filter: the horizontal pass composed with the
    /// vertical pass.
    pub fn filter_separable(&self, src: &Raster, kernel: &Kernel) -> Raster {
        let mut dst = self.filter_horizontal(src, kernel);
        self.filter_vertical_in_place(&mut dst, kernel);
        dst
    }

    /// Separable filter, overwriting `raster`.
    pub fn filter_separable_in_place(&self, raster: &mut Raster, kernel: &Kernel) {
        self.filter_horizontal_in_place(raster, kernel);
        self.filter_vertical_in_place(raster, kernel);
    }

    /// Gaussian blur with a synthesized kernel (see [`Kernel::gaussian`]).
    pub fn gaussian_blur(&self, src: &Raster, sigma: f32) -> Raster {
        self.filter_separable(src, &Kernel::gaussian(sigma))
    }

    fn check_filterable(&self, raster: &Raster) {
        if raster.is_empty() {
            fatal!("cannot filter an empty raster");
        }
        match raster.raster_type() {
            RasterType::U8Rgb | RasterType::F32Rgb => fatal!(
                "cannot filter an interleaved 3-channel raster; convert to a planar layout first"
            ),
            RasterType::U8Gray
            | RasterType::F32Gray
            | RasterType::U8PlanarRgb
            | RasterType::F32PlanarRgb => {}
        }
    }

    fn horiz_planes<T: Component>(&self, raster: &mut Raster, kernel: &Kernel, plan: &TapPlan) {
        let width = raster.width();
        for c in 0..raster.channel_count() {
            horizontal::filter_rows::<T>(
                raster.channel_slice_mut(c),
                width,
                kernel.coeffs(),
                plan,
                self.execution,
            );
        }
    }

    fn vert_planes<T: Component>(
        &self,
        src: &Raster,
        dst: &mut Raster,
        kernel: &Kernel,
        plan: &TapPlan,
    ) {
        let (width, height) = (src.width(), src.height());
        for c in 0..src.channel_count() {
            let src_plane = src.channel_slice::<T>(c);
            let dst_plane = dst.channel_slice_mut::<T>(c);
            match self.execution {
                Execution::Sequential => {
                    dst_plane.copy_from_slice(src_plane);
                    vertical::filter_cols_in_place::<T>(
                        dst_plane,
                        width,
                        height,
                        kernel.coeffs(),
                        plan,
                    );
                }
                Execution::Parallel => {
                    vertical::filter_cols_par::<T>(
                        src_plane,
                        dst_plane,
                        width,
                        height,
                        kernel.coeffs(),
                        plan,
                    );
                }
            }
        }
    }

    fn vert_planes_in_place<T: Component>(
        &self,
        raster: &mut Raster,
        kernel: &Kernel,
        plan: &TapPlan,
    ) {
        let (width, height) = (raster.width(), raster.height());
        for c in 0..raster.channel_count() {
            let plane = raster.channel_slice_mut::<T>(c);
            match self.execution {
                Execution::Sequential => {
                    vertical::filter_cols_in_place::<T>(plane, width, height, kernel.coeffs(), plan);
                }
                Execution::Parallel => {
                    // band workers read rows other bands write, so the
                    // parallel strategy needs a snapshot of the source
                    let snapshot = plane.to_vec();
                    vertical::filter_cols_par::<T>(
                        &snapshot,
                        plane,
                        width,
                        height,
                        kernel.coeffs(),
                        plan,
                    );
                }
            }
        }
    }
}

/// Sequential horizontal pass with a default engine.
pub fn filter_horizontal(src: &Raster, kernel: &Kernel) -> Raster {
    Convolver::default().filter_horizontal(src, kernel)
}

/// Parallel variant of [`filter_horizontal`].
pub fn filter_horizontal_par(src: &Raster, kernel: &Kernel) -> Raster {
    Convolver::new(Execution::Parallel).filter_horizontal(src, kernel)
}

/// Sequential vertical pass with a default engine.
pub fn filter_vertical(src: &Raster, kernel: &Kernel) -> Raster {
    Convolver::default().filter_vertical(src, kernel)
}

/// Parallel variant of [`filter_vertical`].
pub fn filter_vertical_par(src: &Raster, kernel: &Kernel) -> Raster {
    Convolver::new(Execution::Parallel).filter_vertical(src, kernel)
}

/// Sequential separable 2D filter with a default engine.
pub fn filter_separable(src: &Raster, kernel: &Kernel) -> Raster {
    Convolver::default().filter_separable(src, kernel)
}

/// Parallel variant of [`filter_separable`].
pub fn filter_separable_par(src: &Raster, kernel: &Kernel) -> Raster {
    Convolver::new(Execution::Parallel).filter_separable(src, kernel)
}

/// Sequential Gaussian blur with a default engine.
pub fn gaussian_blur(src: &Raster, sigma: f32) -> Raster {
    Convolver::default().gaussian_blur(src, sigma)
}

/// Parallel variant of [`gaussian_blur`].
pub fn gaussian_blur_par(src: &Raster, sigma: f32) -> Raster {
    Convolver::new(Execution::Parallel).gaussian_blur(src, sigma)
}
