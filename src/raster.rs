use std::mem;

use crate::arena::Arena;
use crate::convert;
use crate::errors::RasterBufferError;
use crate::pixels::{ChannelLayout, Component, ElementType, RasterType};
use crate::view::{ChannelView, ChannelViewMut};

/// Largest supported raster width or height.
pub const MAX_DIMENSION: usize = 1 << 15;

/// A 2D pixel grid over an [`Arena`], tagged with one of the six
/// element-type/channel-layout combinations of [`RasterType`].
///
/// A raster is either empty (`width == height == 0`) or fully consistent:
/// the arena holds exactly `width * height * pixel_size` bytes. Every
/// shape change goes through [`recreate`](Self::recreate), every tag
/// change at fixed shape through [`convert`](Self::convert). Invariant
/// violations (bad bounds, mismatched element type, disallowed layout)
/// fail fast; the recoverable surfaces are [`from_vec`](Self::from_vec)
/// and [`probe`](Self::probe).
#[derive(Debug, Clone)]
pub struct Raster {
    width: usize,
    height: usize,
    ty: RasterType,
    arena: Arena,
}

impl Default for Raster {
    fn default() -> Self {
        Self::empty()
    }
}

impl Raster {
    pub fn empty() -> Self {
        Self {
            width: 0,
            height: 0,
            ty: RasterType::U8Gray,
            arena: Arena::new(),
        }
    }

    /// Allocate a raster of the given shape; contents start zeroed.
    pub fn create(width: usize, height: usize, ty: RasterType) -> Self {
        let mut raster = Self::empty();
        raster.recreate(width, height, ty);
        raster
    }

    /// Re-point this raster at a fresh shape and tag. Prior content is not
    /// preserved; callers that need it must copy first.
    pub fn recreate(&mut self, width: usize, height: usize, ty: RasterType) {
        if width == 0 || height == 0 {
            fatal!("raster dimensions must be non-zero, got {width}x{height}");
        }
        if width > MAX_DIMENSION || height > MAX_DIMENSION {
            fatal!(
                "raster dimensions {width}x{height} exceed the supported maximum {MAX_DIMENSION}"
            );
        }
        self.arena.resize(width * height * ty.pixel_size());
        self.width = width;
        self.height = height;
        self.ty = ty;
    }

    /// Bytes a raster of the given shape would occupy, without allocating.
    /// The recoverable probe for callers that must not hit the fail-fast
    /// path.
    pub fn probe(width: usize, height: usize, ty: RasterType) -> Result<usize, RasterBufferError> {
        if width == 0 || height == 0 {
            return Err(RasterBufferError::ZeroDimension);
        }
        if width > MAX_DIMENSION || height > MAX_DIMENSION {
            return Err(RasterBufferError::DimensionTooLarge);
        }
        Ok(width * height * ty.pixel_size())
    }

    /// Adopt an external byte buffer holding native-layout elements.
    pub fn from_vec(
        width: usize,
        height: usize,
        ty: RasterType,
        bytes: Vec<u8>,
    ) -> Result<Self, RasterBufferError> {
        let expected = Self::probe(width, height, ty)?;
        if bytes.len() != expected {
            return Err(RasterBufferError::InvalidBufferSize);
        }
        let mut raster = Self::create(width, height, ty);
        raster.arena.as_bytes_mut().copy_from_slice(&bytes);
        Ok(raster)
    }

    /// Drop the pixel storage and return to the empty state.
    pub fn release(&mut self) {
        self.arena.release();
        self.width = 0;
        self.height = 0;
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn raster_type(&self) -> RasterType {
        self.ty
    }

    pub fn element_type(&self) -> ElementType {
        self.ty.element_type()
    }

    pub fn channel_count(&self) -> usize {
        self.ty.channel_count()
    }

    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    pub fn arena(&self) -> &Arena {
        &self.arena
    }

    /// Raw element bytes.
    pub fn as_bytes(&self) -> &[u8] {
        self.arena.as_bytes()
    }

    /// Deep copy: reshapes to match `other`, then copies its content.
    pub fn copy_from(&mut self, other: &Raster) {
        if other.is_empty() {
            self.release();
            self.ty = other.ty;
            return;
        }
        self.recreate(other.width, other.height, other.ty);
        self.arena.as_bytes_mut().copy_from_slice(other.arena.as_bytes());
    }

    /// O(1) exchange of shape, tag and storage.
    pub fn swap(&mut self, other: &mut Raster) {
        mem::swap(self, other);
    }

    /// Convert to `target` through the conversion graph; no-op when the
    /// tag already matches.
    pub fn convert(&mut self, target: RasterType) {
        if self.ty == target {
            return;
        }
        if self.is_empty() {
            fatal!("cannot convert an empty raster");
        }
        let mut converted = convert::convert_to(self, target);
        self.swap(&mut converted);
    }

    fn check_element(&self, expected: ElementType) {
        let actual = self.ty.element_type();
        if expected != actual {
            fatal!("element type mismatch: accessor expects {expected:?}, raster holds {actual:?}");
        }
    }

    fn check_row(&self, y: usize) {
        if y >= self.height {
            fatal!("row {y} out of range 0..{}", self.height);
        }
    }

    pub(crate) fn check_channel(&self, c: usize) {
        if c >= self.channel_count() {
            fatal!("channel {c} out of range 0..{}", self.channel_count());
        }
    }

    fn check_pixel(&self, x: usize, y: usize) {
        if x >= self.width || y >= self.height {
            fatal!(
                "pixel ({x},{y}) out of range for a {}x{} raster",
                self.width,
                self.height
            );
        }
    }

    /// Whole element buffer, typed. Fails fast when `T` disagrees with the
    /// raster's element type.
    pub(crate) fn as_components<T: Component>(&self) -> &[T] {
        self.check_element(T::ELEMENT);
        bytemuck::cast_slice(self.arena.as_bytes())
    }

    pub(crate) fn as_components_mut<T: Component>(&mut self) -> &mut [T] {
        self.check_element(T::ELEMENT);
        bytemuck::cast_slice_mut(self.arena.as_bytes_mut())
    }

    pub fn as_u8(&self) -> &[u8] {
        self.as_components::<u8>()
    }

    pub fn as_u8_mut(&mut self) -> &mut [u8] {
        self.as_components_mut::<u8>()
    }

    pub fn as_f32(&self) -> &[f32] {
        self.as_components::<f32>()
    }

    pub fn as_f32_mut(&mut self) -> &mut [f32] {
        self.as_components_mut::<f32>()
    }

    fn row<T: Component>(&self, y: usize) -> &[T] {
        self.check_row(y);
        if self.channel_count() == 3 && self.ty.layout() == ChannelLayout::Planar {
            fatal!("row access on a planar 3-channel raster; use a channel row");
        }
        let stride = self.width * self.channel_count();
        &self.as_components::<T>()[y * stride..(y + 1) * stride]
    }

    fn row_mut<T: Component>(&mut self, y: usize) -> &mut [T] {
        self.check_row(y);
        if self.channel_count() == 3 && self.ty.layout() == ChannelLayout::Planar {
            fatal!("row access on a planar 3-channel raster; use a channel row");
        }
        let stride = self.width * self.channel_count();
        &mut self.as_components_mut::<T>()[y * stride..(y + 1) * stride]
    }

    /// Row `y` of a single-channel or interleaved raster. Interleaved rows
    /// carry `3 * width` elements.
    pub fn row_u8(&self, y: usize) -> &[u8] {
        self.row::<u8>(y)
    }

    pub fn row_u8_mut(&mut self, y: usize) -> &mut [u8] {
        self.row_mut::<u8>(y)
    }

    pub fn row_f32(&self, y: usize) -> &[f32] {
        self.row::<f32>(y)
    }

    pub fn row_f32_mut(&mut self, y: usize) -> &mut [f32] {
        self.row_mut::<f32>(y)
    }

    fn channel_row<T: Component>(&self, y: usize, c: usize) -> &[T] {
        self.check_row(y);
        self.check_channel(c);
        if self.ty.layout() == ChannelLayout::Interleaved {
            fatal!("channel rows of an interleaved raster are not contiguous");
        }
        let plane = self.width * self.height;
        let start = c * plane + y * self.width;
        &self.as_components::<T>()[start..start + self.width]
    }

    fn channel_row_mut<T: Component>(&mut self, y: usize, c: usize) -> &mut [T] {
        self.check_row(y);
        self.check_channel(c);
        if self.ty.layout() == ChannelLayout::Interleaved {
            fatal!("channel rows of an interleaved raster are not contiguous");
        }
        let plane = self.width * self.height;
        let start = c * plane + y * self.width;
        let width = self.width;
        &mut self.as_components_mut::<T>()[start..start + width]
    }

    /// Row `y` of planar channel `c`.
    pub fn channel_row_u8(&self, y: usize, c: usize) -> &[u8] {
        self.channel_row::<u8>(y, c)
    }

    pub fn channel_row_u8_mut(&mut self, y: usize, c: usize) -> &mut [u8] {
        self.channel_row_mut::<u8>(y, c)
    }

    pub fn channel_row_f32(&self, y: usize, c: usize) -> &[f32] {
        self.channel_row::<f32>(y, c)
    }

    pub fn channel_row_f32_mut(&mut self, y: usize, c: usize) -> &mut [f32] {
        self.channel_row_mut::<f32>(y, c)
    }

    /// Element index of `(x, y, c)` under the raster's layout: interleaved
    /// pixels address as `(y*w + x)*3 + c`, planar as `c*w*h + y*w + x`.
    pub(crate) fn component_index(&self, x: usize, y: usize, c: usize) -> usize {
        match self.ty.layout() {
            ChannelLayout::Interleaved => (y * self.width + x) * 3 + c,
            ChannelLayout::Planar => c * self.width * self.height + y * self.width + x,
        }
    }

    pub(crate) fn component_f32(&self, x: usize, y: usize, c: usize) -> f32 {
        let index = self.component_index(x, y, c);
        match self.ty.element_type() {
            ElementType::U8 => self.as_components::<u8>()[index].to_f32(),
            ElementType::F32 => self.as_components::<f32>()[index],
        }
    }

    fn get_scalar<T: Component>(&self, x: usize, y: usize) -> T {
        self.check_pixel(x, y);
        if self.channel_count() != 1 {
            fatal!("scalar access on a 3-channel raster");
        }
        self.as_components::<T>()[y * self.width + x]
    }

    fn set_scalar<T: Component>(&mut self, x: usize, y: usize, value: T) {
        self.check_pixel(x, y);
        if self.channel_count() != 1 {
            fatal!("scalar access on a 3-channel raster");
        }
        let index = y * self.width + x;
        self.as_components_mut::<T>()[index] = value;
    }

    pub fn get_u8(&self, x: usize, y: usize) -> u8 {
        self.get_scalar::<u8>(x, y)
    }

    pub fn set_u8(&mut self, x: usize, y: usize, value: u8) {
        self.set_scalar::<u8>(x, y, value);
    }

    pub fn get_f32(&self, x: usize, y: usize) -> f32 {
        self.get_scalar::<f32>(x, y)
    }

    pub fn set_f32(&mut self, x: usize, y: usize, value: f32) {
        self.set_scalar::<f32>(x, y, value);
    }

    fn get_rgb<T: Component>(&self, x: usize, y: usize) -> [T; 3] {
        self.check_pixel(x, y);
        if self.channel_count() != 3 {
            fatal!("3-channel access on a single-channel raster");
        }
        let data = self.as_components::<T>();
        [
            data[self.component_index(x, y, 0)],
            data[self.component_index(x, y, 1)],
            data[self.component_index(x, y, 2)],
        ]
    }

    fn set_rgb<T: Component>(&mut self, x: usize, y: usize, value: [T; 3]) {
        self.check_pixel(x, y);
        if self.channel_count() != 3 {
            fatal!("3-channel access on a single-channel raster");
        }
        let indices = [
            self.component_index(x, y, 0),
            self.component_index(x, y, 1),
            self.component_index(x, y, 2),
        ];
        let data = self.as_components_mut::<T>();
        for (index, v) in indices.into_iter().zip(value) {
            data[index] = v;
        }
    }

    pub fn get_rgb_u8(&self, x: usize, y: usize) -> [u8; 3] {
        self.get_rgb::<u8>(x, y)
    }

    pub fn set_rgb_u8(&mut self, x: usize, y: usize, value: [u8; 3]) {
        self.set_rgb::<u8>(x, y, value);
    }

    pub fn get_rgb_f32(&self, x: usize, y: usize) -> [f32; 3] {
        self.get_rgb::<f32>(x, y)
    }

    pub fn set_rgb_f32(&mut self, x: usize, y: usize, value: [f32; 3]) {
        self.set_rgb::<f32>(x, y, value);
    }

    /// Contiguous plane of channel `c`; requires a planar (or
    /// single-channel) layout.
    pub(crate) fn channel_slice<T: Component>(&self, c: usize) -> &[T] {
        self.check_channel(c);
        if self.ty.layout() == ChannelLayout::Interleaved {
            fatal!("channel views require a planar layout; convert the raster first");
        }
        let plane = self.width * self.height;
        &self.as_components::<T>()[c * plane..(c + 1) * plane]
    }

    pub(crate) fn channel_slice_mut<T: Component>(&mut self, c: usize) -> &mut [T] {
        self.check_channel(c);
        if self.ty.layout() == ChannelLayout::Interleaved {
            fatal!("channel views require a planar layout; convert the raster first");
        }
        let plane = self.width * self.height;
        &mut self.as_components_mut::<T>()[c * plane..(c + 1) * plane]
    }

    /// Non-owning view of one planar channel (or of the single channel of
    /// a gray raster). The view shares the raster's arena and cannot
    /// outlive it.
    pub fn channel_view<T: Component>(&self, c: usize) -> ChannelView<'_, T> {
        ChannelView::new(self.width, self.height, self.channel_slice::<T>(c))
    }

    pub fn channel_view_mut<T: Component>(&mut self, c: usize) -> ChannelViewMut<'_, T> {
        let (width, height) = (self.width, self.height);
        ChannelViewMut::new(width, height, self.channel_slice_mut::<T>(c))
    }

    fn fill<T: Component>(&mut self, values: &[T]) {
        if values.len() != self.channel_count() {
            fatal!(
                "fill expects {} channel values, got {}",
                self.channel_count(),
                values.len()
            );
        }
        match self.ty.layout() {
            ChannelLayout::Interleaved => {
                for pixel in self.as_components_mut::<T>().chunks_exact_mut(3) {
                    pixel.copy_from_slice(values);
                }
            }
            ChannelLayout::Planar => {
                for (c, &v) in values.iter().enumerate() {
                    self.channel_slice_mut::<T>(c).fill(v);
                }
            }
        }
    }

    /// Fill every pixel with the given per-channel values.
    pub fn fill_u8(&mut self, values: &[u8]) {
        self.fill::<u8>(values);
    }

    pub fn fill_f32(&mut self, values: &[f32]) {
        self.fill::<f32>(values);
    }
}
