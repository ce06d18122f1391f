//! Sub-pixel sampling at floating coordinates, defined per channel.

use crate::raster::Raster;

impl Raster {
    /// Bilinear sample of channel `c` at `(x, y)` from the four
    /// surrounding integer samples. The coordinate must lie at least one
    /// pixel inside every border.
    pub fn bilinear(&self, x: f32, y: f32, c: usize) -> f32 {
        self.check_channel(c);
        self.check_margin(x, y, 1.0);
        let x0 = x.floor();
        let y0 = y.floor();
        let fx = x - x0;
        let fy = y - y0;
        let xi = x0 as usize;
        let yi = y0 as usize;

        let top = self.component_f32(xi, yi, c) * (1.0 - fx) + self.component_f32(xi + 1, yi, c) * fx;
        let bottom =
            self.component_f32(xi, yi + 1, c) * (1.0 - fx) + self.component_f32(xi + 1, yi + 1, c) * fx;
        top * (1.0 - fy) + bottom * fy
    }

    /// Bicubic (Catmull-Rom) sample of channel `c` at `(x, y)` from the
    /// sixteen surrounding integer samples. The coordinate must lie at
    /// least two pixels inside every border.
    pub fn bicubic(&self, x: f32, y: f32, c: usize) -> f32 {
        self.check_channel(c);
        self.check_margin(x, y, 2.0);
        let x0 = x.floor();
        let y0 = y.floor();
        let fx = x - x0;
        let fy = y - y0;
        let xi = x0 as usize;
        let yi = y0 as usize;

        let wx = [
            catmull(fx + 1.0),
            catmull(fx),
            catmull(1.0 - fx),
            catmull(2.0 - fx),
        ];
        let wy = [
            catmull(fy + 1.0),
            catmull(fy),
            catmull(1.0 - fy),
            catmull(2.0 - fy),
        ];

        let mut acc = 0.0;
        for (dy, &row_weight) in wy.iter().enumerate() {
            let mut row = 0.0;
            for (dx, &col_weight) in wx.iter().enumerate() {
                row += self.component_f32(xi + dx - 1, yi + dy - 1, c) * col_weight;
            }
            acc += row * row_weight;
        }
        acc
    }

    fn check_margin(&self, x: f32, y: f32, margin: f32) {
        let max_x = self.width() as f32 - 1.0 - margin;
        let max_y = self.height() as f32 - 1.0 - margin;
        if !(x >= margin && x <= max_x && y >= margin && y <= max_y) {
            fatal!(
                "sample coordinate ({x},{y}) violates the {margin}-pixel margin of a {}x{} raster",
                self.width(),
                self.height()
            );
        }
    }
}

/// Catmull-Rom cubic weight (A = -0.5), the classic bicubic convolution
/// kernel.
fn catmull(x: f32) -> f32 {
    const A: f32 = -0.5;
    let x = x.abs();
    if x < 1.0 {
        ((A + 2.0) * x - (A + 3.0)) * x * x + 1.0
    } else if x < 2.0 {
        (((x - 5.0) * x + 8.0) * x - 4.0) * A
    } else {
        0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn catmull_interpolates() {
        assert_eq!(catmull(0.0), 1.0);
        assert_eq!(catmull(1.0), 0.0);
        assert_eq!(catmull(2.0), 0.0);
        // the four weights of any phase sum to one
        for phase in [0.0f32, 0.25, 0.5, 0.9] {
            let sum =
                catmull(phase + 1.0) + catmull(phase) + catmull(1.0 - phase) + catmull(2.0 - phase);
            assert!((sum - 1.0).abs() < 1e-6);
        }
    }
}
