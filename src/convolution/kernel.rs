/// Truncation radius of the synthesized Gaussian, in units of sigma.
const TRUNCATION_RADIUS: f32 = 4.0;

/// Immutable 1D convolution kernel: odd length, at least three taps.
#[derive(Debug, Clone, PartialEq)]
pub struct Kernel {
    coeffs: Vec<f32>,
}

impl Kernel {
    /// Build a kernel from raw coefficients. An even or too-short length
    /// is an invariant violation and fails fast.
    pub fn new(coeffs: Vec<f32>) -> Self {
        if coeffs.len() < 3 || coeffs.len() % 2 == 0 {
            fatal!(
                "kernel length must be odd and at least 3, got {}",
                coeffs.len()
            );
        }
        Self { coeffs }
    }

    pub fn len(&self) -> usize {
        self.coeffs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.coeffs.is_empty()
    }

    /// Taps to each side of the center.
    pub fn radius(&self) -> usize {
        self.coeffs.len() / 2
    }

    pub fn coeffs(&self) -> &[f32] {
        &self.coeffs
    }

    /// Normalized Gaussian. The length is `2 * 4 * sigma + 1` rounded up
    /// to odd and floored at three taps.
    pub fn gaussian(sigma: f32) -> Self {
        if !(sigma > 0.0) {
            fatal!("gaussian sigma must be positive, got {sigma}");
        }
        let mut len = (2.0 * TRUNCATION_RADIUS * sigma + 1.0).ceil() as usize;
        if len % 2 == 0 {
            len += 1;
        }
        let len = len.max(3);

        let mean = (len - 1) as f32 / 2.0;
        let sigma_sq = sigma * sigma;
        let mut coeffs: Vec<f32> = (0..len)
            .map(|i| {
                let x = i as f32 - mean;
                (-(x * x) / (2.0 * sigma_sq)).exp()
            })
            .collect();
        let norm: f32 = coeffs.iter().sum();
        coeffs.iter_mut().for_each(|c| *c /= norm);
        Self { coeffs }
    }

    /// Box kernel of the given odd length.
    pub fn box_blur(len: usize) -> Self {
        Self::new(vec![1.0 / len as f32; len])
    }
}
