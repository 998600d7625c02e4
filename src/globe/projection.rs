use std::f64::consts::{PI, TAU};

use crate::track::GeoPoint;

/// Orthographic projection clipped at 90 degrees, fitted to a viewport.
///
/// Rotation is `[lambda, phi, gamma]` in degrees and follows the usual
/// convention: rotating by `[-lon, -lat, 0]` brings `(lon, lat)` to the middle
/// of the visible hemisphere.
#[derive(Debug, Clone, PartialEq)]
pub struct Orthographic {
    width: f64,
    height: f64,
    scale: f64,
    translate: [f64; 2],
    rotate: [f64; 3],
}

impl Orthographic {
    /// Projection whose sphere outline exactly fits a `width x height` viewport.
    pub fn fit_size(width: f64, height: f64) -> Self {
        Self {
            width,
            height,
            scale: width.min(height) / 2.0,
            translate: [width / 2.0, height / 2.0],
            rotate: [0.0, 0.0, 0.0],
        }
    }

    pub fn scale(&self) -> f64 {
        self.scale
    }

    pub fn set_scale(&mut self, scale: f64) {
        self.scale = scale;
    }

    pub fn rotate(&self) -> [f64; 3] {
        self.rotate
    }

    pub fn set_rotate(&mut self, rotate: [f64; 3]) {
        self.rotate = rotate;
    }

    /// Screen position of a point. Points on the far side still project
    /// (onto the disc); use [`Orthographic::is_visible`] to clip them.
    pub fn project(&self, point: GeoPoint) -> [f64; 2] {
        let (lambda, phi) = self.rotation().forward(
            point.lon().to_radians(),
            point.lat().to_radians(),
        );
        let cos_phi = phi.cos();
        let x = cos_phi * lambda.sin();
        let y = phi.sin();
        [
            self.translate[0] + self.scale * x,
            self.translate[1] - self.scale * y,
        ]
    }

    /// Geographic point under a screen pixel, or `None` off the globe.
    pub fn invert(&self, pixel: [f64; 2]) -> Option<GeoPoint> {
        if self.scale == 0.0 || !self.scale.is_finite() {
            return None;
        }
        let x = (pixel[0] - self.translate[0]) / self.scale;
        let y = (self.translate[1] - pixel[1]) / self.scale;
        let z = (x * x + y * y).sqrt();
        if !z.is_finite() || z > 1.0 {
            return None;
        }

        let c = z.asin();
        let (sin_c, cos_c) = c.sin_cos();
        let lambda = (x * sin_c).atan2(z * cos_c);
        let phi = if z == 0.0 { 0.0 } else { (y * sin_c / z).asin() };

        let (lambda, phi) = self.rotation().inverse(lambda, phi);
        let point = GeoPoint::new(lambda.to_degrees(), phi.to_degrees());
        point.is_finite().then_some(point)
    }

    /// Point at the middle of the viewport.
    pub fn center(&self) -> Option<GeoPoint> {
        self.invert([self.width / 2.0, self.height / 2.0])
    }

    /// Whether a point lies on the visible hemisphere.
    pub fn is_visible(&self, point: GeoPoint) -> bool {
        let (lambda, phi) = self.rotation().forward(
            point.lon().to_radians(),
            point.lat().to_radians(),
        );
        lambda.cos() * phi.cos() > 0.0
    }

    fn rotation(&self) -> Rotation {
        Rotation::new(
            self.rotate[0].to_radians(),
            self.rotate[1].to_radians(),
            self.rotate[2].to_radians(),
        )
    }
}

struct Rotation {
    delta_lambda: f64,
    cos_delta_phi: f64,
    sin_delta_phi: f64,
    cos_delta_gamma: f64,
    sin_delta_gamma: f64,
}

impl Rotation {
    fn new(delta_lambda: f64, delta_phi: f64, delta_gamma: f64) -> Self {
        Self {
            delta_lambda: delta_lambda % TAU,
            cos_delta_phi: delta_phi.cos(),
            sin_delta_phi: delta_phi.sin(),
            cos_delta_gamma: delta_gamma.cos(),
            sin_delta_gamma: delta_gamma.sin(),
        }
    }

    fn forward(&self, lambda: f64, phi: f64) -> (f64, f64) {
        let lambda = wrap_lambda(lambda + self.delta_lambda);
        let cos_phi = phi.cos();
        let x = lambda.cos() * cos_phi;
        let y = lambda.sin() * cos_phi;
        let z = phi.sin();
        let k = z * self.cos_delta_phi + x * self.sin_delta_phi;
        (
            (y * self.cos_delta_gamma - k * self.sin_delta_gamma)
                .atan2(x * self.cos_delta_phi - z * self.sin_delta_phi),
            (k * self.cos_delta_gamma + y * self.sin_delta_gamma)
                .clamp(-1.0, 1.0)
                .asin(),
        )
    }

    fn inverse(&self, lambda: f64, phi: f64) -> (f64, f64) {
        let cos_phi = phi.cos();
        let x = lambda.cos() * cos_phi;
        let y = lambda.sin() * cos_phi;
        let z = phi.sin();
        let k = z * self.cos_delta_gamma - y * self.sin_delta_gamma;
        let lambda = (y * self.cos_delta_gamma + z * self.sin_delta_gamma)
            .atan2(x * self.cos_delta_phi + k * self.sin_delta_phi);
        let phi = (k * self.cos_delta_phi - x * self.sin_delta_phi)
            .clamp(-1.0, 1.0)
            .asin();
        (wrap_lambda(lambda - self.delta_lambda), phi)
    }
}

fn wrap_lambda(lambda: f64) -> f64 {
    if lambda > PI {
        lambda - TAU
    } else if lambda < -PI {
        lambda + TAU
    } else {
        lambda
    }
}
