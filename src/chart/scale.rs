/// Linear mapping from a data domain onto a pixel range.
///
/// The range may run in either direction (the price axis maps larger values to smaller y).
/// A degenerate domain (`max <= min`) is widened to `[min, min + 1]` so the mapping stays
/// strictly monotonic and invertible.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LinearScale {
    domain: (f64, f64),
    range: (f64, f64),
}

/// Used whenever there is no data to derive a domain from
pub const UNIT_DOMAIN: (f64, f64) = (0.0, 1.0);

impl LinearScale {
    pub fn new(domain: (f64, f64), range: (f64, f64)) -> Self {
        let (d0, d1) = domain;
        let domain = if !(d0.is_finite() && d1.is_finite()) {
            UNIT_DOMAIN
        } else if d1 <= d0 {
            (d0, d0 + 1.0)
        } else {
            (d0, d1)
        };
        LinearScale { domain, range }
    }

    pub fn domain(&self) -> (f64, f64) {
        self.domain
    }

    pub fn range(&self) -> (f64, f64) {
        self.range
    }

    /// Domain value -> pixel
    pub fn scale(&self, value: f64) -> f64 {
        let (d0, d1) = self.domain;
        let (r0, r1) = self.range;
        let t = (value - d0) / (d1 - d0);
        r0 + t * (r1 - r0)
    }

    /// Pixel -> domain value. A zero-length range inverts everything to the domain start.
    pub fn invert(&self, pixel: f64) -> f64 {
        let (d0, d1) = self.domain;
        let (r0, r1) = self.range;
        if r1 == r0 {
            return d0;
        }
        let t = (pixel - r0) / (r1 - r0);
        d0 + t * (d1 - d0)
    }
}
