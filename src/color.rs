use eframe::egui::Color32;
use palette::{LinSrgb, Mix, Srgb};

// ---------------------------------------------------------------------------
// Continuous colour scale: numeric value → Color32
// ---------------------------------------------------------------------------

/// Gradient stops, low → high (pale yellow, teal, deep blue).
const STOPS: [(u8, u8, u8); 3] = [(255, 237, 160), (44, 162, 149), (37, 52, 148)];

/// Maps a numeric range onto a sequential gradient, used to colour the
/// scatter plot by Scholarly Output.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ColorScale {
    min: f64,
    max: f64,
}

impl ColorScale {
    pub fn new(min: f64, max: f64) -> Self {
        ColorScale {
            min: min.min(max),
            max: max.max(min),
        }
    }

    /// Scale spanning every value yielded by `values`; `None` when empty.
    pub fn spanning(values: impl IntoIterator<Item = f64>) -> Option<Self> {
        let mut values = values.into_iter();
        let first = values.next()?;
        let (lo, hi) = values.fold((first, first), |(lo, hi), v| (lo.min(v), hi.max(v)));
        Some(ColorScale::new(lo, hi))
    }

    /// Position of `value` in the range, clamped to `0..=1`.
    /// A degenerate range maps everything to the low end.
    pub fn normalize(&self, value: f64) -> f64 {
        let span = self.max - self.min;
        if span.abs() < f64::EPSILON {
            0.0
        } else {
            ((value - self.min) / span).clamp(0.0, 1.0)
        }
    }

    pub fn color_for(&self, value: f64) -> Color32 {
        gradient(self.normalize(value) as f32)
    }

    /// Which of `n` equal-width buckets `value` falls in.
    pub fn bucket(&self, value: f64, n: usize) -> usize {
        if n == 0 {
            return 0;
        }
        ((self.normalize(value) * n as f64) as usize).min(n - 1)
    }

    /// Value bounds and mid-point colour of bucket `i` out of `n`, for legends.
    pub fn bucket_entry(&self, i: usize, n: usize) -> (f64, f64, Color32) {
        let n = n.max(1);
        let width = (self.max - self.min) / n as f64;
        let lo = self.min + width * i as f64;
        let hi = self.min + width * (i + 1) as f64;
        (lo, hi, gradient((i as f32 + 0.5) / n as f32))
    }
}

/// Interpolate the gradient in linear RGB at `t` in `0..=1`.
fn gradient(t: f32) -> Color32 {
    let t = t.clamp(0.0, 1.0);
    let segments = (STOPS.len() - 1) as f32;
    let scaled = t * segments;
    let idx = (scaled as usize).min(STOPS.len() - 2);
    let local = scaled - idx as f32;

    let stop = |(r, g, b): (u8, u8, u8)| -> LinSrgb {
        Srgb::new(r, g, b).into_format::<f32>().into_linear()
    };
    let mixed = stop(STOPS[idx]).mix(stop(STOPS[idx + 1]), local);
    let rgb: Srgb<f32> = Srgb::from_linear(mixed);
    let rgb: Srgb<u8> = rgb.into_format();
    Color32::from_rgb(rgb.red, rgb.green, rgb.blue)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ends_of_range_hit_end_stops() {
        let scale = ColorScale::new(10.0, 110.0);
        assert_eq!(scale.color_for(10.0), Color32::from_rgb(255, 237, 160));
        assert_eq!(scale.color_for(110.0), Color32::from_rgb(37, 52, 148));
        // Out-of-range values clamp.
        assert_eq!(scale.color_for(-5.0), scale.color_for(10.0));
        assert_eq!(scale.color_for(1e9), scale.color_for(110.0));
    }

    #[test]
    fn degenerate_range_maps_to_low_end() {
        let scale = ColorScale::new(7.0, 7.0);
        assert_eq!(scale.normalize(7.0), 0.0);
        assert_eq!(scale.bucket(7.0, 5), 0);
    }

    #[test]
    fn buckets_cover_range() {
        let scale = ColorScale::spanning([0.0, 50.0, 100.0]).unwrap();
        assert_eq!(scale, ColorScale::new(100.0, 0.0));
        assert_eq!(scale.bucket(0.0, 4), 0);
        assert_eq!(scale.bucket(49.0, 4), 1);
        assert_eq!(scale.bucket(100.0, 4), 3);

        let (lo, hi, _) = scale.bucket_entry(1, 4);
        assert_eq!((lo, hi), (25.0, 50.0));
    }

    #[test]
    fn colours_rise_continuously_within_a_bucket() {
        let scale = ColorScale::new(0.0, 100.0);
        // Same bucket, different shades.
        assert_eq!(scale.bucket(1.0, 6), scale.bucket(15.0, 6));
        assert_ne!(scale.color_for(1.0), scale.color_for(15.0));
        // The mid-point swatch of a bucket is the colour of its mid-point value.
        let (lo, hi, swatch) = scale.bucket_entry(2, 4);
        assert_eq!(swatch, scale.color_for((lo + hi) / 2.0));
    }

    #[test]
    fn spanning_nothing_is_none() {
        assert!(ColorScale::spanning(std::iter::empty()).is_none());
    }
}
