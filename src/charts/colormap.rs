//! Sequential "Reds" colormap (ColorBrewer, as used by matplotlib).

use plotters::style::RGBColor;

const REDS: [(u8, u8, u8); 9] = [
    (255, 245, 240),
    (254, 224, 210),
    (252, 187, 161),
    (252, 146, 114),
    (251, 106, 74),
    (239, 59, 44),
    (203, 24, 29),
    (165, 15, 21),
    (103, 0, 13),
];

pub struct Reds;

impl Reds {
    /// Color at `t` in `[0, 1]`; values outside are clamped, NaN maps to 0.
    pub fn at(t: f64) -> RGBColor {
        let t = if t.is_nan() { 0.0 } else { t.clamp(0.0, 1.0) };
        let scaled = t * (REDS.len() - 1) as f64;
        let lo = (scaled.floor() as usize).min(REDS.len() - 2);
        let frac = scaled - lo as f64;
        let (a, b) = (REDS[lo], REDS[lo + 1]);
        RGBColor(lerp(a.0, b.0, frac), lerp(a.1, b.1, frac), lerp(a.2, b.2, frac))
    }

    /// Color of `value` on a `[min, max]` scale. A flat scale maps to the
    /// middle of the ramp.
    pub fn normalized(value: f64, min: f64, max: f64) -> RGBColor {
        if max > min {
            Self::at((value - min) / (max - min))
        } else {
            Self::at(0.5)
        }
    }
}

fn lerp(a: u8, b: u8, t: f64) -> u8 {
    (f64::from(a) + (f64::from(b) - f64::from(a)) * t).round() as u8
}
