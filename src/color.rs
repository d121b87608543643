use eframe::egui::Color32;
use palette::{Hsl, IntoColor, LinSrgb, Mix, Srgb};

// ---------------------------------------------------------------------------
// Color palette generator
// ---------------------------------------------------------------------------

/// Generates `n` visually distinct colours using evenly spaced hues.
pub fn generate_palette(n: usize) -> Vec<Color32> {
    if n == 0 {
        return Vec::new();
    }
    (0..n)
        .map(|i| {
            let hue = (i as f32 / n as f32) * 360.0;
            let hsl = Hsl::new(hue, 0.75, 0.55);
            let rgb: Srgb = hsl.into_color();
            to_color32(rgb)
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Diverging map for ordinal values and correlations
// ---------------------------------------------------------------------------

const COOL: (f32, f32, f32) = (0.230, 0.299, 0.754);
const NEUTRAL: (f32, f32, f32) = (0.865, 0.865, 0.865);
const WARM: (f32, f32, f32) = (0.706, 0.016, 0.150);

/// Blue → grey → red, `t` in `[0, 1]` (clamped). NaN maps to the neutral grey.
pub fn coolwarm(t: f32) -> Color32 {
    let t = if t.is_nan() { 0.5 } else { t.clamp(0.0, 1.0) };
    let lin = |(r, g, b): (f32, f32, f32)| Srgb::new(r, g, b).into_linear::<f32>();
    let (from, to, factor): (LinSrgb, LinSrgb, f32) = if t < 0.5 {
        (lin(COOL), lin(NEUTRAL), t * 2.0)
    } else {
        (lin(NEUTRAL), lin(WARM), (t - 0.5) * 2.0)
    };
    to_color32(Srgb::from_linear(from.mix(to, factor)))
}

/// `n` evenly spaced samples of [`coolwarm`], coolest first.
pub fn coolwarm_steps(n: usize) -> Vec<Color32> {
    match n {
        0 => Vec::new(),
        1 => vec![coolwarm(0.5)],
        _ => (0..n).map(|i| coolwarm(i as f32 / (n - 1) as f32)).collect(),
    }
}

fn to_color32(rgb: Srgb) -> Color32 {
    let rgb: Srgb<u8> = rgb.into_format();
    Color32::from_rgb(rgb.red, rgb.green, rgb.blue)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn palette_has_requested_size() {
        assert!(generate_palette(0).is_empty());
        let colors = generate_palette(4);
        assert_eq!(colors.len(), 4);
        assert_ne!(colors[0], colors[2]);
    }

    #[test]
    fn coolwarm_endpoints() {
        let cold = coolwarm(0.0);
        let hot = coolwarm(1.0);
        assert!(cold.b() > cold.r());
        assert!(hot.r() > hot.b());
        assert_eq!(coolwarm(f32::NAN), coolwarm(0.5));
        assert_eq!(coolwarm(-3.0), cold);
        assert_eq!(coolwarm_steps(3), vec![cold, coolwarm(0.5), hot]);
    }
}
