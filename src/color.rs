use eframe::egui::Color32;
use palette::{LinSrgb, Srgb};

// ---------------------------------------------------------------------------
// Zone palette: a reversed viridis sweep, one colour per Reynolds block
// ---------------------------------------------------------------------------

/// Viridis anchor colours, dark purple → yellow.
const VIRIDIS_STOPS: [(u8, u8, u8); 5] = [
    (68, 1, 84),
    (59, 82, 139),
    (33, 145, 140),
    (94, 201, 98),
    (253, 231, 37),
];

/// Sample the viridis gradient at `t ∈ [0, 1]`, blending in linear RGB.
pub fn viridis(t: f32) -> Srgb<u8> {
    let t = t.clamp(0.0, 1.0);
    let segments = (VIRIDIS_STOPS.len() - 1) as f32;
    let pos = t * segments;
    let i = (pos.floor() as usize).min(VIRIDIS_STOPS.len() - 2);
    let local = pos - i as f32;

    let a = stop(i);
    let b = stop(i + 1);
    let mixed = LinSrgb::new(
        a.red + (b.red - a.red) * local,
        a.green + (b.green - a.green) * local,
        a.blue + (b.blue - a.blue) * local,
    );
    Srgb::<f32>::from_linear(mixed).into_format::<u8>()
}

fn stop(i: usize) -> LinSrgb {
    let (r, g, b) = VIRIDIS_STOPS[i];
    Srgb::new(r, g, b).into_format::<f32>().into_linear()
}

/// `n` colours for `n` zones: the first zone gets the light end of the
/// gradient, the last one the dark end.
pub fn zone_colors(n: usize) -> Vec<Srgb<u8>> {
    let span = n.saturating_sub(1).max(1) as f32;
    (0..n).map(|i| viridis(1.0 - i as f32 / span)).collect()
}

/// Convert a palette colour to egui.
pub fn to_color32(c: Srgb<u8>) -> Color32 {
    Color32::from_rgb(c.red, c.green, c.blue)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn gradient_ends_hit_the_stops() {
        assert_eq!(viridis(0.0), Srgb::new(68, 1, 84));
        assert_eq!(viridis(1.0), Srgb::new(253, 231, 37));
    }

    #[test]
    fn zones_run_light_to_dark() {
        let colors = zone_colors(3);
        assert_eq!(colors.len(), 3);
        assert_eq!(colors[0], viridis(1.0));
        assert_eq!(colors[2], viridis(0.0));
        assert_ne!(colors[1], colors[0]);
    }

    #[test]
    fn single_zone_and_empty() {
        assert_eq!(zone_colors(1), vec![viridis(1.0)]);
        assert!(zone_colors(0).is_empty());
    }
}
