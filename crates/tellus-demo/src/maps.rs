//! Debug map rendering: elevation and ice-coverage fields as RGB images.

use image::{Rgb, RgbImage};
use tellus_ice::IceCapSettings;

use crate::equirect_point;

/// Render an elevation grid to a color-banded map.
///
/// Normalizes each sample against the session's elevation range and maps it
/// through deep ocean, shallows, lowlands, highlands, and snow.
pub fn render_elevation(
    elevations: &[f32],
    width: u32,
    height: u32,
    min: f32,
    max: f32,
) -> RgbImage {
    let span = max - min;
    RgbImage::from_fn(width, height, |px, py| {
        let e = elevations[(py * width + px) as usize];
        let normalized = if span > 0.0 { (e - min) / span } else { 0.5 };
        Rgb(elevation_color(normalized))
    })
}

/// Map a normalized elevation `[0, 1]` to an RGB color band.
fn elevation_color(normalized: f32) -> [u8; 3] {
    if normalized < 0.2 {
        // Deep ocean.
        [10, 20, 110]
    } else if normalized < 0.4 {
        // Shallows.
        let t = (normalized - 0.2) / 0.2;
        [
            (10.0 + t * 30.0) as u8,
            (20.0 + t * 80.0) as u8,
            (110.0 + t * 90.0) as u8,
        ]
    } else if normalized < 0.55 {
        // Lowlands.
        let t = (normalized - 0.4) / 0.15;
        [(40.0 + t * 60.0) as u8, (140.0 - t * 20.0) as u8, 50]
    } else if normalized < 0.8 {
        // Highlands.
        let t = (normalized - 0.55) / 0.25;
        [
            (120.0 + t * 40.0) as u8,
            (110.0 - t * 30.0) as u8,
            (50.0 + t * 20.0) as u8,
        ]
    } else {
        // Peaks.
        let t = ((normalized - 0.8) / 0.2).clamp(0.0, 1.0);
        let c = (180.0 + t * 75.0) as u8;
        [c, c, c]
    }
}

/// Render the ice-coverage field over the sampled elevation grid.
///
/// Each pixel's elevation is normalized against the session range before the
/// coverage query, matching the settings' normalized elevation bounds. The
/// noise-variation factor is composed multiplicatively and the result is
/// re-clamped, then shaded from dark (bare) to white-blue (full ice).
pub fn render_ice_coverage(
    elevations: &[f32],
    width: u32,
    height: u32,
    min: f32,
    max: f32,
    settings: &IceCapSettings,
) -> RgbImage {
    let span = max - min;
    RgbImage::from_fn(width, height, |px, py| {
        let point = equirect_point(px, py, width, height);
        let e = elevations[(py * width + px) as usize];
        let normalized = if span > 0.0 { (e - min) / span } else { 0.5 };

        let base = tellus_ice::coverage(point, normalized, settings);
        let modulated =
            (base * tellus_ice::noise_modulation(point, settings)).clamp(0.0, 1.0);

        Rgb([
            (30.0 + modulated * 200.0) as u8,
            (30.0 + modulated * 215.0) as u8,
            (50.0 + modulated * 205.0) as u8,
        ])
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_elevation_color_bands_brighten_upward() {
        let low = elevation_color(0.0);
        let high = elevation_color(1.0);
        assert!(
            high[0] as u32 + high[1] as u32 + high[2] as u32
                > low[0] as u32 + low[1] as u32 + low[2] as u32,
            "Peaks should render brighter than deep ocean"
        );
    }

    #[test]
    fn test_render_elevation_dimensions() {
        let elevations = vec![1.0; 32 * 16];
        let map = render_elevation(&elevations, 32, 16, 0.9, 1.1);
        assert_eq!(map.dimensions(), (32, 16));
    }

    #[test]
    fn test_ice_map_polar_brighter_than_equator() {
        let settings = IceCapSettings {
            use_elevation_mask: false,
            use_noise_variation: false,
            ..IceCapSettings::earth_like()
        };
        let elevations = vec![1.0; 64 * 32];
        let map = render_ice_coverage(&elevations, 64, 32, 0.9, 1.1, &settings);

        let pole = map.get_pixel(32, 0);
        let equator = map.get_pixel(32, 16);
        assert!(
            pole[2] > equator[2],
            "Polar pixels should carry more ice than the equator: {pole:?} vs {equator:?}"
        );
    }

    #[test]
    fn test_degenerate_range_renders_flat() {
        let elevations = vec![1.0; 16 * 8];
        // min == max: the normalizer must not divide by zero.
        let map = render_elevation(&elevations, 16, 8, 1.0, 1.0);
        let first = map.get_pixel(0, 0);
        for (_, _, pixel) in map.enumerate_pixels() {
            assert_eq!(pixel, first, "A flat field should render one color");
        }
    }
}
