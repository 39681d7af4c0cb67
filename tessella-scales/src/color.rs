use palette::{Mix, Srgba};

use tessella_common::types::Rgb;

use crate::breaks::Breaks;

/// Fill color for values that cannot be classified.
pub const UNCLASSED: Rgb = Rgb::new(128, 128, 128);

// The gradient the class ramp samples: green through yellow to red
const RAMP_STOPS: [(u8, u8, u8); 3] = [(0, 200, 0), (204, 200, 0), (255, 0, 0)];

/// Generates the ordered class color ramp, one color per class.
///
/// A pure function of the class count: the ramp samples the
/// green→yellow→red gradient at `t = i / (num_classes - 1)` with
/// piecewise-linear interpolation in sRGB, so identical counts always yield
/// identical palettes. Zero classes yield an empty ramp.
pub fn class_ramp(num_classes: usize) -> Vec<Rgb> {
    let stops: Vec<Srgba> = RAMP_STOPS
        .iter()
        .map(|&(r, g, b)| Srgba::new(r, g, b, 255).into_format())
        .collect();
    let scale_factor = (stops.len() - 1) as f32;

    (0..num_classes)
        .map(|i| {
            let t = if num_classes == 1 {
                0.0
            } else {
                i as f32 / (num_classes - 1) as f32
            };
            let continuous_index = (t * scale_factor).clamp(0.0, scale_factor);
            let lower_index = continuous_index.floor() as usize;
            let upper_index = continuous_index.ceil() as usize;

            let color = if lower_index == upper_index {
                stops[lower_index]
            } else {
                let t = continuous_index - lower_index as f32;
                stops[lower_index].mix(stops[upper_index], t)
            };
            let (r, g, b, _) = color.into_format::<u8, u8>().into_components();
            Rgb::new(r, g, b)
        })
        .collect()
}

/// Resolves a raw value to its class color.
///
/// Returns the [`UNCLASSED`] gray when the value is non-finite, the
/// boundaries define no classes, or the class has no palette entry.
pub fn color_for(value: f64, breaks: &Breaks, palette: &[Rgb]) -> Rgb {
    breaks
        .class_of(value)
        .and_then(|class| palette.get(class).copied())
        .unwrap_or(UNCLASSED)
}
