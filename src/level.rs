/// Static platform layout — a pure function of the viewport size.

use crate::geometry::Rect;

/// Thickness of the floating platforms.
const PLATFORM_H: f32 = 24.0;

/// Build the platform set for a `width` × `height` world.
///
/// Deterministic: one full-width ground slab, two wide elevated platforms
/// and one smaller one at fixed proportional offsets.  Callers regenerate
/// the whole list on every resize and match reset — platforms are never
/// patched in place.
pub fn create_level(width: f32, height: f32) -> Vec<Rect> {
    let ground_h = 160.0_f32.min((height * 0.12).round());
    let plat_w = 420.0_f32.min(width * 0.35);

    vec![
        Rect::new(0.0, height - ground_h, width, ground_h),
        Rect::new((width * 0.12).round(), height - 300.0, plat_w, PLATFORM_H),
        Rect::new((width * 0.6).round(), height - 420.0, plat_w, PLATFORM_H),
        Rect::new(
            (width * 0.42).round(),
            height - 190.0,
            plat_w * 0.7,
            PLATFORM_H,
        ),
    ]
}
