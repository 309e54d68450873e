/// Axis-aligned geometry helpers shared by every subsystem.

/// An axis-aligned rectangle in world units.  Platforms are plain `Rect`s;
/// every movable entity exposes its bounds as one.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
}

impl Rect {
    pub fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Rect { x, y, w, h }
    }
}

/// True iff the two rectangles intersect.  Touching edges count as overlap
/// (the inequalities are strict on the separated side).
pub fn overlaps(a: &Rect, b: &Rect) -> bool {
    !(a.x + a.w < b.x || a.x > b.x + b.w || a.y + a.h < b.y || a.y > b.y + b.h)
}

/// Clamp `v` into `[lo, hi]`.
pub fn clamp(v: f32, lo: f32, hi: f32) -> f32 {
    lo.max(hi.min(v))
}
