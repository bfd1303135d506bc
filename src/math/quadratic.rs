/// Real roots of `a·u² + b·u + c = 0`, smaller root first.
///
/// Returns `None` when `a` is exactly zero or the discriminant is not
/// positive. A zero discriminant is a grazing touch and is not counted as an
/// intersection. Small but non-zero `a` is solved normally.
pub fn solve_quadratic(a: f32, b: f32, c: f32) -> Option<(f32, f32)> {
    if a == 0.0 {
        return None;
    }

    let discriminant = b * b - 4.0 * a * c;
    if discriminant <= 0.0 || !discriminant.is_finite() {
        return None;
    }

    // q never cancels, so both roots keep full precision even when `a` is tiny
    let q = -0.5 * (b + b.signum() * discriminant.sqrt());
    let r0 = q / a;
    let r1 = c / q;

    if r0 <= r1 {
        Some((r0, r1))
    } else {
        Some((r1, r0))
    }
}
