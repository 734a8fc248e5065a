//! Easing curves for time-boxed animations

/// Cubic ease-in-out over normalized progress `p ∈ [0, 1]`.
///
/// `4p³` in the first half, `1 - (-2p + 2)³ / 2` in the second, so the curve
/// starts and ends with zero velocity.
pub fn cubic_in_out(p: f32) -> f32 {
    let p = p.clamp(0.0, 1.0);
    if p < 0.5 {
        4.0 * p * p * p
    } else {
        let q = -2.0 * p + 2.0;
        1.0 - q * q * q / 2.0
    }
}

/// Smoothstep: 3t² - 2t³
pub fn smoothstep(t: f32) -> f32 {
    let t = t.clamp(0.0, 1.0);
    t * t * (3.0 - 2.0 * t)
}
