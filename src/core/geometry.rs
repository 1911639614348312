//! Reine Punkt- und Distanz-Mathematik.

use glam::Vec2;

/// Euklidische Distanz zwischen zwei Punkten.
#[inline]
pub fn distance(a: Vec2, b: Vec2) -> f32 {
    a.distance(b)
}

/// Länge der geschlossenen Rundtour über die gegebenen Punkte (inkl. Rückkante).
///
/// Weniger als zwei Punkte ergeben 0.
pub fn closed_tour_length(points: &[Vec2]) -> f32 {
    if points.len() < 2 {
        return 0.0;
    }
    let open: f32 = points.windows(2).map(|w| distance(w[0], w[1])).sum();
    open + distance(points[points.len() - 1], points[0])
}
