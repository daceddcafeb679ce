use crate::constants::*;
use crate::models::RouteCandidate;

/// Filter a candidate pool down to pairwise-distinct routes.
///
/// Greedy, first-seen-wins: candidates are processed in arrival order and
/// kept only when they match no already-kept route. Acceptance order
/// affects near-tie outcomes, so callers must pass candidates in backend
/// arrival order to keep results reproducible.
pub fn dedupe(candidates: Vec<RouteCandidate>) -> Vec<RouteCandidate> {
    let mut unique: Vec<RouteCandidate> = Vec::new();

    for candidate in candidates {
        if !unique.iter().any(|kept| is_near_duplicate(kept, &candidate)) {
            unique.push(candidate);
        }
    }

    unique
}

/// Similarity test between a candidate and an already-kept route, over
/// distance, duration and geometry point count (a cheap shape proxy).
///
/// Below the short-route cutoff an absolute distance floor replaces the
/// relative test: an 80 m difference on an 800 m trip is 10%, clearly a
/// different street, yet would slip under a purely relative threshold.
fn is_near_duplicate(kept: &RouteCandidate, candidate: &RouteCandidate) -> bool {
    let rel_dist = (kept.distance_meters - candidate.distance_meters).abs()
        / kept.distance_meters.max(1.0);
    let rel_dur = (kept.duration_seconds - candidate.duration_seconds).abs()
        / kept.duration_seconds.max(1.0);
    let rel_geom = (kept.point_count() as f64 - candidate.point_count() as f64).abs()
        / (kept.point_count() as f64).max(1.0);

    let abs_dist_diff = (kept.distance_meters - candidate.distance_meters).abs();

    if candidate.distance_meters < SHORT_ROUTE_CUTOFF_METERS
        || kept.distance_meters < SHORT_ROUTE_CUTOFF_METERS
    {
        abs_dist_diff < SHORT_ABS_DISTANCE_FLOOR_METERS
            && rel_dur < SHORT_DURATION_TOLERANCE
            && rel_geom < SHORT_GEOMETRY_TOLERANCE
    } else {
        rel_dist < DISTANCE_TOLERANCE
            && rel_dur < DURATION_TOLERANCE
            && rel_geom < GEOMETRY_TOLERANCE
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn candidate(distance_m: f64, duration_s: f64, points: usize) -> RouteCandidate {
        RouteCandidate {
            distance_meters: distance_m,
            duration_seconds: duration_s,
            geometry: vec![[77.59, 12.97]; points],
        }
    }

    #[test]
    fn test_short_routes_use_absolute_floor() {
        // 20m apart, ~5% duration difference, 4% point difference: the
        // same street twice under the short-route rule.
        let pool = vec![candidate(800.0, 240.0, 50), candidate(820.0, 252.0, 52)];
        let unique = dedupe(pool);

        assert_eq!(unique.len(), 1);
        assert_eq!(unique[0].distance_meters, 800.0);
    }

    #[test]
    fn test_short_routes_with_large_absolute_difference_survive() {
        // 10% relative but 80m absolute... still under the 120m floor, so
        // only the duration and geometry differences can separate them.
        let pool = vec![candidate(800.0, 240.0, 50), candidate(880.0, 290.0, 75)];
        let unique = dedupe(pool);

        assert_eq!(unique.len(), 2);
    }

    #[test]
    fn test_standard_rule_relative_distance() {
        // relDist = 400/5000 = 0.08 > 0.04: distinct even with matching
        // duration and geometry.
        let pool = vec![candidate(5000.0, 600.0, 100), candidate(5400.0, 610.0, 102)];
        let unique = dedupe(pool);

        assert_eq!(unique.len(), 2);
    }

    #[test]
    fn test_standard_rule_flags_duplicates() {
        // All three ratios comfortably inside tolerance.
        let pool = vec![
            candidate(10_000.0, 900.0, 200),
            candidate(10_100.0, 910.0, 205),
        ];
        let unique = dedupe(pool);

        assert_eq!(unique.len(), 1);
    }

    #[test]
    fn test_first_seen_wins() {
        let pool = vec![
            candidate(10_000.0, 900.0, 200),
            candidate(10_100.0, 910.0, 205),
            candidate(10_050.0, 905.0, 202),
        ];
        let unique = dedupe(pool);

        assert_eq!(unique.len(), 1);
        assert_eq!(unique[0].distance_meters, 10_000.0);
    }

    #[test]
    fn test_rejected_against_any_accepted_route() {
        // The third candidate is distinct from the first but matches the
        // second; it must be rejected.
        let pool = vec![
            candidate(10_000.0, 900.0, 200),
            candidate(12_000.0, 1100.0, 260),
            candidate(12_050.0, 1105.0, 262),
        ];
        let unique = dedupe(pool);

        assert_eq!(unique.len(), 2);
        assert_eq!(unique[1].distance_meters, 12_000.0);
    }

    #[test]
    fn test_dedupe_is_idempotent() {
        let pool = vec![
            candidate(800.0, 240.0, 50),
            candidate(820.0, 252.0, 52),
            candidate(5000.0, 600.0, 100),
            candidate(5400.0, 610.0, 102),
            candidate(10_000.0, 900.0, 200),
        ];

        let once = dedupe(pool);
        let distances: Vec<f64> = once.iter().map(|c| c.distance_meters).collect();

        let twice = dedupe(once);
        let distances_again: Vec<f64> = twice.iter().map(|c| c.distance_meters).collect();

        assert_eq!(distances, distances_again);
    }

    #[test]
    fn test_empty_pool() {
        assert!(dedupe(Vec::new()).is_empty());
    }

    #[test]
    fn test_mixed_regime_comparison_uses_short_rule() {
        // One route under 3km pulls the comparison into the short-route
        // rule even when the other is above the cutoff.
        let pool = vec![candidate(2900.0, 300.0, 60), candidate(3010.0, 310.0, 62)];
        let unique = dedupe(pool);

        assert_eq!(unique.len(), 1);
    }
}
