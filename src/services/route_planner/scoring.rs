use crate::constants::*;
use crate::models::{RouteCandidate, RouteTag, ScoredRoute};
use uuid::Uuid;

/// Score and rank routes, best first.
///
/// The weighted formula combines time efficiency, distance, the road
/// safety heuristic (min-max normalized within this candidate set, so not
/// comparable across requests) and route simplicity. Empty input yields an
/// empty result, never an error.
pub fn score_routes(candidates: Vec<RouteCandidate>) -> Vec<ScoredRoute> {
    if candidates.is_empty() {
        return Vec::new();
    }

    let safety_raws: Vec<f64> = candidates
        .iter()
        .map(|c| safety_raw(c.distance_meters, c.point_count()))
        .collect();
    let max_safety = safety_raws.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    let min_safety = safety_raws.iter().copied().fold(f64::INFINITY, f64::min);
    let safety_range = (max_safety - min_safety).max(SCORE_EPSILON);

    let mut scored: Vec<(f64, ScoredRoute)> = candidates
        .into_iter()
        .zip(safety_raws)
        .map(|(candidate, raw_safety)| {
            let time_score = safe_div(1.0, candidate.duration_seconds);
            let dist_score = safe_div(1.0, candidate.distance_meters);
            let safety_score = (raw_safety - min_safety) / safety_range;
            let simplicity_score = safe_div(1.0, candidate.point_count() as f64);

            let raw = WEIGHT_TIME * time_score
                + WEIGHT_DISTANCE * dist_score
                + WEIGHT_SAFETY * safety_score
                + WEIGHT_SIMPLICITY * simplicity_score;

            let route = ScoredRoute {
                id: Uuid::new_v4(),
                distance_km: round_to(candidate.distance_meters / 1000.0, 2),
                duration_min: round_to(candidate.duration_seconds / 60.0, 1),
                score: round_to(raw * SCORE_DISPLAY_SCALE, 2),
                geometry: candidate.geometry,
                recommended: false,
                tags: Vec::new(),
            };

            (raw_safety, route)
        })
        .collect();

    // Stable sort: exact score ties keep their arrival order, so the
    // recommended route is the first-encountered maximum.
    scored.sort_by(|a, b| {
        b.1.score
            .partial_cmp(&a.1.score)
            .unwrap_or(std::cmp::Ordering::Equal)
    });
    scored[0].1.recommended = true;

    let min_duration = scored
        .iter()
        .map(|(_, r)| r.duration_min)
        .fold(f64::INFINITY, f64::min);
    let min_distance = scored
        .iter()
        .map(|(_, r)| r.distance_km)
        .fold(f64::INFINITY, f64::min);
    let max_raw_safety = scored
        .iter()
        .map(|(raw, _)| *raw)
        .fold(f64::NEG_INFINITY, f64::max);

    for (raw_safety, route) in &mut scored {
        if route.recommended {
            route.tags.push(RouteTag::Best);
        }
        if route.duration_min == min_duration {
            route.tags.push(RouteTag::Fastest);
        }
        if route.distance_km == min_distance {
            route.tags.push(RouteTag::Shortest);
        }
        let safety_gap =
            (*raw_safety - max_raw_safety).abs() / max_raw_safety.max(SCORE_EPSILON);
        if safety_gap < SAFEST_TAG_TOLERANCE {
            route.tags.push(RouteTag::Safest);
        }
    }

    scored.into_iter().map(|(_, route)| route).collect()
}

/// Highway heuristic: longer routes are more likely to ride higher-class
/// roads, while a high point count relative to distance stands in for
/// turn and junction density. A log-ratio proxy, not a real safety
/// measurement; meaningful only relative to the other routes in the set.
fn safety_raw(distance_m: f64, point_count: usize) -> f64 {
    let highway = (distance_m / 1000.0).ln_1p();
    let turn_penalty = (point_count as f64 / 60.0).ln_1p();
    highway / turn_penalty.max(0.01)
}

fn safe_div(numerator: f64, denominator: f64) -> f64 {
    numerator / denominator.max(SCORE_EPSILON)
}

fn round_to(value: f64, decimals: i32) -> f64 {
    let factor = 10f64.powi(decimals);
    (value * factor).round() / factor
}
