use crate::constants::{CITY_TRIP_MAX_KM, MEDIUM_TRIP_MAX_KM, MICRO_TRIP_MAX_KM};
use crate::models::Coordinate;

/// Guard against a zero-length segment when start and end coincide.
const MIN_SEGMENT_LENGTH: f64 = 1e-9;

/// Synthesize via-points that bias the routing backend toward corridors it
/// would not surface on its own. Offsets are fractions of the start-end
/// segment length, so a 500 m trip gets meter-scale detours and a 200 km
/// trip gets kilometer-scale ones.
///
/// Vector geometry is done in coordinate-degree space treated as a local
/// Euclidean plane, which holds up fine at the regional extents involved.
/// The enumeration order is fixed; it determines backend query order.
pub fn via_points(start: &Coordinate, end: &Coordinate, trip_km: f64) -> Vec<Coordinate> {
    let mid_lat = (start.lat + end.lat) / 2.0;
    let mid_lon = (start.lon + end.lon) / 2.0;

    let dlat = end.lat - start.lat;
    let dlon = end.lon - start.lon;
    let seg_len = (dlat * dlat + dlon * dlon).sqrt().max(MIN_SEGMENT_LENGTH);

    // Unit perpendicular and parallel vectors in (lat, lon) degree space
    let perp_lat = -dlon / seg_len;
    let perp_lon = dlat / seg_len;
    let para_lat = dlat / seg_len;
    let para_lon = dlon / seg_len;

    let mut via = Vec::new();

    if trip_km < MICRO_TRIP_MAX_KM {
        // Micro: tight street-level alternatives around the midpoint
        for perp_f in [0.12, 0.20, -0.12, -0.20] {
            let off = seg_len * perp_f;
            via.push(Coordinate {
                lat: mid_lat + perp_lat * off,
                lon: mid_lon + perp_lon * off,
            });
        }
        // Along-track shifted midpoints
        for para_f in [0.30, -0.30] {
            for perp_f in [0.10, -0.10] {
                let p_off = seg_len * para_f;
                let o_off = seg_len * perp_f;
                via.push(Coordinate {
                    lat: mid_lat + para_lat * p_off + perp_lat * o_off,
                    lon: mid_lon + para_lon * p_off + perp_lon * o_off,
                });
            }
        }
        // Quarter-points perpendicular
        for quarter_f in [0.25, 0.75] {
            let q_lat = start.lat + dlat * quarter_f;
            let q_lon = start.lon + dlon * quarter_f;
            for perp_f in [0.15, -0.15] {
                let off = seg_len * perp_f;
                via.push(Coordinate {
                    lat: q_lat + perp_lat * off,
                    lon: q_lon + perp_lon * off,
                });
            }
        }
    } else if trip_km < CITY_TRIP_MAX_KM {
        // City: three concentric rings around the midpoint, 8 angles each.
        // Longitude offsets are corrected by 1/cos(lat) so ring points sit
        // at approximately equal ground distances in both axes.
        let offsets = [seg_len * 0.12, seg_len * 0.22, seg_len * 0.35];
        let cos_lat = mid_lat.to_radians().cos();
        let cos_lat = if cos_lat == 0.0 { 1.0 } else { cos_lat };
        for off in offsets {
            for angle_deg in [0.0, 45.0, 90.0, 135.0, 180.0, 225.0, 270.0, 315.0] {
                let rad = f64::to_radians(angle_deg);
                via.push(Coordinate {
                    lat: mid_lat + off * rad.cos(),
                    lon: mid_lon + off * rad.sin() / cos_lat,
                });
            }
        }
    } else if trip_km < MEDIUM_TRIP_MAX_KM {
        // Medium: perpendicular both sides plus shifted quarter-points
        for perp_f in [0.15, 0.25, -0.15, -0.25] {
            let off = seg_len * perp_f;
            via.push(Coordinate {
                lat: mid_lat + perp_lat * off,
                lon: mid_lon + perp_lon * off,
            });
        }
        for quarter_f in [0.25, 0.75] {
            let q_lat = start.lat + dlat * quarter_f;
            let q_lon = start.lon + dlon * quarter_f;
            for perp_f in [0.12, -0.12] {
                let off = seg_len * perp_f;
                via.push(Coordinate {
                    lat: q_lat + perp_lat * off,
                    lon: q_lon + perp_lon * off,
                });
            }
        }
    } else {
        // Long: perpendicular plus forward/backward biased points
        for perp_f in [0.18, 0.30, -0.18, -0.30] {
            let off = seg_len * perp_f;
            via.push(Coordinate {
                lat: mid_lat + perp_lat * off,
                lon: mid_lon + perp_lon * off,
            });
        }
        for bias_f in [0.25, -0.25] {
            let b_off = seg_len * bias_f;
            via.push(Coordinate {
                lat: mid_lat + para_lat * b_off + perp_lat * seg_len * 0.15,
                lon: mid_lon + para_lon * b_off + perp_lon * seg_len * 0.15,
            });
        }
    }

    via
}

#[cfg(test)]
mod tests {
    use super::*;

    fn endpoints_km_apart(km: f64) -> (Coordinate, Coordinate) {
        // 1 degree latitude ~ 111 km; build a north-south segment
        let start = Coordinate::new(12.9000, 77.6000).unwrap();
        let end = Coordinate::new(12.9000 + km / 111.0, 77.6000).unwrap();
        (start, end)
    }

    fn max_offset_fraction(start: &Coordinate, end: &Coordinate, points: &[Coordinate]) -> f64 {
        let mid_lat = (start.lat + end.lat) / 2.0;
        let mid_lon = (start.lon + end.lon) / 2.0;
        let dlat = end.lat - start.lat;
        let dlon = end.lon - start.lon;
        let seg_len = (dlat * dlat + dlon * dlon).sqrt();

        points
            .iter()
            .map(|p| {
                let dx = p.lat - mid_lat;
                let dy = p.lon - mid_lon;
                (dx * dx + dy * dy).sqrt() / seg_len
            })
            .fold(0.0, f64::max)
    }

    #[test]
    fn test_micro_regime_point_count() {
        let (start, end) = endpoints_km_apart(1.0);
        let via = via_points(&start, &end, 1.0);
        assert_eq!(via.len(), 12);
    }

    #[test]
    fn test_city_regime_point_count() {
        let (start, end) = endpoints_km_apart(10.0);
        let via = via_points(&start, &end, 10.0);
        assert_eq!(via.len(), 24);
    }

    #[test]
    fn test_medium_regime_point_count() {
        let (start, end) = endpoints_km_apart(40.0);
        let via = via_points(&start, &end, 40.0);
        assert_eq!(via.len(), 8);
    }

    #[test]
    fn test_long_regime_point_count() {
        let (start, end) = endpoints_km_apart(120.0);
        let via = via_points(&start, &end, 120.0);
        assert_eq!(via.len(), 6);
    }

    #[test]
    fn test_regime_boundaries_are_strict() {
        let (start, end) = endpoints_km_apart(2.0);
        // Exactly 2 km falls into the city regime, not micro
        assert_eq!(via_points(&start, &end, 2.0).len(), 24);

        let (start, end) = endpoints_km_apart(15.0);
        assert_eq!(via_points(&start, &end, 15.0).len(), 8);

        let (start, end) = endpoints_km_apart(80.0);
        assert_eq!(via_points(&start, &end, 80.0).len(), 6);
    }

    #[test]
    fn test_offsets_scale_with_trip_length() {
        // Two micro trips of different lengths must produce the same
        // offset pattern relative to their own segment length.
        let (s1, e1) = endpoints_km_apart(0.8);
        let (s2, e2) = endpoints_km_apart(1.8);

        let f1 = max_offset_fraction(&s1, &e1, &via_points(&s1, &e1, 0.8));
        let f2 = max_offset_fraction(&s2, &e2, &via_points(&s2, &e2, 1.8));

        assert!((f1 - f2).abs() < 1e-6, "fractions differ: {} vs {}", f1, f2);
    }

    #[test]
    fn test_regimes_use_distinct_offset_patterns() {
        // A 1 km trip (micro) and a 10 km trip (city) must select visibly
        // different maximum offset magnitudes relative to trip length.
        let (s1, e1) = endpoints_km_apart(1.0);
        let (s2, e2) = endpoints_km_apart(10.0);

        let micro_frac = max_offset_fraction(&s1, &e1, &via_points(&s1, &e1, 1.0));
        let city_frac = max_offset_fraction(&s2, &e2, &via_points(&s2, &e2, 10.0));

        // Micro peaks at the 30%-parallel/10%-perpendicular points;
        // city rings reach 35% of the segment length.
        assert!(micro_frac < 0.33);
        assert!(city_frac > 0.34);
    }

    #[test]
    fn test_city_ring_ground_distances_are_comparable() {
        // At the midpoint latitude, points at 0 and 90 degrees on the same
        // ring should sit at roughly equal ground distance from the center.
        let start = Coordinate::new(59.0, 18.0).unwrap(); // high latitude
        let end = Coordinate::new(59.09, 18.0).unwrap(); // ~10 km
        let via = via_points(&start, &end, 10.0);

        let mid = Coordinate {
            lat: (start.lat + end.lat) / 2.0,
            lon: (start.lon + end.lon) / 2.0,
        };

        // First ring: angle 0 (index 0) and angle 90 (index 2)
        let d_north = mid.distance_meters(&via[0]);
        let d_east = mid.distance_meters(&via[2]);
        let ratio = d_north / d_east;
        assert!(
            (0.9..=1.1).contains(&ratio),
            "ring not round on the ground: {} vs {} m",
            d_north,
            d_east
        );
    }

    #[test]
    fn test_coincident_endpoints_do_not_panic() {
        let point = Coordinate::new(12.9, 77.6).unwrap();
        let via = via_points(&point, &point, 0.0);
        assert_eq!(via.len(), 12);
        assert!(via.iter().all(|c| c.lat.is_finite() && c.lon.is_finite()));
    }

    #[test]
    fn test_enumeration_order_is_reproducible() {
        let (start, end) = endpoints_km_apart(5.0);
        let a = via_points(&start, &end, 5.0);
        let b = via_points(&start, &end, 5.0);
        assert_eq!(a, b);
    }
}
