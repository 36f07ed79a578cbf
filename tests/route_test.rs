//! Route model and synthesis tests

use rand::rngs::StdRng;
use rand::SeedableRng;
use train_sim::simulation::{
    synthesize, GeneratorConfig, Route, RouteError, Segment, SegmentKind, Train,
};

fn sample_route() -> Route {
    Route::new(
        vec![
            Segment::Force {
                length: 300.0,
                applied_force: 1000.0,
            },
            Segment::Station {
                max_arriving_speed: 10.0,
            },
            Segment::Common { length: 200.0 },
        ],
        20.0,
    )
    .expect("valid route")
}

fn train_at(position: f64) -> Train {
    Train {
        position,
        ..Train::new(1000.0, 5000.0)
    }
}

#[test]
fn test_route_length_is_sum_of_segments() {
    let route = sample_route();
    let sum: f64 = route.segments().iter().map(Segment::length).sum();
    assert_eq!(route.length(), sum);
    assert_eq!(route.length(), 500.0);
}

#[test]
fn test_station_has_zero_length() {
    let station = Segment::Station {
        max_arriving_speed: 12.0,
    };
    assert_eq!(station.length(), 0.0);
    assert_eq!(station.kind(), SegmentKind::Station);
}

#[test]
fn test_locate_at_start_returns_first_segment() {
    let route = sample_route();
    let location = route.locate(&Train::new(1000.0, 5000.0)).expect("located");
    assert_eq!(location.index, 0);
    assert_eq!(location.relative_position, 0.0);
    assert_eq!(location.segment, route.segments()[0]);
}

#[test]
fn test_locate_skips_stations() {
    let route = sample_route();

    // The station sits at 300m but has an empty span
    let location = route.locate(&train_at(300.0)).expect("located");
    assert_eq!(location.index, 2);
    assert_eq!(location.relative_position, 0.0);

    let location = route.locate(&train_at(450.0)).expect("located");
    assert_eq!(location.index, 2);
    assert_eq!(location.relative_position, 150.0);
}

#[test]
fn test_locate_past_end_returns_none() {
    let route = sample_route();
    assert!(route.locate(&train_at(500.0)).is_none());
    assert!(route.locate(&train_at(800.0)).is_none());
    assert!(route.locate(&train_at(499.9)).is_some());
}

#[test]
fn test_route_rejects_invalid_input() {
    assert_eq!(Route::new(Vec::new(), 10.0), Err(RouteError::Empty));
    assert_eq!(
        Route::new(vec![Segment::Common { length: 0.0 }], 10.0),
        Err(RouteError::InvalidLength {
            index: 0,
            length: 0.0
        })
    );
    assert_eq!(
        Route::new(
            vec![
                Segment::Common { length: 10.0 },
                Segment::Station {
                    max_arriving_speed: -1.0
                }
            ],
            10.0
        ),
        Err(RouteError::InvalidArrivalSpeed {
            index: 1,
            speed: -1.0
        })
    );
    assert_eq!(
        Route::new(vec![Segment::Common { length: 10.0 }], -5.0),
        Err(RouteError::InvalidEndSpeedLimit(-5.0))
    );
}

#[test]
fn test_synthesize_is_deterministic() {
    for seed in [0, 1, 42, 9_999, u64::MAX] {
        let first = synthesize(seed, 8).expect("route");
        let second = synthesize(seed, 8).expect("route");
        assert_eq!(first, second, "seed {} produced different routes", seed);
    }
}

#[test]
fn test_synthesize_with_matches_seeded_synthesis() {
    let config = GeneratorConfig::default();
    let mut rng = StdRng::seed_from_u64(17);
    let from_rng = config.synthesize_with(&mut rng, 6).expect("route");
    assert_eq!(from_rng, config.synthesize(17, 6).expect("route"));
}

#[test]
fn test_different_seeds_give_different_routes() {
    let a = synthesize(1, 6).expect("route");
    let b = synthesize(2, 6).expect("route");
    assert_ne!(a, b);
}

#[test]
fn test_synthesized_routes_are_structurally_valid() {
    for segment_count in 1..10 {
        for seed in 0..200 {
            let route = synthesize(seed, segment_count).expect("route");
            let segments = route.segments();

            assert_eq!(segments.len(), segment_count);
            assert_eq!(segments[0].kind(), SegmentKind::Force);
            assert!(
                !segments[segments.len() - 1].is_station(),
                "seed {} ends on a station",
                seed
            );
            for pair in segments.windows(2) {
                assert!(
                    !(pair[0].is_station() && pair[1].is_station()),
                    "seed {} has adjacent stations",
                    seed
                );
            }
        }
    }
}

#[test]
fn test_synthesized_fields_stay_in_bands() {
    let config = GeneratorConfig::default();
    for seed in 0..100 {
        let route = config.synthesize(seed, 8).expect("route");
        assert!(config.end_speed_limit.contains(&route.route_end_speed_limit()));

        for segment in route.segments() {
            match *segment {
                Segment::Common { length } => assert!(config.common_length.contains(&length)),
                Segment::Force {
                    length,
                    applied_force,
                } => {
                    assert!(config.force_length.contains(&length));
                    assert!(config.applied_force.contains(&applied_force));
                }
                Segment::Station { max_arriving_speed } => {
                    assert!(config.max_arriving_speed.contains(&max_arriving_speed))
                }
            }
        }
    }
}

#[test]
fn test_synthesize_zero_segments_fails() {
    assert_eq!(synthesize(3, 0), Err(RouteError::Empty));
}

#[test]
fn test_synthesized_routes_use_every_kind() {
    let mut seen = Vec::new();
    for seed in 0..50 {
        for segment in synthesize(seed, 10).expect("route").segments() {
            if !seen.contains(&segment.kind()) {
                seen.push(segment.kind());
            }
        }
    }
    assert_eq!(seen.len(), 3);
}

#[test]
fn test_route_rejects_leading_station() {
    let station = Segment::Station {
        max_arriving_speed: 5.0,
    };
    assert_eq!(
        Route::new(vec![station, Segment::Common { length: 10.0 }], 10.0),
        Err(RouteError::LeadingStation)
    );
    assert_eq!(
        Route::new(vec![station], 10.0),
        Err(RouteError::LeadingStation)
    );
}

#[test]
fn test_generator_rejects_bad_bands() {
    let empty = GeneratorConfig {
        common_length: 5.0..5.0,
        ..GeneratorConfig::default()
    };
    assert_eq!(
        empty.synthesize(1, 4),
        Err(RouteError::InvalidBand {
            name: "common_length",
            start: 5.0,
            end: 5.0
        })
    );

    let reversed = GeneratorConfig {
        applied_force: 100.0..-100.0,
        ..GeneratorConfig::default()
    };
    assert!(matches!(
        reversed.synthesize(1, 4),
        Err(RouteError::InvalidBand {
            name: "applied_force",
            ..
        })
    ));

    let unbounded = GeneratorConfig {
        end_speed_limit: 0.0..f64::INFINITY,
        ..GeneratorConfig::default()
    };
    assert!(unbounded.check_bands().is_err());
    assert!(GeneratorConfig::default().check_bands().is_ok());
}
