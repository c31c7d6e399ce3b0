//! End-to-end transforms over the sample kernels in `kernels/data`.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use coo_core::{
    CooError, ErrorKind, RelStateRequest, SharedEngine, TransformConfig, get_frame_transform,
    get_rel_state, lat_lon_alt_to_xyz, lookup_shape, resolve_epoch, xyz_to_lat_lon_alt,
    xyz_to_lat_lon_rad,
};
use coo_engine::{Aberration, Engine, EngineConfig, EphemerisEngine};

const WHEN: &str = "2026-12-03 08:15:00.00";

fn data_path(name: &str) -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("../../kernels/data")
        .join(name)
}

fn load_engine() -> Option<Engine> {
    let paths: Vec<PathBuf> = ["naif_sample.tls", "pck_sample.tpc", "ephemeris_sample.json"]
        .iter()
        .map(|n| data_path(n))
        .collect();
    if let Some(missing) = paths.iter().find(|p| !p.exists()) {
        eprintln!("Skipping: kernel not found at {}", missing.display());
        return None;
    }
    Some(Engine::new(EngineConfig::new(paths)).expect("sample kernels should load"))
}

fn request<'a>(target: &'a str, support: &'a str, frame: &'a str) -> RelStateRequest<'a> {
    RelStateRequest {
        target,
        support,
        observer: "EARTH",
        observer_time: WHEN,
        output_frame: frame,
    }
}

#[test]
fn utc_timestamp_resolves_with_leap_seconds() {
    let Some(mut engine) = load_engine() else {
        return;
    };
    let epoch = resolve_epoch(&mut engine, WHEN).unwrap();
    // 2026-12-03 is just under 27 years past J2000.
    let years = epoch.as_tdb_seconds() / (365.25 * 86_400.0);
    assert!((years - 26.92).abs() < 0.01, "{years}");
}

#[test]
fn real_radii_round_trip() {
    let Some(mut engine) = load_engine() else {
        return;
    };
    for planet in ["MARS", "EARTH", "MOON", "JUPITER"] {
        let shape = lookup_shape(&mut engine, planet).unwrap();
        let r_m = shape.equatorial_radius_km * 1000.0;
        let p = [0.3 * r_m, -0.8 * r_m, 0.6 * r_m];
        let lla = xyz_to_lat_lon_alt(&mut engine, planet, p[0], p[1], p[2]).unwrap();
        assert!((0.0..360.0).contains(&lla.lon_deg));
        let back = lat_lon_alt_to_xyz(&mut engine, planet, lla.lat_deg, lla.lon_deg, lla.alt_m)
            .unwrap();
        for i in 0..3 {
            assert!((back[i] - p[i]).abs() <= 1e-6 * r_m, "{planet}: {back:?} vs {p:?}");
        }
    }
}

#[test]
fn real_radii_reverse_round_trip() {
    let Some(mut engine) = load_engine() else {
        return;
    };
    for (planet, lon) in [("MARS", 359.95), ("EARTH", 359.95), ("JUPITER", 0.05)] {
        let (lat, alt) = (-27.5, -1_250.0);
        let xyz = lat_lon_alt_to_xyz(&mut engine, planet, lat, lon, alt).unwrap();
        let back = xyz_to_lat_lon_alt(&mut engine, planet, xyz[0], xyz[1], xyz[2]).unwrap();
        assert!((back.lat_deg - lat).abs() < 1e-9, "{planet}: {back:?}");
        assert!((back.lon_deg - lon).abs() < 1e-9, "{planet}: {back:?}");
        assert!((back.alt_m - alt).abs() < 1e-5, "{planet}: {back:?}");
    }
}

#[test]
fn jupiter_kernel_declares_west_longitudes() {
    let Some(mut engine) = load_engine() else {
        return;
    };
    let east = xyz_to_lat_lon_alt(&mut engine, "JUPITER", 0.0, 8.0e7, 0.0).unwrap();
    assert!((east.lon_deg - 270.0).abs() < 1e-9);
    let earth = xyz_to_lat_lon_alt(&mut engine, "EARTH", 0.0, 8.0e6, 0.0).unwrap();
    assert!((earth.lon_deg - 90.0).abs() < 1e-9);
}

#[test]
fn two_radius_body_is_rejected() {
    let Some(mut engine) = load_engine() else {
        return;
    };
    let err = xyz_to_lat_lon_alt(&mut engine, "broken_rock", 1.0, 2.0, 3.0).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::UnknownBody);
    assert!(!engine.failed());
}

#[test]
fn sphere_decomposition_ignores_kernels() {
    let Some(mut engine) = load_engine() else {
        return;
    };
    let r = xyz_to_lat_lon_rad(&mut engine, 0.0, 0.0, -2.0e6).unwrap();
    assert!((r.lat_deg + 90.0).abs() < 1e-12);
    assert!((r.radius_m - 2.0e6).abs() < 1e-6);
}

#[test]
fn rel_state_bases_are_orthonormal() {
    let Some(mut engine) = load_engine() else {
        return;
    };
    let lt = TransformConfig {
        aberration: Aberration::LightTime,
        ..TransformConfig::default()
    };
    for (target, support, frame, config) in [
        ("MARS", "SUN", "J2000", TransformConfig::default()),
        ("MOON", "SUN", "ECLIPJ2000", TransformConfig::default()),
        ("MARS", "MOON", "IAU_EARTH", TransformConfig::default()),
        ("SUN", "MARS", "J2000", lt),
    ] {
        let state = get_rel_state(&mut engine, &request(target, support, frame), &config)
            .unwrap_or_else(|e| panic!("{target}/{support}/{frame}: {e}"));
        let m = state.rotation;
        assert!(m.is_rotation(1e-9), "{target}/{support}/{frame}");
        assert!(state.position_m.iter().all(|c| c.is_finite()));
    }
}

#[test]
fn failures_leave_the_engine_usable() {
    let Some(mut engine) = load_engine() else {
        return;
    };
    let err = get_rel_state(
        &mut engine,
        &request("PHOBOS", "SUN", "J2000"),
        &TransformConfig::default(),
    )
    .unwrap_err();
    assert!(matches!(err, CooError::EngineComputation { .. }));

    let err = get_frame_transform(&mut engine, "J2000", "IAU_NOWHERE", WHEN).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::EngineComputation);

    let m = get_frame_transform(&mut engine, "J2000", "IAU_MARS", WHEN).unwrap();
    assert!(m.is_rotation(1e-12));
}

#[test]
fn shared_engine_across_threads() {
    let Some(engine) = load_engine() else {
        return;
    };
    let shared = Arc::new(SharedEngine::new(engine));
    let handles: Vec<_> = (0..4)
        .map(|i| {
            let shared = Arc::clone(&shared);
            std::thread::spawn(move || {
                for _ in 0..10 {
                    shared.with(|e| {
                        if i % 2 == 0 {
                            assert!(xyz_to_lat_lon_rad(e, 0.0, 0.0, 0.0).is_err());
                        } else {
                            assert!(xyz_to_lat_lon_alt(e, "MARS", 3.5e6, 0.0, 0.0).is_ok());
                        }
                        assert!(!e.failed());
                    });
                }
            })
        })
        .collect();
    for h in handles {
        h.join().unwrap();
    }
}
