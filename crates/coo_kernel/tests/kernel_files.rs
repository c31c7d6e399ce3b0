//! Integration tests reading the sample kernels in `kernels/data`.

use std::path::{Path, PathBuf};

use coo_frames::LongitudeSense;
use coo_kernel::{KernelPool, Segment, body_code, lsk_from_pool, pck};

fn data_path(name: &str) -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("../../kernels/data")
        .join(name)
}

fn load(names: &[&str]) -> Option<KernelPool> {
    let mut pool = KernelPool::new();
    for name in names {
        let path = data_path(name);
        if !path.exists() {
            eprintln!("Skipping: kernel not found at {}", path.display());
            return None;
        }
        pool.load(&path).expect("sample kernel should load");
    }
    Some(pool)
}

#[test]
fn sample_pck_constants() {
    let Some(pool) = load(&["pck_sample.tpc"]) else {
        return;
    };
    assert_eq!(pck::radii(&pool, 499).unwrap(), &[3396.19, 3396.19, 3376.20]);
    assert_eq!(pck::longitude_sense(&pool, 499).unwrap(), LongitudeSense::West);
    assert_eq!(pck::longitude_sense(&pool, 299).unwrap(), LongitudeSense::East);
    assert_eq!(pck::longitude_sense(&pool, 599).unwrap(), LongitudeSense::West);
    assert!(pck::pole_model(&pool, 301).is_ok());
    assert_eq!(pool.loaded_files().len(), 1);
}

#[test]
fn sample_pck_declares_a_named_body() {
    let Some(pool) = load(&["pck_sample.tpc"]) else {
        return;
    };
    assert_eq!(body_code(&pool, "broken_rock"), Some(-1001));
    assert_eq!(pck::radii(&pool, -1001).unwrap().len(), 2);
}

#[test]
fn sample_lsk_has_28_leap_seconds() {
    let Some(pool) = load(&["naif_sample.tls"]) else {
        return;
    };
    let lsk = lsk_from_pool(&pool).unwrap();
    let table = &lsk.data().leap_seconds;
    assert_eq!(table.len(), 28);
    assert_eq!(table.first().unwrap().0, 10.0);
    assert_eq!(table.last().unwrap().0, 37.0);
}

#[test]
fn utc_tdb_offset_in_2026() {
    let Some(pool) = load(&["naif_sample.tls"]) else {
        return;
    };
    let lsk = lsk_from_pool(&pool).unwrap();
    let utc = coo_time::CalendarTime::new(2026, 12, 3, 8, 15, 0.0).to_seconds_past_j2000();
    let offset = lsk.utc_to_tdb(utc) - utc;
    // 37 s leap seconds + 32.184 s, with the periodic term below 2 ms.
    assert!((offset - 69.184).abs() < 2e-3, "offset {offset}");
}

#[test]
fn sample_segments_parse_and_validate() {
    let path = data_path("ephemeris_sample.json");
    if !path.exists() {
        eprintln!("Skipping: segments not found at {}", path.display());
        return;
    }
    let text = std::fs::read_to_string(path).unwrap();
    let segments: Vec<Segment> = serde_json::from_str(&text).unwrap();
    assert!(segments.len() >= 6);
    for seg in &segments {
        seg.validate().unwrap();
    }
}
