use criterion::{Criterion, black_box, criterion_group, criterion_main};
use coo_core::{
    RelStateRequest, TransformConfig, get_rel_state, lat_lon_alt_to_xyz, orthonormal_basis,
    xyz_to_lat_lon_alt, xyz_to_lat_lon_rad,
};
use coo_engine::Engine;
use coo_kernel::Segment;

const KERNEL: &str = "\\begindata\n\
    BODY499_RADII = ( 3396.19 3396.19 3376.20 )\n\
    BODY499_PM = ( 176.630 350.89198226 0. )\n";

fn engine() -> Engine {
    let mut e = Engine::default();
    e.load_kernel_str(KERNEL).expect("kernel text should parse");
    for seg in [
        Segment::constant(10, 0, [-1.0687e6, -4.1736e5, -1.5303e5]),
        Segment::constant(3, 0, [-2.7567e7, 1.3276e8, 5.7557e7]),
        Segment::constant(399, 3, [-1.3932e3, 4.1528e3, 1.8012e3]),
        Segment::constant(4, 0, [2.0813e8, -1.8770e6, -6.4697e6]),
        Segment::constant(499, 4, [0.0, 0.0, 0.0]),
    ] {
        e.add_segment(seg).expect("segment should be valid");
    }
    e
}

fn converter_bench(c: &mut Criterion) {
    let mut e = engine();

    let mut group = c.benchmark_group("planetographic");
    group.bench_function("xyz_to_lat_lon_rad", |b| {
        b.iter(|| xyz_to_lat_lon_rad(&mut e, black_box(1.2e6), black_box(-2.5e6), black_box(1.8e6)))
    });
    group.bench_function("xyz_to_lat_lon_alt", |b| {
        b.iter(|| {
            xyz_to_lat_lon_alt(&mut e, "MARS", black_box(1.2e6), black_box(-2.5e6), black_box(1.8e6))
        })
    });
    group.bench_function("lat_lon_alt_to_xyz", |b| {
        b.iter(|| lat_lon_alt_to_xyz(&mut e, "MARS", black_box(18.4), black_box(245.0), black_box(1500.0)))
    });
    group.finish();
}

fn basis_bench(c: &mut Criterion) {
    let mut e = engine();
    let config = TransformConfig::default();
    let request = RelStateRequest {
        target: "MARS",
        support: "SUN",
        observer: "EARTH",
        observer_time: "2026-12-03 08:15:00 TDB",
        output_frame: "J2000",
    };

    let mut group = c.benchmark_group("basis");
    group.bench_function("orthonormal_basis", |b| {
        b.iter(|| {
            orthonormal_basis(
                black_box(&[2.3e8, -1.4e8, -6.2e7]),
                black_box(&[1.0e6, -1.3e8, -5.7e7]),
                1e-10,
            )
        })
    });
    group.bench_function("get_rel_state", |b| {
        b.iter(|| get_rel_state(&mut e, black_box(&request), &config))
    });
    group.finish();
}

criterion_group!(benches, converter_bench, basis_bench);
criterion_main!(benches);
