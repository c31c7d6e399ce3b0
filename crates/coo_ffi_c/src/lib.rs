//! C ABI over `coo_core`.
//!
//! All functions share one process-wide engine. Each returns an `i32`
//! status: `0` on success, a small negative code whose meaning is
//! documented per function on failure, [`COO_ERR_NULL_POINTER`] for a null
//! argument, [`COO_ERR_INVALID_STRING`] for a non-UTF-8 string and
//! [`COO_ERR_PANIC`] if Rust code panicked. Outputs are written only on
//! success.

use std::ffi::{CStr, c_char};
use std::path::{Path, PathBuf};
use std::sync::{Mutex, OnceLock, PoisonError};

use coo_core::{
    CooError, ErrorKind, LogConfig, LoggingGuard, RelStateRequest, SharedEngine, TransformConfig,
};
use coo_engine::Engine;
use tracing::warn;

/// ABI version for downstream bindings.
pub const COO_API_VERSION: u32 = 1;

pub const COO_OK: i32 = 0;
pub const COO_ERR_NULL_POINTER: i32 = -100;
pub const COO_ERR_PANIC: i32 = -101;
pub const COO_ERR_INVALID_STRING: i32 = -102;

static ENGINE: OnceLock<SharedEngine<Engine>> = OnceLock::new();
static LOGGING: Mutex<Option<LoggingGuard>> = Mutex::new(None);

fn engine() -> &'static SharedEngine<Engine> {
    ENGINE.get_or_init(SharedEngine::default)
}

fn transform_config() -> TransformConfig {
    TransformConfig::default()
}

// Per-operation status codes. The planetographic pair is deliberately
// asymmetric.

fn lat_lon_rad_status(_err: &CooError) -> i32 {
    -1
}

fn lat_lon_alt_status(err: &CooError) -> i32 {
    match err.kind() {
        ErrorKind::UnknownBody => -2,
        _ => -1,
    }
}

fn to_xyz_status(err: &CooError) -> i32 {
    match err.kind() {
        ErrorKind::UnknownBody => -1,
        _ => -2,
    }
}

fn rel_state_status(err: &CooError) -> i32 {
    match err.kind() {
        ErrorKind::EpochParse => -1,
        ErrorKind::DegenerateBasis => -3,
        ErrorKind::UnknownBody | ErrorKind::EngineComputation => -2,
    }
}

fn frame_transform_status(err: &CooError) -> i32 {
    match err.kind() {
        ErrorKind::EpochParse => -1,
        _ => -2,
    }
}

fn log_failure(operation: &str, err: &CooError, status: i32) -> i32 {
    warn!(operation, status, %err, "call failed");
    status
}

// ---------------------------------------------------------------------------
// Safe entry points. The extern functions below only check pointers and
// delegate here.
// ---------------------------------------------------------------------------

/// Start logging, replacing any outputs from an earlier call. Fails with
/// `-1` on a bad level, an unwritable file or a foreign global subscriber.
pub fn coo_init_internal(
    console: bool,
    log_file: Option<PathBuf>,
    console_level: i32,
    file_level: i32,
) -> Result<(), i32> {
    let level = |l: i32| u8::try_from(l).map_err(|_| -1);
    let config = LogConfig {
        console,
        file: log_file,
        console_level: level(console_level)?,
        file_level: level(file_level)?,
    };
    let mut slot = LOGGING.lock().unwrap_or_else(PoisonError::into_inner);
    let guard = coo_core::init_logging(&config).map_err(|e| {
        eprintln!("coo_init: {e}");
        -1
    })?;
    *slot = Some(guard);
    Ok(())
}

/// Flush and close the log file and silence both outputs.
pub fn coo_deinit_internal() {
    let guard = LOGGING.lock().unwrap_or_else(PoisonError::into_inner).take();
    drop(guard);
}

/// Load a text kernel or segment file into the shared engine.
pub fn coo_add_kernel_internal(path: &Path) -> Result<(), i32> {
    engine().with(|e| e.load_kernel(path)).map_err(|err| {
        warn!(path = %path.display(), %err, "kernel load failed");
        -1
    })
}

pub fn coo_resolve_epoch_internal(timestamp: &str) -> Result<f64, i32> {
    engine()
        .with(|e| coo_core::resolve_epoch(e, timestamp))
        .map(|epoch| epoch.as_tdb_seconds())
        .map_err(|err| log_failure("resolve_epoch", &err, -1))
}

/// `[lat°, lon°, radius m]`.
pub fn coo_xyz_to_lat_lon_rad_internal(x: f64, y: f64, z: f64) -> Result<[f64; 3], i32> {
    engine()
        .with(|e| coo_core::xyz_to_lat_lon_rad(e, x, y, z))
        .map(|r| [r.lat_deg, r.lon_deg, r.radius_m])
        .map_err(|err| log_failure("xyz_to_lat_lon_rad", &err, lat_lon_rad_status(&err)))
}

/// `[lat°, lon°, alt m]`.
pub fn coo_xyz_to_lat_lon_alt_internal(
    planet: &str,
    x: f64,
    y: f64,
    z: f64,
) -> Result<[f64; 3], i32> {
    engine()
        .with(|e| coo_core::xyz_to_lat_lon_alt(e, planet, x, y, z))
        .map(|p| [p.lat_deg, p.lon_deg, p.alt_m])
        .map_err(|err| log_failure("xyz_to_lat_lon_alt", &err, lat_lon_alt_status(&err)))
}

pub fn coo_lat_lon_alt_to_xyz_internal(
    planet: &str,
    lat_deg: f64,
    lon_deg: f64,
    alt_m: f64,
) -> Result<[f64; 3], i32> {
    engine()
        .with(|e| coo_core::lat_lon_alt_to_xyz(e, planet, lat_deg, lon_deg, alt_m))
        .map_err(|err| log_failure("lat_lon_alt_to_xyz", &err, to_xyz_status(&err)))
}

/// Position in meters and row-major basis.
pub fn coo_get_rel_state_internal(request: &RelStateRequest<'_>) -> Result<([f64; 3], [f64; 9]), i32> {
    let config = transform_config();
    engine()
        .with(|e| coo_core::get_rel_state(e, request, &config))
        .map(|s| (s.position_m, s.rotation.to_row_major()))
        .map_err(|err| log_failure("get_rel_state", &err, rel_state_status(&err)))
}

/// Row-major rotation from `from` to `to`.
pub fn coo_get_position_transformation_matrix_internal(
    from: &str,
    to: &str,
    datetime: &str,
) -> Result<[f64; 9], i32> {
    engine()
        .with(|e| coo_core::get_frame_transform(e, from, to, datetime))
        .map(|m| m.to_row_major())
        .map_err(|err| log_failure("get_frame_transform", &err, frame_transform_status(&err)))
}

// ---------------------------------------------------------------------------
// Exported C functions
// ---------------------------------------------------------------------------

/// Return ABI version of the exported C API.
#[unsafe(no_mangle)]
pub extern "C" fn coo_api_version() -> u32 {
    COO_API_VERSION
}

/// Start logging to stderr and/or a file. Levels are 0 (error) to 4
/// (trace). Calling it again replaces the running outputs.
///
/// Returns `0`, or `-1` if a level is out of range, the file cannot be
/// opened, or another global subscriber is installed.
///
/// # Safety
/// `log_file_utf8` must be null (no file) or a valid NUL-terminated string.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn coo_init(
    console: u8,
    log_file_utf8: *const c_char,
    console_level: i32,
    file_level: i32,
) -> i32 {
    ffi_boundary(|| {
        let log_file = if log_file_utf8.is_null() {
            None
        } else {
            // SAFETY: Pointer is checked for null and borrowed for this call.
            match unsafe { read_str(log_file_utf8) } {
                Ok(s) => Some(PathBuf::from(s)),
                Err(status) => return status,
            }
        };
        status_of(coo_init_internal(
            console != 0,
            log_file,
            console_level,
            file_level,
        ))
    })
}

/// Flush and close the log file opened by [`coo_init`] and stop all log
/// output. Always `0`.
#[unsafe(no_mangle)]
pub extern "C" fn coo_deinit() -> i32 {
    ffi_boundary(|| {
        coo_deinit_internal();
        COO_OK
    })
}

/// Load a NAIF text kernel, or a `.json` segment file, into the shared
/// engine.
///
/// Returns `0`, or `-1` if the file cannot be read or parsed.
///
/// # Safety
/// `path_utf8` must be a valid, non-null, NUL-terminated string.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn coo_add_kernel(path_utf8: *const c_char) -> i32 {
    ffi_boundary(|| {
        // SAFETY: Checked for null inside read_str; borrowed for this call.
        let path = match unsafe { read_str(path_utf8) } {
            Ok(s) => s,
            Err(status) => return status,
        };
        status_of(coo_add_kernel_internal(Path::new(path)))
    })
}

/// Convert a timestamp to TDB seconds past J2000.
///
/// Returns `0`, or `-1` if the timestamp cannot be resolved.
///
/// # Safety
/// `timestamp_utf8` must be a valid NUL-terminated string and `out_et` a
/// valid pointer.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn coo_resolve_epoch(timestamp_utf8: *const c_char, out_et: *mut f64) -> i32 {
    ffi_boundary(|| {
        if out_et.is_null() {
            return COO_ERR_NULL_POINTER;
        }
        // SAFETY: Checked for null inside read_str; borrowed for this call.
        let timestamp = match unsafe { read_str(timestamp_utf8) } {
            Ok(s) => s,
            Err(status) => return status,
        };
        match coo_resolve_epoch_internal(timestamp) {
            Ok(et) => {
                // SAFETY: Pointer is checked for null; write one value.
                unsafe { *out_et = et };
                COO_OK
            }
            Err(status) => status,
        }
    })
}

/// Latitude and longitude in degrees and distance from the origin in
/// meters of the point `(x, y, z)` meters.
///
/// Returns `0`, or `-1` for the origin or non-finite input.
///
/// # Safety
/// The three output pointers must be valid and non-null.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn coo_xyz_to_lat_lon_rad(
    x: f64,
    y: f64,
    z: f64,
    out_lat: *mut f64,
    out_lon: *mut f64,
    out_rad: *mut f64,
) -> i32 {
    ffi_boundary(|| {
        if out_lat.is_null() || out_lon.is_null() || out_rad.is_null() {
            return COO_ERR_NULL_POINTER;
        }
        match coo_xyz_to_lat_lon_rad_internal(x, y, z) {
            Ok(v) => {
                // SAFETY: Pointers are checked for null; one value each.
                unsafe { write3(v, out_lat, out_lon, out_rad) };
                COO_OK
            }
            Err(status) => status,
        }
    })
}

/// Planetographic latitude and longitude in degrees and altitude in
/// meters of `(x, y, z)` meters above `planet`.
///
/// Returns `0`, `-2` if the planet has no usable radii, or `-1` if the
/// decomposition fails.
///
/// # Safety
/// `planet_utf8` must be a valid NUL-terminated string and the output
/// pointers valid and non-null.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn coo_xyz_to_lat_lon_alt(
    planet_utf8: *const c_char,
    x: f64,
    y: f64,
    z: f64,
    out_lat: *mut f64,
    out_lon: *mut f64,
    out_alt: *mut f64,
) -> i32 {
    ffi_boundary(|| {
        if out_lat.is_null() || out_lon.is_null() || out_alt.is_null() {
            return COO_ERR_NULL_POINTER;
        }
        // SAFETY: Checked for null inside read_str; borrowed for this call.
        let planet = match unsafe { read_str(planet_utf8) } {
            Ok(s) => s,
            Err(status) => return status,
        };
        match coo_xyz_to_lat_lon_alt_internal(planet, x, y, z) {
            Ok(v) => {
                // SAFETY: Pointers are checked for null; one value each.
                unsafe { write3(v, out_lat, out_lon, out_alt) };
                COO_OK
            }
            Err(status) => status,
        }
    })
}

/// Cartesian position in meters of a planetographic point on `planet`.
///
/// Returns `0`, `-1` if the planet has no usable radii, or `-2` if the
/// composition fails.
///
/// # Safety
/// `planet_utf8` must be a valid NUL-terminated string and the output
/// pointers valid and non-null.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn coo_lat_lon_alt_to_xyz(
    planet_utf8: *const c_char,
    lat_deg: f64,
    lon_deg: f64,
    alt_m: f64,
    out_x: *mut f64,
    out_y: *mut f64,
    out_z: *mut f64,
) -> i32 {
    ffi_boundary(|| {
        if out_x.is_null() || out_y.is_null() || out_z.is_null() {
            return COO_ERR_NULL_POINTER;
        }
        // SAFETY: Checked for null inside read_str; borrowed for this call.
        let planet = match unsafe { read_str(planet_utf8) } {
            Ok(s) => s,
            Err(status) => return status,
        };
        match coo_lat_lon_alt_to_xyz_internal(planet, lat_deg, lon_deg, alt_m) {
            Ok(v) => {
                // SAFETY: Pointers are checked for null; one value each.
                unsafe { write3(v, out_x, out_y, out_z) };
                COO_OK
            }
            Err(status) => status,
        }
    })
}

/// Position of `target` relative to `observer` in meters, and the
/// row-major basis whose +Z points at the target and whose +Y is normal to
/// the target and `support` directions.
///
/// Returns `0`, `-1` for a bad timestamp, `-2` if a state cannot be
/// computed, or `-3` if the target and support directions are parallel.
///
/// # Safety
/// All string arguments must be valid NUL-terminated strings and both
/// output pointers valid and non-null.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn coo_get_rel_state(
    target_utf8: *const c_char,
    support_utf8: *const c_char,
    observer_utf8: *const c_char,
    observer_time_utf8: *const c_char,
    output_frame_utf8: *const c_char,
    out_position_m: *mut [f64; 3],
    out_rotation: *mut [f64; 9],
) -> i32 {
    ffi_boundary(|| {
        if out_position_m.is_null() || out_rotation.is_null() {
            return COO_ERR_NULL_POINTER;
        }
        // SAFETY: Each pointer is checked for null inside read_str and
        // borrowed for this call.
        let strings = unsafe {
            [
                target_utf8,
                support_utf8,
                observer_utf8,
                observer_time_utf8,
                output_frame_utf8,
            ]
            .map(|p| read_str(p))
        };
        let [target, support, observer, observer_time, output_frame] = match strings {
            [Ok(a), Ok(b), Ok(c), Ok(d), Ok(e)] => [a, b, c, d, e],
            other => {
                return other
                    .into_iter()
                    .find_map(Result::err)
                    .unwrap_or(COO_ERR_INVALID_STRING);
            }
        };

        let request = RelStateRequest {
            target,
            support,
            observer,
            observer_time,
            output_frame,
        };
        match coo_get_rel_state_internal(&request) {
            Ok((position, rotation)) => {
                // SAFETY: Pointers are checked for null; one array each.
                unsafe {
                    *out_position_m = position;
                    *out_rotation = rotation;
                }
                COO_OK
            }
            Err(status) => status,
        }
    })
}

/// Row-major rotation taking `from` vectors into `to` at `datetime`.
///
/// Returns `0`, `-1` for a bad timestamp, or `-2` for an unknown frame or
/// missing orientation data.
///
/// # Safety
/// All string arguments must be valid NUL-terminated strings and `out` a
/// valid pointer.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn coo_get_position_transformation_matrix(
    from_utf8: *const c_char,
    to_utf8: *const c_char,
    datetime_utf8: *const c_char,
    out: *mut [f64; 9],
) -> i32 {
    ffi_boundary(|| {
        if out.is_null() {
            return COO_ERR_NULL_POINTER;
        }
        // SAFETY: Each pointer is checked for null inside read_str and
        // borrowed for this call.
        let (from, to, datetime) =
            match unsafe { (read_str(from_utf8), read_str(to_utf8), read_str(datetime_utf8)) } {
                (Ok(a), Ok(b), Ok(c)) => (a, b, c),
                (Err(s), _, _) | (_, Err(s), _) | (_, _, Err(s)) => return s,
            };
        match coo_get_position_transformation_matrix_internal(from, to, datetime) {
            Ok(m) => {
                // SAFETY: Pointer is checked for null; write one array.
                unsafe { *out = m };
                COO_OK
            }
            Err(status) => status,
        }
    })
}

fn ffi_boundary(f: impl FnOnce() -> i32) -> i32 {
    match std::panic::catch_unwind(std::panic::AssertUnwindSafe(f)) {
        Ok(status) => status,
        Err(_) => COO_ERR_PANIC,
    }
}

fn status_of(result: Result<(), i32>) -> i32 {
    match result {
        Ok(()) => COO_OK,
        Err(status) => status,
    }
}

/// Borrow a NUL-terminated UTF-8 string.
///
/// # Safety
/// `ptr` must be null or point to a NUL-terminated string that outlives
/// `'a`.
unsafe fn read_str<'a>(ptr: *const c_char) -> Result<&'a str, i32> {
    if ptr.is_null() {
        return Err(COO_ERR_NULL_POINTER);
    }
    // SAFETY: Pointer is checked for null; the caller guarantees NUL
    // termination.
    let c_str = unsafe { CStr::from_ptr(ptr) };
    c_str.to_str().map_err(|_| COO_ERR_INVALID_STRING)
}

/// # Safety
/// All three pointers must be valid for one write.
unsafe fn write3(v: [f64; 3], a: *mut f64, b: *mut f64, c: *mut f64) {
    // SAFETY: Guaranteed by the caller.
    unsafe {
        *a = v[0];
        *b = v[1];
        *c = v[2];
    }
}
