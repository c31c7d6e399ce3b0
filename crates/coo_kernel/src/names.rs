//! NAIF body names and ID codes.
//!
//! Names are matched case-insensitively with internal whitespace
//! collapsed. Kernel-pool `NAIF_BODY_NAME` / `NAIF_BODY_CODE` pairs take
//! precedence over the built-in table, the last matching pair winning.
//! A name that is itself an integer is taken as the ID code.

use std::collections::HashMap;

use once_cell::sync::Lazy;

use crate::pool::KernelPool;

pub const SOLAR_SYSTEM_BARYCENTER: i32 = 0;
pub const SUN: i32 = 10;
pub const MOON: i32 = 301;
pub const EARTH: i32 = 399;
pub const MARS: i32 = 499;

/// Built-in `(code, name)` pairs. The first name listed for a code is its
/// canonical name.
const BUILTIN_BODIES: &[(i32, &str)] = &[
    (0, "SOLAR SYSTEM BARYCENTER"),
    (0, "SSB"),
    (1, "MERCURY BARYCENTER"),
    (2, "VENUS BARYCENTER"),
    (3, "EARTH BARYCENTER"),
    (3, "EMB"),
    (3, "EARTH MOON BARYCENTER"),
    (3, "EARTH-MOON BARYCENTER"),
    (4, "MARS BARYCENTER"),
    (5, "JUPITER BARYCENTER"),
    (6, "SATURN BARYCENTER"),
    (7, "URANUS BARYCENTER"),
    (8, "NEPTUNE BARYCENTER"),
    (9, "PLUTO BARYCENTER"),
    (10, "SUN"),
    (199, "MERCURY"),
    (299, "VENUS"),
    (301, "MOON"),
    (399, "EARTH"),
    (401, "PHOBOS"),
    (402, "DEIMOS"),
    (499, "MARS"),
    (501, "IO"),
    (502, "EUROPA"),
    (503, "GANYMEDE"),
    (504, "CALLISTO"),
    (599, "JUPITER"),
    (601, "MIMAS"),
    (602, "ENCELADUS"),
    (606, "TITAN"),
    (699, "SATURN"),
    (799, "URANUS"),
    (801, "TRITON"),
    (899, "NEPTUNE"),
    (901, "CHARON"),
    (999, "PLUTO"),
];

static CODES_BY_NAME: Lazy<HashMap<&'static str, i32>> = Lazy::new(|| {
    BUILTIN_BODIES.iter().map(|&(code, name)| (name, code)).collect()
});

static NAMES_BY_CODE: Lazy<HashMap<i32, &'static str>> = Lazy::new(|| {
    let mut m = HashMap::new();
    for &(code, name) in BUILTIN_BODIES {
        m.entry(code).or_insert(name);
    }
    m
});

/// Upper-case a name and collapse runs of whitespace.
pub fn normalize_name(name: &str) -> String {
    name.split_whitespace()
        .map(str::to_ascii_uppercase)
        .collect::<Vec<_>>()
        .join(" ")
}

/// Built-in code for a body name.
pub fn builtin_code(name: &str) -> Option<i32> {
    CODES_BY_NAME.get(normalize_name(name).as_str()).copied()
}

/// Built-in canonical name for a body code.
pub fn builtin_name(code: i32) -> Option<&'static str> {
    NAMES_BY_CODE.get(&code).copied()
}

/// Resolve a body name or integer string to its ID code.
pub fn body_code(pool: &KernelPool, name: &str) -> Option<i32> {
    let wanted = normalize_name(name);
    if wanted.is_empty() {
        return None;
    }
    if let Some(code) = pool_code(pool, &wanted) {
        return Some(code);
    }
    if let Some(code) = CODES_BY_NAME.get(wanted.as_str()) {
        return Some(*code);
    }
    wanted.parse().ok()
}

/// Canonical name for a body code.
pub fn body_name(pool: &KernelPool, code: i32) -> Option<String> {
    if let (Some(names), Some(codes)) = (
        pool.strings("NAIF_BODY_NAME"),
        pool.numbers("NAIF_BODY_CODE"),
    ) && let Some((name, _)) = names
        .iter()
        .zip(codes)
        .rev()
        .find(|(_, c)| **c == code as f64)
    {
        return Some(normalize_name(name));
    }
    builtin_name(code).map(str::to_string)
}

fn pool_code(pool: &KernelPool, wanted: &str) -> Option<i32> {
    let names = pool.strings("NAIF_BODY_NAME")?;
    let codes = pool.numbers("NAIF_BODY_CODE")?;
    names
        .iter()
        .zip(codes)
        .rev()
        .find(|(n, _)| normalize_name(n) == wanted)
        .map(|(_, c)| *c as i32)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_lookup_is_case_insensitive() {
        assert_eq!(builtin_code("mars"), Some(499));
        assert_eq!(builtin_code("  Earth   Barycenter "), Some(3));
        assert_eq!(builtin_code("not_a_planet"), None);
    }

    #[test]
    fn canonical_names() {
        assert_eq!(builtin_name(0), Some("SOLAR SYSTEM BARYCENTER"));
        assert_eq!(builtin_name(3), Some("EARTH BARYCENTER"));
        assert_eq!(builtin_name(12345), None);
    }

    #[test]
    fn integer_names_are_codes() {
        let pool = KernelPool::new();
        assert_eq!(body_code(&pool, "499"), Some(499));
        assert_eq!(body_code(&pool, "-82"), Some(-82));
        assert_eq!(body_code(&pool, ""), None);
    }

    #[test]
    fn pool_names_take_precedence() {
        let mut pool = KernelPool::new();
        pool.load_str(
            "\\begindata\n\
             NAIF_BODY_NAME = ( 'ROVER', 'mars' )\n\
             NAIF_BODY_CODE = ( -1000, -1001 )\n\
             NAIF_BODY_NAME += 'Rover'\n\
             NAIF_BODY_CODE += -1002\n",
        )
        .unwrap();
        assert_eq!(body_code(&pool, "rover"), Some(-1002));
        assert_eq!(body_code(&pool, "MARS"), Some(-1001));
        assert_eq!(body_name(&pool, -1000).as_deref(), Some("ROVER"));
        assert_eq!(body_name(&pool, 399).as_deref(), Some("EARTH"));
    }
}
