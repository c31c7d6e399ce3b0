//! Leap-second data from the `DELTET/*` pool variables.

use coo_time::{LeapSecondKernel, LskData};

use crate::error::KernelError;
use crate::pool::KernelPool;

/// True when the pool holds a leap-second table.
pub fn has_leap_seconds(pool: &KernelPool) -> bool {
    pool.contains("DELTET/DELTA_AT")
}

/// Build leap-second data from the pool.
pub fn lsk_from_pool(pool: &KernelPool) -> Result<LeapSecondKernel, KernelError> {
    let delta_t_a = pool.scalar("DELTET/DELTA_T_A")?;
    let k = pool.scalar("DELTET/K")?;
    let eb = pool.scalar("DELTET/EB")?;

    let m = pool.require_numbers("DELTET/M")?;
    if m.len() < 2 {
        return Err(KernelError::BadVariable {
            name: "DELTET/M".into(),
            reason: "needs 2 values".into(),
        });
    }

    let flat = pool.require_numbers("DELTET/DELTA_AT")?;
    if !flat.len().is_multiple_of(2) {
        return Err(KernelError::BadVariable {
            name: "DELTET/DELTA_AT".into(),
            reason: "must have an even number of values".into(),
        });
    }
    let table = flat.chunks(2).map(|pair| (pair[0], pair[1])).collect();

    let data = LskData::new(delta_t_a, k, eb, [m[0], m[1]], table)?;
    Ok(LeapSecondKernel::new(data))
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE_LSK: &str = r#"
\begintext
Some comments here.
\begindata

DELTET/DELTA_T_A       =   32.184
DELTET/K               =    1.657D-3
DELTET/EB              =    1.671D-2
DELTET/M               = (  6.239996   1.99096871D-7  )

DELTET/DELTA_AT        = ( 10,   @1972-JAN-1
                           11,   @1972-JUL-1
                           37,   @2017-JAN-1  )

\begintext
"#;

    fn pool(text: &str) -> KernelPool {
        let mut p = KernelPool::new();
        p.load_str(text).unwrap();
        p
    }

    #[test]
    fn parse_sample_lsk() {
        let p = pool(SAMPLE_LSK);
        assert!(has_leap_seconds(&p));
        let lsk = lsk_from_pool(&p).expect("should build");
        let data = lsk.data();
        assert!((data.delta_t_a - 32.184).abs() < 1e-10);
        assert!((data.k - 1.657e-3).abs() < 1e-15);
        assert!((data.m1 - 1.99096871e-7).abs() < 1e-20);
        assert_eq!(data.leap_seconds.len(), 3);
        assert_eq!(data.leap_seconds[2].0, 37.0);
    }

    #[test]
    fn leap_epochs_are_calendar_seconds() {
        let lsk = lsk_from_pool(&pool(SAMPLE_LSK)).unwrap();
        let expected = (2_457_754.5 - 2_451_545.0) * 86_400.0;
        assert!((lsk.data().leap_seconds[2].1 - expected).abs() < 1e-6);
    }

    #[test]
    fn odd_table_is_rejected() {
        let text = SAMPLE_LSK.replace("37,   @2017-JAN-1", "37");
        assert!(matches!(
            lsk_from_pool(&pool(&text)),
            Err(KernelError::BadVariable { .. })
        ));
    }

    #[test]
    fn missing_constants() {
        let p = pool("\\begindata\nDELTET/DELTA_AT = ( 10 @1972-JAN-1 )\n");
        assert!(matches!(
            lsk_from_pool(&p),
            Err(KernelError::MissingVariable(_))
        ));
    }
}
