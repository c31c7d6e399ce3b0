//! Guarded access to an engine's shared fault flag.

use std::sync::{Mutex, PoisonError};

use coo_engine::{EngineFault, EphemerisEngine};
use tracing::{debug, warn};

/// Run one engine call, then check and clear the fault flag.
///
/// A fault left pending by an earlier caller is cleared first, so it can
/// neither fail this call nor be reported as this call's failure. After
/// return the flag is always clear.
pub fn try_compute<E, T>(
    engine: &mut E,
    operation: &'static str,
    call: impl FnOnce(&mut E) -> Result<T, EngineFault>,
) -> Result<T, EngineFault>
where
    E: EphemerisEngine + ?Sized,
{
    if engine.failed() {
        warn!(
            operation,
            stale = ?engine.last_fault(),
            "clearing fault left pending by an earlier call"
        );
        engine.reset();
    }

    debug!(operation, "engine call");
    let out = call(engine);
    let flagged = engine.failed().then(|| engine.last_fault().cloned());

    match (out, flagged) {
        (Ok(value), None) => Ok(value),
        (Err(fault), _) => {
            warn!(operation, %fault, "engine fault reset");
            engine.reset();
            Err(fault)
        }
        (Ok(_), Some(fault)) => {
            // Raised the flag but still returned a value: the value is not
            // trustworthy.
            let fault = fault.unwrap_or(EngineFault::PendingFault("SPICE(UNKNOWN)"));
            warn!(operation, %fault, "engine fault reset");
            engine.reset();
            Err(fault)
        }
    }
}

/// An engine behind a single lock.
///
/// Each core operation makes several engine calls whose fault checks must
/// not interleave with another thread's, so callers hold the lock for a
/// whole operation via [`SharedEngine::with`].
#[derive(Debug, Default)]
pub struct SharedEngine<E> {
    inner: Mutex<E>,
}

impl<E: EphemerisEngine> SharedEngine<E> {
    pub fn new(engine: E) -> Self {
        Self {
            inner: Mutex::new(engine),
        }
    }

    /// Run `f` with exclusive access to the engine.
    ///
    /// A panic in an earlier holder does not lock the engine out; any fault
    /// it left behind is cleared by the next [`try_compute`].
    pub fn with<T>(&self, f: impl FnOnce(&mut E) -> T) -> T {
        let mut guard = self.inner.lock().unwrap_or_else(PoisonError::into_inner);
        f(&mut guard)
    }

    pub fn into_inner(self) -> E {
        self.inner.into_inner().unwrap_or_else(PoisonError::into_inner)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use coo_engine::Engine;

    #[test]
    fn failure_is_reported_once_and_cleared() {
        let mut engine = Engine::default();
        let err = try_compute(&mut engine, "lookup_radii", |e| e.lookup_radii("nowhere"));
        assert!(matches!(err, Err(EngineFault::IdCodeNotFound(_))));
        assert!(!engine.failed());

        let err = try_compute(&mut engine, "lookup_radii", |e| e.lookup_radii("nowhere"));
        assert!(matches!(err, Err(EngineFault::IdCodeNotFound(_))));
    }

    #[test]
    fn stale_fault_is_cleared_before_the_call() {
        let mut engine = Engine::default();
        let _ = engine.lookup_radii("nowhere");
        assert!(engine.failed());
        let ok = try_compute(&mut engine, "resolve_epoch", |e| {
            e.resolve_epoch("2000-01-01 12:00 TDB")
        });
        assert_eq!(ok, Ok(0.0));
    }

    #[test]
    fn shared_engine_serializes_access() {
        let shared = std::sync::Arc::new(SharedEngine::new(Engine::default()));
        let handles: Vec<_> = (0..4)
            .map(|i| {
                let shared = std::sync::Arc::clone(&shared);
                std::thread::spawn(move || {
                    shared.with(|e| {
                        let r = try_compute(e, "lookup_radii", |e| e.lookup_radii("nowhere"));
                        assert!(r.is_err(), "thread {i}");
                        assert!(!e.failed());
                    })
                })
            })
            .collect();
        for h in handles {
            h.join().unwrap();
        }
    }
}
