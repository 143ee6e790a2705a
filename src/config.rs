use lazy_static::lazy_static;
use log::warn;
use std::env;

const PAR_THRESHOLD_VAR: &str = "DENSEMAT_PAR_THRESHOLD";
const THREADS_VAR: &str = "DENSEMAT_THREADS";

/// Multiply-accumulate count at which `dot` switches to parallel rows.
pub const DEFAULT_PAR_THRESHOLD: usize = 1 << 18;

lazy_static! {
    static ref GLOBAL_CONFIG: KernelConfig = KernelConfig::from_env();
}

/// Tuning knobs for the matrix product.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KernelConfig {
    /// Work (`rows * cols * inner`) below which `dot` stays serial.
    pub parallel_threshold: usize,
    /// Number of row bands the output is split into.
    pub num_threads: usize,
}

impl Default for KernelConfig {
    fn default() -> Self {
        Self {
            parallel_threshold: DEFAULT_PAR_THRESHOLD,
            num_threads: num_cpus::get(),
        }
    }
}

impl KernelConfig {
    /// Defaults overridden by `DENSEMAT_PAR_THRESHOLD` and `DENSEMAT_THREADS`.
    pub fn from_env() -> Self {
        let mut c = Self::default();
        if let Some(v) = read_var(PAR_THRESHOLD_VAR) {
            c.parallel_threshold = v;
        }
        if let Some(v) = read_var(THREADS_VAR) {
            c.num_threads = v.max(1);
        }
        c
    }

    /// Process-wide configuration, read from the environment once.
    pub fn global() -> &'static KernelConfig {
        &GLOBAL_CONFIG
    }

    pub(crate) fn use_parallel(&self, work: usize) -> bool {
        self.num_threads > 1 && work >= self.parallel_threshold
    }

    /// Output rows handled by one parallel task.
    pub(crate) fn band_rows(&self, rows: usize) -> usize {
        let threads = self.num_threads.max(1);
        ((rows + threads - 1) / threads).max(1)
    }
}

fn read_var(name: &str) -> Option<usize> {
    let raw = env::var(name).ok()?;
    match raw.trim().parse::<usize>() {
        Ok(v) => Some(v),
        Err(_) => {
            warn!("ignoring {}={:?}: not an unsigned integer", name, raw);
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default() {
        let c = KernelConfig::default();
        assert_eq!(c.parallel_threshold, DEFAULT_PAR_THRESHOLD);
        assert!(c.num_threads >= 1);
    }

    #[test]
    fn test_use_parallel() {
        let c = KernelConfig {
            parallel_threshold: 100,
            num_threads: 4,
        };
        assert!(!c.use_parallel(99));
        assert!(c.use_parallel(100));
        let single = KernelConfig {
            parallel_threshold: 0,
            num_threads: 1,
        };
        assert!(!single.use_parallel(usize::MAX));
    }

    #[test]
    fn test_band_rows() {
        let c = KernelConfig {
            parallel_threshold: 0,
            num_threads: 4,
        };
        assert_eq!(c.band_rows(10), 3);
        assert_eq!(c.band_rows(4), 1);
        assert_eq!(c.band_rows(1), 1);
        assert_eq!(c.band_rows(0), 1);
    }

    #[test]
    fn test_global_is_stable() {
        let a = KernelConfig::global() as *const KernelConfig;
        let b = KernelConfig::global() as *const KernelConfig;
        assert_eq!(a, b);
        assert!(KernelConfig::global().num_threads >= 1);
    }
}
