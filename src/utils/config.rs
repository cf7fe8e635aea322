//! Application configuration constants.
//! Concurrency defaults and package-derived names in one place.

use std::sync::OnceLock;

// ---- Package / paths (from CARGO_PKG_NAME, cached) ----

/// Package-derived names: built once from `CARGO_PKG_NAME`, then cached.
pub struct PackagePaths {
    config_filename: String,
}

static PACKAGE_PATHS: OnceLock<PackagePaths> = OnceLock::new();

impl PackagePaths {
    /// Build and cache names from `CARGO_PKG_NAME`. Called once on first use.
    pub fn get() -> &'static PackagePaths {
        PACKAGE_PATHS.get_or_init(|| {
            let pkg = env!("CARGO_PKG_NAME");
            PackagePaths {
                config_filename: format!(".{pkg}.toml"),
            }
        })
    }

    /// Settings file looked up in the working directory (e.g. `.flowkit.toml`).
    pub fn config_filename(&self) -> &str {
        &self.config_filename
    }
}

// ---- Concurrency ----

/// Limits used to pick a default concurrency cap for the CLI.
/// Use [`ConcurrencyLimits::current()`] to fill `all_threads` from rayon; the rest are const.
#[derive(Clone, Copy, Debug)]
pub struct ConcurrencyLimits {
    /// Available threads (from rayon); set by [`ConcurrencyLimits::current()`].
    pub all_threads: usize,
    /// Never run fewer than this many operations at once by default.
    pub floor: usize,
    /// Never run more than this many operations at once by default.
    pub max: usize,
}

impl Default for ConcurrencyLimits {
    fn default() -> Self {
        Self {
            all_threads: 0, // use current() to set from rayon
            floor: Self::FLOOR,
            max: Self::MAX,
        }
    }
}

impl ConcurrencyLimits {
    pub const FLOOR: usize = 2;
    pub const MAX: usize = 64;

    /// Build limits with `all_threads` set from `rayon::current_num_threads()`.
    pub fn current() -> Self {
        Self {
            all_threads: rayon::current_num_threads(),
            ..Self::default()
        }
    }

    /// Default cap: available threads clamped to `floor..=max`.
    pub fn default_limit(&self) -> usize {
        self.all_threads.clamp(self.floor, self.max)
    }
}
