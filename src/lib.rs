//! Aircraft infrared signature and passive detection-range calculator.
//!
//! The physics lives in the `irsig_*` member crates; this crate re-exports them
//! under short names so the CLI and the plot renderer share one library.

pub mod scenario;

pub use irsig_atmosphere as atmosphere;
pub use irsig_config as config;
pub use irsig_core as primitives;
pub use irsig_detection as detection;
pub use irsig_export as export;
pub use irsig_geometry as geometry;
pub use irsig_params as params;
pub use irsig_signature as signature;
pub use irsig_spectral as spectral;

/// Returns the version of the library for smoke tests.
pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
