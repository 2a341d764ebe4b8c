pub mod classification;
pub mod network;
pub mod trace;

pub use classification::{Classification, CONFIDENCE_THRESHOLD};
pub use network::Network;
pub use trace::ActivationTrace;
