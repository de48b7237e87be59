//! Recognition pipeline: the classifier confidence gate and the
//! scan-to-ledger confirmation session

pub mod gate;
pub mod session;

pub use gate::*;
pub use session::*;
