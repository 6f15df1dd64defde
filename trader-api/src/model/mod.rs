pub mod broker;
pub mod order;
pub mod raw_signal;
pub mod signal;

pub use broker::*;
pub use order::*;
pub use raw_signal::*;
pub use signal::*;
