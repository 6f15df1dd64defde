pub mod broker;

pub use broker::*;
