pub mod data;
pub mod error;
pub mod math;
pub mod signal;
pub mod utils;

pub use data::*;
pub use error::*;
pub use math::*;
pub use signal::*;
pub use utils::*;
