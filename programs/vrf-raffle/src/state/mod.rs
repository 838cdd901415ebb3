pub use raffle::*;
pub use vault::*;
pub use vrf::*;

pub mod raffle;
pub mod vault;
pub mod vrf;
