pub mod historical;

pub use historical::{historical_airdrops, AirdropStats, AIRDROP_STATS};
