pub mod groundspeed;
pub mod roll;

pub use groundspeed::{derive_groundspeed, smooth3, smoothed_groundspeed};
pub use roll::{merge_bank_series, CsvRollSource, NoRollData, RollSeries, RollSource};
