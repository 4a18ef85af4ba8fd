pub mod geodesy;
pub mod turn;

pub use geodesy::{
    along_and_cross_track, bearing_degrees, destination_point, distance_feet,
    local_planar_offset, normalize_heading, signed_heading_delta,
};
pub use turn::{bank_from_turn_rate, turn_rate_from_bank, turn_rate_from_radius};
