mod coefficient;
mod ratio;
mod scale_roll;

pub use coefficient::{find_best_coefficients, Adjust, Coefficients, SearchOutcome, ROUND_HZ};
pub use ratio::{reduce_ratio, Ratio};
pub use scale_roll::{find_scale_roll, ScaleRoll, GAIN_MAX, MAX_SHIFT_32, MAX_SHIFT_64};
