mod common_bits_remover;
mod coordinate_precision_reducer;
mod simple_minimum_clearance;

pub use common_bits_remover::CommonBitsRemover;
pub use coordinate_precision_reducer::CoordinatePrecisionReducer;
pub use simple_minimum_clearance::SimpleMinimumClearance;
