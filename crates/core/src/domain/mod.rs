pub mod dates;
pub mod order;
