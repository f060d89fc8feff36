mod advocate;
mod pagination;

pub use advocate::*;
pub use pagination::*;
