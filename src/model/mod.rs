mod manifest;
mod part;

pub use manifest::*;
pub use part::*;
