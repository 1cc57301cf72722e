mod layout;
mod sheet;

pub use layout::*;
pub use sheet::*;
