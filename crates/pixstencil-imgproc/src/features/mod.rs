mod harris;
pub use harris::*;
