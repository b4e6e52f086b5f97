mod luma;

pub use luma::luma_from_rgba;
