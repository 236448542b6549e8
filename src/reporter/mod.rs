pub mod banner;
pub mod color;
pub mod console;
pub mod model;
