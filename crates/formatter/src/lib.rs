//! Response formatting: shape detection plus HTML rendering. Both are pure free functions; there is no owning type here.

mod html;
mod shape;

pub use html::{escape, render};
pub use shape::{ResponseShape, detect};
