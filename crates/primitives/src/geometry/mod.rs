mod rect;
mod size;
mod thickness;

pub use rect::Rect;
pub use size::Size;
pub use thickness::Thickness;

#[cfg(test)]
mod tests;
