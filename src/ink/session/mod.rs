mod core;
mod pointer;
#[cfg(test)]
mod tests;

pub use self::core::{Gesture, InkSession};
