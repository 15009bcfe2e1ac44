mod async_engine;
mod input;
#[cfg(test)]
mod tests;

pub use async_engine::AsyncEngine;
pub use input::InputRecord;
