pub mod types;
pub mod board;
pub mod movegen;
pub mod attacks;
pub mod mate;
