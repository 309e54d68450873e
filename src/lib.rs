pub mod compute;
pub mod entities;
pub mod geometry;
pub mod input;
pub mod level;
