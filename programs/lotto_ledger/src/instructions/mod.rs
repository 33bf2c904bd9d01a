pub mod admin;
pub mod lifecycle;
pub mod stake;
pub mod views;
pub mod winner;
