#![forbid(unsafe_code)]

pub mod card;
pub mod clock;
pub mod list;
