pub mod calculator;
pub mod next;

pub use calculator::{Convention, SalahProvider, TimeProvider, CONVENTION};
pub use next::{resolve_next, NextPrayer};
