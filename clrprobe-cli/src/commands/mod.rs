pub mod check;
pub mod common;
pub mod scan;
