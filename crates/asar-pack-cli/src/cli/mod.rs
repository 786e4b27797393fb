pub mod args;
pub mod pack;
