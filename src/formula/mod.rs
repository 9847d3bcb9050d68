//! Formula module: the immutable expression unit produced by the search

mod core;

pub use core::Formula;
