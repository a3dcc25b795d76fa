#![doc = include_str!("../README.md")]
#![no_std]
#![deny(
    unsafe_code,
    unused_imports,
    unused_variables,
    unused_must_use,
    missing_docs,
    clippy::all,
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::dbg_macro,
    clippy::todo,
    clippy::unimplemented
)]

#[cfg_attr(test, macro_use)]
extern crate alloc;

mod node;
pub use node::Color;

mod tree;
pub use tree::RbTree;

mod iter;
pub use iter::InOrder;

/// Multiset over float keys, made totally ordered through
/// [`OrderedFloat`](ordered_float::OrderedFloat).
pub type FloatMultiset<T> = RbTree<ordered_float::OrderedFloat<T>>;
