//! Decoding of JSON-ish credential blocks.

pub mod block;
pub mod literal;

pub use block::{parse_block, strip_code_fence};
pub use literal::{MAX_DEPTH, parse_literal};
