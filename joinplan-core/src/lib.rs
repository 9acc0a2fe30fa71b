#![allow(clippy::new_without_default)]

pub mod codec;
pub mod descriptor;
pub mod error;
pub mod join;
pub mod memo;
pub mod rel_ref;
