#![warn(clippy::pedantic)]
#![allow(
    clippy::missing_errors_doc,
    clippy::missing_panics_doc,
    clippy::module_name_repetitions
)]

mod error;
mod kmp;
mod needle;
mod parsing;
mod z;

pub use error::{
    Error,
    Reason,
};
pub use kmp::{
    kmp_match,
    prefix_function,
};
pub use needle::{
    DynamicNeedle,
    Match,
    Needle,
    StaticNeedle,
};
#[doc(hidden)]
pub use parsing::hex_pattern;
pub use z::{
    z_function,
    z_match,
};

#[doc(hidden)]
pub trait Sealed {}
