#![warn(clippy::pedantic)]

pub use kmpz_common::{
    kmp_match,
    prefix_function,
    z_function,
    z_match,
    DynamicNeedle,
    Error,
    Match,
    Needle,
    Reason,
    StaticNeedle,
};
pub use kmpz_macros::needle;
