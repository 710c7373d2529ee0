#[macro_use]
mod enum_value;
mod crd;
mod int_or_string;
mod metadata;
mod spec;
pub mod core;

pub use self::crd::*;
pub use self::enum_value::EnumValue;
pub use self::int_or_string::IntOrString;
pub use self::metadata::*;
pub use self::spec::Spec;
