mod class;
mod constant;
mod field;
mod method;
mod spec;

pub use class::Class;
pub use constant::Constant;
pub use field::{Field, FieldList};
pub use method::Method;
pub use spec::{Spec, Version};
