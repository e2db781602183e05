use crate::types::ErrorClass;

///
/// Constant
///

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Constant {
    pub name: String,
    pub code: u32,
    pub class: ErrorClass,
}

impl Constant {
    #[must_use]
    pub fn new(name: impl Into<String>, code: u32, class: ErrorClass) -> Self {
        Self {
            name: name.into(),
            code,
            class,
        }
    }
}
