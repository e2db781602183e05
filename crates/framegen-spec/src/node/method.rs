use crate::node::{Field, FieldList};

///
/// Method
///
/// Owned by its class; `class_id` and `class_name` are copies of the owner's
/// identity, filled in when the method is attached.
///

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Method {
    pub name: String,
    pub id: u16,
    pub arguments: FieldList,
    pub has_content: bool,
    pub synchronous: bool,
    class_id: u16,
    class_name: String,
}

impl Method {
    #[must_use]
    pub fn new(id: u16, name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            id,
            arguments: FieldList::new(),
            has_content: false,
            synchronous: false,
            class_id: 0,
            class_name: String::new(),
        }
    }

    #[must_use]
    pub fn with_argument(mut self, field: Field) -> Self {
        self.arguments.push(field);
        self
    }

    #[must_use]
    pub const fn with_content(mut self, has_content: bool) -> Self {
        self.has_content = has_content;
        self
    }

    #[must_use]
    pub const fn with_synchronous(mut self, synchronous: bool) -> Self {
        self.synchronous = synchronous;
        self
    }

    #[must_use]
    pub const fn class_id(&self) -> u16 {
        self.class_id
    }

    #[must_use]
    pub fn class_name(&self) -> &str {
        &self.class_name
    }

    /// `class.method`, the name peers and diagnostics use.
    #[must_use]
    pub fn qualified_name(&self) -> String {
        format!("{}.{}", self.class_name, self.name)
    }

    pub(crate) fn attach(&mut self, class_id: u16, class_name: &str) {
        self.class_id = class_id;
        self.class_name = class_name.to_string();
    }
}
