use crate::node::{Field, FieldList, Method};

///
/// Class
///

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Class {
    pub name: String,
    pub id: u16,
    pub properties: FieldList,
    methods: Vec<Method>,
}

impl Class {
    #[must_use]
    pub fn new(id: u16, name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            id,
            properties: FieldList::new(),
            methods: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_property(mut self, field: Field) -> Self {
        self.properties.push(field);
        self
    }

    #[must_use]
    pub fn with_method(mut self, mut method: Method) -> Self {
        method.attach(self.id, &self.name);
        self.methods.push(method);
        self
    }

    #[must_use]
    pub fn methods(&self) -> &[Method] {
        &self.methods
    }
}
