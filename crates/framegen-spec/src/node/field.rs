use crate::types::DefaultValue;

///
/// Field
///
/// One argument or property. The position index is assigned when the field
/// is pushed onto a [`FieldList`] and is the only key that ties a decoded wire
/// value back to its field.
///

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Field {
    pub name: String,
    pub domain: String,
    pub default: Option<DefaultValue>,
    index: usize,
}

impl Field {
    #[must_use]
    pub fn new(name: impl Into<String>, domain: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            domain: domain.into(),
            default: None,
            index: 0,
        }
    }

    #[must_use]
    pub fn with_default(mut self, default: DefaultValue) -> Self {
        self.default = Some(default);
        self
    }

    /// 0-based position within the owning list.
    #[must_use]
    pub const fn index(&self) -> usize {
        self.index
    }
}

///
/// FieldList
///
/// Ordered fields with contiguous position indices matching declaration order.
///

#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct FieldList {
    fields: Vec<Field>,
}

impl FieldList {
    #[must_use]
    pub const fn new() -> Self {
        Self { fields: Vec::new() }
    }

    pub fn push(&mut self, mut field: Field) {
        field.index = self.fields.len();
        self.fields.push(field);
    }

    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Field> {
        self.fields.iter().find(|f| f.name == name)
    }

    #[must_use]
    pub fn as_slice(&self) -> &[Field] {
        &self.fields
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Field> {
        self.fields.iter()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

impl<'a> IntoIterator for &'a FieldList {
    type Item = &'a Field;
    type IntoIter = std::slice::Iter<'a, Field>;

    fn into_iter(self) -> Self::IntoIter {
        self.fields.iter()
    }
}

impl FromIterator<Field> for FieldList {
    fn from_iter<I: IntoIterator<Item = Field>>(iter: I) -> Self {
        let mut list = Self::new();
        for field in iter {
            list.push(field);
        }

        list
    }
}

///
/// TESTS
///
