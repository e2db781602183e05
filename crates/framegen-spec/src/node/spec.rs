use crate::{
    MAX_PROPERTIES,
    error::SpecError,
    node::{Class, Constant, Field, Method},
    types::WireType,
};
use derive_more::Display;
use std::collections::BTreeMap;

///
/// Version
///

#[derive(Clone, Copy, Debug, Display, Eq, Hash, Ord, PartialEq, PartialOrd)]
#[display("{major}-{minor}-{revision}")]
pub struct Version {
    pub major: u8,
    pub minor: u8,
    pub revision: u8,
}

impl Version {
    #[must_use]
    pub const fn new(major: u8, minor: u8, revision: u8) -> Self {
        Self {
            major,
            minor,
            revision,
        }
    }

    /// The triple peers expect to see.
    ///
    /// AMQP 0-8 descriptions declare themselves as 8.0, which is reported
    /// as 0.8.0.
    #[must_use]
    pub const fn reported(self) -> Self {
        if self.major == 8 && self.minor == 0 && self.revision == 0 {
            Self::new(0, 8, 0)
        } else {
            self
        }
    }
}

///
/// Spec
///
/// Built once from the upstream description and never mutated afterwards.
///

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Spec {
    pub version: Version,
    pub port: u16,
    domains: BTreeMap<String, String>,
    classes: Vec<Class>,
    constants: Vec<Constant>,
}

impl Spec {
    #[must_use]
    pub const fn new(version: Version, port: u16) -> Self {
        Self {
            version,
            port,
            domains: BTreeMap::new(),
            classes: Vec::new(),
            constants: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_domain(mut self, alias: impl Into<String>, ty: impl Into<String>) -> Self {
        self.domains.insert(alias.into(), ty.into());
        self
    }

    /// Attach a class, rejecting property lists the presence bitmap cannot hold.
    pub fn with_class(mut self, class: Class) -> Result<Self, SpecError> {
        if class.properties.len() > MAX_PROPERTIES {
            return Err(SpecError::TooManyProperties {
                class: class.name,
                count: class.properties.len(),
            });
        }

        self.classes.push(class);

        Ok(self)
    }

    #[must_use]
    pub fn with_constant(mut self, constant: Constant) -> Self {
        self.constants.push(constant);
        self
    }

    #[must_use]
    pub fn classes(&self) -> &[Class] {
        &self.classes
    }

    #[must_use]
    pub fn constants(&self) -> &[Constant] {
        &self.constants
    }

    #[must_use]
    pub fn constant(&self, name: &str) -> Option<&Constant> {
        self.constants.iter().find(|c| c.name == name)
    }

    /// Every method of every class, in class then method declaration order.
    pub fn all_methods(&self) -> impl Iterator<Item = &Method> {
        self.classes.iter().flat_map(Class::methods)
    }

    /// Resolve a domain alias to its primitive wire type.
    ///
    /// Names that are not aliases are tried as primitive type names directly.
    pub fn resolve_domain(&self, domain: &str) -> Result<WireType, SpecError> {
        let target = self.domains.get(domain).map_or(domain, String::as_str);

        target
            .parse()
            .map_err(|_| SpecError::UnknownDomain(domain.to_string()))
    }

    /// Resolve the wire type of a field through its domain.
    pub fn field_type(&self, field: &Field) -> Result<WireType, SpecError> {
        self.resolve_domain(&field.domain)
    }
}

///
/// TESTS
///
