//! Loader for the resolved JSON protocol description.
//!
//! The JSON shape follows the AMQP code-generation descriptions: kebab-case
//! version keys, `domains` as `[alias, type]` pairs, and arguments/properties
//! that name either a `type` or a `domain`.

use crate::{
    error::SpecError,
    node::{Class, Constant, Field, Method, Spec, Version},
    types::{DefaultValue, ErrorClass},
};
use serde::Deserialize;
use serde_json::Value;
use std::path::Path;

///
/// RawSpec
///

#[derive(Debug, Deserialize)]
#[serde(rename_all = "kebab-case")]
struct RawSpec {
    major_version: u8,
    minor_version: u8,
    #[serde(default)]
    revision: u8,
    port: u16,
    #[serde(default)]
    domains: Vec<(String, String)>,
    #[serde(default)]
    constants: Vec<RawConstant>,
    classes: Vec<RawClass>,
}

#[derive(Debug, Deserialize)]
struct RawConstant {
    name: String,
    value: u32,
    #[serde(default)]
    class: String,
}

#[derive(Debug, Deserialize)]
struct RawClass {
    id: u16,
    name: String,
    #[serde(default)]
    methods: Vec<RawMethod>,
    #[serde(default)]
    properties: Vec<RawField>,
}

#[derive(Debug, Deserialize)]
struct RawMethod {
    id: u16,
    name: String,
    #[serde(default)]
    synchronous: bool,
    #[serde(default)]
    content: bool,
    #[serde(default)]
    arguments: Vec<RawField>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "kebab-case")]
struct RawField {
    name: String,
    #[serde(rename = "type")]
    ty: Option<String>,
    domain: Option<String>,
    default_value: Option<Value>,
}

impl Spec {
    /// Build a spec from a JSON protocol description.
    pub fn from_json_str(json: &str) -> Result<Self, SpecError> {
        let raw: RawSpec = serde_json::from_str(json)?;

        raw.into_spec()
    }

    /// Read and build a spec from a JSON protocol description on disk.
    pub fn from_json_path(path: impl AsRef<Path>) -> Result<Self, SpecError> {
        let json = std::fs::read_to_string(path)?;

        Self::from_json_str(&json)
    }
}

impl RawSpec {
    fn into_spec(self) -> Result<Spec, SpecError> {
        let version = Version::new(self.major_version, self.minor_version, self.revision);
        let mut spec = Spec::new(version, self.port);

        for (alias, ty) in self.domains {
            spec = spec.with_domain(alias, ty);
        }

        for constant in self.constants {
            let class = ErrorClass::from_tag(&constant.class).ok_or_else(|| {
                SpecError::UnknownErrorClass {
                    constant: constant.name.clone(),
                    tag: constant.class.clone(),
                }
            })?;
            spec = spec.with_constant(Constant::new(constant.name, constant.value, class));
        }

        for raw_class in self.classes {
            let mut class = Class::new(raw_class.id, raw_class.name);

            for property in raw_class.properties {
                class = class.with_property(property.into_field()?);
            }

            for raw_method in raw_class.methods {
                let mut method = Method::new(raw_method.id, raw_method.name)
                    .with_synchronous(raw_method.synchronous)
                    .with_content(raw_method.content);

                for argument in raw_method.arguments {
                    method = method.with_argument(argument.into_field()?);
                }

                class = class.with_method(method);
            }

            spec = spec.with_class(class)?;
        }

        Ok(spec)
    }
}

impl RawField {
    fn into_field(self) -> Result<Field, SpecError> {
        let Some(domain) = self.domain.or(self.ty) else {
            return Err(SpecError::MissingDomain { field: self.name });
        };

        let default = self
            .default_value
            .as_ref()
            .map(|value| default_value(&self.name, value))
            .transpose()?;

        let mut field = Field::new(self.name, domain);
        field.default = default;

        Ok(field)
    }
}

// default_value
// only the empty table is supported as a table default
fn default_value(field: &str, value: &Value) -> Result<DefaultValue, SpecError> {
    let unsupported = || SpecError::UnsupportedDefault {
        field: field.to_string(),
        value: value.to_string(),
    };

    match value {
        Value::Bool(b) => Ok(DefaultValue::Bool(*b)),
        Value::Number(n) => n.as_u64().map(DefaultValue::Int).ok_or_else(unsupported),
        Value::String(s) => Ok(DefaultValue::Text(s.clone())),
        Value::Object(map) if map.is_empty() => Ok(DefaultValue::EmptyTable),
        _ => Err(unsupported()),
    }
}

///
/// TESTS
///
