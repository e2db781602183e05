use crate::{FramingBuilder, error::GenerateError, lookup, method, property, record};
use framegen_spec::node::{Spec, Version};

///
/// Artifacts
///
/// The two rendered source files of one protocol version.
///

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Artifacts {
    pub name: String,
    pub declarations: String,
    pub definitions: String,
}

impl Artifacts {
    #[must_use]
    pub fn declarations_file(&self) -> String {
        format!("{}_decls.rs", self.name)
    }

    #[must_use]
    pub fn definitions_file(&self) -> String {
        format!("{}_defs.rs", self.name)
    }
}

/// Artifact name for a version, e.g. `framing_amqp_0_9_1`.
///
/// The revision is left out when zero, and 8.0 descriptions are named after
/// the version they report.
#[must_use]
pub fn artifact_name(prefix: &str, version: Version) -> String {
    let version = version.reported();
    let mut name = format!("{prefix}_{}_{}", version.major, version.minor);

    if version.revision != 0 {
        name.push_str(&format!("_{}", version.revision));
    }

    name
}

// render
// declarations first, then definitions in a fixed generator order
pub(crate) fn render(builder: &FramingBuilder) -> Result<Artifacts, GenerateError> {
    let spec = builder.spec;
    let name = artifact_name(&builder.config.artifact_prefix, spec.version);

    let declarations = record::generate(builder)?;

    let mut definitions = method::generate(builder)?;
    definitions.extend(property::generate(builder)?);
    definitions.extend(lookup::generate(builder)?);

    Ok(Artifacts {
        declarations: with_header(spec, &declarations.to_string()),
        definitions: with_header(spec, &definitions.to_string()),
        name,
    })
}

fn with_header(spec: &Spec, body: &str) -> String {
    format!(
        "// @generated by framegen-build from protocol {}. Do not edit.\n{body}\n",
        spec.version
    )
}

///
/// TESTS
///

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_revision_is_omitted() {
        assert_eq!(
            artifact_name("framing_amqp", Version::new(0, 9, 1)),
            "framing_amqp_0_9_1"
        );
        assert_eq!(
            artifact_name("framing_amqp", Version::new(0, 9, 0)),
            "framing_amqp_0_9"
        );
    }

    #[test]
    fn version_8_0_is_named_0_8() {
        assert_eq!(
            artifact_name("framing_amqp", Version::new(8, 0, 0)),
            "framing_amqp_0_8"
        );
    }

    #[test]
    fn file_names_follow_the_artifact_name() {
        let artifacts = Artifacts {
            name: "framing_amqp_0_9_1".to_string(),
            declarations: String::new(),
            definitions: String::new(),
        };

        assert_eq!(artifacts.declarations_file(), "framing_amqp_0_9_1_decls.rs");
        assert_eq!(artifacts.definitions_file(), "framing_amqp_0_9_1_defs.rs");
    }
}
