//! Tag-aware YAML loading for CloudFormation short-form intrinsics.
//!
//! DESIGN
//! ======
//! `serde_yaml` already parses any `!Tag` into `Value::Tagged`. Loading walks
//! the tree once and rewrites each recognized tag into `{Name: payload}`, the
//! same shape the long form (`Ref: X`) deserializes to. A tag outside the
//! table is rejected as a format error, like any YAML we cannot construct.
//!
//! Scalar payloads are kept as text: `!Ref 42` names the resource `"42"`.
//! Only string scalars keep their source spelling. Numbers and booleans are
//! resolved by the YAML parser first and come back in canonical form
//! (`!Ref 0x1F` is `"31"`), and a null payload is the empty string. Such names
//! can never match a resource, since logical IDs are string keys.
//!
//! YAML merge keys (`<<: *anchor`) are applied after tags are rewritten.

use serde_yaml::{Mapping, Value};

use super::TemplateError;

// =============================================================================
// INTRINSIC FUNCTIONS
// =============================================================================

/// A CloudFormation intrinsic function with a recognized short-form tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Intrinsic {
    Ref,
    Sub,
    Join,
    Select,
    Split,
    GetAtt,
    GetAZs,
    ImportValue,
    FindInMap,
}

/// Tag name → intrinsic. Tag names are matched without the leading `!`.
const INTRINSIC_TAGS: [(&str, Intrinsic); 9] = [
    ("Ref", Intrinsic::Ref),
    ("Sub", Intrinsic::Sub),
    ("Join", Intrinsic::Join),
    ("Select", Intrinsic::Select),
    ("Split", Intrinsic::Split),
    ("GetAtt", Intrinsic::GetAtt),
    ("GetAZs", Intrinsic::GetAZs),
    ("ImportValue", Intrinsic::ImportValue),
    ("FindInMap", Intrinsic::FindInMap),
];

impl Intrinsic {
    /// Look up an intrinsic by tag name (`"Ref"` or `"!Ref"`).
    #[must_use]
    pub fn from_tag(tag: &str) -> Option<Self> {
        let name = tag.strip_prefix('!').unwrap_or(tag);
        INTRINSIC_TAGS
            .iter()
            .find(|(candidate, _)| *candidate == name)
            .map(|&(_, intrinsic)| intrinsic)
    }

    /// Mapping key this intrinsic deserializes to.
    #[must_use]
    pub fn name(self) -> &'static str {
        INTRINSIC_TAGS
            .iter()
            .find(|(_, intrinsic)| *intrinsic == self)
            .map_or("", |&(name, _)| name)
    }

    /// Build `{Name: payload}`, normalizing the payload by its shape.
    fn construct(self, payload: Value) -> Result<Value, TemplateError> {
        let inner = match payload {
            Value::Sequence(_) | Value::Mapping(_) => normalize(payload)?,
            Value::Tagged(tagged) => {
                return Err(TemplateError::Format(format!(
                    "nested tag {} inside !{} is not supported",
                    tagged.tag,
                    self.name()
                )));
            }
            scalar => Value::String(scalar_text(scalar)),
        };

        let mut wrapper = Mapping::with_capacity(1);
        wrapper.insert(Value::String(self.name().to_owned()), inner);
        Ok(Value::Mapping(wrapper))
    }
}

// =============================================================================
// LOADING
// =============================================================================

/// Load template text into a plain YAML tree with intrinsics as mappings.
///
/// # Errors
///
/// Returns [`TemplateError::Format`] when the text is not valid YAML or uses
/// a tag outside the recognized intrinsic set.
pub fn load_template(text: &str) -> Result<Value, TemplateError> {
    let raw: Value = serde_yaml::from_str(text)?;
    let mut template = normalize(raw)?;
    template.apply_merge()?;
    Ok(template)
}

fn normalize(value: Value) -> Result<Value, TemplateError> {
    match value {
        Value::Sequence(items) => items
            .into_iter()
            .map(normalize)
            .collect::<Result<Vec<_>, _>>()
            .map(Value::Sequence),
        Value::Mapping(map) => {
            let mut out = Mapping::with_capacity(map.len());
            for (key, item) in map {
                out.insert(normalize(key)?, normalize(item)?);
            }
            Ok(Value::Mapping(out))
        }
        Value::Tagged(tagged) => {
            let tag = tagged.tag.to_string();
            let Some(intrinsic) = Intrinsic::from_tag(&tag) else {
                return Err(TemplateError::Format(format!(
                    "could not determine a constructor for the tag '{tag}'"
                )));
            };
            intrinsic.construct(tagged.value)
        }
        scalar => Ok(scalar),
    }
}

fn scalar_text(value: Value) -> String {
    match value {
        Value::String(text) => text,
        Value::Number(number) => number.to_string(),
        Value::Bool(flag) => flag.to_string(),
        _ => String::new(),
    }
}

#[cfg(test)]
#[path = "tags_test.rs"]
mod tests;
