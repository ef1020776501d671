//! Parsing of per-field metadata tags.
//!
//! Each field carries two independent strings:
//!
//! | Tag | Grammar |
//! |-----|---------|
//! | serialization | empty, `-`, `alias`, `alias,omitempty`, `,omitempty` |
//! | confidentiality | empty, `-`, `level0`, `level1`, `level2`, `level3` |
//!
//! Parts are trimmed before they are interpreted. The parsers are pure; they
//! hold no state and allocate only when reporting an error.

use crate::Level;

/// Separator between the parts of a tag.
pub const TAG_SEPARATOR: char = ',';
/// Tag value that hides a field (serialization) or means "public" (confidentiality).
pub const TAG_OMIT: &str = "-";
/// Serialization option that drops empty values.
pub const TAG_OMITEMPTY: &str = "omitempty";

/// Errors produced while parsing a field's tags.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum TagError {
    /// The serialization tag carries an option other than `omitempty`.
    #[error("serialization option `{0}` is not supported")]
    UnsupportedOption(String),
    /// The serialization tag has more parts than the grammar allows.
    #[error("serialization tag `{0}` is not supported")]
    UnsupportedSerializationTag(String),
    /// The confidentiality tag names an unknown level.
    #[error("confidentiality level `{0}` is not supported")]
    UnsupportedLevel(String),
    /// The confidentiality tag has more than one part.
    #[error("confidentiality tag `{0}` is not supported")]
    UnsupportedConfidentialityTag(String),
}

/// Result of parsing a serialization tag.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SerializationDirective<'a> {
    /// The field never appears in output.
    pub ignore: bool,
    /// Output key. `None` for an embedded field without an explicit alias,
    /// whose children flatten into the parent.
    pub alias: Option<&'a str>,
    /// Drop the field when its value is empty.
    pub omit_on_empty: bool,
}

impl SerializationDirective<'_> {
    const IGNORED: Self = Self {
        ignore: true,
        alias: None,
        omit_on_empty: false,
    };
}

/// Everything the plan compiler needs to know about one field.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct FieldDirective<'a> {
    /// The field never appears in output; the other members are defaults.
    pub ignore: bool,
    /// Output key, as in [`SerializationDirective::alias`].
    pub alias: Option<&'a str>,
    /// Drop the field when its value is empty.
    pub omit_on_empty: bool,
    /// Declared confidentiality level.
    pub level: Level,
}

/// Returns `true` when the field name marks it as not accessible from outside
/// its record: an empty name, or one starting with an underscore.
pub fn is_restricted_name(name: &str) -> bool {
    name.is_empty() || name.starts_with('_')
}

/// Parses a serialization tag.
///
/// Restricted field names are ignored before the tag is looked at.
pub fn parse_serialization_tag<'a>(
    name: &'a str,
    tag: &'a str,
    embedded: bool,
) -> Result<SerializationDirective<'a>, TagError> {
    if is_restricted_name(name) {
        return Ok(SerializationDirective::IGNORED);
    }

    let default_alias = |alias: &'a str| {
        if !alias.is_empty() {
            Some(alias)
        } else if embedded {
            None
        } else {
            Some(name)
        }
    };

    let mut parts = tag.split(TAG_SEPARATOR).map(str::trim);
    match (parts.next(), parts.next(), parts.next()) {
        (Some(TAG_OMIT), None, None) => Ok(SerializationDirective::IGNORED),
        (Some(alias), None, None) => Ok(SerializationDirective {
            ignore: false,
            alias: default_alias(alias),
            omit_on_empty: false,
        }),
        (Some(alias), Some(TAG_OMITEMPTY), None) => Ok(SerializationDirective {
            ignore: false,
            alias: default_alias(alias),
            omit_on_empty: true,
        }),
        (Some(_), Some(option), None) => Err(TagError::UnsupportedOption(option.to_string())),
        _ => Err(TagError::UnsupportedSerializationTag(tag.to_string())),
    }
}

/// Parses a confidentiality tag. An empty tag or `-` means [`Level::LEVEL0`].
pub fn parse_confidentiality_tag(tag: &str) -> Result<Level, TagError> {
    let mut parts = tag.split(TAG_SEPARATOR);
    let (Some(level), None) = (parts.next(), parts.next()) else {
        return Err(TagError::UnsupportedConfidentialityTag(tag.to_string()));
    };

    match level.trim() {
        "" | TAG_OMIT | "level0" => Ok(Level::LEVEL0),
        "level1" => Ok(Level::LEVEL1),
        "level2" => Ok(Level::LEVEL2),
        "level3" => Ok(Level::LEVEL3),
        other => Err(TagError::UnsupportedLevel(other.to_string())),
    }
}

/// Parses both tags of a field.
///
/// An ignored field short-circuits: its confidentiality tag is not parsed.
pub fn parse_field_directive<'a>(
    name: &'a str,
    serialization_tag: &'a str,
    confidentiality_tag: &str,
    embedded: bool,
) -> Result<FieldDirective<'a>, TagError> {
    let serialization = parse_serialization_tag(name, serialization_tag, embedded)?;
    if serialization.ignore {
        return Ok(FieldDirective {
            ignore: true,
            ..FieldDirective::default()
        });
    }

    Ok(FieldDirective {
        ignore: false,
        alias: serialization.alias,
        omit_on_empty: serialization.omit_on_empty,
        level: parse_confidentiality_tag(confidentiality_tag)?,
    })
}
