//! Typed schema model shared by every stage of the export pipeline.
//!
//! The plan decoder hands us an ordered schema describing the statement's
//! output columns. Field order is load-bearing: before wildcard expansion is
//! resolved, `projections[i]` corresponds to `fields[i]`, and the select-list
//! normalizer preserves that correspondence.

use serde::{Deserialize, Serialize};

// =============================================================================
// Semantic types
// =============================================================================

/// The closed set of column types the export pipeline understands.
///
/// Every literal-encoding and type-dispatch site matches exhaustively over
/// this enum; adding a variant is a compile-time obligation at each of them.
/// Types outside this set (structs, lists, maps) are rejected at the decoding
/// boundary by [`SemanticType::parse`] and never enter the pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SemanticType {
    Boolean,
    Int8,
    Int16,
    Int32,
    Int64,
    Float32,
    Float64,
    Decimal { precision: u8, scale: u8 },
    DateDays,
    TimestampMillis,
    Varchar,
    Varbinary,
}

impl SemanticType {
    /// Parse a decoder-supplied type name.
    ///
    /// Unknown names come back as `Err` carrying the offending name so the
    /// caller can surface an unsupported-type error instead of guessing.
    pub fn parse(name: &str) -> Result<Self, String> {
        let ty = match name.to_ascii_lowercase().as_str() {
            "boolean" | "bool" => SemanticType::Boolean,
            "int8" | "tinyint" => SemanticType::Int8,
            "int16" | "smallint" => SemanticType::Int16,
            "int32" | "int" | "integer" => SemanticType::Int32,
            "int64" | "bigint" => SemanticType::Int64,
            "float32" | "float" | "real" => SemanticType::Float32,
            "float64" | "double" => SemanticType::Float64,
            "decimal" | "numeric" => SemanticType::Decimal {
                precision: 38,
                scale: 0,
            },
            "date" | "date_days" => SemanticType::DateDays,
            "timestamp" | "timestamp_millis" => SemanticType::TimestampMillis,
            "varchar" | "string" | "text" => SemanticType::Varchar,
            "varbinary" | "binary" => SemanticType::Varbinary,
            other => return Err(other.to_string()),
        };
        Ok(ty)
    }

    /// Physical classification, used in error messages alongside the declared
    /// semantic type.
    pub fn physical_class(&self) -> &'static str {
        match self {
            SemanticType::Boolean => "bit",
            SemanticType::Int8 | SemanticType::Int16 | SemanticType::Int32 | SemanticType::Int64 => {
                "fixed-width integer"
            }
            SemanticType::Float32 | SemanticType::Float64 => "floating point",
            SemanticType::Decimal { .. } => "fixed-point decimal",
            SemanticType::DateDays | SemanticType::TimestampMillis => "temporal",
            SemanticType::Varchar => "variable-width text",
            SemanticType::Varbinary => "variable-width binary",
        }
    }

    /// Whether this type needs the VARCHAR cast workaround on export.
    ///
    /// Vertica exports timestamp columns as a 26-digit INT96, corrupting the
    /// data; the select-list normalizer casts them to VARCHAR instead.
    pub fn is_timestamp(&self) -> bool {
        matches!(self, SemanticType::TimestampMillis)
    }
}

impl std::fmt::Display for SemanticType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SemanticType::Boolean => write!(f, "boolean"),
            SemanticType::Int8 => write!(f, "int8"),
            SemanticType::Int16 => write!(f, "int16"),
            SemanticType::Int32 => write!(f, "int32"),
            SemanticType::Int64 => write!(f, "int64"),
            SemanticType::Float32 => write!(f, "float32"),
            SemanticType::Float64 => write!(f, "float64"),
            SemanticType::Decimal { precision, scale } => {
                write!(f, "decimal({}, {})", precision, scale)
            }
            SemanticType::DateDays => write!(f, "date"),
            SemanticType::TimestampMillis => write!(f, "timestamp"),
            SemanticType::Varchar => write!(f, "varchar"),
            SemanticType::Varbinary => write!(f, "varbinary"),
        }
    }
}

// =============================================================================
// Schema
// =============================================================================

/// A named, typed output column.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Field {
    pub name: String,
    #[serde(rename = "type")]
    pub ty: SemanticType,
}

impl Field {
    pub fn new(name: impl Into<String>, ty: SemanticType) -> Self {
        Self {
            name: name.into(),
            ty,
        }
    }
}

/// Ordered sequence of output fields.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Schema {
    pub fields: Vec<Field>,
}

impl Schema {
    pub fn new(fields: Vec<Field>) -> Self {
        Self { fields }
    }

    /// Build a schema from decoder-supplied (column name, type name) pairs.
    ///
    /// Fails on the first type name outside the closed set, returning that
    /// name, so unsupported types are rejected at the boundary instead of
    /// surfacing mid-pipeline.
    pub fn from_decoded<'a>(
        columns: impl IntoIterator<Item = (&'a str, &'a str)>,
    ) -> Result<Self, String> {
        let mut fields = Vec::new();
        for (name, type_name) in columns {
            let ty = SemanticType::parse(type_name)?;
            fields.push(Field::new(name, ty));
        }
        Ok(Self { fields })
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Look up a field's type by column name.
    ///
    /// Case-insensitive: decoders are inconsistent about casing the output
    /// names against the table metadata.
    pub fn field_type(&self, name: &str) -> Option<SemanticType> {
        self.fields
            .iter()
            .find(|f| f.name.eq_ignore_ascii_case(name))
            .map(|f| f.ty)
    }
}

// =============================================================================
// Typed literals
// =============================================================================

/// The runtime shape of a literal captured from the filter tree.
///
/// The pipeline only ever sees booleans and text: numeric, temporal, and
/// binary values arrive as their textual form and are parsed by the encoder
/// according to the declared [`SemanticType`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum LiteralValue {
    Bool(bool),
    Text(String),
}

impl LiteralValue {
    pub fn text(value: impl Into<String>) -> Self {
        LiteralValue::Text(value.into())
    }

    /// Runtime shape name, reported in encoding errors.
    pub fn shape(&self) -> &'static str {
        match self {
            LiteralValue::Bool(_) => "boolean",
            LiteralValue::Text(_) => "text",
        }
    }

    /// Textual form of the value, regardless of shape.
    pub fn as_text(&self) -> String {
        match self {
            LiteralValue::Bool(b) => b.to_string(),
            LiteralValue::Text(s) => s.clone(),
        }
    }
}

/// A (semantic type, raw value) pair captured in filter-tree encounter order.
///
/// The pipeline borrows these read-only; encoded strings are derived, the
/// source values are never mutated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypedLiteral {
    pub ty: SemanticType,
    pub value: LiteralValue,
}

impl TypedLiteral {
    pub fn new(ty: SemanticType, value: LiteralValue) -> Self {
        Self { ty, value }
    }
}
