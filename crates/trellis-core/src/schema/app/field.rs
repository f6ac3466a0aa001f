use super::{RelationType, Relationship};
use crate::stmt::Value;

use serde::{Deserialize, Serialize};

/// A declared field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Field {
    /// Stable identifier, unique within the table. `0` is reserved for the
    /// implicit `id` column.
    pub id: u64,

    pub name: String,

    /// Logical type and its options
    #[serde(flatten)]
    pub ty: FieldTy,

    #[serde(default)]
    pub required: bool,

    #[serde(default)]
    pub unique: bool,

    #[serde(default)]
    pub indexed: bool,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default: Option<Value>,
}

/// The closed set of logical field types.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum FieldTy {
    #[serde(rename_all = "camelCase")]
    SingleLineText {
        #[serde(default = "default_max_length")]
        max_length: u32,
    },
    LongText,
    RichText,
    Email,
    Url,
    PhoneNumber,
    Integer {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        min: Option<i64>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        max: Option<i64>,
    },
    Decimal(DecimalOptions),
    Currency(DecimalOptions),
    Percentage {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        min: Option<f64>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        max: Option<f64>,
    },
    Rating {
        #[serde(default = "default_rating_max")]
        max: u8,
    },
    Checkbox,
    Date,
    Datetime,
    Time,
    CreatedAt,
    UpdatedAt,
    DeletedAt,
    Autonumber,
    Uuid,
    SingleSelect {
        options: Vec<String>,
    },
    MultiSelect {
        options: Vec<String>,
    },
    Status {
        options: Vec<String>,
    },
    Relationship(Relationship),
    SingleAttachment,
    MultipleAttachments,
    Json,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DecimalOptions {
    #[serde(default = "default_precision")]
    pub precision: u32,

    #[serde(default = "default_scale")]
    pub scale: u32,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min: Option<f64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max: Option<f64>,
}

fn default_max_length() -> u32 {
    255
}

fn default_rating_max() -> u8 {
    5
}

fn default_precision() -> u32 {
    10
}

fn default_scale() -> u32 {
    2
}

impl Field {
    /// Whether the field maps to a column on its own table. Many-to-many
    /// relationships are stored in a junction table instead.
    pub fn has_column(&self) -> bool {
        !self.ty.is_many_to_many()
    }
}

impl FieldTy {
    pub fn as_relationship(&self) -> Option<&Relationship> {
        match self {
            Self::Relationship(rel) => Some(rel),
            _ => None,
        }
    }

    pub fn is_relationship(&self) -> bool {
        matches!(self, Self::Relationship(_))
    }

    pub fn is_many_to_many(&self) -> bool {
        matches!(self, Self::Relationship(rel) if rel.relation_type == RelationType::ManyToMany)
    }

    pub fn is_one_to_one(&self) -> bool {
        matches!(self, Self::Relationship(rel) if rel.relation_type == RelationType::OneToOne)
    }

    pub fn is_autonumber(&self) -> bool {
        matches!(self, Self::Autonumber)
    }

    /// Values of these types are produced by the database and never written
    /// by a request.
    pub fn is_read_only(&self) -> bool {
        matches!(self, Self::Autonumber | Self::CreatedAt | Self::UpdatedAt)
    }

    /// Allowed values for select-like types.
    pub fn options(&self) -> Option<&[String]> {
        match self {
            Self::SingleSelect { options }
            | Self::MultiSelect { options }
            | Self::Status { options } => Some(options),
            _ => None,
        }
    }

    pub fn is_array(&self) -> bool {
        matches!(self, Self::MultiSelect { .. })
    }

    pub fn is_text(&self) -> bool {
        matches!(
            self,
            Self::SingleLineText { .. }
                | Self::LongText
                | Self::RichText
                | Self::Email
                | Self::Url
                | Self::PhoneNumber
                | Self::SingleSelect { .. }
                | Self::Status { .. }
        )
    }

    pub fn is_numeric(&self) -> bool {
        matches!(
            self,
            Self::Integer { .. }
                | Self::Decimal(_)
                | Self::Currency(_)
                | Self::Percentage { .. }
                | Self::Rating { .. }
                | Self::Autonumber
        )
    }

    /// Declared `(min, max)` bounds, as floats.
    pub fn bounds(&self) -> (Option<f64>, Option<f64>) {
        match self {
            Self::Integer { min, max } => (min.map(|v| v as f64), max.map(|v| v as f64)),
            Self::Decimal(opts) | Self::Currency(opts) => (opts.min, opts.max),
            Self::Percentage { min, max } => (*min, *max),
            _ => (None, None),
        }
    }

    /// The `type` tag as written in a declaration.
    pub fn name(&self) -> &'static str {
        match self {
            Self::SingleLineText { .. } => "single-line-text",
            Self::LongText => "long-text",
            Self::RichText => "rich-text",
            Self::Email => "email",
            Self::Url => "url",
            Self::PhoneNumber => "phone-number",
            Self::Integer { .. } => "integer",
            Self::Decimal(_) => "decimal",
            Self::Currency(_) => "currency",
            Self::Percentage { .. } => "percentage",
            Self::Rating { .. } => "rating",
            Self::Checkbox => "checkbox",
            Self::Date => "date",
            Self::Datetime => "datetime",
            Self::Time => "time",
            Self::CreatedAt => "created-at",
            Self::UpdatedAt => "updated-at",
            Self::DeletedAt => "deleted-at",
            Self::Autonumber => "autonumber",
            Self::Uuid => "uuid",
            Self::SingleSelect { .. } => "single-select",
            Self::MultiSelect { .. } => "multi-select",
            Self::Status { .. } => "status",
            Self::Relationship(_) => "relationship",
            Self::SingleAttachment => "single-attachment",
            Self::MultipleAttachments => "multiple-attachments",
            Self::Json => "json",
        }
    }
}
