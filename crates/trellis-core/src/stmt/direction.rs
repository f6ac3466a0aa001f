use serde::{Deserialize, Serialize};

/// Sort direction of an ORDER BY term or a sorted index column.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    #[default]
    #[serde(alias = "ascending")]
    Asc,

    #[serde(alias = "descending")]
    Desc,
}

impl Direction {
    pub fn is_desc(self) -> bool {
        matches!(self, Self::Desc)
    }
}
