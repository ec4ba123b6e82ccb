//! Parsed attribute values

/// Length unit suffix
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Unit {
    /// Bare number (`0`)
    None,
    /// `dp` or `dip`
    Dp,
    /// `px`
    Px,
    /// `sp`
    Sp,
}

impl Unit {
    /// Match a unit suffix, case-insensitively
    pub fn from_suffix(suffix: &str) -> Option<Unit> {
        match suffix.to_ascii_lowercase().as_str() {
            "dp" | "dip" => Some(Unit::Dp),
            "px" => Some(Unit::Px),
            "sp" => Some(Unit::Sp),
            _ => None,
        }
    }

    /// Whether a length in this unit can be read as dp
    pub fn is_dp(self) -> bool {
        matches!(self, Unit::None | Unit::Dp)
    }
}

/// A parsed attribute value
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AttrValue {
    /// `8dp`, `-4dp`, `0`
    Length { value: i64, unit: Unit },

    /// `@+id/name`, `@id/name`, `@android:id/name`
    Reference {
        /// `+` marker: the reference declares the id if missing
        create: bool,
        package: Option<String>,
        kind: String,
        name: String,
    },

    /// Bare identifier such as `wrap_content` or `strong`
    Keyword(String),
}

impl AttrValue {
    /// Length in dp, if this is a dp or unitless length
    pub fn as_dp(&self) -> Option<i64> {
        match self {
            AttrValue::Length { value, unit } if unit.is_dp() => Some(*value),
            _ => None,
        }
    }

    /// Id name, if this is an `id` reference
    pub fn as_id(&self) -> Option<&str> {
        match self {
            AttrValue::Reference { kind, name, .. } if kind == "id" => Some(name),
            _ => None,
        }
    }

    /// Case-insensitive keyword comparison
    pub fn is_keyword(&self, keyword: &str) -> bool {
        matches!(self, AttrValue::Keyword(k) if k.eq_ignore_ascii_case(keyword))
    }
}
