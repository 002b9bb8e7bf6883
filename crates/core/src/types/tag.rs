//! Product category tags.

use serde::{Deserialize, Serialize};

/// Error returned when a string does not name a known [`Tag`].
#[derive(thiserror::Error, Debug, Clone)]
#[error("unknown product tag: {0}")]
pub struct TagError(pub String);

/// Product category tag.
///
/// A closed set of categories a product can be filed under. Products carry
/// exactly one tag; submissions that omit the tag (or send a value outside
/// this set) fall back to [`Tag::Other`].
///
/// Stored in `PostgreSQL` as text and serialized SCREAMING_SNAKE_CASE on
/// the wire (`"PRODUCE"`, `"OTHER"`, ...).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Tag {
    Produce,
    Grains,
    Dairy,
    Meat,
    Seafood,
    Beverages,
    Crafts,
    Clothing,
    #[default]
    Other,
}

impl Tag {
    /// All tags, in display order. Used to render category pickers.
    pub const ALL: [Self; 9] = [
        Self::Produce,
        Self::Grains,
        Self::Dairy,
        Self::Meat,
        Self::Seafood,
        Self::Beverages,
        Self::Crafts,
        Self::Clothing,
        Self::Other,
    ];

    /// The wire/storage name of the tag (SCREAMING_SNAKE_CASE).
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Produce => "PRODUCE",
            Self::Grains => "GRAINS",
            Self::Dairy => "DAIRY",
            Self::Meat => "MEAT",
            Self::Seafood => "SEAFOOD",
            Self::Beverages => "BEVERAGES",
            Self::Crafts => "CRAFTS",
            Self::Clothing => "CLOTHING",
            Self::Other => "OTHER",
        }
    }

    /// Human-readable label ("Produce", "Other", ...).
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Produce => "Produce",
            Self::Grains => "Grains",
            Self::Dairy => "Dairy",
            Self::Meat => "Meat",
            Self::Seafood => "Seafood",
            Self::Beverages => "Beverages",
            Self::Crafts => "Crafts",
            Self::Clothing => "Clothing",
            Self::Other => "Other",
        }
    }
}

impl std::fmt::Display for Tag {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Tag {
    type Err = TagError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "PRODUCE" => Ok(Self::Produce),
            "GRAINS" => Ok(Self::Grains),
            "DAIRY" => Ok(Self::Dairy),
            "MEAT" => Ok(Self::Meat),
            "SEAFOOD" => Ok(Self::Seafood),
            "BEVERAGES" => Ok(Self::Beverages),
            "CRAFTS" => Ok(Self::Crafts),
            "CLOTHING" => Ok(Self::Clothing),
            "OTHER" => Ok(Self::Other),
            other => Err(TagError(other.to_owned())),
        }
    }
}

// SQLx support (with postgres feature): stored as TEXT, arrays as TEXT[]
#[cfg(feature = "postgres")]
impl sqlx::Type<sqlx::Postgres> for Tag {
    fn type_info() -> sqlx::postgres::PgTypeInfo {
        <String as sqlx::Type<sqlx::Postgres>>::type_info()
    }

    fn compatible(ty: &sqlx::postgres::PgTypeInfo) -> bool {
        <String as sqlx::Type<sqlx::Postgres>>::compatible(ty)
    }
}

#[cfg(feature = "postgres")]
impl sqlx::postgres::PgHasArrayType for Tag {
    fn array_type_info() -> sqlx::postgres::PgTypeInfo {
        <String as sqlx::postgres::PgHasArrayType>::array_type_info()
    }
}

#[cfg(feature = "postgres")]
impl<'r> sqlx::Decode<'r, sqlx::Postgres> for Tag {
    fn decode(value: sqlx::postgres::PgValueRef<'r>) -> Result<Self, sqlx::error::BoxDynError> {
        let s = <String as sqlx::Decode<sqlx::Postgres>>::decode(value)?;
        s.parse::<Self>().map_err(Into::into)
    }
}

#[cfg(feature = "postgres")]
impl sqlx::Encode<'_, sqlx::Postgres> for Tag {
    fn encode_by_ref(
        &self,
        buf: &mut sqlx::postgres::PgArgumentBuffer,
    ) -> Result<sqlx::encode::IsNull, sqlx::error::BoxDynError> {
        <&str as sqlx::Encode<sqlx::Postgres>>::encode_by_ref(&self.as_str(), buf)
    }
}
