use sea_orm::{DbErr, SqlErr};

/// Marks `DbErr::Custom` messages produced by the entity checks. The bracketed
/// tag after it is the machine-readable form of the violation.
const CHECK_PREFIX: &str = "entity check [";

/// A write the schema refused.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConstraintViolation {
    /// A unique key already holds the value, e.g. a user liking a comment twice.
    #[error("Duplicate row: {0}")]
    Duplicate(String),
    /// The referenced parent row does not exist.
    #[error("Missing parent row: {0}")]
    MissingParent(String),
    #[error("{column} exceeds {max} characters")]
    TooLong { column: String, max: u32 },
    /// A required column that is empty once trimmed.
    #[error("{column} must not be blank")]
    Blank { column: String },
}

impl ConstraintViolation {
    /// Classifies an engine error, or returns `None` if it is not a
    /// constraint violation.
    pub fn from_db_err(err: &DbErr) -> Option<Self> {
        if let DbErr::Custom(message) = err {
            return Self::decode_check(message);
        }

        match err.sql_err()? {
            SqlErr::UniqueConstraintViolation(message) => Some(Self::Duplicate(message)),
            SqlErr::ForeignKeyConstraintViolation(message) => Some(Self::MissingParent(message)),
            _ => None,
        }
    }

    fn check_tag(&self) -> Option<String> {
        match self {
            Self::TooLong { column, max } => Some(format!("too_long:{}:{}", column, max)),
            Self::Blank { column } => Some(format!("blank:{}", column)),
            Self::Duplicate(_) | Self::MissingParent(_) => None,
        }
    }

    fn decode_check(message: &str) -> Option<Self> {
        let (tag, _) = message.strip_prefix(CHECK_PREFIX)?.split_once(']')?;
        let mut parts = tag.split(':');
        match (parts.next()?, parts.next()?, parts.next(), parts.next()) {
            ("too_long", column, Some(max), None) => Some(Self::TooLong {
                column: column.to_string(),
                max: max.parse().ok()?,
            }),
            ("blank", column, None, None) => Some(Self::Blank {
                column: column.to_string(),
            }),
            _ => None,
        }
    }

    /// Raise an entity check as a `DbErr` that `from_db_err` can classify.
    fn into_check_err(self) -> DbErr {
        match self.check_tag() {
            Some(tag) => DbErr::Custom(format!("{}{}]: {}", CHECK_PREFIX, tag, self)),
            None => DbErr::Custom(self.to_string()),
        }
    }
}

/// Rejects `value` when it is longer than `max` characters (not bytes), the
/// way a strict-mode `VARCHAR(max)` column would.
pub(crate) fn ensure_max_len(column: &str, value: &str, max: u32) -> Result<(), DbErr> {
    if value.chars().count() > max as usize {
        return Err(ConstraintViolation::TooLong {
            column: column.to_string(),
            max,
        }
        .into_check_err());
    }
    Ok(())
}

/// Rejects a required value that is empty.
pub(crate) fn ensure_not_blank(column: &str, value: &str) -> Result<(), DbErr> {
    if value.is_empty() {
        return Err(ConstraintViolation::Blank {
            column: column.to_string(),
        }
        .into_check_err());
    }
    Ok(())
}
