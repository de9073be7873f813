use serde::{Deserialize, Serialize};

/// Unknown string for a string-backed enum.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Invalid {field} value: {value:?}")]
pub struct InvalidEnum {
    pub field: String,
    pub value: String,
}

/// Macro to generate enum with as_str + std::str::FromStr pattern
macro_rules! str_enum {
    ($name:ident { $($variant:ident => $s:literal),+ $(,)? }) => {
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        pub enum $name {
            $(#[serde(rename = $s)] $variant),+
        }

        impl $name {
            pub fn as_str(&self) -> &'static str {
                match self {
                    $(Self::$variant => $s),+
                }
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl std::str::FromStr for $name {
            type Err = InvalidEnum;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s {
                    $($s => Ok(Self::$variant)),+,
                    _ => Err(InvalidEnum {
                        field: stringify!($name).into(),
                        value: s.into(),
                    }),
                }
            }
        }
    };
}

// Row status; the string doubles as the row's CSS class.
str_enum!(StockStatus {
    Expired => "expired",
    NearExpiry => "near-expiry",
    Low => "low",
});

// Values of the category select. "" (show everything) is modelled as `None`.
str_enum!(StockCategory {
    Expired => "expired",
    Near => "near",
    Low => "low",
});

impl StockCategory {
    /// The row status this category selects.
    pub fn status(&self) -> StockStatus {
        match self {
            Self::Expired => StockStatus::Expired,
            Self::Near => StockStatus::NearExpiry,
            Self::Low => StockStatus::Low,
        }
    }

    /// Parse a select value; empty means "all categories".
    pub fn parse_filter(value: &str) -> Result<Option<Self>, InvalidEnum> {
        let value = value.trim();
        if value.is_empty() {
            Ok(None)
        } else {
            value.parse().map(Some)
        }
    }
}
