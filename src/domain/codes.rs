//! Coded enumerations for platform, region and edition.
//!
//! The table store keeps short lowercase codes (`ps4`, `eur`, `ce`). Each
//! code has a human label used by the table and the selectors. Codes the
//! crate does not know are carried through as `Other(code)`, lowercased like
//! the known ones, and label themselves with that code.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Generates a coded enum with a static code -> label table.
///
/// Every generated type serializes as its code string, parses codes
/// case-insensitively, and falls back to `Other(String)` for unknown codes.
macro_rules! coded_enum {
    (
        $(#[$meta:meta])*
        $name:ident {
            $($variant:ident => ($code:literal, $label:literal)),* $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
        #[serde(from = "String", into = "String")]
        pub enum $name {
            $(
                #[doc = $label]
                $variant,
            )*
            /// A code with no entry in the label table.
            Other(String),
        }

        impl $name {
            /// Parses a code, ignoring case. Unknown codes become `Other` with
            /// the lowercased code, so spellings differing in case compare equal.
            #[must_use]
            pub fn from_code(code: &str) -> Self {
                let normalized = code.trim().to_lowercase();
                match normalized.as_str() {
                    $($code => Self::$variant,)*
                    _ => Self::Other(normalized),
                }
            }

            /// Returns the stored code.
            #[must_use]
            pub fn code(&self) -> &str {
                match self {
                    $(Self::$variant => $code,)*
                    Self::Other(code) => code,
                }
            }

            /// Returns the display label, or the raw code when unknown.
            #[must_use]
            pub fn label(&self) -> &str {
                match self {
                    $(Self::$variant => $label,)*
                    Self::Other(code) => code,
                }
            }
        }

        impl From<String> for $name {
            fn from(code: String) -> Self {
                Self::from_code(&code)
            }
        }

        impl From<&str> for $name {
            fn from(code: &str) -> Self {
                Self::from_code(code)
            }
        }

        impl From<$name> for String {
            fn from(value: $name) -> Self {
                value.code().to_string()
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.label())
            }
        }
    };
}

coded_enum! {
    /// Hardware platform a release was published for.
    Platform {
        Pc => ("pc", "PC"),
        Ps3 => ("ps3", "PlayStation 3"),
        Xbox360 => ("xbox360", "Xbox 360"),
        Ps4 => ("ps4", "PlayStation 4"),
        XboxOne => ("xboxone", "Xbox One"),
        Ps5 => ("ps5", "PlayStation 5"),
        XboxSeriesX => ("xboxseriesx", "Xbox Series X"),
        Switch => ("switch", "Nintendo Switch"),
    }
}

coded_enum! {
    /// Market region a release was published in.
    Region {
        Us => ("us", "United States"),
        Eur => ("eur", "Europe"),
        Asia => ("asia", "Asia"),
        Jp => ("jp", "Japan"),
    }
}

coded_enum! {
    /// Packaging edition of a release.
    Edition {
        Standard => ("std", "Standard"),
        Limited => ("le", "Limited"),
        Collectors => ("ce", "Collector's"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_codes_map_to_labels() {
        assert_eq!(Platform::from_code("ps4").label(), "PlayStation 4");
        assert_eq!(Region::from_code("eur").label(), "Europe");
        assert_eq!(Edition::from_code("ce").label(), "Collector's");
    }

    #[test]
    fn codes_parse_case_insensitively() {
        assert_eq!(Platform::from_code("PS4"), Platform::Ps4);
        assert_eq!(Platform::from_code(" XboxOne "), Platform::XboxOne);
    }

    #[test]
    fn unknown_code_labels_itself() {
        let platform = Platform::from_code("dreamcast");
        assert_eq!(platform, Platform::Other("dreamcast".to_string()));
        assert_eq!(platform.label(), "dreamcast");
        assert_eq!(platform.code(), "dreamcast");
    }

    #[test]
    fn unknown_codes_differing_in_case_are_equal() {
        assert_eq!(Platform::from_code("Dreamcast"), Platform::Other("dreamcast".to_string()));
        assert_eq!(Platform::from_code(" DREAMCAST "), Platform::from_code("dreamcast"));
        assert_eq!(Edition::from_code("Deluxe").code(), "deluxe");
    }

    #[test]
    fn serializes_as_code() {
        let json = serde_json::to_string(&Region::Jp).unwrap();
        assert_eq!(json, "\"jp\"");
        let back: Region = serde_json::from_str("\"US\"").unwrap();
        assert_eq!(back, Region::Us);
    }
}
