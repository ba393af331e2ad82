//! Validated text types for the queue boundary.
//!
//! The engine itself performs no input validation; these wrappers carry
//! the boundary's guarantees. A `PatientName` or `EntryCode` that exists
//! is known to be non-empty after trimming.

/// Errors that can occur when creating validated text types.
#[derive(Debug, thiserror::Error)]
pub enum TextError {
    /// The input text was empty or contained only whitespace
    #[error("Text cannot be empty")]
    Empty,
}

macro_rules! trimmed_non_empty {
    ($(#[$doc:meta])* $name:ident) => {
        $(#[$doc])*
        ///
        /// Wraps a `String` and ensures it contains at least one
        /// non-whitespace character. The input is trimmed of leading and
        /// trailing whitespace during construction.
        #[derive(Debug, Clone, PartialEq, Eq)]
        pub struct $name(String);

        impl $name {
            /// Creates a new value from the given input.
            ///
            /// The input is trimmed; if the trimmed result is empty,
            /// `TextError::Empty` is returned.
            pub fn new(input: impl AsRef<str>) -> Result<Self, TextError> {
                let trimmed = input.as_ref().trim();
                if trimmed.is_empty() {
                    return Err(TextError::Empty);
                }
                Ok(Self(trimmed.to_owned()))
            }

            /// Returns the inner string as a string slice.
            pub fn as_str(&self) -> &str {
                &self.0
            }

            /// Consumes the wrapper, returning the inner string.
            pub fn into_inner(self) -> String {
                self.0
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl AsRef<str> for $name {
            fn as_ref(&self) -> &str {
                &self.0
            }
        }

        impl serde::Serialize for $name {
            fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
            where
                S: serde::Serializer,
            {
                serializer.serialize_str(&self.0)
            }
        }

        impl<'de> serde::Deserialize<'de> for $name {
            fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
            where
                D: serde::Deserializer<'de>,
            {
                let s = String::deserialize(deserializer)?;
                $name::new(&s).map_err(serde::de::Error::custom)
            }
        }
    };
}

trimmed_non_empty! {
    /// A patient's display name as supplied at the join surface.
    ///
    /// Not unique: two waiting patients may share a name, and position
    /// lookup resolves ties to the first match in sequence order.
    PatientName
}

trimmed_non_empty! {
    /// An entry code as supplied at the join surface.
    ///
    /// Opaque to the queue: the engine never checks it against a doctor
    /// registry, so only non-emptiness is enforced here.
    EntryCode
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_and_trims_valid_input() {
        let name = PatientName::new("  Alice Smith ").expect("valid name");
        assert_eq!(name.as_str(), "Alice Smith");

        let code = EntryCode::new("DOC001").expect("valid code");
        assert_eq!(code.to_string(), "DOC001");
    }

    #[test]
    fn rejects_empty_and_whitespace_only_input() {
        assert!(matches!(PatientName::new(""), Err(TextError::Empty)));
        assert!(matches!(PatientName::new("   "), Err(TextError::Empty)));
        assert!(matches!(EntryCode::new("\t\n"), Err(TextError::Empty)));
    }

    #[test]
    fn deserialisation_applies_the_same_validation() {
        let ok: PatientName = serde_json::from_str("\" Bob \"").expect("valid json name");
        assert_eq!(ok.as_str(), "Bob");

        let err = serde_json::from_str::<EntryCode>("\"  \"");
        assert!(err.is_err());
    }
}
