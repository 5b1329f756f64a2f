//! Newtype IDs for type-safe entity references.
//!
//! The StyleStore server keys every record by a UUID. Use the `define_id!`
//! macro to create wrappers that prevent mixing IDs from different entities.

/// Macro to define a type-safe UUID wrapper.
///
/// Creates a newtype wrapper around [`uuid::Uuid`] with:
/// - `Serialize`/`Deserialize` with `#[serde(transparent)]`
/// - `Debug`, `Clone`, `Copy`, `PartialEq`, `Eq`, `Hash`, `Default` (nil UUID)
/// - `parse()`, `short()` and `is_nil()`
/// - `From<Uuid>` and `Into<Uuid>` implementations
///
/// # Example
///
/// ```rust
/// # use stylestore_core::define_id;
/// define_id!(OrderId);
///
/// let id = OrderId::from(uuid::Uuid::nil());
/// assert!(id.is_nil());
/// assert_eq!(id.short(), "-");
/// ```
#[macro_export]
macro_rules! define_id {
    ($name:ident) => {
        #[derive(
            Debug,
            Clone,
            Copy,
            PartialEq,
            Eq,
            Hash,
            Default,
            ::serde::Serialize,
            ::serde::Deserialize
        )]
        #[serde(transparent)]
        pub struct $name(::uuid::Uuid);

        impl $name {
            /// Parse from text, returning `None` if it is not a UUID.
            #[must_use]
            pub fn parse(s: &str) -> Option<Self> {
                ::uuid::Uuid::parse_str(s.trim()).ok().map(Self)
            }

            /// First eight hex digits, for compact log output; `-` for the nil id.
            #[must_use]
            pub fn short(&self) -> String {
                if self.is_nil() {
                    return "-".to_string();
                }
                self.0.to_string().chars().take(8).collect()
            }

            /// Whether this is the nil UUID (the server sent no id).
            #[must_use]
            pub fn is_nil(&self) -> bool {
                self.0.is_nil()
            }
        }

        impl ::core::fmt::Display for $name {
            fn fmt(&self, f: &mut ::core::fmt::Formatter<'_>) -> ::core::fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl From<::uuid::Uuid> for $name {
            fn from(id: ::uuid::Uuid) -> Self {
                Self(id)
            }
        }

        impl From<$name> for ::uuid::Uuid {
            fn from(id: $name) -> Self {
                id.0
            }
        }
    };
}

define_id!(ProductId);
define_id!(UserId);

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_short_id() {
        let id: ProductId =
            serde_json::from_str("\"3f2b8c1e-9a4d-4e6f-8b7a-1c2d3e4f5a6b\"").unwrap();
        assert_eq!(id.short(), "3f2b8c1e");
        assert!(!id.is_nil());
    }

    #[test]
    fn test_default_is_nil() {
        assert!(UserId::default().is_nil());
        assert_eq!(ProductId::default().short(), "-");
    }

    #[test]
    fn test_rejects_non_uuid() {
        assert!(serde_json::from_str::<ProductId>("\"not-a-uuid\"").is_err());
        assert!(UserId::parse("42").is_none());
        assert!(UserId::parse(" 3f2b8c1e-9a4d-4e6f-8b7a-1c2d3e4f5a6b ").is_some());
    }
}
