//! Newtype IDs for type-safe entity references.
//!
//! Catalog products are keyed by folder name and orders by a generated
//! string identifier, so both IDs wrap a `String`. The `define_id!` macro
//! keeps them from being mixed up.

/// Macro to define a type-safe string ID wrapper.
///
/// Creates a newtype wrapper around `String` with:
/// - `Serialize`/`Deserialize` with `#[serde(transparent)]`
/// - `Debug`, `Clone`, `PartialEq`, `Eq`, `Hash`, `PartialOrd`, `Ord`
/// - Conversion methods: `new()`, `as_str()`, `into_inner()`
/// - `From<String>` and `From<&str>` implementations
///
/// # Example
///
/// ```rust
/// # use sura_core::define_id;
/// define_id!(ProductId);
/// define_id!(OrderId);
///
/// let product_id = ProductId::new("abyss");
/// let order_id = OrderId::new("SURA-20250101120000-AB12");
///
/// // These are different types, so this won't compile:
/// // let _: ProductId = order_id;
/// ```
#[macro_export]
macro_rules! define_id {
    ($name:ident) => {
        #[derive(
            Debug,
            Clone,
            PartialEq,
            Eq,
            Hash,
            PartialOrd,
            Ord,
            ::serde::Serialize,
            ::serde::Deserialize,
        )]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            /// Create a new ID from a string value.
            #[must_use]
            pub fn new(id: impl Into<String>) -> Self {
                Self(id.into())
            }

            /// Get the underlying string value.
            #[must_use]
            pub fn as_str(&self) -> &str {
                &self.0
            }

            /// Consume the ID and return its inner string.
            #[must_use]
            pub fn into_inner(self) -> String {
                self.0
            }
        }

        impl ::core::fmt::Display for $name {
            fn fmt(&self, f: &mut ::core::fmt::Formatter<'_>) -> ::core::fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl From<String> for $name {
            fn from(id: String) -> Self {
                Self(id)
            }
        }

        impl From<&str> for $name {
            fn from(id: &str) -> Self {
                Self(id.to_owned())
            }
        }

        impl AsRef<str> for $name {
            fn as_ref(&self) -> &str {
                &self.0
            }
        }
    };
}

// Define standard entity IDs
define_id!(ProductId);
define_id!(OrderId);
