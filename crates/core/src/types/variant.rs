//! Product variants and cart line identity.

use core::fmt;

use serde::{Deserialize, Deserializer, Serialize};

use super::id::ProductId;

/// A size/color combination chosen for a product.
///
/// Empty strings are treated the same as an absent value, so a variant built
/// from blank form inputs equals [`Variant::default`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Variant {
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "empty_as_none"
    )]
    pub size: Option<String>,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "empty_as_none"
    )]
    pub color: Option<String>,
}

impl Variant {
    /// Create a variant, normalizing empty values to `None`.
    #[must_use]
    pub fn new(size: Option<impl Into<String>>, color: Option<impl Into<String>>) -> Self {
        Self {
            size: non_empty(size.map(Into::into)),
            color: non_empty(color.map(Into::into)),
        }
    }

    /// A variant with both size and color set.
    #[must_use]
    pub fn sized(size: impl Into<String>, color: impl Into<String>) -> Self {
        Self::new(Some(size), Some(color))
    }

    /// Returns true if both size and color are chosen.
    #[must_use]
    pub const fn is_complete(&self) -> bool {
        self.size.is_some() && self.color.is_some()
    }

    /// Human-readable label: size and color joined by " / ", or "Standard".
    #[must_use]
    pub fn label(&self) -> String {
        let parts: Vec<&str> = [self.size.as_deref(), self.color.as_deref()]
            .into_iter()
            .flatten()
            .collect();

        if parts.is_empty() {
            "Standard".to_string()
        } else {
            parts.join(" / ")
        }
    }
}

/// Identity of a cart line: product id plus variant.
///
/// Two line items with equal keys are the same line. The string form is
/// `id|size|color` with missing parts left empty.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct LineKey {
    pub id: ProductId,
    pub variant: Variant,
}

impl LineKey {
    #[must_use]
    pub const fn new(id: ProductId, variant: Variant) -> Self {
        Self { id, variant }
    }
}

impl fmt::Display for LineKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}|{}|{}",
            self.id,
            self.variant.size.as_deref().unwrap_or(""),
            self.variant.color.as_deref().unwrap_or("")
        )
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}

/// Deserialize an optional string, mapping `""` to `None`.
pub(crate) fn empty_as_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Option::<String>::deserialize(deserializer).map(non_empty)
}
