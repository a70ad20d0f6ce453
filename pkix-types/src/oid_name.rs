//! Trait for types that have OIDs with conventional names

/// Trait for types that have OIDs with conventional/standard names
///
/// For example, an EC parameter with OID `1.2.840.10045.3.1.7` has the
/// conventional name `secp256r1`, and the attribute `2.5.4.3` is `CN`.
pub trait OidName {
    /// Returns the conventional name for this type's OID, if it has one
    fn oid_name(&self) -> Option<&'static str>;
}
