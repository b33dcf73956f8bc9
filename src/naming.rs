//! Record display name → emitted type name.

/// Suffix carried by framework serializer classes.
pub const DEFAULT_SUFFIX: &str = "Serializer";

/// Strip a trailing `suffix` from `display_name`.
///
/// A name that *is* the suffix is kept as-is so the output never contains an empty type name.
pub fn normalized_name(display_name: &str, suffix: &str) -> String {
    match display_name.strip_suffix(suffix) {
        Some(stem) if !stem.is_empty() && !suffix.is_empty() => stem.to_string(),
        _ => display_name.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_trailing_suffix_only() {
        assert_eq!(normalized_name("UserProfileSerializer", DEFAULT_SUFFIX), "UserProfile");
        assert_eq!(normalized_name("SerializerOptions", DEFAULT_SUFFIX), "SerializerOptions");
        assert_eq!(normalized_name("Address", DEFAULT_SUFFIX), "Address");
    }

    #[test]
    fn bare_suffix_and_empty_suffix_are_kept() {
        assert_eq!(normalized_name("Serializer", DEFAULT_SUFFIX), "Serializer");
        assert_eq!(normalized_name("UserSchema", ""), "UserSchema");
        assert_eq!(normalized_name("UserSchema", "Schema"), "User");
    }
}
