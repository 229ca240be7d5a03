pub mod analysis;
pub mod chat;
pub mod search;
pub mod transcript;
pub mod video;

pub use analysis::*;
pub use chat::*;
pub use search::*;
pub use transcript::*;
pub use video::*;

use crate::models::ErrorResponse;

/// Request bodies keep their fields optional so a missing one becomes
/// the uniform `{error}` response instead of a framework-level 422.
pub(crate) fn require<'a>(
    value: &'a Option<String>,
    message: &str,
) -> Result<&'a str, ErrorResponse> {
    match value.as_deref().map(str::trim) {
        Some(v) if !v.is_empty() => Ok(v),
        _ => Err(ErrorResponse::new(message)),
    }
}

#[cfg(test)]
mod tests {
    use super::require;

    #[test]
    fn require_rejects_missing_and_blank_fields() {
        assert!(require(&None, "missing").is_err());
        assert!(require(&Some("  ".to_string()), "missing").is_err());
        assert_eq!(require(&Some(" x ".to_string()), "missing").unwrap(), "x");
    }
}
