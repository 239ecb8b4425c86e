/// Validates the provided API key against the key configured at startup.
///
/// Returns `Ok(())` if the key matches. A server started without a configured key rejects
/// every request rather than running open.
#[allow(clippy::result_large_err)]
pub fn validate_api_key(
    provided_key: &str,
    expected_key: Option<&str>,
) -> Result<(), tonic::Status> {
    let expected_key =
        expected_key.ok_or_else(|| tonic::Status::internal("API_KEY not set in environment"))?;

    if provided_key == expected_key {
        Ok(())
    } else {
        Err(tonic::Status::unauthenticated("Invalid API key"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tonic::Code;

    #[test]
    fn accepts_matching_key() {
        assert!(validate_api_key("k1", Some("k1")).is_ok());
    }

    #[test]
    fn rejects_wrong_key() {
        let status = validate_api_key("k2", Some("k1")).unwrap_err();
        assert_eq!(status.code(), Code::Unauthenticated);
    }

    #[test]
    fn rejects_everything_without_configured_key() {
        let status = validate_api_key("", None).unwrap_err();
        assert_eq!(status.code(), Code::Internal);
    }
}
