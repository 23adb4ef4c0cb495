//! Common validation utilities.

use validator::ValidationError;

/// Maximum length of a hostname per RFC 1035.
const MAX_HOSTNAME_LENGTH: usize = 253;

/// Maximum length PostgreSQL allows for identifiers.
const MAX_DB_IDENTIFIER_LENGTH: usize = 63;

/// Validates that a host is a plausible hostname or IP address.
///
/// Full DNS validation happens when the connection is actually probed;
/// this only rejects values that can never be a host.
pub fn validate_host(host: &str) -> Result<(), ValidationError> {
    let valid = !host.is_empty()
        && host.len() <= MAX_HOSTNAME_LENGTH
        && !host.contains(char::is_whitespace)
        && host
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '.' | '-' | ':' | '_'));
    if valid {
        Ok(())
    } else {
        let mut err = ValidationError::new("host");
        err.message = Some("Host must be a hostname or IP address".into());
        Err(err)
    }
}

/// Validates that a port is in the usable TCP range (1-65535).
pub fn validate_port(port: u16) -> Result<(), ValidationError> {
    if port == 0 {
        let mut err = ValidationError::new("port");
        err.message = Some("Port must be between 1 and 65535".into());
        Err(err)
    } else {
        Ok(())
    }
}

/// Validates a database identifier (database name or user).
pub fn validate_db_identifier(value: &str) -> Result<(), ValidationError> {
    if !value.is_empty() && value.len() <= MAX_DB_IDENTIFIER_LENGTH {
        Ok(())
    } else {
        let mut err = ValidationError::new("db_identifier");
        err.message = Some("Must be 1-63 characters".into());
        Err(err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_host_accepts_hostname() {
        assert!(validate_host("db.internal.example.com").is_ok());
    }

    #[test]
    fn test_validate_host_accepts_ip() {
        assert!(validate_host("10.0.0.5").is_ok());
        assert!(validate_host("::1").is_ok());
    }

    #[test]
    fn test_validate_host_rejects_empty() {
        assert!(validate_host("").is_err());
    }

    #[test]
    fn test_validate_host_rejects_whitespace() {
        assert!(validate_host("db host").is_err());
    }

    #[test]
    fn test_validate_host_rejects_overlong() {
        let long = "a".repeat(254);
        assert!(validate_host(&long).is_err());
    }

    #[test]
    fn test_validate_port_rejects_zero() {
        assert!(validate_port(0).is_err());
        assert!(validate_port(1).is_ok());
        assert!(validate_port(5432).is_ok());
        assert!(validate_port(65535).is_ok());
    }

    #[test]
    fn test_validate_db_identifier() {
        assert!(validate_db_identifier("acct").is_ok());
        assert!(validate_db_identifier("").is_err());
        assert!(validate_db_identifier(&"x".repeat(64)).is_err());
    }
}
