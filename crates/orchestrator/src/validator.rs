use crate::OrchestratorError;

pub const MIN_PASSWORD_LEN: usize = 6;

/// Precondition check for bulk signup, run once before any dispatch.
///
/// A failure here aborts the whole call with no partial report and no side
/// effects; it is deliberately not a per-marketplace result.
pub fn signup_preconditions(email: &str, password: &str) -> Result<(), OrchestratorError> {
    let email = email.trim();
    let at = email.find('@');
    let valid_email = match at {
        Some(pos) if pos > 0 => email[pos + 1..].contains('.') && !email.ends_with('.'),
        _ => false,
    };
    if !valid_email {
        return Err(OrchestratorError::Validation {
            reason: format!("invalid email address: {email}"),
        });
    }

    if password.len() < MIN_PASSWORD_LEN {
        return Err(OrchestratorError::Validation {
            reason: format!("password must be at least {MIN_PASSWORD_LEN} characters"),
        });
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_plausible_credentials() {
        assert!(signup_preconditions("seller@example.com", "hunter22").is_ok());
    }

    #[test]
    fn rejects_short_password() {
        let err = signup_preconditions("seller@example.com", "abc12").unwrap_err();
        assert!(matches!(err, OrchestratorError::Validation { .. }));
    }

    #[test]
    fn rejects_malformed_email() {
        for email in ["not-an-email", "@example.com", "user@nodot", "user@domain."] {
            assert!(
                signup_preconditions(email, "hunter22").is_err(),
                "accepted {email}"
            );
        }
    }
}
