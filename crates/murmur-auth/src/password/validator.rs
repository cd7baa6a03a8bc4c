//! Registration password policy.

/// Shortest accepted password, in characters.
pub const MIN_LENGTH: usize = 12;
/// Longest accepted password, in characters.
pub const MAX_LENGTH: usize = 50;

/// Checks a candidate password against the length policy.
#[derive(Debug, Clone, Copy, Default)]
pub struct PasswordPolicy;

impl PasswordPolicy {
    /// Returns every policy violation, in display order. Empty means the
    /// password is acceptable.
    pub fn check(&self, password: &str) -> Vec<String> {
        let length = password.chars().count();
        let mut problems = Vec::new();

        if length == 0 {
            problems.push("You must provide a password.".to_string());
        }
        if length > 0 && length < MIN_LENGTH {
            problems.push(format!("Password must be at least {MIN_LENGTH} characters."));
        }
        if length > MAX_LENGTH {
            problems.push(format!("Password cannot exceed {MAX_LENGTH} characters."));
        }

        problems
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_password() {
        assert_eq!(PasswordPolicy.check(""), vec!["You must provide a password."]);
    }

    #[test]
    fn test_short_password() {
        assert_eq!(
            PasswordPolicy.check("hunter2"),
            vec!["Password must be at least 12 characters."]
        );
    }

    #[test]
    fn test_length_bounds_are_inclusive() {
        assert!(PasswordPolicy.check(&"a".repeat(12)).is_empty());
        assert!(PasswordPolicy.check(&"a".repeat(50)).is_empty());
        assert_eq!(
            PasswordPolicy.check(&"a".repeat(51)),
            vec!["Password cannot exceed 50 characters."]
        );
    }

    #[test]
    fn test_counts_characters_not_bytes() {
        assert!(PasswordPolicy.check(&"é".repeat(12)).is_empty());
    }
}
