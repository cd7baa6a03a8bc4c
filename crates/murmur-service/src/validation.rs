//! Field checks for registration and post authoring.
//!
//! Each check is a pure function from a field value to the list of
//! problems it found. Callers concatenate the lists in display order, so
//! a form's full message list is a single expression with no shared
//! mutable state.

use validator::ValidateEmail;

use murmur_auth::PasswordPolicy;

/// Shortest accepted username, in characters.
pub const USERNAME_MIN_LENGTH: usize = 3;
/// Longest accepted username, in characters.
pub const USERNAME_MAX_LENGTH: usize = 30;

/// Trim and lowercase a username or email before it is checked or stored.
pub fn normalize(raw: &str) -> String {
    raw.trim().to_lowercase()
}

/// Presence and character-set checks on a normalized username.
pub fn username_charset(username: &str) -> Vec<String> {
    if username.is_empty() {
        return vec!["You must provide a username.".to_string()];
    }
    if !username.chars().all(|c| c.is_ascii_alphanumeric()) {
        return vec!["Username can only contain letters and numbers.".to_string()];
    }
    Vec::new()
}

/// Length checks on a normalized username. An empty username is reported
/// by [`username_charset`] instead.
pub fn username_length(username: &str) -> Vec<String> {
    let length = username.chars().count();
    if length > 0 && length < USERNAME_MIN_LENGTH {
        vec![format!(
            "Username must be at least {USERNAME_MIN_LENGTH} characters."
        )]
    } else if length > USERNAME_MAX_LENGTH {
        vec![format!(
            "Username cannot exceed {USERNAME_MAX_LENGTH} characters."
        )]
    } else {
        Vec::new()
    }
}

/// Syntax check on a normalized email.
pub fn email_format(email: &str) -> Vec<String> {
    if email.validate_email() {
        Vec::new()
    } else {
        vec!["You must provide a valid email address.".to_string()]
    }
}

/// Registration password policy.
pub fn password_strength(password: &str) -> Vec<String> {
    PasswordPolicy.check(password)
}

/// Every format problem with a registration, in display order.
pub fn registration_problems(username: &str, email: &str, password: &str) -> Vec<String> {
    [
        username_charset(username),
        email_format(email),
        password_strength(password),
        username_length(username),
    ]
    .concat()
}

/// Whether the username passed every format check, making a uniqueness
/// check meaningful.
pub fn username_is_well_formed(username: &str) -> bool {
    username_charset(username).is_empty() && username_length(username).is_empty()
}

/// Whether the email passed its format check.
pub fn email_is_well_formed(email: &str) -> bool {
    email_format(email).is_empty()
}

/// Sanitized text whose only content is whitespace or escaped
/// non-breaking spaces.
fn is_blank(sanitized: &str) -> bool {
    sanitized.split("&nbsp;").all(|part| part.trim().is_empty())
}

/// Presence check on a sanitized post title.
pub fn post_title(title: &str) -> Vec<String> {
    if is_blank(title) {
        vec!["You must provide a title.".to_string()]
    } else {
        Vec::new()
    }
}

/// Presence check on a sanitized post body.
pub fn post_body(body: &str) -> Vec<String> {
    if is_blank(body) {
        vec!["You must provide post content.".to_string()]
    } else {
        Vec::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize() {
        assert_eq!(normalize("  Brad@Example.COM "), "brad@example.com");
    }

    #[test]
    fn test_valid_registration_has_no_problems() {
        assert!(registration_problems("brad", "brad@x.com", "hunter2hunter2").is_empty());
    }

    #[test]
    fn test_empty_registration_reports_in_order() {
        assert_eq!(
            registration_problems("", "", ""),
            vec![
                "You must provide a username.",
                "You must provide a valid email address.",
                "You must provide a password.",
            ]
        );
    }

    #[test]
    fn test_username_length_follows_password_problems() {
        assert_eq!(
            registration_problems("ab", "not-an-email", "short"),
            vec![
                "You must provide a valid email address.",
                "Password must be at least 12 characters.",
                "Username must be at least 3 characters.",
            ]
        );
    }

    #[test]
    fn test_username_charset_and_length_both_reported() {
        assert_eq!(
            registration_problems("a!", "brad@x.com", "hunter2hunter2"),
            vec![
                "Username can only contain letters and numbers.",
                "Username must be at least 3 characters.",
            ]
        );
    }

    #[test]
    fn test_username_bounds() {
        assert!(username_is_well_formed("abc"));
        assert!(username_is_well_formed(&"a".repeat(30)));
        assert!(!username_is_well_formed(&"a".repeat(31)));
        assert!(!username_is_well_formed("ab"));
        assert!(!username_is_well_formed("brad_s"));
        assert!(!username_is_well_formed("bräd"));
    }

    #[test]
    fn test_post_fields() {
        assert_eq!(post_title(""), vec!["You must provide a title."]);
        assert_eq!(post_body(""), vec!["You must provide post content."]);
        assert!(post_title("Hello").is_empty());
    }

    #[test]
    fn test_non_breaking_spaces_alone_are_blank() {
        assert!(!post_title("&nbsp;").is_empty());
        assert!(!post_title("&nbsp; &nbsp;").is_empty());
        assert!(!post_body(" &nbsp;\n").is_empty());
        assert!(post_title("Tom&nbsp;Jerry").is_empty());
    }
}
