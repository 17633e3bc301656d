//! Email address utilities

use once_cell::sync::Lazy;
use regex::Regex;

// Local part and domain of an address, used for masking
static ADDRESS_PARTS_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(?P<local>[^@]+)(?P<domain>@.+)$").unwrap()
});

/// Check general email syntax (RFC 5322 subset, as accepted by `validator`)
pub fn is_valid_email(email: &str) -> bool {
    validator::validate_email(email)
}

/// Check that the address ends with the required suffix, e.g. `@dso.org.sg`
///
/// The comparison is exact: no case folding and no trimming.
pub fn has_required_domain(email: &str, required_domain: &str) -> bool {
    !required_domain.is_empty() && email.ends_with(required_domain)
}

/// Mask an email address for logging (e.g., u***@dso.org.sg)
pub fn mask_email(email: &str) -> String {
    match ADDRESS_PARTS_REGEX.captures(email) {
        Some(caps) => {
            let local = &caps["local"];
            let first = local.chars().next().map(String::from).unwrap_or_default();
            format!("{}***{}", first, &caps["domain"])
        }
        None => "***".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_valid_email() {
        assert!(is_valid_email("user@dso.org.sg"));
        assert!(is_valid_email("first.last+tag@dso.org.sg"));
        assert!(!is_valid_email("user@@dso.org.sg"));
        assert!(!is_valid_email("user.dso.org.sg"));
        assert!(!is_valid_email(""));
    }

    #[test]
    fn test_has_required_domain() {
        assert!(has_required_domain("user@dso.org.sg", "@dso.org.sg"));
        assert!(!has_required_domain("user@gmail.com", "@dso.org.sg"));
        assert!(!has_required_domain("user@evil-dso.org.sg", "@dso.org.sg"));
        assert!(!has_required_domain("user@DSO.ORG.SG", "@dso.org.sg"));
        assert!(!has_required_domain("user@dso.org.sg", ""));
    }

    #[test]
    fn test_mask_email() {
        assert_eq!(mask_email("userABC@dso.org.sg"), "u***@dso.org.sg");
        assert_eq!(mask_email("a@dso.org.sg"), "a***@dso.org.sg");
        assert_eq!(mask_email("not-an-address"), "***");
    }
}
