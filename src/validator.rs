//! Form validation helpers.
//!
//! A `Validator` collects field-level and form-level messages; the check functions are plain
//! predicates so handlers read as a list of rules.

use std::collections::BTreeMap;

#[derive(Debug, Default, Clone)]
pub struct Validator {
    pub non_field_errors: Vec<String>,
    pub field_errors: BTreeMap<&'static str, String>,
}

impl Validator {
    pub fn valid(&self) -> bool {
        self.field_errors.is_empty() && self.non_field_errors.is_empty()
    }

    pub fn add_non_field_error(&mut self, message: impl Into<String>) {
        self.non_field_errors.push(message.into());
    }

    /// Records `message` for `key` unless the field already has an error.
    pub fn add_field_error(&mut self, key: &'static str, message: impl Into<String>) {
        self.field_errors
            .entry(key)
            .or_insert_with(|| message.into());
    }

    pub fn check_field(&mut self, ok: bool, key: &'static str, message: &str) {
        if !ok {
            self.add_field_error(key, message);
        }
    }

    pub fn field_error(&self, key: &str) -> Option<&str> {
        self.field_errors.get(key).map(String::as_str)
    }
}

pub fn not_blank(value: &str) -> bool {
    !value.trim().is_empty()
}

/// Counts characters, not bytes.
pub fn max_chars(value: &str, n: usize) -> bool {
    value.chars().count() <= n
}

pub fn min_chars(value: &str, n: usize) -> bool {
    value.chars().count() >= n
}

pub fn permitted_value<T: PartialEq>(value: &T, permitted: &[T]) -> bool {
    permitted.contains(value)
}

const EMAIL_LOCAL_SPECIALS: &str = ".!#$%&'*+/=?^_`{|}~-";

/// Structural email check: a local part of the usual permitted characters, then a domain of at
/// least two dot-separated labels, each 1–63 alphanumerics or inner hyphens.
pub fn is_email(value: &str) -> bool {
    if value.len() > 254 {
        return false;
    }
    let Some((local, domain)) = value.split_once('@') else {
        return false;
    };

    let local_ok = !local.is_empty()
        && local
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || EMAIL_LOCAL_SPECIALS.contains(c));

    let labels: Vec<&str> = domain.split('.').collect();
    let domain_ok = labels.len() >= 2
        && labels.iter().all(|label| {
            !label.is_empty()
                && label.len() <= 63
                && !label.starts_with('-')
                && !label.ends_with('-')
                && label.chars().all(|c| c.is_ascii_alphanumeric() || c == '-')
        });

    local_ok && domain_ok
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_field_error_wins() {
        let mut v = Validator::default();
        v.check_field(false, "title", "This field cannot be blank");
        v.check_field(false, "title", "This field cannot be more than 100 characters long");

        assert!(!v.valid());
        assert_eq!(v.field_error("title"), Some("This field cannot be blank"));
    }

    #[test]
    fn non_field_errors_invalidate() {
        let mut v = Validator::default();
        assert!(v.valid());

        v.add_non_field_error("Email or password is incorrect");
        assert!(!v.valid());
    }

    #[test]
    fn length_checks_count_characters() {
        assert!(max_chars("héllo", 5));
        assert!(!max_chars("héllo!", 5));
        assert!(min_chars("pa$$word", 8));
        assert!(!min_chars("short", 8));
        assert!(!not_blank("   "));
    }

    #[test]
    fn permitted_values() {
        assert!(permitted_value(&7, &[1, 7, 365]));
        assert!(!permitted_value(&30, &[1, 7, 365]));
    }

    #[test]
    fn email_shapes() {
        for ok in ["bob@example.com", "a.b+c@sub.example.co.uk", "x@a-b.io"] {
            assert!(is_email(ok), "{ok} should be accepted");
        }
        for bad in ["", "bob", "bob@example", "@example.com", "bob@-example.com", "bob@example..com", "bo b@example.com"] {
            assert!(!is_email(bad), "{bad} should be rejected");
        }
    }
}
