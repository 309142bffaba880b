//! Email address syntax check for `user_id`.

use std::sync::LazyLock;

use regex::Regex;

/// Longest address accepted (RFC 5321 forward-path limit).
const MAX_EMAIL_LEN: usize = 254;
/// Longest local part accepted.
const MAX_LOCAL_LEN: usize = 64;

/// Dot-atom local part, then `@`, then two or more LDH domain labels.
///
/// Letters and digits may be non-ASCII (internationalized addresses);
/// labels never start or end with a hyphen and never contain `_`.
static EMAIL_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(concat!(
        r"^[\w!#$%&'*+/=?^`{|}~-]+(?:\.[\w!#$%&'*+/=?^`{|}~-]+)*",
        r"@(?:[\p{L}\p{N}](?:[\p{L}\p{N}-]{0,61}[\p{L}\p{N}])?\.)+",
        r"[\p{L}\p{N}](?:[\p{L}\p{N}-]{0,61}[\p{L}\p{N}])?$",
    ))
    .expect("email regex must compile")
});

/// Returns `true` if `candidate` is a syntactically valid email address.
///
/// Only the shape is checked; the value is never normalized.
pub fn is_valid_email(candidate: &str) -> bool {
    if candidate.len() > MAX_EMAIL_LEN || !EMAIL_RE.is_match(candidate) {
        return false;
    }
    let Some((local, domain)) = candidate.rsplit_once('@') else {
        return false;
    };
    // Top-level domains are never all-numeric.
    let tld = domain.rsplit('.').next().unwrap_or_default();
    local.len() <= MAX_LOCAL_LEN && !tld.chars().all(|c| c.is_ascii_digit())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_common_addresses() {
        for ok in [
            "a@b.com",
            "u@example.com",
            "first.last+tag@mail.example.co.uk",
            "o'brien@example.ie",
            "user_name@sub-domain.example.org",
            "joão@exemplo.com.br",
            "x@a1.io",
        ] {
            assert!(is_valid_email(ok), "{ok} should be accepted");
        }
    }

    #[test]
    fn rejects_malformed_addresses() {
        for bad in [
            "",
            "not-an-email",
            "@b.com",
            "a@",
            "a@b",
            "a@@b.com",
            "a@b@c.com",
            "a b@c.com",
            "a@b .com",
            " a@b.com",
            "a@b.com\n",
            "a@.com",
            "a@b.",
            "a@b..com",
            "a..b@c.com",
            ".a@b.com",
            "a.@b.com",
            "<x>@c.com",
            "a,b@c.com",
            "a\"b@c.com",
            "a@-b.com",
            "a@b-.com",
            "a@b_c.com",
            "a@1.2",
            "a@example.123",
        ] {
            assert!(!is_valid_email(bad), "{bad:?} should be rejected");
        }
    }

    #[test]
    fn enforces_length_limits() {
        let long_local = format!("{}@example.com", "a".repeat(MAX_LOCAL_LEN + 1));
        assert!(!is_valid_email(&long_local));

        let max_local = format!("{}@example.com", "a".repeat(MAX_LOCAL_LEN));
        assert!(is_valid_email(&max_local));

        let long_label = format!("a@{}.com", "b".repeat(64));
        assert!(!is_valid_email(&long_label));

        let long_total = format!("a@{}.com", vec!["c".repeat(60); 5].join("."));
        assert!(long_total.len() > MAX_EMAIL_LEN);
        assert!(!is_valid_email(&long_total));
    }
}
