/// Splits `name@range` into its parts, keeping the leading `@` of scoped
/// names. A spec without a range resolves to `latest`.
#[must_use]
pub fn parse_pkg_spec(spec: &str) -> (String, String) {
    let spec = spec.trim();
    let (scope_prefix, rest) = match spec.strip_prefix('@') {
        Some(rest) if rest.contains('/') => ("@", rest),
        _ => ("", spec),
    };

    match rest.split_once('@') {
        Some((name, version)) if !name.is_empty() && !version.is_empty() => {
            (format!("{scope_prefix}{name}"), version.to_string())
        }
        Some((name, _)) if !name.is_empty() => {
            (format!("{scope_prefix}{name}"), "latest".to_string())
        }
        _ => (spec.to_string(), "latest".to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_name() {
        assert_eq!(
            parse_pkg_spec("lodash"),
            ("lodash".to_string(), "latest".to_string())
        );
    }

    #[test]
    fn test_plain_name_with_range() {
        assert_eq!(
            parse_pkg_spec("lodash@^4.17.0"),
            ("lodash".to_string(), "^4.17.0".to_string())
        );
    }

    #[test]
    fn test_scoped_name() {
        assert_eq!(
            parse_pkg_spec("@gtm-cli/init"),
            ("@gtm-cli/init".to_string(), "latest".to_string())
        );
        assert_eq!(
            parse_pkg_spec("@gtm-cli/init@1.x"),
            ("@gtm-cli/init".to_string(), "1.x".to_string())
        );
    }

    #[test]
    fn test_trailing_at_means_latest() {
        assert_eq!(
            parse_pkg_spec("chalk@"),
            ("chalk".to_string(), "latest".to_string())
        );
    }
}
