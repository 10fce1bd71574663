use crate::comparators::{Comparator, Range};
use crate::version_utils::parse_partial;

pub fn parse_npm_semver_ranges(range_str: &str) -> Result<Vec<Range>, String> {
    let range_str = range_str.trim();

    if range_str.is_empty() || range_str == "*" {
        return Ok(vec![Range::new(vec![Comparator::Wildcard])]);
    }

    let mut ranges = Vec::new();

    for clause in range_str.split("||").map(str::trim) {
        if clause.is_empty() {
            continue;
        }

        ranges.push(parse_range_clause(clause)?);
    }

    if ranges.is_empty() {
        return Ok(vec![Range::new(vec![Comparator::Wildcard])]);
    }

    Ok(ranges)
}

fn parse_range_clause(clause: &str) -> Result<Range, String> {
    let clause = clause.trim();

    if clause == "*" || clause.is_empty() {
        return Ok(Range::new(vec![Comparator::Wildcard]));
    }

    // 1.2.3 - 2.3.4 := >=1.2.3 <=2.3.4
    if let Some((from, to)) = clause.split_once(" - ") {
        return Ok(Range::new(vec![
            Comparator::GreaterThanOrEqual(parse_partial(from)?),
            Comparator::LessThanOrEqual(parse_partial(to)?),
        ]));
    }

    let mut comparators = Vec::new();
    let mut remaining = clause;

    while !remaining.trim().is_empty() {
        remaining = remaining.trim();

        let (operator, rest) = split_operator(remaining);
        let (version_str, next) = extract_version_and_remaining(rest)?;
        let version = parse_partial(version_str)?;

        comparators.push(match operator {
            ">=" => Comparator::GreaterThanOrEqual(version),
            "<=" => Comparator::LessThanOrEqual(version),
            ">" => Comparator::GreaterThan(version),
            "<" => Comparator::LessThan(version),
            "^" => Comparator::Compatible(version),
            "~" => Comparator::Tilde(version),
            _ if version.major.is_none() => Comparator::Wildcard,
            _ => Comparator::Exact(version),
        });
        remaining = next;
    }

    if comparators.is_empty() {
        return Ok(Range::new(vec![Comparator::Wildcard]));
    }

    Ok(Range::new(comparators))
}

fn split_operator(input: &str) -> (&str, &str) {
    for operator in [">=", "<=", ">", "<", "^", "~>", "~", "="] {
        if let Some(rest) = input.strip_prefix(operator) {
            let operator = if operator == "~>" { "~" } else { operator };
            return (operator, rest);
        }
    }
    ("", input)
}

fn extract_version_and_remaining(input: &str) -> Result<(&str, &str), String> {
    let input = input.trim_start();

    if input.is_empty() {
        return Err("Expected version string but found end of input".to_string());
    }

    let end_pos = input
        .char_indices()
        .find(|&(pos, c)| c.is_whitespace() || (pos > 0 && ['>', '<', '=', '^', '~'].contains(&c)))
        .map_or(input.len(), |(pos, _)| pos);

    let (version_str, remaining) = input.split_at(end_pos);
    let version_str = version_str.trim();

    if version_str.is_empty() {
        return Err("Empty version string found".to_string());
    }

    Ok((version_str, remaining))
}

#[cfg(test)]
mod tests {
    use super::*;
    use semver::Version;

    fn matches(range: &str, version: &str) -> bool {
        let version = Version::parse(version).unwrap();
        parse_npm_semver_ranges(range)
            .unwrap()
            .iter()
            .any(|r| r.matches(&version))
    }

    #[test]
    fn test_wildcards() {
        assert!(matches("*", "9.9.9"));
        assert!(matches("", "0.0.1"));
        assert!(matches("x", "3.1.4"));
    }

    #[test]
    fn test_compound_clause() {
        assert!(matches(">=1.0.0 <2.0.0", "1.9.9"));
        assert!(!matches(">=1.0.0 <2.0.0", "2.0.0"));
        assert!(matches(">=1.0.0<2.0.0", "1.2.0"));
    }

    #[test]
    fn test_or_clauses() {
        assert!(matches("1.x || 3.x", "3.2.0"));
        assert!(!matches("1.x || 3.x", "2.2.0"));
    }

    #[test]
    fn test_hyphen_range() {
        assert!(matches("1.2.0 - 1.4.0", "1.4.0"));
        assert!(!matches("1.2.0 - 1.4.0", "1.4.1"));
    }

    #[test]
    fn test_bare_version_is_exact() {
        assert!(matches("1.2.3", "1.2.3"));
        assert!(!matches("1.2.3", "1.2.4"));
        assert!(matches("=1.2.3", "1.2.3"));
    }

    #[test]
    fn test_invalid_range() {
        assert!(parse_npm_semver_ranges(">=").is_err());
        assert!(parse_npm_semver_ranges("^banana").is_err());
    }
}
