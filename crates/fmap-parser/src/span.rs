//! Balanced-brace recovery of a method's source text.
//!
//! Purely textual: braces inside string literals or comments are counted
//! like any other. Unterminated spans come back partial instead of failing.

/// Recover the text of the declaration starting at `start_line` (1-based).
///
/// Lines are consumed until the brace balance returns to zero after at
/// least one `{` has been seen; the closing line is included. If no `{`
/// is ever found, or the text ends with the balance still positive, every
/// consumed line is returned. A `start_line` of 0 or past the end of the
/// text yields an empty string.
#[must_use]
pub fn extract_body(full_text: &str, start_line: usize) -> String {
    let Some(start) = start_line.checked_sub(1) else {
        return String::new();
    };

    let mut balance: i64 = 0;
    let mut found_start = false;
    let mut lines = Vec::new();

    for line in full_text.split('\n').skip(start) {
        lines.push(line);
        let opens = line.matches('{').count();
        let closes = line.matches('}').count();
        balance += count_as_i64(opens) - count_as_i64(closes);
        if opens > 0 {
            found_start = true;
        }
        if found_start && balance == 0 {
            break;
        }
    }

    lines.join("\n")
}

/// Whether a recovered span has as many `}` as `{`.
#[must_use]
pub fn is_balanced(span: &str) -> bool {
    span.matches('{').count() == span.matches('}').count()
}

fn count_as_i64(count: usize) -> i64 {
    i64::try_from(count).unwrap_or(i64::MAX)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const SOURCE: &str = "class A {\n    double f(double x) {\n        if (x > 0) {\n            return x;\n        }\n        return -x;\n    }\n\n    void g() {}\n}";

    #[test]
    fn stops_when_balance_returns_to_zero() {
        let body = extract_body(SOURCE, 2);
        assert_eq!(
            body,
            "    double f(double x) {\n        if (x > 0) {\n            return x;\n        }\n        return -x;\n    }"
        );
        assert!(is_balanced(&body));
        assert!(body.lines().next().unwrap().contains('{'));
    }

    #[test]
    fn one_line_method() {
        assert_eq!(extract_body(SOURCE, 9), "    void g() {}");
    }

    #[test]
    fn brace_on_following_line() {
        let src = "int f()\n{\n  return 1;\n}\ntrailing";
        assert_eq!(extract_body(src, 1), "int f()\n{\n  return 1;\n}");
    }

    #[test]
    fn closing_and_reopening_on_one_line() {
        let src = "void f() {\n  if (a) {\n  } else {\n  }\n}\nafter";
        assert_eq!(extract_body(src, 1), "void f() {\n  if (a) {\n  } else {\n  }\n}");
    }

    #[test]
    fn unterminated_span_returns_partial_lines() {
        let src = "void f() {\n  int x = 1;\n";
        assert_eq!(extract_body(src, 1), "void f() {\n  int x = 1;\n");
    }

    #[test]
    fn no_opening_brace_consumes_to_end() {
        let src = "abstract double area();\nint y;";
        assert_eq!(extract_body(src, 1), src);
    }

    #[test]
    fn out_of_range_start_line_is_empty() {
        assert_eq!(extract_body(SOURCE, 0), "");
        assert_eq!(extract_body(SOURCE, 500), "");
    }

    #[test]
    fn whole_class_from_line_one() {
        let body = extract_body(SOURCE, 1);
        assert_eq!(body, SOURCE);
        assert!(is_balanced(&body));
    }
}
