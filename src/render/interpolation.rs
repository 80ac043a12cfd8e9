//! `${variable}` placeholder syntax.
//!
//! # Syntax
//!
//! - `${variable_name}` - replaced with the variable's value
//! - `$${escaped}` - produces literal `${escaped}` in output
//! - a `$` not followed by `{` is literal
//!
//! # Example
//!
//! ```
//! use vellum::render::{interpolate, Variables};
//!
//! let vars = Variables::new().with("name", "World");
//! assert_eq!(interpolate("Hello, ${name}!", &vars).unwrap(), "Hello, World!");
//! ```

use std::collections::BTreeSet;

use super::Variables;

/// A segment of a parsed template.
#[derive(Debug, Clone, PartialEq)]
pub enum Segment {
    /// Literal text
    Literal(String),
    /// Variable reference: ${name}
    Variable(String),
}

/// Parse template text into literal and variable segments.
///
/// Fails on a `${` with no closing brace or an empty name.
pub fn parse_template(input: &str) -> Result<Vec<Segment>, String> {
    let mut segments = Vec::new();
    let mut chars = input.chars().peekable();
    let mut current_literal = String::new();

    while let Some(c) = chars.next() {
        if c != '$' {
            current_literal.push(c);
            continue;
        }

        match chars.peek() {
            Some('$') => {
                chars.next();
                if chars.peek() == Some(&'{') {
                    // $${...} -> literal ${...}
                    chars.next();
                    current_literal.push_str("${");
                    for c in chars.by_ref() {
                        current_literal.push(c);
                        if c == '}' {
                            break;
                        }
                    }
                } else {
                    current_literal.push_str("$$");
                }
            }
            Some('{') => {
                chars.next();

                if !current_literal.is_empty() {
                    segments.push(Segment::Literal(std::mem::take(&mut current_literal)));
                }

                let mut name = String::new();
                let mut closed = false;
                for c in chars.by_ref() {
                    if c == '}' {
                        closed = true;
                        break;
                    }
                    name.push(c);
                }

                if !closed {
                    return Err(format!("unterminated placeholder '${{{}'", name));
                }
                let name = name.trim();
                if name.is_empty() {
                    return Err("empty placeholder '${}'".to_string());
                }

                segments.push(Segment::Variable(name.to_string()));
            }
            _ => current_literal.push(c),
        }
    }

    if !current_literal.is_empty() {
        segments.push(Segment::Literal(current_literal));
    }

    Ok(segments)
}

/// Extract all variable names referenced by a template.
pub fn extract_variables(input: &str) -> Result<BTreeSet<String>, String> {
    Ok(parse_template(input)?
        .into_iter()
        .filter_map(|seg| match seg {
            Segment::Variable(name) => Some(name),
            Segment::Literal(_) => None,
        })
        .collect())
}

/// Substitute every placeholder in `input` from `variables`.
///
/// Fails if the template is malformed or references an unknown variable.
pub fn interpolate(input: &str, variables: &Variables) -> Result<String, String> {
    let mut result = String::with_capacity(input.len());

    for segment in parse_template(input)? {
        match segment {
            Segment::Literal(text) => result.push_str(&text),
            Segment::Variable(name) => {
                let value = variables
                    .get(&name)
                    .ok_or_else(|| format!("undefined variable: ${{{}}}", name))?;
                result.push_str(value);
            }
        }
    }

    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_literal_only() {
        let result = parse_template("hello world").unwrap();
        assert_eq!(result, vec![Segment::Literal("hello world".to_string())]);
    }

    #[test]
    fn parse_variable_with_surrounding_text() {
        let result = parse_template("<h1>${title}</h1>").unwrap();
        assert_eq!(
            result,
            vec![
                Segment::Literal("<h1>".to_string()),
                Segment::Variable("title".to_string()),
                Segment::Literal("</h1>".to_string()),
            ]
        );
    }

    #[test]
    fn parse_adjacent_variables() {
        let result = parse_template("${a}${b}").unwrap();
        assert_eq!(
            result,
            vec![
                Segment::Variable("a".to_string()),
                Segment::Variable("b".to_string()),
            ]
        );
    }

    #[test]
    fn parse_escaped_dollar_brace() {
        let result = parse_template("$${NOT_INTERPOLATED}").unwrap();
        assert_eq!(
            result,
            vec![Segment::Literal("${NOT_INTERPOLATED}".to_string())]
        );
    }

    #[test]
    fn parse_dollar_without_brace() {
        let result = parse_template("price is $100 or $$5").unwrap();
        assert_eq!(
            result,
            vec![Segment::Literal("price is $100 or $$5".to_string())]
        );
    }

    #[test]
    fn parse_trims_placeholder_names() {
        let result = parse_template("${ name }").unwrap();
        assert_eq!(result, vec![Segment::Variable("name".to_string())]);
    }

    #[test]
    fn parse_empty_string() {
        assert!(parse_template("").unwrap().is_empty());
    }

    #[test]
    fn parse_rejects_unterminated_placeholder() {
        let err = parse_template("hello ${name").unwrap_err();
        assert!(err.contains("unterminated"));
    }

    #[test]
    fn parse_rejects_empty_placeholder() {
        assert!(parse_template("${}").is_err());
    }

    #[test]
    fn extract_variables_returns_unique_names() {
        let vars = extract_variables("${a} ${b} ${a}").unwrap();
        assert_eq!(vars.into_iter().collect::<Vec<_>>(), vec!["a", "b"]);
    }

    #[test]
    fn interpolate_replaces_variables() {
        let vars = Variables::new().with("name", "world");
        assert_eq!(interpolate("hello ${name}!", &vars).unwrap(), "hello world!");
    }

    #[test]
    fn interpolate_fails_on_unknown_variable() {
        let err = interpolate("${missing}", &Variables::new()).unwrap_err();
        assert!(err.contains("${missing}"));
    }

    #[test]
    fn interpolate_keeps_multibyte_text() {
        let vars = Variables::new().with("who", "Zoë");
        assert_eq!(interpolate("¡Hola ${who}! ✓", &vars).unwrap(), "¡Hola Zoë! ✓");
    }

    #[test]
    fn interpolate_keeps_double_dollar_literal() {
        let vars = Variables::new().with("amount", "5");
        assert_eq!(interpolate("cost: $$5", &vars).unwrap(), "cost: $$5");
        assert_eq!(
            interpolate("US$$${amount} and $${amount}", &vars).unwrap(),
            "US$$5 and ${amount}"
        );
    }
}
