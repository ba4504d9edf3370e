//! Identifier conversions shared by both generators.

/// Title-case a JSON key into a type or field name.
///
/// The key is lowercased, split on every non-alphanumeric character, and each
/// word gets an uppercase initial: `db_config` -> `DbConfig`, `myKey` -> `Mykey`.
pub fn title_case(key: &str) -> String {
    let lowered = key.to_lowercase();
    let mut result: String = lowered
        .split(|c: char| !c.is_alphanumeric())
        .filter(|word| !word.is_empty())
        .map(capitalize)
        .collect();

    if result.is_empty() {
        result.push('_');
    } else if result.starts_with(|c: char| c.is_ascii_digit()) {
        result.insert(0, '_');
    }
    result
}

/// Camel-case an underscore separated SQL identifier with a capital initial.
///
/// `user_id` -> `UserId`, `createdAt` -> `CreatedAt`. Segment tails keep their case.
pub fn upper_camel_case(name: &str) -> String {
    name.split('_').map(capitalize).collect()
}

/// Convert PascalCase to snake_case.
///
/// Runs of capitals are treated as one word, so `HTTPRequest` -> `http_request`.
pub fn snake_case(name: &str) -> String {
    let chars: Vec<char> = name.chars().collect();
    let mut result = String::with_capacity(name.len() + 4);

    for (i, &ch) in chars.iter().enumerate() {
        if ch.is_uppercase() {
            let prev = i.checked_sub(1).map(|p| chars[p]);
            let next = chars.get(i + 1).copied();
            let boundary = match prev {
                Some(p) if p.is_lowercase() || p.is_ascii_digit() => true,
                Some(p) if p.is_uppercase() => next.is_some_and(char::is_lowercase),
                _ => false,
            };
            if boundary && !result.ends_with('_') {
                result.push('_');
            }
            result.extend(ch.to_lowercase());
        } else {
            result.push(ch);
        }
    }
    result
}

/// Uppercase the first character, leaving the rest untouched.
pub fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

const RUST_KEYWORDS: &[&str] = &[
    "as", "async", "await", "break", "const", "continue", "crate", "dyn", "else", "enum", "extern", "false",
    "fn", "for", "gen", "if", "impl", "in", "let", "loop", "match", "mod", "move", "mut", "pub", "ref",
    "return", "self", "static", "struct", "super", "trait", "true", "type", "unsafe", "use", "where", "while",
    "abstract", "become", "box", "do", "final", "macro", "override", "priv", "try", "typeof", "unsized",
    "virtual", "yield",
];

/// Whether `name` is reserved in Rust and needs a raw identifier.
pub fn is_rust_keyword(name: &str) -> bool {
    RUST_KEYWORDS.contains(&name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_title_case() {
        assert_eq!(title_case("db"), "Db");
        assert_eq!(title_case("host"), "Host");
        assert_eq!(title_case("db_config"), "DbConfig");
        assert_eq!(title_case("myKey"), "Mykey");
        assert_eq!(title_case("log-level"), "LogLevel");
        assert_eq!(title_case("2fa"), "_2fa");
        assert_eq!(title_case("__"), "_");
    }

    #[test]
    fn test_upper_camel_case() {
        assert_eq!(upper_camel_case("user_id"), "UserId");
        assert_eq!(upper_camel_case("id"), "Id");
        assert_eq!(upper_camel_case("createdAt"), "CreatedAt");
        assert_eq!(upper_camel_case("order_line_item"), "OrderLineItem");
    }

    #[test]
    fn test_snake_case() {
        assert_eq!(snake_case("UserId"), "user_id");
        assert_eq!(snake_case("Db"), "db");
        assert_eq!(snake_case("HTTPRequest"), "http_request");
        assert_eq!(snake_case("Order2Item"), "order2_item");
    }

    #[test]
    fn test_rust_keywords() {
        assert!(is_rust_keyword("type"));
        assert!(is_rust_keyword("match"));
        assert!(!is_rust_keyword("name"));
    }
}
