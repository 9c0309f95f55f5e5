//! Identifier case transforms used by template helpers and derived
//! context variables.
//!
//! All transforms share one word-splitting rule so that
//! `my-app`, `my_app`, `myApp` and `MyApp` normalise identically.

/// Convert a string to snake_case.
///
/// | Input | Output |
/// |-------|--------|
/// | "MyApp" | "my_app" |
/// | "my-app" | "my_app" |
/// | "HTTPRequest" | "http_request" |
pub fn to_snake(s: &str) -> String {
    split_words(s).join("_")
}

/// Convert a string to kebab-case.
///
/// Same as [`to_snake`] but joins with `-`. Used for slugs, directory names
/// and binary names.
pub fn to_kebab(s: &str) -> String {
    split_words(s).join("-")
}

/// Convert a string to CamelCase (upper camel).
///
/// | Input | Output |
/// |-------|--------|
/// | "my-app" | "MyApp" |
/// | "HTTPRequest" | "HttpRequest" |
pub fn to_camel(s: &str) -> String {
    split_words(s)
        .into_iter()
        .map(|w| capitalize(&w))
        .collect()
}

/// Capitalize each word, joined with single spaces.
///
/// `"orders api"` → `"Orders Api"`. Used for synthesized pack display names.
pub fn to_title(s: &str) -> String {
    split_words(s)
        .into_iter()
        .map(|w| capitalize(&w))
        .collect::<Vec<_>>()
        .join(" ")
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => {
            let mut out = String::new();
            // to_uppercase handles Unicode correctly (e.g., "ß" -> "SS")
            out.extend(first.to_uppercase());
            out.push_str(chars.as_str());
            out
        }
        None => String::new(),
    }
}

/// Split a string into lowercase words based on casing and separators.
///
/// ## Word Boundary Detection
///
/// 1. **Explicit separators:** `_`, `-`, whitespace → always split
/// 2. **Case transition (camelCase):** `aB` → split between `a` and `B`
/// 3. **Acronym boundary:** `HTTPRequest` → split between `P` and `R`
///    (detected by `Upper Upper Lower` pattern)
pub fn split_words(input: &str) -> Vec<String> {
    let mut words = Vec::new();
    let mut current = String::new();

    // Peekable allows looking ahead for boundary detection without consuming
    let mut chars = input.chars().peekable();

    while let Some(c) = chars.next() {
        // Rule 1: Explicit separators always end the current word
        if c == '_' || c == '-' || c.is_whitespace() {
            if !current.is_empty() {
                words.push(current.to_lowercase());
                current.clear();
            }
            continue;
        }

        if let Some(next) = chars.peek() {
            // Rule 2: camelCase transition (lowercase -> uppercase)
            if c.is_lowercase() && next.is_uppercase() {
                current.push(c);
                words.push(current.to_lowercase());
                current.clear();
                continue;
            }

            // Rule 3: Acronym boundary
            // "HTTPServer" → "HTTP" + "Server"
            if c.is_uppercase()
                && next.is_uppercase()
                && chars.clone().nth(1).is_some_and(|n| n.is_lowercase())
            {
                current.push(c);
                words.push(current.to_lowercase());
                current.clear();
                continue;
            }
        }

        current.push(c);
    }

    // Don't forget the last word
    if !current.is_empty() {
        words.push(current.to_lowercase());
    }

    words
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn splits_separators() {
        assert_eq!(split_words("my-app_name test"), vec!["my", "app", "name", "test"]);
    }

    #[test]
    fn splits_camel_case() {
        assert_eq!(split_words("myAwesomeApp"), vec!["my", "awesome", "app"]);
    }

    #[test]
    fn splits_acronyms() {
        assert_eq!(split_words("XMLHttpRequest"), vec!["xml", "http", "request"]);
        assert_eq!(split_words("HTTPServer"), vec!["http", "server"]);
    }

    #[test]
    fn snake_case() {
        assert_eq!(to_snake("MyApp"), "my_app");
        assert_eq!(to_snake("my-app"), "my_app");
        assert_eq!(to_snake("orders"), "orders");
    }

    #[test]
    fn kebab_case() {
        assert_eq!(to_kebab("OrdersApi"), "orders-api");
        assert_eq!(to_kebab("orders_api"), "orders-api");
    }

    #[test]
    fn camel_case() {
        assert_eq!(to_camel("my-app"), "MyApp");
        assert_eq!(to_camel("HTTPRequest"), "HttpRequest");
    }

    #[test]
    fn title_case() {
        assert_eq!(to_title("python"), "Python");
        assert_eq!(to_title("orders api"), "Orders Api");
    }

    #[test]
    fn empty_input() {
        assert!(split_words("").is_empty());
        assert_eq!(to_snake(""), "");
        assert_eq!(to_title(""), "");
    }
}
