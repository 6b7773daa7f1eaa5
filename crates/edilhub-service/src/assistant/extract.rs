//! Best-effort JSON extraction from model output.

use serde_json::Value;

/// Extract the JSON payload from a model reply.
///
/// Tries a ```` ```json ```` fence, then a bare ```` ``` ```` fence, then
/// the outermost `{…}` span and finally the outermost `[…]` span. If
/// nothing parses, the reply is returned as a JSON string.
pub fn extract_result(content: &str) -> Value {
    let candidates = [
        fenced(content, "```json"),
        fenced(content, "```"),
        spanned(content, '{', '}'),
        spanned(content, '[', ']'),
    ];
    candidates
        .into_iter()
        .flatten()
        .find_map(|candidate| serde_json::from_str(candidate.trim()).ok())
        .unwrap_or_else(|| Value::String(content.to_string()))
}

fn fenced<'a>(content: &'a str, opener: &str) -> Option<&'a str> {
    let start = content.find(opener)? + opener.len();
    let rest = &content[start..];
    let end = rest.find("```")?;
    Some(&rest[..end])
}

fn spanned(content: &str, open: char, close: char) -> Option<&str> {
    let start = content.find(open)?;
    let end = content.rfind(close)?;
    (end > start).then(|| &content[start..=end])
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_json_fence() {
        let reply = "Ecco i codici:\n```json\n{\"suggestions\": [{\"code\": \"E.01\"}]}\n```\nFine.";
        assert_eq!(extract_result(reply), json!({"suggestions": [{"code": "E.01"}]}));
    }

    #[test]
    fn test_bare_fence() {
        let reply = "```\n[1, 2, 3]\n```";
        assert_eq!(extract_result(reply), json!([1, 2, 3]));
    }

    #[test]
    fn test_raw_braces() {
        let reply = "Risultato: {\"groups\": []} spero sia utile";
        assert_eq!(extract_result(reply), json!({"groups": []}));
    }

    #[test]
    fn test_unparseable_returns_raw_string() {
        let reply = "Non ho trovato codici pertinenti {forse}";
        assert_eq!(extract_result(reply), json!(reply));
    }

    #[test]
    fn test_broken_fence_falls_through_to_braces() {
        let reply = "```json\nnon json\n``` ma qui {\"ok\": true}";
        assert_eq!(extract_result(reply), json!({"ok": true}));
    }

    #[test]
    fn test_bracketed_word_before_object() {
        let reply = "Vedi voce [A.01] sotto: {\"suggestions\": []}";
        assert_eq!(extract_result(reply), json!({"suggestions": []}));
    }

    #[test]
    fn test_bare_array_without_object() {
        let reply = "Gruppi trovati: [\"scavi\", \"murature\"].";
        assert_eq!(extract_result(reply), json!(["scavi", "murature"]));
    }
}
