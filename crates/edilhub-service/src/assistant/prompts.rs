//! Fixed prompt templates per assistant action.

use serde::Serialize;

use super::action::AssistantAction;

/// Spreadsheet content beyond this many characters is cut off.
const MAX_FILE_CONTENT_CHARS: usize = 50_000;

/// A chat-completion message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChatMessage {
    /// `system` or `user`.
    pub role: &'static str,
    /// Message text.
    pub content: String,
}

impl ChatMessage {
    fn system(content: &str) -> Self {
        Self {
            role: "system",
            content: content.to_string(),
        }
    }

    fn user(content: String) -> Self {
        Self {
            role: "user",
            content,
        }
    }
}

const ANALYZE_EXCEL_PROMPT: &str = "Sei un esperto di computi metrici per l'edilizia. \
Analizza il contenuto di un foglio Excel e individua le colonne che contengono codice, \
descrizione, unità di misura, quantità e prezzo unitario. \
Rispondi SOLO con JSON nel formato: \
{\"columns\": {\"code\": \"...\", \"description\": \"...\", \"unit\": \"...\", \"quantity\": \"...\", \"price\": \"...\"}, \
\"items\": [{\"code\": \"...\", \"description\": \"...\", \"unit\": \"...\", \"quantity\": 0, \"price\": 0}], \
\"notes\": \"...\"}";

const FIND_CODE_PROMPT: &str = "Sei un esperto di prezzari regionali per opere edili e impiantistiche. \
Data la descrizione di una lavorazione, suggerisci i codici di prezzario più pertinenti. \
Rispondi SOLO con JSON nel formato: \
{\"suggestions\": [{\"code\": \"...\", \"description\": \"...\", \"unit\": \"...\", \"confidence\": 0.0}]}";

const GROUP_ITEMS_PROMPT: &str = "Sei un esperto di contabilità di cantiere. \
Raggruppa le voci fornite in categorie di lavorazione omogenee (WBS). \
Rispondi SOLO con JSON nel formato: \
{\"groups\": [{\"name\": \"...\", \"items\": [\"...\"]}]}";

const SUGGEST_ITEMS_PROMPT: &str = "Sei un esperto di preventivazione edile. \
Date le voci già presenti in un preventivo, suggerisci le lavorazioni che mancano. \
Rispondi SOLO con JSON nel formato: \
{\"suggestions\": [{\"description\": \"...\", \"unit\": \"...\", \"reason\": \"...\"}]}";

const GENERIC_PROMPT: &str = "Sei un assistente per un gestionale di imprese edili. \
Rispondi in italiano in modo conciso e pratico.";

/// Build the message list sent upstream for `action`.
pub fn build_messages(
    action: &AssistantAction,
    data: &serde_json::Value,
    file_content: Option<&str>,
) -> Vec<ChatMessage> {
    let data = render_data(data);
    let (system, user) = match action {
        AssistantAction::AnalyzeExcel => {
            let content = truncate(file_content.unwrap_or_default(), MAX_FILE_CONTENT_CHARS);
            (
                ANALYZE_EXCEL_PROMPT,
                format!("Contesto: {data}\n\nContenuto del file:\n{content}"),
            )
        }
        AssistantAction::FindCode => (
            FIND_CODE_PROMPT,
            format!("Trova i codici per questa lavorazione: {data}"),
        ),
        AssistantAction::GroupItems => (
            GROUP_ITEMS_PROMPT,
            format!("Raggruppa queste voci:\n{data}"),
        ),
        AssistantAction::SuggestItems => (
            SUGGEST_ITEMS_PROMPT,
            format!("Voci presenti nel preventivo:\n{data}"),
        ),
        AssistantAction::Generic(_) => (GENERIC_PROMPT, data),
    };
    vec![ChatMessage::system(system), ChatMessage::user(user)]
}

/// Strings are sent verbatim, anything else as pretty JSON.
fn render_data(data: &serde_json::Value) -> String {
    match data {
        serde_json::Value::String(s) => s.clone(),
        serde_json::Value::Null => String::new(),
        other => serde_json::to_string_pretty(other).unwrap_or_else(|_| other.to_string()),
    }
}

fn truncate(s: &str, max_chars: usize) -> &str {
    match s.char_indices().nth(max_chars) {
        Some((idx, _)) => &s[..idx],
        None => s,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_find_code_includes_description() {
        let messages = build_messages(
            &AssistantAction::FindCode,
            &json!("posa cavo elettrico 3x2.5mm"),
            None,
        );
        assert_eq!(messages.len(), 2);
        assert_eq!(messages[0].role, "system");
        assert!(messages[0].content.contains("suggestions"));
        assert!(messages[1].content.ends_with("posa cavo elettrico 3x2.5mm"));
    }

    #[test]
    fn test_analyze_excel_includes_file_content() {
        let messages = build_messages(
            &AssistantAction::AnalyzeExcel,
            &json!({"sheet": "Computo"}),
            Some("Codice;Descrizione\nA.01;Scavo"),
        );
        assert!(messages[1].content.contains("A.01;Scavo"));
        assert!(messages[1].content.contains("\"sheet\""));
    }

    #[test]
    fn test_generic_forwards_data() {
        let messages = build_messages(
            &AssistantAction::Generic("chat".to_string()),
            &json!("Cos'è un SAL?"),
            None,
        );
        assert_eq!(messages[1].content, "Cos'è un SAL?");
    }

    #[test]
    fn test_truncate_respects_char_boundaries() {
        assert_eq!(truncate("àèìòù", 3), "àèì");
        assert_eq!(truncate("abc", 10), "abc");
    }
}
