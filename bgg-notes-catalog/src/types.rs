use serde::{Deserialize, Serialize};

/// JSON body sent to the translation endpoint.
#[derive(Debug, Serialize)]
pub struct TranslateRequest<'a> {
    pub q: &'a str,
    pub target: &'a str,
}

/// Top-level response wrapper from the translation endpoint.
#[derive(Debug, Deserialize)]
pub struct TranslateResponse {
    pub data: TranslateData,
}

#[derive(Debug, Deserialize)]
pub struct TranslateData {
    #[serde(default)]
    pub translations: Vec<Translation>,
}

#[derive(Debug, Deserialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct Translation {
    pub translated_text: String,
}

impl TranslateResponse {
    /// The first returned translation, if the service returned any.
    pub fn first_text(self) -> Option<String> {
        self.data
            .translations
            .into_iter()
            .next()
            .map(|t| t.translated_text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_translate_response() {
        let json = r#"{"data":{"translations":[
            {"translatedText":"Hallo","detectedSourceLanguage":"en"},
            {"translatedText":"ignored"}
        ]}}"#;
        let resp: TranslateResponse = serde_json::from_str(json).unwrap();
        assert_eq!(resp.first_text().as_deref(), Some("Hallo"));
    }

    #[test]
    fn test_empty_translations() {
        let resp: TranslateResponse = serde_json::from_str(r#"{"data":{}}"#).unwrap();
        assert_eq!(resp.first_text(), None);
    }

    #[test]
    fn test_request_body_shape() {
        let body = serde_json::to_value(TranslateRequest {
            q: "Great game",
            target: "de",
        })
        .unwrap();
        assert_eq!(body, serde_json::json!({"q": "Great game", "target": "de"}));
    }
}
