//! Question and illustration generation over the Gemini `generateContent` REST API.

use std::sync::atomic::{AtomicU64, Ordering};

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use serde_json::{Value, json};

use crate::config::ProviderConfig;
use crate::provider::{ImageReference, ProviderError, QuestionProvider, VisualProvider};
use crate::question::{GrammarTopic, Question, QuestionPayload};

pub struct GeminiClient {
    client: Client,
    config: ProviderConfig,
    issued: AtomicU64,
}

impl GeminiClient {
    #[must_use]
    pub fn new(config: ProviderConfig) -> Self {
        #[cfg(not(target_arch = "wasm32"))]
        let client = Client::builder()
            .timeout(config.timeout())
            .build()
            .unwrap_or_else(|_| Client::new());
        #[cfg(target_arch = "wasm32")]
        let client = Client::new();

        Self {
            client,
            config,
            issued: AtomicU64::new(0),
        }
    }

    #[must_use]
    pub const fn config(&self) -> &ProviderConfig {
        &self.config
    }

    async fn generate_content(&self, model: &str, body: &Value) -> Result<Response, ProviderError> {
        let url = format!("{}/models/{model}:generateContent", self.config.base_url);
        let response = self
            .client
            .post(url)
            .header("x-goog-api-key", &self.config.api_key)
            .json(body)
            .send()
            .await
            .map_err(|err| self.request_error(&err))?;

        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .map_err(|err| self.request_error(&err))?;
            return Err(ProviderError::Status {
                status: status.as_u16(),
                body,
            });
        }

        response
            .json()
            .await
            .map_err(|err| ProviderError::InvalidResponse(err.to_string()))
    }

    fn request_error(&self, err: &reqwest::Error) -> ProviderError {
        if err.is_timeout() {
            ProviderError::Timeout {
                secs: self.config.timeout_secs,
            }
        } else {
            ProviderError::Request(err.to_string())
        }
    }
}

#[async_trait(?Send)]
impl QuestionProvider for GeminiClient {
    async fn generate_question(&self, topic: GrammarTopic) -> Result<Question, ProviderError> {
        let body = question_request(topic);
        let response = self
            .generate_content(&self.config.question_model, &body)
            .await?;
        let n = self.issued.fetch_add(1, Ordering::Relaxed);
        parse_question(response, topic, format!("gemini-{}-{n}", topic.slug()))
    }
}

#[async_trait(?Send)]
impl VisualProvider for GeminiClient {
    async fn generate_visual(&self, region_name: &str) -> Result<ImageReference, ProviderError> {
        let body = visual_request(region_name);
        let response = self
            .generate_content(&self.config.visual_model, &body)
            .await?;
        parse_visual(response)
    }
}

#[derive(Debug, Deserialize)]
struct Response {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    #[serde(default)]
    content: Option<Content>,
}

#[derive(Debug, Deserialize)]
struct Content {
    #[serde(default)]
    parts: Vec<Part>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Part {
    #[serde(default)]
    text: Option<String>,
    #[serde(default)]
    inline_data: Option<InlineData>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct InlineData {
    #[serde(default)]
    mime_type: Option<String>,
    data: String,
}

impl Response {
    fn into_parts(self) -> impl Iterator<Item = Part> {
        self.candidates
            .into_iter()
            .take(1)
            .filter_map(|c| c.content)
            .flat_map(|c| c.parts)
    }
}

fn question_prompt(topic: GrammarTopic) -> String {
    let mut prompt = format!(
        "Generate a single A2-level English grammar question for 12-year-olds.\n\
         Topic: {}.\n",
        topic.label()
    );
    if topic.is_reading() {
        prompt.push_str(
            "Provide a very short 2-3 sentence interesting fact about Canada as the reading \
             passage and ask a comprehension question about it.\n",
        );
    }
    prompt.push_str(
        "Make it fun and Canadian themed (e.g. using names like Maple, Jasper, or Toronto).",
    );
    prompt
}

fn question_request(topic: GrammarTopic) -> Value {
    json!({
        "contents": [{ "parts": [{ "text": question_prompt(topic) }] }],
        "generationConfig": {
            "responseMimeType": "application/json",
            "responseSchema": {
                "type": "OBJECT",
                "properties": {
                    "text": { "type": "STRING" },
                    "options": {
                        "type": "ARRAY",
                        "items": { "type": "STRING" },
                        "description": "Provide exactly 4 options for multiple choice questions."
                    },
                    "correctAnswer": { "type": "STRING" },
                    "explanation": { "type": "STRING" },
                    "readingPassage": {
                        "type": "STRING",
                        "description": "Only for reading comprehension tasks."
                    }
                },
                "required": ["text", "correctAnswer", "explanation"]
            }
        }
    })
}

fn visual_request(region_name: &str) -> Value {
    let prompt = format!(
        "A beautiful, stylized, cartoon-like illustration of {region_name} in Canada, \
         vibrant colors, friendly for children age 12, high quality, panoramic view."
    );
    json!({
        "contents": [{ "parts": [{ "text": prompt }] }],
        "generationConfig": {
            "responseModalities": ["IMAGE"],
            "imageConfig": { "aspectRatio": "16:9" }
        }
    })
}

fn parse_question(
    response: Response,
    topic: GrammarTopic,
    id: String,
) -> Result<Question, ProviderError> {
    let text: String = response.into_parts().filter_map(|p| p.text).collect();
    if text.trim().is_empty() {
        return Err(ProviderError::InvalidResponse(
            "response carried no text".to_string(),
        ));
    }
    let payload: QuestionPayload = serde_json::from_str(text.trim())
        .map_err(|err| ProviderError::InvalidResponse(format!("question JSON: {err}")))?;
    Question::from_payload(id, topic, payload)
}

fn parse_visual(response: Response) -> Result<ImageReference, ProviderError> {
    let inline = response
        .into_parts()
        .find_map(|p| p.inline_data)
        .ok_or_else(|| ProviderError::InvalidResponse("response carried no image".to_string()))?;
    Ok(match inline.mime_type.as_deref() {
        Some(mime) if mime != "image/png" => {
            ImageReference::new(format!("data:{mime};base64,{}", inline.data))
        }
        _ => ImageReference::from_inline_png(&inline.data),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn response(json: &str) -> Response {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn question_request_asks_for_structured_json() {
        let body = question_request(GrammarTopic::Quantifiers);
        let config = &body["generationConfig"];
        assert_eq!(config["responseMimeType"], "application/json");
        assert_eq!(
            config["responseSchema"]["required"],
            json!(["text", "correctAnswer", "explanation"])
        );
        let prompt = body["contents"][0]["parts"][0]["text"].as_str().unwrap();
        assert!(prompt.contains("Much, Many, Little, Few"));
        assert!(!prompt.contains("reading passage"));
    }

    #[test]
    fn reading_prompt_requests_a_passage() {
        let prompt = question_prompt(GrammarTopic::ReadingComprehension);
        assert!(prompt.contains("reading passage"));
    }

    #[test]
    fn visual_request_is_wide_image_only() {
        let body = visual_request("The Prairies");
        assert_eq!(body["generationConfig"]["imageConfig"]["aspectRatio"], "16:9");
        assert_eq!(body["generationConfig"]["responseModalities"], json!(["IMAGE"]));
        let prompt = body["contents"][0]["parts"][0]["text"].as_str().unwrap();
        assert!(prompt.contains("The Prairies in Canada"));
    }

    #[test]
    fn question_text_part_is_validated() {
        let raw = response(
            r#"{"candidates":[{"content":{"parts":[{"text":"{\"text\":\"Maple is taller ___ Jasper.\",\"options\":[\"than\",\"as\"],\"correctAnswer\":\"than\",\"explanation\":\"Comparatives use than.\"}"}]}}]}"#,
        );
        let q = parse_question(raw, GrammarTopic::Comparisons, "gemini-comparisons-0".into())
            .unwrap();
        assert_eq!(q.correct_answer, "than");
        assert_eq!(q.options, vec!["than", "as"]);
        assert_eq!(q.id, "gemini-comparisons-0");
    }

    #[test]
    fn malformed_question_text_is_invalid() {
        let raw = response(r#"{"candidates":[{"content":{"parts":[{"text":"not json"}]}}]}"#);
        let err = parse_question(raw, GrammarTopic::Comparisons, "x".into()).unwrap_err();
        assert!(matches!(err, ProviderError::InvalidResponse(_)));

        let empty = response(r#"{"candidates":[]}"#);
        assert!(parse_question(empty, GrammarTopic::Comparisons, "x".into()).is_err());
    }

    #[test]
    fn inline_image_becomes_data_url() {
        let raw = response(
            r#"{"candidates":[{"content":{"parts":[{"text":"here you go"},{"inlineData":{"mimeType":"image/png","data":"iVBOR"}}]}}]}"#,
        );
        let image = parse_visual(raw).unwrap();
        assert_eq!(image.as_str(), "data:image/png;base64,iVBOR");

        let jpeg = response(
            r#"{"candidates":[{"content":{"parts":[{"inlineData":{"mimeType":"image/jpeg","data":"/9j/"}}]}}]}"#,
        );
        assert_eq!(
            parse_visual(jpeg).unwrap().as_str(),
            "data:image/jpeg;base64,/9j/"
        );
    }

    #[test]
    fn missing_image_is_an_error() {
        let raw = response(r#"{"candidates":[{"content":{"parts":[{"text":"sorry"}]}}]}"#);
        assert!(matches!(
            parse_visual(raw),
            Err(ProviderError::InvalidResponse(_))
        ));
    }
}
