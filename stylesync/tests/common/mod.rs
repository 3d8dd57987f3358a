#![allow(dead_code)]

use serde_json::{json, Value};

use stylesync::config::{
    Config, LlmConfig, LogFormat, ServerConfig, SessionConfig, WardrobeConfig,
};

/// Leading bytes of a PNG file; enough for MIME sniffing.
pub const PNG_BYTES: &[u8] = &[
    0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A, 0x00, 0x00, 0x00, 0x0D, 0x49, 0x48, 0x44, 0x52,
];

/// Leading bytes of a JPEG file.
pub const JPEG_BYTES: &[u8] = &[0xFF, 0xD8, 0xFF, 0xE0, 0x00, 0x10, 0x4A, 0x46, 0x49, 0x46];

pub fn llm_config_with_base_url(model: &str, base_url: String, max_retries: u32) -> LlmConfig {
    LlmConfig {
        model: model.to_string(),
        api_key: Some("test-key".to_string()),
        base_url: Some(base_url),
        timeout_secs: 5,
        max_retries,
        temperature: 0.1,
    }
}

pub fn test_config(llm: LlmConfig) -> Config {
    Config {
        server: ServerConfig {
            host: "127.0.0.1".to_string(),
            port: 0,
            log_format: LogFormat::Pretty,
        },
        llm,
        wardrobe: WardrobeConfig::default(),
        session: SessionConfig::default(),
    }
}

pub fn completion_body(content: &str) -> Value {
    json!({
        "id": "chatcmpl-test",
        "object": "chat.completion",
        "created": 1,
        "model": "gemini-2.0-flash",
        "choices": [
            {
                "index": 0,
                "message": {
                    "role": "assistant",
                    "content": content
                },
                "finish_reason": "stop"
            }
        ],
        "usage": {
            "prompt_tokens": 1,
            "completion_tokens": 1,
            "total_tokens": 2
        }
    })
}

pub fn api_error_body(message: &str, error_type: &str, code: &str) -> Value {
    json!({
        "error": {
            "message": message,
            "type": error_type,
            "param": Value::Null,
            "code": code
        }
    })
}

pub fn tshirt_json() -> Value {
    json!({
        "category": "T-Shirt",
        "description": "Plain crew neck tee in navy cotton",
        "color": ["Navy"],
        "gender": "Unisex",
        "fabric": "Cotton",
        "pattern": "Solid",
        "fit": "Regular Fit",
        "sleeve_length": "Short",
        "neck_type": "Round",
        "occasion": ["Casual"],
        "season": ["Summer", "Spring"],
        "features": ["Breathable"]
    })
}

pub fn shorts_json() -> Value {
    json!({
        "category": "Shorts",
        "description": "Khaki chino shorts with a flat front",
        "color": ["Khaki"],
        "gender": "Male",
        "fabric": "Cotton Twill",
        "pattern": "Solid",
        "fit": "Slim Fit",
        "sleeve_length": "N/A",
        "neck_type": "N/A",
        "occasion": ["Casual", "Beach/Pool"],
        "season": ["Summer"],
        "features": ["Pockets", "Belt Loops"]
    })
}

pub fn recommendation_json(ids: &[&str]) -> Value {
    json!({
        "recommended_items": ids,
        "reasoning": "A light tee keeps the look relaxed for a warm day.",
        "style_tips": ["Roll the sleeves once", "Add white sneakers"]
    })
}

/// Multipart body with one `file` field; returns `(content_type, body)`.
pub fn multipart_image(bytes: &[u8], file_name: &str) -> (String, Vec<u8>) {
    let boundary = "stylesync-test-boundary";
    let mut body = Vec::new();
    body.extend_from_slice(format!("--{boundary}\r\n").as_bytes());
    body.extend_from_slice(
        format!(
            "Content-Disposition: form-data; name=\"file\"; filename=\"{file_name}\"\r\n"
        )
        .as_bytes(),
    );
    body.extend_from_slice(b"Content-Type: application/octet-stream\r\n\r\n");
    body.extend_from_slice(bytes);
    body.extend_from_slice(format!("\r\n--{boundary}--\r\n").as_bytes());

    (format!("multipart/form-data; boundary={boundary}"), body)
}
