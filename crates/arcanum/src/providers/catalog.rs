use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ModelInfo {
    pub id: &'static str,
    pub label: &'static str,
    pub supports_reasoning: bool,
}

const fn model(id: &'static str) -> ModelInfo {
    ModelInfo {
        id,
        label: id,
        supports_reasoning: false,
    }
}

const fn reasoning_model(id: &'static str) -> ModelInfo {
    ModelInfo {
        supports_reasoning: true,
        ..model(id)
    }
}

const GROQ_MODELS: &[ModelInfo] = &[
    reasoning_model("qwen/qwen3-32b"),
    model("meta-llama/llama-4-scout-17b-16e-instruct"),
    model("deepseek-r1-distill-llama-70b"),
    model("moonshotai/kimi-k2-instruct"),
    model("allam-2-7b"),
    model("meta-llama/llama-guard-4-12b"),
    model("gemma2-9b-it"),
    model("llama-3.3-70b-versatile"),
    reasoning_model("openai/gpt-oss-20b"),
    model("whisper-large-v3-turbo"),
    model("groq/compound-mini"),
    model("meta-llama/llama-4-maverick-17b-128e-instruct"),
    model("playai-tts"),
    model("meta-llama/llama-prompt-guard-2-86m"),
    model("meta-llama/llama-prompt-guard-2-22m"),
    reasoning_model("openai/gpt-oss-120b"),
    model("groq/compound"),
    model("playai-tts-arabic"),
    model("whisper-large-v3"),
    model("moonshotai/kimi-k2-instruct-0905"),
    model("llama-3.1-8b-instant"),
];

/// Models offered by the Groq relay. Informational only: request model ids are
/// forwarded as-is without checking them against this list.
pub fn groq_models() -> &'static [ModelInfo] {
    GROQ_MODELS
}
