use serde::{Deserialize, Serialize};
use thiserror::Error;

/// 内容类型
#[derive(Debug, Deserialize, Serialize, Clone, Copy, PartialEq, Eq, Default)]
pub enum ContentType {
    #[default]
    BlogPost,
    Article,
    ResearchPaper,
    TechnicalGuide,
}

impl std::fmt::Display for ContentType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let str = match self {
            ContentType::BlogPost => "Blog Post",
            ContentType::Article => "Article",
            ContentType::ResearchPaper => "Research Paper",
            ContentType::TechnicalGuide => "Technical Guide",
        };
        write!(f, "{}", str)
    }
}

impl std::str::FromStr for ContentType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match normalize_choice(s).as_str() {
            "blog post" | "blog" => Ok(ContentType::BlogPost),
            "article" => Ok(ContentType::Article),
            "research paper" | "paper" => Ok(ContentType::ResearchPaper),
            "technical guide" | "guide" => Ok(ContentType::TechnicalGuide),
            _ => Err(format!("Unknown content type: {}", s)),
        }
    }
}

/// 目标读者
#[derive(Debug, Deserialize, Serialize, Clone, Copy, PartialEq, Eq, Default)]
pub enum TargetAudience {
    #[default]
    General,
    Technical,
    Business,
    Academic,
}

impl std::fmt::Display for TargetAudience {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let str = match self {
            TargetAudience::General => "General",
            TargetAudience::Technical => "Technical",
            TargetAudience::Business => "Business",
            TargetAudience::Academic => "Academic",
        };
        write!(f, "{}", str)
    }
}

impl std::str::FromStr for TargetAudience {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match normalize_choice(s).as_str() {
            "general" => Ok(TargetAudience::General),
            "technical" => Ok(TargetAudience::Technical),
            "business" => Ok(TargetAudience::Business),
            "academic" => Ok(TargetAudience::Academic),
            _ => Err(format!("Unknown target audience: {}", s)),
        }
    }
}

fn normalize_choice(s: &str) -> String {
    s.trim().to_lowercase().replace(['-', '_'], " ")
}

/// 请求参数校验错误
#[derive(Debug, Error, Clone, PartialEq)]
pub enum RequestError {
    #[error("Please enter a topic before generating content.")]
    EmptyTopic,
    #[error("temperature must be within [0, 1], got {0}")]
    TemperatureOutOfRange(f64),
    #[error("max words must be within [{min}, {max}], got {value}", min = GenerationRequest::MIN_WORDS, max = GenerationRequest::MAX_WORDS)]
    MaxWordsOutOfRange { value: u32 },
}

/// 一次内容生成请求，构造后不可变
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GenerationRequest {
    topic: String,
    content_type: ContentType,
    target_audience: TargetAudience,
    temperature: f64,
    max_words: u32,
}

impl GenerationRequest {
    pub const MIN_WORDS: u32 = 500;
    pub const MAX_WORDS: u32 = 5000;
    pub const DEFAULT_WORDS: u32 = 1500;
    pub const DEFAULT_TEMPERATURE: f64 = 0.7;

    pub fn new(
        topic: &str,
        content_type: ContentType,
        target_audience: TargetAudience,
        temperature: f64,
        max_words: u32,
    ) -> Result<Self, RequestError> {
        let topic = topic.trim();
        if topic.is_empty() {
            return Err(RequestError::EmptyTopic);
        }
        if !(0.0..=1.0).contains(&temperature) {
            return Err(RequestError::TemperatureOutOfRange(temperature));
        }
        if !(Self::MIN_WORDS..=Self::MAX_WORDS).contains(&max_words) {
            return Err(RequestError::MaxWordsOutOfRange { value: max_words });
        }

        Ok(Self {
            topic: topic.to_string(),
            content_type,
            target_audience,
            temperature,
            max_words,
        })
    }

    pub fn topic(&self) -> &str {
        &self.topic
    }

    pub fn content_type(&self) -> ContentType {
        self.content_type
    }

    pub fn target_audience(&self) -> TargetAudience {
        self.target_audience
    }

    pub fn temperature(&self) -> f64 {
        self.temperature
    }

    pub fn max_words(&self) -> u32 {
        self.max_words
    }
}

/// 流水线最终产出的Markdown文本
#[derive(Debug, Clone, PartialEq)]
pub struct GeneratedArtifact {
    content: String,
    word_count: usize,
}

impl GeneratedArtifact {
    pub fn new(content: String) -> Self {
        let word_count = count_words(&content);
        Self {
            content,
            word_count,
        }
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    pub fn word_count(&self) -> usize {
        self.word_count
    }

    /// 字数上限只是对模型的软约束，这里只做事后度量
    pub fn exceeds(&self, max_words: u32) -> bool {
        self.word_count > max_words as usize
    }
}

/// 按空白切分统计词数
pub fn count_words(text: &str) -> usize {
    text.split_whitespace().count()
}
