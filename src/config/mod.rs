use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};

/// 默认配置文件名
pub const DEFAULT_CONFIG_FILE: &str = "content-studio.toml";

/// LLM Provider类型
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Default)]
pub enum LLMProvider {
    #[serde(rename = "gemini")]
    #[default]
    Gemini,
    #[serde(rename = "openai")]
    OpenAI,
    #[serde(rename = "anthropic")]
    Anthropic,
}

impl std::fmt::Display for LLMProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LLMProvider::Gemini => write!(f, "gemini"),
            LLMProvider::OpenAI => write!(f, "openai"),
            LLMProvider::Anthropic => write!(f, "anthropic"),
        }
    }
}

impl std::str::FromStr for LLMProvider {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "gemini" | "google" => Ok(LLMProvider::Gemini),
            "openai" => Ok(LLMProvider::OpenAI),
            "anthropic" | "claude" => Ok(LLMProvider::Anthropic),
            _ => Err(format!("Unknown provider: {}", s)),
        }
    }
}

impl LLMProvider {
    /// 该Provider默认读取的API KEY环境变量
    pub fn default_key_env(&self) -> &'static str {
        match self {
            LLMProvider::Gemini => "GEMINI_API_KEY",
            LLMProvider::OpenAI => "OPENAI_API_KEY",
            LLMProvider::Anthropic => "ANTHROPIC_API_KEY",
        }
    }

    /// 该Provider的API KEY固定前缀
    pub fn default_key_prefix(&self) -> &'static str {
        match self {
            LLMProvider::Gemini => "AIza",
            LLMProvider::OpenAI => "sk-",
            LLMProvider::Anthropic => "sk-ant-",
        }
    }

    /// 该Provider的默认模型
    pub fn default_model(&self) -> &'static str {
        match self {
            LLMProvider::Gemini => "gemini-1.5-flash",
            LLMProvider::OpenAI => "gpt-4o-mini",
            LLMProvider::Anthropic => "claude-3-5-haiku-latest",
        }
    }
}

/// 应用程序配置
#[derive(Debug, Deserialize, Serialize, Clone)]
#[serde(default)]
pub struct Config {
    /// 下载文件的输出路径
    pub output_path: PathBuf,

    /// 临时工作目录的父目录，渲染期间在其下创建 temp_files
    pub temp_root: PathBuf,

    /// LLM模型配置
    pub llm: LLMConfig,

    /// 凭证校验配置
    pub credential: CredentialConfig,

    /// 搜索工具配置
    pub search: SearchConfig,

    /// 文档渲染配置
    pub render: RenderConfig,

    /// 交互模式：同一会话内连续处理多个请求
    pub interactive: bool,

    /// 是否启用详细日志
    pub verbose: bool,
}

/// LLM模型配置
#[derive(Debug, Deserialize, Serialize, Clone)]
#[serde(default)]
pub struct LLMConfig {
    /// LLM Provider类型
    pub provider: LLMProvider,

    /// 模型标识
    pub model: String,

    /// 最大tokens
    pub max_tokens: u32,

    /// 带工具的Agent最多进行的对话轮数
    pub max_iterations: usize,
}

/// 凭证校验配置，唯一的校验规则来源
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
#[serde(default)]
pub struct CredentialConfig {
    /// 读取凭证的环境变量
    pub env_var: String,

    /// 凭证必须以此前缀开头，为None时不做格式校验
    pub required_prefix: Option<String>,
}

/// 网络搜索工具配置
#[derive(Debug, Deserialize, Serialize, Clone)]
#[serde(default)]
pub struct SearchConfig {
    /// 搜索服务API KEY所在的环境变量
    pub api_key_env: String,

    /// 搜索服务地址
    pub endpoint: String,

    /// 每次搜索返回的结果数
    pub result_count: usize,
}

/// 文档渲染配置
#[derive(Debug, Deserialize, Serialize, Clone)]
#[serde(default)]
pub struct RenderConfig {
    /// 每页页眉的固定标题
    pub header_text: String,

    /// TrueType字体目录
    pub font_dir: PathBuf,

    /// 字体族名称，目录下需存在 {family}-Regular.ttf 等文件
    pub font_family: String,
}

impl Config {
    /// 从文件加载配置
    pub fn from_file(path: &Path) -> Result<Self> {
        let mut file =
            File::open(path).context(format!("Failed to open config file: {:?}", path))?;
        let mut content = String::new();
        file.read_to_string(&mut content)
            .context("Failed to read config file")?;

        let mut config: Config =
            toml::from_str(&content).context("Failed to parse config file")?;
        let raw: toml::Table = toml::from_str(&content).context("Failed to parse config file")?;
        config.fill_provider_defaults(&raw);
        Ok(config)
    }

    /// 文件中未写出的模型与凭证规则跟随所选Provider
    fn fill_provider_defaults(&mut self, raw: &toml::Table) {
        let is_set = |section: &str, key: &str| {
            raw.get(section)
                .and_then(|value| value.as_table())
                .is_some_and(|table| table.contains_key(key))
        };

        let provider = self.llm.provider.clone();
        if !is_set("llm", "model") {
            self.llm.model = provider.default_model().to_string();
        }
        if !is_set("credential", "env_var") {
            self.credential.env_var = provider.default_key_env().to_string();
        }
        if !is_set("credential", "required_prefix") {
            self.credential.required_prefix = Some(provider.default_key_prefix().to_string());
        }
    }

    /// 切换Provider，同时把模型和凭证规则换成该Provider的默认值
    pub fn switch_provider(&mut self, provider: LLMProvider) {
        self.llm.model = provider.default_model().to_string();
        self.credential = CredentialConfig::for_provider(&provider);
        self.llm.provider = provider;
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            output_path: PathBuf::from("./downloads"),
            temp_root: PathBuf::from("."),
            llm: LLMConfig::default(),
            credential: CredentialConfig::default(),
            search: SearchConfig::default(),
            render: RenderConfig::default(),
            interactive: false,
            verbose: false,
        }
    }
}

impl Default for LLMConfig {
    fn default() -> Self {
        let provider = LLMProvider::default();
        Self {
            model: provider.default_model().to_string(),
            provider,
            max_tokens: 8192,
            max_iterations: 10,
        }
    }
}

impl CredentialConfig {
    pub fn for_provider(provider: &LLMProvider) -> Self {
        Self {
            env_var: provider.default_key_env().to_string(),
            required_prefix: Some(provider.default_key_prefix().to_string()),
        }
    }
}

impl Default for CredentialConfig {
    fn default() -> Self {
        Self::for_provider(&LLMProvider::default())
    }
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            api_key_env: String::from("SERPER_API_KEY"),
            endpoint: String::from("https://google.serper.dev/search"),
            result_count: 10,
        }
    }
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            header_text: String::from("AI - Content Generation Agent"),
            font_dir: PathBuf::from("/usr/share/fonts/truetype/liberation"),
            font_family: String::from("LiberationSans"),
        }
    }
}

// Include tests
#[cfg(test)]
mod tests;
