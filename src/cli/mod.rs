use crate::config::{Config, DEFAULT_CONFIG_FILE, LLMProvider};
use crate::generator::types::{ContentType, GenerationRequest, RequestError, TargetAudience};
use anyhow::{Context, Result};
use clap::Parser;
use std::path::PathBuf;

/// Content Studio - 由Rust与AI驱动的内容生成引擎
#[derive(Parser, Debug)]
#[command(name = "content-studio")]
#[command(
    about = "AI content generation engine. A research agent gathers findings on a topic, a writer agent turns them into long-form content, delivered as Markdown and PDF."
)]
#[command(version)]
pub struct Args {
    /// 内容主题，未指定时从标准输入读取
    #[arg(short, long)]
    pub topic: Option<String>,

    /// 内容类型 (blog post, article, research paper, technical guide)
    #[arg(long, default_value = "blog post")]
    pub content_type: ContentType,

    /// 目标读者 (general, technical, business, academic)
    #[arg(short, long, default_value = "general")]
    pub audience: TargetAudience,

    /// 温度参数，越高越有创造性
    #[arg(long, default_value_t = GenerationRequest::DEFAULT_TEMPERATURE)]
    pub temperature: f64,

    /// 目标字数上限
    #[arg(short, long, default_value_t = GenerationRequest::DEFAULT_WORDS)]
    pub max_words: u32,

    /// 下载文件的输出路径
    #[arg(short, long)]
    pub output_path: Option<PathBuf>,

    /// 配置文件路径
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// LLM Provider (gemini, openai, anthropic)
    #[arg(long)]
    pub llm_provider: Option<String>,

    /// 模型标识
    #[arg(long)]
    pub model: Option<String>,

    /// 最大tokens数
    #[arg(long)]
    pub max_tokens: Option<u32>,

    /// 凭证所在的环境变量
    #[arg(long)]
    pub key_env: Option<String>,

    /// 凭证必须具有的前缀，传空字符串关闭格式校验
    #[arg(long)]
    pub key_prefix: Option<String>,

    /// 每次搜索返回的结果数
    #[arg(long)]
    pub search_results: Option<usize>,

    /// 临时渲染目录的父目录
    #[arg(long)]
    pub temp_root: Option<PathBuf>,

    /// TrueType字体目录
    #[arg(long)]
    pub font_dir: Option<PathBuf>,

    /// 字体族名称
    #[arg(long)]
    pub font_family: Option<String>,

    /// 交互模式，连续读取多个主题
    #[arg(short, long)]
    pub interactive: bool,

    /// 是否启用详细日志
    #[arg(short, long)]
    pub verbose: bool,
}

impl Args {
    /// 将CLI参数转换为配置，CLI参数优先于配置文件
    pub fn to_config(&self) -> Result<Config> {
        let mut config = if let Some(config_path) = &self.config {
            Config::from_file(config_path)
                .with_context(|| format!("无法读取配置文件 {:?}", config_path))?
        } else {
            let default_config_path = std::env::current_dir()
                .unwrap_or_else(|_| PathBuf::from("."))
                .join(DEFAULT_CONFIG_FILE);

            if default_config_path.exists() {
                Config::from_file(&default_config_path).with_context(|| {
                    format!("无法读取默认配置文件 {:?}", default_config_path)
                })?
            } else {
                Config::default()
            }
        };

        if let Some(provider_str) = &self.llm_provider {
            if let Ok(provider) = provider_str.parse::<LLMProvider>() {
                config.switch_provider(provider);
            } else {
                eprintln!(
                    "⚠️ 警告: 未知的provider: {}，使用 {}",
                    provider_str, config.llm.provider
                );
            }
        }
        if let Some(model) = &self.model {
            config.llm.model = model.clone();
        }
        if let Some(max_tokens) = self.max_tokens {
            config.llm.max_tokens = max_tokens;
        }

        if let Some(key_env) = &self.key_env {
            config.credential.env_var = key_env.clone();
        }
        if let Some(key_prefix) = &self.key_prefix {
            config.credential.required_prefix = if key_prefix.is_empty() {
                None
            } else {
                Some(key_prefix.clone())
            };
        }

        if let Some(search_results) = self.search_results {
            config.search.result_count = search_results;
        }

        if let Some(output_path) = &self.output_path {
            config.output_path = output_path.clone();
        }
        if let Some(temp_root) = &self.temp_root {
            config.temp_root = temp_root.clone();
        }
        if let Some(font_dir) = &self.font_dir {
            config.render.font_dir = font_dir.clone();
        }
        if let Some(font_family) = &self.font_family {
            config.render.font_family = font_family.clone();
        }

        config.interactive |= self.interactive || self.topic.is_none();
        config.verbose |= self.verbose;

        Ok(config)
    }

    /// 用命令行上的内容参数为指定主题构造请求
    pub fn generation_request(&self, topic: &str) -> Result<GenerationRequest, RequestError> {
        GenerationRequest::new(
            topic,
            self.content_type,
            self.audience,
            self.temperature,
            self.max_words,
        )
    }
}
