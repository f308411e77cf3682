//! 凭证闸门 - 在任何生成工作开始前确认模型服务的API KEY可用

use std::env::VarError;
use thiserror::Error;

use crate::config::CredentialConfig;
use crate::session::SessionContext;

mod prompt;

pub use prompt::StdinPrompt;

/// 凭证错误
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CredentialError {
    #[error("{env_var} is missing. Please check your .env file or session state.")]
    Missing { env_var: String },
    #[error("API key must be a string.")]
    NotUnicode,
    #[error("API key cannot be empty.")]
    Empty,
    #[error("API key must start with `{prefix}`.")]
    InvalidFormat { prefix: String },
    #[error("API key input was closed before a valid key was entered")]
    PromptClosed,
}

/// 模型服务的API KEY，Debug输出时脱敏
#[derive(Clone, PartialEq, Eq)]
pub struct Credential(String);

impl Credential {
    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Debug for Credential {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let visible: String = self.0.chars().take(4).collect();
        write!(f, "Credential({}****)", visible)
    }
}

/// 唯一的凭证校验规则
#[derive(Debug, Clone)]
pub struct CredentialPolicy {
    config: CredentialConfig,
}

impl CredentialPolicy {
    pub fn new(config: CredentialConfig) -> Self {
        Self { config }
    }

    pub fn env_var(&self) -> &str {
        &self.config.env_var
    }

    /// 校验原始值，成功时返回去除首尾空白后的凭证
    pub fn validate(&self, raw: Option<&str>) -> Result<Credential, CredentialError> {
        let raw = raw.ok_or_else(|| CredentialError::Missing {
            env_var: self.config.env_var.clone(),
        })?;

        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(CredentialError::Empty);
        }

        if let Some(prefix) = self.config.required_prefix.as_deref()
            && !prefix.is_empty()
            && !trimmed.starts_with(prefix)
        {
            return Err(CredentialError::InvalidFormat {
                prefix: prefix.to_string(),
            });
        }

        Ok(Credential(trimmed.to_string()))
    }

    /// 校验从环境变量读出的值
    pub fn validate_var(&self, value: Result<String, VarError>) -> Result<Credential, CredentialError> {
        match value {
            Ok(value) => self.validate(Some(&value)),
            Err(VarError::NotPresent) => self.validate(None),
            Err(VarError::NotUnicode(_)) => Err(CredentialError::NotUnicode),
        }
    }
}

/// 进程环境变量的读写抽象
pub trait EnvStore {
    fn read(&self, key: &str) -> Result<String, VarError>;

    fn write(&mut self, key: &str, value: &str);
}

/// 真实的进程环境
#[derive(Debug, Default, Clone, Copy)]
pub struct ProcessEnv;

impl EnvStore for ProcessEnv {
    fn read(&self, key: &str) -> Result<String, VarError> {
        std::env::var(key)
    }

    fn write(&mut self, key: &str, value: &str) {
        // SAFETY: the gate runs in `main` before the async runtime is built,
        // so no other thread can observe the environment concurrently.
        unsafe { std::env::set_var(key, value) }
    }
}

/// 阻塞式单字段输入
pub trait CredentialPrompt {
    /// 读取一次输入，输入流关闭时返回None
    fn ask(&mut self, label: &str) -> Option<String>;

    fn warn(&mut self, message: &str);

    fn report_error(&mut self, message: &str);

    fn confirm(&mut self, message: &str);
}

/// 凭证闸门
pub struct CredentialGate<E: EnvStore, P: CredentialPrompt> {
    policy: CredentialPolicy,
    env: E,
    prompt: P,
}

impl<E: EnvStore, P: CredentialPrompt> CredentialGate<E, P> {
    pub fn new(config: CredentialConfig, env: E, prompt: P) -> Self {
        Self {
            policy: CredentialPolicy::new(config),
            env,
            prompt,
        }
    }

    pub fn policy(&self) -> &CredentialPolicy {
        &self.policy
    }

    /// 获取可用凭证：依次检查环境变量与会话，都不可用时阻塞提示输入直到校验通过
    pub fn obtain_credential(
        &mut self,
        session: &mut SessionContext,
    ) -> Result<Credential, CredentialError> {
        let env_var = self.policy.env_var().to_string();

        let rejected = match self.policy.validate_var(self.env.read(&env_var)) {
            Ok(credential) => {
                tracing::debug!(env_var = %env_var, "credential loaded from environment");
                session.set_credential(credential.clone());
                return Ok(credential);
            }
            Err(e) => {
                tracing::debug!(env_var = %env_var, error = %e, "environment credential rejected");
                e
            }
        };

        if let Some(existing) = session.credential()
            && let Ok(credential) = self.policy.validate(Some(existing.expose()))
        {
            tracing::debug!("credential loaded from session");
            self.env.write(&env_var, credential.expose());
            return Ok(credential);
        }

        self.prompt.warn(&match rejected {
            CredentialError::Missing { .. } => {
                format!("⚠️ {} not found in environment variables", env_var)
            }
            other => format!("⚠️ {} is not usable: {}", env_var, other),
        });

        loop {
            let Some(input) = self.prompt.ask("Please enter your API key: ") else {
                return Err(CredentialError::PromptClosed);
            };

            match self.policy.validate(Some(&input)) {
                Ok(credential) => {
                    session.set_credential(credential.clone());
                    self.env.write(&env_var, credential.expose());
                    self.prompt.confirm("✅ API key successfully stored!");
                    return Ok(credential);
                }
                Err(CredentialError::Empty) => self.prompt.report_error("Please enter an API key"),
                Err(e) => self.prompt.report_error(&e.to_string()),
            }
        }
    }
}
