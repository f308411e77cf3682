//! 会话上下文 - 显式保存一次交互会话内的凭证与生成结果

use uuid::Uuid;

use crate::credential::Credential;
use crate::generator::types::GeneratedArtifact;

/// 会话上下文，由凭证闸门写入，由生成流水线读取
#[derive(Debug)]
pub struct SessionContext {
    id: Uuid,
    credential: Option<Credential>,
    artifact: Option<GeneratedArtifact>,
}

impl Default for SessionContext {
    fn default() -> Self {
        Self::new()
    }
}

impl SessionContext {
    pub fn new() -> Self {
        Self {
            id: Uuid::new_v4(),
            credential: None,
            artifact: None,
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn credential(&self) -> Option<&Credential> {
        self.credential.as_ref()
    }

    pub fn set_credential(&mut self, credential: Credential) {
        self.credential = Some(credential);
    }

    /// 最近一次成功生成的内容
    pub fn artifact(&self) -> Option<&GeneratedArtifact> {
        self.artifact.as_ref()
    }

    pub fn store_artifact(&mut self, artifact: GeneratedArtifact) {
        self.artifact = Some(artifact);
    }

    pub fn clear_artifact(&mut self) {
        self.artifact = None;
    }
}
