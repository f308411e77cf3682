#[cfg(test)]
mod tests {
    use crate::config::{Config, CredentialConfig};
    use crate::credential::CredentialPolicy;
    use crate::generator::context::GeneratorContext;
    use crate::generator::types::{ContentType, GenerationRequest, RequestError, TargetAudience};
    use crate::generator::workflow::{
        TimingKeys, TimingScope, handle_interaction, launch, run_interaction,
    };
    use crate::llm::client::AgentRuntime;
    use crate::llm::client::types::{AgentSpec, ModelSpec, TaskSpec};
    use crate::outlet::TempWorkspace;
    use crate::render::{DocumentLayout, DocumentPlan, RenderError};
    use crate::session::SessionContext;
    use anyhow::{Result, bail};
    use async_trait::async_trait;
    use std::io::Write;
    use std::sync::Arc;
    use tempfile::TempDir;

    /// 调研返回简报，写作返回固定正文；fail为true时Provider报错
    struct CannedRuntime {
        fail: bool,
    }

    #[async_trait]
    impl AgentRuntime for CannedRuntime {
        async fn run_task(
            &self,
            _model: &ModelSpec,
            agent: &AgentSpec,
            _task: &TaskSpec,
        ) -> Result<String> {
            if self.fail {
                bail!("provider exploded");
            }
            if agent.has_tools() {
                Ok("Key findings: adoption is rising.".to_string())
            } else {
                Ok("# AI Trends\n\nFirst paragraph.\n\n\nSecond paragraph.".to_string())
            }
        }
    }

    struct FakePdfLayout;

    impl DocumentLayout for FakePdfLayout {
        fn lay_out(&self, plan: &DocumentPlan, out: &mut dyn Write) -> Result<(), RenderError> {
            write!(out, "%PDF-fake {} {}", plan.title, plan.paragraphs.len())?;
            Ok(())
        }
    }

    /// 写出一部分后失败
    struct BrokenLayout;

    impl DocumentLayout for BrokenLayout {
        fn lay_out(&self, _plan: &DocumentPlan, out: &mut dyn Write) -> Result<(), RenderError> {
            out.write_all(b"%PDF-partial")?;
            Err(RenderError::Layout("page overflow".to_string()))
        }
    }

    fn create_test_context(temp_dir: &TempDir, fail: bool) -> GeneratorContext {
        let config = Config {
            output_path: temp_dir.path().join("downloads"),
            temp_root: temp_dir.path().to_path_buf(),
            ..Default::default()
        };
        GeneratorContext::with_runtime(config, Arc::new(CannedRuntime { fail }))
    }

    fn authenticated_session() -> SessionContext {
        let mut session = SessionContext::new();
        let credential = CredentialPolicy::new(CredentialConfig::default())
            .validate(Some("AIzaWorkflowKey"))
            .unwrap();
        session.set_credential(credential);
        session
    }

    fn request(topic: &str) -> GenerationRequest {
        GenerationRequest::new(
            topic,
            ContentType::BlogPost,
            TargetAudience::General,
            GenerationRequest::DEFAULT_TEMPERATURE,
            GenerationRequest::DEFAULT_WORDS,
        )
        .unwrap()
    }

    #[tokio::test]
    async fn test_interaction_offers_downloads_and_cleans_up() {
        let temp_dir = TempDir::new().unwrap();
        let context = create_test_context(&temp_dir, false);
        let mut session = authenticated_session();

        let downloads = run_interaction(&context, &FakePdfLayout, &mut session, &request("AI Trends"))
            .await
            .unwrap();

        assert_eq!(
            downloads.pdf,
            temp_dir.path().join("downloads/ai_trends_blog post.pdf")
        );
        assert_eq!(
            std::fs::read_to_string(&downloads.pdf).unwrap(),
            "%PDF-fake AI Trends 2"
        );
        assert_eq!(
            std::fs::read_to_string(&downloads.markdown).unwrap(),
            "# AI Trends\n\nFirst paragraph.\n\n\nSecond paragraph."
        );
        assert!(!temp_dir.path().join(TempWorkspace::DIR_NAME).exists());
        assert_eq!(session.artifact().unwrap().word_count(), 7);
    }

    #[tokio::test]
    async fn test_render_failure_still_cleans_up() {
        let temp_dir = TempDir::new().unwrap();
        let context = create_test_context(&temp_dir, false);
        let mut session = authenticated_session();

        let err = run_interaction(&context, &BrokenLayout, &mut session, &request("AI Trends"))
            .await
            .unwrap_err();

        assert!(err.to_string().contains("page overflow"));
        assert!(!temp_dir.path().join(TempWorkspace::DIR_NAME).exists());
        assert!(!temp_dir.path().join("downloads").exists());
        // 生成成功的内容仍保留在会话中
        assert!(session.artifact().is_some());
    }

    #[tokio::test]
    async fn test_provider_failure_leaves_no_artifact() {
        let temp_dir = TempDir::new().unwrap();
        let ok_context = create_test_context(&temp_dir, false);
        let failing_context = create_test_context(&temp_dir, true);
        let mut session = authenticated_session();

        handle_interaction(&ok_context, &FakePdfLayout, &mut session, &request("First"))
            .await
            .unwrap();
        assert!(session.artifact().is_some());

        let result =
            handle_interaction(&failing_context, &FakePdfLayout, &mut session, &request("Second"))
                .await;

        assert!(result.is_none());
        assert!(session.artifact().is_none());
        assert!(session.credential().is_some());
    }

    #[tokio::test]
    async fn test_provider_error_message_keeps_cause() {
        let temp_dir = TempDir::new().unwrap();
        let context = create_test_context(&temp_dir, true);
        let mut session = authenticated_session();

        let err = run_interaction(&context, &FakePdfLayout, &mut session, &request("AI Trends"))
            .await
            .unwrap_err();

        let message = err.to_string();
        assert!(message.starts_with("Content Generation Error:"));
        assert!(message.contains("provider exploded"));
    }

    #[tokio::test]
    async fn test_launch_skips_invalid_requests_and_keeps_session() {
        let temp_dir = TempDir::new().unwrap();
        let context = create_test_context(&temp_dir, false);
        let mut session = authenticated_session();

        let completed = launch(
            &context,
            &FakePdfLayout,
            &mut session,
            vec![
                Err(RequestError::EmptyTopic),
                Ok(request("AI Trends")),
                Ok(request("Rust Async")),
            ],
        )
        .await;

        assert_eq!(completed, 2);
        assert!(temp_dir.path().join("downloads/rust_async_blog post.md").exists());
        assert!(temp_dir.path().join("downloads/ai_trends_blog post.pdf").exists());
    }

    #[test]
    fn test_timing_scope_report() {
        let mut timing = TimingScope::new();
        timing.start_phase(TimingKeys::GENERATION);
        assert!(timing.end_phase(TimingKeys::GENERATION).is_some());
        assert!(timing.end_phase(TimingKeys::RENDER).is_none());

        let report = timing.generate_timing_report();
        assert!(report.contains("generation"));
        assert!(!report.contains("render"));
    }
}
