#[cfg(test)]
mod tests {
    use crate::config::{Config, CredentialConfig, LLMConfig, LLMProvider, RenderConfig, SearchConfig};
    use std::fs;
    use std::path::PathBuf;
    use tempfile::TempDir;

    #[test]
    fn test_config_default() {
        let config = Config::default();

        assert_eq!(config.output_path, PathBuf::from("./downloads"));
        assert_eq!(config.temp_root, PathBuf::from("."));
        assert!(!config.interactive);
        assert!(!config.verbose);
    }

    #[test]
    fn test_llm_provider_default() {
        assert_eq!(LLMProvider::default(), LLMProvider::Gemini);
    }

    #[test]
    fn test_llm_provider_from_str() {
        assert_eq!("gemini".parse::<LLMProvider>().unwrap(), LLMProvider::Gemini);
        assert_eq!("Google".parse::<LLMProvider>().unwrap(), LLMProvider::Gemini);
        assert_eq!("openai".parse::<LLMProvider>().unwrap(), LLMProvider::OpenAI);
        assert_eq!(
            "ANTHROPIC".parse::<LLMProvider>().unwrap(),
            LLMProvider::Anthropic
        );

        assert!("invalid".parse::<LLMProvider>().is_err());
    }

    #[test]
    fn test_llm_provider_display_round_trip() {
        for provider in [LLMProvider::Gemini, LLMProvider::OpenAI, LLMProvider::Anthropic] {
            assert_eq!(provider.to_string().parse::<LLMProvider>().unwrap(), provider);
        }
    }

    #[test]
    fn test_llm_config_default() {
        let config = LLMConfig::default();

        assert_eq!(config.provider, LLMProvider::Gemini);
        assert_eq!(config.model, "gemini-1.5-flash");
        assert_eq!(config.max_tokens, 8192);
        assert_eq!(config.max_iterations, 10);
    }

    #[test]
    fn test_credential_config_default_is_gemini() {
        let config = CredentialConfig::default();

        assert_eq!(config.env_var, "GEMINI_API_KEY");
        assert_eq!(config.required_prefix.as_deref(), Some("AIza"));
    }

    #[test]
    fn test_search_and_render_defaults() {
        let search = SearchConfig::default();
        assert_eq!(search.api_key_env, "SERPER_API_KEY");
        assert_eq!(search.result_count, 10);

        let render = RenderConfig::default();
        assert_eq!(render.header_text, "AI - Content Generation Agent");
        assert_eq!(render.font_family, "LiberationSans");
    }

    #[test]
    fn test_switch_provider_updates_model_and_credential_rule() {
        let mut config = Config::default();
        config.switch_provider(LLMProvider::OpenAI);

        assert_eq!(config.llm.provider, LLMProvider::OpenAI);
        assert_eq!(config.llm.model, "gpt-4o-mini");
        assert_eq!(config.credential.env_var, "OPENAI_API_KEY");
        assert_eq!(config.credential.required_prefix.as_deref(), Some("sk-"));
    }

    #[test]
    fn test_from_file_partial_config_uses_defaults() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("content-studio.toml");
        fs::write(
            &path,
            r#"
output_path = "/tmp/out"

[llm]
model = "gemini-2.0-flash"

[credential]
env_var = "MY_KEY"

[search]
result_count = 5
"#,
        )
        .unwrap();

        let config = Config::from_file(&path).unwrap();

        assert_eq!(config.output_path, PathBuf::from("/tmp/out"));
        assert_eq!(config.llm.model, "gemini-2.0-flash");
        assert_eq!(config.llm.provider, LLMProvider::Gemini);
        assert_eq!(config.llm.max_tokens, 8192);
        assert_eq!(config.credential.env_var, "MY_KEY");
        assert_eq!(config.search.result_count, 5);
        assert_eq!(config.search.api_key_env, "SERPER_API_KEY");
    }

    #[test]
    fn test_from_file_missing() {
        let temp_dir = TempDir::new().unwrap();
        let result = Config::from_file(&temp_dir.path().join("missing.toml"));
        assert!(result.is_err());
    }

    #[test]
    fn test_from_file_invalid_toml() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("bad.toml");
        fs::write(&path, "output_path = [").unwrap();

        let err = Config::from_file(&path).unwrap_err();
        assert!(err.to_string().contains("Failed to parse config file"));
    }

    #[test]
    fn test_from_file_provider_drives_model_and_credential_rule() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("content-studio.toml");
        fs::write(&path, "[llm]\nprovider = \"openai\"\n").unwrap();

        let config = Config::from_file(&path).unwrap();

        assert_eq!(config.llm.provider, LLMProvider::OpenAI);
        assert_eq!(config.llm.model, "gpt-4o-mini");
        assert_eq!(config.credential.env_var, "OPENAI_API_KEY");
        assert_eq!(config.credential.required_prefix.as_deref(), Some("sk-"));
    }

    #[test]
    fn test_from_file_explicit_values_win_over_provider_defaults() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("content-studio.toml");
        fs::write(
            &path,
            r#"
[llm]
provider = "anthropic"
model = "claude-3-5-sonnet-latest"

[credential]
required_prefix = ""
"#,
        )
        .unwrap();

        let config = Config::from_file(&path).unwrap();

        assert_eq!(config.llm.model, "claude-3-5-sonnet-latest");
        assert_eq!(config.credential.env_var, "ANTHROPIC_API_KEY");
        assert_eq!(config.credential.required_prefix.as_deref(), Some(""));
    }
}
