//! 基于标准输入的凭证提示

use std::io::{self, BufRead, Write};

use super::CredentialPrompt;

/// 从标准输入读取凭证，提示信息输出到标准错误
#[derive(Debug, Default)]
pub struct StdinPrompt;

impl StdinPrompt {
    pub fn new() -> Self {
        Self
    }
}

impl CredentialPrompt for StdinPrompt {
    fn ask(&mut self, label: &str) -> Option<String> {
        eprint!("🔑 {}", label);
        let _ = io::stderr().flush();

        let mut line = String::new();
        match io::stdin().lock().read_line(&mut line) {
            Ok(0) => None,
            Ok(_) => Some(line.trim_end_matches(['\r', '\n']).to_string()),
            Err(e) => {
                tracing::warn!(error = %e, "failed to read API key from stdin");
                None
            }
        }
    }

    fn warn(&mut self, message: &str) {
        eprintln!("{}", message);
    }

    fn report_error(&mut self, message: &str) {
        eprintln!("❌ {}", message);
    }

    fn confirm(&mut self, message: &str) {
        println!("{}", message);
    }
}
