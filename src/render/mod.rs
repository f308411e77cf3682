//! 文档渲染 - 把生成的Markdown文本清洗后排版成分页的PDF

use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::Path;

use thiserror::Error;

pub mod clean;
pub mod layout;

pub use layout::{DocumentLayout, PdfLayout};

#[derive(Debug, Error)]
pub enum RenderError {
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error("failed to load font family: {0}")]
    Font(String),
    #[error("failed to lay out document: {0}")]
    Layout(String),
}

/// 排版前的文档结构：标题块与正文段落
#[derive(Debug, Clone, PartialEq)]
pub struct DocumentPlan {
    pub title: String,
    pub paragraphs: Vec<String>,
}

impl DocumentPlan {
    pub fn new(text: &str, title: &str) -> Self {
        let cleaned = clean::clean_text(text);
        let mut paragraphs: Vec<String> = cleaned
            .split("\n\n")
            .map(str::trim)
            .filter(|p| !p.is_empty())
            .map(str::to_string)
            .collect();

        // 标题块已经展示了标题，首段重复时去掉
        if paragraphs
            .first()
            .is_some_and(|first| repeats_title(first, title))
        {
            paragraphs.remove(0);
        }

        Self {
            title: title.trim().to_string(),
            paragraphs,
        }
    }
}

fn repeats_title(paragraph: &str, title: &str) -> bool {
    let heading = paragraph.trim_start_matches('#').trim();
    !heading.is_empty() && heading.to_lowercase() == title.trim().to_lowercase()
}

/// 渲染文档并写入 `path`，返回写入的字节
pub fn render(
    text: &str,
    title: &str,
    path: &Path,
    layout: &dyn DocumentLayout,
) -> Result<Vec<u8>, RenderError> {
    let plan = DocumentPlan::new(text, title);
    tracing::debug!(
        path = %path.display(),
        paragraphs = plan.paragraphs.len(),
        "rendering document"
    );

    let mut writer = BufWriter::new(File::create(path)?);
    layout.lay_out(&plan, &mut writer)?;
    writer.flush()?;
    drop(writer);

    Ok(fs::read(path)?)
}
