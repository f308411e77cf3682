//! 产物输出 - 临时渲染目录管理与下载文件落盘

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use crate::generator::types::ContentType;

/// 下载文件名主干：`{topic}_{content type}`，小写，空格与路径分隔符替换为下划线
pub fn artifact_file_stem(topic: &str, content_type: ContentType) -> String {
    let topic = topic
        .trim()
        .to_lowercase()
        .replace([' ', '/', '\\'], "_");
    format!("{}_{}", topic, content_type.to_string().to_lowercase())
}

/// 渲染期间使用的临时目录，离开作用域时清理登记过的文件
pub struct TempWorkspace {
    dir: PathBuf,
    files: Vec<PathBuf>,
}

impl TempWorkspace {
    pub const DIR_NAME: &'static str = "temp_files";

    pub fn create(root: &Path) -> io::Result<Self> {
        let dir = root.join(Self::DIR_NAME);
        fs::create_dir_all(&dir)?;
        Ok(Self { dir, files: vec![] })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// 登记一个临时文件并返回其路径，文件由调用方创建
    pub fn register(&mut self, file_name: &str) -> PathBuf {
        let path = self.dir.join(file_name);
        self.files.push(path.clone());
        path
    }
}

impl Drop for TempWorkspace {
    fn drop(&mut self) {
        for file in &self.files {
            if file.exists()
                && let Err(e) = fs::remove_file(file)
            {
                tracing::warn!(path = %file.display(), "failed to remove temporary file: {}", e);
            }
        }
        // 目录非空时保留（可能被其他会话共享）
        let _ = fs::remove_dir(&self.dir);
    }
}

/// 一次交互提供的下载文件
#[derive(Debug, Clone, PartialEq)]
pub struct Downloads {
    pub pdf: PathBuf,
    pub markdown: PathBuf,
}

pub struct DiskOutlet {
    output_dir: PathBuf,
}

impl DiskOutlet {
    pub fn new(output_dir: impl Into<PathBuf>) -> Self {
        Self {
            output_dir: output_dir.into(),
        }
    }

    /// 写出PDF与原始Markdown两份下载文件
    pub fn offer(&self, stem: &str, pdf_bytes: &[u8], markdown: &str) -> io::Result<Downloads> {
        fs::create_dir_all(&self.output_dir)?;

        let pdf = self.output_dir.join(format!("{}.pdf", stem));
        fs::write(&pdf, pdf_bytes)?;
        println!("💾 Download as PDF: {}", pdf.display());

        let markdown_path = self.output_dir.join(format!("{}.md", stem));
        fs::write(&markdown_path, markdown)?;
        println!("💾 Download as Markdown: {}", markdown_path.display());

        Ok(Downloads {
            pdf,
            markdown: markdown_path,
        })
    }
}
