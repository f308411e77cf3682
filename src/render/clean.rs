use regex::Regex;
use std::sync::LazyLock;

static MARKUP_TAG: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"<[^>]+>").unwrap());
static BLANK_RUN: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\n\s*\n").unwrap());

/// 移除所有形如 `<...>` 的标记
pub fn strip_markup(text: &str) -> String {
    MARKUP_TAG.replace_all(text, "").into_owned()
}

/// 连续空行合并为一个空行
pub fn collapse_blank_lines(text: &str) -> String {
    BLANK_RUN.replace_all(text, "\n\n").into_owned()
}

/// 只处理 `&nbsp;` 与 `&amp;`，其余实体原样保留
pub fn normalize_entities(text: &str) -> String {
    text.replace("&nbsp;", " ").replace("&amp;", "&")
}

/// 渲染前的完整清洗流程
pub fn clean_text(text: &str) -> String {
    let text = strip_markup(text);
    let text = collapse_blank_lines(&text);
    normalize_entities(&text).trim().to_string()
}
