use std::io::Write;
use std::path::Path;

use genpdf::elements::{LinearLayout, Paragraph};
use genpdf::fonts::{FontData, FontFamily};
use genpdf::render::Area;
use genpdf::style::Style;
use genpdf::{Alignment, Context, Element, Margins, Mm, PageDecorator, Position};

use crate::config::RenderConfig;
use crate::render::{DocumentPlan, RenderError};

const PAGE_MARGIN_MM: i32 = 10;
const HEADER_GAP_MM: i32 = 10;
const FOOTER_HEIGHT_MM: i32 = 15;
const TITLE_GAP_MM: i32 = 10;
const PARAGRAPH_GAP_MM: i32 = 5;

/// 排版原语：把文档结构写成最终的文档字节，分页由实现负责
pub trait DocumentLayout {
    fn lay_out(&self, plan: &DocumentPlan, out: &mut dyn Write) -> Result<(), RenderError>;
}

/// 基于genpdf的PDF排版
pub struct PdfLayout {
    header_text: String,
    fonts: FontFamily<FontData>,
}

/// 常见发行版自带字体的位置，配置的字体族不可用时依次尝试
const FALLBACK_FONTS: &[FontFiles] = &[
    FontFiles {
        dir: "/usr/share/fonts/truetype/dejavu",
        regular: "DejaVuSans.ttf",
        bold: "DejaVuSans-Bold.ttf",
        italic: "DejaVuSans-Oblique.ttf",
        bold_italic: "DejaVuSans-BoldOblique.ttf",
    },
    FontFiles {
        dir: "/usr/share/fonts/dejavu-sans-fonts",
        regular: "DejaVuSans.ttf",
        bold: "DejaVuSans-Bold.ttf",
        italic: "DejaVuSans-Oblique.ttf",
        bold_italic: "DejaVuSans-BoldOblique.ttf",
    },
    FontFiles {
        dir: "/usr/share/fonts/liberation-sans",
        regular: "LiberationSans-Regular.ttf",
        bold: "LiberationSans-Bold.ttf",
        italic: "LiberationSans-Italic.ttf",
        bold_italic: "LiberationSans-BoldItalic.ttf",
    },
];

/// 一个字体族的四个字重文件
pub struct FontFiles {
    pub dir: &'static str,
    pub regular: &'static str,
    pub bold: &'static str,
    pub italic: &'static str,
    pub bold_italic: &'static str,
}

impl FontFiles {
    fn load(&self) -> Result<FontFamily<FontData>, genpdf::error::Error> {
        let dir = Path::new(self.dir);
        Ok(FontFamily {
            regular: FontData::load(dir.join(self.regular), None)?,
            bold: FontData::load(dir.join(self.bold), None)?,
            italic: FontData::load(dir.join(self.italic), None)?,
            bold_italic: FontData::load(dir.join(self.bold_italic), None)?,
        })
    }
}

impl PdfLayout {
    /// 从配置的字体目录加载字体族，失败时回退到系统常见字体
    pub fn load(config: &RenderConfig) -> Result<Self, RenderError> {
        Self::load_with_fallbacks(config, FALLBACK_FONTS)
    }

    pub fn load_with_fallbacks(
        config: &RenderConfig,
        fallbacks: &[FontFiles],
    ) -> Result<Self, RenderError> {
        let fonts = match genpdf::fonts::from_files(&config.font_dir, &config.font_family, None) {
            Ok(fonts) => fonts,
            Err(e) => {
                tracing::warn!(
                    font_dir = %config.font_dir.display(),
                    font_family = %config.font_family,
                    "configured font family unavailable: {}",
                    e
                );
                fallbacks
                    .iter()
                    .find_map(|files| {
                        let fonts = files.load().ok()?;
                        tracing::info!(font_dir = files.dir, "using fallback font family");
                        Some(fonts)
                    })
                    .ok_or_else(|| {
                        RenderError::Font(format!(
                            "{} in {}: {}; pass --font-dir and --font-family to point at a TrueType family \
                             with {{family}}-Regular/-Bold/-Italic/-BoldItalic.ttf files",
                            config.font_family,
                            config.font_dir.display(),
                            e
                        ))
                    })?
            }
        };

        Ok(Self {
            header_text: config.header_text.clone(),
            fonts,
        })
    }
}

impl DocumentLayout for PdfLayout {
    fn lay_out(&self, plan: &DocumentPlan, out: &mut dyn Write) -> Result<(), RenderError> {
        let mut doc = genpdf::Document::new(self.fonts.clone());
        doc.set_title(plan.title.clone());
        doc.set_font_size(12);
        doc.set_page_decorator(HeaderFooterDecorator::new(&self.header_text));

        doc.push(
            Paragraph::new(plan.title.clone())
                .styled(Style::new().bold().with_font_size(16))
                .padded(Margins::trbl(0, 0, TITLE_GAP_MM, 0)),
        );

        for paragraph in &plan.paragraphs {
            let mut block = LinearLayout::vertical();
            for line in paragraph.lines() {
                block.push(Paragraph::new(line.trim_end().to_string()));
            }
            doc.push(block.padded(Margins::trbl(0, 0, PARAGRAPH_GAP_MM, 0)));
        }

        doc.render(out)
            .map_err(|e| RenderError::Layout(e.to_string()))
    }
}

/// 每页固定页眉与 "Page N" 页脚
struct HeaderFooterDecorator {
    header_text: String,
    page: usize,
}

impl HeaderFooterDecorator {
    fn new(header_text: &str) -> Self {
        Self {
            header_text: header_text.to_string(),
            page: 0,
        }
    }
}

impl PageDecorator for HeaderFooterDecorator {
    fn decorate_page<'a>(
        &mut self,
        context: &Context,
        mut area: Area<'a>,
        style: Style,
    ) -> Result<Area<'a>, genpdf::error::Error> {
        self.page += 1;
        area.add_margins(Margins::all(PAGE_MARGIN_MM));

        let footer_height = Mm::from(FOOTER_HEIGHT_MM);
        let mut footer_area = area.clone();
        footer_area.add_offset(Position::new(0, area.size().height - footer_height));
        Paragraph::new(format!("Page {}", self.page))
            .aligned(Alignment::Center)
            .styled(Style::new().italic().with_font_size(8))
            .render(context, footer_area, style)?;
        area.set_height(area.size().height - footer_height);

        let header = Paragraph::new(self.header_text.clone())
            .aligned(Alignment::Center)
            .styled(Style::new().bold().with_font_size(12))
            .render(context, area.clone(), style)?;
        area.add_offset(Position::new(0, header.size.height + Mm::from(HEADER_GAP_MM)));

        Ok(area)
    }
}
