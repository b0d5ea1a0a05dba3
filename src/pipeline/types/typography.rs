use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TextRole {
    Heading,
    Subheading,
    Body,
}

impl TextRole {
    pub fn label(&self) -> &'static str {
        match self {
            TextRole::Heading => "heading",
            TextRole::Subheading => "subheading",
            TextRole::Body => "body",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum FontWeight {
    Bold,
    SemiBold,
    Normal,
}

impl FontWeight {
    pub fn label(&self) -> &'static str {
        match self {
            FontWeight::Bold => "bold",
            FontWeight::SemiBold => "semi-bold",
            FontWeight::Normal => "normal",
        }
    }
}

/// OCR bounding box, in image pixels. Recognizers may report boxes that
/// fall partly outside the image.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TextBounds {
    pub left: i32,
    pub top: i32,
    pub width: i32,
    pub height: i32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TypographyRecord {
    pub font_family: String,
    /// Estimated size in pixels.
    pub font_size: u32,
    pub font_weight: FontWeight,
    pub text_role: TextRole,
    pub color: String,
    pub text_content: String,
    pub alignment: String,
    pub line_height: u32,
    pub bounds: TextBounds,
}
