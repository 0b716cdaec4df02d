use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

/// The persisted state of one article.
///
/// `content` is ordered top to bottom exactly as the blocks appear in the
/// editor. The backend replaces its copy wholesale on every save.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Document {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub last_saved: String,
    #[serde(default)]
    pub content: Vec<Block>,
}

impl Document {
    pub fn new(title: impl Into<String>, last_saved: impl Into<String>, content: Vec<Block>) -> Self {
        Self {
            title: title.into(),
            last_saved: last_saved.into(),
            content,
        }
    }
}

/// One unit of article content as it travels over the wire.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Block {
    Text(TextBlock),
    Image(ImageBlock),
}

impl Block {
    pub fn text(style: TextStyle, data: impl Into<String>) -> Self {
        Block::Text(TextBlock {
            style,
            data: data.into(),
        })
    }

    pub fn image(data: impl Into<String>) -> Self {
        Block::Image(ImageBlock { data: data.into() })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextBlock {
    pub data: String,
    // Rows saved before styles existed come back as `null`
    #[serde(default, deserialize_with = "style_or_paragraph")]
    pub style: TextStyle,
}

/// Read a block style, falling back to a paragraph for `null` or a name
/// this editor doesn't know.
fn style_or_paragraph<'de, D>(deserializer: D) -> Result<TextStyle, D::Error>
where
    D: Deserializer<'de>,
{
    let name = Option::<String>::deserialize(deserializer)?;
    Ok(match name.as_deref() {
        None => TextStyle::P,
        Some(name) => TextStyle::from_name(name).unwrap_or_else(|| {
            log::warn!("Unknown text style {name:?}, showing it as a paragraph");
            TextStyle::P
        }),
    })
}

/// An image reference: a URL returned by the upload endpoint or a data URI.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImageBlock {
    pub data: String,
}

/// The four text styles the editor offers.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TextStyle {
    H1,
    H2,
    #[default]
    P,
    Caption,
}

impl TextStyle {
    pub const ALL: [TextStyle; 4] = [TextStyle::H1, TextStyle::H2, TextStyle::P, TextStyle::Caption];

    /// Wire name, also used as the CSS class suffix.
    pub fn as_str(&self) -> &'static str {
        match self {
            TextStyle::H1 => "h1",
            TextStyle::H2 => "h2",
            TextStyle::P => "p",
            TextStyle::Caption => "caption",
        }
    }

    pub fn from_name(name: &str) -> Option<TextStyle> {
        TextStyle::ALL.into_iter().find(|style| style.as_str() == name)
    }

    /// Human readable label for menus
    pub fn label(&self) -> &'static str {
        match self {
            TextStyle::H1 => "Heading (H1)",
            TextStyle::H2 => "Subheading (H2)",
            TextStyle::P => "Text (P)",
            TextStyle::Caption => "Caption",
        }
    }
}

impl fmt::Display for TextStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
