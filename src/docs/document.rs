/// Intermediate document model, independent of the final markup.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Document {
    pub blocks: Vec<Block>,
}

impl Document {
    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }

    pub fn push(&mut self, block: Block) {
        self.blocks.push(block);
    }

    /// Every anchor a heading in this document defines.
    pub fn anchors(&self) -> impl Iterator<Item = &str> {
        self.blocks.iter().filter_map(|block| match block {
            Block::Heading {
                anchor: Some(anchor),
                ..
            } => Some(anchor.as_str()),
            _ => None,
        })
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Block {
    Heading {
        level: u8,
        text: String,
        anchor: Option<String>,
    },
    List(Vec<String>),
    Table(Table),
}

impl Block {
    pub fn heading(level: u8, text: impl Into<String>) -> Self {
        Block::Heading {
            level,
            text: text.into(),
            anchor: None,
        }
    }

    /// A heading addressable by its own text.
    pub fn anchored_heading(level: u8, name: &str) -> Self {
        Self::heading_with_anchor(level, name, name)
    }

    pub fn heading_with_anchor(level: u8, text: &str, anchor: &str) -> Self {
        Block::Heading {
            level,
            text: text.to_string(),
            anchor: Some(anchor.to_string()),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Table {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<Inline>>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Inline {
    Text(String),
    /// Text followed by a short marker such as `PK`.
    Tagged { text: String, tag: String },
    Link { text: String, target: LinkTarget },
}

impl Inline {
    pub fn text(text: impl Into<String>) -> Self {
        Inline::Text(text.into())
    }

    pub fn empty() -> Self {
        Inline::Text(String::new())
    }

    pub fn anchor_link(text: impl Into<String>, anchor: impl Into<String>) -> Self {
        Inline::Link {
            text: text.into(),
            target: LinkTarget::Anchor(anchor.into()),
        }
    }

    pub fn url_link(text: impl Into<String>, url: impl Into<String>) -> Self {
        Inline::Link {
            text: text.into(),
            target: LinkTarget::Url(url.into()),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum LinkTarget {
    /// An anchor inside the same document.
    Anchor(String),
    Url(String),
}
