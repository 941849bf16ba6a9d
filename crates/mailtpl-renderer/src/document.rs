//! Documents and rendered output.

use mailtpl_config::Configuration;

use crate::backend::RenderContext;
use crate::block::Block;
use crate::error::BlockError;
use crate::html::HtmlBackend;
use crate::renderer::EmailRenderer;
use crate::text::TextBackend;

/// Configuration snapshot plus an append-only list of validated blocks.
#[derive(Debug, Clone, Default)]
pub struct Document {
    config: Configuration,
    blocks: Vec<Block>,
}

impl Document {
    #[must_use]
    pub fn new(config: Configuration) -> Self {
        Self {
            config,
            blocks: Vec::new(),
        }
    }

    #[must_use]
    pub fn configuration(&self) -> &Configuration {
        &self.config
    }

    /// Blocks in render order.
    #[must_use]
    pub fn blocks(&self) -> &[Block] {
        &self.blocks
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.blocks.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }

    /// Validate and append a block.
    ///
    /// # Errors
    ///
    /// Returns `BlockError` if the block is invalid; the document is left
    /// unchanged.
    pub fn push(&mut self, block: Block) -> Result<(), BlockError> {
        if let Err(e) = block.validate() {
            tracing::debug!(block = e.block, field = e.field, reason = %e.reason, "Rejected block");
            return Err(e);
        }
        tracing::trace!(kind = block.kind(), index = self.blocks.len(), "Appended block");
        self.blocks.push(block);
        Ok(())
    }

    /// Render both outputs with the given copyright year.
    #[must_use]
    pub fn render(&self, year: i32) -> RenderedEmail {
        let ctx = RenderContext {
            config: &self.config,
            year,
        };
        let html = EmailRenderer::<HtmlBackend>::new().render(&self.blocks, ctx);
        let text = EmailRenderer::<TextBackend>::new().render(&self.blocks, ctx);
        tracing::debug!(
            blocks = self.blocks.len(),
            html_bytes = html.len(),
            text_bytes = text.len(),
            year,
            "Rendered email"
        );
        RenderedEmail { html, text }
    }
}

/// HTML and plain-text renderings of one email.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct RenderedEmail {
    html: String,
    text: String,
}

impl RenderedEmail {
    #[must_use]
    pub fn html(&self) -> &str {
        &self.html
    }

    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Consume into `(html, text)`.
    #[must_use]
    pub fn into_parts(self) -> (String, String) {
        (self.html, self.text)
    }
}
