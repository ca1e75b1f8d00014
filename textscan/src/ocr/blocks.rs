use super::document::{Document, Geometry};

/// One text block flattened out of a [`Document`].
#[derive(Debug, Clone, PartialEq)]
pub struct SimpleBlock {
    pub text: String,
    /// Mean word confidence, `0.0` when the block has no words.
    pub confidence: f64,
    pub location: Geometry,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SimpleBlocks {
    /// Block texts joined by a blank line.
    pub text: String,
    pub blocks: Vec<SimpleBlock>,
}

/// Flatten every block of every page, in page-then-block order.
///
/// Within a block, each line with at least one word becomes one line of text
/// (words joined by a space); wordless lines are dropped.
pub fn extract_simple_blocks(document: &Document) -> SimpleBlocks {
    let blocks: Vec<SimpleBlock> = document
        .pages
        .iter()
        .flat_map(|page| page.blocks.iter())
        .map(|block| {
            let text = block
                .lines
                .iter()
                .filter(|line| !line.words.is_empty())
                .map(|line| line.render())
                .collect::<Vec<_>>()
                .join("\n");

            let (sum, count) = block
                .lines
                .iter()
                .flat_map(|line| line.words.iter())
                .fold((0.0_f64, 0_usize), |(sum, count), word| {
                    (sum + word.confidence, count + 1)
                });
            let confidence = if count == 0 { 0.0 } else { sum / count as f64 };

            SimpleBlock {
                text,
                confidence,
                location: block.geometry,
            }
        })
        .collect();

    let text = blocks
        .iter()
        .map(|b| b.text.as_str())
        .collect::<Vec<_>>()
        .join("\n\n");

    SimpleBlocks { text, blocks }
}
