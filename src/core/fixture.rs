//! Structural inspection of markdown documents
//!
//! Used to check that a preview fixture really contains the constructs it
//! is supposed to exercise.

use pulldown_cmark::{CodeBlockKind, Event, Options, Parser, Tag, TagEnd};

/// The bundled preview fixture
pub const FIXTURE: &str = include_str!("../../test-doc.md");

/// A heading, its plain text and the zero-based line it starts on
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Heading {
    pub level: u8,
    pub text: String,
    pub line: usize,
}

/// Size of a pipe table, header row excluded
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TableShape {
    pub columns: usize,
    pub rows: usize,
}

/// A code block and its language tag
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CodeBlock {
    pub fenced: bool,
    pub language: Option<String>,
}

/// Block and inline constructs found in a document
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DocumentOutline {
    pub headings: Vec<Heading>,
    pub tables: Vec<TableShape>,
    pub code_blocks: Vec<CodeBlock>,
    pub links: usize,
    pub images: usize,
    pub blockquotes: usize,
    pub rules: usize,
    pub ordered_lists: usize,
    pub unordered_lists: usize,
    /// Deepest list nesting, 1 for a flat list
    pub max_list_depth: usize,
    pub task_items: usize,
}

impl DocumentOutline {
    /// Headings at a given level
    pub fn headings_at(&self, level: u8) -> Vec<&Heading> {
        self.headings.iter().filter(|h| h.level == level).collect()
    }

    /// Whether every fenced code block carries a language tag
    pub fn all_code_blocks_tagged(&self) -> bool {
        self.code_blocks
            .iter()
            .filter(|block| block.fenced)
            .all(|block| block.language.is_some())
    }
}

/// Walk a document and record its structure
pub fn inspect(markdown: &str) -> DocumentOutline {
    let mut options = Options::empty();
    options.insert(Options::ENABLE_STRIKETHROUGH);
    options.insert(Options::ENABLE_TABLES);
    options.insert(Options::ENABLE_TASKLISTS);

    let mut outline = DocumentOutline::default();
    let mut heading_text: Option<String> = None;
    let mut heading_line = 0;
    let mut table: Option<TableShape> = None;
    let mut in_table_head = false;
    let mut list_depth = 0;

    for (event, range) in Parser::new_ext(markdown, options).into_offset_iter() {
        match event {
            Event::Start(tag) => match tag {
                Tag::Heading { .. } => {
                    heading_text = Some(String::new());
                    heading_line = markdown[..range.start].matches('\n').count();
                }
                Tag::Table(alignments) => {
                    table = Some(TableShape {
                        columns: alignments.len(),
                        rows: 0,
                    });
                }
                Tag::TableHead => in_table_head = true,
                Tag::TableRow => {
                    if let Some(shape) = table.as_mut() {
                        if !in_table_head {
                            shape.rows += 1;
                        }
                    }
                }
                Tag::CodeBlock(kind) => {
                    let block = match kind {
                        CodeBlockKind::Fenced(info) => {
                            // The info string may carry attributes after the language
                            let language = info.split_whitespace().next().map(str::to_string);
                            CodeBlock {
                                fenced: true,
                                language,
                            }
                        }
                        CodeBlockKind::Indented => CodeBlock {
                            fenced: false,
                            language: None,
                        },
                    };
                    outline.code_blocks.push(block);
                }
                Tag::List(start) => {
                    if start.is_some() {
                        outline.ordered_lists += 1;
                    } else {
                        outline.unordered_lists += 1;
                    }
                    list_depth += 1;
                    outline.max_list_depth = outline.max_list_depth.max(list_depth);
                }
                Tag::BlockQuote(_) => outline.blockquotes += 1,
                Tag::Link { .. } => outline.links += 1,
                Tag::Image { .. } => outline.images += 1,
                _ => {}
            },

            Event::End(tag_end) => match tag_end {
                TagEnd::Heading(level) => {
                    if let Some(text) = heading_text.take() {
                        outline.headings.push(Heading {
                            level: level as u8,
                            text,
                            line: heading_line,
                        });
                    }
                }
                TagEnd::TableHead => in_table_head = false,
                TagEnd::Table => {
                    if let Some(shape) = table.take() {
                        outline.tables.push(shape);
                    }
                }
                TagEnd::List(_) => list_depth -= 1,
                _ => {}
            },

            Event::Text(text) | Event::Code(text) => {
                if let Some(heading) = heading_text.as_mut() {
                    heading.push_str(&text);
                }
            }

            Event::Rule => outline.rules += 1,
            Event::TaskListMarker(_) => outline.task_items += 1,
            _ => {}
        }
    }

    outline
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_fixture_has_single_title() {
        let outline = inspect(FIXTURE);
        let titles = outline.headings_at(1);
        assert_eq!(titles.len(), 1);
        assert_eq!(titles[0].text, "Markdown Preview Test Document");
        assert_eq!(titles[0].line, 0);
    }

    #[test]
    fn test_fixture_uses_every_heading_level() {
        let outline = inspect(FIXTURE);
        for level in 1..=6 {
            assert!(
                !outline.headings_at(level).is_empty(),
                "missing level {} heading",
                level
            );
        }
    }

    #[test]
    fn test_fixture_table_shape() {
        let outline = inspect(FIXTURE);
        assert_eq!(outline.tables, vec![TableShape { columns: 4, rows: 5 }]);
    }

    #[test]
    fn test_fixture_code_blocks_are_tagged() {
        let outline = inspect(FIXTURE);
        let languages: Vec<_> = outline
            .code_blocks
            .iter()
            .map(|block| block.language.as_deref())
            .collect();
        assert_eq!(languages, vec![Some("python"), Some("javascript")]);
        assert!(outline.all_code_blocks_tagged());
    }

    #[test]
    fn test_fixture_other_constructs() {
        let outline = inspect(FIXTURE);
        assert_eq!(outline.links, 2);
        assert_eq!(outline.images, 1);
        assert_eq!(outline.blockquotes, 2);
        assert_eq!(outline.rules, 2);
        assert_eq!(outline.ordered_lists, 2);
        assert_eq!(outline.unordered_lists, 4);
        assert_eq!(outline.max_list_depth, 3);
        assert_eq!(outline.task_items, 2);
    }

    #[test]
    fn test_untagged_and_indented_blocks() {
        let outline = inspect("```\nplain\n```\n\n    indented\n");
        assert_eq!(
            outline.code_blocks,
            vec![
                CodeBlock {
                    fenced: true,
                    language: None
                },
                CodeBlock {
                    fenced: false,
                    language: None
                },
            ]
        );
        assert!(!outline.all_code_blocks_tagged());
    }

    #[test]
    fn test_heading_text_includes_inline_code() {
        let outline = inspect("intro\n\n## Using `cargo`\n");
        assert_eq!(
            outline.headings,
            vec![Heading {
                level: 2,
                text: "Using cargo".to_string(),
                line: 2,
            }]
        );
    }

    #[test]
    fn test_empty_document() {
        assert_eq!(inspect(""), DocumentOutline::default());
    }
}
