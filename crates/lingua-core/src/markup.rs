//! Message renderer.
//!
//! A single-pass, line-oriented pass over message text that recognizes
//! fenced code, ordered and unordered list items, and paragraphs.
//! [`parse_blocks`] produces a block list the egui chat panel draws
//! natively; [`render_to_markup`] turns the same blocks into escaped HTML.

const FENCE: &str = "```";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListKind {
    Ordered,
    Unordered,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Block {
    /// A non-blank line, trimmed
    Paragraph(String),
    /// A blank line that is not the last line
    Spacer,
    List { kind: ListKind, items: Vec<String> },
    /// Body of a fenced block with common indentation removed
    Code(String),
}

pub fn render_to_markup(raw: &str) -> String {
    render_blocks(&parse_blocks(raw))
}

pub fn parse_blocks(raw: &str) -> Vec<Block> {
    let lines: Vec<&str> = raw.split('\n').collect();
    let last = lines.len() - 1;

    let mut blocks = Vec::new();
    let mut list: Option<(ListKind, Vec<String>)> = None;
    let mut code: Option<Vec<&str>> = None;

    for (index, line) in lines.iter().enumerate() {
        let trimmed = line.trim();

        if trimmed.starts_with(FENCE) {
            match code.take() {
                Some(body) => blocks.push(Block::Code(normalize_code_indentation(&body))),
                None => {
                    close_list(&mut list, &mut blocks);
                    code = Some(Vec::new());
                }
            }
            continue;
        }

        if let Some(body) = code.as_mut() {
            body.push(line);
            continue;
        }

        if let Some((kind, item)) = list_item(trimmed) {
            // An open list takes items of either kind; its opening marker wins
            match list.as_mut() {
                Some((_, items)) => items.push(item.to_string()),
                None => list = Some((kind, vec![item.to_string()])),
            }
            continue;
        }

        close_list(&mut list, &mut blocks);
        if !trimmed.is_empty() {
            blocks.push(Block::Paragraph(trimmed.to_string()));
        } else if index < last {
            blocks.push(Block::Spacer);
        }
    }

    close_list(&mut list, &mut blocks);
    // Unterminated fence: render what we collected
    if let Some(body) = code {
        blocks.push(Block::Code(normalize_code_indentation(&body)));
    }

    blocks
}

pub fn render_blocks(blocks: &[Block]) -> String {
    let mut html = String::new();
    for block in blocks {
        match block {
            Block::Paragraph(text) => {
                html.push_str("<p>");
                html.push_str(&escape_html(text));
                html.push_str("</p>");
            }
            Block::Spacer => html.push_str("<p></p>"),
            Block::List { kind, items } => {
                let tag = match kind {
                    ListKind::Ordered => "ol",
                    ListKind::Unordered => "ul",
                };
                html.push_str(&format!("<{}>", tag));
                for item in items {
                    html.push_str("<li>");
                    html.push_str(&escape_html(item));
                    html.push_str("</li>");
                }
                html.push_str(&format!("</{}>", tag));
            }
            Block::Code(body) => {
                html.push_str("<pre><button class=\"copy-btn\">Copy</button><code>");
                html.push_str(&escape_html(body));
                html.push_str("</code></pre>");
            }
        }
    }
    html
}

/// Strip the smallest leading-whitespace width shared by the block's lines.
/// Blank lines and stray fence lines are dropped from the body.
pub fn normalize_code_indentation(lines: &[&str]) -> String {
    let kept: Vec<&str> = lines
        .iter()
        .copied()
        .filter(|l| {
            let t = l.trim();
            !t.is_empty() && !t.starts_with(FENCE)
        })
        .collect();

    let min_indent = match kept.iter().map(|l| leading_whitespace(l)).min() {
        Some(n) => n,
        None => return String::new(),
    };

    kept.iter()
        .map(|line| {
            if min_indent > 0 && line.chars().count() > min_indent {
                let offset = line
                    .char_indices()
                    .nth(min_indent)
                    .map(|(i, _)| i)
                    .unwrap_or(line.len());
                &line[offset..]
            } else {
                line
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}

pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

fn close_list(list: &mut Option<(ListKind, Vec<String>)>, blocks: &mut Vec<Block>) {
    if let Some((kind, items)) = list.take() {
        blocks.push(Block::List { kind, items });
    }
}

/// Match `^\d+\.\s` or `^[*|-]\s` on a trimmed line and return the item text
/// after the marker and its single whitespace character.
fn list_item(trimmed: &str) -> Option<(ListKind, &str)> {
    let digits = trimmed.len() - trimmed.trim_start_matches(|c: char| c.is_ascii_digit()).len();
    if digits > 0 {
        let rest = trimmed[digits..].strip_prefix('.')?;
        return after_space(rest).map(|item| (ListKind::Ordered, item));
    }

    let rest = trimmed.strip_prefix(['*', '|', '-'])?;
    after_space(rest).map(|item| (ListKind::Unordered, item))
}

fn after_space(rest: &str) -> Option<&str> {
    let mut chars = rest.chars();
    match chars.next() {
        Some(c) if c.is_whitespace() => Some(chars.as_str()),
        _ => None,
    }
}

fn leading_whitespace(line: &str) -> usize {
    line.chars().take_while(|c| c.is_whitespace()).count()
}
