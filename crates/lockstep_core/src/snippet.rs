//! Source excerpt rendering for prompts and diagnostics.
//!
//! An excerpt is the node's position followed by its quoted source text.
//! Container kinds (blocks, functions, whole programs) are truncated to
//! the configured snippet length so a prompt stays one screenful.

use lockstep_ast::{NodeId, SourceFile, Tree};

use crate::CompareConfig;

/// Renders a node as `line,column: "excerpt"`, truncating container kinds.
pub fn render(tree: &Tree, source: &SourceFile, id: NodeId, config: &CompareConfig) -> String {
    let node = tree.node(id);
    let mut text = source.slice(node.span).to_string();

    if node.kind.is_container() && node.span.len() as usize > config.snippet_length {
        let cut = floor_char_boundary(&text, config.snippet_length);
        text.truncate(cut);
        text.push_str(" ...");
    }

    format(source, id, tree, text, config)
}

/// Renders a node without truncation, for explicit inspection commands.
pub fn render_full(
    tree: &Tree,
    source: &SourceFile,
    id: NodeId,
    config: &CompareConfig,
) -> String {
    let node = tree.node(id);
    let text = source.slice(node.span).to_string();
    format(source, id, tree, text, config)
}

fn format(
    source: &SourceFile,
    id: NodeId,
    tree: &Tree,
    mut text: String,
    config: &CompareConfig,
) -> String {
    if config.flatten_newlines {
        text = text.replace('\n', " ");
    }
    let position = source.position(tree.node(id).span.start);
    format!("{position}: \"{text}\"")
}

/// Largest byte index `<= at` that lies on a char boundary of `s`.
fn floor_char_boundary(s: &str, at: usize) -> usize {
    if at >= s.len() {
        return s.len();
    }
    let mut idx = at;
    while !s.is_char_boundary(idx) {
        idx -= 1;
    }
    idx
}
