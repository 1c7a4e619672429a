//! Output writer for graph statements
//!
//! Tracks the statement indentation and counts what has been written, so callers can check the
//! output against the tree they walked.

use super::config::GraphConfig;

/// Writer that builds graph text one statement per line
pub struct GraphWriter {
    /// The output buffer
    output: String,
    /// Current indentation level
    indent_level: usize,
    /// Configuration
    config: GraphConfig,
    nodes: usize,
    edges: usize,
}

impl GraphWriter {
    /// Create a new graph writer with the given config
    pub fn new(config: GraphConfig) -> Self {
        Self {
            output: String::new(),
            indent_level: 0,
            config,
            nodes: 0,
            edges: 0,
        }
    }

    /// Get the rendered output
    pub fn finish(self) -> String {
        self.output
    }

    /// Increase indentation level
    pub fn indent(&mut self) {
        self.indent_level += 1;
    }

    /// Decrease indentation level
    pub fn dedent(&mut self) {
        if self.indent_level > 0 {
            self.indent_level -= 1;
        }
    }

    /// Write one line at the current indentation. Lines after the first are newline-separated.
    pub fn writeln(&mut self, s: &str) {
        if !self.output.is_empty() {
            self.output.push('\n');
        }
        let indent = " ".repeat(self.indent_level * self.config.indent_width);
        self.output.push_str(&indent);
        self.output.push_str(s);
    }

    /// `n3 [label="..."];`
    pub fn node(&mut self, id: u32, label: &str) {
        let line = format!("{}{id} [label=\"{}\"];", self.config.id_prefix, escape_label(label));
        self.writeln(&line);
        self.nodes += 1;
    }

    /// `n0 -> n3;`
    pub fn edge(&mut self, parent: u32, child: u32) {
        let prefix = &self.config.id_prefix;
        let line = format!("{prefix}{parent} -> {prefix}{child};");
        self.writeln(&line);
        self.edges += 1;
    }

    pub fn node_count(&self) -> usize {
        self.nodes
    }

    pub fn edge_count(&self) -> usize {
        self.edges
    }

    /// Get the configuration
    pub fn config(&self) -> &GraphConfig {
        &self.config
    }
}

/// Escape a label for a double-quoted graph string.
///
/// Line breaks become the two-character `\n` escape the renderer understands.
pub fn escape_label(label: &str) -> String {
    let mut out = String::with_capacity(label.len());
    for c in label.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '"' => out.push_str("\\\""),
            '\n' => out.push_str("\\n"),
            '\r' => {}
            c => out.push(c),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn default_writer() -> GraphWriter {
        GraphWriter::new(GraphConfig::default())
    }

    #[test]
    fn test_new_writer_empty_output() {
        let writer = default_writer();
        assert_eq!(writer.finish(), "");
    }

    #[test]
    fn test_writeln_separates_lines() {
        let mut writer = default_writer();
        writer.writeln("digraph AST {");
        writer.writeln("}");
        assert_eq!(writer.finish(), "digraph AST {\n}");
    }

    #[test]
    fn test_indent_applies_config_width() {
        let mut writer = GraphWriter::new(GraphConfig::new().with_indent_width(2));
        writer.indent();
        writer.node(1, "If");
        assert_eq!(writer.finish(), "  n1 [label=\"If\"];");
    }

    #[test]
    fn test_dedent_at_zero_stays_zero() {
        let mut writer = default_writer();
        writer.dedent();
        writer.writeln("x");
        assert_eq!(writer.finish(), "x");
    }

    #[test]
    fn test_edge_uses_prefix_and_counts() {
        let mut writer = GraphWriter::new(GraphConfig::new().with_id_prefix("node"));
        writer.edge(0, 4);
        writer.edge(0, 5);
        assert_eq!(writer.edge_count(), 2);
        assert_eq!(writer.node_count(), 0);
        assert_eq!(writer.finish(), "node0 -> node4;\nnode0 -> node5;");
    }

    #[test]
    fn test_escape_label() {
        assert_eq!(escape_label("Var\nx"), "Var\\nx");
        assert_eq!(escape_label("say \"hi\""), "say \\\"hi\\\"");
        assert_eq!(escape_label("a\\b"), "a\\\\b");
        assert_eq!(escape_label("plain"), "plain");
    }
}
