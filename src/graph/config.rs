//! Rendering configuration for the AST graph text.

/// Graph rendering configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GraphConfig {
    /// Name written after `digraph`
    pub graph_name: String,
    /// Default shape applied to every node
    pub node_shape: String,
    /// Prefix joined with the numeric node id (`n12`)
    pub id_prefix: String,
    /// Number of spaces before each node and edge statement
    pub indent_width: usize,
}

impl Default for GraphConfig {
    fn default() -> Self {
        Self {
            graph_name: "AST".to_string(),
            node_shape: "box".to_string(),
            id_prefix: "n".to_string(),
            indent_width: 1,
        }
    }
}

impl GraphConfig {
    /// Create a new config with default settings
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the graph name
    pub fn with_graph_name(mut self, name: impl Into<String>) -> Self {
        self.graph_name = name.into();
        self
    }

    /// Set the node shape
    pub fn with_node_shape(mut self, shape: impl Into<String>) -> Self {
        self.node_shape = shape.into();
        self
    }

    /// Set the node id prefix
    pub fn with_id_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.id_prefix = prefix.into();
        self
    }

    /// Set the statement indentation width
    pub fn with_indent_width(mut self, width: usize) -> Self {
        self.indent_width = width;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = GraphConfig::default();
        assert_eq!(config.graph_name, "AST");
        assert_eq!(config.node_shape, "box");
        assert_eq!(config.id_prefix, "n");
        assert_eq!(config.indent_width, 1);
    }

    #[test]
    fn test_new_equals_default() {
        assert_eq!(GraphConfig::new(), GraphConfig::default());
    }

    #[test]
    fn test_with_graph_name() {
        let config = GraphConfig::new().with_graph_name("Tree");
        assert_eq!(config.graph_name, "Tree");
        // Other fields unchanged
        assert_eq!(config.node_shape, "box");
    }

    #[test]
    fn test_builder_chain_all() {
        let config = GraphConfig::new()
            .with_graph_name("G")
            .with_node_shape("ellipse")
            .with_id_prefix("node")
            .with_indent_width(4);
        assert_eq!(config.graph_name, "G");
        assert_eq!(config.node_shape, "ellipse");
        assert_eq!(config.id_prefix, "node");
        assert_eq!(config.indent_width, 4);
    }
}
