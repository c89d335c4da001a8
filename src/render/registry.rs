//! Name -> renderer constructor table

use super::column::ColumnRenderer;
use super::grid3d::Grid3dRenderer;
use super::line::LineRenderer;
use super::properties::Properties;
use super::traits::FrameRenderer;
use crate::error::VisualiserError;

/// Builds a renderer from property overrides
pub type RendererFactory = fn(&Properties) -> Result<Box<dyn FrameRenderer>, VisualiserError>;

/// Renderers selectable by name
#[derive(Clone)]
pub struct RendererRegistry {
    entries: Vec<(&'static str, RendererFactory)>,
}

impl RendererRegistry {
    /// Empty registry
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Registry holding `column`, `line` and `grid3d`
    pub fn with_builtin() -> Self {
        Self::new()
            .register("column", column)
            .register("line", line)
            .register("grid3d", grid3d)
    }

    /// Add or replace the renderer registered as `name`
    pub fn register(mut self, name: &'static str, factory: RendererFactory) -> Self {
        self.entries.retain(|(n, _)| *n != name);
        self.entries.push((name, factory));
        self
    }

    pub fn names(&self) -> Vec<&'static str> {
        self.entries.iter().map(|(n, _)| *n).collect()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.entries.iter().any(|(n, _)| *n == name)
    }

    /// Instantiate `name` with `properties` applied over its defaults
    pub fn create(
        &self,
        name: &str,
        properties: &Properties,
    ) -> Result<Box<dyn FrameRenderer>, VisualiserError> {
        let (_, factory) = self
            .entries
            .iter()
            .find(|(n, _)| n.eq_ignore_ascii_case(name))
            .ok_or_else(|| VisualiserError::UnsupportedRenderer {
                name: name.to_string(),
                known: self.names().iter().map(|n| n.to_string()).collect(),
            })?;

        log::debug!("Creating renderer '{}'", name);
        factory(properties)
    }
}

fn column(props: &Properties) -> Result<Box<dyn FrameRenderer>, VisualiserError> {
    Ok(Box::new(ColumnRenderer::with_properties(props)?))
}

fn line(props: &Properties) -> Result<Box<dyn FrameRenderer>, VisualiserError> {
    Ok(Box::new(LineRenderer::with_properties(props)?))
}

fn grid3d(props: &Properties) -> Result<Box<dyn FrameRenderer>, VisualiserError> {
    Ok(Box::new(Grid3dRenderer::with_properties(props)?))
}

impl Default for RendererRegistry {
    fn default() -> Self {
        Self::with_builtin()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_names() {
        let registry = RendererRegistry::with_builtin();
        assert_eq!(registry.names(), vec!["column", "line", "grid3d"]);
        assert!(registry.contains("grid3d"));
    }

    #[test]
    fn test_create_by_name() {
        let registry = RendererRegistry::default();
        let renderer = registry.create("line", &Properties::new()).unwrap();
        assert_eq!(renderer.name(), "line");
        // case-insensitive lookup
        let renderer = registry.create("Column", &Properties::new()).unwrap();
        assert_eq!(renderer.name(), "column");
    }

    #[test]
    fn test_unknown_renderer() {
        let registry = RendererRegistry::with_builtin();
        let err = registry.create("spiral", &Properties::new()).err().unwrap();
        match err {
            VisualiserError::UnsupportedRenderer { name, known } => {
                assert_eq!(name, "spiral");
                assert_eq!(known.len(), 3);
            }
            other => panic!("unexpected error: {}", other),
        }
    }

    #[test]
    fn test_register_replaces() {
        let registry = RendererRegistry::new()
            .register("bars", column)
            .register("bars", line);
        assert_eq!(registry.names(), vec!["bars"]);
        assert_eq!(registry.create("bars", &Properties::new()).unwrap().name(), "line");
    }
}
