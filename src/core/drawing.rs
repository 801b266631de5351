//! In-memory drawing document
//!
//! A [`Drawing`] is the plain-text host the CLI annotates: a header, a layer
//! table and an ordered model space, serialized as YAML. It implements
//! [`DrawingDatabase`] and [`Transactional`] so the annotation pipeline can
//! run against it directly.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};

use crate::core::database::{DrawingDatabase, DrawingError, Transactional};
use crate::core::entity::DEFAULT_LAYER;
use crate::core::identity::Handle;
use crate::entities::{Dimension, DrawingEntity, LayerRecord};

/// Drawing metadata
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DrawingHeader {
    /// Drawing title
    #[serde(default)]
    pub title: String,

    /// Linear units (mm, in, etc.)
    #[serde(default = "default_units")]
    pub units: String,

    /// Last committed edit
    #[serde(default = "Utc::now")]
    pub updated: DateTime<Utc>,
}

fn default_units() -> String {
    "mm".to_string()
}

impl Default for DrawingHeader {
    fn default() -> Self {
        Self {
            title: String::new(),
            units: default_units(),
            updated: Utc::now(),
        }
    }
}

/// The serialized form of a drawing
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DrawingFile {
    #[serde(default)]
    pub header: DrawingHeader,

    #[serde(default)]
    pub layers: Vec<LayerRecord>,

    /// Model space, in drawing order
    #[serde(default)]
    pub entities: Vec<DrawingEntity>,
}

/// A drawing with lookup indexes and a single-level transaction
#[derive(Debug, Clone)]
pub struct Drawing {
    file: DrawingFile,
    by_handle: HashMap<Handle, usize>,
    // First table in model space order for each layer
    tables_by_layer: HashMap<String, Handle>,
    snapshot: Option<DrawingFile>,
}

impl Default for Drawing {
    fn default() -> Self {
        Self::new("")
    }
}

impl Drawing {
    /// Create an empty drawing containing only layer "0"
    pub fn new(title: impl Into<String>) -> Self {
        let file = DrawingFile {
            header: DrawingHeader {
                title: title.into(),
                ..DrawingHeader::default()
            },
            layers: vec![LayerRecord::new(DEFAULT_LAYER)],
            entities: Vec::new(),
        };
        let by_handle = file
            .layers
            .iter()
            .map(|l| (l.handle.clone(), usize::MAX))
            .collect();
        Self {
            file,
            by_handle,
            tables_by_layer: HashMap::new(),
            snapshot: None,
        }
    }

    /// Build a drawing from its serialized form, checking handle and layer integrity
    ///
    /// Layer "0" is added if the file does not declare it.
    pub fn from_file(mut file: DrawingFile) -> Result<Self, DrawingError> {
        let mut seen_layers = HashSet::new();
        for layer in &file.layers {
            if !seen_layers.insert(layer.name.as_str()) {
                return Err(DrawingError::LayerExists(layer.name.clone()));
            }
        }
        if !file.layers.iter().any(|l| l.name == DEFAULT_LAYER) {
            file.layers.insert(0, LayerRecord::new(DEFAULT_LAYER));
        }

        for entity in &file.entities {
            if !file.layers.iter().any(|l| l.name == entity.layer()) {
                return Err(DrawingError::UnknownLayer(entity.layer().to_string()));
            }
        }

        let mut drawing = Self {
            file,
            by_handle: HashMap::new(),
            tables_by_layer: HashMap::new(),
            snapshot: None,
        };
        drawing.rebuild_indexes()?;
        Ok(drawing)
    }

    /// The serialized form of this drawing
    pub fn file(&self) -> &DrawingFile {
        &self.file
    }

    pub fn header(&self) -> &DrawingHeader {
        &self.file.header
    }

    pub fn layers(&self) -> &[LayerRecord] {
        &self.file.layers
    }

    /// Model space entities in drawing order
    pub fn entities(&self) -> &[DrawingEntity] {
        &self.file.entities
    }

    /// Every dimension in model space, in drawing order
    pub fn dimensions(&self) -> impl Iterator<Item = &Dimension> {
        self.file.entities.iter().filter_map(DrawingEntity::as_dimension)
    }

    /// Number of model space entities on a layer
    pub fn count_on_layer(&self, layer: &str) -> usize {
        self.file
            .entities
            .iter()
            .filter(|e| e.layer() == layer)
            .count()
    }

    /// Whether a transaction is currently open
    pub fn in_transaction(&self) -> bool {
        self.snapshot.is_some()
    }

    fn rebuild_indexes(&mut self) -> Result<(), DrawingError> {
        self.by_handle.clear();
        self.tables_by_layer.clear();

        for layer in &self.file.layers {
            if self.by_handle.contains_key(&layer.handle) {
                return Err(DrawingError::DuplicateHandle(layer.handle.clone()));
            }
            // Layer handles share the namespace but never resolve to an entity
            self.by_handle.insert(layer.handle.clone(), usize::MAX);
        }

        for (idx, entity) in self.file.entities.iter().enumerate() {
            let handle = entity.handle().clone();
            if self.by_handle.contains_key(&handle) {
                return Err(DrawingError::DuplicateHandle(handle));
            }
            self.by_handle.insert(handle.clone(), idx);
            if let DrawingEntity::Table(table) = entity {
                self.tables_by_layer
                    .entry(table.layer.clone())
                    .or_insert(handle);
            }
        }

        Ok(())
    }
}

impl DrawingDatabase for Drawing {
    fn find_layer(&self, name: &str) -> Option<Handle> {
        self.file
            .layers
            .iter()
            .find(|l| l.name == name)
            .map(|l| l.handle.clone())
    }

    fn add_layer(&mut self, layer: LayerRecord) -> Result<Handle, DrawingError> {
        if self.find_layer(&layer.name).is_some() {
            return Err(DrawingError::LayerExists(layer.name));
        }
        if self.by_handle.contains_key(&layer.handle) {
            return Err(DrawingError::DuplicateHandle(layer.handle));
        }

        let handle = layer.handle.clone();
        self.by_handle.insert(handle.clone(), usize::MAX);
        self.file.layers.push(layer);
        Ok(handle)
    }

    fn handles(&self) -> Vec<Handle> {
        self.file
            .entities
            .iter()
            .map(|e| e.handle().clone())
            .collect()
    }

    fn entity(&self, handle: &Handle) -> Option<&DrawingEntity> {
        self.by_handle
            .get(handle)
            .and_then(|&idx| self.file.entities.get(idx))
    }

    fn append_entity(&mut self, entity: DrawingEntity) -> Result<Handle, DrawingError> {
        if self.find_layer(entity.layer()).is_none() {
            return Err(DrawingError::UnknownLayer(entity.layer().to_string()));
        }
        let handle = entity.handle().clone();
        if self.by_handle.contains_key(&handle) {
            return Err(DrawingError::DuplicateHandle(handle));
        }

        if let DrawingEntity::Table(ref table) = entity {
            self.tables_by_layer
                .entry(table.layer.clone())
                .or_insert_with(|| handle.clone());
        }
        self.by_handle.insert(handle.clone(), self.file.entities.len());
        self.file.entities.push(entity);
        Ok(handle)
    }

    fn table_on_layer(&self, layer: &str) -> Option<Handle> {
        self.tables_by_layer.get(layer).cloned()
    }

    fn append_table_row(
        &mut self,
        table: &Handle,
        height: f64,
        cells: Vec<String>,
    ) -> Result<usize, DrawingError> {
        let idx = *self
            .by_handle
            .get(table)
            .ok_or_else(|| DrawingError::NotFound(table.clone()))?;

        match self.file.entities.get_mut(idx) {
            Some(DrawingEntity::Table(t)) => Ok(t.insert_row(height, cells)),
            Some(_) => Err(DrawingError::NotATable(table.clone())),
            None => Err(DrawingError::NotFound(table.clone())),
        }
    }
}

impl Transactional for Drawing {
    fn begin(&mut self) -> Result<(), DrawingError> {
        if self.snapshot.is_some() {
            return Err(DrawingError::TransactionActive);
        }
        self.snapshot = Some(self.file.clone());
        Ok(())
    }

    fn commit(&mut self) -> Result<(), DrawingError> {
        if self.snapshot.take().is_none() {
            return Err(DrawingError::NoTransaction);
        }
        self.file.header.updated = Utc::now();
        Ok(())
    }

    fn rollback(&mut self) {
        if let Some(previous) = self.snapshot.take() {
            self.file = previous;
            // Snapshot was index-consistent when taken
            let rebuilt = self.rebuild_indexes();
            debug_assert!(rebuilt.is_ok(), "rolled back to an inconsistent snapshot: {:?}", rebuilt);
        }
    }
}
