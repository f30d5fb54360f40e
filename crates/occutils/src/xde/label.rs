//! Document label tree
//!
//! Labels form a tree addressed by entry paths such as `0:1:1:3`. Each label
//! carries optional attributes (name, shape, color, material, references).
//! The fixed sections are:
//!
//! | entry   | section   |
//! |---------|-----------|
//! | `0`     | root      |
//! | `0:1`   | main      |
//! | `0:1:1` | shapes    |
//! | `0:1:2` | colors    |
//! | `0:1:3` | layers    |
//! | `0:1:4` | materials |

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::{ColorRgba, ColorType, Material};
use crate::topology::Shape;

/// Handle to a label of one document
///
/// A handle only resolves in the tree that issued it, and stops resolving
/// once its label is removed, even if the slot is reused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Label(Option<LabelId>);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
struct LabelId {
    tree: Uuid,
    index: usize,
    generation: u32,
}

impl Label {
    pub const NULL: Label = Label(None);

    pub fn is_null(&self) -> bool {
        self.0.is_none()
    }
}

impl Default for Label {
    fn default() -> Self {
        Self::NULL
    }
}

/// Attributes a label may carry
#[derive(Debug, Clone, Default)]
pub(crate) struct Attributes {
    pub name: Option<String>,
    pub shape: Option<Shape>,
    /// Color value (labels in the color section)
    pub color: Option<ColorRgba>,
    /// Material record (labels in the material section)
    pub material: Option<Material>,
    /// Color labels assigned to this label, per color type
    pub color_refs: BTreeMap<ColorType, Label>,
    /// Material label assigned to this label
    pub material_ref: Option<Label>,
    /// Prototype this label instantiates (assembly components)
    pub reference: Option<Label>,
}

#[derive(Debug, Clone)]
struct Node {
    tag: u32,
    parent: Option<usize>,
    children: Vec<usize>,
    next_tag: u32,
    generation: u32,
    removed: bool,
    attributes: Attributes,
}

impl Node {
    fn new(tag: u32, parent: Option<usize>) -> Self {
        Self {
            tag,
            parent,
            children: Vec::new(),
            next_tag: 1,
            generation: 0,
            removed: false,
            attributes: Attributes::default(),
        }
    }
}

/// Arena of labels
///
/// Slots of removed labels are recycled with a bumped generation.
#[derive(Debug, Clone)]
pub struct LabelTree {
    id: Uuid,
    nodes: Vec<Node>,
    free: Vec<usize>,
    main: Label,
    shapes: Label,
    colors: Label,
    layers: Label,
    materials: Label,
}

impl Default for LabelTree {
    fn default() -> Self {
        Self::new()
    }
}

impl LabelTree {
    pub fn new() -> Self {
        let mut tree = Self {
            id: Uuid::new_v4(),
            nodes: vec![Node::new(0, None)],
            free: Vec::new(),
            main: Label::NULL,
            shapes: Label::NULL,
            colors: Label::NULL,
            layers: Label::NULL,
            materials: Label::NULL,
        };
        let root = tree.root();
        tree.main = tree.new_child(root);
        tree.shapes = tree.new_child(tree.main);
        tree.colors = tree.new_child(tree.main);
        tree.layers = tree.new_child(tree.main);
        tree.materials = tree.new_child(tree.main);
        tree
    }

    pub fn root(&self) -> Label {
        self.handle(0)
    }

    pub fn main(&self) -> Label {
        self.main
    }

    pub fn shapes_section(&self) -> Label {
        self.shapes
    }

    pub fn colors_section(&self) -> Label {
        self.colors
    }

    pub fn layers_section(&self) -> Label {
        self.layers
    }

    pub fn materials_section(&self) -> Label {
        self.materials
    }

    // ============== Structure ==============

    /// Append a child with the next free tag; `NULL` if `parent` is invalid
    pub fn new_child(&mut self, parent: Label) -> Label {
        let Some(parent_index) = self.live(parent) else {
            return Label::NULL;
        };
        let tag = self.nodes[parent_index].next_tag;
        self.nodes[parent_index].next_tag += 1;
        let index = match self.free.pop() {
            Some(index) => {
                let generation = self.nodes[index].generation.wrapping_add(1);
                self.nodes[index] = Node::new(tag, Some(parent_index));
                self.nodes[index].generation = generation;
                index
            }
            None => {
                self.nodes.push(Node::new(tag, Some(parent_index)));
                self.nodes.len() - 1
            }
        };
        self.nodes[parent_index].children.push(index);
        self.handle(index)
    }

    /// Detach `label` and its descendants
    pub fn remove(&mut self, label: Label) {
        let Some(index) = self.live(label) else {
            return;
        };
        if let Some(parent) = self.nodes[index].parent {
            self.nodes[parent].children.retain(|child| *child != index);
        }
        let mut pending = vec![index];
        while let Some(current) = pending.pop() {
            let node = &mut self.nodes[current];
            node.removed = true;
            node.attributes = Attributes::default();
            pending.append(&mut node.children);
            self.free.push(current);
        }
    }

    pub fn contains(&self, label: Label) -> bool {
        self.live(label).is_some()
    }

    pub fn parent(&self, label: Label) -> Label {
        self.live(label)
            .and_then(|i| self.nodes[i].parent)
            .map_or(Label::NULL, |p| self.handle(p))
    }

    pub fn children(&self, label: Label) -> Vec<Label> {
        self.live(label)
            .map(|i| self.nodes[i].children.iter().map(|c| self.handle(*c)).collect())
            .unwrap_or_default()
    }

    /// All descendants in depth-first order, `label` excluded
    pub fn descendants(&self, label: Label) -> Vec<Label> {
        let mut result = Vec::new();
        for child in self.children(label) {
            self.collect_depth_first(child, &mut result);
        }
        result
    }

    fn collect_depth_first(&self, label: Label, result: &mut Vec<Label>) {
        result.push(label);
        for child in self.children(label) {
            self.collect_depth_first(child, result);
        }
    }

    /// Entry path such as `0:1:1:3`
    pub fn entry(&self, label: Label) -> Option<String> {
        let mut index = self.live(label)?;
        let mut tags = vec![self.nodes[index].tag];
        while let Some(parent) = self.nodes[index].parent {
            tags.push(self.nodes[parent].tag);
            index = parent;
        }
        Some(
            tags.iter()
                .rev()
                .map(|t| t.to_string())
                .collect::<Vec<_>>()
                .join(":"),
        )
    }

    /// Label at an entry path
    pub fn find(&self, entry: &str) -> Label {
        let mut tags = entry.split(':').map(|t| t.parse::<u32>());
        if !matches!(tags.next(), Some(Ok(0))) {
            return Label::NULL;
        }
        let mut current = self.root();
        for tag in tags {
            let Ok(tag) = tag else {
                return Label::NULL;
            };
            match self
                .children(current)
                .into_iter()
                .find(|child| self.tag(*child) == Some(tag))
            {
                Some(child) => current = child,
                None => return Label::NULL,
            }
        }
        current
    }

    pub fn tag(&self, label: Label) -> Option<u32> {
        self.live(label).map(|i| self.nodes[i].tag)
    }

    // ============== Attributes ==============

    pub(crate) fn attributes(&self, label: Label) -> Option<&Attributes> {
        self.live(label).map(|i| &self.nodes[i].attributes)
    }

    pub(crate) fn attributes_mut(&mut self, label: Label) -> Option<&mut Attributes> {
        self.live(label).map(|i| &mut self.nodes[i].attributes)
    }

    pub fn name(&self, label: Label) -> Option<&str> {
        self.attributes(label)?.name.as_deref()
    }

    pub fn set_name(&mut self, label: Label, name: impl Into<String>) {
        if let Some(attributes) = self.attributes_mut(label) {
            attributes.name = Some(name.into());
        }
    }

    /// Number of slots in the arena, live or free
    pub fn capacity(&self) -> usize {
        self.nodes.len()
    }

    fn handle(&self, index: usize) -> Label {
        Label(Some(LabelId {
            tree: self.id,
            index,
            generation: self.nodes[index].generation,
        }))
    }

    fn live(&self, label: Label) -> Option<usize> {
        let id = label.0?;
        if id.tree != self.id {
            return None;
        }
        let node = self.nodes.get(id.index)?;
        (!node.removed && node.generation == id.generation).then_some(id.index)
    }
}
