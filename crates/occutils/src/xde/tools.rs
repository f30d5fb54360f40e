//! Shape, color and material tools over a [`LabelTree`]
//!
//! Each tool wraps either `&LabelTree` (queries only) or `&mut LabelTree`
//! (queries and edits).

use std::ops::{Deref, DerefMut};

use super::label::{Label, LabelTree};
use super::{ColorRgba, ColorType, Material};
use crate::compound;
use crate::topology::{Shape, explore};

/// Shapes, assemblies, components and sub-shapes
pub struct ShapeTool<T> {
    tree: T,
}

impl<T: Deref<Target = LabelTree>> ShapeTool<T> {
    pub fn new(tree: T) -> Self {
        Self { tree }
    }

    /// Shape stored at `label`; components yield their prototype's shape
    pub fn shape(&self, label: Label) -> Option<Shape> {
        let attributes = self.tree.attributes(label)?;
        match (&attributes.shape, attributes.reference) {
            (Some(shape), _) => Some(shape.clone()),
            (None, Some(prototype)) => self.shape(prototype),
            (None, None) => None,
        }
    }

    /// Top-level shape labels not instantiated by any component
    pub fn free_shapes(&self) -> Vec<Label> {
        let top_level = self.tree.children(self.tree.shapes_section());
        let referenced: Vec<Label> = self
            .tree
            .descendants(self.tree.shapes_section())
            .into_iter()
            .filter_map(|l| self.referred_shape(l))
            .collect();
        top_level
            .into_iter()
            .filter(|l| !referenced.contains(l))
            .collect()
    }

    pub fn is_reference(&self, label: Label) -> bool {
        self.referred_shape(label).is_some()
    }

    pub fn referred_shape(&self, label: Label) -> Option<Label> {
        self.tree.attributes(label)?.reference
    }

    /// A label with at least one component
    pub fn is_assembly(&self, label: Label) -> bool {
        self.tree
            .children(label)
            .into_iter()
            .any(|child| self.is_reference(child))
    }

    /// Component labels of an assembly; `recursive` also descends into
    /// sub-assemblies
    pub fn components(&self, label: Label, recursive: bool) -> Vec<Label> {
        let mut result = Vec::new();
        for child in self.tree.children(label) {
            let Some(prototype) = self.referred_shape(child) else {
                continue;
            };
            result.push(child);
            if recursive && self.is_assembly(prototype) {
                result.extend(self.components(prototype, true));
            }
        }
        result
    }

    /// `target` is `label`, lies below it, or is instantiated by it at any
    /// depth
    pub fn reaches(&self, label: Label, target: Label) -> bool {
        let mut visited = Vec::new();
        let mut pending = vec![label];
        while let Some(current) = pending.pop() {
            if visited.contains(&current) {
                continue;
            }
            if current == target {
                return true;
            }
            visited.push(current);
            pending.extend(self.referred_shape(current));
            for descendant in self.tree.descendants(current) {
                if descendant == target {
                    return true;
                }
                pending.extend(self.referred_shape(descendant));
            }
        }
        false
    }

    /// Labels of sub-shapes registered below `label`
    pub fn sub_shapes(&self, label: Label) -> Vec<Label> {
        self.tree
            .children(label)
            .into_iter()
            .filter(|child| !self.is_reference(*child))
            .filter(|child| {
                self.tree
                    .attributes(*child)
                    .is_some_and(|a| a.shape.is_some())
            })
            .collect()
    }

    /// Sub-shape label of `label` holding `sub_shape`
    pub fn find_sub_shape(&self, label: Label, sub_shape: &Shape) -> Option<Label> {
        self.sub_shapes(label)
            .into_iter()
            .find(|l| self.shape(*l).is_some_and(|s| s.is_same(sub_shape)))
    }
}

impl<T: DerefMut<Target = LabelTree>> ShapeTool<T> {
    /// Fresh empty label in the shape section
    pub fn new_shape(&mut self) -> Label {
        let section = self.tree.shapes_section();
        self.tree.new_child(section)
    }

    pub fn set_shape(&mut self, label: Label, shape: Shape) {
        if let Some(attributes) = self.tree.attributes_mut(label) {
            attributes.shape = Some(shape);
        }
    }

    /// New shape label holding `shape`
    pub fn add_shape(&mut self, shape: Shape) -> Label {
        let label = self.new_shape();
        self.set_shape(label, shape);
        label
    }

    /// Instantiate `prototype` inside `assembly`
    ///
    /// The assembly's shape becomes the compound of its component shapes.
    /// Returns `NULL` if the prototype is missing or already contains the
    /// assembly, since that would make the assembly contain itself.
    pub fn add_component(&mut self, assembly: Label, prototype: Label) -> Label {
        if !self.tree.contains(prototype) || !self.tree.contains(assembly) {
            return Label::NULL;
        }
        if self.reaches(prototype, assembly) {
            tracing::warn!("Rejected component: prototype already contains the assembly");
            return Label::NULL;
        }
        let component = self.tree.new_child(assembly);
        if let Some(attributes) = self.tree.attributes_mut(component) {
            attributes.reference = Some(prototype);
        }
        self.update_assembly(assembly);
        component
    }

    /// Register `sub_shape` (which must be part of the shape at `label`)
    ///
    /// Returns the existing label if the sub-shape is already registered.
    pub fn add_sub_shape(&mut self, label: Label, sub_shape: &Shape) -> Label {
        if let Some(existing) = self.find_sub_shape(label, sub_shape) {
            return existing;
        }
        let Some(shape) = self.shape(label) else {
            return Label::NULL;
        };
        let contained = explore(&shape, sub_shape.shape_type())
            .iter()
            .any(|s| s.is_same(sub_shape));
        if !contained {
            return Label::NULL;
        }
        let sub_label = self.tree.new_child(label);
        self.set_shape(sub_label, sub_shape.clone());
        sub_label
    }

    fn update_assembly(&mut self, assembly: Label) {
        let shapes: Vec<Shape> = self
            .components(assembly, false)
            .into_iter()
            .filter_map(|c| self.shape(c))
            .collect();
        self.set_shape(assembly, compound::from(shapes).into());
    }
}

/// Color table and color assignments
pub struct ColorTool<T> {
    tree: T,
}

impl<T: Deref<Target = LabelTree>> ColorTool<T> {
    pub fn new(tree: T) -> Self {
        Self { tree }
    }

    /// All color labels
    pub fn colors(&self) -> Vec<Label> {
        self.tree.children(self.tree.colors_section())
    }

    /// Value stored at a color label
    pub fn color_value(&self, color_label: Label) -> Option<ColorRgba> {
        self.tree.attributes(color_label)?.color
    }

    /// Color label holding exactly `color`
    pub fn find_color(&self, color: ColorRgba) -> Option<Label> {
        self.colors()
            .into_iter()
            .find(|l| self.color_value(*l) == Some(color))
    }

    /// Color of `color_type` assigned directly to `label`
    pub fn color(&self, label: Label, color_type: ColorType) -> Option<ColorRgba> {
        let color_label = *self.tree.attributes(label)?.color_refs.get(&color_type)?;
        self.color_value(color_label)
    }

    pub fn is_set(&self, label: Label, color_type: ColorType) -> bool {
        self.color(label, color_type).is_some()
    }
}

impl<T: DerefMut<Target = LabelTree>> ColorTool<T> {
    /// Color label for `color`, created if missing
    pub fn add_color(&mut self, color: ColorRgba) -> Label {
        if let Some(existing) = self.find_color(color) {
            return existing;
        }
        let section = self.tree.colors_section();
        let label = self.tree.new_child(section);
        if let Some(attributes) = self.tree.attributes_mut(label) {
            attributes.color = Some(color);
        }
        label
    }

    pub fn set_color(&mut self, label: Label, color: ColorRgba, color_type: ColorType) {
        if !self.tree.contains(label) {
            return;
        }
        let color_label = self.add_color(color);
        if let Some(attributes) = self.tree.attributes_mut(label) {
            attributes.color_refs.insert(color_type, color_label);
        }
    }

    pub fn unset_color(&mut self, label: Label, color_type: ColorType) {
        if let Some(attributes) = self.tree.attributes_mut(label) {
            attributes.color_refs.remove(&color_type);
        }
    }

    /// Delete a color label and every assignment of it
    pub fn remove_color(&mut self, color_label: Label) {
        let all = self.tree.descendants(self.tree.root());
        for label in all {
            if let Some(attributes) = self.tree.attributes_mut(label) {
                attributes.color_refs.retain(|_, c| *c != color_label);
            }
        }
        self.tree.remove(color_label);
    }
}

/// Material table and material assignments
pub struct MaterialTool<T> {
    tree: T,
}

impl<T: Deref<Target = LabelTree>> MaterialTool<T> {
    pub fn new(tree: T) -> Self {
        Self { tree }
    }

    pub fn material_labels(&self) -> Vec<Label> {
        self.tree.children(self.tree.materials_section())
    }

    pub fn material(&self, material_label: Label) -> Option<Material> {
        self.tree.attributes(material_label)?.material.clone()
    }

    /// Material label assigned to a shape label
    pub fn shape_material(&self, shape_label: Label) -> Option<Label> {
        self.tree.attributes(shape_label)?.material_ref
    }
}

impl<T: DerefMut<Target = LabelTree>> MaterialTool<T> {
    /// New material label (no de-duplication)
    pub fn add_material(&mut self, material: Material) -> Label {
        let section = self.tree.materials_section();
        let label = self.tree.new_child(section);
        let name = material.name.clone();
        if let Some(attributes) = self.tree.attributes_mut(label) {
            attributes.material = Some(material);
        }
        if !name.is_empty() {
            self.tree.set_name(label, name);
        }
        label
    }

    pub fn set_material(&mut self, shape_label: Label, material_label: Label) {
        if self.material(material_label).is_none() {
            return;
        }
        if let Some(attributes) = self.tree.attributes_mut(shape_label) {
            attributes.material_ref = Some(material_label);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::primitive::{self, PositionCentering};
    use crate::shape_components::all_faces_within;
    use glam::DVec3;

    fn cube() -> Shape {
        primitive::make_cube(1.0, PositionCentering::DoNotCenter, DVec3::ZERO)
            .unwrap()
            .as_shape()
    }

    #[test]
    fn test_assembly_components() {
        let mut tree = LabelTree::new();
        let mut tool = ShapeTool::new(&mut tree);
        let part = tool.add_shape(cube());
        let assembly = tool.new_shape();
        let first = tool.add_component(assembly, part);
        let second = tool.add_component(assembly, part);

        assert!(tool.is_assembly(assembly));
        assert!(!tool.is_assembly(part));
        assert!(tool.is_reference(first));
        assert_eq!(tool.referred_shape(second), Some(part));
        assert_eq!(tool.components(assembly, false), vec![first, second]);
        assert_eq!(tool.free_shapes(), vec![assembly]);
        assert!(tool.shape(first).unwrap().is_same(&tool.shape(part).unwrap()));
        assert_eq!(tool.shape(assembly).unwrap().children().len(), 2);
    }

    #[test]
    fn test_nested_components() {
        let mut tree = LabelTree::new();
        let mut tool = ShapeTool::new(&mut tree);
        let part = tool.add_shape(cube());
        let inner = tool.new_shape();
        let leaf = tool.add_component(inner, part);
        let outer = tool.new_shape();
        let sub_assembly = tool.add_component(outer, inner);

        assert_eq!(tool.components(outer, false), vec![sub_assembly]);
        assert_eq!(tool.components(outer, true), vec![sub_assembly, leaf]);
    }

    #[test]
    fn test_cyclic_components_are_rejected() {
        let mut tree = LabelTree::new();
        let mut tool = ShapeTool::new(&mut tree);
        let part = tool.add_shape(cube());
        let assembly = tool.new_shape();
        let component = tool.add_component(assembly, part);
        assert!(!component.is_null());

        assert!(tool.add_component(part, assembly).is_null());
        assert!(tool.add_component(assembly, assembly).is_null());
        assert!(tool.add_component(component, assembly).is_null());

        let outer = tool.new_shape();
        tool.add_component(outer, assembly);
        assert!(tool.add_component(part, outer).is_null());

        assert_eq!(tool.components(assembly, true), vec![component]);
        assert!(!tool.is_assembly(part));
        assert_eq!(tool.components(outer, true).len(), 2);
    }

    #[test]
    fn test_sub_shapes_must_belong() {
        let mut tree = LabelTree::new();
        let mut tool = ShapeTool::new(&mut tree);
        let shape = cube();
        let label = tool.add_shape(shape.clone());
        let face: Shape = all_faces_within(&shape)[0].clone().into();

        let sub = tool.add_sub_shape(label, &face);
        assert!(!sub.is_null());
        assert_eq!(tool.add_sub_shape(label, &face), sub);
        assert_eq!(tool.sub_shapes(label), vec![sub]);

        let foreign: Shape = all_faces_within(&cube())[0].clone().into();
        assert!(tool.add_sub_shape(label, &foreign).is_null());
    }

    #[test]
    fn test_colors_are_shared_and_removable() {
        let mut tree = LabelTree::new();
        let label = ShapeTool::new(&mut tree).add_shape(cube());
        let mut colors = ColorTool::new(&mut tree);
        let red = ColorRgba::from(crate::xde::Color::RED);

        colors.set_color(label, red, ColorType::Surface);
        colors.set_color(label, red, ColorType::Curve);
        assert_eq!(colors.colors().len(), 1);
        assert_eq!(colors.color(label, ColorType::Surface), Some(red));
        assert_eq!(colors.color(label, ColorType::Generic), None);

        let color_label = colors.colors()[0];
        colors.remove_color(color_label);
        assert!(colors.colors().is_empty());
        assert_eq!(colors.color(label, ColorType::Curve), None);
    }

    #[test]
    fn test_material_assignment() {
        let mut tree = LabelTree::new();
        let label = ShapeTool::new(&mut tree).add_shape(cube());
        let mut materials = MaterialTool::new(&mut tree);
        let steel = Material::new("Steel", "", 7.85, "kg/m^3", "Density");
        let material_label = materials.add_material(steel.clone());
        materials.set_material(label, material_label);

        assert_eq!(materials.shape_material(label), Some(material_label));
        assert_eq!(materials.material(material_label), Some(steel));
        assert_eq!(tree.name(material_label), Some("Steel"));
    }
}
