//! The visible drawing: drawables in z-order plus background state.

use crate::shapes::{Drawable, DrawableId, TextAnnotation};
use kurbo::{Point, Rect};
use serde::{Deserialize, Serialize};

/// An ordered collection of drawables (back to front).
///
/// From outside the crate the object list only grows by [`Scene::append`]
/// or changes wholesale through [`Scene::clear`] and [`Scene::replace_with`];
/// nothing patches individual entries of a restored scene.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Scene {
    /// Drawables in z-order (back to front).
    objects: Vec<Drawable>,
    /// Whether the layer lets the media beneath show through.
    background_transparent: bool,
}

impl Default for Scene {
    fn default() -> Self {
        Self::new()
    }
}

impl Scene {
    /// Create a new empty scene with a transparent background.
    pub fn new() -> Self {
        Self {
            objects: Vec::new(),
            background_transparent: true,
        }
    }

    /// Add a drawable on top of everything else.
    pub fn append(&mut self, drawable: Drawable) {
        self.objects.push(drawable);
    }

    /// Remove every drawable and reset the background to transparent.
    pub fn clear(&mut self) {
        self.objects.clear();
        self.background_transparent = true;
    }

    /// Swap in the entire contents of another scene.
    pub fn replace_with(&mut self, other: Scene) {
        *self = other;
    }

    pub fn background_transparent(&self) -> bool {
        self.background_transparent
    }

    pub fn set_background_transparent(&mut self, transparent: bool) {
        self.background_transparent = transparent;
    }

    /// Get drawables in z-order (back to front).
    pub fn iter(&self) -> impl Iterator<Item = &Drawable> {
        self.objects.iter()
    }

    pub fn objects(&self) -> &[Drawable] {
        &self.objects
    }

    /// Get a drawable by ID.
    pub fn get(&self, id: DrawableId) -> Option<&Drawable> {
        self.objects.iter().find(|d| d.id() == id)
    }

    /// Committed text stays editable in place.
    pub(crate) fn text_mut(&mut self, id: DrawableId) -> Option<&mut TextAnnotation> {
        self.objects
            .iter_mut()
            .find(|d| d.id() == id)
            .and_then(Drawable::as_text_mut)
    }

    /// Check if the scene is empty.
    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }

    /// Get the number of drawables.
    pub fn len(&self) -> usize {
        self.objects.len()
    }

    /// Get the bounding box of all drawables.
    pub fn bounds(&self) -> Option<Rect> {
        self.objects
            .iter()
            .map(Drawable::bounds)
            .reduce(|acc, b| acc.union(b))
    }

    /// Find drawables at a point, front to back.
    pub fn drawables_at_point(&self, point: Point, tolerance: f64) -> Vec<DrawableId> {
        self.objects
            .iter()
            .rev()
            .filter(|d| d.hit_test(point, tolerance))
            .map(Drawable::id)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shapes::{DrawStyle, Rectangle};

    fn rect_at(x: f64, y: f64) -> Drawable {
        Drawable::Rectangle(Rectangle::new(Point::new(x, y), 100.0, 100.0, DrawStyle::default()))
    }

    #[test]
    fn test_scene_creation() {
        let scene = Scene::new();
        assert!(scene.is_empty());
        assert!(scene.background_transparent());
    }

    #[test]
    fn test_append_is_z_top() {
        let mut scene = Scene::new();
        let a = rect_at(0.0, 0.0);
        let b = rect_at(50.0, 50.0);
        let (id_a, id_b) = (a.id(), b.id());
        scene.append(a);
        scene.append(b);

        let order: Vec<_> = scene.iter().map(Drawable::id).collect();
        assert_eq!(order, vec![id_a, id_b]);
        assert!(scene.get(id_b).is_some());
    }

    #[test]
    fn test_clear_resets_background() {
        let mut scene = Scene::new();
        scene.append(rect_at(0.0, 0.0));
        scene.set_background_transparent(false);

        scene.clear();
        assert!(scene.is_empty());
        assert!(scene.background_transparent());
    }

    #[test]
    fn test_replace_with() {
        let mut scene = Scene::new();
        scene.append(rect_at(0.0, 0.0));

        let mut other = Scene::new();
        other.append(rect_at(10.0, 10.0));
        other.append(rect_at(20.0, 20.0));
        other.set_background_transparent(false);

        scene.replace_with(other.clone());
        assert_eq!(scene, other);
    }

    #[test]
    fn test_drawables_at_point_front_first() {
        let mut scene = Scene::new();
        let a = rect_at(0.0, 0.0);
        let b = rect_at(0.0, 0.0);
        let (id_a, id_b) = (a.id(), b.id());
        scene.append(a);
        scene.append(b);

        let hits = scene.drawables_at_point(Point::new(0.0, 50.0), 0.0);
        assert_eq!(hits, vec![id_b, id_a]);
        assert!(scene.drawables_at_point(Point::new(50.0, 50.0), 0.0).is_empty());
    }

    #[test]
    fn test_bounds() {
        let mut scene = Scene::new();
        assert!(scene.bounds().is_none());
        scene.append(rect_at(0.0, 0.0));
        scene.append(rect_at(200.0, 0.0));
        let bounds = scene.bounds().unwrap();
        assert!(bounds.x1 > 300.0);
    }
}
