//! Quadtree broad phase.
//!
//! Rebuilt from scratch every tick: `clear`, then `insert` every live
//! entity, then `retrieve` candidates per query. Retrieval over-approximates;
//! callers must run an exact box test on what comes back.
//!
//! Child quadrants are numbered 0 = top-right, 1 = top-left,
//! 2 = bottom-left, 3 = bottom-right.

use starfront_core::constants::{QUADTREE_MAX_LEVELS, QUADTREE_MAX_OBJECTS};
use starfront_core::types::Aabb;

#[derive(Debug, Clone)]
pub struct Quadtree<T> {
    level: u32,
    bounds: Aabb,
    /// Items that do not fit entirely inside one child quadrant.
    objects: Vec<(T, Aabb)>,
    nodes: Option<Box<[Quadtree<T>; 4]>>,
}

impl<T: Copy> Quadtree<T> {
    pub fn new(level: u32, bounds: Aabb) -> Self {
        Self {
            level,
            bounds,
            objects: Vec::new(),
            nodes: None,
        }
    }

    pub fn level(&self) -> u32 {
        self.level
    }

    pub fn bounds(&self) -> Aabb {
        self.bounds
    }

    /// Items held at this node (not in its children).
    pub fn objects(&self) -> &[(T, Aabb)] {
        &self.objects
    }

    pub fn children(&self) -> Option<&[Quadtree<T>; 4]> {
        self.nodes.as_deref()
    }

    /// Total items stored in this node and all descendants.
    pub fn len(&self) -> usize {
        let below: usize = self
            .children()
            .map(|nodes| nodes.iter().map(Quadtree::len).sum())
            .unwrap_or(0);
        self.objects.len() + below
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Drop every stored item and every child, leaving a single empty node.
    pub fn clear(&mut self) {
        self.objects.clear();
        self.nodes = None;
    }

    pub fn insert(&mut self, item: T, bounds: Aabb) {
        if self.nodes.is_some() {
            if let Some(index) = self.index_of(&bounds) {
                if let Some(nodes) = self.nodes.as_mut() {
                    nodes[index].insert(item, bounds);
                    return;
                }
            }
        }

        self.objects.push((item, bounds));

        if self.objects.len() > QUADTREE_MAX_OBJECTS && self.level < QUADTREE_MAX_LEVELS {
            if self.nodes.is_none() {
                self.split();
            }
            // Push down everything that now fits a child; straddlers stay here.
            let held = std::mem::take(&mut self.objects);
            for (item, bounds) in held {
                match (self.index_of(&bounds), self.nodes.as_mut()) {
                    (Some(index), Some(nodes)) => nodes[index].insert(item, bounds),
                    _ => self.objects.push((item, bounds)),
                }
            }
        }
    }

    /// Candidates that may overlap `query`.
    pub fn retrieve(&self, query: &Aabb) -> Vec<T> {
        let mut found = Vec::new();
        self.collect(query, &mut found);
        found
    }

    fn collect(&self, query: &Aabb, found: &mut Vec<T>) {
        if let Some(nodes) = &self.nodes {
            match self.index_of(query) {
                Some(index) => nodes[index].collect(query, found),
                None => {
                    // A straddling query can still overlap items pushed into
                    // any quadrant it reaches.
                    for (index, reached) in self.quadrants_reached(query).into_iter().enumerate() {
                        if reached {
                            nodes[index].collect(query, found);
                        }
                    }
                }
            }
        }
        found.extend(self.objects.iter().map(|(item, _)| *item));
    }

    fn split(&mut self) {
        let sub_width = self.bounds.width / 2.0;
        let sub_height = self.bounds.height / 2.0;
        let Aabb { x, y, .. } = self.bounds;
        let level = self.level + 1;

        self.nodes = Some(Box::new([
            Quadtree::new(level, Aabb::new(x + sub_width, y, sub_width, sub_height)),
            Quadtree::new(level, Aabb::new(x, y, sub_width, sub_height)),
            Quadtree::new(level, Aabb::new(x, y + sub_height, sub_width, sub_height)),
            Quadtree::new(level, Aabb::new(x + sub_width, y + sub_height, sub_width, sub_height)),
        ]));
    }

    fn midlines(&self) -> (f64, f64) {
        (
            self.bounds.x + self.bounds.width / 2.0,
            self.bounds.y + self.bounds.height / 2.0,
        )
    }

    /// Child quadrant a box fits in strictly on both axes, or `None` when it
    /// straddles a midline or pokes outside this node and belongs here.
    fn index_of(&self, b: &Aabb) -> Option<usize> {
        if !self.bounds.contains(b) {
            return None;
        }
        let (vertical_mid, horizontal_mid) = self.midlines();
        let top = b.y < horizontal_mid && b.bottom() < horizontal_mid;
        let bottom = b.y > horizontal_mid;

        if b.x < vertical_mid && b.right() < vertical_mid {
            if top {
                Some(1)
            } else if bottom {
                Some(2)
            } else {
                None
            }
        } else if b.x > vertical_mid {
            if top {
                Some(0)
            } else if bottom {
                Some(3)
            } else {
                None
            }
        } else {
            None
        }
    }

    /// Which quadrants' half-planes the query box extends into.
    fn quadrants_reached(&self, q: &Aabb) -> [bool; 4] {
        let (vertical_mid, horizontal_mid) = self.midlines();
        let left = q.x < vertical_mid;
        let right = q.right() > vertical_mid;
        let top = q.y < horizontal_mid;
        let bottom = q.bottom() > horizontal_mid;
        [right && top, left && top, left && bottom, right && bottom]
    }
}
