//! Tree walker and child-list reconciliation

use tracing::{debug, trace};

use super::patch::patch;
use super::{MorphOptions, MorphStats};
use crate::dom::{Dom, NodeKind};

/// Reusable walker bound to a live tree and a config
///
/// [`super::morph`] is the usual entry point. Use a `Morpher` directly to
/// drive several walks with the same options and accumulate statistics.
pub struct Morpher<'a, D: Dom> {
    dom: &'a mut D,
    options: &'a MorphOptions,
    marker_attr: String,
    stats: MorphStats,
}

impl<'a, D: Dom> Morpher<'a, D> {
    /// Create a walker over `dom` with fresh statistics
    pub fn new(dom: &'a mut D, options: &'a MorphOptions) -> Self {
        Self {
            dom,
            options,
            marker_attr: options.marker_attr(),
            stats: MorphStats::default(),
        }
    }

    /// Statistics accumulated so far
    pub fn stats(&self) -> MorphStats {
        self.stats
    }

    /// Consume the walker, returning its statistics
    pub fn into_stats(self) -> MorphStats {
        self.stats
    }

    /// Walk a node pair where either side may be absent.
    ///
    /// - no old node: `new` is returned as-is (insert)
    /// - no new node: `None` (delete)
    /// - otherwise see [`Self::walk_nodes`]
    pub fn walk(
        &mut self,
        old: Option<D::Node>,
        new: Option<D::Node>,
    ) -> Result<Option<D::Node>, D::Error> {
        match (old, new) {
            (None, new) => Ok(new),
            (Some(_), None) => Ok(None),
            (Some(old), Some(new)) => self.walk_nodes(old, new).map(Some),
        }
    }

    /// Morph `old` towards `new` and return the node that should stand in
    /// `old`'s place: `old` itself, or `new` when a replacement is needed.
    pub fn walk_nodes(&mut self, old: D::Node, new: D::Node) -> Result<D::Node, D::Error> {
        if old == new || self.dom.same_node(new, old) == Some(true) {
            return Ok(old);
        }

        if self.dom.node_name(new) != self.dom.node_name(old) || self.marker(new) != self.marker(old) {
            debug!(?old, ?new, "replace");
            self.stats.replaced += 1;
            return Ok(new);
        }

        patch(self.dom, new, old, &self.options.events)?;
        self.stats.patched += 1;
        self.update_children(new, old)?;
        Ok(old)
    }

    fn marker(&self, node: D::Node) -> Option<&str> {
        self.dom.get_attribute(node, None, &self.marker_attr)
    }

    /// Equivalence test used to match children across versions.
    ///
    /// Asymmetric: `a`'s id or identity predicate decides when present.
    fn same(&self, a: D::Node, b: D::Node) -> bool {
        if let Some(id) = self.dom.id(a) {
            return self.dom.id(b) == Some(id);
        }
        if let Some(is_same) = self.dom.same_node(a, b) {
            return is_same;
        }
        if self.dom.node_name(a) != self.dom.node_name(b) {
            return false;
        }
        if self.dom.kind(a) == NodeKind::Text {
            return self.dom.node_value(a) == self.dom.node_value(b);
        }
        false
    }

    // =========================================================================
    // Children
    // =========================================================================

    /// Reconcile the children of `old_parent` against those of `new_parent`.
    ///
    /// Single greedy pass. `i` indexes old children, `i - offset` new ones.
    /// Every node spliced out of the new list bumps `offset`, so the new
    /// cursor stays on the first unconsumed new child.
    pub fn update_children(&mut self, new_parent: D::Node, old_parent: D::Node) -> Result<(), D::Error> {
        let mut offset = 0;
        let mut i = 0;

        loop {
            debug_assert!(offset <= i);
            let old_child = self.dom.child_at(old_parent, i);
            let new_child = self.dom.child_at(new_parent, i - offset);

            match (old_child, new_child) {
                (None, None) => break,
                (Some(old), None) => {
                    trace!(?old, index = i, "remove");
                    self.dom.remove_child(old_parent, old)?;
                    self.stats.removed += 1;
                    // list shrank, same index holds the next old child
                    continue;
                }
                (None, Some(new)) => {
                    trace!(?new, index = i, "append");
                    self.dom.append_child(old_parent, new)?;
                    self.stats.inserted += 1;
                    offset += 1;
                }
                (Some(old), Some(new)) => {
                    offset += self.reconcile_pair(old_parent, i, old, new)?;
                }
            }
            i += 1;
        }
        Ok(())
    }

    /// Handle an old/new child pair at index `i`. Returns the offset bump.
    fn reconcile_pair(
        &mut self,
        parent: D::Node,
        i: usize,
        old: D::Node,
        new: D::Node,
    ) -> Result<usize, D::Error> {
        if self.same(new, old) {
            trace!(?old, ?new, index = i, "morph matched");
            return self.morph_in_place(parent, old, new);
        }

        let old_match = (i..self.dom.child_count(parent))
            .filter_map(|j| self.dom.child_at(parent, j))
            .find(|&candidate| self.same(candidate, new));

        if let Some(matched) = old_match {
            let morphed = self.walk_nodes(matched, new)?;
            trace!(?matched, ?morphed, index = i, "move");
            if morphed == matched && matched != old {
                self.stats.moved += 1;
            }
            self.dom.insert_before(parent, morphed, old)?;
            return Ok(usize::from(morphed != matched));
        }

        // Permissive heuristic: two unkeyed nodes are patched into one another
        // without proof that they represent the same thing. Keyed lists rely
        // on an unkeyed neighbour being reused here.
        if self.dom.id(new).is_none() && self.dom.id(old).is_none() {
            trace!(?old, ?new, index = i, "morph positional");
            return self.morph_in_place(parent, old, new);
        }

        trace!(?new, before = ?old, index = i, "insert");
        self.dom.insert_before(parent, new, old)?;
        self.stats.inserted += 1;
        Ok(1)
    }

    /// Walk `old`/`new` and swap in the result if it is not `old`
    fn morph_in_place(&mut self, parent: D::Node, old: D::Node, new: D::Node) -> Result<usize, D::Error> {
        let morphed = self.walk_nodes(old, new)?;
        if morphed == old {
            return Ok(0);
        }
        self.dom.replace_child(parent, morphed, old)?;
        Ok(1)
    }
}

// =============================================================================
// Tests
// =============================================================================
