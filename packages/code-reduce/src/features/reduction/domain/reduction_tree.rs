//! Containment forest over chunks
//!
//! Nodes live in an arena addressed by index and are rebuilt from fresh chunks
//! for every strategy run, so no node outlives the positions it was built from.

use std::cmp::Reverse;

use crate::errors::{ReduceError, Result};

use super::chunk::Chunk;

pub type NodeId = usize;

#[derive(Debug, Clone)]
pub struct ReductionNode {
    pub chunk: Chunk,
    pub parent: Option<NodeId>,
    /// Directly nested chunks, ascending source order
    pub children: Vec<NodeId>,
}

#[derive(Debug, Clone, Default)]
pub struct ReductionTree {
    nodes: Vec<ReductionNode>,
    roots: Vec<NodeId>,
}

impl ReductionTree {
    /// Arrange chunks into a forest: each chunk's parent is the smallest chunk
    /// containing it.
    ///
    /// Chunks are swept in (file, start ascending, end descending) order with
    /// a stack of open ancestors, so the innermost container is always on top.
    /// Identical ranges nest in input order. Two chunks that overlap without
    /// nesting are a contract violation and fail with a range error.
    pub fn build(mut chunks: Vec<Chunk>) -> Result<Self> {
        // Stable, so identical ranges keep their input order
        chunks.sort_by(|a, b| {
            (a.file(), a.span().start(), Reverse(a.span().end()))
                .cmp(&(b.file(), b.span().start(), Reverse(b.span().end())))
        });

        let mut parents: Vec<Option<NodeId>> = Vec::with_capacity(chunks.len());
        let mut stack: Vec<NodeId> = Vec::new();

        for (id, chunk) in chunks.iter().enumerate() {
            while let Some(&top) = stack.last() {
                let open = &chunks[top];
                if open.contains(chunk) {
                    break;
                }
                if open.file() == chunk.file() && open.span().overlaps_without_nesting(&chunk.span()) {
                    return Err(ReduceError::range(
                        chunk.file(),
                        chunk.span(),
                        format!("overlaps {} without nesting", open.span()),
                    ));
                }
                stack.pop();
            }
            parents.push(stack.last().copied());
            stack.push(id);
        }

        let mut tree = ReductionTree {
            nodes: Vec::with_capacity(chunks.len()),
            roots: Vec::new(),
        };
        // Ids follow sweep order, so children come out in source order
        for (id, (chunk, parent)) in chunks.into_iter().zip(parents).enumerate() {
            tree.nodes.push(ReductionNode {
                chunk,
                parent,
                children: Vec::new(),
            });
            match parent {
                Some(p) => tree.nodes[p].children.push(id),
                None => tree.roots.push(id),
            }
        }

        Ok(tree)
    }

    pub fn roots(&self) -> &[NodeId] {
        &self.roots
    }

    pub fn children(&self, id: NodeId) -> &[NodeId] {
        &self.nodes[id].children
    }

    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.nodes[id].parent
    }

    pub fn chunk(&self, id: NodeId) -> &Chunk {
        &self.nodes[id].chunk
    }

    pub fn chunk_mut(&mut self, id: NodeId) -> &mut Chunk {
        &mut self.nodes[id].chunk
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Nesting depth of the forest (0 when empty)
    pub fn depth(&self) -> usize {
        fn depth_of(tree: &ReductionTree, id: NodeId) -> usize {
            1 + tree
                .children(id)
                .iter()
                .map(|&c| depth_of(tree, c))
                .max()
                .unwrap_or(0)
        }
        self.roots.iter().map(|&r| depth_of(self, r)).max().unwrap_or(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::parsing::SyntaxKind;
    use crate::shared::models::Span;

    fn chunk(sl: u32, sc: u32, el: u32, ec: u32) -> Chunk {
        Chunk::new("m.py", Span::new(sl, sc, el, ec), SyntaxKind::Statement)
    }

    fn spans(tree: &ReductionTree, ids: &[NodeId]) -> Vec<Span> {
        ids.iter().map(|&id| tree.chunk(id).span()).collect()
    }

    #[test]
    fn test_parent_is_smallest_container() {
        // 1-20 contains 2-10 contains 3-4; 12-15 sits beside 2-10
        let tree = ReductionTree::build(vec![
            chunk(3, 4, 4, 0),
            chunk(12, 0, 15, 0),
            chunk(1, 0, 20, 0),
            chunk(2, 0, 10, 0),
        ])
        .unwrap();

        assert_eq!(spans(&tree, tree.roots()), vec![Span::new(1, 0, 20, 0)]);
        let root = tree.roots()[0];
        assert_eq!(
            spans(&tree, tree.children(root)),
            vec![Span::new(2, 0, 10, 0), Span::new(12, 0, 15, 0)]
        );
        let mid = tree.children(root)[0];
        assert_eq!(spans(&tree, tree.children(mid)), vec![Span::new(3, 4, 4, 0)]);
        assert_eq!(tree.parent(mid), Some(root));
        assert_eq!(tree.depth(), 3);
    }

    #[test]
    fn test_disjoint_chunks_are_roots_in_source_order() {
        let tree = ReductionTree::build(vec![chunk(5, 0, 6, 0), chunk(1, 0, 2, 0), chunk(3, 0, 4, 0)]).unwrap();
        assert_eq!(
            spans(&tree, tree.roots()),
            vec![Span::new(1, 0, 2, 0), Span::new(3, 0, 4, 0), Span::new(5, 0, 6, 0)]
        );
        assert_eq!(tree.depth(), 1);
    }

    #[test]
    fn test_overlap_without_nesting_is_rejected() {
        let err = ReductionTree::build(vec![chunk(1, 0, 5, 0), chunk(3, 0, 8, 0)]).unwrap_err();
        assert!(err.is_invariant_violation());
    }

    #[test]
    fn test_identical_ranges_nest_in_input_order() {
        let a = Chunk::new("m.py", Span::new(1, 0, 2, 0), SyntaxKind::Subprogram);
        let b = Chunk::new("m.py", Span::new(1, 0, 2, 0), SyntaxKind::Statement);
        let tree = ReductionTree::build(vec![a, b]).unwrap();

        assert_eq!(tree.roots().len(), 1);
        let root = tree.roots()[0];
        assert_eq!(tree.chunk(root).kind(), &SyntaxKind::Subprogram);
        assert_eq!(tree.children(root).len(), 1);
    }

    #[test]
    fn test_chunks_from_different_files_never_nest() {
        let a = Chunk::new("a.py", Span::new(1, 0, 9, 0), SyntaxKind::Statement);
        let b = Chunk::new("b.py", Span::new(2, 0, 3, 0), SyntaxKind::Statement);
        let tree = ReductionTree::build(vec![b, a]).unwrap();
        assert_eq!(tree.roots().len(), 2);
        assert_eq!(tree.chunk(tree.roots()[0]).file(), std::path::Path::new("a.py"));
    }

    #[test]
    fn test_empty_input() {
        let tree = ReductionTree::build(Vec::new()).unwrap();
        assert!(tree.is_empty());
        assert!(tree.roots().is_empty());
        assert_eq!(tree.depth(), 0);
    }
}
