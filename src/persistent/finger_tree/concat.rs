//! Concatenation with up to four loose nodes between the operands.

use arrayvec::ArrayVec;

use super::node::{Node, NodeRef, measure_nodes};
use super::tree::{Spine, SpineComputation, Tree};
use crate::typeclass::{Measured, Monoid};

/// Concatenates `left`, the loose `nodes` and `right`, in that order.
///
/// When both operands are deep, the outer digits are kept, the inner
/// digits and the loose nodes are regrouped into branches and the new
/// middle is left suspended. Its measure is known without forcing:
/// `left.middle ⊕ branches ⊕ right.middle`.
pub(crate) fn concat_with_middle<A, M>(
    left: &Tree<A, M>,
    nodes: &[NodeRef<A, M>],
    right: &Tree<A, M>,
) -> Tree<A, M>
where
    A: Measured<M>,
    M: Monoid + Clone,
{
    debug_assert!(nodes.len() <= 4, "at most four loose nodes, got {}", nodes.len());
    match (left, right) {
        (Tree::Empty, _) => nodes
            .iter()
            .rev()
            .fold(right.clone(), |tree, node| tree.prepend_node(node.clone())),
        (_, Tree::Empty) => nodes
            .iter()
            .fold(left.clone(), |tree, node| tree.append_node(node.clone())),
        (Tree::Single(first), _) => {
            concat_with_middle(&Tree::Empty, nodes, right).prepend_node(first.clone())
        }
        (_, Tree::Single(last)) => {
            concat_with_middle(left, nodes, &Tree::Empty).append_node(last.clone())
        }
        (Tree::Deep(outer_left), Tree::Deep(outer_right)) => {
            let mut loose: ArrayVec<NodeRef<A, M>, 12> = ArrayVec::new();
            loose.extend(outer_left.right.as_slice().iter().cloned());
            loose.extend(nodes.iter().cloned());
            loose.extend(outer_right.left.as_slice().iter().cloned());
            let branches = group_into_branches(&loose);

            let measure = outer_left
                .measure
                .combine_ref(&measure_nodes(nodes))
                .combine_ref(&outer_right.measure);

            let inner_left = outer_left.middle.force();
            let inner_right = outer_right.middle.force();
            let middle = if inner_left.is_empty() && inner_right.is_empty() {
                Spine::evaluated(Tree::from_nodes(&branches))
            } else {
                let middle_measure = outer_left
                    .middle
                    .measure()
                    .combine_ref(&measure_nodes(&branches))
                    .combine_ref(outer_right.middle.measure());
                Spine::suspended(
                    middle_measure,
                    SpineComputation::Concat(inner_left.clone(), branches, inner_right.clone()),
                )
            };

            Tree::deep_with_measure(
                measure,
                outer_left.left.clone(),
                middle,
                outer_right.right.clone(),
            )
        }
    }
}

/// Greedily packs 2 to 12 nodes into branches of three, finishing with one
/// or two branches of two. Never yields more than four branches.
fn group_into_branches<A, M>(nodes: &[NodeRef<A, M>]) -> ArrayVec<NodeRef<A, M>, 4>
where
    A: Measured<M>,
    M: Monoid + Clone,
{
    let mut branches = ArrayVec::new();
    let mut rest = nodes;
    loop {
        match rest.len() {
            0 | 1 => unreachable!("cannot group {} loose node(s)", rest.len()),
            2 | 3 => {
                branches.push(Node::branch(rest));
                return branches;
            }
            4 => {
                branches.push(Node::branch(&rest[..2]));
                branches.push(Node::branch(&rest[2..]));
                return branches;
            }
            _ => {
                branches.push(Node::branch(&rest[..3]));
                rest = &rest[3..];
            }
        }
    }
}
