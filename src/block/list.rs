use super::caret::{self, CaretTarget};
use super::types::{Block, BlockPatch, fresh_id};

/// Callback invoked with the full block sequence after every mutation.
pub type ChangeHook = Box<dyn FnMut(&[Block])>;

/// The ordered block sequence and its mutation contract.
///
/// The list is never empty: an empty document is a single empty paragraph
/// block, and removing the last remaining block is a no-op. Ids are unique
/// within the list at all times. Every successful mutation fires the
/// caller-supplied change hook exactly once with the updated sequence.
pub struct BlockList {
    blocks: Vec<Block>,
    on_change: Option<ChangeHook>,
}

impl BlockList {
    /// Create a list from initial content. Empty input becomes one default
    /// empty paragraph.
    pub fn new(blocks: Vec<Block>) -> Self {
        let blocks = if blocks.is_empty() {
            vec![Block::default()]
        } else {
            blocks
        };
        Self {
            blocks,
            on_change: None,
        }
    }

    /// Attach a change-notification hook.
    #[must_use]
    pub fn with_on_change(mut self, hook: ChangeHook) -> Self {
        self.on_change = Some(hook);
        self
    }

    /// Replace the change-notification hook.
    pub fn set_on_change(&mut self, hook: ChangeHook) {
        self.on_change = Some(hook);
    }

    pub fn len(&self) -> usize {
        self.blocks.len()
    }

    /// Always false; kept so the type reads like a collection.
    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }

    /// The block at `index`, if any. Callers guard the `None` case.
    pub fn get(&self, index: usize) -> Option<&Block> {
        self.blocks.get(index)
    }

    /// The full ordered sequence.
    pub fn blocks(&self) -> &[Block] {
        &self.blocks
    }

    /// Merge a partial-field patch onto the block at `index`.
    ///
    /// When `index` is one past the end a default empty paragraph is created
    /// first, so patching just beyond the list appends. Indices further out
    /// are a no-op. Notifies on success.
    pub fn change(&mut self, index: usize, patch: BlockPatch) {
        if index > self.blocks.len() {
            return;
        }
        if index == self.blocks.len() {
            self.blocks.push(Block::default());
        }
        let block = &mut self.blocks[index];
        if let Some(tag) = patch.tag {
            block.tag = tag;
        }
        if let Some(contents) = patch.contents {
            block.contents = contents;
        }
        if let Some(style) = patch.style {
            block.style = style;
        }
        if let Some(attributes) = patch.attributes {
            block.attributes = attributes;
        }
        if let Some(target) = patch.caret {
            block.caret = Some(target);
        }
        self.notify();
    }

    /// Remove the block at `index`.
    ///
    /// No-op when the index is out of range or the list would become empty.
    /// Notifies on success.
    pub fn remove(&mut self, index: usize) {
        if self.blocks.len() <= 1 || index >= self.blocks.len() {
            return;
        }
        self.blocks.remove(index);
        self.notify();
    }

    /// Split the block at `index` at character offset `at`.
    ///
    /// The block keeps the text before `at`; a new default paragraph with a
    /// fresh id carries the rest and a pending caret at its start. One
    /// mutation, one notification.
    pub fn split(&mut self, index: usize, at: usize) {
        let Some(block) = self.blocks.get_mut(index) else {
            return;
        };
        let at = caret::resolve(CaretTarget::Offset(at), &block.contents);
        let before: String = block.contents.chars().take(at).collect();
        let after: String = block.contents.chars().skip(at).collect();
        block.contents = before;
        let mut rest = Block::paragraph(after);
        rest.caret = Some(CaretTarget::Offset(0));
        self.blocks.insert(index + 1, rest);
        self.notify();
    }

    /// Merge the block at `index` into its predecessor (Backspace).
    ///
    /// The predecessor takes on the combined text, a regenerated id, and a
    /// pending caret at the old join point; the block at `index` is removed.
    /// No-op for the first block or out-of-range indices. One mutation, one
    /// notification.
    pub fn merge_back(&mut self, index: usize) {
        if index == 0 || index >= self.blocks.len() {
            return;
        }
        let tail = self.blocks.remove(index);
        let prev = &mut self.blocks[index - 1];
        let join = prev.contents.chars().count();
        prev.contents.push_str(&tail.contents);
        prev.id = fresh_id();
        prev.caret = Some(CaretTarget::Offset(join));
        self.notify();
    }

    /// Merge the successor of the block at `index` into it (Delete).
    ///
    /// Mirror image of [`merge_back`](Self::merge_back): the block at
    /// `index` takes on the combined text, a regenerated id, and a pending
    /// caret at the old join point.
    pub fn merge_forward(&mut self, index: usize) {
        if index + 1 >= self.blocks.len() {
            return;
        }
        let tail = self.blocks.remove(index + 1);
        let block = &mut self.blocks[index];
        let join = block.contents.chars().count();
        block.contents.push_str(&tail.contents);
        block.id = fresh_id();
        block.caret = Some(CaretTarget::Offset(join));
        self.notify();
    }

    /// Consume the first pending caret instruction, clearing it so it cannot
    /// re-fire on later renders.
    ///
    /// Clearing a transient instruction is not a content mutation and does
    /// not notify.
    pub fn take_pending_caret(&mut self) -> Option<(usize, CaretTarget)> {
        for (index, block) in self.blocks.iter_mut().enumerate() {
            if let Some(target) = block.caret.take() {
                return Some((index, target));
            }
        }
        None
    }

    fn notify(&mut self) {
        if let Some(hook) = self.on_change.as_mut() {
            hook(&self.blocks);
        }
    }
}

impl Default for BlockList {
    fn default() -> Self {
        Self::new(Vec::new())
    }
}

impl std::fmt::Debug for BlockList {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BlockList")
            .field("blocks", &self.blocks)
            .field("on_change", &self.on_change.as_ref().map(|_| "..."))
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::collections::HashSet;
    use std::rc::Rc;

    use proptest::prelude::*;

    use super::*;

    fn counting_list(blocks: Vec<Block>) -> (BlockList, Rc<RefCell<usize>>) {
        let calls = Rc::new(RefCell::new(0usize));
        let hook_calls = Rc::clone(&calls);
        let list = BlockList::new(blocks).with_on_change(Box::new(move |blocks| {
            *hook_calls.borrow_mut() += 1;
            let ids: HashSet<u64> = blocks.iter().map(|b| b.id).collect();
            assert_eq!(ids.len(), blocks.len(), "ids must be pairwise unique");
        }));
        (list, calls)
    }

    // --- Construction ---

    #[test]
    fn test_empty_input_becomes_one_default_paragraph() {
        let list = BlockList::new(Vec::new());
        assert_eq!(list.len(), 1);
        assert_eq!(list.get(0).unwrap().contents, "");
    }

    #[test]
    fn test_get_out_of_range_is_none() {
        let list = BlockList::new(vec![Block::paragraph("a")]);
        assert!(list.get(1).is_none());
    }

    // --- change ---

    #[test]
    fn test_change_merges_patch_fields() {
        let (mut list, calls) = counting_list(vec![Block::paragraph("old")]);
        list.change(0, BlockPatch::new().contents("new"));
        assert_eq!(list.get(0).unwrap().contents, "new");
        assert_eq!(*calls.borrow(), 1);
    }

    #[test]
    fn test_change_keeps_unpatched_fields() {
        let mut block = Block::paragraph("text");
        block.style.insert("color".to_string(), "#123456".into());
        let (mut list, _) = counting_list(vec![block]);
        list.change(0, BlockPatch::new().contents("other"));
        let block = list.get(0).unwrap();
        assert_eq!(block.contents, "other");
        assert_eq!(block.style["color"].as_text(), Some("#123456"));
    }

    #[test]
    fn test_change_one_past_end_appends_default_paragraph() {
        let (mut list, calls) = counting_list(vec![Block::paragraph("a")]);
        list.change(1, BlockPatch::new().contents("b"));
        assert_eq!(list.len(), 2);
        assert_eq!(list.get(1).unwrap().contents, "b");
        assert_eq!(*calls.borrow(), 1);
    }

    #[test]
    fn test_change_far_out_of_range_is_noop() {
        let (mut list, calls) = counting_list(vec![Block::paragraph("a")]);
        list.change(5, BlockPatch::new().contents("b"));
        assert_eq!(list.len(), 1);
        assert_eq!(*calls.borrow(), 0);
    }

    // --- remove ---

    #[test]
    fn test_remove_deletes_block() {
        let (mut list, calls) = counting_list(vec![Block::paragraph("a"), Block::paragraph("b")]);
        list.remove(0);
        assert_eq!(list.len(), 1);
        assert_eq!(list.get(0).unwrap().contents, "b");
        assert_eq!(*calls.borrow(), 1);
    }

    #[test]
    fn test_remove_last_remaining_block_is_noop() {
        let (mut list, calls) = counting_list(vec![Block::paragraph("only")]);
        list.remove(0);
        assert_eq!(list.len(), 1);
        assert_eq!(*calls.borrow(), 0);
    }

    #[test]
    fn test_remove_out_of_range_is_noop() {
        let (mut list, calls) = counting_list(vec![Block::paragraph("a"), Block::paragraph("b")]);
        list.remove(7);
        assert_eq!(list.len(), 2);
        assert_eq!(*calls.borrow(), 0);
    }

    // --- split ---

    #[test]
    fn test_split_divides_text_at_offset() {
        let (mut list, calls) = counting_list(vec![Block::paragraph("hello")]);
        list.split(0, 3);
        assert_eq!(list.len(), 2);
        assert_eq!(list.get(0).unwrap().contents, "hel");
        assert_eq!(list.get(1).unwrap().contents, "lo");
        assert_eq!(list.get(1).unwrap().caret, Some(CaretTarget::Offset(0)));
        assert_eq!(*calls.borrow(), 1);
    }

    #[test]
    fn test_split_keeps_first_id_and_generates_second() {
        let mut list = BlockList::new(vec![Block::paragraph("hello")]);
        let id = list.get(0).unwrap().id;
        list.split(0, 3);
        assert_eq!(list.get(0).unwrap().id, id);
        assert_ne!(list.get(1).unwrap().id, id);
    }

    #[test]
    fn test_split_offset_beyond_text_clamps_to_end() {
        let mut list = BlockList::new(vec![Block::paragraph("ab")]);
        list.split(0, 99);
        assert_eq!(list.get(0).unwrap().contents, "ab");
        assert_eq!(list.get(1).unwrap().contents, "");
    }

    #[test]
    fn test_split_multibyte_text_splits_on_char_boundary() {
        let mut list = BlockList::new(vec![Block::paragraph("café au lait")]);
        list.split(0, 4);
        assert_eq!(list.get(0).unwrap().contents, "café");
        assert_eq!(list.get(1).unwrap().contents, " au lait");
    }

    // --- merge ---

    #[test]
    fn test_merge_back_joins_with_predecessor() {
        let (mut list, calls) = counting_list(vec![Block::paragraph("ab"), Block::paragraph("cd")]);
        let old_id = list.get(0).unwrap().id;
        list.merge_back(1);
        assert_eq!(list.len(), 1);
        let merged = list.get(0).unwrap();
        assert_eq!(merged.contents, "abcd");
        assert_ne!(merged.id, old_id);
        assert_eq!(merged.caret, Some(CaretTarget::Offset(2)));
        assert_eq!(*calls.borrow(), 1);
    }

    #[test]
    fn test_merge_back_on_first_block_is_noop() {
        let (mut list, calls) = counting_list(vec![Block::paragraph("ab"), Block::paragraph("cd")]);
        list.merge_back(0);
        assert_eq!(list.len(), 2);
        assert_eq!(*calls.borrow(), 0);
    }

    #[test]
    fn test_merge_forward_joins_with_successor() {
        let mut list = BlockList::new(vec![Block::paragraph("ab"), Block::paragraph("cd")]);
        let old_id = list.get(0).unwrap().id;
        list.merge_forward(0);
        assert_eq!(list.len(), 1);
        let merged = list.get(0).unwrap();
        assert_eq!(merged.contents, "abcd");
        assert_ne!(merged.id, old_id);
        assert_eq!(merged.caret, Some(CaretTarget::Offset(2)));
    }

    #[test]
    fn test_merge_forward_on_last_block_is_noop() {
        let (mut list, calls) = counting_list(vec![Block::paragraph("ab"), Block::paragraph("cd")]);
        list.merge_forward(1);
        assert_eq!(list.len(), 2);
        assert_eq!(*calls.borrow(), 0);
    }

    #[test]
    fn test_split_then_merge_restores_text() {
        let mut list = BlockList::new(vec![Block::paragraph("helloworld")]);
        list.split(0, 5);
        list.merge_back(1);
        assert_eq!(list.len(), 1);
        assert_eq!(list.get(0).unwrap().contents, "helloworld");
    }

    // --- pending caret ---

    #[test]
    fn test_take_pending_caret_consumes_instruction() {
        let mut list = BlockList::new(vec![Block::paragraph("hello")]);
        list.split(0, 2);
        assert_eq!(
            list.take_pending_caret(),
            Some((1, CaretTarget::Offset(0)))
        );
        assert_eq!(list.take_pending_caret(), None);
    }

    #[test]
    fn test_take_pending_caret_does_not_notify() {
        let (mut list, calls) = counting_list(vec![Block::paragraph("hello")]);
        list.split(0, 2);
        let before = *calls.borrow();
        list.take_pending_caret();
        assert_eq!(*calls.borrow(), before);
    }

    // --- invariants ---

    proptest! {
        /// Arbitrary operation sequences keep the list non-empty with
        /// pairwise-unique ids.
        #[test]
        fn prop_list_stays_nonempty_with_unique_ids(
            ops in prop::collection::vec((0u8..5, 0usize..8, 0usize..12), 0..40),
        ) {
            let mut list = BlockList::new(vec![Block::paragraph("seed")]);
            for (op, index, at) in ops {
                match op {
                    0 => list.split(index, at),
                    1 => list.merge_back(index),
                    2 => list.merge_forward(index),
                    3 => list.remove(index),
                    _ => list.change(index, BlockPatch::new().contents(format!("c{at}"))),
                }
                prop_assert!(list.len() >= 1);
                let ids: HashSet<u64> = list.blocks().iter().map(|b| b.id).collect();
                prop_assert_eq!(ids.len(), list.len());
            }
        }
    }
}
