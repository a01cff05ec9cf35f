//! The "page" a surface lives in: live nodes plus an off-screen mounting area.

use serde::Serialize;
use tracing::debug;

use crate::surface::node::Node;

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Document {
    /// Visible nodes. Element lookup only ever searches here.
    pub body: Vec<Node>,
    /// Nodes attached for rendering but kept out of the visible flow.
    offscreen: Vec<Node>,
}

impl Document {
    pub fn new(body: Vec<Node>) -> Self {
        Self {
            body,
            offscreen: Vec::new(),
        }
    }

    pub fn find_by_id(&self, id: &str) -> Option<&Node> {
        self.body.iter().find_map(|n| n.find_by_id(id))
    }

    pub fn offscreen_count(&self) -> usize {
        self.offscreen.len()
    }

    /// Attaches `node` off-screen. The node is detached again when the returned
    /// guard drops, whichever way the caller exits.
    pub fn mount_offscreen(&mut self, node: Node) -> OffscreenMount<'_> {
        self.offscreen.push(node);
        let index = self.offscreen.len() - 1;
        debug!(index, "Mounted off-screen surface");
        OffscreenMount {
            document: self,
            index,
        }
    }
}

/// Exclusive handle on one off-screen node.
pub struct OffscreenMount<'a> {
    document: &'a mut Document,
    index: usize,
}

impl OffscreenMount<'_> {
    pub fn node(&self) -> &Node {
        &self.document.offscreen[self.index]
    }
}

impl Drop for OffscreenMount<'_> {
    fn drop(&mut self) {
        if self.index < self.document.offscreen.len() {
            self.document.offscreen.remove(self.index);
            debug!(index = self.index, "Removed off-screen surface");
        }
    }
}
