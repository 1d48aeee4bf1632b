//! Splicing in required files.

use garnet_ir::{Name, Node, Span};
use garnet_program::RequiredFile;

use super::Normalizer;
use crate::scope::Scope;
use crate::NormalizeResult;

impl Normalizer<'_> {
    /// Replace `require "path"` with the normalized tree of the file, or
    /// with nothing if the file was already required.
    ///
    /// The required tree gets a scope of its own and becomes the current
    /// file while it is normalized.
    pub(super) fn transform_require(&mut self, path: Name, span: Span) -> NormalizeResult<Node> {
        let requested = self.program.interner().lookup(path);
        let Some(RequiredFile { path, root }) = self
            .program
            .resolve_require(requested, self.current_file.as_deref())?
        else {
            return Ok(Node::nop(span));
        };

        let outer_file = self.current_file.replace(path.clone());
        let result = self.with_scope(Scope::new(), |scoped| scoped.transform(root));
        self.current_file = outer_file;

        let node = result?;
        self.program.finish_require(&path);
        Ok(node)
    }
}
