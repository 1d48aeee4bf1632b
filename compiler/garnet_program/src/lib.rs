//! Garnet Program - the program-wide registry shared by every file of a
//! compilation.
//!
//! The normalizer consults it for:
//! - Fresh temporary names (`#temp_1`, `#temp_2`, ...)
//! - Constants synthesized for regex literals
//! - Interned generic collection types (`Array(T)`, `Hash(K, V)`)
//! - Require resolution, including cycle detection
//!
//! Trees for required files come from a [`SourceLoader`]; parsing is not
//! this crate's concern.

mod error;
mod loader;
mod require;

use std::path::{Path, PathBuf};

use garnet_ir::{
    GenericType, GenericTypeId, Name, Node, SharedInterner, Span, StringInterner, TypeArg,
    TypePool,
};
use rustc_hash::FxHashMap;
use tracing::debug;

pub use error::RequireError;
pub use loader::{FsLoader, MemoryLoader, SourceLoader};
pub use require::SOURCE_EXTENSION;

use require::RequireTracker;

/// Program configuration.
#[derive(Clone, Debug, Default)]
pub struct ProgramOptions {
    /// Directories searched, in order, for non-relative requires.
    pub search_paths: Vec<PathBuf>,
}

/// A constant the program defines on the user's behalf.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ConstDef {
    pub name: Name,
    /// Initializer expression, evaluated once at program start.
    pub value: Node,
}

/// A require that resolved to a file not seen before.
///
/// The caller normalizes `root` and then calls [`Program::finish_require`].
#[derive(Debug)]
pub struct RequiredFile {
    pub path: PathBuf,
    pub root: Node,
}

/// Program-wide registry.
pub struct Program {
    interner: SharedInterner,
    options: ProgramOptions,
    loader: Box<dyn SourceLoader>,
    temp_counter: u32,
    /// Regex literal text to the constant holding the compiled regex.
    regexes: FxHashMap<Name, Name>,
    constants: Vec<ConstDef>,
    types: TypePool,
    requires: RequireTracker,
}

impl Program {
    pub fn new(interner: SharedInterner, loader: impl SourceLoader + 'static) -> Self {
        Program {
            interner,
            options: ProgramOptions::default(),
            loader: Box::new(loader),
            temp_counter: 0,
            regexes: FxHashMap::default(),
            constants: Vec::new(),
            types: TypePool::new(),
            requires: RequireTracker::default(),
        }
    }

    #[must_use]
    pub fn with_options(mut self, options: ProgramOptions) -> Self {
        self.options = options;
        self
    }

    pub fn interner(&self) -> &StringInterner {
        &self.interner
    }

    pub fn shared_interner(&self) -> &SharedInterner {
        &self.interner
    }

    pub fn options(&self) -> &ProgramOptions {
        &self.options
    }

    /// Fresh compiler temporary. Never collides with user identifiers
    /// because the name starts with `#`.
    pub fn allocate_temp_name(&mut self) -> Name {
        self.temp_counter += 1;
        self.interner.intern(&format!("#temp_{}", self.temp_counter))
    }

    // Constants

    /// The constant holding the regex compiled from `text`.
    ///
    /// The first request for a given text defines the constant; later
    /// requests return the same name.
    pub fn intern_regex_constant(&mut self, text: Name, span: Span) -> Name {
        if let Some(&name) = self.regexes.get(&text) {
            return name;
        }

        let name = self
            .interner
            .intern(&format!("#Regexp_{}", self.regexes.len()));
        let regexp = self.interner.intern("Regexp");
        let new = self.interner.intern("new");
        let value = Node::call(
            Some(Node::global_const(regexp, span)),
            new,
            vec![Node::str(text, span)],
            span,
        );

        debug!(
            constant = self.interner.lookup(name),
            text = self.interner.lookup(text),
            "defined regex constant"
        );
        self.regexes.insert(text, name);
        self.constants.push(ConstDef { name, value });
        name
    }

    /// Constants defined so far, in definition order.
    pub fn constants(&self) -> &[ConstDef] {
        &self.constants
    }

    pub fn constant(&self, name: Name) -> Option<&ConstDef> {
        self.constants.iter().find(|c| c.name == name)
    }

    // Generic types

    /// The id of `base(args...)`, registering it on first use.
    pub fn intern_generic_type(&mut self, base: Name, args: Vec<TypeArg>) -> GenericTypeId {
        let (id, created) = self.types.intern(GenericType { base, args });
        if created {
            debug!(
                id = id.raw(),
                base = self.interner.lookup(base),
                "registered generic type"
            );
        }
        id
    }

    pub fn types(&self) -> &TypePool {
        &self.types
    }

    // Requires

    /// Mark the top-level file in flight so requires that lead back to it
    /// are reported as cycles.
    pub fn begin_file(&mut self, path: &Path) -> Result<(), RequireError> {
        self.requires.start_loading(require::normalize_path(path))
    }

    /// Resolve `requested` from `requesting_file`.
    ///
    /// Returns `Ok(None)` if the file was already fully loaded. Otherwise the
    /// file is marked in flight and its tree returned; the caller must call
    /// [`Program::finish_require`] once it is normalized.
    pub fn resolve_require(
        &mut self,
        requested: &str,
        requesting_file: Option<&Path>,
    ) -> Result<Option<RequiredFile>, RequireError> {
        let path = require::candidates(requested, requesting_file, &self.options.search_paths)
            .into_iter()
            .find(|candidate| self.loader.exists(candidate))
            .ok_or_else(|| RequireError::NotFound {
                path: requested.to_owned(),
                requested_from: requesting_file.map(Path::to_path_buf),
            })?;

        if self.requires.is_loaded(&path) {
            debug!(path = %path.display(), "already required");
            return Ok(None);
        }
        self.requires.start_loading(path.clone())?;

        match self.loader.load(&path, &self.interner) {
            Ok(root) => {
                debug!(path = %path.display(), "loaded required file");
                Ok(Some(RequiredFile { path, root }))
            }
            Err(message) => {
                self.requires.abort_loading(&path);
                Err(RequireError::Load { path, message })
            }
        }
    }

    /// Mark `path` fully loaded; later requires of it are no-ops.
    pub fn finish_require(&mut self, path: &Path) {
        self.requires.finish_loading(&require::normalize_path(path));
    }

    pub fn is_loaded(&self, path: &Path) -> bool {
        self.requires.is_loaded(&require::normalize_path(path))
    }
}

#[cfg(test)]
mod tests;
