//! Garnet Normalize - the pass between parsing and semantic analysis.
//!
//! Normalization does two things in one traversal:
//! - **Desugaring**: `&&`, `||`, `unless`, `case`, string interpolation,
//!   range/regex/array/hash literals and default parameter values become
//!   calls, conditionals and assignments
//! - **Variable versioning**: every write of a local variable creates a new
//!   version (`x`, `x:1`, `x:2`, ...), and bridging assignments at the ends
//!   of branches, loop bodies and blocks make every read name exactly one
//!   version
//!
//! Statements after an unconditional `return`, `break` or `next` are dropped
//! and nested statement sequences are flattened.
//!
//! ```text
//! x = 1                    x = 1
//! if cond                  if cond()
//!   x = 2          =>        x:1 = 2
//! end                      else
//! y = x                      x:1 = x
//!                            nil
//!                          end
//!                          y = x:1
//! ```

mod config;
mod desugar;
mod error;
mod merge;
mod scope;
mod transform;
mod validate;

use std::path::Path;

use garnet_ir::{Node, Printer};
use garnet_program::Program;

pub use config::{NormalizeConfig, DUMP_ENV_VAR};
pub use error::{NormalizeError, NormalizeResult};
pub use validate::{validate, validate_types};

use transform::Normalizer;

/// Normalize a top-level tree that does not come from a file.
///
/// Relative requires in it resolve against the working directory.
pub fn normalize(program: &mut Program, root: Node) -> NormalizeResult<Node> {
    normalize_with(program, root, None, NormalizeConfig::from_env())
}

/// Normalize the tree of the program's main file.
///
/// The file counts as required while it is normalized, so a require chain
/// leading back to it is reported as circular.
pub fn normalize_file(program: &mut Program, path: &Path, root: Node) -> NormalizeResult<Node> {
    program.begin_file(path)?;
    let result = normalize_with(program, root, Some(path), NormalizeConfig::from_env());
    program.finish_require(path);
    result
}

/// Normalize `root` with explicit options.
///
/// `file` is the path `root` was parsed from, if any.
#[tracing::instrument(level = "debug", skip_all)]
pub fn normalize_with(
    program: &mut Program,
    root: Node,
    file: Option<&Path>,
    config: NormalizeConfig,
) -> NormalizeResult<Node> {
    let node = {
        let mut normalizer = Normalizer::new(program, file.map(Path::to_path_buf));
        normalizer.transform(root)?
    };

    #[cfg(debug_assertions)]
    {
        validate(&node);
        validate_types(program.types());
    }

    if config.dump_tree {
        let printed = Printer::new(program.interner())
            .with_types(program.types())
            .print(&node);
        eprintln!("{printed}");
    }

    Ok(node)
}
