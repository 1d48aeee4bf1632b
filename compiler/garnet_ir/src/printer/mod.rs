//! Surface-syntax printer for syntax trees.
//!
//! Renders a tree in Garnet surface syntax. Versioned variables print as
//! `name:version` (version 0 unsuffixed), which makes normalized output easy
//! to read in debug dumps and to compare in tests.
//!
//! Statement lists print one statement per line; nested bodies indent by two
//! spaces. A sequence in expression position prints inline as `(a; b)`.

use crate::stack::ensure_sufficient_stack;
use crate::{Call, Def, HashEntry, Node, NodeKind, Path, StringInterner, TypeArg, TypePool, Var};

/// Tree printer.
pub struct Printer<'a> {
    interner: &'a StringInterner,
    types: Option<&'a TypePool>,
    out: String,
    indent: usize,
}

impl<'a> Printer<'a> {
    pub fn new(interner: &'a StringInterner) -> Self {
        Printer {
            interner,
            types: None,
            out: String::new(),
            indent: 0,
        }
    }

    /// Resolve `Generic` nodes through `types` instead of printing raw ids.
    #[must_use]
    pub fn with_types(mut self, types: &'a TypePool) -> Self {
        self.types = Some(types);
        self
    }

    /// Print `node` as a top-level statement list.
    pub fn print(mut self, node: &Node) -> String {
        self.stmt_list(node);
        self.out
    }

    fn stmt_list(&mut self, node: &Node) {
        match &node.kind {
            NodeKind::Seq(stmts) => {
                for (i, stmt) in stmts.iter().enumerate() {
                    if i > 0 {
                        self.newline();
                    }
                    self.expr(stmt);
                }
            }
            _ => self.expr(node),
        }
    }

    /// Print an indented body; each statement starts on a fresh line.
    fn body(&mut self, node: Option<&Node>) {
        self.indent += 1;
        if let Some(node) = node {
            let stmts = match &node.kind {
                NodeKind::Seq(stmts) => stmts.as_slice(),
                _ => std::slice::from_ref(node),
            };
            for stmt in stmts {
                self.newline();
                self.expr(stmt);
            }
        }
        self.indent -= 1;
    }

    fn newline(&mut self) {
        self.out.push('\n');
        for _ in 0..self.indent {
            self.out.push_str("  ");
        }
    }

    fn name(&mut self, name: crate::Name) {
        self.out.push_str(self.interner.lookup(name));
    }

    fn path(&mut self, path: &Path) {
        if path.global {
            self.out.push_str("::");
        }
        for (i, name) in path.names.iter().enumerate() {
            if i > 0 {
                self.out.push_str("::");
            }
            self.name(*name);
        }
    }

    fn var(&mut self, var: Var) {
        if var.out {
            self.out.push_str("out ");
        }
        self.name(var.name);
        if var.version > 0 {
            self.out.push(':');
            self.out.push_str(&var.version.to_string());
        }
    }

    fn list(&mut self, nodes: &[Node]) {
        for (i, node) in nodes.iter().enumerate() {
            if i > 0 {
                self.out.push_str(", ");
            }
            self.expr(node);
        }
    }

    /// Print an operand of an infix form, parenthesizing anything that
    /// would otherwise bind ambiguously.
    fn operand(&mut self, node: &Node) {
        let wrap = match &node.kind {
            NodeKind::Assign { .. }
            | NodeKind::MultiAssign { .. }
            | NodeKind::And(..)
            | NodeKind::Or(..) => true,
            NodeKind::Call(call) => self.is_operator_call(call),
            _ => false,
        };
        if wrap {
            self.out.push('(');
            self.expr(node);
            self.out.push(')');
        } else {
            self.expr(node);
        }
    }

    fn expr(&mut self, node: &Node) {
        ensure_sufficient_stack(|| self.expr_inner(node));
    }

    fn expr_inner(&mut self, node: &Node) {
        match &node.kind {
            NodeKind::Nop => {}
            NodeKind::Nil => self.out.push_str("nil"),
            NodeKind::Bool(b) => self.out.push_str(if *b { "true" } else { "false" }),
            NodeKind::Int(n) => self.out.push_str(&n.to_string()),
            NodeKind::Str(text) => {
                self.out.push('"');
                self.name(*text);
                self.out.push('"');
            }
            NodeKind::Var(var) => self.var(*var),
            NodeKind::Temp(name) => self.name(*name),
            NodeKind::InstanceVar(name) => {
                self.out.push('@');
                self.name(*name);
            }
            NodeKind::SelfRef => self.out.push_str("self"),
            NodeKind::Const(path) => self.path(path),
            NodeKind::Generic(id) => match self.types {
                Some(types) => {
                    let ty = types.get(*id);
                    self.name(ty.base);
                    self.out.push('(');
                    for (i, arg) in ty.args.iter().enumerate() {
                        if i > 0 {
                            self.out.push_str(", ");
                        }
                        match arg {
                            TypeArg::Named(path) => self.path(path),
                            TypeArg::Merge(nodes) => {
                                self.out.push_str("typeof(");
                                self.list(nodes);
                                self.out.push(')');
                            }
                        }
                    }
                    self.out.push(')');
                }
                None => self.out.push_str(&format!("<generic#{}>", id.raw())),
            },

            NodeKind::Seq(stmts) => {
                self.out.push('(');
                for (i, stmt) in stmts.iter().enumerate() {
                    if i > 0 {
                        self.out.push_str("; ");
                    }
                    self.expr(stmt);
                }
                self.out.push(')');
            }
            NodeKind::If(if_) | NodeKind::Unless(if_) => {
                let keyword = if matches!(node.kind, NodeKind::If(_)) {
                    "if "
                } else {
                    "unless "
                };
                self.out.push_str(keyword);
                self.expr(&if_.cond);
                self.body(if_.then_branch.as_ref());
                if if_.else_branch.is_some() {
                    self.newline();
                    self.out.push_str("else");
                    self.body(if_.else_branch.as_ref());
                }
                self.newline();
                self.out.push_str("end");
            }
            NodeKind::While(while_) => {
                self.out.push_str("while ");
                self.expr(&while_.cond);
                self.body(while_.body.as_ref());
                self.newline();
                self.out.push_str("end");
            }
            NodeKind::Case(case) => {
                self.out.push_str("case ");
                self.expr(&case.subject);
                for when in &case.whens {
                    self.newline();
                    self.out.push_str("when ");
                    self.list(&when.conds);
                    self.body(when.body.as_ref());
                }
                if case.else_branch.is_some() {
                    self.newline();
                    self.out.push_str("else");
                    self.body(case.else_branch.as_ref());
                }
                self.newline();
                self.out.push_str("end");
            }
            NodeKind::And(left, right) => {
                self.operand(left);
                self.out.push_str(" && ");
                self.operand(right);
            }
            NodeKind::Or(left, right) => {
                self.operand(left);
                self.out.push_str(" || ");
                self.operand(right);
            }
            NodeKind::Return(value) => self.terminator("return", value.as_deref()),
            NodeKind::Break(value) => self.terminator("break", value.as_deref()),
            NodeKind::Next(value) => self.terminator("next", value.as_deref()),

            NodeKind::Assign { target, value } => {
                self.expr(target);
                self.out.push_str(" = ");
                self.expr(value);
            }
            NodeKind::MultiAssign { targets, values } => {
                self.list(targets);
                self.out.push_str(" = ");
                self.list(values);
            }

            NodeKind::Call(call) => self.call(call),
            NodeKind::IsA { obj, ty } => {
                self.operand(obj);
                self.out.push_str(".is_a?(");
                self.path(ty);
                self.out.push(')');
            }
            NodeKind::Def(def) => self.def("def ", def),
            NodeKind::Macro(def) => self.def("macro ", def),

            NodeKind::Interpolation(pieces) => {
                self.out.push('"');
                for piece in pieces {
                    if let NodeKind::Str(text) = piece.kind {
                        self.name(text);
                    } else {
                        self.out.push_str("#{");
                        self.expr(piece);
                        self.out.push('}');
                    }
                }
                self.out.push('"');
            }
            NodeKind::Range {
                from,
                to,
                exclusive,
            } => {
                self.operand(from);
                self.out.push_str(if *exclusive { "..." } else { ".." });
                self.operand(to);
            }
            NodeKind::Regex(text) => {
                self.out.push('/');
                self.name(*text);
                self.out.push('/');
            }
            NodeKind::Array { elements, of } => {
                self.out.push('[');
                self.list(elements);
                self.out.push(']');
                if let Some(of) = of {
                    self.out.push_str(" of ");
                    self.path(of);
                }
            }
            NodeKind::Hash { entries, of } => {
                self.out.push('{');
                for (i, HashEntry { key, value }) in entries.iter().enumerate() {
                    if i > 0 {
                        self.out.push_str(", ");
                    }
                    self.expr(key);
                    self.out.push_str(" => ");
                    self.expr(value);
                }
                self.out.push('}');
                if let Some(of) = of {
                    self.out.push_str(" of ");
                    self.path(&of.key);
                    self.out.push_str(" => ");
                    self.path(&of.value);
                }
            }
            NodeKind::Require(path) => {
                self.out.push_str("require \"");
                self.name(*path);
                self.out.push('"');
            }
        }
    }

    fn terminator(&mut self, keyword: &str, value: Option<&Node>) {
        self.out.push_str(keyword);
        if let Some(value) = value {
            self.out.push(' ');
            self.expr(value);
        }
    }

    /// Infix operator method such as `+`, `<<` or `===`.
    fn is_operator_call(&self, call: &Call) -> bool {
        let name = self.interner.lookup(call.name);
        call.receiver.is_some()
            && call.args.len() == 1
            && call.block.is_none()
            && !name.is_empty()
            && name.chars().all(|c| "+-*/%<>=!&|^~".contains(c))
    }

    fn call(&mut self, call: &Call) {
        let name = self.interner.lookup(call.name);

        if let Some(receiver) = &call.receiver {
            if self.is_operator_call(call) {
                self.operand(receiver);
                self.out.push(' ');
                self.out.push_str(name);
                self.out.push(' ');
                self.operand(&call.args[0]);
                return;
            }
            if name == "[]=" && call.args.len() == 2 && call.block.is_none() {
                self.operand(receiver);
                self.out.push('[');
                self.expr(&call.args[0]);
                self.out.push_str("] = ");
                self.expr(&call.args[1]);
                return;
            }
            let is_setter = name.len() > 1
                && name.ends_with('=')
                && name.starts_with(|c: char| c.is_alphabetic() || c == '_');
            if is_setter && call.args.len() == 1 && call.block.is_none() {
                self.operand(receiver);
                self.out.push('.');
                self.out.push_str(&name[..name.len() - 1]);
                self.out.push_str(" = ");
                self.expr(&call.args[0]);
                return;
            }
            self.operand(receiver);
            self.out.push('.');
        }

        self.out.push_str(name);
        if !call.args.is_empty() || call.receiver.is_none() {
            self.out.push('(');
            self.list(&call.args);
            self.out.push(')');
        }

        if let Some(block) = &call.block {
            self.out.push_str(" do");
            if !block.params.is_empty() {
                self.out.push_str(" |");
                for (i, param) in block.params.iter().enumerate() {
                    if i > 0 {
                        self.out.push_str(", ");
                    }
                    self.name(*param);
                }
                self.out.push('|');
            }
            self.body(block.body.as_ref());
            self.newline();
            self.out.push_str("end");
        }
    }

    fn def(&mut self, keyword: &str, def: &Def) {
        self.out.push_str(keyword);
        self.name(def.name);
        if !def.params.is_empty() {
            self.out.push('(');
            for (i, param) in def.params.iter().enumerate() {
                if i > 0 {
                    self.out.push_str(", ");
                }
                self.name(param.name);
                if let Some(default) = &param.default {
                    self.out.push_str(" = ");
                    self.expr(default);
                }
            }
            self.out.push(')');
        }
        self.body(def.body.as_ref());
        self.newline();
        self.out.push_str("end");
    }
}
