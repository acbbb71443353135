//! Expansion of steps blocks into rendered rows.
//!
//! Each test case's steps are rendered with no bindings. A call is replaced
//! by the steps of every function with the target name, in declaration
//! order, rendered with the call's parameters as a fresh binding set: the
//! caller's bindings are not visible inside the callee.

use crate::compiled::{Compilation, CompiledRow, CompiledSuite, CompiledTestCase};
use crate::error::CompileError;
use crate::options::{BindingPolicy, CompileOptions, DuplicateFunctionPolicy, UnresolvedCallPolicy};
use indexmap::IndexMap;
use stepsheet_parser::ast::{Call, Declaration, Function, StepItem, Steps, TestSuite};
use stepsheet_parser::template::{self, TemplateError};
use stepsheet_parser::{Params, SyntaxTree};

/// Compile every suite of `tree` with default options.
pub fn compile(tree: &SyntaxTree) -> Result<Compilation, CompileError> {
    Compiler::new(tree, CompileOptions::default()).compile()
}

/// Compiles one syntax tree.
///
/// The function catalog is built once, up front, from the tree's declarations.
#[derive(Debug)]
pub struct Compiler<'t> {
    tree: &'t SyntaxTree,
    options: CompileOptions,
    catalog: IndexMap<&'t str, Vec<&'t Function>>,
}

/// Where an expansion is happening, for error messages and cycle checks.
struct Expansion<'t> {
    root: String,
    stack: Vec<&'t str>,
}

impl Expansion<'_> {
    fn new(root: String) -> Self {
        Self {
            root,
            stack: Vec::new(),
        }
    }

    fn within(&self) -> String {
        match self.stack.last() {
            Some(function) => format!("function '{}'", function),
            None => self.root.clone(),
        }
    }

    fn chain_to(&self, target: &str) -> Vec<String> {
        self.stack
            .iter()
            .map(|name| name.to_string())
            .chain(std::iter::once(target.to_string()))
            .collect()
    }
}

impl<'t> Compiler<'t> {
    pub fn new(tree: &'t SyntaxTree, options: CompileOptions) -> Self {
        let mut catalog: IndexMap<&'t str, Vec<&'t Function>> = IndexMap::new();
        for function in tree.functions() {
            catalog.entry(function.name.as_str()).or_default().push(function);
        }

        Self {
            tree,
            options,
            catalog,
        }
    }

    pub fn options(&self) -> &CompileOptions {
        &self.options
    }

    /// Compile every test suite, in source order.
    pub fn compile(&self) -> Result<Compilation, CompileError> {
        let mut suites = Vec::new();

        for decl in &self.tree.declarations {
            match &decl.node {
                Declaration::Function(_) => continue,
                Declaration::TestSuite(suite) => suites.push(self.compile_suite(suite)?),
            }
        }

        Ok(Compilation { suites })
    }

    /// Compile one suite.
    pub fn compile_suite(&self, suite: &TestSuite) -> Result<CompiledSuite, CompileError> {
        let mut test_cases = Vec::with_capacity(suite.test_cases.len());

        for case in &suite.test_cases {
            let mut expansion = Expansion::new(format!("test case '{}'", case.node.name));
            let mut rows = Vec::new();
            self.expand_into(&case.node.steps, &Params::new(), &mut expansion, &mut rows)?;

            tracing::trace!(case = %case.node.name, rows = rows.len(), "expanded test case");
            test_cases.push(CompiledTestCase {
                name: case.node.name.clone(),
                extra_values: case.node.extra_values.clone(),
                rows,
            });
        }

        let compiled = CompiledSuite {
            suite_name: suite.name.clone(),
            extra_columns: suite.extra_columns.clone(),
            test_cases,
        };
        tracing::debug!(
            suite = %compiled.suite_name,
            cases = compiled.test_cases.len(),
            rows = compiled.row_count(),
            "compiled suite"
        );
        Ok(compiled)
    }

    /// Render a steps block under `bindings`, expanding calls.
    pub fn expand_steps(
        &self,
        steps: &Steps,
        bindings: &Params,
    ) -> Result<Vec<CompiledRow>, CompileError> {
        let mut rows = Vec::new();
        self.expand_into(steps, bindings, &mut Expansion::new("steps".to_string()), &mut rows)?;
        Ok(rows)
    }

    fn expand_into(
        &self,
        steps: &Steps,
        bindings: &Params,
        expansion: &mut Expansion<'t>,
        out: &mut Vec<CompiledRow>,
    ) -> Result<(), CompileError> {
        for item in &steps.items {
            match &item.node {
                StepItem::Step(step) => {
                    let text = self.render(&step.text, bindings, expansion, item.line)?;
                    let expected = self.render(&step.expected, bindings, expansion, item.line)?;
                    out.push(CompiledRow::new(text, expected));
                }
                StepItem::Call(call) => self.expand_call(call, item.line, expansion, out)?,
            }
        }
        Ok(())
    }

    fn expand_call(
        &self,
        call: &Call,
        line: usize,
        expansion: &mut Expansion<'t>,
        out: &mut Vec<CompiledRow>,
    ) -> Result<(), CompileError> {
        let functions = self.resolve(call, line)?;

        if functions.is_empty() {
            tracing::warn!(target_name = %call.target, line, "call to undeclared function expands to nothing");
            return Ok(());
        }

        if expansion.stack.iter().any(|name| *name == call.target) {
            return Err(CompileError::CallCycle {
                chain: expansion.chain_to(&call.target),
                line,
            });
        }
        if expansion.stack.len() >= self.options.max_call_depth {
            return Err(CompileError::RecursionLimit {
                limit: self.options.max_call_depth,
                chain: expansion.chain_to(&call.target),
                line,
            });
        }

        for &function in functions {
            tracing::trace!(function = %function.name, depth = expansion.stack.len() + 1, "expanding call");
            let bindings = self.bind(function, call);

            expansion.stack.push(function.name.as_str());
            let result = self.expand_into(&function.steps, &bindings, expansion, out);
            expansion.stack.pop();
            result?;
        }
        Ok(())
    }

    /// The functions a call expands, after applying the policies.
    fn resolve(&self, call: &Call, line: usize) -> Result<&[&'t Function], CompileError> {
        let matches = self
            .catalog
            .get(call.target.as_str())
            .map(Vec::as_slice)
            .unwrap_or(&[]);

        if matches.is_empty() {
            return match self.options.unresolved_calls {
                UnresolvedCallPolicy::Ignore => Ok(matches),
                UnresolvedCallPolicy::Reject => Err(CompileError::UnresolvedCall {
                    target: call.target.clone(),
                    line,
                }),
            };
        }

        match self.options.duplicate_functions {
            DuplicateFunctionPolicy::Concatenate => Ok(matches),
            DuplicateFunctionPolicy::FirstOnly => Ok(&matches[..1]),
            DuplicateFunctionPolicy::Reject if matches.len() > 1 => {
                Err(CompileError::DuplicateFunction {
                    target: call.target.clone(),
                    count: matches.len(),
                    line,
                })
            }
            DuplicateFunctionPolicy::Reject => Ok(matches),
        }
    }

    fn bind(&self, function: &Function, call: &Call) -> Params {
        match self.options.bindings {
            BindingPolicy::CallOnly => call.parameters.clone(),
            BindingPolicy::WithDefaults => {
                let mut bindings = function.parameters.clone();
                for (name, value) in &call.parameters {
                    bindings.insert(name.clone(), value.clone());
                }
                bindings
            }
        }
    }

    fn render(
        &self,
        text: &str,
        bindings: &Params,
        expansion: &Expansion<'_>,
        line: usize,
    ) -> Result<String, CompileError> {
        template::render(text, bindings).map_err(|e| match e {
            TemplateError::MissingBinding { name } => CompileError::MissingBinding {
                placeholder: name,
                template: text.to_string(),
                within: expansion.within(),
                line,
            },
            TemplateError::Syntax { message, .. } => CompileError::Template {
                template: text.to_string(),
                message,
                within: expansion.within(),
                line,
            },
        })
    }
}
