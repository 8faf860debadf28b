//! Context flags active while parsing.
//!
//! A [`ParseContext`] is a small copyable value. Overrides are scoped by
//! [`Parser::with_context`], which restores the previous value when the
//! closure returns, so a production can never leak a flag to its caller.

use tern_ast::NodeFlags;

use crate::parser::Parser;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ParseContext(NodeFlags);

impl ParseContext {
    pub fn new(flags: NodeFlags) -> Self {
        Self(flags & NodeFlags::CONTEXT_FLAGS)
    }

    #[inline]
    pub fn flags(self) -> NodeFlags {
        self.0
    }

    #[inline]
    pub fn has(self, flag: NodeFlags) -> bool {
        self.0.contains(flag)
    }

    #[inline]
    pub fn with(self, flag: NodeFlags) -> Self {
        Self(self.0 | flag)
    }

    #[inline]
    pub fn without(self, flag: NodeFlags) -> Self {
        Self(self.0 - flag)
    }

    /// Set or clear `flag`.
    #[inline]
    pub fn set(self, flag: NodeFlags, value: bool) -> Self {
        if value {
            self.with(flag)
        } else {
            self.without(flag)
        }
    }

    #[inline]
    pub fn in_yield(self) -> bool {
        self.has(NodeFlags::YIELD_CONTEXT)
    }

    #[inline]
    pub fn in_await(self) -> bool {
        self.has(NodeFlags::AWAIT_CONTEXT)
    }

    #[inline]
    pub fn in_disallow_in(self) -> bool {
        self.has(NodeFlags::DISALLOW_IN_CONTEXT)
    }

    #[inline]
    pub fn in_decorator(self) -> bool {
        self.has(NodeFlags::DECORATOR_CONTEXT)
    }

    #[inline]
    pub fn in_disallow_conditional_types(self) -> bool {
        self.has(NodeFlags::DISALLOW_CONDITIONAL_TYPES_CONTEXT)
    }

    #[inline]
    pub fn is_javascript_file(self) -> bool {
        self.has(NodeFlags::JAVASCRIPT_FILE)
    }
}

impl Parser {
    /// Run `f` with the context replaced by `context`, then restore.
    pub(crate) fn with_context<T>(&mut self, context: ParseContext, f: impl FnOnce(&mut Self) -> T) -> T {
        let saved = std::mem::replace(&mut self.context, context);
        let result = f(self);
        self.context = saved;
        result
    }

    /// Run `f` with `flag` set or cleared.
    pub(crate) fn do_in_context<T>(&mut self, flag: NodeFlags, value: bool, f: impl FnOnce(&mut Self) -> T) -> T {
        let context = self.context.set(flag, value);
        self.with_context(context, f)
    }

    pub(crate) fn allow_in<T>(&mut self, f: impl FnOnce(&mut Self) -> T) -> T {
        self.do_in_context(NodeFlags::DISALLOW_IN_CONTEXT, false, f)
    }

    pub(crate) fn disallow_in<T>(&mut self, f: impl FnOnce(&mut Self) -> T) -> T {
        self.do_in_context(NodeFlags::DISALLOW_IN_CONTEXT, true, f)
    }

    pub(crate) fn in_decorator_context<T>(&mut self, f: impl FnOnce(&mut Self) -> T) -> T {
        self.do_in_context(NodeFlags::DECORATOR_CONTEXT, true, f)
    }

    pub(crate) fn outside_decorator_context<T>(&mut self, f: impl FnOnce(&mut Self) -> T) -> T {
        self.do_in_context(NodeFlags::DECORATOR_CONTEXT, false, f)
    }

    pub(crate) fn allow_conditional_types<T>(&mut self, f: impl FnOnce(&mut Self) -> T) -> T {
        self.do_in_context(NodeFlags::DISALLOW_CONDITIONAL_TYPES_CONTEXT, false, f)
    }

    pub(crate) fn disallow_conditional_types<T>(&mut self, f: impl FnOnce(&mut Self) -> T) -> T {
        self.do_in_context(NodeFlags::DISALLOW_CONDITIONAL_TYPES_CONTEXT, true, f)
    }

    /// Function bodies and parameter lists pick yield/await from the
    /// function's own modifiers, not from the enclosing code.
    pub(crate) fn in_function_context<T>(
        &mut self,
        is_generator: bool,
        is_async: bool,
        f: impl FnOnce(&mut Self) -> T,
    ) -> T {
        let context = self
            .context
            .set(NodeFlags::YIELD_CONTEXT, is_generator)
            .set(NodeFlags::AWAIT_CONTEXT, is_async);
        self.with_context(context, f)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_keeps_only_context_bits() {
        let context = ParseContext::new(NodeFlags::YIELD_CONTEXT | NodeFlags::LET | NodeFlags::THIS_NODE_HAS_ERROR);
        assert_eq!(context.flags(), NodeFlags::YIELD_CONTEXT);
    }

    #[test]
    fn test_with_and_without() {
        let context = ParseContext::default().with(NodeFlags::AWAIT_CONTEXT).with(NodeFlags::DISALLOW_IN_CONTEXT);
        assert!(context.in_await());
        assert!(context.in_disallow_in());
        let context = context.without(NodeFlags::DISALLOW_IN_CONTEXT);
        assert!(!context.in_disallow_in());
        assert!(context.in_await());
        assert_eq!(context.set(NodeFlags::AWAIT_CONTEXT, false), ParseContext::default());
    }

    #[test]
    fn test_scoped_override_restores() {
        let mut parser = Parser::new("a.ts", "x", Default::default());
        let before = parser.context;
        let inner = parser.in_decorator_context(|p| p.disallow_in(|p| p.context));
        assert!(inner.in_decorator());
        assert!(inner.in_disallow_in());
        assert_eq!(parser.context, before);
    }
}
