//! Sequence declarations and flattening.
//!
//! Routes declare their work as a tree: steps interleaved with named
//! subsequences that several routes share (e.g. "parse body and read the
//! auth user"). Before execution the tree is flattened depth-first into the
//! list of steps the pipeline runs.
//!
//! # Example
//!
//! ```
//! use pinfluencer_core::PinfluencerContext;
//! use pinfluencer_middleware::{Sequence, Step};
//!
//! let noop = |name| Step::new(name, |_: &mut PinfluencerContext| {});
//!
//! let shared = Sequence::new("shared").step(noop("a")).step(noop("b"));
//! let route = Sequence::new("route")
//!     .step(noop("x"))
//!     .then(shared)
//!     .step(noop("y"));
//!
//! let names: Vec<_> = route.flatten().iter().map(|s| s.name()).collect();
//! assert_eq!(names, vec!["x", "a", "b", "y"]);
//! ```

use crate::step::Step;

/// One entry of a sequence declaration.
#[derive(Debug, Clone)]
pub enum Component {
    /// A directly callable step.
    Step(Step),
    /// A nested sequence, expanded in place.
    Subsequence(Sequence),
}

/// A named, possibly nested, list of steps.
#[derive(Debug, Clone, Default)]
pub struct Sequence {
    name: &'static str,
    components: Vec<Component>,
}

impl Sequence {
    /// Creates an empty sequence.
    #[must_use]
    pub fn new(name: &'static str) -> Self {
        Self {
            name,
            components: Vec::new(),
        }
    }

    /// Appends a step.
    #[must_use]
    pub fn step(mut self, step: Step) -> Self {
        self.components.push(Component::Step(step));
        self
    }

    /// Appends several steps in order.
    #[must_use]
    pub fn steps(mut self, steps: impl IntoIterator<Item = Step>) -> Self {
        self.components
            .extend(steps.into_iter().map(Component::Step));
        self
    }

    /// Appends a nested sequence.
    #[must_use]
    pub fn then(mut self, subsequence: Sequence) -> Self {
        self.components.push(Component::Subsequence(subsequence));
        self
    }

    /// Returns the sequence name.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        self.name
    }

    /// Returns the declared components.
    #[must_use]
    pub fn components(&self) -> &[Component] {
        &self.components
    }

    /// Returns `true` if nothing was declared.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.components.is_empty()
    }

    /// Expands nested sequences depth-first into a flat step list.
    ///
    /// Flattening does not consume the declaration; calling it twice yields
    /// equal lists.
    #[must_use]
    pub fn flatten(&self) -> Vec<Step> {
        let mut steps = Vec::new();
        self.flatten_into(&mut steps);
        steps
    }

    fn flatten_into(&self, steps: &mut Vec<Step>) {
        for component in &self.components {
            match component {
                Component::Step(step) => steps.push(step.clone()),
                Component::Subsequence(nested) => nested.flatten_into(steps),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pinfluencer_core::PinfluencerContext;

    fn noop(name: &'static str) -> Step {
        Step::new(name, |_: &mut PinfluencerContext| {})
    }

    fn names(steps: &[Step]) -> Vec<&'static str> {
        steps.iter().map(Step::name).collect()
    }

    #[test]
    fn test_flat_sequence() {
        let sequence = Sequence::new("flat").steps([noop("a"), noop("b"), noop("c")]);
        assert_eq!(names(&sequence.flatten()), vec!["a", "b", "c"]);
    }

    #[test]
    fn test_nested_expanded_in_place() {
        let inner = Sequence::new("inner").step(noop("a")).step(noop("b"));
        let outer = Sequence::new("outer")
            .step(noop("x"))
            .then(inner)
            .step(noop("y"));

        assert_eq!(
            outer.flatten(),
            vec![noop("x"), noop("a"), noop("b"), noop("y")]
        );
    }

    #[test]
    fn test_deep_nesting_is_depth_first() {
        let leaf = Sequence::new("leaf").step(noop("c"));
        let middle = Sequence::new("middle")
            .step(noop("b"))
            .then(leaf)
            .step(noop("d"));
        let root = Sequence::new("root")
            .step(noop("a"))
            .then(middle)
            .then(Sequence::new("empty"))
            .step(noop("e"));

        assert_eq!(names(&root.flatten()), vec!["a", "b", "c", "d", "e"]);
    }

    #[test]
    fn test_flatten_is_idempotent() {
        let shared = Sequence::new("shared").step(noop("s"));
        let route = Sequence::new("route").then(shared.clone()).step(noop("r")).then(shared);

        assert_eq!(route.flatten(), route.flatten());
        assert_eq!(names(&route.flatten()), vec!["s", "r", "s"]);
    }

    #[test]
    fn test_empty() {
        let sequence = Sequence::new("empty");
        assert!(sequence.is_empty());
        assert!(sequence.flatten().is_empty());
        assert_eq!(sequence.name(), "empty");
    }
}
