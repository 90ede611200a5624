//! The rule engine.
//!
//! A [`RuleSet`] is an ordered list of [`Rule`]s built once and run against
//! any number of documents. Each rule carries the name of the field it
//! inspects and a check that returns a message when the field does not
//! conform. Rules never short-circuit across fields; gating between checks on
//! the *same* field (a precondition before dependent checks) lives inside a
//! single rule's closure.

use serde::Serialize;

/// One failed rule: the field it inspected and the conformance message.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Failure {
    pub field: String,
    pub message: String,
}

/// The result of one validator run: pass iff zero failure records.
///
/// Immutable once produced; failures preserve rule declaration order.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct Outcome {
    failures: Vec<Failure>,
}

impl Outcome {
    /// Whether the document satisfied every rule.
    pub fn is_valid(&self) -> bool {
        self.failures.is_empty()
    }

    /// The failure records, in rule declaration order.
    pub fn failures(&self) -> &[Failure] {
        &self.failures
    }
}

/// A single per-field rule.
pub struct Rule<T: ?Sized> {
    field: &'static str,
    check: Box<dyn Fn(&T) -> Option<String> + Send + Sync>,
}

/// An ordered rule list evaluated with failure accumulation.
pub struct RuleSet<T: ?Sized> {
    rules: Vec<Rule<T>>,
}

impl<T: ?Sized> RuleSet<T> {
    /// Create an empty rule set.
    pub fn new() -> Self {
        RuleSet { rules: Vec::new() }
    }

    /// Append a rule: a field name plus a check returning a message on
    /// failure, `None` on pass.
    pub fn rule(
        mut self,
        field: &'static str,
        check: impl Fn(&T) -> Option<String> + Send + Sync + 'static,
    ) -> Self {
        self.rules.push(Rule {
            field,
            check: Box::new(check),
        });
        self
    }

    /// Embed another validator's full rule list at this position.
    ///
    /// Nesting, not inheritance: the embedded rules run in place, in their
    /// own declaration order.
    pub fn embed(mut self, other: RuleSet<T>) -> Self {
        self.rules.extend(other.rules);
        self
    }

    /// Run every rule against the document, accumulating failures in order.
    pub fn validate(&self, value: &T) -> Outcome {
        let failures = self
            .rules
            .iter()
            .filter_map(|rule| {
                (rule.check)(value).map(|message| Failure {
                    field: rule.field.to_string(),
                    message,
                })
            })
            .collect();

        Outcome { failures }
    }
}

impl<T: ?Sized> Default for RuleSet<T> {
    fn default() -> Self {
        RuleSet::new()
    }
}
