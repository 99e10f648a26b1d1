//! Rule Registry: the fixed catalog of structural constraints.
//!
//! Each rule is a data entry with a stable string id.  The evaluator is
//! generic over [`RuleKind`], so extending the catalog means appending an
//! entry here, never touching the evaluator's control flow.

use crate::dsl::model::HttpMethod;

/// Class of step a cardinality rule counts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepClass {
    /// Any step, regardless of shape.
    Any,
    /// Return steps only.
    Return,
}

impl StepClass {
    /// Singular label used in diagnostics, e.g. `'return' step`.
    pub fn label(self) -> &'static str {
        match self {
            StepClass::Any => "step",
            StepClass::Return => "'return' step",
        }
    }

    /// Plural label used in diagnostics.
    pub fn plural(self) -> &'static str {
        match self {
            StepClass::Any => "steps",
            StepClass::Return => "'return' steps",
        }
    }
}

/// Shape of a structural constraint.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RuleKind {
    /// Count of steps in the class must equal `expected`.
    ExactCount { class: StepClass, expected: usize },
    /// Count of steps in the class must be at least `minimum`.
    MinCount { class: StepClass, minimum: usize },
    /// The service method, when present, is a single value.  Structurally
    /// guaranteed by the model; listed so the invariant stays explicit.
    AtMostOneMethod,
    /// Every HTTP call step carries a non-empty url.
    HttpCallHasUrl,
    /// Conditional implication: when the service method equals `method`,
    /// every HTTP call step must have `uses_body == expects_body`.  Return
    /// and other steps are exempt by construction.
    MethodImpliesBody {
        method: HttpMethod,
        expects_body: bool,
    },
}

/// One catalog entry.
#[derive(Debug, Clone, Copy)]
pub struct Rule {
    /// Stable identifier, used verbatim in violations.
    pub id: &'static str,
    pub description: &'static str,
    pub kind: RuleKind,
}

/// The fixed catalog, in evaluation order.
pub const RULES: &[Rule] = &[
    Rule {
        id: "exactly-one-return",
        description: "a service terminates with exactly one return step",
        kind: RuleKind::ExactCount {
            class: StepClass::Return,
            expected: 1,
        },
    },
    Rule {
        id: "at-least-one-step",
        description: "a service defines at least one step",
        kind: RuleKind::MinCount {
            class: StepClass::Any,
            minimum: 1,
        },
    },
    Rule {
        id: "at-most-one-method",
        description: "a service declares at most one HTTP method",
        kind: RuleKind::AtMostOneMethod,
    },
    Rule {
        id: "http-call-requires-url",
        description: "every HTTP call carries a non-empty url",
        kind: RuleKind::HttpCallHasUrl,
    },
    Rule {
        id: "get-excludes-body",
        description: "GET services must not send bodies",
        kind: RuleKind::MethodImpliesBody {
            method: HttpMethod::Get,
            expects_body: false,
        },
    },
    Rule {
        id: "post-requires-body",
        description: "POST services must send bodies",
        kind: RuleKind::MethodImpliesBody {
            method: HttpMethod::Post,
            expects_body: true,
        },
    },
];

/// The catalog consulted by the evaluator.  Immutable after initialization
/// and safely shared across concurrent validation runs.
pub fn registry() -> &'static [Rule] {
    RULES
}
