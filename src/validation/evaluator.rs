//! Constraint Evaluator: runs the rule catalog against a service model.
//!
//! Evaluation is closed-world: a fact absent from the model is absent, never
//! "unknown".  A service without a declared method therefore fires neither
//! conditional body rule and is not itself in violation.  Rules never
//! short-circuit; the caller always sees the complete diagnostic set, in
//! registry order and then document order.

use crate::dsl::model::{Service, Step, StepKind};

use super::rules::{Rule, RuleKind, StepClass};
use super::types::Violation;

/// Evaluate every rule against the service, collecting violations.
///
/// Pure over the model: the service is only read, the violation list is the
/// sole output.  An empty list means structurally valid.
pub fn evaluate(service: &Service, rules: &[Rule]) -> Vec<Violation> {
    let mut violations = Vec::new();
    for rule in rules {
        check_rule(service, rule, &mut violations);
    }
    violations
}

fn check_rule(service: &Service, rule: &Rule, out: &mut Vec<Violation>) {
    match rule.kind {
        RuleKind::ExactCount { class, expected } => {
            let matching: Vec<&Step> = steps_in_class(service, class).collect();
            if matching.len() != expected {
                out.push(cardinality_violation(rule, class, expected, &matching));
            }
        }
        RuleKind::MinCount { class, minimum } => {
            if steps_in_class(service, class).count() < minimum {
                out.push(Violation {
                    rule: rule.id.into(),
                    step: None,
                    message: format!("No {} defined", class.plural()),
                });
            }
        }
        // The model holds `Option<HttpMethod>`: at most one value by
        // construction.  The rule stays in the catalog so the invariant is
        // explicit; there is nothing left to check at runtime.
        RuleKind::AtMostOneMethod => {}
        RuleKind::HttpCallHasUrl => {
            for step in service.steps.iter() {
                if let StepKind::HttpCall { url: None, .. } = step.kind {
                    out.push(Violation {
                        rule: rule.id.into(),
                        step: Some(step.name.clone()),
                        message: format!("Step '{}' missing or empty url", step.name),
                    });
                }
            }
        }
        RuleKind::MethodImpliesBody {
            method,
            expects_body,
        } => {
            // Closed-world: unset method means the antecedent does not hold.
            if service.method != Some(method) {
                return;
            }
            for step in service.steps.iter() {
                if let StepKind::HttpCall { uses_body, .. } = step.kind {
                    if uses_body != expects_body {
                        let verb = if expects_body { "should" } else { "should not" };
                        out.push(Violation {
                            rule: rule.id.into(),
                            step: Some(step.name.clone()),
                            message: format!(
                                "{} step '{}' {} define a body",
                                method.as_str(),
                                step.name,
                                verb
                            ),
                        });
                    }
                }
            }
        }
    }
}

fn steps_in_class(service: &Service, class: StepClass) -> impl Iterator<Item = &Step> {
    service.steps.iter().filter(move |s| match class {
        StepClass::Any => true,
        StepClass::Return => matches!(s.kind, StepKind::Return),
    })
}

fn cardinality_violation(
    rule: &Rule,
    class: StepClass,
    expected: usize,
    matching: &[&Step],
) -> Violation {
    let message = if matching.is_empty() {
        format!("No {} found", class.label())
    } else {
        let names: Vec<&str> = matching.iter().map(|s| s.name.as_str()).collect();
        format!(
            "Expected exactly {} {}, found {}: {}",
            count_word(expected),
            class.label(),
            matching.len(),
            names.join(", ")
        )
    };
    Violation {
        rule: rule.id.into(),
        step: None,
        message,
    }
}

fn count_word(n: usize) -> String {
    match n {
        1 => "one".to_string(),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dsl::model::{HttpMethod, Service};
    use crate::validation::rules::registry;

    fn http_call(name: &str, url: Option<&str>, uses_body: bool) -> Step {
        Step {
            name: name.into(),
            kind: StepKind::HttpCall {
                url: url.map(Into::into),
                uses_body,
            },
        }
    }

    fn ret(name: &str) -> Step {
        Step {
            name: name.into(),
            kind: StepKind::Return,
        }
    }

    fn service(method: Option<HttpMethod>, steps: Vec<Step>) -> Service {
        Service {
            name: None,
            method,
            steps,
        }
    }

    #[test]
    fn test_valid_get_service_has_no_violations() {
        let svc = service(
            Some(HttpMethod::Get),
            vec![http_call("fetch", Some("https://x"), false), ret("done")],
        );
        assert!(evaluate(&svc, registry()).is_empty());
    }

    #[test]
    fn test_get_with_body_fires_get_excludes_body() {
        let svc = service(
            Some(HttpMethod::Get),
            vec![http_call("fetch", Some("https://x"), true), ret("done")],
        );
        let violations = evaluate(&svc, registry());
        assert_eq!(violations.len(), 1);
        assert_eq!(violations[0].rule, "get-excludes-body");
        assert_eq!(
            violations[0].message,
            "GET step 'fetch' should not define a body"
        );
    }

    #[test]
    fn test_post_without_body_fires_post_requires_body() {
        let svc = service(
            Some(HttpMethod::Post),
            vec![http_call("submit", Some("https://x"), false), ret("done")],
        );
        let violations = evaluate(&svc, registry());
        assert_eq!(violations.len(), 1);
        assert_eq!(violations[0].rule, "post-requires-body");
        assert_eq!(
            violations[0].message,
            "POST step 'submit' should define a body"
        );
    }

    #[test]
    fn test_closed_world_unset_method_fires_neither_conditional() {
        let svc = service(None, vec![http_call("a", Some("https://x"), true), ret("done")]);
        assert!(evaluate(&svc, registry()).is_empty());
    }

    #[test]
    fn test_no_return_step() {
        let svc = service(None, vec![http_call("a", Some("https://x"), false)]);
        let violations = evaluate(&svc, registry());
        assert_eq!(violations.len(), 1);
        assert_eq!(violations[0].rule, "exactly-one-return");
        assert_eq!(violations[0].message, "No 'return' step found");
    }

    #[test]
    fn test_two_returns_yield_one_violation_citing_both() {
        let svc = service(None, vec![ret("done"), ret("also_done")]);
        let violations = evaluate(&svc, registry());
        assert_eq!(violations.len(), 1);
        assert_eq!(violations[0].rule, "exactly-one-return");
        assert_eq!(
            violations[0].message,
            "Expected exactly one 'return' step, found 2: done, also_done"
        );
    }

    #[test]
    fn test_empty_service_fires_cardinality_rules_in_registry_order() {
        let svc = service(None, vec![]);
        let violations = evaluate(&svc, registry());
        let rules: Vec<_> = violations.iter().map(|v| v.rule.as_str()).collect();
        assert_eq!(rules, vec!["exactly-one-return", "at-least-one-step"]);
        assert_eq!(violations[1].message, "No steps defined");
    }

    #[test]
    fn test_missing_url_per_offending_step_in_document_order() {
        let svc = service(
            None,
            vec![
                http_call("b", None, false),
                http_call("a", None, false),
                ret("done"),
            ],
        );
        let violations = evaluate(&svc, registry());
        let steps: Vec<_> = violations
            .iter()
            .filter(|v| v.rule == "http-call-requires-url")
            .map(|v| v.step.as_deref().unwrap())
            .collect();
        assert_eq!(steps, vec!["b", "a"]);
    }

    #[test]
    fn test_conditional_rules_exempt_non_http_steps() {
        let svc = service(
            Some(HttpMethod::Get),
            vec![
                Step {
                    name: "prep".into(),
                    kind: StepKind::Other { call: None },
                },
                ret("done"),
            ],
        );
        assert!(evaluate(&svc, registry()).is_empty());
    }

    #[test]
    fn test_evaluation_never_short_circuits() {
        let svc = service(
            Some(HttpMethod::Post),
            vec![http_call("submit", None, false)],
        );
        let rules: Vec<_> = evaluate(&svc, registry())
            .iter()
            .map(|v| v.rule.clone())
            .collect();
        assert_eq!(
            rules,
            vec![
                "exactly-one-return",
                "http-call-requires-url",
                "post-requires-body",
            ]
        );
    }

    #[test]
    fn test_evaluation_is_idempotent() {
        let svc = service(
            Some(HttpMethod::Get),
            vec![http_call("a", None, true), http_call("b", None, true)],
        );
        let first = evaluate(&svc, registry());
        let second = evaluate(&svc, registry());
        assert_eq!(first, second);
    }
}
