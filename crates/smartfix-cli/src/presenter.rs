//! Terminal rendering of terminal outcomes.
//!
//! Causes are sorted by descending probability here; the oracle does not
//! guarantee a pre-sorted list. Each fallback reason gets its own
//! explanation so the user can tell a depth cutoff from a repeat cutoff
//! from a garbled service reply.

use colored::Colorize;
use smartfix_core::session::{TerminalOutcome, UnableReason};
use smartfix_core::verdict::{FinalReport, RecommendedAction};

pub fn render_outcome(outcome: &TerminalOutcome) -> String {
    match outcome {
        TerminalOutcome::Report(report) => render_report(report),
        TerminalOutcome::Unable { reason } => render_unable(*reason),
    }
}

fn render_report(report: &FinalReport) -> String {
    let mut out = String::new();
    out.push_str(&format!("{}\n\n", "Diagnostic report".green().bold()));

    out.push_str("Likely causes:\n");
    for cause in report.causes_by_probability() {
        out.push_str(&format!("  {:>3}%  {}\n", cause.prob, cause.name));
    }

    if !report.diy_fixes.is_empty() {
        out.push_str("\nThings you can try yourself:\n");
        for fix in &report.diy_fixes {
            out.push_str(&format!("  - {fix}\n"));
        }
    }

    out.push_str(&format!(
        "\nRecommended action: {}\n",
        action_line(report.action)
    ));
    out
}

/// The three fixed user-facing recommendation strings.
fn action_line(action: RecommendedAction) -> &'static str {
    match action {
        RecommendedAction::CallSupport => "contact the manufacturer's support line",
        RecommendedAction::Replace => "have the appliance repaired or replaced",
        RecommendedAction::Monitor => "keep monitoring and act if the problem persists",
    }
}

fn render_unable(reason: UnableReason) -> String {
    let explanation = match reason {
        UnableReason::MaxDepth => {
            "The question limit was reached before a cause could be isolated."
        }
        UnableReason::Repeat => {
            "The service kept circling back to the same question, so the session was stopped."
        }
        UnableReason::InvalidResponse => {
            "The diagnosis service returned a reply we could not understand."
        }
    };
    format!(
        "{}\n\n{}\nPlease contact support if the problem persists.\n",
        "Could not complete the diagnosis".red().bold(),
        explanation
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use smartfix_core::verdict::Cause;

    fn report(causes: Vec<(&str, u8)>, action: RecommendedAction) -> FinalReport {
        FinalReport {
            causes: causes
                .into_iter()
                .map(|(name, prob)| Cause {
                    name: name.to_string(),
                    prob,
                })
                .collect(),
            diy_fixes: vec!["Check the power cord".to_string()],
            action,
        }
    }

    #[test]
    fn causes_render_in_descending_probability_order() {
        colored::control::set_override(false);
        let outcome = TerminalOutcome::Report(report(
            vec![("A", 40), ("B", 60)],
            RecommendedAction::Monitor,
        ));

        let rendered = render_outcome(&outcome);
        let a = rendered.find("40%  A").unwrap();
        let b = rendered.find("60%  B").unwrap();
        assert!(b < a, "B (60%) must be listed before A (40%)");
    }

    #[test]
    fn each_action_maps_to_a_distinct_line() {
        let lines = [
            action_line(RecommendedAction::CallSupport),
            action_line(RecommendedAction::Replace),
            action_line(RecommendedAction::Monitor),
        ];
        assert_ne!(lines[0], lines[1]);
        assert_ne!(lines[1], lines[2]);
        assert_ne!(lines[0], lines[2]);
    }

    #[test]
    fn fallback_reasons_render_distinct_explanations() {
        colored::control::set_override(false);
        let max_depth = render_outcome(&TerminalOutcome::Unable {
            reason: UnableReason::MaxDepth,
        });
        let repeat = render_outcome(&TerminalOutcome::Unable {
            reason: UnableReason::Repeat,
        });
        let invalid = render_outcome(&TerminalOutcome::Unable {
            reason: UnableReason::InvalidResponse,
        });

        assert_ne!(max_depth, repeat);
        assert_ne!(repeat, invalid);
        assert!(max_depth.contains("question limit"));
        assert!(repeat.contains("same question"));
    }

    #[test]
    fn diy_fixes_are_listed_line_by_line() {
        colored::control::set_override(false);
        let outcome = TerminalOutcome::Report(report(
            vec![("Clogged drain", 100)],
            RecommendedAction::CallSupport,
        ));

        let rendered = render_outcome(&outcome);
        assert!(rendered.contains("  - Check the power cord\n"));
    }
}
