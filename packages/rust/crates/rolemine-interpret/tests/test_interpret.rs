#![allow(missing_docs)]

use rolemine_interpret::{
    DEFAULT_CONFIDENCE, DEFAULT_JUSTIFICATION, ExtractionStrategy, FALLBACK_STRATEGY,
    InterpretationSource, ResponseInterpreter, ROSTER_CAP, fallback_roles,
};
use rolemine_types::{RoleOrigin, STRATEGY_ATTRIBUTE};

const BOLD_TWO_ROLES: &str = "\
Based on the access patterns, here are the suggested roles.

**Role 1: HR Manager**
- **Key Permissions:**
  - HRPortal: HRView
  - HRPortal: HRManage
- **Estimated User Count:** 3 (Alice Johnson; Bob Williams; Dana Park)
- **Confidence:** 88%
- **Justification:** HR staff manage employee records.

**Role 2: Finance Analyst**
- **Key Permissions:** FinanceTool: FinanceView, FinanceTool: FinanceEdit
- **Estimated User Count:** 4
- **Confidence:** 72
";

const HEADING_ROLES: &str = "\
### Role 1: Developer
Key Permissions:
1. CodeRepo: CodeRead
2. CodeRepo: CodeWrite
Estimated User Count: 2
Confidence: 91

### Role 2: Auditor
Key Permissions:
- FinanceTool: FinanceView
";

const PLAIN_ROLES: &str = "\
Role 1: Payroll Clerk
Key permissions Payroll: Run, Payroll: View
Estimated user count 5 people
Confidence 64

role 2
Name: Badge Administrator
Key permissions:
- Facilities: BadgeIssue
";

const NAME_FIELD_ROLES: &str = "\
Name: Support Agent
Key permissions:
- Helpdesk: TicketView
- Helpdesk: TicketEdit
Estimated user count: 6
Justification:
Agents triage incoming tickets.

Name: Support Lead
Key permissions:
- Helpdesk: TicketAdmin
Confidence: 95
";

fn strategy_of(role: &rolemine_types::RoleRecord) -> Option<&str> {
    role.attributes.get(STRATEGY_ATTRIBUTE).map(String::as_str)
}

#[test]
fn degenerate_inputs_return_identical_fallback() {
    let interpreter = ResponseInterpreter::new();
    let expected = fallback_roles();
    for _ in 0..3 {
        assert_eq!(interpreter.interpret(Some("")), expected);
        assert_eq!(interpreter.interpret(Some("garbage text")), expected);
        assert_eq!(interpreter.interpret(None), expected);
        assert_eq!(interpreter.interpret(Some("   \n\t ")), expected);
    }
    assert_eq!(expected.len(), 3);
    assert!(expected.iter().all(|r| strategy_of(r) == Some(FALLBACK_STRATEGY)));
}

#[test]
fn bold_headers_yield_literal_values() {
    let result = ResponseInterpreter::new().interpret_detailed(Some(BOLD_TWO_ROLES));
    assert_eq!(
        result.source,
        InterpretationSource::Strategy(ExtractionStrategy::BoldHeader)
    );
    let roles = result.roles;
    assert_eq!(roles.len(), 2);

    let hr = &roles[0];
    assert_eq!(hr.id, 101);
    assert_eq!(hr.name, "HR Manager");
    assert_eq!(hr.origin, RoleOrigin::Suggested);
    assert_eq!(
        hr.permissions,
        vec!["HRPortal: HRView".to_string(), "HRPortal: HRManage".to_string()]
    );
    assert_eq!(hr.permission_count, 2);
    assert_eq!(hr.applications, vec!["HRPortal".to_string()]);
    assert_eq!(hr.member_count, 3);
    assert_eq!(
        hr.members,
        vec![
            "Alice Johnson (HR)".to_string(),
            "Bob Williams (HR)".to_string(),
            "Dana Park (HR)".to_string(),
        ]
    );
    assert_eq!(hr.confidence, 88);
    assert_eq!(hr.justification(), Some("HR staff manage employee records."));
    assert_eq!(strategy_of(hr), Some("bold_header"));

    let finance = &roles[1];
    assert_eq!(finance.id, 102);
    assert_eq!(finance.name, "Finance Analyst");
    assert_eq!(finance.member_count, 4);
    assert_eq!(finance.members.len(), 4);
    assert_eq!(finance.members[0], "Alice Johnson (HR)");
    assert_eq!(finance.confidence, 72);
    assert_eq!(finance.applications, vec!["FinanceTool".to_string()]);
    assert_eq!(finance.justification(), Some(DEFAULT_JUSTIFICATION));
}

#[test]
fn heading_markers_are_recognised() {
    let roles = ResponseInterpreter::new().interpret(Some(HEADING_ROLES));
    assert_eq!(roles.len(), 2);
    assert_eq!(roles[0].name, "Developer");
    assert_eq!(
        roles[0].permissions,
        vec!["CodeRepo: CodeRead".to_string(), "CodeRepo: CodeWrite".to_string()]
    );
    assert_eq!(roles[0].confidence, 91);
    assert_eq!(strategy_of(&roles[0]), Some("heading_marker"));

    let auditor = &roles[1];
    assert_eq!(auditor.name, "Auditor");
    assert_eq!(auditor.member_count, 1);
    assert_eq!(auditor.confidence, DEFAULT_CONFIDENCE);
}

#[test]
fn plain_text_uses_loose_labels_and_name_field() {
    let roles = ResponseInterpreter::new().interpret(Some(PLAIN_ROLES));
    assert_eq!(roles.len(), 2);
    assert_eq!(roles[0].name, "Payroll Clerk");
    assert_eq!(
        roles[0].permissions,
        vec!["Payroll: Run".to_string(), "Payroll: View".to_string()]
    );
    assert_eq!(roles[0].member_count, 5);
    assert_eq!(roles[0].confidence, 64);
    assert_eq!(roles[1].name, "Badge Administrator");
    assert_eq!(roles[1].applications, vec!["Facilities".to_string()]);
    assert_eq!(strategy_of(&roles[1]), Some("plain_text"));
}

#[test]
fn dash_blocks_are_used_without_role_headers() {
    let text = "\
HR Coordinator
Key Permissions:
- HRPortal: HRView
Estimated User Count: 2
---
Release Engineer
Key Permissions:
- CodeRepo: CodeWrite
---
";
    let roles = ResponseInterpreter::new().interpret(Some(text));
    assert_eq!(roles.len(), 2);
    assert_eq!(roles[0].name, "HR Coordinator");
    assert_eq!(roles[1].name, "Release Engineer");
    assert_eq!(roles[1].member_count, 2);
    assert_eq!(strategy_of(&roles[0]), Some("dash_blocks"));
}

#[test]
fn dash_blocks_read_parenthetical_member_names() {
    let text = "\
Finance Reviewer
Key Permissions:
- FinanceTool: FinanceView
Estimated User Count: 2 (Carol Lee; Bob Williams)
Confidence: 77
---
";
    let roles = ResponseInterpreter::new().interpret(Some(text));
    assert_eq!(roles.len(), 1);
    assert_eq!(strategy_of(&roles[0]), Some("dash_blocks"));
    assert_eq!(roles[0].name, "Finance Reviewer");
    assert_eq!(roles[0].member_count, 2);
    assert_eq!(
        roles[0].members,
        vec![
            "Carol Lee (Finance)".to_string(),
            "Bob Williams (Finance)".to_string(),
        ]
    );
    assert_eq!(roles[0].confidence, 77);
}

#[test]
fn single_emphasis_labels_keep_their_values() {
    let text = "\
**Role 1: HR Manager**
*Key Permissions:*
- HRPortal: HRView
- HRPortal: HRManage
*Justification:* HR staff manage records.
_Confidence:_ 81
";
    let roles = ResponseInterpreter::new().interpret(Some(text));
    assert_eq!(roles.len(), 1);
    assert_eq!(
        roles[0].permissions,
        vec!["HRPortal: HRView".to_string(), "HRPortal: HRManage".to_string()]
    );
    assert_eq!(roles[0].applications, vec!["HRPortal".to_string()]);
    assert_eq!(roles[0].justification(), Some("HR staff manage records."));
    assert_eq!(roles[0].confidence, 81);
}

#[test]
fn bullet_items_starting_with_label_words_stay_in_the_list() {
    let text = "\
Role 1: Helpdesk Staff
Key permissions:
- Helpdesk: TicketView
- Members Portal: View
- Helpdesk: TicketEdit
Confidence 66
";
    let roles = ResponseInterpreter::new().interpret(Some(text));
    assert_eq!(strategy_of(&roles[0]), Some("plain_text"));
    assert_eq!(
        roles[0].permissions,
        vec![
            "Helpdesk: TicketView".to_string(),
            "Members Portal: View".to_string(),
            "Helpdesk: TicketEdit".to_string(),
        ]
    );
    assert_eq!(
        roles[0].applications,
        vec!["Helpdesk".to_string(), "Members Portal".to_string()]
    );
    assert_eq!(roles[0].member_count, 1);
    assert_eq!(roles[0].confidence, 66);
}

#[test]
fn name_fields_open_sections() {
    let roles = ResponseInterpreter::new().interpret(Some(NAME_FIELD_ROLES));
    assert_eq!(roles.len(), 2);
    assert_eq!(roles[0].name, "Support Agent");
    assert_eq!(roles[0].member_count, 6);
    assert_eq!(roles[0].justification(), Some("Agents triage incoming tickets."));
    assert_eq!(roles[1].name, "Support Lead");
    assert_eq!(roles[1].confidence, 95);
    assert_eq!(roles[1].applications, vec!["Helpdesk".to_string()]);
    assert_eq!(strategy_of(&roles[0]), Some("name_field"));
}

#[test]
fn first_matching_strategy_wins_without_merging() {
    let text = format!("{BOLD_TWO_ROLES}\n### Role 3: Extra\nKey Permissions: X: y\n");
    let roles = ResponseInterpreter::new().interpret(Some(&text));
    assert!(roles.iter().all(|r| strategy_of(r) == Some("bold_header")));
}

#[test]
fn reasoning_segments_are_ignored() {
    let text = format!(
        "<think>\n**Role 9: Hidden**\nKey Permissions: Secret: All\n</think>\n{BOLD_TWO_ROLES}"
    );
    let roles = ResponseInterpreter::new().interpret(Some(&text));
    assert_eq!(roles.len(), 2);
    assert!(roles.iter().all(|r| r.name != "Hidden"));

    let only_reasoning = "<think>**Role 1: Hidden**\nKey Permissions: A: b";
    assert_eq!(
        ResponseInterpreter::new().interpret(Some(only_reasoning)),
        fallback_roles()
    );
}

#[test]
fn missing_names_and_counts_use_defaults() {
    let text = "**Role 1:**\nKey Permissions: Legacy: Access\n";
    let roles = ResponseInterpreter::new().interpret(Some(text));
    assert_eq!(roles.len(), 1);
    assert_eq!(roles[0].name, "Suggested Role 1");
    assert_eq!(roles[0].member_count, 1);
    assert_eq!(roles[0].members, vec!["Alice Johnson (HR)".to_string()]);
    assert_eq!(roles[0].confidence, DEFAULT_CONFIDENCE);
}

#[test]
fn names_without_count_set_the_count() {
    let text = "**Role 1: Finance Reviewer**\nEstimated User Count: (Carol Lee, Dana Park)\nKey Permissions: FinanceTool: FinanceView\n";
    let roles = ResponseInterpreter::new().interpret(Some(text));
    assert_eq!(roles[0].member_count, 2);
    assert_eq!(
        roles[0].members,
        vec!["Carol Lee (Finance)".to_string(), "Dana Park (Finance)".to_string()]
    );
}

#[test]
fn roster_is_capped_and_confidence_clamped() {
    let text = "**Role 1: Everyone**\nEstimated User Count: 100000\nConfidence: 400%\n";
    let roles = ResponseInterpreter::new().interpret(Some(text));
    assert_eq!(roles[0].member_count, 100_000);
    assert_eq!(roles[0].members.len(), ROSTER_CAP);
    assert_eq!(roles[0].confidence, 100);
    assert_eq!(roles[0].applications, vec!["Application".to_string()]);
    assert!(roles[0].permissions.is_empty());
}

#[test]
fn adversarial_inputs_never_panic_or_return_empty() {
    let long_line = "*".repeat(10_000);
    let digits = format!("**Role {}: X**", "9".repeat(200));
    let inputs = [
        "**Role",
        "**Role 1: **",
        "### Role",
        "---\n---\n---",
        "Name:",
        "Key Permissions:\n-\n-\n",
        "</think></think><think>",
        "Role 1: \u{1F600}\nKey permissions: \u{00E9}: \u{00FC}",
        "**Role 1: \u{0130}stanbul Ops**\nConfidence: \u{0660}\u{0661}",
        long_line.as_str(),
        digits.as_str(),
    ];
    let interpreter = ResponseInterpreter::new();
    for input in inputs {
        let roles = interpreter.interpret(Some(input));
        assert!(!roles.is_empty(), "input {input:?}");
        assert!(roles.iter().all(|r| r.origin == RoleOrigin::Suggested));
        assert!(roles.iter().all(rolemine_types::RoleRecord::is_consistent));
    }
}
