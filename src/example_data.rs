//! Canned demonstration data for the Email Buddy tool, so the feature can be
//! shown without the user supplying their own correspondence.

use crate::models::{EmailAnalysis, EmailBuddyResponse, EmailDrafts, JargonItem};

pub struct EmailBuddyExample {
    pub email: &'static str,
    pub response: EmailBuddyResponse,
}

const EXAMPLE_RECEIVED_EMAIL: &str = "Subject: URGENT - Weekend Schedule & Right of First Refusal

You were 15 minutes late for pickup last Friday. This is unacceptable and a violation of our agreement. The kids were upset.

I'm taking them to a birthday party on Saturday at 2 PM, so I need you to drop them off at my house at 1 PM instead of the usual 6 PM. This is non-negotiable as I've already RSVP'd. Remember that our order includes a 'Right of First Refusal' clause, which applies here since I'll be with them.

Also, you still haven't paid me for the section 7 expenses from two weeks ago. I need that money by tomorrow.";

pub fn email_buddy_example() -> EmailBuddyExample {
    EmailBuddyExample {
        email: EXAMPLE_RECEIVED_EMAIL,
        response: EmailBuddyResponse {
            analysis: EmailAnalysis {
                tone: "Demanding and Accusatory".to_string(),
                summary: "The sender is making accusations about tardiness, unilaterally changing the weekend schedule, demanding payment, and referencing legal clauses.".to_string(),
                key_demands: vec![
                    "Drop kids off at 1 PM on Saturday instead of 6 PM.".to_string(),
                    "Pay for the section 7 expenses by tomorrow.".to_string(),
                ],
                legal_jargon: vec![
                    JargonItem {
                        term: "Right of First Refusal".to_string(),
                        context: "Remember that our order includes a 'Right of First Refusal' clause...".to_string(),
                    },
                    JargonItem {
                        term: "section 7 expenses".to_string(),
                        context: "Also, you still haven't paid me for the section 7 expenses...".to_string(),
                    },
                ],
            },
            drafts: EmailDrafts {
                biff: "Subject: Re: Weekend Schedule & Right of First Refusal\n\nHi [Co-Parent's Name],\n\nThanks for the information about the party.\n\nPer our court order, the exchange time is Saturday at 6 PM. I will be adhering to that schedule. The payment for the Section 7 expense you mentioned was sent via e-transfer this morning.\n\nBest,\n[Your Name]".to_string(),
                grey_rock: "Subject: Re: Weekend Schedule & Right of First Refusal\n\nThe 6 PM exchange time on Saturday is noted. The payment was sent.".to_string(),
                friendly_assertive: "Subject: Re: Weekend Schedule & Right of First Refusal\n\nHi [Co-Parent's Name],\n\nThanks for the update.\n\nI'll be sticking to the court-ordered exchange time of 6 PM on Saturday. The payment for the expenses was also sent this morning.\n\nTo ensure we are on the same page for future planning, could you please confirm you have the latest copy of our court order?\n\nThanks,\n[Your Name]".to_string(),
            },
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schemas;
    use crate::validation;

    #[test]
    fn example_response_conforms_to_the_email_schema() {
        let example = email_buddy_example();
        let raw = serde_json::to_string(&example.response).expect("example should serialize");
        validation::validate(&raw, &schemas::EMAIL_DRAFT)
            .expect("example data must satisfy its own schema");
    }
}
