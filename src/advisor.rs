// Copyright (c) 2025 Pocketsage Contributors.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

// Canned keyword responder. An ordered rule table over the lowercased
// input: first match wins, unmatched input gets the fallback. Every call
// is independent of any previous one.

use once_cell::sync::Lazy;
use regex::Regex;

struct Rule {
    pattern: Regex,
    reply: &'static str,
}

const FALLBACK: &str = "I can help with budgeting, saving, paying down debt, investing, \
credit scores, retirement, and emergency funds. Try asking about one of those.";

// Priority order is load-bearing: "how do I budget my savings" should hit
// the budget rule, not the save rule. Greeting words take word boundaries
// so that e.g. "which" does not read as "hi".
static RULES: Lazy<Vec<Rule>> = Lazy::new(|| {
    [
        (
            "budget|spend",
            "A simple starting point is the 50/30/20 split: 50% of take-home pay for needs, \
             30% for wants, 20% for saving or paying down debt. Track a month of spending in \
             the transactions view to see where you actually stand.",
        ),
        (
            "save|saving",
            "Pay yourself first: move a fixed amount into savings the day you get paid, \
             before anything else. Small automatic transfers beat waiting for leftovers.",
        ),
        (
            "debt|loan",
            "List your loans by interest rate and put extra payments toward the highest rate \
             first, while keeping minimums on the rest. The loans view shows repayment \
             progress and months remaining for each one.",
        ),
        (
            "invest",
            "Time in the market beats timing the market. Low-cost index funds plus regular \
             contributions are how most people build wealth over the long run.",
        ),
        (
            "credit",
            "Payment history and utilization drive most of your credit score. Pay on time, \
             keep card balances under roughly 30% of their limits, and avoid opening several \
             accounts at once. Log scores with 'credit add' to watch the trend.",
        ),
        (
            "retire",
            "A common rule of thumb is saving 10-15% of income for retirement, started as \
             early as possible. If your employer matches contributions, capture the full \
             match before anything else.",
        ),
        (
            "emergency",
            "Aim for three to six months of essential expenses somewhere you can reach it \
             quickly. Start with a small buffer like $1,000 and build from there.",
        ),
        (
            r"\b(hi|hello|hey)\b",
            "Hello! Ask me about budgeting, saving, debt, investing, credit scores, or \
             retirement.",
        ),
        (
            "thank",
            "You're welcome! Happy to help with anything else about your money.",
        ),
    ]
    .into_iter()
    .map(|(pattern, reply)| Rule {
        pattern: Regex::new(pattern).expect("advisor rule patterns are static"),
        reply,
    })
    .collect()
});

pub fn respond(input: &str) -> &'static str {
    let normalized = input.to_lowercase();
    RULES
        .iter()
        .find(|rule| rule.pattern.is_match(&normalized))
        .map_or(FALLBACK, |rule| rule.reply)
}
