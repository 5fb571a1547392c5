//! Chat command handlers

use colored::Colorize;
use std::io::Write;

use crate::cli::helpers::{fmt_macro, today};
use crate::cli::summary::print_summary;
use crate::context::{ChatSession, CoachContext};
use crate::error::Result;
use crate::executor::{ActionOutcome, ActionReport};

/// Handle a single non-interactive turn
///
/// Used by `coach chat --once`, mostly for scripting and smoke tests.
pub async fn handle_once(context: &CoachContext, message: String) -> Result<()> {
    let mut session = ChatSession::new();
    run_turn(context, &mut session, message.trim()).await?;
    Ok(())
}

/// Handle the interactive chat command
pub async fn handle_chat(context: &CoachContext) -> Result<()> {
    println!(
        "Coach is ready ({} backend). Type 'exit' to leave.",
        context.config().llm.provider
    );

    let mut session = ChatSession::new();

    loop {
        print!("you> ");
        std::io::stdout().flush()?;

        let mut line = String::new();
        let read = std::io::stdin().read_line(&mut line)?;
        if read == 0 {
            // EOF ends the conversation
            println!();
            break;
        }

        let utterance = line.trim();
        if utterance.is_empty() {
            continue;
        }
        if utterance.eq_ignore_ascii_case("exit") || utterance.eq_ignore_ascii_case("quit") {
            break;
        }

        let done = run_turn(context, &mut session, utterance).await?;
        if done {
            break;
        }
    }

    println!("Bye!");
    Ok(())
}

/// Execute one turn and print the reply with its action outcomes
async fn run_turn(
    context: &CoachContext,
    session: &mut ChatSession,
    utterance: &str,
) -> Result<bool> {
    let outcome = context
        .turn_executor()
        .execute_turn(session, utterance, today())
        .await?;

    println!("coach> {}", outcome.speak);
    for report in &outcome.reports {
        print_report(report);
    }

    Ok(outcome.done)
}

/// Print one action outcome line under the reply
fn print_report(report: &ActionReport) {
    match &report.result {
        Ok(ActionOutcome::GoalSet) => {
            println!("{}", "  ✓ Goal updated".green());
        }
        Ok(ActionOutcome::FoodAdded { name, .. }) => {
            println!("{}", format!("  ✓ Saved food '{}'", name).green());
        }
        Ok(ActionOutcome::MealLogged { date, items }) => {
            println!(
                "{}",
                format!("  ✓ Logged {} item(s) for {}", items.len(), date).green()
            );
            for item in items {
                println!("    - {} x {}", fmt_macro(item.qty), item.name);
            }
        }
        Ok(ActionOutcome::Summary(summary)) => {
            print_summary(summary);
        }
        Ok(ActionOutcome::Ignored { name }) => {
            println!(
                "{}",
                format!("  Ignored unknown action '{}'", name).yellow()
            );
        }
        Err(e) => {
            println!("{}", format!("  ✗ {}: {}", report.action, e).yellow());
        }
    }
}
