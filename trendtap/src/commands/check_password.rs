use anyhow::Result;
use trendtap_common::password::{evaluate_password, EvaluationContext, GuessCountEstimator};

use super::common::read_password_input;
use crate::config::load_config;

pub(crate) async fn command(
    cli: &crate::Cli,
    email: Option<&str>,
    first_name: Option<&str>,
    last_name: Option<&str>,
    json: bool,
) -> Result<()> {
    let config = load_config(&cli.config, true)?;
    let password = read_password_input("Password to evaluate")?;

    let context = EvaluationContext {
        email: email.map(str::to_owned),
        first_name: first_name.map(str::to_owned),
        last_name: last_name.map(str::to_owned),
    };
    let result = evaluate_password(
        &password,
        &config.store.password_requirements,
        Some(&context),
        Some(&GuessCountEstimator),
    );

    if json {
        println!("{}", serde_json::to_string_pretty(&result)?);
    } else {
        println!("Strength: {} ({}/100)", result.strength.label(), result.score);
        println!("Entropy: {:.1} bits", result.entropy_bits);
        println!("Estimated crack time: {}", result.crack_time_display);
        for line in &result.feedback {
            println!("  ! {line}");
        }
        for line in &result.suggestions {
            println!("  > {line}");
        }
        if result.is_valid {
            println!("Password meets the policy");
        } else {
            println!("Password does not meet the policy");
        }
    }

    if !result.is_valid {
        std::process::exit(1);
    }
    Ok(())
}
